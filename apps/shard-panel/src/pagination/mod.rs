//! Client-side pagination of snapshot lists
//!
//! One [`Paginator`] per shown list, owned by a [`PanelView`].

mod paginator;
mod view;

pub use paginator::Paginator;
pub use view::{ListSpec, PageView, PanelRender, PanelView};
