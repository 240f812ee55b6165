//! Panel view: one paginator per shown list, bound to the latest snapshot
//!
//! Every read first catches up with the snapshot channel, so a page read
//! right after a refresh is computed against the new lists.

use super::paginator::Paginator;
use crate::error::PanelError;
use crate::snapshot::{ListKind, Snapshot};

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// A list the panel shows, and its page size (`None` shows it unpaginated)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListSpec {
    pub kind: ListKind,
    pub page_size: Option<NonZeroUsize>,
}

impl ListSpec {
    pub fn paged(kind: ListKind, page_size: NonZeroUsize) -> Self {
        Self {
            kind,
            page_size: Some(page_size),
        }
    }

    pub fn raw(kind: ListKind) -> Self {
        Self {
            kind,
            page_size: None,
        }
    }
}

/// `files:10` or `files`
impl FromStr for ListSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, size) = match s.split_once(':') {
            Some((name, size)) => (name, Some(size)),
            None => (s, None),
        };

        let kind = name
            .parse::<ListKind>()
            .map_err(|name| format!("unknown list '{name}'"))?;

        match size {
            None => Ok(Self::raw(kind)),
            Some(size) => size
                .trim()
                .parse::<NonZeroUsize>()
                .map(|size| Self::paged(kind, size))
                .map_err(|e| format!("page size for '{kind}' must be a positive number: {e}")),
        }
    }
}

impl fmt::Display for ListSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.page_size {
            Some(size) => write!(f, "{}:{}", self.kind, size),
            None => write!(f, "{}", self.kind),
        }
    }
}

/// One list's current page, ready for a table renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    pub list: ListKind,
    pub paginated: bool,
    pub page: usize,
    pub page_size: Option<usize>,
    pub page_count: usize,
    pub total: usize,
    pub items: Vec<Value>,
}

/// Everything the render surface shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelRender {
    pub shard: String,
    pub seq: u64,
    pub lists: Vec<PageView>,
}

/// Pagination state for every shown list, tracking the snapshot channel
pub struct PanelView {
    rx: watch::Receiver<Arc<Snapshot>>,
    current: Arc<Snapshot>,
    lists: Vec<(ListKind, Paginator<Value>)>,
}

impl PanelView {
    /// Build a view over `specs`, in the order given
    pub fn new(mut rx: watch::Receiver<Arc<Snapshot>>, specs: &[ListSpec]) -> Self {
        let current = Arc::clone(&rx.borrow_and_update());

        let lists = specs
            .iter()
            .map(|spec| {
                let items = Arc::clone(current.list(spec.kind));
                let pager = match spec.page_size {
                    Some(size) => Paginator::new(size, items),
                    None => Paginator::unbounded(items),
                };
                (spec.kind, pager)
            })
            .collect();

        Self { rx, current, lists }
    }

    /// Rebind every paginator if a newer snapshot was published
    fn sync(&mut self) {
        let latest = Arc::clone(&self.rx.borrow_and_update());
        if Arc::ptr_eq(&latest, &self.current) {
            return;
        }

        for (kind, pager) in &mut self.lists {
            pager.rebind(Arc::clone(latest.list(*kind)));
        }
        debug!(
            seq = latest.seq(),
            previous_seq = self.current.seq(),
            "Panel rebound to new snapshot"
        );
        self.current = latest;
    }

    fn pager_mut(&mut self, kind: ListKind) -> Result<&mut Paginator<Value>, PanelError> {
        self.lists
            .iter_mut()
            .find(|(k, _)| *k == kind)
            .map(|(_, pager)| pager)
            .ok_or_else(|| PanelError::UnknownList(kind.to_string()))
    }

    /// Lists shown by this panel, in display order
    pub fn lists(&self) -> impl Iterator<Item = ListKind> + '_ {
        self.lists.iter().map(|(kind, _)| *kind)
    }

    /// Shard id of the latest snapshot
    pub fn shard(&mut self) -> &str {
        self.sync();
        self.current.shard()
    }

    pub fn snapshot(&mut self) -> Arc<Snapshot> {
        self.sync();
        Arc::clone(&self.current)
    }

    /// Current page of one list
    pub fn page(&mut self, kind: ListKind) -> Result<PageView, PanelError> {
        self.sync();
        self.pager_mut(kind).map(|pager| page_view(kind, pager))
    }

    /// Move one list to page `n` (clamped) and return that page
    pub fn set_page(&mut self, kind: ListKind, n: usize) -> Result<PageView, PanelError> {
        self.sync();
        let pager = self.pager_mut(kind)?;
        pager.set_page(n);
        Ok(page_view(kind, pager))
    }

    pub fn next_page(&mut self, kind: ListKind) -> Result<PageView, PanelError> {
        self.sync();
        let pager = self.pager_mut(kind)?;
        pager.next_page();
        Ok(page_view(kind, pager))
    }

    pub fn prev_page(&mut self, kind: ListKind) -> Result<PageView, PanelError> {
        self.sync();
        let pager = self.pager_mut(kind)?;
        pager.prev_page();
        Ok(page_view(kind, pager))
    }

    /// Shard id and the current page of every list
    pub fn render(&mut self) -> PanelRender {
        self.sync();
        PanelRender {
            shard: self.current.shard().to_string(),
            seq: self.current.seq(),
            lists: self
                .lists
                .iter()
                .map(|(kind, pager)| page_view(*kind, pager))
                .collect(),
        }
    }
}

fn page_view(kind: ListKind, pager: &Paginator<Value>) -> PageView {
    PageView {
        list: kind,
        paginated: pager.is_paged(),
        page: pager.page_number(),
        page_size: pager.is_paged().then(|| pager.page_size().get()),
        page_count: pager.page_count(),
        total: pager.total_count(),
        items: pager.current_page_items().to_vec(),
    }
}
