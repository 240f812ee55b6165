//! Shared helpers for integration tests: a real shard metadata backend on an
//! ephemeral port and a source whose completion order the test controls.

#![allow(dead_code)]

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use shard_panel::poller::{MetaSource, DEFAULT_META_PATH};
use shard_panel::snapshot::ShardMeta;
use shard_panel::PanelError;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

pub fn file_items(n: usize) -> Vec<Value> {
    (1..=n).map(|i| json!(format!("f{i}"))).collect()
}

pub fn shard_doc(shard: &str, files: usize) -> Value {
    json!({ "shard": shard, "files": file_items(files) })
}

/// What the backend answers with
#[derive(Debug, Clone)]
pub enum Reply {
    Json(Value),
    Status(u16),
    Body(&'static str),
}

#[derive(Clone)]
struct BackendState {
    reply: Arc<Mutex<Reply>>,
    hits: Arc<AtomicUsize>,
}

/// Shard metadata backend served by axum on 127.0.0.1
pub struct Backend {
    pub url: String,
    state: BackendState,
    task: JoinHandle<()>,
}

impl Backend {
    pub async fn start(reply: Reply) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let state = BackendState {
            reply: Arc::new(Mutex::new(reply)),
            hits: Arc::new(AtomicUsize::new(0)),
        };
        let router = Router::new()
            .route(DEFAULT_META_PATH, get(meta_handler))
            .with_state(state.clone());

        let task = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            url: format!("http://{addr}{DEFAULT_META_PATH}"),
            state,
            task,
        }
    }

    pub fn set_reply(&self, reply: Reply) {
        *self.state.reply.lock().unwrap() = reply;
    }

    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }
}

impl Drop for Backend {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn meta_handler(State(state): State<BackendState>) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let reply = state.reply.lock().unwrap().clone();
    match reply {
        Reply::Json(body) => Json(body).into_response(),
        Reply::Status(code) => StatusCode::from_u16(code).unwrap().into_response(),
        Reply::Body(body) => (StatusCode::OK, body).into_response(),
    }
}

type Scripted = Result<ShardMeta, PanelError>;

/// Source whose fetches wait until the test answers them
#[derive(Default)]
pub struct ScriptedSource {
    pending: Mutex<VecDeque<oneshot::Sender<Scripted>>>,
}

impl ScriptedSource {
    pub fn pending(&self) -> usize {
        self.pending.lock().unwrap().len()
    }

    pub async fn wait_for_fetches(&self, n: usize) {
        while self.pending() < n {
            tokio::task::yield_now().await;
        }
    }

    /// Answer the fetch that was made `index`-th among those still outstanding
    pub fn answer(&self, index: usize, shard: &str, files: usize) {
        let tx = self.pending.lock().unwrap().remove(index).expect("no such fetch");
        let meta = ShardMeta {
            shard: shard.to_string(),
            files: file_items(files),
            fingerprints: Vec::new(),
        };
        let _ = tx.send(Ok(meta));
    }
}

impl MetaSource for ScriptedSource {
    fn fetch(&self) -> impl Future<Output = Scripted> + Send {
        let (tx, rx) = oneshot::channel();
        self.pending.lock().unwrap().push_back(tx);
        async move {
            rx.await
                .unwrap_or_else(|_| Err(PanelError::Config("scripted reply dropped".to_string())))
        }
    }

    fn describe(&self) -> &str {
        "scripted"
    }
}
