//! Store worker.
//!
//! Bridges the synchronous game loop with the async score store. Requests are
//! spawned onto a private tokio runtime; replies are polled with
//! [`StoreWorker::try_recv`] once per frame so the loop never blocks on I/O.

use std::sync::Arc;

use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tracing::debug;

use crate::error::Result;
use crate::record::{NewScore, ScoreRecord};
use crate::store::ScoreStore;

/// Identifies a request so its reply can be matched (or discarded as stale).
pub type RequestId = u64;

/// Work for the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreRequest {
    Submit(NewScore),
    FetchTop(usize),
}

/// Completed request.
#[derive(Debug)]
pub enum StoreReply {
    Submitted {
        id: RequestId,
        result: Result<ScoreRecord>,
    },
    Fetched {
        id: RequestId,
        result: Result<Vec<ScoreRecord>>,
    },
}

impl StoreReply {
    pub fn id(&self) -> RequestId {
        match self {
            StoreReply::Submitted { id, .. } | StoreReply::Fetched { id, .. } => *id,
        }
    }
}

/// Running store worker.
pub struct StoreWorker {
    rt: Runtime,
    store: Arc<ScoreStore>,
    reply_tx: mpsc::UnboundedSender<StoreReply>,
    reply_rx: mpsc::UnboundedReceiver<StoreReply>,
    next_id: RequestId,
}

impl StoreWorker {
    pub fn start(store: ScoreStore) -> Result<Self> {
        let rt = Runtime::new()?;
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();
        Ok(Self {
            rt,
            store: Arc::new(store),
            reply_tx,
            reply_rx,
            next_id: 1,
        })
    }

    pub fn submit(&mut self, score: NewScore) -> RequestId {
        self.send(StoreRequest::Submit(score))
    }

    pub fn fetch_top(&mut self, limit: usize) -> RequestId {
        self.send(StoreRequest::FetchTop(limit))
    }

    /// Spawn `request` and return the id its reply will carry.
    pub fn send(&mut self, request: StoreRequest) -> RequestId {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.dispatch(id, request);
        id
    }

    /// Spawn `request` under a caller-chosen id.
    pub fn dispatch(&mut self, id: RequestId, request: StoreRequest) {
        self.next_id = self.next_id.max(id.saturating_add(1));

        let store = Arc::clone(&self.store);
        let tx = self.reply_tx.clone();
        debug!(id, ?request, "store request");

        self.rt.spawn(async move {
            let reply = match request {
                StoreRequest::Submit(score) => StoreReply::Submitted {
                    id,
                    result: store.submit(score).await,
                },
                StoreRequest::FetchTop(limit) => StoreReply::Fetched {
                    id,
                    result: store.list_top(limit).await,
                },
            };
            // Receiver gone means the worker was dropped; nothing to deliver to.
            let _ = tx.send(reply);
        });
    }

    pub fn try_recv(&mut self) -> Option<StoreReply> {
        self.reply_rx.try_recv().ok()
    }

    /// Block until the next reply or until `timeout` passes.
    pub fn recv_timeout(&mut self, timeout: std::time::Duration) -> Option<StoreReply> {
        let rx = &mut self.reply_rx;
        self.rt
            .block_on(async { tokio::time::timeout(timeout, rx.recv()).await.ok().flatten() })
    }
}
