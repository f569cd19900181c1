//! In-memory `CartApi` with scripted replies, for controller tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use cartwire_core::{
    AddToCartRequest, CartSummary, Quantity, QuantityEcho, RemoveCartItemRequest,
    UpdateCartItemRequest,
};
use serde_json::Value;
use tokio::sync::oneshot;

use crate::api::{ApiError, CartApi, Result};

/// A scripted reply: answered at once, or held until the test releases it.
pub enum Reply<T> {
    Ready(Result<T>),
    Gated(oneshot::Receiver<Result<T>>),
}

impl<T> Reply<T> {
    async fn resolve(self) -> Result<T> {
        match self {
            Self::Ready(result) => result,
            Self::Gated(rx) => rx
                .await
                .unwrap_or_else(|_| Err(ApiError::Setup("gate dropped".to_string()))),
        }
    }
}

/// A reply held until the returned sender fires.
pub fn gated<T>() -> (oneshot::Sender<Result<T>>, Reply<T>) {
    let (tx, rx) = oneshot::channel();
    (tx, Reply::Gated(rx))
}

pub fn echo(quantity: i32) -> Result<QuantityEcho> {
    Quantity::new(quantity)
        .map(|quantity| QuantityEcho { quantity })
        .map_err(|e| ApiError::Decode(e.to_string()))
}

pub const fn rejected(status: u16) -> ApiError {
    ApiError::HttpStatus { status }
}

#[derive(Default)]
pub struct ScriptedApi {
    adds: Mutex<VecDeque<Reply<Value>>>,
    updates: Mutex<VecDeque<Reply<QuantityEcho>>>,
    removes: Mutex<VecDeque<Reply<Value>>>,
    summaries: Mutex<VecDeque<Reply<CartSummary>>>,
    add_requests: Mutex<Vec<AddToCartRequest>>,
    update_requests: Mutex<Vec<UpdateCartItemRequest>>,
    remove_requests: Mutex<Vec<RemoveCartItemRequest>>,
}

fn pop<T>(queue: &Mutex<VecDeque<Reply<T>>>, what: &str) -> Reply<T> {
    queue
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| Reply::Ready(Err(ApiError::Setup(format!("no {what} reply scripted")))))
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_add(&self, reply: Reply<Value>) {
        self.adds.lock().unwrap().push_back(reply);
    }

    pub fn push_update(&self, reply: Reply<QuantityEcho>) {
        self.updates.lock().unwrap().push_back(reply);
    }

    pub fn push_remove(&self, reply: Reply<Value>) {
        self.removes.lock().unwrap().push_back(reply);
    }

    pub fn push_summary(&self, reply: Reply<CartSummary>) {
        self.summaries.lock().unwrap().push_back(reply);
    }

    pub fn add_requests(&self) -> Vec<AddToCartRequest> {
        self.add_requests.lock().unwrap().clone()
    }

    pub fn update_requests(&self) -> Vec<UpdateCartItemRequest> {
        self.update_requests.lock().unwrap().clone()
    }

    pub fn remove_requests(&self) -> Vec<RemoveCartItemRequest> {
        self.remove_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CartApi for ScriptedApi {
    async fn add_item(&self, request: AddToCartRequest) -> Result<Value> {
        self.add_requests.lock().unwrap().push(request);
        let reply = pop(&self.adds, "add");
        reply.resolve().await
    }

    async fn update_item(&self, request: UpdateCartItemRequest) -> Result<QuantityEcho> {
        self.update_requests.lock().unwrap().push(request);
        let reply = pop(&self.updates, "update");
        reply.resolve().await
    }

    async fn remove_item(&self, request: RemoveCartItemRequest) -> Result<Value> {
        self.remove_requests.lock().unwrap().push(request);
        let reply = pop(&self.removes, "remove");
        reply.resolve().await
    }

    async fn summary(&self) -> Result<CartSummary> {
        let reply = pop(&self.summaries, "summary");
        reply.resolve().await
    }
}
