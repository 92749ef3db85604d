//! In-memory gateway for tests.
//!
//! Responses are scripted per `METHOD path` and served in order; every
//! request is recorded so tests can assert what was (and was not) sent.

use crate::gateway::{ApiRequest, ApiResponse, HttpGateway, Method};
use async_trait::async_trait;
use facultyhub_core::{ClientError, Result};
use serde_json::{Value, json};
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

enum Scripted {
    Response(ApiResponse),
    Transport(String),
}

#[derive(Default)]
pub struct ScriptedGateway {
    script: Mutex<HashMap<String, VecDeque<Scripted>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

fn key(method: Method, path: &str) -> String {
    format!("{} {}", method, path)
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, method: Method, path: &str, entry: Scripted) {
        lock(&self.script)
            .entry(key(method, path))
            .or_default()
            .push_back(entry);
    }

    /// Queues a raw response.
    pub fn respond(&self, method: Method, path: &str, response: ApiResponse) -> &Self {
        self.push(method, path, Scripted::Response(response));
        self
    }

    /// Queues a 200 envelope carrying `data`.
    pub fn ok(&self, method: Method, path: &str, data: Value) -> &Self {
        self.respond(method, path, ApiResponse::envelope(200, data))
    }

    /// Queues an error status with a `message` body.
    pub fn fail(&self, method: Method, path: &str, status: u16, message: &str) -> &Self {
        let body = json!({ "statusCode": status, "message": message, "success": false });
        self.respond(method, path, ApiResponse::new(status, body.to_string()))
    }

    /// Queues a failure that never produced a response.
    pub fn drop_connection(&self, method: Method, path: &str) -> &Self {
        self.push(method, path, Scripted::Transport("connection reset".to_string()));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        lock(&self.requests).clone()
    }

    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Requests sent to `path`, with any method.
    pub fn requests_to(&self, path: &str) -> Vec<ApiRequest> {
        lock(&self.requests)
            .iter()
            .filter(|r| r.path == path)
            .cloned()
            .collect()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        lock(&self.requests).last().cloned()
    }
}

#[async_trait]
impl HttpGateway for ScriptedGateway {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let entry = lock(&self.script)
            .get_mut(&key(request.method, &request.path))
            .and_then(VecDeque::pop_front);
        let endpoint = request.describe();
        lock(&self.requests).push(request);

        match entry {
            Some(Scripted::Response(response)) => response.error_for_status(),
            Some(Scripted::Transport(message)) => Err(ClientError::transport(message)),
            None => Err(ClientError::transport(format!("no scripted response for {}", endpoint))),
        }
    }
}
