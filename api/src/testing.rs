//! In-memory transport for unit tests.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Mutex;

use futures::channel::oneshot;
use serde_json::Value;

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse, Transport};

pub(crate) fn json_response(status: u16, body: &Value) -> HttpResponse {
    HttpResponse { status, content_type: Some("application/json".into()), body: body.to_string() }
}

pub(crate) fn html_response(status: u16, body: &str) -> HttpResponse {
    HttpResponse { status, content_type: Some("text/html; charset=utf-8".into()), body: body.into() }
}

/// Replays queued responses in order and records every request.
///
/// When a gate is set, the first request waits on it before answering.
#[derive(Default)]
pub(crate) struct FakeTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
    gate: Mutex<Option<oneshot::Receiver<()>>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(self, response: HttpResponse) -> Self {
        self.responses.lock().unwrap().push_back(Ok(response));
        self
    }

    pub(crate) fn fail(self, error: TransportError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    pub(crate) fn gate_first(self, gate: oneshot::Receiver<()>) -> Self {
        *self.gate.lock().unwrap() = Some(gate);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for FakeTransport {
    fn send(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse, TransportError>> {
        let first = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request);
            requests.len() == 1
        };
        let gate = if first { self.gate.lock().unwrap().take() } else { None };
        let response = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(json_response(200, &serde_json::json!({}))));
        async move {
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            response
        }
    }
}
