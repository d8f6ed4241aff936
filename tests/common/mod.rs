//! Shared fixtures for the integration tests.
//!
//! [`SpyTransport`] records every request it receives and answers from a
//! scripted queue, so tests can count calls and inspect what was sent.

#![allow(dead_code)]

use arm_fluent::clients::{HttpResponse, HttpTransport, PreparedRequest, TransportError};
use arm_fluent::{ArmConfig, ServiceClient, StaticTokenCredential, SubscriptionId};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

pub const SUBSCRIPTION: &str = "sub1";

/// A transport that records requests and replays scripted responses.
#[derive(Debug, Default)]
pub struct SpyTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<PreparedRequest>>,
}

impl SpyTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queues a JSON response.
    pub fn respond(&self, status: u16, body: Value) -> &Self {
        self.push(Ok(HttpResponse::new(
            status,
            request_id_headers(),
            body.to_string(),
        )))
    }

    /// Queues a response without a body.
    pub fn respond_empty(&self, status: u16) -> &Self {
        self.push(Ok(HttpResponse::new(status, request_id_headers(), "")))
    }

    /// Queues a failure to obtain any response.
    pub fn fail(&self, message: &str) -> &Self {
        self.push(Err(TransportError::connection(message)))
    }

    fn push(&self, response: Result<HttpResponse, TransportError>) -> &Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    /// Returns how many requests reached the transport.
    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Returns the recorded requests in dispatch order.
    pub fn requests(&self) -> Vec<PreparedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Returns `"METHOD url"` of every recorded request.
    pub fn lines(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|request| format!("{} {}", request.method, request.url))
            .collect()
    }
}

#[async_trait]
impl HttpTransport for SpyTransport {
    async fn execute(&self, request: PreparedRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::connection("no scripted response left")))
    }
}

fn request_id_headers() -> HashMap<String, Vec<String>> {
    let mut headers = HashMap::new();
    headers.insert("x-ms-request-id".to_string(), vec!["req-1".to_string()]);
    headers
}

/// Creates a client for subscription `sub1` dispatching through `spy`.
pub fn client(spy: &Arc<SpyTransport>) -> ServiceClient {
    let config = ArmConfig::builder()
        .subscription_id(SubscriptionId::new(SUBSCRIPTION).unwrap())
        .build()
        .unwrap();
    ServiceClient::with_transport(
        config,
        Arc::new(StaticTokenCredential::new("test-token")),
        spy.clone(),
    )
}

/// The URL prefix of every resource-group-scoped request.
pub fn rg_url(resource_group: &str) -> String {
    format!("https://management.azure.com/subscriptions/{SUBSCRIPTION}/resourceGroups/{resource_group}")
}
