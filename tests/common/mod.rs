//! Shared helpers for integration tests

use async_trait::async_trait;
use prestashop_cli::api::{ApiRequest, Method, Transport};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replays scripted responses in order and records every request
#[derive(Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<(Method, String, Result<Value, String>)>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(self, method: Method, resource: &str, response: Value) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back((method, resource.to_string(), Ok(response)));
        self
    }

    pub fn then_fail(self, method: Method, resource: &str, message: &str) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back((method, resource.to_string(), Err(message.to_string())));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn request(&self, request: ApiRequest) -> anyhow::Result<Value> {
        self.requests.lock().unwrap().push(request.clone());

        let next = self.script.lock().unwrap().pop_front();
        let Some((method, resource, response)) = next else {
            anyhow::bail!("Unexpected request {} {}", request.method.as_str(), request.resource);
        };
        assert_eq!(method, request.method, "method of request to {}", request.resource);
        assert_eq!(resource, request.resource);

        response.map_err(|message| anyhow::anyhow!(message))
    }
}
