use std::collections::{HashMap, VecDeque};
use std::io;
use std::sync::{Arc, Mutex};

use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecordedRequest {
    pub url: String,
    pub params: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// In-process transport answering per remote method (camelCase path segment).
///
/// Scripted responses are consumed in order; the last one repeats.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeTransport {
    state: Arc<Mutex<FakeTransportState>>,
}

#[derive(Debug, Default)]
struct FakeTransportState {
    requests: Vec<RecordedRequest>,
    responses: HashMap<String, VecDeque<(u16, String)>>,
    failure: Option<String>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, method: &str, status: u16, body: impl Into<String>) -> &Self {
        let mut state = self.state.lock().unwrap();
        state
            .responses
            .entry(method.to_owned())
            .or_default()
            .push_back((status, body.into()));
        self
    }

    pub fn respond_ok(&self, method: &str, result: serde_json::Value) -> &Self {
        self.respond(method, 200, serde_json::json!({ "result": result }).to_string())
    }

    /// Drop the scripted responses of `method`.
    pub fn clear(&self, method: &str) -> &Self {
        self.state.lock().unwrap().responses.remove(method);
        self
    }

    pub fn fail_with(&self, message: &str) {
        self.state.lock().unwrap().failure = Some(message.to_owned());
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn calls(&self, method: &str) -> Vec<RecordedRequest> {
        let suffix = format!("/{method}");
        self.requests()
            .into_iter()
            .filter(|request| request.url.ends_with(&suffix))
            .collect()
    }

    pub fn methods(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter_map(|request| request.url.rsplit('/').next().map(str::to_owned))
            .collect()
    }
}

impl HttpTransport for FakeTransport {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let mut state = self.state.lock().unwrap();
            state.requests.push(RecordedRequest {
                url: url.to_owned(),
                params,
            });
            if let Some(message) = state.failure.clone() {
                return Err(Box::new(io::Error::new(io::ErrorKind::TimedOut, message))
                    as Box<dyn StdError + Send + Sync>);
            }

            let method = url.rsplit('/').next().unwrap_or_default().to_owned();
            let (status, body) = match state.responses.get_mut(&method) {
                Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
                Some(queue) if !queue.is_empty() => queue[0].clone(),
                _ => (500, format!("unscripted method {method}")),
            };
            Ok(HttpResponse { status, body })
        })
    }
}

pub(crate) fn make_client(transport: &FakeTransport) -> UnisenderClient {
    UnisenderClient {
        auth: Auth::api_key("test_key").unwrap(),
        base_url: "https://example.invalid".to_owned(),
        lang: Lang::En,
        platform: Some(Platform::new("tests").unwrap()),
        http: Arc::new(transport.clone()),
    }
}
