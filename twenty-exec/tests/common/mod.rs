#![allow(dead_code)]

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use twenty_core::retry::{RetryConfig, Retrier, Sleeper};
use twenty_exec::credentials::{Credentials, StaticCredentialsProvider};
use twenty_exec::http::{HttpClient, HttpError, HttpRequestParts, HttpResponseParts};
use twenty_exec::TwentyClient;

pub type Reply = Result<HttpResponseParts, HttpError>;

type Responder = Box<dyn Fn(&HttpRequestParts) -> Reply + Send + Sync>;

/// In-memory transport: answers from a closure and records every request.
pub struct MockHttp {
    responder: Responder,
    requests: Mutex<Vec<HttpRequestParts>>,
}

impl MockHttp {
    pub fn with<F>(responder: F) -> Arc<Self>
    where
        F: Fn(&HttpRequestParts) -> Reply + Send + Sync + 'static,
    {
        Arc::new(Self {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Replies in order; once the queue is empty every request gets a 200 `{}`.
    pub fn queue(replies: Vec<Reply>) -> Arc<Self> {
        let queue = Mutex::new(VecDeque::from(replies));
        Self::with(move |_| {
            queue
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| json(200, serde_json::json!({})))
        })
    }

    pub fn requests(&self) -> Vec<HttpRequestParts> {
        self.requests.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| r.url.path().to_string())
            .collect()
    }
}

#[async_trait]
impl HttpClient for MockHttp {
    async fn send(&self, req: HttpRequestParts, _timeout: Duration) -> Reply {
        let reply = (self.responder)(&req);
        self.requests.lock().unwrap().push(req);
        reply
    }
}

#[derive(Clone, Default)]
pub struct RecordingSleeper {
    sleeps: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    pub fn recorded(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, delay: Duration) {
        self.sleeps.lock().unwrap().push(delay);
    }
}

pub fn json(status: u16, body: Value) -> Reply {
    Ok(HttpResponseParts {
        status,
        headers: BTreeMap::new(),
        body: serde_json::to_vec(&body).unwrap(),
    })
}

pub fn text(status: u16, body: &str) -> Reply {
    Ok(HttpResponseParts {
        status,
        headers: BTreeMap::new(),
        body: body.as_bytes().to_vec(),
    })
}

pub fn with_header(reply: Reply, name: &str, value: &str) -> Reply {
    reply.map(|mut r| {
        r.headers.insert(name.to_string(), value.to_string());
        r
    })
}

pub fn credentials() -> Arc<StaticCredentialsProvider> {
    Arc::new(StaticCredentialsProvider::new(Credentials::new(
        "https://crm.example.com/",
        "test-key",
    )))
}

/// Client over `http` with a recording sleeper and jitter pinned to zero.
pub fn client(http: Arc<MockHttp>) -> (TwentyClient, RecordingSleeper) {
    client_with(http, RetryConfig::default())
}

pub fn client_with(http: Arc<MockHttp>, config: RetryConfig) -> (TwentyClient, RecordingSleeper) {
    let sleeper = RecordingSleeper::default();
    let retrier = Retrier::new(config)
        .with_sleeper(sleeper.clone())
        .with_jitter(|| 0.5);
    let client = TwentyClient::new(http, credentials()).with_retrier(retrier);
    (client, sleeper)
}

pub fn query_of(req: &HttpRequestParts) -> BTreeMap<String, String> {
    req.url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

pub fn body_of(req: &HttpRequestParts) -> Value {
    if req.body.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&req.body).unwrap()
}
