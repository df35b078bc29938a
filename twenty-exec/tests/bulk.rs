mod common;

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use tokio::sync::Notify;
use twenty_exec::http::{HttpClient, HttpError, HttpRequestParts, HttpResponseParts};
use twenty_exec::{BulkOperation, TwentyClient, BULK_CONCURRENCY};

use common::{body_of, client, credentials, json, text, MockHttp};

fn items(values: Value) -> Vec<Map<String, Value>> {
    values
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_object().cloned().unwrap())
        .collect()
}

/// Tracks how many requests are in flight at once.
#[derive(Default)]
struct GatedHttp {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    order: Mutex<Vec<String>>,
}

#[async_trait]
impl HttpClient for GatedHttp {
    async fn send(
        &self,
        req: HttpRequestParts,
        _timeout: Duration,
    ) -> Result<HttpResponseParts, HttpError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let body: Value = serde_json::from_slice(&req.body).unwrap_or(Value::Null);
        let name = body["name"].as_str().unwrap_or_default().to_string();
        self.order.lock().unwrap().push(name.clone());
        Ok(HttpResponseParts {
            status: 201,
            headers: BTreeMap::new(),
            body: serde_json::to_vec(&json!({ "id": name })).unwrap(),
        })
    }
}

#[tokio::test]
async fn create_runs_in_windows_and_keeps_order() {
    let http = Arc::new(GatedHttp::default());
    let client = TwentyClient::new(http.clone(), credentials());

    let input: Vec<Map<String, Value>> = (0..12)
        .map(|i| json!({"name": format!("n{i}")}).as_object().cloned().unwrap())
        .collect();
    let results = client.bulk(BulkOperation::Create, "companies", input).await;

    assert_eq!(results.len(), 12);
    assert!(results.iter().all(|r| r.success));
    for (i, r) in results.iter().enumerate() {
        assert_eq!(r.data, Some(json!({"id": format!("n{i}")})));
    }
    assert_eq!(http.peak.load(Ordering::SeqCst), BULK_CONCURRENCY);
    assert_eq!(http.order.lock().unwrap().len(), 12);
}

/// Holds the request for one item until released and logs when each
/// request starts and ends.
struct HeldHttp {
    held: &'static str,
    release: Notify,
    events: Mutex<Vec<String>>,
}

#[async_trait]
impl HttpClient for HeldHttp {
    async fn send(
        &self,
        req: HttpRequestParts,
        _timeout: Duration,
    ) -> Result<HttpResponseParts, HttpError> {
        let body: Value = serde_json::from_slice(&req.body).unwrap_or(Value::Null);
        let name = body["name"].as_str().unwrap_or_default().to_string();
        self.events.lock().unwrap().push(format!("start {name}"));
        if name == self.held {
            self.release.notified().await;
        }
        self.events.lock().unwrap().push(format!("end {name}"));
        Ok(HttpResponseParts {
            status: 201,
            headers: BTreeMap::new(),
            body: serde_json::to_vec(&json!({ "id": name })).unwrap(),
        })
    }
}

#[tokio::test]
async fn next_window_waits_for_the_slowest_item() {
    let http = Arc::new(HeldHttp {
        held: "n4",
        release: Notify::new(),
        events: Mutex::new(Vec::new()),
    });
    let client = TwentyClient::new(http.clone(), credentials());

    let input: Vec<Map<String, Value>> = (0..7)
        .map(|i| json!({"name": format!("n{i}")}).as_object().cloned().unwrap())
        .collect();
    let run = client.bulk(BulkOperation::Create, "companies", input);

    let release = async {
        for _ in 0..50 {
            tokio::task::yield_now().await;
        }
        let started: Vec<String> = http
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.starts_with("start"))
            .cloned()
            .collect();
        assert_eq!(started, ["start n0", "start n1", "start n2", "start n3", "start n4"]);
        http.release.notify_one();
    };

    let (results, ()) = tokio::join!(run, release);
    assert_eq!(results.len(), 7);
    assert!(results.iter().all(|r| r.success));

    let events = http.events.lock().unwrap().clone();
    let pos = |e: &str| events.iter().position(|x| x == e).unwrap();
    assert!(pos("end n4") < pos("start n5"), "{events:?}");
}

#[tokio::test]
async fn update_strips_id_and_reports_missing_ids() {
    let http = MockHttp::with(|_| json(200, json!({"ok": true})));
    let (client, _) = client(http.clone());

    let input = items(json!([
        {"id": "a", "name": "A"},
        {"name": "no id"},
        {"id": "c", "name": "C"}
    ]));
    let results = client.bulk(BulkOperation::Update, "people", input).await;

    assert_eq!(results.len(), 3);
    assert!(results[0].success);
    assert!(!results[1].success);
    assert_eq!(results[1].item, Some(items(json!([{"name": "no id"}])).remove(0)));
    assert!(results[2].success);

    let reqs = http.requests();
    assert_eq!(reqs.len(), 2);
    assert_eq!(reqs[0].method, "PUT");
    assert_eq!(reqs[0].url.path(), "/rest/people/a");
    assert_eq!(body_of(&reqs[0]), json!({"name": "A"}));
    assert_eq!(reqs[1].url.path(), "/rest/people/c");
}

#[tokio::test]
async fn per_item_failures_do_not_stop_the_batch() {
    let http = MockHttp::with(|req| {
        if req.url.path().ends_with("/bad") {
            text(404, "Not Found")
        } else {
            text(200, "")
        }
    });
    let (client, _) = client(http.clone());

    let input = items(json!([{"id": "ok1"}, {"id": "bad"}, {"id": "ok2"}]));
    let results = client.bulk(BulkOperation::Delete, "notes", input).await;

    let flags: Vec<bool> = results.iter().map(|r| r.success).collect();
    assert_eq!(flags, vec![true, false, true]);
    assert_eq!(
        results[1].error.as_deref(),
        Some("Twenty CRM API error: HTTP 404: Not Found")
    );
    assert_eq!(results[1].item.as_ref().unwrap()["id"], "bad");
    assert!(http.requests().iter().all(|r| r.method == "DELETE"));
}

#[tokio::test]
async fn results_serialize_like_item_reports() {
    let http = MockHttp::with(|_| text(400, "invalid"));
    let (client, _) = client(http);

    let results = client
        .bulk(BulkOperation::Create, "tasks", items(json!([{"title": "t"}])))
        .await;
    let out = serde_json::to_value(&results).unwrap();
    assert_eq!(
        out,
        json!([{
            "success": false,
            "error": "Twenty CRM API error: HTTP 400: invalid",
            "item": {"title": "t"}
        }])
    );
}

#[test]
fn bulk_operation_names() {
    let op: BulkOperation = serde_json::from_str("\"update\"").unwrap();
    assert_eq!(op, BulkOperation::Update);
    assert_eq!(serde_json::to_string(&BulkOperation::Delete).unwrap(), "\"delete\"");
}
