mod common;

use serde_json::{json, Map, Value};

use common::{body_of, client, json, query_of, text, MockHttp};

fn types(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn search_tags_records_with_object_type() {
    let http = MockHttp::with(|req| match req.url.path() {
        "/rest/people" => json(200, json!({"data": {"people": [{"id": "p1"}, {"id": "p2"}]}})),
        "/rest/companies" => json(200, json!({"data": [{"id": "c1"}]})),
        other => panic!("unexpected path {other}"),
    });
    let (client, _) = client(http.clone());

    let hits = client
        .search("acme", &types(&["people", "companies"]), 7)
        .await;
    assert_eq!(
        hits,
        vec![
            json!({"id": "p1", "_objectType": "people"}),
            json!({"id": "p2", "_objectType": "people"}),
            json!({"id": "c1", "_objectType": "companies"}),
        ]
    );

    for req in http.requests() {
        let q = query_of(&req);
        assert_eq!(q.get("search").map(String::as_str), Some("acme"));
        assert_eq!(q.get("limit").map(String::as_str), Some("7"));
    }
}

#[tokio::test]
async fn search_isolates_failing_object_types() {
    let http = MockHttp::with(|req| match req.url.path() {
        "/rest/people" => text(400, "bad search"),
        _ => json(200, json!({"data": [{"id": "o1"}]})),
    });
    let (client, _) = client(http.clone());

    let hits = client
        .search("x", &types(&["people", "opportunities"]), 20)
        .await;
    assert_eq!(hits, vec![json!({"id": "o1", "_objectType": "opportunities"})]);
    assert_eq!(http.requests().len(), 2);
}

#[tokio::test]
async fn search_with_no_types_is_empty() {
    let http = MockHttp::queue(vec![]);
    let (client, _) = client(http.clone());
    assert!(client.search("x", &[], 20).await.is_empty());
    assert!(http.requests().is_empty());
}

#[tokio::test]
async fn lookup_uses_filter_first() {
    let page = json!({"data": [{"id": "c1", "domain": "acme.com"}]});
    let http = MockHttp::queue(vec![json(200, page)]);
    let (client, _) = client(http.clone());

    let found = client
        .find_record_by_field("companies", "domain", "acme.com")
        .await;
    assert_eq!(found, Some(json!({"id": "c1", "domain": "acme.com"})));

    let reqs = http.requests();
    let req = &reqs[0];
    let q = query_of(req);
    assert_eq!(
        q.get("filter").map(String::as_str),
        Some(r#"{"domain":{"eq":"acme.com"}}"#)
    );
    assert_eq!(q.get("limit").map(String::as_str), Some("1"));
}

#[tokio::test]
async fn lookup_falls_back_to_case_insensitive_search() {
    let http = MockHttp::with(|req| {
        if query_of(req).contains_key("filter") {
            text(400, "unsupported filter")
        } else {
            json(
                200,
                json!({"data": [
                    {"id": "p1", "email": "someone@else.com"},
                    {"id": "p2", "email": "Ada@Example.com"}
                ]}),
            )
        }
    });
    let (client, _) = client(http.clone());

    let found = client
        .find_record_by_field("people", "email", "ada@example.com")
        .await;
    assert_eq!(found.unwrap()["id"], "p2");

    let reqs = http.requests();
    assert_eq!(reqs.len(), 2);
    let q = query_of(&reqs[1]);
    assert_eq!(q.get("search").map(String::as_str), Some("ada@example.com"));
    assert_eq!(q.get("limit").map(String::as_str), Some("10"));
}

#[tokio::test]
async fn lookup_returns_none_when_everything_fails() {
    let http = MockHttp::with(|_| text(403, "forbidden"));
    let (client, _) = client(http.clone());

    assert!(client
        .find_record_by_field("people", "email", "a@b.c")
        .await
        .is_none());
    assert_eq!(http.requests().len(), 2);
}

#[tokio::test]
async fn lookup_with_empty_filter_result_is_none() {
    let http = MockHttp::queue(vec![json(200, json!({"data": []}))]);
    let (client, _) = client(http.clone());

    assert!(client
        .find_record_by_field("people", "email", "a@b.c")
        .await
        .is_none());
    assert_eq!(http.requests().len(), 1);
}

#[tokio::test]
async fn upsert_updates_existing_record() {
    let http = MockHttp::with(|req| match req.method.as_str() {
        "GET" => json(200, json!({"data": [{"id": "c9", "domain": "acme.com"}]})),
        "PUT" => json(200, json!({"data": {"updateCompany": {"id": "c9", "name": "Acme"}}})),
        other => panic!("unexpected method {other}"),
    });
    let (client, _) = client(http.clone());

    let body: Map<String, Value> = json!({"name": "Acme"}).as_object().cloned().unwrap();
    let out = client
        .upsert("companies", "domain", "acme.com", &body)
        .await
        .unwrap();
    assert_eq!(out, json!({"id": "c9", "name": "Acme", "_upsertAction": "updated"}));

    let reqs = http.requests();
    assert_eq!(reqs[1].url.path(), "/rest/companies/c9");
    assert_eq!(body_of(&reqs[1]), json!({"name": "Acme"}));
}

#[tokio::test]
async fn upsert_creates_when_missing() {
    let http = MockHttp::with(|req| match req.method.as_str() {
        "GET" => json(200, json!({"data": []})),
        "POST" => json(201, json!({"id": "new"})),
        other => panic!("unexpected method {other}"),
    });
    let (client, _) = client(http.clone());

    let body: Map<String, Value> = json!({"name": "Acme"}).as_object().cloned().unwrap();
    let out = client
        .upsert("companies", "domain", "acme.com", &body)
        .await
        .unwrap();
    assert_eq!(out, json!({"id": "new", "_upsertAction": "created"}));
    assert_eq!(http.requests()[1].method, "POST");
}
