use std::cell::RefCell;
use std::rc::Rc;

use futures::executor::{LocalPool, block_on};
use futures::task::LocalSpawnExt;

use super::*;
use crate::net::testing::{MockHttp, respond};
use crate::net::token_store::{MemoryStore, StoredSession};
use crate::net::types::User;

fn test_user() -> User {
    User {
        id: "1".to_owned(),
        email: "a@example.com".to_owned(),
        name: "A".to_owned(),
        profile_image: None,
    }
}

fn seeded_store(access: &str, refresh: Option<&str>) -> Rc<MemoryStore> {
    Rc::new(MemoryStore::new(StoredSession {
        access_token: Some(access.to_owned()),
        refresh_token: refresh.map(ToOwned::to_owned),
        user: Some(test_user()),
    }))
}

fn build_client(
    http: Rc<MockHttp>,
    store: Rc<MemoryStore>,
    expired_count: Rc<RefCell<u32>>,
) -> Rc<ApiClient> {
    let hook = Box::new(move || *expired_count.borrow_mut() += 1);
    Rc::new(ApiClient::new("https://api.test", http, store, hook))
}

/// Responder modeling an expired "t1": data requests only succeed with "t2",
/// and the refresh endpoint hands out "t2".
fn expired_token_responder(req: &HttpRequest) -> Result<HttpResponse, HttpError> {
    if req.url.ends_with("/auth/refresh") {
        return respond(200, r#"{"accessToken":"t2"}"#);
    }
    match req.header("Authorization") {
        Some("Bearer t2") => respond(200, r#"{"data":null,"message":"","success":true}"#),
        _ => respond(401, "{}"),
    }
}

#[test]
fn success_passes_through_without_refresh() {
    let http = Rc::new(MockHttp::new(|_| respond(200, "{}")));
    let store = seeded_store("t1", Some("r1"));
    let expired = Rc::new(RefCell::new(0));
    let client = build_client(Rc::clone(&http), store, Rc::clone(&expired));

    let resp = block_on(client.request(client.to(Method::Get, "/api/notices")))
        .expect("request should succeed");

    assert_eq!(resp.status, 200);
    assert_eq!(http.calls_to("/auth/refresh"), 0);
    assert_eq!(*expired.borrow(), 0);
}

#[test]
fn attaches_bearer_token_from_store() {
    let http = Rc::new(MockHttp::new(|_| respond(200, "{}")));
    let store = seeded_store("t1", Some("r1"));
    let client = build_client(Rc::clone(&http), store, Rc::new(RefCell::new(0)));

    block_on(client.request(client.to(Method::Get, "/api/notices"))).expect("request");

    let log = http.log.borrow();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].header("Authorization"), Some("Bearer t1"));
}

#[test]
fn non_auth_errors_pass_through_without_refresh() {
    let http = Rc::new(MockHttp::new(|_| respond(404, "{}")));
    let store = seeded_store("t1", Some("r1"));
    let expired = Rc::new(RefCell::new(0));
    let client = build_client(Rc::clone(&http), Rc::clone(&store), Rc::clone(&expired));

    let resp = block_on(client.request(client.to(Method::Get, "/api/notices/9")))
        .expect("non-401 statuses are returned, not raised");

    assert_eq!(resp.status, 404);
    assert_eq!(http.calls_to("/auth/refresh"), 0);
    assert_eq!(*expired.borrow(), 0);
    assert_eq!(store.load().access_token.as_deref(), Some("t1"));
}

#[test]
fn expired_token_is_refreshed_and_request_retried_once() {
    let http = Rc::new(MockHttp::new(expired_token_responder));
    let store = seeded_store("t1", Some("r1"));
    let expired = Rc::new(RefCell::new(0));
    let client = build_client(Rc::clone(&http), Rc::clone(&store), Rc::clone(&expired));

    let resp = block_on(client.request(client.to(Method::Get, "/api/notices")))
        .expect("retry should succeed");

    assert_eq!(resp.status, 200);
    assert_eq!(http.calls_to("/auth/refresh"), 1);
    assert_eq!(store.load().access_token.as_deref(), Some("t2"));
    assert_eq!(*expired.borrow(), 0);

    let log = http.log.borrow();
    assert_eq!(log.len(), 3);
    assert_eq!(log[0].header("Authorization"), Some("Bearer t1"));
    assert!(log[1].url.ends_with("/auth/refresh"));
    assert_eq!(log[2].header("Authorization"), Some("Bearer t2"));
}

#[test]
fn refresh_request_carries_stored_refresh_token() {
    let http = Rc::new(MockHttp::new(expired_token_responder));
    let store = seeded_store("t1", Some("r1"));
    let client = build_client(Rc::clone(&http), store, Rc::new(RefCell::new(0)));

    block_on(client.request(client.to(Method::Get, "/api/notices"))).expect("request");

    let log = http.log.borrow();
    let refresh = log
        .iter()
        .find(|req| req.url.ends_with("/auth/refresh"))
        .expect("a refresh call was made");
    assert_eq!(refresh.method, Method::Post);
    assert_eq!(
        refresh.body.as_ref().and_then(|b| b.get("refreshToken")).and_then(|v| v.as_str()),
        Some("r1")
    );
}

#[test]
fn concurrent_401s_share_one_refresh() {
    let http = Rc::new(MockHttp::new(expired_token_responder));
    let store = seeded_store("t1", Some("r1"));
    let expired = Rc::new(RefCell::new(0));
    let client = build_client(Rc::clone(&http), Rc::clone(&store), Rc::clone(&expired));

    let statuses = Rc::new(RefCell::new(Vec::new()));
    let mut pool = LocalPool::new();
    let spawner = pool.spawner();
    for i in 0..3 {
        let client = Rc::clone(&client);
        let statuses = Rc::clone(&statuses);
        spawner
            .spawn_local(async move {
                let resp = client
                    .request(client.to(Method::Get, &format!("/api/data/{i}")))
                    .await
                    .expect("all callers succeed after the shared refresh");
                statuses.borrow_mut().push(resp.status);
            })
            .expect("spawn");
    }
    pool.run();

    assert_eq!(http.calls_to("/auth/refresh"), 1);
    assert_eq!(*statuses.borrow(), vec![200, 200, 200]);
    assert_eq!(store.load().access_token.as_deref(), Some("t2"));
    assert_eq!(*expired.borrow(), 0);
}

#[test]
fn queued_requests_replay_in_arrival_order_with_new_token() {
    let http = Rc::new(MockHttp::new(expired_token_responder));
    let store = seeded_store("t1", Some("r1"));
    let client = build_client(Rc::clone(&http), store, Rc::new(RefCell::new(0)));

    let mut pool = LocalPool::new();
    let spawner = pool.spawner();
    for i in 0..3 {
        let client = Rc::clone(&client);
        spawner
            .spawn_local(async move {
                client
                    .request(client.to(Method::Get, &format!("/api/data/{i}")))
                    .await
                    .expect("request");
            })
            .expect("spawn");
    }
    pool.run();

    let log = http.log.borrow();
    let retries: Vec<&HttpRequest> = log
        .iter()
        .filter(|req| req.header("Authorization") == Some("Bearer t2"))
        .collect();
    assert_eq!(retries.len(), 3);
    for (i, req) in retries.iter().enumerate() {
        assert!(req.url.ends_with(&format!("/api/data/{i}")));
    }
}

#[test]
fn failed_refresh_rejects_every_caller_and_expires_once() {
    // The refresh endpoint rejects the refresh token like everything else.
    let http = Rc::new(MockHttp::new(|_| respond(401, "{}")));
    let store = seeded_store("t1", Some("r1"));
    let expired = Rc::new(RefCell::new(0));
    let client = build_client(Rc::clone(&http), Rc::clone(&store), Rc::clone(&expired));

    let failures = Rc::new(RefCell::new(0));
    let mut pool = LocalPool::new();
    let spawner = pool.spawner();
    for i in 0..3 {
        let client = Rc::clone(&client);
        let failures = Rc::clone(&failures);
        spawner
            .spawn_local(async move {
                let result = client
                    .request(client.to(Method::Get, &format!("/api/data/{i}")))
                    .await;
                assert!(matches!(result, Err(ApiError::SessionExpired)));
                *failures.borrow_mut() += 1;
            })
            .expect("spawn");
    }
    pool.run();

    assert_eq!(*failures.borrow(), 3);
    assert_eq!(http.calls_to("/auth/refresh"), 1);
    assert_eq!(store.load(), StoredSession::default());
    assert_eq!(*expired.borrow(), 1);
}

#[test]
fn missing_refresh_token_fails_fast() {
    let http = Rc::new(MockHttp::new(|_| respond(401, "{}")));
    let store = seeded_store("t1", None);
    let expired = Rc::new(RefCell::new(0));
    let client = build_client(Rc::clone(&http), Rc::clone(&store), Rc::clone(&expired));

    let result = block_on(client.request(client.to(Method::Get, "/api/notices")));

    assert!(matches!(result, Err(ApiError::SessionExpired)));
    assert_eq!(http.calls_to("/auth/refresh"), 0);
    assert_eq!(*expired.borrow(), 1);
    assert_eq!(store.load(), StoredSession::default());
}

#[test]
fn refresh_recovers_after_a_failed_cycle() {
    // First refresh attempt fails, a later login seeds a working session.
    let http = Rc::new(MockHttp::new(|req: &HttpRequest| {
        if req.url.ends_with("/auth/refresh") {
            let token = req.body.as_ref().and_then(|b| b.get("refreshToken")).and_then(|v| v.as_str());
            if token == Some("r2") {
                return respond(200, r#"{"accessToken":"t3"}"#);
            }
            return respond(401, "{}");
        }
        match req.header("Authorization") {
            Some("Bearer t3") => respond(200, "{}"),
            _ => respond(401, "{}"),
        }
    }));
    let store = seeded_store("t1", Some("r1"));
    let expired = Rc::new(RefCell::new(0));
    let client = build_client(Rc::clone(&http), Rc::clone(&store), Rc::clone(&expired));

    let first = block_on(client.request(client.to(Method::Get, "/api/notices")));
    assert!(matches!(first, Err(ApiError::SessionExpired)));
    assert_eq!(*expired.borrow(), 1);

    // Fresh login; the guard must have reset its in-flight flag.
    store.save("t2", Some("r2"), &test_user());
    let second = block_on(client.request(client.to(Method::Get, "/api/notices")))
        .expect("second cycle should refresh and succeed");
    assert_eq!(second.status, 200);
    assert_eq!(store.load().access_token.as_deref(), Some("t3"));
    assert_eq!(*expired.borrow(), 1);
}

#[test]
fn unauthenticated_request_sends_no_bearer_and_never_refreshes() {
    let http = Rc::new(MockHttp::new(|_| respond(401, "{}")));
    let store = seeded_store("t1", Some("r1"));
    let expired = Rc::new(RefCell::new(0));
    let client = build_client(Rc::clone(&http), store, Rc::clone(&expired));

    let resp = block_on(
        client.request_unauthenticated(client.to(Method::Post, "/api/auth/google/callback")),
    )
    .expect("status passes through");

    assert_eq!(resp.status, 401);
    assert_eq!(http.calls_to("/auth/refresh"), 0);
    assert_eq!(*expired.borrow(), 0);
    assert_eq!(http.log.borrow()[0].header("Authorization"), None);
}

#[test]
fn extract_refreshed_token_prefers_access_token_field() {
    let value = serde_json::json!({
        "accessToken": "a", "token": "b", "jwt": "c"
    });
    assert_eq!(extract_refreshed_token(&value).as_deref(), Some("a"));
}

#[test]
fn extract_refreshed_token_falls_back_through_fields_and_envelope() {
    let token_only = serde_json::json!({ "token": "b", "jwt": "c" });
    assert_eq!(extract_refreshed_token(&token_only).as_deref(), Some("b"));

    let jwt_only = serde_json::json!({ "jwt": "c" });
    assert_eq!(extract_refreshed_token(&jwt_only).as_deref(), Some("c"));

    let enveloped = serde_json::json!({ "data": { "accessToken": "d" } });
    assert_eq!(extract_refreshed_token(&enveloped).as_deref(), Some("d"));
}

#[test]
fn extract_refreshed_token_rejects_empty_and_missing() {
    assert_eq!(extract_refreshed_token(&serde_json::json!({ "accessToken": "" })), None);
    assert_eq!(extract_refreshed_token(&serde_json::json!({})), None);
    assert_eq!(extract_refreshed_token(&serde_json::json!({ "accessToken": 42 })), None);
}
