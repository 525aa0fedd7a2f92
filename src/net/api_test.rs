use std::rc::Rc;

use futures::executor::block_on;

use super::*;
use crate::net::testing::{MockHttp, respond};
use crate::net::token_store::{MemoryStore, StoredSession};
use crate::net::types::User;

fn build_client(http: Rc<MockHttp>) -> ApiClient {
    let store = Rc::new(MemoryStore::new(StoredSession {
        access_token: Some("t1".to_owned()),
        refresh_token: Some("r1".to_owned()),
        user: Some(User {
            id: "1".to_owned(),
            email: "a@example.com".to_owned(),
            name: "A".to_owned(),
            profile_image: None,
        }),
    }));
    ApiClient::new("https://api.test", http, store, Box::new(|| {}))
}

#[test]
fn notice_query_translates_page_to_zero_based() {
    assert_eq!(
        notices_path("/api/notices", &NoticeQuery::page(1)),
        "/api/notices?page=0"
    );
    assert_eq!(
        notices_path("/api/notices", &NoticeQuery::page(3)),
        "/api/notices?page=2"
    );
    // A stray zero never underflows.
    assert_eq!(
        notices_path("/api/notices", &NoticeQuery::page(0)),
        "/api/notices?page=0"
    );
}

#[test]
fn notice_query_includes_only_set_filters() {
    let query = NoticeQuery {
        page: 2,
        category_id: Some(5),
        keyword: Some("장학".to_owned()),
        notice_type: Some("SCHOLARSHIP".to_owned()),
    };
    assert_eq!(
        notices_path("/api/notices/search", &query),
        "/api/notices/search?page=1&categoryId=5&keyword=장학&type=SCHOLARSHIP"
    );

    let empty_keyword = NoticeQuery {
        page: 1,
        keyword: Some(String::new()),
        ..NoticeQuery::default()
    };
    assert_eq!(
        notices_path("/api/notices", &empty_keyword),
        "/api/notices?page=0"
    );
}

#[test]
fn verify_maps_status_to_bool() {
    let ok_http = Rc::new(MockHttp::new(|_| respond(200, "{}")));
    let api = build_client(Rc::clone(&ok_http));
    assert!(block_on(verify(&api)).expect("verify"));
    assert!(ok_http.log.borrow()[0].url.ends_with("/api/auth/verify"));

    let forbidden_http = Rc::new(MockHttp::new(|_| respond(403, "{}")));
    let api = build_client(forbidden_http);
    assert!(!block_on(verify(&api)).expect("non-401 failures are a clean false"));
}

#[test]
fn fetch_notices_unwraps_envelope_and_transforms() {
    let http = Rc::new(MockHttp::new(|_| {
        respond(
            200,
            r#"{
                "data": {
                    "notices": [
                        {"id": 1, "title": "공지", "publishedDate": "2025-08-05", "isSaved": true}
                    ],
                    "totalCount": 12,
                    "currentPage": 0,
                    "totalPages": 2
                },
                "message": "",
                "success": true
            }"#,
        )
    }));
    let api = build_client(Rc::clone(&http));

    let (notices, page) =
        block_on(fetch_notices(&api, &NoticeQuery::page(1))).expect("fetch");

    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].id, "1");
    assert_eq!(notices[0].date, "2025.08.05");
    assert!(notices[0].is_bookmarked);
    assert_eq!(page.total_pages, 2);
    assert!(http.log.borrow()[0].url.ends_with("/api/notices?page=0"));
}

#[test]
fn fetch_envelope_rejects_error_statuses() {
    let http = Rc::new(MockHttp::new(|_| respond(500, "{}")));
    let api = build_client(http);

    let result = block_on(fetch_categories(&api));
    assert!(matches!(result, Err(ApiError::Status(500))));
}

#[test]
fn set_bookmark_uses_post_and_delete() {
    let http = Rc::new(MockHttp::new(|_| respond(200, "{}")));
    let api = build_client(Rc::clone(&http));

    block_on(set_bookmark(&api, "31", true)).expect("bookmark");
    block_on(set_bookmark(&api, "31", false)).expect("unbookmark");

    let log = http.log.borrow();
    assert_eq!(log[0].method, Method::Post);
    assert!(log[0].url.ends_with("/api/notices/31"));
    assert_eq!(log[1].method, Method::Delete);
    assert!(log[1].url.ends_with("/api/notices/31"));
}

#[test]
fn save_profile_posts_camel_case_fields() {
    let http = Rc::new(MockHttp::new(|_| respond(200, "{}")));
    let api = build_client(Rc::clone(&http));

    let profile = Profile {
        department: "컴퓨터융합학부".to_owned(),
        grade: "3학년".to_owned(),
        status: "재학".to_owned(),
        category_ids: vec![1, 4],
        keywords: vec!["장학".to_owned()],
    };
    block_on(save_profile(&api, &profile)).expect("save");

    let log = http.log.borrow();
    assert!(log[0].url.ends_with("/api/user/me/profile"));
    let body = log[0].body.as_ref().expect("profile body");
    assert_eq!(
        body.get("categoryIds").and_then(|v| v.as_array()).map(Vec::len),
        Some(2)
    );
    assert_eq!(body.get("department").and_then(|v| v.as_str()), Some("컴퓨터융합학부"));
}

#[test]
fn alarm_feeds_return_plain_notice_lists() {
    let http = Rc::new(MockHttp::new(|_| {
        respond(
            200,
            r#"{"data":[{"id":2,"title":"키워드 매칭","publishedDate":"2025-08-01"}],"success":true}"#,
        )
    }));
    let api = build_client(Rc::clone(&http));

    let keyword = block_on(fetch_keyword_alarms(&api)).expect("keyword alarms");
    assert_eq!(keyword.len(), 1);
    assert_eq!(keyword[0].date, "2025.08.01");

    let category = block_on(fetch_category_alarms(&api)).expect("category alarms");
    assert_eq!(category.len(), 1);

    let log = http.log.borrow();
    assert!(log[0].url.ends_with("/api/alarms/keywords"));
    assert!(log[1].url.ends_with("/api/alarms/categories"));
}

#[test]
fn register_calendar_sends_access_token_in_both_headers() {
    let http = Rc::new(MockHttp::new(|_| respond(200, "{}")));
    let api = build_client(Rc::clone(&http));

    block_on(register_calendar(&api, "31", "t1")).expect("calendar");

    let log = http.log.borrow();
    assert_eq!(log[0].method, Method::Post);
    assert!(log[0].url.ends_with("/api/calendar/31"));
    assert_eq!(log[0].header("Google-Access-Token"), Some("t1"));
    assert_eq!(log[0].header("Authorization"), Some("Bearer t1"));
}
