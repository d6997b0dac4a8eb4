use mockito::{Matcher, Server, ServerGuard};
use ruobr::{Config, Ruobr, RuobrError};
use serde_json::json;

fn diary_for(server: &ServerGuard) -> Ruobr {
    let config = Config::new("http".to_string(), server.host_with_port());
    Ruobr::with_config("ivanov", "secret", config)
}

fn student_user_body() -> String {
    json!({
        "success": true,
        "status": "child",
        "id": 9999999,
        "first_name": "Михаил",
        "last_name": "Зубенко",
        "middle_name": "Петрович",
        "school": "МБОУ \"СОШ №69\"",
        "school_is_tourniquet": false,
        "readonly": false,
        "school_is_food": true,
        "group": "11А",
        "gps_tracker": false
    })
    .to_string()
}

#[tokio::test]
async fn test_get_user_authenticates_exactly_once() {
    let mut server = Server::new_async().await;
    let user_mock = server
        .mock("GET", "/api/user/")
        .with_body(student_user_body())
        .expect(1)
        .create_async()
        .await;

    let mut diary = diary_for(&server);
    let first = diary.get_user().await.unwrap();
    let second = diary.get_user().await.unwrap();

    assert_eq!(first, second);
    user_mock.assert_async().await;
}

#[tokio::test]
async fn test_auth_error_rejects_future() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/user/")
        .with_body(json!({"success": false, "error_type": "auth"}).to_string())
        .create_async()
        .await;

    let mut diary = diary_for(&server);
    assert!(matches!(
        diary.get_user().await,
        Err(RuobrError::Authentication)
    ));
}

#[tokio::test]
async fn test_empty_account_skips_child_endpoints() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/user/")
        .with_body(
            json!({
                "success": true,
                "status": "applicant",
                "gps_tracker": false,
                "childs": []
            })
            .to_string(),
        )
        .create_async()
        .await;
    let timetable_mock = server
        .mock("GET", "/api/timetable/")
        .expect(0)
        .create_async()
        .await;

    let mut diary = diary_for(&server);
    assert!(matches!(
        diary.get_timetable("2020-04-20", "2020-04-27").await,
        Err(RuobrError::NoChildren)
    ));
    timetable_mock.assert_async().await;
}

#[tokio::test]
async fn test_concurrent_read_message_fan_out() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/user/")
        .with_body(student_user_body())
        .expect(1)
        .create_async()
        .await;

    let ids: Vec<i64> = vec![101, 102, 103];
    let mut message_mocks = Vec::new();
    for id in &ids {
        let mock = server
            .mock("GET", "/api/mail/read/")
            .match_query(Matcher::UrlEncoded("message".into(), id.to_string()))
            .with_body(json!({"success": true}).to_string())
            .expect(1)
            .create_async()
            .await;
        message_mocks.push(mock);
    }

    // authenticate once, then fan out over clones sharing the cached session
    let mut diary = diary_for(&server);
    diary.get_user().await.unwrap();

    let mut a = diary.clone();
    let mut b = diary.clone();
    let mut c = diary.clone();
    let (ra, rb, rc) = tokio::join!(
        a.read_message(ids[0]),
        b.read_message(ids[1]),
        c.read_message(ids[2])
    );
    ra.unwrap();
    rb.unwrap();
    rc.unwrap();

    for mock in &message_mocks {
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn test_async_mail_matches_blocking_shape() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/user/")
        .with_body(student_user_body())
        .create_async()
        .await;
    server
        .mock("GET", "/api/mail/")
        .with_body(
            json!({"messages": [{
                "id": 7777777,
                "post_date": "2020-04-26 22:36:11",
                "author": "Author",
                "read": true,
                "text": "text",
                "clean_text": "clean_text",
                "subject": "TITLE"
            }]})
            .to_string(),
        )
        .create_async()
        .await;

    let mut diary = diary_for(&server);
    let mail = diary.get_mail().await.unwrap();
    assert_eq!(mail.len(), 1);
    assert_eq!(mail[0].author, "Author");
    assert_eq!(mail[0].post_date.to_string(), "2020-04-26 22:36:11");
}

#[tokio::test]
async fn test_refresh_replaces_child_list() {
    let mut server = Server::new_async().await;
    let user_mock = server
        .mock("GET", "/api/user/")
        .with_body(student_user_body())
        .expect(2)
        .create_async()
        .await;

    let mut diary = diary_for(&server);
    diary.get_user().await.unwrap();
    let refreshed = diary.refresh().await.unwrap();
    assert_eq!(refreshed.id, 9999999);
    user_mock.assert_async().await;
}
