mod common;

use account_service::auth::models::reset_namespace;
use account_service::auth::models::session_namespace;
use auth::IssueOptions;
use chrono::Duration;
use chrono::Utc;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

#[tokio::test]
async fn test_health() {
    let app = TestApp::spawn().await;

    let response = app.get("/health").send().await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"], "ok");
}

#[tokio::test]
async fn test_register_login_me_flow() {
    let app = TestApp::spawn().await;

    let registered = app.register("Ada", "a@b.com", "pw123456").await;
    assert_eq!(registered["user"]["email"], "a@b.com");
    assert!(registered["user"].get("password").is_none());
    assert!(registered["user"].get("passwordHash").is_none());
    assert!(registered["accessToken"].is_string());

    let response = app
        .post("/auth/login")
        .json(&json!({ "email": "a@b.com", "password": "pw123456" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status_code"], 200);
    let token = body["data"]["accessToken"].as_str().unwrap().to_string();

    let claims = app.jwt_handler.verify(&token, &session_namespace()).unwrap();
    assert_eq!(claims.extra["name"], "Ada");
    assert_eq!(claims.extra["email"], "a@b.com");
    assert_eq!(claims.extra["id"], registered["user"]["id"]);

    let response = app
        .post_authenticated("/auth/me", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["data"],
        json!({
            "user": {
                "id": registered["user"]["id"],
                "email": "a@b.com",
                "name": "Ada"
            }
        })
    );
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;

    app.register("Ada", "a@b.com", "pw123456").await;

    let response = app
        .post("/auth/register")
        .json(&json!({ "name": "Other", "email": "a@b.com", "password": "pw654321" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = response.json().await.unwrap();
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));
}

#[tokio::test]
async fn test_register_validation() {
    let app = TestApp::spawn().await;

    for body in [
        json!({ "name": "Ada", "email": "not-an-email", "password": "pw123456" }),
        json!({ "name": "   ", "email": "a@b.com", "password": "pw123456" }),
        json!({ "name": "Ada", "email": "a@b.com", "password": "123" }),
        json!({ "name": "Ada", "email": "a@b.com", "password": "pw123456", "role": 9 }),
    ] {
        let response = app.post("/auth/register").json(&body).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", body);
    }
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;

    app.register("Ada", "a@b.com", "pw123456").await;

    let wrong_password = app
        .post("/auth/login")
        .json(&json!({ "email": "a@b.com", "password": "nope-nope" }))
        .send()
        .await
        .unwrap();
    let unknown_email = app
        .post("/auth/login")
        .json(&json!({ "email": "ghost@b.com", "password": "pw123456" }))
        .send()
        .await
        .unwrap();

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    let wrong_password: Value = wrong_password.json().await.unwrap();
    let unknown_email: Value = unknown_email.json().await.unwrap();
    assert_eq!(wrong_password, unknown_email);
    assert_eq!(
        wrong_password["data"]["message"],
        "Incorrect email and/or password."
    );
}

#[tokio::test]
async fn test_me_denied_without_valid_session() {
    let app = TestApp::spawn().await;

    let (id, _) = app.register_and_token("Ada", "a@b.com").await;

    let missing = app.post("/auth/me").send().await.unwrap();
    assert_eq!(missing.status(), StatusCode::FORBIDDEN);

    let garbage = app
        .post_authenticated("/auth/me", "garbage")
        .send()
        .await
        .unwrap();
    assert_eq!(garbage.status(), StatusCode::FORBIDDEN);

    // A reset token is not a session token
    let reset_token = app
        .jwt_handler
        .issue(
            &json!({ "id": id }),
            &IssueOptions::new(id, reset_namespace(), Duration::minutes(30)),
        )
        .unwrap();
    let response = app
        .post_authenticated("/auth/me", &reset_token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Expired session token
    let expired = app
        .jwt_handler
        .issue_at(
            &json!({ "id": id }),
            &IssueOptions::new(id, session_namespace(), Duration::days(7)),
            Utc::now().timestamp() - Duration::days(8).num_seconds(),
        )
        .unwrap();
    let response = app
        .post_authenticated("/auth/me", &expired)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status_code"], 403);
    assert_eq!(body["data"]["message"], "Forbidden resource");
}

#[tokio::test]
async fn test_me_denied_for_unknown_subject() {
    let app = TestApp::spawn().await;

    let token = app
        .jwt_handler
        .issue(
            &json!({ "id": 4242 }),
            &IssueOptions::new(4242, session_namespace(), Duration::days(7)),
        )
        .unwrap();

    let response = app.post_authenticated("/auth/me", &token).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_forget_unknown_email_sends_nothing() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/auth/forget")
        .json(&json!({ "email": "unknown@x.com" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(app.mailer.sent().is_empty());
}

#[tokio::test]
async fn test_forget_reset_login_flow() {
    let app = TestApp::spawn().await;

    app.register("Ada", "a@b.com", "pw123456").await;

    let response = app
        .post("/auth/forget")
        .json(&json!({ "email": "a@b.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"], true);

    let sent = app.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "a@b.com");
    assert_eq!(sent[0].template, "forget");
    assert_eq!(sent[0].subject, "Password recovery");
    assert_eq!(sent[0].context["name"], "Ada");

    let reset_token = app.mailer.last_token().unwrap();

    // The emailed token does not open guarded routes
    let response = app
        .post_authenticated("/auth/me", &reset_token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .post("/auth/reset")
        .json(&json!({ "password": "newsecret", "token": reset_token }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    let session = body["data"]["accessToken"].as_str().unwrap();
    assert!(app.jwt_handler.verify(session, &session_namespace()).is_ok());

    let old = app
        .post("/auth/login")
        .json(&json!({ "email": "a@b.com", "password": "pw123456" }))
        .send()
        .await
        .unwrap();
    assert_eq!(old.status(), StatusCode::UNAUTHORIZED);

    let new = app
        .post("/auth/login")
        .json(&json!({ "email": "a@b.com", "password": "newsecret" }))
        .send()
        .await
        .unwrap();
    assert_eq!(new.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_reset_rejections() {
    let app = TestApp::spawn().await;

    let (id, session) = app.register_and_token("Ada", "a@b.com").await;

    let non_numeric = app
        .jwt_handler
        .issue(
            &json!({ "id": "abc" }),
            &IssueOptions::new("abc", reset_namespace(), Duration::minutes(30)),
        )
        .unwrap();
    let expired = app
        .jwt_handler
        .issue_at(
            &json!({ "id": id }),
            &IssueOptions::new(id, reset_namespace(), Duration::minutes(30)),
            Utc::now().timestamp() - Duration::minutes(31).num_seconds(),
        )
        .unwrap();

    for token in [session.as_str(), non_numeric.as_str(), expired.as_str(), "garbage"] {
        let response = app
            .post("/auth/reset")
            .json(&json!({ "password": "newsecret", "token": token }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["data"]["message"], "Invalid token.");
    }

    // Password unchanged
    let response = app
        .post("/auth/login")
        .json(&json!({ "email": "a@b.com", "password": "pw123456" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
