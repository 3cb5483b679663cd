//! HTTP 수준 테스트
//!
//! 인메모리 SQLite와 `oneshot`으로 라우터 전체를 검증합니다.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use serde_json::{json, Value};
use tower::ServiceExt;

use nd_core::auth::{hash_password, TokenClaims, TokenService, TokenType};
use nd_core::model::{Article, ArticleInput, NewUser, User};

use crate::config::Config;
use crate::create_router;
use crate::db::NewsDb;
use crate::state::AppState;

struct TestApp {
    router: Router,
    state: Arc<AppState>,
}

impl TestApp {
    async fn new() -> Self {
        let db = NewsDb::in_memory().await.unwrap();
        let tokens = TokenService::random(300, 86400);
        let state = Arc::new(AppState::from_parts(Config::default(), tokens, db));
        Self {
            router: create_router(state.clone()),
            state,
        }
    }

    async fn user(&self, payload: Value) -> User {
        let payload: NewUser = serde_json::from_value(payload).unwrap();
        let hash = hash_password(&payload.password);
        let user = payload.into_user(hash, Utc::now());
        self.state.db.insert_user(&user).await.unwrap();
        user
    }

    async fn employee(&self, name: &str, is_admin: bool) -> User {
        self.user(json!({
            "email": format!("{}@test.com", name),
            "password": format!("{}_password", name),
            "name": name,
            "user_profile": "EMP",
            "employee_id": format!("EMP-{}", name),
            "is_admin": is_admin
        }))
        .await
    }

    async fn client(&self, name: &str, columns: &[&str]) -> User {
        self.user(json!({
            "email": format!("{}@test.com", name),
            "password": format!("{}_password", name),
            "name": name,
            "user_profile": "CLI",
            "plan": "INFO",
            "accessible_columns": columns
        }))
        .await
    }

    async fn article(&self, author: &User, body: Value) -> Article {
        let input: ArticleInput = serde_json::from_value(body).unwrap();
        let article = input.into_article(author.id.clone(), Utc::now());
        self.state.db.insert_article(&article).await.unwrap();
        article
    }

    fn token(&self, user: &User) -> String {
        self.state.tokens.issue(user, TokenType::Access).unwrap()
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, token, None).await
    }

    async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, token, Some(body)).await
    }
}

fn ids(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_str().unwrap().to_string())
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Health / request id
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;
    let (status, body) = app.get("/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_request_id_header_and_error_body() {
    let app = TestApp::new().await;
    let request = Request::builder()
        .uri("/news/missing")
        .header("x-request-id", "req-123")
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers()["x-request-id"], "req-123");

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    assert_eq!(body["error"]["requestId"], "req-123");
}

// ─────────────────────────────────────────────────────────────────────────────
// Auth
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_obtain_and_refresh_token() {
    let app = TestApp::new().await;
    app.employee("alice", false).await;

    let (status, body) = app
        .post(
            "/users/token",
            None,
            json!({"email": "Alice@Test.com", "password": "alice_password"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let access = body["access"].as_str().unwrap().to_string();
    let refresh = body["refresh"].as_str().unwrap().to_string();

    let (status, _) = app.get("/news", Some(&access)).await;
    assert_eq!(status, StatusCode::OK);

    // Refresh Token은 Access Token 자리에 쓸 수 없음
    let (status, _) = app.get("/news", Some(&refresh)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .post("/users/token/refresh", None, json!({"refresh": refresh}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["access"].as_str().unwrap().starts_with("v4.local."));

    let (status, _) = app
        .post("/users/token/refresh", None, json!({"refresh": access}))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_bad_credentials() {
    let app = TestApp::new().await;
    app.employee("alice", false).await;

    let (status, body) = app
        .post(
            "/users/token",
            None,
            json!({"email": "alice@test.com", "password": "wrong"}),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "INVALID_CREDENTIALS");

    let (status, _) = app
        .post(
            "/users/token",
            None,
            json!({"email": "nobody@test.com", "password": "x"}),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invalid_bearer_token() {
    let app = TestApp::new().await;
    let (status, _) = app.get("/news", Some("not-a-token")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let other = TokenService::random(300, 86400);
    let alice = app.employee("alice", false).await;
    let foreign = other.issue(&alice, TokenType::Access).unwrap();
    let (status, body) = app.get("/news", Some(&foreign)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "INVALID_TOKEN");
}

#[tokio::test]
async fn test_expired_bearer_token() {
    let app = TestApp::new().await;
    let alice = app.employee("alice", false).await;
    let claims = TokenClaims::new(&alice.id, alice.profile, TokenType::Access, -60);
    let expired = app.state.tokens.encrypt(&claims).unwrap();

    let (status, body) = app.get("/news", Some(&expired)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "TOKEN_EXPIRED");
}

// ─────────────────────────────────────────────────────────────────────────────
// News
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_employee_authorship_scenario() {
    let app = TestApp::new().await;
    let alice = app.employee("alice", false).await;
    let bob = app.employee("bob", false).await;
    let carol = app.employee("carol", true).await;

    let (status, body) = app
        .post(
            "/news",
            Some(&app.token(&alice)),
            json!({
                "title": "X",
                "status": "DRAF",
                "column": "POW",
                "author": "someone-else"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["author"], alice.id.as_str());
    let id = body["id"].as_str().unwrap().to_string();
    let uri = format!("/news/{}", id);

    let (status, _) = app.get(&uri, Some(&app.token(&bob))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.get(&uri, Some(&app.token(&carol))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "X");

    let (status, body) = app.get(&uri, Some(&app.token(&alice))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["draft_content"], "");
}

#[tokio::test]
async fn test_employee_cannot_touch_others_articles() {
    let app = TestApp::new().await;
    let alice = app.employee("alice", false).await;
    let bob = app.employee("bob", false).await;
    let x = app
        .article(&alice, json!({"title": "X", "status": "PUBD", "column": "TAX"}))
        .await;
    let uri = format!("/news/{}", x.id);
    let bob_token = app.token(&bob);

    let (status, _) = app
        .send(Method::PATCH, &uri, Some(&bob_token), Some(json!({"title": "Y"})))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(
            Method::PUT,
            &uri,
            Some(&bob_token),
            Some(json!({"title": "Y", "status": "PUBD"})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.send(Method::DELETE, &uri, Some(&bob_token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // 존재하지 않는 기사와 구분되지 않음
    let (status, _) = app
        .send(Method::DELETE, "/news/does-not-exist", Some(&bob_token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // 목록에서는 발행된 남의 기사가 보임
    let (status, body) = app.get("/news", Some(&bob_token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![x.id.to_string()]);
}

#[tokio::test]
async fn test_author_and_admin_mutations() {
    let app = TestApp::new().await;
    let alice = app.employee("alice", false).await;
    let carol = app.employee("carol", true).await;
    let x = app
        .article(&alice, json!({"title": "X", "status": "DRAF"}))
        .await;
    let uri = format!("/news/{}", x.id);

    let (status, body) = app
        .send(
            Method::PATCH,
            &uri,
            Some(&app.token(&alice)),
            Some(json!({"status": "PUBD", "column": "EN"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "PUBD");
    assert_eq!(body["column"], "EN");
    assert_eq!(body["title"], "X");
    assert_eq!(body["author"], alice.id.as_str());

    let (status, body) = app
        .send(
            Method::PUT,
            &uri,
            Some(&app.token(&carol)),
            Some(json!({"title": "Rewritten", "status": "PUBD"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Rewritten");
    assert_eq!(body["column"], Value::Null);
    assert_eq!(body["author"], alice.id.as_str());

    let (status, _) = app
        .send(Method::DELETE, &uri, Some(&app.token(&carol)), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.get(&uri, Some(&app.token(&carol))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_client_column_scenario() {
    let app = TestApp::new().await;
    let alice = app.employee("alice", false).await;
    let dana = app.client("dana", &["POW"]).await;
    let token = app.token(&dana);

    let power = app
        .article(
            &alice,
            json!({"title": "P", "status": "PUBD", "column": "POW", "draft_content": "secret"}),
        )
        .await;
    let taxes = app
        .article(&alice, json!({"title": "T", "status": "PUBD", "column": "TAX"}))
        .await;
    let draft = app
        .article(&alice, json!({"title": "D", "status": "DRAF", "column": "POW"}))
        .await;

    let (status, body) = app.get(&format!("/news/{}", power.id), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("draft_content").is_none());

    let (status, _) = app.get(&format!("/news/{}", taxes.id), Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.get(&format!("/news/{}", draft.id), Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.get("/news", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![power.id.to_string()]);
    assert_eq!(body["meta"]["count"], 1);
}

#[tokio::test]
async fn test_client_unset_column_scenario() {
    let app = TestApp::new().await;
    let alice = app.employee("alice", false).await;
    let erin = app.client("erin", &[]).await;

    let unset = app
        .article(&alice, json!({"title": "U", "status": "PUBD", "column": ""}))
        .await;
    app.article(&alice, json!({"title": "L", "status": "PUBD", "column": "LAB"}))
        .await;

    let token = app.token(&erin);
    let (status, _) = app.get(&format!("/news/{}", unset.id), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.get("/news", Some(&token)).await;
    assert_eq!(ids(&body), vec![unset.id.to_string()]);
}

#[tokio::test]
async fn test_client_is_read_only() {
    let app = TestApp::new().await;
    let alice = app.employee("alice", false).await;
    let dana = app.client("dana", &["POW"]).await;
    let token = app.token(&dana);

    let (status, _) = app
        .post("/news", Some(&token), json!({"title": "Mine", "status": "PUBD"}))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let visible = app
        .article(&alice, json!({"title": "P", "status": "PUBD", "column": "POW"}))
        .await;
    let (status, _) = app
        .send(
            Method::PATCH,
            &format!("/news/{}", visible.id),
            Some(&token),
            Some(json!({"title": "Hacked"})),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let hidden = app
        .article(&alice, json!({"title": "D", "status": "DRAF", "column": "POW"}))
        .await;
    let (status, _) = app
        .send(Method::DELETE, &format!("/news/{}", hidden.id), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unauthenticated_access() {
    let app = TestApp::new().await;
    let alice = app.employee("alice", false).await;
    let x = app
        .article(&alice, json!({"title": "X", "status": "PUBD"}))
        .await;

    let (status, body) = app.get("/news", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["meta"]["count"], 0);

    let (status, _) = app.get(&format!("/news/{}", x.id), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .post("/news", None, json!({"title": "Anon", "status": "PUBD"}))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_params() {
    let app = TestApp::new().await;
    let carol = app.employee("carol", true).await;
    for (title, status, column) in [
        ("b", "PUBD", "POW"),
        ("a", "DRAF", "POW"),
        ("c", "PUBD", "TAX"),
    ] {
        app.article(&carol, json!({"title": title, "status": status, "column": column}))
            .await;
    }
    let token = app.token(&carol);

    let (_, body) = app.get("/news?ordering=title", Some(&token)).await;
    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["a", "b", "c"]);

    let (_, body) = app
        .get("/news?ordering=title&limit=1&offset=1", Some(&token))
        .await;
    assert_eq!(body["data"][0]["title"], "b");
    assert_eq!(body["meta"]["count"], 3);

    let (_, body) = app
        .get("/news?status=PUBD&column=POW", Some(&token))
        .await;
    assert_eq!(body["meta"]["count"], 1);
    assert_eq!(body["data"][0]["title"], "b");

    let (status, _) = app.get("/news?ordering=author", Some(&token)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.get("/news?limit=abc", Some(&token)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_validation() {
    let app = TestApp::new().await;
    let alice = app.employee("alice", false).await;
    let token = app.token(&alice);

    let (status, body) = app
        .post("/news", Some(&token), json!({"title": "", "status": "PUBD"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (status, _) = app
        .post("/news", Some(&token), json!({"title": "T", "status": "LIVE"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ─────────────────────────────────────────────────────────────────────────────
// Users
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_self_register() {
    let app = TestApp::new().await;
    let (status, body) = app
        .post(
            "/users/self_register",
            None,
            json!({
                "email": "newclient@test.com",
                "password": "client_password",
                "name": "New Client",
                "user_profile": "CLI",
                "plan": "INFO",
                "accessible_columns": ["POW"]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user_profile"], "CLI");
    assert_eq!(body["accessible_columns"], json!([]));
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());

    let (status, body) = app
        .post(
            "/users/token",
            None,
            json!({"email": "newclient@test.com", "password": "client_password"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["access"].is_string());
    assert!(body["refresh"].is_string());

    // 같은 이메일로 다시 가입
    let (status, _) = app
        .post(
            "/users/self_register",
            None,
            json!({
                "email": "NEWCLIENT@test.com",
                "password": "x",
                "name": "Dup",
                "user_profile": "CLI",
                "plan": "INFO"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_self_register_rejects_employee() {
    let app = TestApp::new().await;
    let (status, _) = app
        .post(
            "/users/self_register",
            None,
            json!({
                "email": "sneaky@test.com",
                "password": "x",
                "name": "Sneaky",
                "user_profile": "EMP",
                "employee_id": "EMP999"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_creates_employee() {
    let app = TestApp::new().await;
    let carol = app.employee("carol", true).await;

    let (status, body) = app
        .post(
            "/users/users",
            Some(&app.token(&carol)),
            json!({
                "email": "newemployee@test.com",
                "password": "emp_password",
                "name": "New Employee",
                "user_profile": "EMP",
                "employee_id": "EMP003"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user_profile"], "EMP");
    assert_eq!(body["employee_id"], "EMP003");
    assert_eq!(body["is_admin"], false);
}

#[tokio::test]
async fn test_non_admin_cannot_manage_users() {
    let app = TestApp::new().await;
    let alice = app.employee("alice", false).await;
    let dana = app.client("dana", &["POW"]).await;
    let payload = json!({
        "email": "other@test.com",
        "password": "x",
        "name": "Other",
        "user_profile": "CLI",
        "plan": "INFO"
    });

    let (status, _) = app
        .post("/users/users", Some(&app.token(&dana)), payload.clone())
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .post("/users/users", Some(&app.token(&alice)), payload.clone())
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.post("/users/users", None, payload).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.get("/users/users", Some(&app.token(&alice))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // 본인 조회는 가능
    let (status, body) = app
        .get(&format!("/users/users/{}", dana.id), Some(&app.token(&dana)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "dana@test.com");

    let (status, _) = app
        .get(&format!("/users/users/{}", alice.id), Some(&app.token(&dana)))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_updates_client_columns() {
    let app = TestApp::new().await;
    let alice = app.employee("alice", false).await;
    let carol = app.employee("carol", true).await;
    let dana = app.client("dana", &[]).await;
    let taxes = app
        .article(&alice, json!({"title": "T", "status": "PUBD", "column": "TAX"}))
        .await;
    let uri = format!("/news/{}", taxes.id);

    let (status, _) = app.get(&uri, Some(&app.token(&dana))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/users/users/{}", dana.id),
            Some(&app.token(&carol)),
            Some(json!({"accessible_columns": ["TAX"]})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["accessible_columns"], json!(["TAX"]));

    // 권한은 요청마다 다시 읽음
    let (status, _) = app.get(&uri, Some(&app.token(&dana))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .send(
            Method::PUT,
            &format!("/users/users/{}", dana.id),
            Some(&app.token(&carol)),
            Some(json!({"is_admin": true})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_user_keeps_articles() {
    let app = TestApp::new().await;
    let alice = app.employee("alice", false).await;
    let carol = app.employee("carol", true).await;
    let x = app
        .article(&alice, json!({"title": "X", "status": "PUBD"}))
        .await;
    let alice_token = app.token(&alice);
    let carol_token = app.token(&carol);

    let (status, _) = app
        .send(
            Method::DELETE,
            &format!("/users/users/{}", alice.id),
            Some(&carol_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app.get(&format!("/news/{}", x.id), Some(&carol_token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["author"], Value::Null);

    // 삭제된 사용자의 토큰은 더 이상 통하지 않음
    let (status, _) = app.get("/news", Some(&alice_token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .send(
            Method::DELETE,
            &format!("/users/users/{}", alice.id),
            Some(&carol_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bootstrap_admin() {
    let db = NewsDb::in_memory().await.unwrap();
    let config = Config {
        admin_email: Some("admin@test.com".to_string()),
        admin_password: Some("admin_password".to_string()),
        ..Config::default()
    };
    let state = AppState::from_parts(config, TokenService::random(300, 86400), db);

    state.bootstrap_admin().await.unwrap();
    state.bootstrap_admin().await.unwrap();

    let users = state.db.list_users().await.unwrap();
    assert_eq!(users.len(), 1);
    assert!(users[0].is_admin);
    assert!(users[0].principal().is_admin());
}
