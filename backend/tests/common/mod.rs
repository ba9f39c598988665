#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use blog_backend::{AppState, config::AppConfig, db, routes::create_router};
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(AppConfig::default()).await
}

pub async fn spawn_app_with(config: AppConfig) -> TestApp {
    let config = AppConfig {
        database_storage: ":memory:".to_string(),
        ..config
    };
    let pool = db::setup_database(&config)
        .await
        .expect("in-memory database should open");
    let router = create_router(AppState::new(pool.clone(), config));

    TestApp { router, pool }
}

impl TestApp {
    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, json)
    }

    pub async fn create(&self, title: &str, content: &str, author: &str) -> Value {
        let (status, body) = self
            .request(
                "POST",
                "/api/posts",
                Some(serde_json::json!({
                    "title": title,
                    "content": content,
                    "author": author,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body
    }

    pub async fn count(&self) -> usize {
        let (_, body) = self.request("GET", "/api/posts", None).await;
        body.as_array().unwrap().len()
    }
}
