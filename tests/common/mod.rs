use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use uuid::Uuid;

pub struct TestApp {
    pub router: Router,
    pub db: SqlitePool,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .expect("Failed to create in-memory SQLite pool");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        let router = ideabank::build_app(pool.clone());

        Self { router, db: pool }
    }

    /// Send a request through the app and return the response.
    pub async fn request(&self, req: Request<Body>) -> Response {
        tower::ServiceExt::oneshot(self.router.clone(), req)
            .await
            .unwrap()
    }

    /// Send a GET request authenticated as `caller`.
    pub async fn get(&self, uri: &str, caller: Uuid) -> Response {
        let req = Request::builder()
            .uri(uri)
            .header("authorization", bearer(caller))
            .body(Body::empty())
            .unwrap();
        self.request(req).await
    }

    /// Send a JSON POST request authenticated as `caller`.
    pub async fn post_json(&self, uri: &str, body: serde_json::Value, caller: Uuid) -> Response {
        let req = Request::builder()
            .uri(uri)
            .method("POST")
            .header("content-type", "application/json")
            .header("authorization", bearer(caller))
            .body(Body::from(body.to_string()))
            .unwrap();
        self.request(req).await
    }

    /// Send a DELETE request authenticated as `caller`.
    pub async fn delete(&self, uri: &str, caller: Uuid) -> Response {
        let req = Request::builder()
            .uri(uri)
            .method("DELETE")
            .header("authorization", bearer(caller))
            .body(Body::empty())
            .unwrap();
        self.request(req).await
    }

    /// Grant `role` to `principal` on `collection` directly in the database,
    /// bypassing the service.
    pub async fn grant_role(&self, collection: Uuid, principal: Uuid, role: &str) {
        sqlx::query(
            "INSERT INTO role_assignments (collection_id, principal_id, role, granted_at) VALUES (?, ?, ?, ?)",
        )
        .bind(collection.simple().to_string())
        .bind(principal.simple().to_string())
        .bind(role)
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&self.db)
        .await
        .expect("Failed to insert role assignment");
    }

    pub async fn count_collections(&self) -> i64 {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM collections")
            .fetch_one(&self.db)
            .await
            .unwrap();
        count
    }

    pub async fn count_role_assignments(&self, collection: Uuid) -> i64 {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM role_assignments WHERE collection_id = ?")
                .bind(collection.simple().to_string())
                .fetch_one(&self.db)
                .await
                .unwrap();
        count
    }

    pub async fn has_role_assignment(&self, collection: Uuid, principal: Uuid) -> bool {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM role_assignments WHERE collection_id = ? AND principal_id = ?",
        )
        .bind(collection.simple().to_string())
        .bind(principal.simple().to_string())
        .fetch_one(&self.db)
        .await
        .unwrap();
        count > 0
    }
}

pub fn bearer(caller: Uuid) -> String {
    format!("Bearer {}", caller)
}

/// Read the full response body as parsed JSON.
#[allow(dead_code)]
pub async fn body_json(resp: Response) -> serde_json::Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert a 201 response and return the Location header value.
#[allow(dead_code)]
pub fn created_location(resp: &Response) -> String {
    assert_eq!(resp.status(), StatusCode::CREATED);
    resp.headers()
        .get("location")
        .expect("Created response should have a Location header")
        .to_str()
        .unwrap()
        .to_string()
}
