#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use axum::body::Body;
use axum::http::header::AUTHORIZATION;
use axum::http::header::CONTENT_TYPE;
use axum::http::Request;
use axum::http::StatusCode;
use axum::Router;
use chirpy::chirp::errors::ChirpError;
use chirpy::chirp::models::Chirp;
use chirpy::chirp::models::ChirpId;
use chirpy::chirp::ports::ChirpRepository;
use chirpy::chirp::service::ChirpService;
use chirpy::inbound::http::router::create_router;
use chirpy::inbound::http::router::AppState;
use chirpy::metrics::Metrics;
use chirpy::session::errors::SessionError;
use chirpy::session::lifecycle::SessionLifecycle;
use chirpy::session::models::RefreshToken;
use chirpy::session::ports::SessionRepository;
use chirpy::user::errors::UserError;
use chirpy::user::models::EmailAddress;
use chirpy::user::models::User;
use chirpy::user::models::UserId;
use chirpy::user::ports::UserRepository;
use chirpy::user::service::UserService;
use chrono::DateTime;
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const POLKA_API_KEY: &str = "f271c81ff7084ee5b99a5091b42d486e";

/// Credential store kept in process memory
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn get(&self, id: &UserId) -> Option<User> {
        self.users.lock().unwrap().get(id).cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.values().find(|u| u.email.as_str() == email).cloned())
    }

    async fn update_credentials(
        &self,
        id: &UserId,
        email: &EmailAddress,
        password_hash: &str,
    ) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.id != *id && u.email == *email) {
            return Err(UserError::EmailAlreadyExists(email.to_string()));
        }
        let user = users
            .get_mut(id)
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;
        user.email = email.clone();
        user.password_hash = password_hash.to_string();
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn set_upgraded(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let mut users = self.users.lock().unwrap();
        Ok(users.get_mut(id).map(|user| {
            user.is_chirpy_red = true;
            user.updated_at = Utc::now();
            user.clone()
        }))
    }

    async fn delete_all(&self) -> Result<u64, UserError> {
        let mut users = self.users.lock().unwrap();
        let deleted = users.len() as u64;
        users.clear();
        Ok(deleted)
    }
}

/// Session store kept in process memory
#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: Mutex<HashMap<String, RefreshToken>>,
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn create(&self, session: RefreshToken) -> Result<RefreshToken, SessionError> {
        self.sessions
            .lock()
            .unwrap()
            .insert(session.token.clone(), session.clone());
        Ok(session)
    }

    async fn find(&self, token: &str) -> Result<Option<RefreshToken>, SessionError> {
        Ok(self.sessions.lock().unwrap().get(token).cloned())
    }

    async fn revoke(&self, token: &str, revoked_at: DateTime<Utc>) -> Result<u64, SessionError> {
        let mut sessions = self.sessions.lock().unwrap();
        match sessions.get_mut(token) {
            Some(session) if session.revoked_at.is_none() => {
                session.revoked_at = Some(revoked_at);
                session.updated_at = revoked_at;
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}

/// Chirp store kept in process memory, in insertion order
#[derive(Default)]
pub struct InMemoryChirpRepository {
    chirps: Mutex<Vec<Chirp>>,
}

#[async_trait]
impl ChirpRepository for InMemoryChirpRepository {
    async fn create(&self, chirp: Chirp) -> Result<Chirp, ChirpError> {
        self.chirps.lock().unwrap().push(chirp.clone());
        Ok(chirp)
    }

    async fn find_by_id(&self, id: &ChirpId) -> Result<Option<Chirp>, ChirpError> {
        let chirps = self.chirps.lock().unwrap();
        Ok(chirps.iter().find(|c| c.id == *id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Chirp>, ChirpError> {
        Ok(self.chirps.lock().unwrap().clone())
    }

    async fn delete(&self, id: &ChirpId, author_id: &UserId) -> Result<u64, ChirpError> {
        let mut chirps = self.chirps.lock().unwrap();
        let before = chirps.len();
        chirps.retain(|c| !(c.id == *id && c.user_id == *author_id));
        Ok((before - chirps.len()) as u64)
    }
}

/// Response with the body already drained
pub struct TestResponse {
    pub status: StatusCode,
    pub text: String,
    pub body: Value,
}

/// Router wired to in-memory stores, driven without a socket
pub struct TestApp {
    pub router: Router,
    pub users: Arc<InMemoryUserRepository>,
    pub metrics: Arc<Metrics>,
}

impl TestApp {
    /// Application on the dev platform
    pub fn new() -> Self {
        Self::with_reset(true)
    }

    pub fn with_reset(allow_reset: bool) -> Self {
        let users = Arc::new(InMemoryUserRepository::default());
        let sessions = Arc::new(InMemorySessionRepository::default());
        let chirps = Arc::new(InMemoryChirpRepository::default());
        let metrics = Arc::new(Metrics::new());

        let state = AppState {
            user_service: Arc::new(UserService::new(Arc::clone(&users))),
            chirp_service: Arc::new(ChirpService::new(chirps)),
            sessions: Arc::new(SessionLifecycle::new(
                Arc::clone(&users),
                sessions,
                Arc::new(Authenticator::new(JWT_SECRET)),
                POLKA_API_KEY.to_string(),
            )),
            metrics: Arc::clone(&metrics),
            allow_reset,
        };

        let static_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

        Self {
            router: create_router(state, static_dir),
            users,
            metrics,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();

        TestResponse {
            status,
            text: String::from_utf8_lossy(&bytes).to_string(),
            body: serde_json::from_slice(&bytes).unwrap_or(Value::Null),
        }
    }

    /// Send a request, optionally with a JSON body and an `Authorization` value
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        authorization: Option<&str>,
        json: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value);
        }

        let body = match json {
            Some(json) => {
                builder = builder.header(CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        self.send(builder.body(body).expect("Failed to build request"))
            .await
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None, None).await
    }

    pub async fn post_json(&self, path: &str, json: Value) -> TestResponse {
        self.request("POST", path, None, Some(json)).await
    }

    pub async fn post_bearer(&self, path: &str, token: &str) -> TestResponse {
        self.request("POST", path, Some(&format!("Bearer {}", token)), None)
            .await
    }

    /// Register a user and return its id
    pub async fn create_user(&self, email: &str, password: &str) -> String {
        let response = self
            .post_json(
                "/api/users",
                serde_json::json!({ "email": email, "password": password }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
        response.body["data"]["id"]
            .as_str()
            .expect("user id")
            .to_string()
    }

    /// Log in and return `(access_token, refresh_token)`
    pub async fn login(&self, email: &str, password: &str) -> (String, String) {
        let response = self
            .post_json(
                "/api/login",
                serde_json::json!({ "email": email, "password": password }),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
        (
            response.body["data"]["access_token"]
                .as_str()
                .expect("access token")
                .to_string(),
            response.body["data"]["refresh_token"]
                .as_str()
                .expect("refresh token")
                .to_string(),
        )
    }

    /// Post a chirp as the bearer of `access_token` and return its id
    pub async fn create_chirp(&self, access_token: &str, body: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/chirps",
                Some(&format!("Bearer {}", access_token)),
                Some(serde_json::json!({ "body": body })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
        response.body["data"]["id"]
            .as_str()
            .expect("chirp id")
            .to_string()
    }
}
