use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use http::HeaderMap;

use crate::domain::session::errors::AuthError;
use crate::domain::session::guard::AuthorizationGuard;
use crate::domain::session::manager::RefreshTokenManager;
use crate::domain::session::models::LoginResult;
use crate::domain::session::ports::SessionLifecyclePort;
use crate::domain::session::ports::SessionRepository;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Orchestrates login, refresh, revocation and ownership checks.
pub struct SessionLifecycle<UR, SR>
where
    UR: UserRepository,
    SR: SessionRepository,
{
    users: Arc<UR>,
    authenticator: Arc<Authenticator>,
    refresh_tokens: Arc<RefreshTokenManager<SR>>,
    guard: AuthorizationGuard<SR>,
}

impl<UR, SR> SessionLifecycle<UR, SR>
where
    UR: UserRepository,
    SR: SessionRepository,
{
    /// Create the lifecycle over the credential and session stores.
    ///
    /// # Arguments
    /// * `users` - Credential store
    /// * `sessions` - Session store
    /// * `authenticator` - Password and access token primitives
    /// * `api_key` - Pre-shared webhook key
    pub fn new(
        users: Arc<UR>,
        sessions: Arc<SR>,
        authenticator: Arc<Authenticator>,
        api_key: String,
    ) -> Self {
        let refresh_tokens = Arc::new(RefreshTokenManager::new(sessions));
        let guard = AuthorizationGuard::new(
            Arc::clone(&authenticator),
            Arc::clone(&refresh_tokens),
            api_key,
        );

        Self {
            users,
            authenticator,
            refresh_tokens,
            guard,
        }
    }
}

#[async_trait]
impl<UR, SR> SessionLifecyclePort for SessionLifecycle<UR, SR>
where
    UR: UserRepository,
    SR: SessionRepository,
{
    async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AuthError> {
        let Some(user) = self.users.find_by_email(email).await? else {
            tracing::debug!("Login attempt for unknown email");
            // Same argon2 cost as a wrong password for a known email.
            if let Err(e) = self.authenticator.verify_placeholder(password) {
                tracing::error!(error = %e, "Placeholder password verification failed");
            }
            return Err(AuthError::InvalidCredentials);
        };

        let result = self
            .authenticator
            .authenticate(password, &user.password_hash, user.id.0)
            .map_err(AuthError::from)?;

        let refresh_token = self.refresh_tokens.issue(&user.id).await?;
        tracing::info!(user_id = %user.id, "User logged in");

        Ok(LoginResult {
            user,
            access_token: result.access_token,
            refresh_token,
        })
    }

    async fn refresh(&self, headers: &HeaderMap) -> Result<String, AuthError> {
        let user_id = self.guard.authenticate_refresh(headers).await?;

        Ok(self.authenticator.issue_access_token(user_id.0)?)
    }

    async fn revoke(&self, headers: &HeaderMap) -> Result<(), AuthError> {
        let token = self.guard.extract_bearer(headers)?;

        Ok(self.refresh_tokens.revoke(token).await?)
    }

    fn authenticate_access(&self, headers: &HeaderMap) -> Result<UserId, AuthError> {
        self.guard.authenticate_access(headers)
    }

    fn authorize_mutation(
        &self,
        headers: &HeaderMap,
        resource_owner: &UserId,
    ) -> Result<UserId, AuthError> {
        let user_id = self.guard.authenticate_access(headers)?;

        if user_id != *resource_owner {
            tracing::warn!(user_id = %user_id, owner_id = %resource_owner, "Mutation on foreign resource refused");
            return Err(AuthError::Forbidden {
                user_id: user_id.to_string(),
            });
        }
        Ok(user_id)
    }

    fn authenticate_api_key(&self, headers: &HeaderMap) -> Result<(), AuthError> {
        self.guard.authenticate_api_key(headers)
    }
}

#[cfg(test)]
mod tests {
    use auth::HeaderError;
    use auth::TokenError;
    use chrono::DateTime;
    use chrono::Utc;
    use http::header::AUTHORIZATION;
    use http::HeaderValue;
    use mockall::mock;

    use super::*;
    use crate::domain::session::errors::SessionError;
    use crate::domain::session::models::RefreshToken;
    use crate::domain::user::errors::UserError;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::User;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";
    const API_KEY: &str = "f271c81ff7084ee5b99a5091b42d486e";

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
            async fn update_credentials(&self, id: &UserId, email: &EmailAddress, password_hash: &str) -> Result<User, UserError>;
            async fn set_upgraded(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn delete_all(&self) -> Result<u64, UserError>;
        }
    }

    mock! {
        pub TestSessionRepository {}

        #[async_trait]
        impl SessionRepository for TestSessionRepository {
            async fn create(&self, session: RefreshToken) -> Result<RefreshToken, SessionError>;
            async fn find(&self, token: &str) -> Result<Option<RefreshToken>, SessionError>;
            async fn revoke(&self, token: &str, revoked_at: DateTime<Utc>) -> Result<u64, SessionError>;
        }
    }

    fn lifecycle(
        users: MockTestUserRepository,
        sessions: MockTestSessionRepository,
    ) -> SessionLifecycle<MockTestUserRepository, MockTestSessionRepository> {
        SessionLifecycle::new(
            Arc::new(users),
            Arc::new(sessions),
            Arc::new(Authenticator::new(SECRET)),
            API_KEY.to_string(),
        )
    }

    fn user_with_password(password: &str) -> User {
        User {
            id: UserId::new(),
            email: EmailAddress::new("a@x.com".to_string()).unwrap(),
            password_hash: auth::PasswordHasher::new().hash(password).unwrap(),
            is_chirpy_red: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn authorization(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[tokio::test]
    async fn test_login_issues_both_tokens() {
        let mut users = MockTestUserRepository::new();
        let mut sessions = MockTestSessionRepository::new();
        let user = user_with_password("pw1");
        let user_id = user.id;

        users
            .expect_find_by_email()
            .withf(|email| email == "a@x.com")
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));
        sessions
            .expect_create()
            .withf(move |session| session.user_id == user_id)
            .times(1)
            .returning(|session| Ok(session));

        let lifecycle = lifecycle(users, sessions);

        let result = lifecycle.login("a@x.com", "pw1").await.unwrap();
        assert_eq!(result.user.id, user_id);
        assert_eq!(result.refresh_token.len(), 64);

        let headers = authorization(&format!("Bearer {}", result.access_token));
        assert_eq!(lifecycle.authenticate_access(&headers).unwrap(), user_id);
    }

    #[tokio::test]
    async fn test_login_unknown_email_and_wrong_password_look_alike() {
        let mut users = MockTestUserRepository::new();
        let mut sessions = MockTestSessionRepository::new();
        let user = user_with_password("pw1");

        users.expect_find_by_email().times(2).returning(move |email| {
            if email == "a@x.com" {
                Ok(Some(user.clone()))
            } else {
                Ok(None)
            }
        });
        sessions.expect_create().times(0);

        let lifecycle = lifecycle(users, sessions);

        let unknown = lifecycle.login("nobody@x.com", "pw1").await.unwrap_err();
        let wrong = lifecycle.login("a@x.com", "pw2").await.unwrap_err();

        assert!(matches!(unknown, AuthError::InvalidCredentials));
        assert!(matches!(wrong, AuthError::InvalidCredentials));
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn test_login_unknown_email_still_pays_for_a_verification() {
        let mut users = MockTestUserRepository::new();
        let mut sessions = MockTestSessionRepository::new();

        users.expect_find_by_email().times(1).returning(|_| Ok(None));
        sessions.expect_create().times(0);

        let lifecycle = lifecycle(users, sessions);
        let hasher = auth::PasswordHasher::new();
        let hash = hasher.hash("pw1").unwrap();

        let started = std::time::Instant::now();
        assert!(!hasher.verify("pw2", &hash).unwrap());
        let one_verification = started.elapsed();

        let started = std::time::Instant::now();
        let err = lifecycle.login("nobody@x.com", "pw1").await.unwrap_err();
        let unknown_email = started.elapsed();

        assert!(matches!(err, AuthError::InvalidCredentials));
        assert!(unknown_email >= one_verification / 4);
    }

    #[tokio::test]
    async fn test_login_fails_when_session_cannot_be_stored() {
        let mut users = MockTestUserRepository::new();
        let mut sessions = MockTestSessionRepository::new();
        let user = user_with_password("pw1");

        users
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));
        sessions
            .expect_create()
            .returning(|_| Err(SessionError::DatabaseError("disk full".to_string())));

        let lifecycle = lifecycle(users, sessions);

        let err = lifecycle.login("a@x.com", "pw1").await.unwrap_err();
        assert!(err.is_internal());
    }

    #[tokio::test]
    async fn test_refresh_mints_access_token_for_session_owner() {
        let users = MockTestUserRepository::new();
        let mut sessions = MockTestSessionRepository::new();
        let user_id = UserId::new();
        let token = "b".repeat(64);

        let stored = RefreshToken::new(token.clone(), user_id, Utc::now());
        sessions
            .expect_find()
            .withf(|presented| presented == "b".repeat(64))
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        let lifecycle = lifecycle(users, sessions);

        let access_token = lifecycle
            .refresh(&authorization(&format!("Bearer {}", token)))
            .await
            .unwrap();

        let headers = authorization(&format!("Bearer {}", access_token));
        assert_eq!(lifecycle.authenticate_access(&headers).unwrap(), user_id);
    }

    #[tokio::test]
    async fn test_refresh_with_revoked_token() {
        let users = MockTestUserRepository::new();
        let mut sessions = MockTestSessionRepository::new();

        sessions.expect_find().returning(|token| {
            let mut session = RefreshToken::new(token.to_string(), UserId::new(), Utc::now());
            session.revoked_at = Some(Utc::now());
            Ok(Some(session))
        });

        let lifecycle = lifecycle(users, sessions);

        let err = lifecycle
            .refresh(&authorization(&format!("Bearer {}", "c".repeat(64))))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Session(SessionError::Revoked)));
        assert!(!err.is_internal());
    }

    #[tokio::test]
    async fn test_refresh_without_header() {
        let lifecycle = lifecycle(MockTestUserRepository::new(), MockTestSessionRepository::new());

        let err = lifecycle.refresh(&HeaderMap::new()).await.unwrap_err();
        assert!(matches!(err, AuthError::Header(HeaderError::Missing)));
    }

    #[tokio::test]
    async fn test_revoke_unknown_token() {
        let users = MockTestUserRepository::new();
        let mut sessions = MockTestSessionRepository::new();
        sessions.expect_revoke().returning(|_, _| Ok(0));
        sessions.expect_find().returning(|_| Ok(None));

        let lifecycle = lifecycle(users, sessions);

        let err = lifecycle
            .revoke(&authorization("Bearer unknown"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Session(SessionError::NotFound)));
        assert!(!err.is_internal());
    }

    #[test]
    fn test_authorize_mutation_owner_and_stranger() {
        let lifecycle = lifecycle(MockTestUserRepository::new(), MockTestSessionRepository::new());
        let owner = UserId::new();
        let stranger = UserId::new();
        let signer = auth::TokenSigner::new(SECRET);

        let owner_headers = authorization(&format!("Bearer {}", signer.issue(owner.0).unwrap()));
        let stranger_headers =
            authorization(&format!("Bearer {}", signer.issue(stranger.0).unwrap()));

        assert_eq!(
            lifecycle.authorize_mutation(&owner_headers, &owner).unwrap(),
            owner
        );
        assert!(matches!(
            lifecycle.authorize_mutation(&stranger_headers, &owner),
            Err(AuthError::Forbidden { .. })
        ));
    }

    #[test]
    fn test_authorize_mutation_rejects_token_from_other_secret() {
        let lifecycle = lifecycle(MockTestUserRepository::new(), MockTestSessionRepository::new());
        let owner = UserId::new();
        let foreign = auth::TokenSigner::new(b"another_secret_key_of_32_bytes_or_more");

        let headers = authorization(&format!("Bearer {}", foreign.issue(owner.0).unwrap()));

        assert!(matches!(
            lifecycle.authorize_mutation(&headers, &owner),
            Err(AuthError::Token(TokenError::BadSignature))
        ));
    }

    #[test]
    fn test_api_key() {
        let lifecycle = lifecycle(MockTestUserRepository::new(), MockTestSessionRepository::new());

        assert!(lifecycle
            .authenticate_api_key(&authorization(&format!("ApiKey {}", API_KEY)))
            .is_ok());
        assert!(matches!(
            lifecycle.authenticate_api_key(&authorization("ApiKey wrong")),
            Err(AuthError::InvalidApiKey)
        ));
        assert!(matches!(
            lifecycle.authenticate_api_key(&authorization(&format!("Bearer {}", API_KEY))),
            Err(AuthError::Header(HeaderError::Malformed { .. }))
        ));
    }
}
