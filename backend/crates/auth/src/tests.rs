//! Use-case tests for the auth crate
//! Run against the in-memory store; verification links are read off the
//! mailer queue the way a user would read them from their inbox.

#[cfg(test)]
mod support {
    use std::sync::Arc;

    use tokio::sync::mpsc::UnboundedReceiver;

    use crate::application::*;
    use crate::domain::value_object::user_id::UserId;
    use crate::infra::{ChannelMailer, MemoryUserRepository, VerificationEmail};

    pub const PASSWORD: &str = "Abcdef1!";

    pub struct Harness {
        pub repo: Arc<MemoryUserRepository>,
        pub config: Arc<AuthConfig>,
        pub tokens: Arc<TokenService>,
        pub mailer: Arc<ChannelMailer>,
        pub inbox: UnboundedReceiver<VerificationEmail>,
    }

    impl Harness {
        pub fn new() -> Self {
            let config = AuthConfig::development();
            let (mailer, inbox) = ChannelMailer::channel();
            Self {
                repo: Arc::new(MemoryUserRepository::new()),
                tokens: Arc::new(TokenService::new(&config)),
                config: Arc::new(config),
                mailer: Arc::new(mailer),
                inbox,
            }
        }

        pub fn register_input(email: &str) -> RegisterInput {
            RegisterInput {
                name: "A".into(),
                email: email.into(),
                phone: "+1 555".into(),
                password: PASSWORD.into(),
            }
        }

        pub async fn register(&self, email: &str) -> crate::AuthResult<RegisterOutput> {
            RegisterUseCase::new(self.repo.clone(), self.mailer.clone(), self.config.clone())
                .execute(Self::register_input(email))
                .await
        }

        /// Token from the most recent verification link
        pub fn next_verification_token(&mut self) -> String {
            let email = self.inbox.try_recv().expect("verification email queued");
            email
                .link
                .split("token=")
                .nth(1)
                .expect("token in link")
                .to_string()
        }

        pub async fn verify(&self, token: &str) -> crate::AuthResult<UserId> {
            VerifyEmailUseCase::new(self.repo.clone())
                .execute(Some(token))
                .await
        }

        pub async fn login(&self, email: &str, password: &str) -> crate::AuthResult<LoginOutput> {
            LoginUseCase::new(self.repo.clone(), self.tokens.clone(), self.config.clone())
                .execute(LoginInput {
                    email: email.into(),
                    password: password.into(),
                })
                .await
        }

        pub async fn refresh(&self, token: &str) -> crate::AuthResult<TokenPair> {
            RefreshTokenUseCase::new(self.repo.clone(), self.tokens.clone())
                .execute(token)
                .await
        }

        pub async fn authenticate(&self, token: &str) -> crate::AuthResult<CurrentUser> {
            AuthenticateUseCase::new(self.repo.clone(), self.tokens.clone())
                .execute(token)
                .await
        }

        /// Registered and verified account, returns its first login
        pub async fn verified_login(&mut self, email: &str) -> LoginOutput {
            self.register(email).await.unwrap();
            let token = self.next_verification_token();
            self.verify(&token).await.unwrap();
            self.login(email, PASSWORD).await.unwrap()
        }
    }
}

#[cfg(test)]
mod register_tests {
    use super::support::*;
    use crate::domain::repository::UserRepository;
    use crate::domain::value_object::email::Email;
    use crate::error::AuthError;

    #[tokio::test]
    async fn test_register_creates_unverified_user_and_sends_link() {
        let mut h = Harness::new();
        let output = h.register("A@X.com").await.unwrap();

        assert_eq!(output.email.as_str(), "a@x.com");
        let user = h.repo.find_by_id(&output.user_id).await.unwrap().unwrap();
        assert!(!user.is_verified);
        assert!(user.token_salt.is_some());

        let email = h.inbox.try_recv().unwrap();
        assert_eq!(email.to, "a@x.com");
        assert!(email.link.starts_with("http://localhost:3000/verify-email?token="));
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict_without_second_row() {
        let h = Harness::new();
        h.register("a@x.com").await.unwrap();

        let err = h.register("A@x.COM").await.unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));
        assert_eq!(h.repo.len().await, 1);

        // The store's own unique check backs up the pre-check
        let existing = h
            .repo
            .find_by_email(&Email::new("a@x.com").unwrap())
            .await
            .unwrap()
            .unwrap();
        let mut clone = existing.clone();
        clone.user_id = crate::domain::value_object::user_id::UserId::new();
        assert!(matches!(h.repo.create(&clone).await, Err(AuthError::EmailTaken)));
    }

    #[tokio::test]
    async fn test_register_validation() {
        let h = Harness::new();

        let mut input = Harness::register_input("a@x.com");
        input.password = "abcdefgh".into();
        let err = crate::application::RegisterUseCase::new(
            h.repo.clone(),
            h.mailer.clone(),
            h.config.clone(),
        )
        .execute(input)
        .await
        .unwrap_err();
        assert!(matches!(err, AuthError::Validation { ref field, .. } if field.as_deref() == Some("password")));

        let mut input = Harness::register_input("a@x.com");
        input.phone = "call me".into();
        let err = crate::application::RegisterUseCase::new(
            h.repo.clone(),
            h.mailer.clone(),
            h.config.clone(),
        )
        .execute(input)
        .await
        .unwrap_err();
        assert!(matches!(err, AuthError::Validation { ref field, .. } if field.as_deref() == Some("phone")));

        assert!(h.repo.is_empty().await);
    }
}

#[cfg(test)]
mod verification_tests {
    use super::support::*;
    use crate::application::VerifyEmailUseCase;
    use crate::domain::repository::UserRepository;
    use crate::error::AuthError;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_login_blocked_until_verified() {
        let mut h = Harness::new();
        h.register("a@x.com").await.unwrap();

        let err = h.login("a@x.com", PASSWORD).await.unwrap_err();
        assert!(matches!(err, AuthError::EmailNotVerified));

        let token = h.next_verification_token();
        h.verify(&token).await.unwrap();

        let output = h.login("a@x.com", PASSWORD).await.unwrap();
        assert!(!output.tokens.access_token.is_empty());
        assert!(!output.tokens.refresh_token.is_empty());
    }

    #[tokio::test]
    async fn test_token_is_single_use() {
        let mut h = Harness::new();
        let output = h.register("a@x.com").await.unwrap();
        let token = h.next_verification_token();

        assert_eq!(h.verify(&token).await.unwrap(), output.user_id);
        assert!(matches!(
            h.verify(&token).await,
            Err(AuthError::InvalidVerificationToken)
        ));

        let user = h.repo.find_by_id(&output.user_id).await.unwrap().unwrap();
        assert!(user.is_verified);
        assert!(user.verification.is_none());
    }

    #[tokio::test]
    async fn test_missing_unknown_and_expired_tokens() {
        let mut h = Harness::new();
        h.register("a@x.com").await.unwrap();
        let token = h.next_verification_token();

        let use_case = VerifyEmailUseCase::new(h.repo.clone());
        assert!(matches!(use_case.execute(None).await, Err(AuthError::VerificationTokenRequired)));
        assert!(matches!(use_case.execute(Some("  ")).await, Err(AuthError::VerificationTokenRequired)));
        assert!(matches!(
            use_case.execute(Some("deadbeef")).await,
            Err(AuthError::InvalidVerificationToken)
        ));

        // Past the expiry the store no longer matches the token
        let later = Utc::now() + Duration::hours(25);
        assert!(h.repo.find_by_verification_token(&token, later).await.unwrap().is_none());
        assert!(h.repo.find_by_verification_token(&token, Utc::now()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_store_consumes_token_once() {
        let mut h = Harness::new();
        let output = h.register("a@x.com").await.unwrap();
        let token = h.next_verification_token();
        let now = Utc::now();

        // Two verifications that both passed the lookup race on the update
        assert!(!h.repo.mark_verified(&output.user_id, "deadbeef", now).await.unwrap());
        assert!(h.repo.mark_verified(&output.user_id, &token, now).await.unwrap());
        assert!(!h.repo.mark_verified(&output.user_id, &token, now).await.unwrap());

        let later = now + Duration::hours(25);
        let mut other = Harness::new();
        let second = other.register("b@x.com").await.unwrap();
        let late_token = other.next_verification_token();
        assert!(!other.repo.mark_verified(&second.user_id, &late_token, later).await.unwrap());
    }
}

#[cfg(test)]
mod login_tests {
    use super::support::*;
    use crate::domain::repository::UserRepository;
    use crate::error::AuthError;

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email() {
        let mut h = Harness::new();
        h.verified_login("a@x.com").await;

        assert!(matches!(
            h.login("a@x.com", "Abcdef1?").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            h.login("nobody@x.com", PASSWORD).await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            h.login("not-an-email", PASSWORD).await,
            Err(AuthError::Validation { .. })
        ));
        assert!(matches!(
            h.login("a@x.com", "").await,
            Err(AuthError::Validation { .. })
        ));
    }

    #[tokio::test]
    async fn test_login_is_case_insensitive_and_stores_refresh_hash() {
        let mut h = Harness::new();
        let output = h.verified_login("a@x.com").await;

        let again = h.login("A@X.COM", PASSWORD).await.unwrap();
        let user = h.repo.find_by_id(&again.user.user_id).await.unwrap().unwrap();
        let stored = user.refresh_token.unwrap();

        assert_eq!(
            stored.hash,
            crate::TokenService::hash_refresh_token(&again.tokens.refresh_token)
        );
        assert_ne!(output.tokens.refresh_token, again.tokens.refresh_token);
    }

    #[tokio::test]
    async fn test_salt_assigned_on_demand() {
        let mut h = Harness::new();
        let output = h.verified_login("a@x.com").await;

        // Simulate a row from before salts existed
        let mut legacy = h.repo.find_by_id(&output.user.user_id).await.unwrap().unwrap();
        legacy.token_salt = None;
        legacy.email = crate::domain::value_object::email::Email::new("legacy@x.com").unwrap();
        legacy.user_id = crate::domain::value_object::user_id::UserId::new();
        h.repo.create(&legacy).await.unwrap();

        let login = h.login("legacy@x.com", PASSWORD).await.unwrap();
        let stored = h.repo.find_by_id(&legacy.user_id).await.unwrap().unwrap();
        let salt = stored.token_salt.expect("salt assigned");

        let claims = h.tokens.decode_access(&login.tokens.access_token).unwrap();
        assert_eq!(claims.salt, salt.as_str());
        assert!(h.authenticate(&login.tokens.access_token).await.is_ok());
    }
}

#[cfg(test)]
mod refresh_tests {
    use super::support::*;
    use crate::domain::repository::UserRepository;
    use crate::domain::value_object::token_salt::TokenSalt;
    use crate::error::AuthError;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_refresh_rotates_and_invalidates_previous() {
        let mut h = Harness::new();
        let login = h.verified_login("a@x.com").await;

        let pair = h.refresh(&login.tokens.refresh_token).await.unwrap();
        assert_ne!(pair.refresh_token, login.tokens.refresh_token);
        assert!(h.authenticate(&pair.access_token).await.is_ok());

        // The superseded token is refused, the new one still works
        assert!(matches!(
            h.refresh(&login.tokens.refresh_token).await,
            Err(AuthError::InvalidRefreshToken)
        ));
        assert!(h.refresh(&pair.refresh_token).await.is_ok());
    }

    #[tokio::test]
    async fn test_access_token_is_not_a_refresh_token() {
        let mut h = Harness::new();
        let login = h.verified_login("a@x.com").await;

        assert!(matches!(
            h.refresh(&login.tokens.access_token).await,
            Err(AuthError::InvalidRefreshToken)
        ));
        assert!(matches!(h.refresh("").await, Err(AuthError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_refresh_requires_stored_unexpired_hash() {
        let mut h = Harness::new();
        let login = h.verified_login("a@x.com").await;
        let user_id = login.user.user_id;

        let stored = h.repo.find_by_id(&user_id).await.unwrap().unwrap().refresh_token.unwrap();

        // Stored expiry passed
        h.repo
            .set_refresh_token_data(&user_id, &stored.hash, Utc::now() - Duration::seconds(1))
            .await
            .unwrap();
        assert!(matches!(
            h.refresh(&login.tokens.refresh_token).await,
            Err(AuthError::InvalidRefreshToken)
        ));

        // Cleared entirely
        h.repo.clear_refresh_token_data(&user_id).await.unwrap();
        assert!(matches!(
            h.refresh(&login.tokens.refresh_token).await,
            Err(AuthError::InvalidRefreshToken)
        ));
    }

    #[tokio::test]
    async fn test_refresh_rejects_rotated_salt() {
        let mut h = Harness::new();
        let login = h.verified_login("a@x.com").await;

        h.repo
            .update_token_salt(&login.user.user_id, &TokenSalt::generate())
            .await
            .unwrap();

        assert!(matches!(
            h.refresh(&login.tokens.refresh_token).await,
            Err(AuthError::InvalidRefreshToken)
        ));
    }
}

#[cfg(test)]
mod session_tests {
    use super::support::*;
    use crate::application::{CurrentUserUseCase, LogoutUseCase};
    use crate::domain::repository::UserRepository;
    use crate::domain::value_object::user_id::UserId;
    use crate::error::AuthError;

    #[tokio::test]
    async fn test_authenticate_resolves_identity() {
        let mut h = Harness::new();
        let login = h.verified_login("a@x.com").await;

        let current = h.authenticate(&login.tokens.access_token).await.unwrap();
        assert_eq!(current.user_id, login.user.user_id);
        assert_eq!(current.email.as_str(), "a@x.com");

        let user = CurrentUserUseCase::new(h.repo.clone())
            .execute(&current.user_id)
            .await
            .unwrap();
        assert!(user.is_verified);
    }

    #[tokio::test]
    async fn test_logout_revokes_everything() {
        let mut h = Harness::new();
        let login = h.verified_login("a@x.com").await;

        LogoutUseCase::new(h.repo.clone())
            .execute(&login.user.user_id)
            .await
            .unwrap();

        assert!(matches!(
            h.authenticate(&login.tokens.access_token).await,
            Err(AuthError::InvalidToken)
        ));
        assert!(matches!(
            h.refresh(&login.tokens.refresh_token).await,
            Err(AuthError::InvalidRefreshToken)
        ));

        let user = h.repo.find_by_id(&login.user.user_id).await.unwrap().unwrap();
        assert!(user.refresh_token.is_none());

        // A fresh login works again
        assert!(h.login("a@x.com", PASSWORD).await.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let h = Harness::new();
        assert!(matches!(
            LogoutUseCase::new(h.repo.clone()).execute(&UserId::new()).await,
            Err(AuthError::UserNotFound)
        ));
        assert!(matches!(
            CurrentUserUseCase::new(h.repo.clone()).execute(&UserId::new()).await,
            Err(AuthError::UserNotFound)
        ));
        assert!(matches!(h.authenticate("garbage").await, Err(AuthError::InvalidToken)));
    }
}

#[cfg(test)]
mod router_tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::{AuthAppState, AuthConfig, ChannelMailer, MemoryUserRepository, auth_router};

    async fn call(app: &axum::Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn app() -> axum::Router {
        let (mailer, _inbox) = ChannelMailer::channel();
        let state = AuthAppState::new(
            MemoryUserRepository::new(),
            AuthConfig::development(),
            Arc::new(mailer),
        );
        auth_router(state)
    }

    #[tokio::test]
    async fn test_missing_fields_are_bad_request() {
        let app = app();
        let (status, body) = call(&app, post("/register", json!({"email": "a@x.com"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["field"], "name");
    }

    #[tokio::test]
    async fn test_malformed_bodies_are_json_bad_requests() {
        let app = app();

        let wrong_type = json!({
            "name": 1,
            "email": "a@x.com",
            "phone": "555",
            "password": "Abcdef1!"
        });
        let (status, body) = call(&app, post("/register", wrong_type)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
        assert_eq!(body["error"], "Bad Request");

        let req = Request::post("/login")
            .body(Body::from(r#"{"email":"a@x.com","password":"x"}"#))
            .unwrap();
        let (status, body) = call(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("Content-Type"));

        let req = Request::post("/refresh-token")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = call(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
    }

    #[tokio::test]
    async fn test_protected_routes_need_bearer() {
        let app = app();

        let (status, body) = call(&app, Request::get("/me").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Missing auth token");

        let req = Request::get("/me")
            .header(header::AUTHORIZATION, "Bearer nope")
            .body(Body::empty())
            .unwrap();
        let (status, body) = call(&app, req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid or expired token");
    }

    #[tokio::test]
    async fn test_verify_accepts_query_or_body() {
        let app = app();

        let (status, body) = call(&app, post("/verify", json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Verification token required");

        let req = Request::post("/verify?token=unknown").body(Body::empty()).unwrap();
        let (status, body) = call(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid or expired token");
    }
}
