//! Unit tests for auth crate
//!
//! Use cases are driven through an in-memory `UserRepository`, so the
//! register/login flows are exercised without a database.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use kernel::id::UserId;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::application::{
    GetProfileUseCase, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase,
};
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_password::UserPassword};
use crate::error::{AuthError, AuthResult};

// ============================================================================
// In-memory repository
// ============================================================================

#[derive(Clone)]
struct MemoryUsers {
    users: Arc<Mutex<HashMap<Uuid, (User, UserPassword)>>>,
    // When set, `exists_by_email` reports no match so `create` has to
    // enforce uniqueness itself, like the database constraint does when
    // two registrations race past the pre-insert check
    blind_exists_check: bool,
}

impl MemoryUsers {
    fn new() -> Self {
        Self {
            users: Arc::new(Mutex::new(HashMap::new())),
            blind_exists_check: false,
        }
    }

    fn with_blind_exists_check() -> Self {
        Self {
            blind_exists_check: true,
            ..Self::new()
        }
    }
}

impl UserRepository for MemoryUsers {
    async fn create(&self, user: &User, password_hash: &UserPassword) -> AuthResult<()> {
        let mut users = self.users.lock().unwrap();

        if users
            .values()
            .any(|(u, _)| u.email.as_str() == user.email.as_str())
        {
            return Err(AuthError::EmailTaken);
        }

        users.insert(*user.user_id.as_uuid(), (user.clone(), password_hash.clone()));
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .get(user_id.as_uuid())
            .map(|(u, _)| u.clone()))
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|(u, _)| u.email.as_str() == email.as_str())
            .map(|(u, _)| u.clone()))
    }

    async fn find_credentials(&self, email: &Email) -> AuthResult<Option<(User, UserPassword)>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|(u, _)| u.email.as_str() == email.as_str())
            .cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        if self.blind_exists_check {
            return Ok(false);
        }
        Ok(self.find_by_email(email).await?.is_some())
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn config() -> Arc<AuthConfig> {
    Arc::new(AuthConfig::with_random_secret())
}

fn register_input(email: &str) -> RegisterInput {
    RegisterInput {
        user_name: "alice".into(),
        email: email.into(),
        password: "pw123456".into(),
    }
}

// ============================================================================
// Register
// ============================================================================

#[tokio::test]
async fn test_register_persists_user_and_issues_valid_token() {
    let repo = Arc::new(MemoryUsers::new());
    let config = config();

    let register = RegisterUseCase::new(repo.clone(), config.clone());
    let output = register
        .execute(register_input("Alice@Example.COM"))
        .await
        .unwrap();

    // Email is normalized at the boundary
    assert_eq!(output.user.email.as_str(), "alice@example.com");
    assert_eq!(output.user.user_name.as_str(), "alice");

    // The token is bound to the stored user
    let tokens = TokenService::new(config);
    assert_eq!(tokens.verify(&output.token).unwrap(), output.user.user_id);

    // The repository sees the user under the normalized email
    let found = repo
        .find_by_email(&Email::new("alice@example.com").unwrap())
        .await
        .unwrap()
        .expect("user should be stored");
    assert_eq!(found.user_id, output.user.user_id);
}

#[tokio::test]
async fn test_register_duplicate_email_fails_on_second_attempt() {
    let repo = Arc::new(MemoryUsers::new());
    let register = RegisterUseCase::new(repo, config());

    register
        .execute(register_input("alice@example.com"))
        .await
        .unwrap();

    let err = register
        .execute(register_input("alice@example.com"))
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::EmailTaken));
}

#[tokio::test]
async fn test_register_race_is_caught_by_create() {
    // The pre-insert exists check misses, so the uniqueness enforcement
    // inside `create` has to surface EmailTaken instead
    let repo = Arc::new(MemoryUsers::with_blind_exists_check());
    let register = RegisterUseCase::new(repo, config());

    register
        .execute(register_input("alice@example.com"))
        .await
        .unwrap();

    let err = register
        .execute(register_input("alice@example.com"))
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::EmailTaken));
}

#[tokio::test]
async fn test_register_rejects_invalid_input_as_validation() {
    let repo = Arc::new(MemoryUsers::new());
    let register = RegisterUseCase::new(repo.clone(), config());

    let err = register
        .execute(RegisterInput {
            user_name: "alice".into(),
            email: "alice@example.com".into(),
            password: "short".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Validation(_)));

    let err = register
        .execute(RegisterInput {
            user_name: "alice".into(),
            email: "not-an-email".into(),
            password: "pw123456".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Validation(_)));

    // Nothing was persisted
    assert!(repo.users.lock().unwrap().is_empty());
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_register_then_login_round_trip() {
    let repo = Arc::new(MemoryUsers::new());
    let config = config();

    let register = RegisterUseCase::new(repo.clone(), config.clone());
    let registered = register
        .execute(register_input("alice@example.com"))
        .await
        .unwrap();

    let login = LoginUseCase::new(repo, config.clone());
    let output = login
        .execute(LoginInput {
            email: "alice@example.com".into(),
            password: "pw123456".into(),
        })
        .await
        .unwrap();

    assert_eq!(output.user.user_id, registered.user.user_id);

    let tokens = TokenService::new(config);
    assert_eq!(tokens.verify(&output.token).unwrap(), output.user.user_id);
}

#[tokio::test]
async fn test_login_unknown_email_is_invalid_credentials() {
    let repo = Arc::new(MemoryUsers::new());
    let login = LoginUseCase::new(repo, config());

    let err = login
        .execute(LoginInput {
            email: "nobody@example.com".into(),
            password: "pw123456".into(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::InvalidCredentials));
}

#[tokio::test]
async fn test_login_wrong_password_is_invalid_credentials() {
    let repo = Arc::new(MemoryUsers::new());
    let config = config();

    let register = RegisterUseCase::new(repo.clone(), config.clone());
    register
        .execute(register_input("alice@example.com"))
        .await
        .unwrap();

    let login = LoginUseCase::new(repo, config);
    let err = login
        .execute(LoginInput {
            email: "alice@example.com".into(),
            password: "pw654321".into(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::InvalidCredentials));
}

#[tokio::test]
async fn test_login_malformed_email_is_invalid_credentials() {
    // A malformed identifier must be indistinguishable from a wrong one
    let repo = Arc::new(MemoryUsers::new());
    let login = LoginUseCase::new(repo, config());

    let err = login
        .execute(LoginInput {
            email: "not-an-email".into(),
            password: "pw123456".into(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::InvalidCredentials));
}

// ============================================================================
// Profile
// ============================================================================

#[tokio::test]
async fn test_profile_of_registered_user() {
    let repo = Arc::new(MemoryUsers::new());

    let register = RegisterUseCase::new(repo.clone(), config());
    let registered = register
        .execute(register_input("alice@example.com"))
        .await
        .unwrap();

    let profile = GetProfileUseCase::new(repo);
    let user = profile.execute(&registered.user.user_id).await.unwrap();

    assert_eq!(user.email.as_str(), "alice@example.com");
}

#[tokio::test]
async fn test_profile_of_unknown_user_is_not_found() {
    let repo = Arc::new(MemoryUsers::new());

    let profile = GetProfileUseCase::new(repo);
    let err = profile.execute(&UserId::new()).await.unwrap_err();

    assert!(matches!(err, AuthError::UserNotFound));
}
