use axum::{async_trait, http::HeaderMap};
use lazy_static::lazy_static;
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{debug, error, warn};

use super::credentials::basic_credentials;
use super::password::{hash_password, verify_password_blocking};
use crate::users::repo_types::User;

/// Finds the account a Basic-auth identifier refers to.
#[async_trait]
pub trait UserLookup: Send + Sync {
    async fn user_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
}

#[async_trait]
impl UserLookup for SqlitePool {
    async fn user_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        Ok(User::find_by_email(self, email).await?)
    }
}

/// Why a request was turned away. Only ever logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    MissingCredentials,
    UnknownIdentifier,
    BadSecret,
}

impl Rejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rejection::MissingCredentials => "missing credentials",
            Rejection::UnknownIdentifier => "unknown identifier",
            Rejection::BadSecret => "bad secret",
        }
    }
}

#[derive(Debug, Error)]
pub enum GuardError {
    #[error("authentication rejected: {}", .0.as_str())]
    Rejected(Rejection),
    #[error(transparent)]
    Lookup(#[from] anyhow::Error),
}

lazy_static! {
    // Verified against when the identifier is unknown, so both failure
    // paths pay for one Argon2 verification.
    static ref DUMMY_HASH: String = hash_password("not-a-real-account").unwrap_or_default();
}

/// Resolve the user behind the request's Basic credentials.
pub async fn authenticate(
    lookup: &dyn UserLookup,
    headers: &HeaderMap,
) -> Result<User, GuardError> {
    let Some(creds) = basic_credentials(headers) else {
        warn!(reason = Rejection::MissingCredentials.as_str(), "authentication rejected");
        return Err(GuardError::Rejected(Rejection::MissingCredentials));
    };

    let Some(user) = lookup.user_by_email(&creds.email).await? else {
        let _ = verify_password_blocking(creds.password, DUMMY_HASH.clone()).await;
        warn!(
            reason = Rejection::UnknownIdentifier.as_str(),
            email = %creds.email,
            "authentication rejected"
        );
        return Err(GuardError::Rejected(Rejection::UnknownIdentifier));
    };

    let matches = match verify_password_blocking(creds.password, user.password.clone()).await {
        Ok(v) => v,
        Err(e) => {
            error!(error = %e, user_id = user.id, "stored password digest unusable");
            false
        }
    };
    if !matches {
        warn!(
            reason = Rejection::BadSecret.as_str(),
            user_id = user.id,
            "authentication rejected"
        );
        return Err(GuardError::Rejected(Rejection::BadSecret));
    }

    debug!(user_id = user.id, "authenticated");
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header::AUTHORIZATION, HeaderValue};
    use base64::{engine::general_purpose::STANDARD, Engine};
    use time::OffsetDateTime;

    struct FakeLookup {
        user: Option<User>,
        fail: bool,
    }

    #[async_trait]
    impl UserLookup for FakeLookup {
        async fn user_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
            if self.fail {
                anyhow::bail!("store unavailable");
            }
            Ok(self
                .user
                .clone()
                .filter(|u| u.email_address == email))
        }
    }

    fn user_with_password(password: &str) -> User {
        let now = OffsetDateTime::now_utc();
        User {
            id: 7,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email_address: "ada@example.com".into(),
            password: hash_password(password).unwrap(),
            created_at: now,
            updated_at: now,
        }
    }

    fn basic(email: &str, password: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let value = format!("Basic {}", STANDARD.encode(format!("{email}:{password}")));
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&value).unwrap());
        headers
    }

    fn lookup() -> FakeLookup {
        FakeLookup {
            user: Some(user_with_password("secret")),
            fail: false,
        }
    }

    #[tokio::test]
    async fn accepts_matching_credentials() {
        let user = authenticate(&lookup(), &basic("ada@example.com", "secret"))
            .await
            .expect("authenticated");
        assert_eq!(user.id, 7);
    }

    #[tokio::test]
    async fn rejects_missing_header() {
        let err = authenticate(&lookup(), &HeaderMap::new()).await.unwrap_err();
        assert!(matches!(err, GuardError::Rejected(Rejection::MissingCredentials)));
    }

    #[tokio::test]
    async fn rejects_unknown_identifier() {
        let err = authenticate(&lookup(), &basic("nobody@example.com", "secret"))
            .await
            .unwrap_err();
        assert!(matches!(err, GuardError::Rejected(Rejection::UnknownIdentifier)));
    }

    #[tokio::test]
    async fn rejects_bad_secret() {
        let err = authenticate(&lookup(), &basic("ada@example.com", "wrong"))
            .await
            .unwrap_err();
        assert!(matches!(err, GuardError::Rejected(Rejection::BadSecret)));
    }

    #[tokio::test]
    async fn corrupt_digest_is_a_bad_secret() {
        let mut user = user_with_password("secret");
        user.password = "plaintext".into();
        let lookup = FakeLookup { user: Some(user), fail: false };
        let err = authenticate(&lookup, &basic("ada@example.com", "plaintext"))
            .await
            .unwrap_err();
        assert!(matches!(err, GuardError::Rejected(Rejection::BadSecret)));
    }

    #[tokio::test]
    async fn lookup_failures_are_not_rejections() {
        let lookup = FakeLookup { user: None, fail: true };
        let err = authenticate(&lookup, &basic("ada@example.com", "secret"))
            .await
            .unwrap_err();
        assert!(matches!(err, GuardError::Lookup(_)));
    }
}
