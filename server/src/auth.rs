use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};
use error_stack::{Report, ResultExt};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use kernel::KernelError;
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::error::ErrorStatus;
use crate::handler::{AppModule, Modules};

pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub sub: Uuid,
    pub is_admin: bool,
    pub iat: i64,
    pub exp: i64,
}

/// Signs and verifies HS256 tokens with the `JWT_PRIVATE_KEY` secret.
pub struct TokenAuthority {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenAuthority {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
            ttl,
        }
    }

    pub fn issue(
        &self,
        subject: Uuid,
        is_admin: bool,
        issued_at: OffsetDateTime,
    ) -> error_stack::Result<String, KernelError> {
        let claims = Claims {
            sub: subject,
            is_admin,
            iat: issued_at.unix_timestamp(),
            exp: (issued_at + self.ttl).unix_timestamp(),
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .change_context_lazy(|| KernelError::Internal)
            .attach_printable("Failed to sign token")
    }

    pub fn verify(&self, token: &str) -> error_stack::Result<Claims, KernelError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .change_context_lazy(|| KernelError::Unauthorized)
            .attach_printable("Invalid token.")
    }
}

// `x-auth-token` wins over `Authorization: Bearer`.
fn token_from(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTH_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(ToOwned::to_owned)
        .or_else(|| {
            headers
                .typed_get::<Authorization<Bearer>>()
                .map(|authorization| authorization.token().to_owned())
        })
}

/// Claims of the caller. Extracting it rejects the request with 401 unless a
/// valid token is present.
#[derive(Debug, Clone)]
pub struct Authenticated(pub Claims);

#[axum::async_trait]
impl<M: Modules> FromRequestParts<AppModule<M>> for Authenticated {
    type Rejection = ErrorStatus;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppModule<M>,
    ) -> Result<Self, Self::Rejection> {
        let token = token_from(&parts.headers).ok_or_else(|| {
            Report::new(KernelError::Unauthorized)
                .attach_printable("Access denied. No token provided.")
        })?;
        let claims = state.authority().verify(&token)?;
        tracing::debug!("Authenticated {}", claims.sub);
        Ok(Authenticated(claims))
    }
}

#[cfg(test)]
mod test {
    use axum::http::{HeaderMap, HeaderValue};
    use kernel::KernelError;
    use time::{Duration, OffsetDateTime};
    use uuid::Uuid;

    use crate::auth::{token_from, TokenAuthority, AUTH_TOKEN_HEADER};

    #[test]
    fn issued_token_verifies() {
        let authority = TokenAuthority::new(b"secret", Duration::hours(1));
        let subject = Uuid::new_v4();

        let token = authority
            .issue(subject, true, OffsetDateTime::now_utc())
            .unwrap();
        let claims = authority.verify(&token).unwrap();

        assert_eq!(claims.sub, subject);
        assert!(claims.is_admin);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn expired_token_is_rejected() {
        let authority = TokenAuthority::new(b"secret", Duration::hours(1));
        let token = authority
            .issue(
                Uuid::new_v4(),
                false,
                OffsetDateTime::now_utc() - Duration::days(1),
            )
            .unwrap();

        let error = authority.verify(&token).unwrap_err();
        assert_eq!(error.current_context(), &KernelError::Unauthorized);
    }

    #[test]
    fn foreign_signature_is_rejected() {
        let issuer = TokenAuthority::new(b"other", Duration::hours(1));
        let authority = TokenAuthority::new(b"secret", Duration::hours(1));
        let token = issuer
            .issue(Uuid::new_v4(), false, OffsetDateTime::now_utc())
            .unwrap();

        assert!(authority.verify(&token).is_err());
        assert!(authority.verify("a").is_err());
    }

    #[test]
    fn token_is_read_from_either_header() {
        let mut headers = HeaderMap::new();
        assert_eq!(token_from(&headers), None);

        headers.insert("authorization", HeaderValue::from_static("Bearer abc"));
        assert_eq!(token_from(&headers).as_deref(), Some("abc"));

        headers.insert(AUTH_TOKEN_HEADER, HeaderValue::from_static("xyz"));
        assert_eq!(token_from(&headers).as_deref(), Some("xyz"));

        headers.insert(AUTH_TOKEN_HEADER, HeaderValue::from_static(""));
        assert_eq!(token_from(&headers).as_deref(), Some("abc"));
    }
}
