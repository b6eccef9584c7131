use error_stack::{Report, ResultExt};
use kernel::KernelError;
use time::Duration;
use vodca::References;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Settings read from the environment, a `.env` file included.
#[derive(References)]
pub struct AppConfig {
    port: u16,
    jwt_private_key: String,
    token_ttl: Duration,
}

impl AppConfig {
    pub fn from_env() -> error_stack::Result<Self, KernelError> {
        let jwt_private_key = dotenvy::var("JWT_PRIVATE_KEY")
            .change_context_lazy(|| KernelError::Internal)
            .attach_printable("FATAL ERROR: JWT_PRIVATE_KEY is not defined")?;
        if jwt_private_key.is_empty() {
            return Err(Report::new(KernelError::Internal)
                .attach_printable("FATAL ERROR: JWT_PRIVATE_KEY is empty"));
        }
        let port = parse_or("PORT", DEFAULT_PORT)?;
        let token_ttl = Duration::hours(parse_or("TOKEN_TTL_HOURS", DEFAULT_TOKEN_TTL_HOURS)?);

        Ok(Self {
            port,
            jwt_private_key,
            token_ttl,
        })
    }
}

fn parse_or<T>(key: &str, default: T) -> error_stack::Result<T, KernelError>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match dotenvy::var(key) {
        Ok(value) => value
            .parse::<T>()
            .change_context_lazy(|| KernelError::Internal)
            .attach_printable_lazy(|| format!("{key} has an invalid value: {value}")),
        Err(_) => Ok(default),
    }
}
