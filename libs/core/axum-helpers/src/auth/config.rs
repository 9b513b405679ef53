use core_config::{ConfigError, FromEnv, env_parse_or, env_required};

use super::jwt::DEFAULT_TOKEN_TTL;

/// Minimum accepted length of the signing secret
pub const MIN_SECRET_LEN: usize = 32;

/// JWT authentication configuration.
///
/// Loaded from environment variables:
/// - `JWT_SECRET` (required) - at least 32 characters
/// - `JWT_TTL_SECS` (optional, default: 3600) - lifetime of issued tokens
#[derive(Clone)]
pub struct JwtConfig {
    /// HS256 signing secret
    pub secret: String,
    /// Lifetime of issued tokens in seconds
    pub ttl_secs: i64,
}

impl JwtConfig {
    /// Create a config with the default token lifetime.
    ///
    /// # Panics
    /// Panics if the secret is shorter than [`MIN_SECRET_LEN`].
    pub fn new(secret: impl Into<String>) -> Self {
        let secret = secret.into();
        assert!(
            secret.len() >= MIN_SECRET_LEN,
            "JWT secret must be at least 32 characters"
        );
        Self {
            secret,
            ttl_secs: DEFAULT_TOKEN_TTL,
        }
    }

    pub fn with_ttl_secs(mut self, ttl_secs: i64) -> Self {
        self.ttl_secs = ttl_secs;
        self
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("ttl_secs", &self.ttl_secs)
            .finish()
    }
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret = env_required("JWT_SECRET")?;

        if secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::ParseError {
                key: "JWT_SECRET".to_string(),
                details: format!(
                    "must be at least {MIN_SECRET_LEN} characters (got {})",
                    secret.len()
                ),
            });
        }

        Ok(Self {
            secret,
            ttl_secs: env_parse_or("JWT_TTL_SECS", DEFAULT_TOKEN_TTL)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "an-events-api-secret-of-32-chars!!";

    #[test]
    fn test_jwt_config_new() {
        let config = JwtConfig::new(SECRET);
        assert_eq!(config.secret, SECRET);
        assert_eq!(config.ttl_secs, DEFAULT_TOKEN_TTL);
    }

    #[test]
    #[should_panic(expected = "JWT secret must be at least 32 characters")]
    fn test_jwt_config_new_too_short() {
        JwtConfig::new("short");
    }

    #[test]
    fn test_jwt_config_from_env() {
        temp_env::with_vars(
            [("JWT_SECRET", Some(SECRET)), ("JWT_TTL_SECS", Some("60"))],
            || {
                let config = JwtConfig::from_env().unwrap();
                assert_eq!(config.secret, SECRET);
                assert_eq!(config.ttl_secs, 60);
            },
        );
    }

    #[test]
    fn test_jwt_config_debug_hides_secret() {
        let debug = format!("{:?}", JwtConfig::new(SECRET));
        assert!(!debug.contains(SECRET));
    }

    #[test]
    fn test_jwt_config_from_env_missing() {
        temp_env::with_var_unset("JWT_SECRET", || {
            let err = JwtConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("JWT_SECRET"));
        });
    }

    #[test]
    fn test_jwt_config_from_env_too_short() {
        temp_env::with_vars(
            [("JWT_SECRET", Some("short")), ("JWT_TTL_SECS", None)],
            || {
                let err = JwtConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("32 characters"));
            },
        );
    }
}
