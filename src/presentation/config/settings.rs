use std::time::Duration;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub storage: StorageSettings,
    pub google: GoogleSettings,
    pub llm: LlmSettings,
    pub auth: AuthSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub local_path: String,
    pub s3: Option<S3Settings>,
}

#[derive(Debug, Clone)]
pub struct S3Settings {
    pub bucket: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
}

/// One key covers both Speech-to-Text and Translate. When absent, both
/// fall back to their LLM-backed providers.
#[derive(Debug, Clone)]
pub struct GoogleSettings {
    pub api_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub token_ttl_days: i64,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        let server = ServerSettings {
            host: env_or("HOST", "0.0.0.0"),
            port: env_parsed("PORT", 5000)?,
        };

        let database = DatabaseSettings {
            url: std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            max_connections: env_parsed("DATABASE_MAX_CONNECTIONS", 10)?,
        };

        // S3 is opt-in: all three variables must be present, otherwise
        // everything stays on local disk.
        let s3 = match (
            env_opt("AWS_ACCESS_KEY_ID"),
            env_opt("AWS_SECRET_ACCESS_KEY"),
            env_opt("S3_BUCKET_NAME"),
        ) {
            (Some(access_key_id), Some(secret_access_key), Some(bucket)) => Some(S3Settings {
                bucket,
                region: env_or("AWS_REGION", "ap-south-1"),
                access_key_id,
                secret_access_key,
            }),
            _ => None,
        };

        let storage = StorageSettings {
            local_path: env_or("UPLOADS_DIR", "uploads"),
            s3,
        };

        let google = GoogleSettings {
            api_key: env_opt("GOOGLE_CLOUD_API_KEY"),
        };

        let llm = LlmSettings {
            base_url: env_or("OLLAMA_BASE_URL", "http://localhost:11434"),
            model: env_or("OLLAMA_MODEL", "llama3:latest"),
            timeout: Duration::from_secs(env_parsed("OLLAMA_TIMEOUT_SECS", 120)?),
        };

        let auth = AuthSettings {
            jwt_secret: std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            token_ttl_days: env_parsed("TOKEN_TTL_DAYS", 7)?,
        };

        Ok(Self {
            server,
            database,
            storage,
            google,
            llm,
            auth,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    env_opt(key).unwrap_or_else(|| default.to_string())
}

/// Present and non-empty after trimming, or None.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_parsed<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env_opt(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Invalid value for {}", key)),
        None => Ok(default),
    }
}
