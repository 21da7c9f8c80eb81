/// Log output knobs, read once at startup.
pub struct TracingConfig {
    /// Free-form environment label carried in the startup log line.
    pub environment: String,
    /// Emit JSON lines instead of the human-readable format.
    pub json_format: bool,
}

impl TracingConfig {
    pub fn from_env() -> Self {
        Self {
            environment: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            json_format: matches!(
                std::env::var("LOG_FORMAT").as_deref().map(str::trim),
                Ok("json") | Ok("JSON")
            ),
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
