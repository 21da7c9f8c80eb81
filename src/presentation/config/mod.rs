mod settings;

pub use settings::{
    AuthSettings, DatabaseSettings, GoogleSettings, LlmSettings, S3Settings, ServerSettings,
    Settings, StorageSettings,
};
