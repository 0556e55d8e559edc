mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    AssetSettings, LimitSettings, LlmSettings, LoggingSettings, OcrProvider, OcrSettings,
    ServerSettings, Settings, SettingsError,
};
