use std::str::FromStr;

use super::Environment;

const DEFAULT_MODEL: &str = "gpt-4.1-mini";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub ocr: OcrSettings,
    pub assets: AssetSettings,
    pub limits: LimitSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OcrProvider {
    Azure,
    Mock,
}

#[derive(Debug, Clone)]
pub struct OcrSettings {
    pub provider: OcrProvider,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AssetSettings {
    /// Path to the schema xlsx (display name, mapping key, instruction).
    pub schema_path: String,
    /// Path to the fillable PDF template.
    pub template_path: String,
}

#[derive(Debug, Clone)]
pub struct LimitSettings {
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("required environment variable {0} is missing")]
    MissingVar(&'static str),
    #[error("environment variable {name} has invalid value: {message}")]
    InvalidVar { name: &'static str, message: String },
}

impl Settings {
    /// Assemble settings from environment variables, with local-friendly
    /// defaults for everything except the extraction-service API key.
    pub fn from_env() -> Result<Self, SettingsError> {
        let environment: Environment = optional("APP_ENV")
            .map(|v| {
                Environment::from_str(&v).map_err(|message| SettingsError::InvalidVar {
                    name: "APP_ENV",
                    message,
                })
            })
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            server: ServerSettings {
                host: optional("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: parsed("SERVER_PORT")?.unwrap_or(3000),
            },
            llm: LlmSettings {
                api_key: optional("OPENAI_API_KEY")
                    .ok_or(SettingsError::MissingVar("OPENAI_API_KEY"))?,
                model: optional("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                base_url: optional("OPENAI_BASE_URL"),
                timeout_secs: parsed("OPENAI_TIMEOUT_SECS")?.unwrap_or(DEFAULT_LLM_TIMEOUT_SECS),
            },
            ocr: OcrSettings {
                provider: match optional("OCR_PROVIDER").as_deref() {
                    None | Some("azure") => OcrProvider::Azure,
                    Some("mock") => OcrProvider::Mock,
                    Some(other) => {
                        return Err(SettingsError::InvalidVar {
                            name: "OCR_PROVIDER",
                            message: format!("unknown provider {other:?}"),
                        });
                    }
                },
                endpoint: optional("OCR_ENDPOINT"),
                api_key: optional("OCR_API_KEY"),
            },
            assets: AssetSettings {
                schema_path: optional("SCHEMA_PATH")
                    .unwrap_or_else(|| "assets/schema.xlsx".to_string()),
                template_path: optional("TEMPLATE_PATH")
                    .unwrap_or_else(|| "assets/template.pdf".to_string()),
            },
            limits: LimitSettings {
                max_upload_bytes: parsed("MAX_UPLOAD_BYTES")?.unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            },
            logging: LoggingSettings {
                level: optional("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
                enable_json: environment == Environment::Prod
                    || optional("LOG_JSON").as_deref() == Some("true"),
            },
        })
    }
}

fn optional(name: &'static str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn parsed<T: FromStr>(name: &'static str) -> Result<Option<T>, SettingsError>
where
    T::Err: std::fmt::Display,
{
    optional(name)
        .map(|v| {
            v.parse().map_err(|e: T::Err| SettingsError::InvalidVar {
                name,
                message: e.to_string(),
            })
        })
        .transpose()
}
