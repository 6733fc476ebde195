use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

use crate::error::ConfigError;

pub const SERPAPI_API_KEY: &str = "SERPAPI_API_KEY";
pub const SERPAPI_BASE_URL: &str = "SERPAPI_BASE_URL";
pub const HUGGINGFACE_API_KEY: &str = "HUGGINGFACE_API_KEY";
pub const HUGGINGFACE_API_BASE: &str = "HUGGINGFACE_API_BASE";
pub const LLAMA_MODEL_NAME: &str = "LLAMA_MODEL_NAME";
pub const DEFAULT_TEMPERATURE: &str = "DEFAULT_TEMPERATURE";
pub const DEFAULT_MAX_TOKENS: &str = "DEFAULT_MAX_TOKENS";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub serpapi_api_key: String,
    pub serpapi_base_url: String,
    pub llm_api_key: String,
    pub llm_api_base: String,
    pub model_name: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Config {
    /// Load configuration from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Config, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Every missing required key is
    /// reported at once.
    pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get_env = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let serpapi_api_key = get_env(SERPAPI_API_KEY);
        let llm_api_key = get_env(HUGGINGFACE_API_KEY);

        let mut missing = Vec::new();
        if serpapi_api_key.is_none() {
            missing.push(SERPAPI_API_KEY.to_string());
        }
        if llm_api_key.is_none() {
            missing.push(HUGGINGFACE_API_KEY.to_string());
        }
        let (Some(serpapi_api_key), Some(llm_api_key)) = (serpapi_api_key, llm_api_key) else {
            return Err(ConfigError::Missing(missing));
        };

        let get_env_or_default =
            |key: &str, default: &str| get_env(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            serpapi_api_key,
            serpapi_base_url: get_env_or_default(SERPAPI_BASE_URL, "https://serpapi.com"),
            llm_api_key,
            llm_api_base: get_env_or_default(
                HUGGINGFACE_API_BASE,
                "https://router.huggingface.co/v1",
            ),
            model_name: get_env_or_default(LLAMA_MODEL_NAME, "meta-llama/Llama-3.3-70B-Instruct"),
            temperature: parse_var(DEFAULT_TEMPERATURE, &get_env_or_default(DEFAULT_TEMPERATURE, "0.7"))?,
            max_tokens: parse_var(DEFAULT_MAX_TOKENS, &get_env_or_default(DEFAULT_MAX_TOKENS, "2048"))?,
        })
    }
}

fn parse_var<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key: key.to_string(),
        value: value.to_string(),
    })
}
