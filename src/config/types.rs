//! Configuration types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Text-generation provider kind.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Huggingface,
    Ollama,
}

/// Decoding policy applied to every generation request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GenerationConfig {
    /// Cap on newly generated tokens.
    pub max_new_tokens: u32,
    /// Block repeated n-grams of this size (providers without the control
    /// fall back to their nearest repetition penalty).
    pub no_repeat_ngram_size: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_new_tokens: 100,
            no_repeat_ngram_size: 2,
        }
    }
}

/// Configuration for the generative model adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Provider to use (huggingface or ollama).
    #[serde(default)]
    pub provider: ProviderKind,
    /// Model identifier resolved by the provider.
    #[serde(default = "default_model")]
    pub model: String,
    /// Base URL for the provider API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Environment variable holding the API token (hosted providers only).
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Decoding policy.
    #[serde(default)]
    pub generation: GenerationConfig,
}

fn default_model() -> String {
    "gpt2".to_string()
}

fn default_base_url() -> String {
    "https://api-inference.huggingface.co".to_string()
}

fn default_api_key_env() -> String {
    "HF_API_TOKEN".to_string()
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            model: default_model(),
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            generation: GenerationConfig::default(),
        }
    }
}

/// Top-level bot configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Path to the JSON intents file.
    pub knowledge_base: PathBuf,
    /// Generative model settings.
    pub model: ModelConfig,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            knowledge_base: PathBuf::from("intents.json"),
            model: ModelConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_config_defaults() {
        let config = ModelConfig::default();
        assert_eq!(config.provider, ProviderKind::Huggingface);
        assert_eq!(config.model, "gpt2");
        assert_eq!(config.base_url, "https://api-inference.huggingface.co");
        assert_eq!(config.api_key_env, "HF_API_TOKEN");
        assert_eq!(config.generation.max_new_tokens, 100);
        assert_eq!(config.generation.no_repeat_ngram_size, 2);
    }

    #[test]
    fn test_bot_config_default_knowledge_base() {
        let config = BotConfig::default();
        assert_eq!(config.knowledge_base, PathBuf::from("intents.json"));
    }

    #[test]
    fn test_model_config_deserialize_ollama() {
        let toml = r#"
            provider = "ollama"
            model = "llama3"
            base_url = "http://localhost:11434"
        "#;
        let config: ModelConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.provider, ProviderKind::Ollama);
        assert_eq!(config.model, "llama3");
        assert_eq!(config.base_url, "http://localhost:11434");
        // Decoding policy keeps its defaults when not set.
        assert_eq!(config.generation.max_new_tokens, 100);
    }

    #[test]
    fn test_bot_config_deserialize_full() {
        let toml = r#"
            knowledge_base = "data/intents.json"

            [model]
            provider = "huggingface"
            model = "distilgpt2"

            [model.generation]
            max_new_tokens = 64
            no_repeat_ngram_size = 3
        "#;
        let config: BotConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.knowledge_base, PathBuf::from("data/intents.json"));
        assert_eq!(config.model.model, "distilgpt2");
        assert_eq!(config.model.generation.max_new_tokens, 64);
        assert_eq!(config.model.generation.no_repeat_ngram_size, 3);
    }
}
