//! Integration tests for the model adapter against mocked provider HTTP APIs.

use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use zedbot::config::{ModelConfig, ProviderKind};
use zedbot::model::{ModelAdapter, ModelError};

fn ollama_config(base_url: String) -> ModelConfig {
    ModelConfig {
        provider: ProviderKind::Ollama,
        model: "llama3".to_string(),
        base_url,
        ..ModelConfig::default()
    }
}

#[tokio::test]
async fn test_ollama_load_and_generate() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "models": [{"name": "llama3:latest"}]
        })))
        .mount(&server)
        .await;

    // The mock only answers when the bounded decoding options are sent.
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(serde_json::json!({
            "model": "llama3",
            "stream": false,
            "options": {"num_predict": 100}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "model": "llama3",
            "response": "Quantum tunneling lets particles cross barriers.",
            "done": true
        })))
        .mount(&server)
        .await;

    let adapter = ModelAdapter::load(&ollama_config(server.uri())).await;
    assert!(adapter.is_available());

    let text = adapter.generate("explain quantum tunneling").await.unwrap();
    assert_eq!(text, "Quantum tunneling lets particles cross barriers.");
}

#[tokio::test]
async fn test_ollama_missing_model_degrades_to_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "models": [{"name": "mistral:latest"}]
        })))
        .mount(&server)
        .await;

    let adapter = ModelAdapter::load(&ollama_config(server.uri())).await;
    assert!(!adapter.is_available());
    assert!(matches!(
        adapter.generate("hello").await,
        Err(ModelError::Unavailable)
    ));
}

#[tokio::test]
async fn test_ollama_unreachable_server_degrades_to_unavailable() {
    let adapter = ModelAdapter::load(&ollama_config("http://127.0.0.1:1".to_string())).await;
    assert!(!adapter.is_available());
}

#[tokio::test]
async fn test_huggingface_load_and_generate() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/status/gpt2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "loaded": true
        })))
        .mount(&server)
        .await;

    // The mock only answers when the bounded decoding policy is sent:
    // cap of 100 new tokens and the no-repeat bigram constraint.
    Mock::given(method("POST"))
        .and(path("/models/gpt2"))
        .and(body_partial_json(serde_json::json!({
            "parameters": {
                "max_new_tokens": 100,
                "no_repeat_ngram_size": 2,
                "return_full_text": false
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"generated_text": " a strange but real effect."}
        ])))
        .mount(&server)
        .await;

    std::env::set_var("ZEDBOT_TEST_HF_TOKEN_OK", "hf_test");
    let config = ModelConfig {
        provider: ProviderKind::Huggingface,
        model: "gpt2".to_string(),
        base_url: server.uri(),
        api_key_env: "ZEDBOT_TEST_HF_TOKEN_OK".to_string(),
        ..ModelConfig::default()
    };

    let adapter = ModelAdapter::load(&config).await;
    assert!(adapter.is_available());

    let text = adapter.generate("quantum tunneling is").await.unwrap();
    assert_eq!(text, " a strange but real effect.");
    std::env::remove_var("ZEDBOT_TEST_HF_TOKEN_OK");
}

#[tokio::test]
async fn test_huggingface_generation_failure_surfaces() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/status/gpt2"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/models/gpt2"))
        .respond_with(ResponseTemplate::new(503).set_body_string("model overloaded"))
        .mount(&server)
        .await;

    std::env::set_var("ZEDBOT_TEST_HF_TOKEN_ERR", "hf_test");
    let config = ModelConfig {
        provider: ProviderKind::Huggingface,
        model: "gpt2".to_string(),
        base_url: server.uri(),
        api_key_env: "ZEDBOT_TEST_HF_TOKEN_ERR".to_string(),
        ..ModelConfig::default()
    };

    let adapter = ModelAdapter::load(&config).await;
    assert!(adapter.is_available());

    // No retry: a single failing request is reported as-is.
    let result = adapter.generate("hello").await;
    assert!(matches!(result, Err(ModelError::RequestFailed(_))));
    std::env::remove_var("ZEDBOT_TEST_HF_TOKEN_ERR");
}

#[tokio::test]
async fn test_huggingface_unknown_model_degrades_to_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/status/no-such-model"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    std::env::set_var("ZEDBOT_TEST_HF_TOKEN_404", "hf_test");
    let config = ModelConfig {
        provider: ProviderKind::Huggingface,
        model: "no-such-model".to_string(),
        base_url: server.uri(),
        api_key_env: "ZEDBOT_TEST_HF_TOKEN_404".to_string(),
        ..ModelConfig::default()
    };

    let adapter = ModelAdapter::load(&config).await;
    assert!(!adapter.is_available());
    std::env::remove_var("ZEDBOT_TEST_HF_TOKEN_404");
}
