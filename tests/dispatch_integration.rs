//! Integration tests for the dispatch path: intents file -> knowledge base
//! -> dispatcher, with the model adapter disabled.

use std::io::Write;

use rand::rngs::StdRng;
use rand::SeedableRng;

use zedbot::dispatch::{ResponseDispatcher, EMPTY_INPUT_PROMPT};
use zedbot::knowledge::{self, KnowledgeLoad};
use zedbot::model::{ModelAdapter, ModelError};

const INTENTS_JSON: &str = r#"{
  "intents": [
    {
      "tag": "greeting",
      "patterns": ["hello", "hi"],
      "responses": ["Hi there!"]
    },
    {
      "tag": "farewell",
      "patterns": ["bye", "hello again"],
      "responses": ["Goodbye!", "See you!"]
    }
  ]
}"#;

fn load_dispatcher() -> ResponseDispatcher {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{INTENTS_JSON}").unwrap();

    let load = knowledge::load(file.path());
    assert!(matches!(load, KnowledgeLoad::Loaded(_)));

    ResponseDispatcher::with_rng(
        load.into_base(),
        ModelAdapter::Unavailable,
        StdRng::seed_from_u64(99),
    )
}

#[tokio::test]
async fn test_reference_vectors() {
    let mut dispatcher = load_dispatcher();

    // Pattern match, case-insensitive.
    assert_eq!(dispatcher.respond("Hello, bot").await.unwrap(), "Hi there!");

    // Empty input short-circuits to the fixed prompt.
    assert_eq!(dispatcher.respond("").await.unwrap(), EMPTY_INPUT_PROMPT);

    // No match and no model: the error surfaces, no default reply.
    let result = dispatcher.respond("explain quantum tunneling").await;
    assert!(matches!(result, Err(ModelError::Unavailable)));
}

#[tokio::test]
async fn test_earlier_intent_wins() {
    let mut dispatcher = load_dispatcher();

    // "hello again" also matches the farewell intent's second pattern, but
    // the greeting intent comes first in sequence order.
    for _ in 0..20 {
        let reply = dispatcher.respond("hello again").await.unwrap();
        assert_eq!(reply, "Hi there!");
    }
}

#[tokio::test]
async fn test_responses_stay_within_intent_set() {
    let mut dispatcher = load_dispatcher();

    for _ in 0..40 {
        let reply = dispatcher.respond("bye for now").await.unwrap();
        assert!(reply == "Goodbye!" || reply == "See you!");
    }
}

#[tokio::test]
async fn test_degraded_knowledge_base_falls_through() {
    // A malformed intents file degrades to an empty base; with the model
    // unavailable every non-empty input fails, and empty input still gets
    // the fixed prompt.
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{ broken").unwrap();

    let load = knowledge::load(file.path());
    assert!(matches!(load, KnowledgeLoad::Invalid(_)));

    let mut dispatcher = ResponseDispatcher::with_rng(
        load.into_base(),
        ModelAdapter::Unavailable,
        StdRng::seed_from_u64(0),
    );

    assert!(dispatcher.respond("hello").await.is_err());
    assert_eq!(dispatcher.respond("  ").await.unwrap(), EMPTY_INPUT_PROMPT);
}
