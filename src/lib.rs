//! Zed-BOT - terminal chatbot with an intent knowledge base and generative fallback.

pub mod config;
pub mod dispatch;
pub mod display;
pub mod knowledge;
pub mod model;
pub mod session;
pub mod shell;
