//! Colored CLI display utilities for the chat shell.
//!
//! This module provides functions for printing colored, formatted output
//! to the terminal during an interactive chat session.

use std::io::{self, Write};

use owo_colors::OwoColorize;

use crate::session::SessionHistory;

/// Print the startup banner with the loaded state.
pub fn print_banner(intents: usize, model_available: bool) {
    println!("{}", "Zed-BOT".cyan().bold());
    println!("Ask me anything! ({} to leave)", "/quit".dimmed());
    if intents == 0 {
        println!(
            "{}",
            "No intents loaded; every input goes to the model.".yellow()
        );
    }
    if !model_available {
        println!(
            "{}",
            "Model unavailable; only knowledge-base replies will work.".yellow()
        );
    }
    println!();
}

/// Print a bot reply.
pub fn print_response(text: &str) {
    println!("{} {}", "bot>".green().bold(), text);
    let _ = io::stdout().flush();
}

/// Print the session history, most recent exchange first.
pub fn print_history(history: &SessionHistory) {
    if history.is_empty() {
        println!("{}", "No history yet.".dimmed());
        return;
    }
    for entry in history.iter_reversed() {
        println!(
            "{} {} {}",
            entry.timestamp.dimmed(),
            "you>".cyan().bold(),
            entry.user_input
        );
        println!(
            "{} {} {}",
            entry.timestamp.dimmed(),
            "bot>".green().bold(),
            entry.bot_response
        );
    }
}

/// Print a one-line notice (degraded state, history cleared, ...).
pub fn print_notice(msg: &str) {
    println!("{}", msg.yellow());
}

/// Print an error that must not be swallowed.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERROR]".red().bold(), msg);
}

/// Print the input prompt without a trailing newline.
///
/// # Errors
///
/// Returns an error if stdout cannot be flushed.
pub fn print_input_prompt() -> io::Result<()> {
    print!("{} ", "you>".cyan().bold());
    io::stdout().flush()
}
