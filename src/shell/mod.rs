//! Interactive terminal shell.
//!
//! Reads lines from stdin and maps them onto the dispatcher and session
//! history. `/history`, `/clear` and `/quit` are shell commands; everything
//! else is submitted as chat input. Each action is handled to completion
//! before the next line is read.

use chrono::Local;
use rand::Rng;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::dispatch::ResponseDispatcher;
use crate::display;
use crate::model::ModelError;
use crate::session::SessionHistory;

/// Timestamp format for history entries (12-hour clock).
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %I:%M:%S %p";

/// Interactive chat shell owning the session state.
pub struct Shell<R: Rng> {
    dispatcher: ResponseDispatcher<R>,
    history: SessionHistory,
}

impl<R: Rng> Shell<R> {
    /// Create a shell around a dispatcher with a fresh, empty session.
    #[must_use]
    pub fn new(dispatcher: ResponseDispatcher<R>) -> Self {
        Self {
            dispatcher,
            history: SessionHistory::new(),
        }
    }

    /// The session history.
    #[must_use]
    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    /// Submit one line of user input.
    ///
    /// Returns `None` when the input equals the previous submission; the
    /// duplicate is skipped without dispatching or recording. Otherwise the
    /// reply is recorded in the history and returned.
    ///
    /// # Errors
    ///
    /// Propagates dispatch failures; nothing is recorded in that case.
    pub async fn submit(&mut self, input: &str) -> Result<Option<String>, ModelError> {
        if self.history.is_duplicate(input) {
            tracing::debug!("Duplicate input, skipping dispatch");
            return Ok(None);
        }

        let response = self.dispatcher.respond(input).await?;
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        self.history.record(timestamp, input, response.clone());
        Ok(Some(response))
    }

    /// Drop the session history and the duplicate marker.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Run the read-eval-print loop until EOF or `/quit`.
    ///
    /// # Errors
    ///
    /// Returns an error if stdin or stdout become unusable.
    pub async fn run(&mut self) -> std::io::Result<()> {
        display::print_banner(
            self.dispatcher.knowledge().len(),
            self.dispatcher.model().is_available(),
        );

        let stdin = BufReader::new(tokio::io::stdin());
        let mut lines = stdin.lines();

        display::print_input_prompt()?;
        while let Some(line) = lines.next_line().await? {
            match line.trim_end() {
                "/quit" | "/exit" => break,
                "/history" => display::print_history(&self.history),
                "/clear" => {
                    self.clear_history();
                    display::print_notice("Chat history cleared!");
                }
                input => match self.submit(input).await {
                    Ok(Some(response)) => display::print_response(&response),
                    Ok(None) => {}
                    // Dispatch failures are displayed, never swallowed.
                    Err(e) => display::print_error(&e.to_string()),
                },
            }
            display::print_input_prompt()?;
        }

        Ok(())
    }
}
