//! Terminal implementation of the controller's [`Presenter`].
//!
//! Pending turns are an indicatif spinner; resolved replies are printed
//! through [`ChatRenderer`]; notices are a dim one-liner; confirmation goes
//! through dialoguer.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use console::style;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};

use typetalk_core::presenter::Presenter;
use typetalk_types::turn::{Turn, TurnId};

use super::banner::print_welcome_banner;
use super::renderer::ChatRenderer;

pub struct TerminalPresenter {
    renderer: ChatRenderer,
    endpoint: String,
    /// Pending turn id and the spinner standing in for it.
    spinner: Mutex<Option<(TurnId, ProgressBar)>>,
    /// Print the user's message back (one-shot mode, where nobody typed it).
    echo_user: bool,
    /// Render nothing at all (JSON output mode).
    silent: bool,
}

impl TerminalPresenter {
    /// Presenter for the interactive loop; readline already shows user input.
    pub fn interactive(endpoint: impl Into<String>) -> Self {
        Self::build(endpoint.into(), false, false)
    }

    /// Presenter for `typetalk ask`.
    pub fn one_shot(endpoint: impl Into<String>) -> Self {
        Self::build(endpoint.into(), true, false)
    }

    /// Presenter that draws nothing.
    pub fn silent(endpoint: impl Into<String>) -> Self {
        Self::build(endpoint.into(), false, true)
    }

    fn build(endpoint: String, echo_user: bool, silent: bool) -> Self {
        Self {
            renderer: ChatRenderer::new(),
            endpoint,
            spinner: Mutex::new(None),
            echo_user,
            silent,
        }
    }

    pub fn renderer(&self) -> &ChatRenderer {
        &self.renderer
    }

    /// Print a turn the user did not type themselves (e.g. a starter).
    pub fn echo(&self, text: &str) {
        if !self.silent {
            println!("  {} {}", style("You >").green().bold(), text);
        }
    }

    fn take_spinner(&self) -> Option<(TurnId, ProgressBar)> {
        self.spinner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

impl Presenter for TerminalPresenter {
    fn render_user_turn(&self, turn: &Turn) {
        if self.echo_user {
            self.echo(&turn.text);
        }
    }

    fn render_pending_turn(&self, turn: &Turn) {
        if self.silent {
            return;
        }
        let spinner = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("  {spinner:.cyan} {msg}") {
            spinner.set_style(spinner_style);
        }
        spinner.set_message("thinking...");
        spinner.enable_steady_tick(Duration::from_millis(80));

        let previous = self
            .spinner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace((turn.id, spinner));
        if let Some((_, stale)) = previous {
            stale.finish_and_clear();
        }
    }

    fn render_bot_turn(&self, turn: &Turn) {
        if self.silent {
            return;
        }
        let accent = turn.personality().map(|info| info.color);
        println!();
        println!("{}", self.renderer.reply_header(turn.label.as_deref()));
        let body = self.renderer.render(&turn.text, accent);
        for line in body.trim_end().lines() {
            println!("  {line}");
        }
    }

    fn remove_turn(&self, id: TurnId) {
        let mut slot = self.spinner.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.as_ref().is_some_and(|(pending, _)| *pending == id) {
            if let Some((_, spinner)) = slot.take() {
                spinner.finish_and_clear();
            }
        }
    }

    fn notify(&self, message: &str) {
        if !self.silent {
            println!("\n  {} {}\n", style("*").cyan().bold(), style(message).dim());
        }
    }

    fn confirm(&self, prompt: &str) -> bool {
        if self.silent {
            return false;
        }
        Confirm::new()
            .with_prompt(format!("  {prompt}"))
            .default(false)
            .interact()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Confirmation prompt failed");
                false
            })
    }

    fn clear_turns(&self) {
        if let Some((_, spinner)) = self.take_spinner() {
            spinner.finish_and_clear();
        }
        if !self.silent {
            let _ = console::Term::stdout().clear_screen();
        }
    }

    fn show_welcome(&self) {
        if !self.silent {
            print_welcome_banner(&self.endpoint);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_spinner_lifecycle() {
        let presenter = TerminalPresenter::silent("http://127.0.0.1:5000/chat");
        let pending = Turn::pending_bot();
        presenter.render_pending_turn(&pending);
        // Silent presenters never start a spinner.
        assert!(presenter.take_spinner().is_none());
    }

    #[test]
    fn test_remove_ignores_unknown_turn() {
        let presenter = TerminalPresenter::interactive("http://127.0.0.1:5000/chat");
        let pending = Turn::pending_bot();
        presenter.render_pending_turn(&pending);

        presenter.remove_turn(TurnId::new());
        assert!(presenter.spinner.lock().unwrap().is_some());

        presenter.remove_turn(pending.id);
        assert!(presenter.spinner.lock().unwrap().is_none());
    }

    #[test]
    fn test_silent_presenter_declines_confirmation() {
        let presenter = TerminalPresenter::silent("http://127.0.0.1:5000/chat");
        assert!(!presenter.confirm("Start over?"));
    }
}
