//! Presenter trait: the rendering collaborators the controller drives.
//!
//! A presenter owns whatever the user actually sees (terminal output, a
//! widget tree, a test recorder). The controller only tells it what changed.
//! All methods take `&self`; implementations that keep state use interior
//! mutability.

use typetalk_types::turn::{Turn, TurnId};

pub trait Presenter: Send + Sync {
    /// Show the user's submitted message.
    fn render_user_turn(&self, turn: &Turn);

    /// Show a placeholder while the classifier is working.
    fn render_pending_turn(&self, turn: &Turn);

    /// Show a resolved bot reply (success or connectivity error).
    fn render_bot_turn(&self, turn: &Turn);

    /// Remove a previously rendered turn (used for pending placeholders).
    fn remove_turn(&self, id: TurnId);

    /// Show a short transient notice.
    fn notify(&self, message: &str);

    /// Ask the user a yes/no question. `false` when declined or unanswerable.
    fn confirm(&self, prompt: &str) -> bool;

    /// Remove every rendered turn.
    fn clear_turns(&self);

    /// Show the empty-conversation welcome placeholder.
    fn show_welcome(&self);

    /// Input is about to be processed; block further typing.
    fn lock_input(&self) {}

    /// Empty the input field after its content was taken.
    fn clear_input(&self) {}

    /// Re-enable input and give it focus.
    fn release_input(&self) {}
}
