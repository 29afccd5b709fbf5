//! In-session thumbs up/down on bot replies.
//!
//! Feedback is kept in memory for the lifetime of the chat loop only.
//! Choosing the same rating twice clears it without a notice; choosing
//! the other one replaces it.

use std::collections::HashMap;

use typetalk_types::turn::TurnId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Helpful,
    NotHelpful,
}

impl Feedback {
    /// Notice shown when this rating is applied.
    pub fn notice(&self) -> &'static str {
        match self {
            Feedback::Helpful => "Thanks for your feedback!",
            Feedback::NotHelpful => "Feedback received",
        }
    }

    /// Short tag shown next to a rated reply in `/history`.
    pub fn marker(&self) -> &'static str {
        match self {
            Feedback::Helpful => "+1",
            Feedback::NotHelpful => "-1",
        }
    }
}

/// What a toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackChange {
    Set(Feedback),
    Cleared,
}

impl FeedbackChange {
    /// Notice to show for this change. Clearing a rating is silent.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            FeedbackChange::Set(applied) => Some(applied.notice()),
            FeedbackChange::Cleared => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct FeedbackLedger {
    ratings: HashMap<TurnId, Feedback>,
}

impl FeedbackLedger {
    pub fn toggle(&mut self, turn: TurnId, feedback: Feedback) -> FeedbackChange {
        if self.ratings.get(&turn) == Some(&feedback) {
            self.ratings.remove(&turn);
            FeedbackChange::Cleared
        } else {
            self.ratings.insert(turn, feedback);
            FeedbackChange::Set(feedback)
        }
    }

    pub fn get(&self, turn: TurnId) -> Option<Feedback> {
        self.ratings.get(&turn).copied()
    }

    pub fn clear(&mut self) {
        self.ratings.clear();
    }
}
