//! One-shot message command (`typetalk ask`).

use std::time::Instant;

use anyhow::{Result, bail};

use typetalk_core::controller::{RejectReason, SubmitOutcome};
use typetalk_types::turn::Turn;

use crate::cli::chat::presenter::TerminalPresenter;
use crate::state::AppState;

/// Send one message through the controller and print the reply.
///
/// Returns `Ok(false)` when the classifier could not be reached, so the
/// caller can exit non-zero after the error turn has been shown.
pub async fn ask(state: &AppState, text: &str, json: bool) -> Result<bool> {
    let endpoint = state.config.endpoint.clone();
    let presenter = if json {
        TerminalPresenter::silent(endpoint)
    } else {
        TerminalPresenter::one_shot(endpoint)
    };
    let controller = state.controller(presenter)?;

    let started = Instant::now();
    let outcome = controller.submit(text).await;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    let (turn, ok) = match outcome {
        SubmitOutcome::Rejected(RejectReason::Empty) => bail!("nothing to send: the message is empty"),
        SubmitOutcome::Rejected(RejectReason::Busy) => bail!("another request is still in flight"),
        SubmitOutcome::Resolved(turn) => (turn, true),
        SubmitOutcome::Failed(turn) => (turn, false),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&json_report(&turn, ok, elapsed_ms)?)?);
    } else if ok {
        let footer = controller.presenter().renderer().stats_footer(
            turn.label.as_deref(),
            elapsed_ms,
            controller.turn_count(),
        );
        println!("\n{footer}");
    }

    Ok(ok)
}

fn json_report(turn: &Turn, ok: bool, elapsed_ms: u64) -> Result<serde_json::Value> {
    let personality = turn.personality().map(|info| {
        serde_json::json!({
            "name": info.name,
            "color": info.color.to_string(),
            "known": info.is_known(),
        })
    });

    Ok(serde_json::json!({
        "ok": ok,
        "elapsed_ms": elapsed_ms,
        "turn": serde_json::to_value(turn)?,
        "personality": personality,
    }))
}
