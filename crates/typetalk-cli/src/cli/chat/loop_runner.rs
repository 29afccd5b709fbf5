//! Main chat loop orchestration.
//!
//! Reads lines, routes slash commands, and hands everything else to the
//! turn controller. The loop awaits each submission before reading the next
//! line, so only one request is ever in flight.

use std::io::Write;
use std::time::Instant;

use console::style;
use crossterm::clipboard::CopyToClipboard;
use crossterm::queue;
use tracing::info;

use typetalk_core::controller::{ResetOutcome, SubmitOutcome};
use typetalk_core::presenter::Presenter;
use typetalk_types::turn::TurnRole;

use crate::cli::types::{print_type_detail, types_table};
use crate::state::{AppState, TerminalController};

use super::commands::{self, ChatCommand, STARTERS};
use super::feedback::{Feedback, FeedbackLedger};
use super::input::{ChatInput, InputEvent};
use super::presenter::TerminalPresenter;

/// Maximum characters of a turn shown by `/history`.
const HISTORY_PREVIEW_CHARS: usize = 100;

fn prompt(exchanges: u32) -> String {
    if exchanges == 0 {
        format!("  {} ", style("You >").green().bold())
    } else {
        format!(
            "  {} {} ",
            style(format!("[{exchanges}]")).dim(),
            style("You >").green().bold()
        )
    }
}

/// Run the interactive chat loop until EOF or `/exit`.
pub async fn run_chat_loop(state: &AppState) -> anyhow::Result<()> {
    let controller = state.controller(TerminalPresenter::interactive(&state.config.endpoint))?;
    let mut feedback = FeedbackLedger::default();

    controller.presenter().show_welcome();
    info!(endpoint = %state.config.endpoint, "Chat session started");

    let (mut chat_input, _writer) = ChatInput::new(prompt(0))
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        match chat_input.read_line().await {
            InputEvent::Eof => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
                continue;
            }
            InputEvent::Message(text) => {
                if text.trim().is_empty() {
                    continue;
                }

                if let Some(cmd) = commands::parse(&text) {
                    match cmd {
                        ChatCommand::Help => commands::print_help(),
                        ChatCommand::Clear => chat_input.clear(),
                        ChatCommand::Exit => {
                            println!("\n  {}", style("Session ended.").dim());
                            break;
                        }
                        ChatCommand::New => {
                            if controller.reset() == ResetOutcome::Cleared {
                                feedback.clear();
                            }
                        }
                        ChatCommand::History => print_history(&controller, &feedback),
                        ChatCommand::Types => println!("\n{}\n", types_table()),
                        ChatCommand::Type(code) => print_type_detail(&code),
                        ChatCommand::Like => rate_last_reply(&controller, &mut feedback, Feedback::Helpful),
                        ChatCommand::Dislike => {
                            rate_last_reply(&controller, &mut feedback, Feedback::NotHelpful)
                        }
                        ChatCommand::Starters => commands::print_starters(),
                        ChatCommand::Starter(n) => {
                            let starter = STARTERS[n - 1];
                            controller.presenter().echo(starter);
                            send(&controller, starter).await;
                        }
                        ChatCommand::Copy => copy_last_reply(&controller),
                        ChatCommand::Invalid(usage) => {
                            println!("\n  {} {}\n", style("!").yellow().bold(), usage);
                        }
                        ChatCommand::Unknown(cmd_name) => {
                            println!(
                                "\n  {} Unknown command: {}. Type /help for available commands.\n",
                                style("?").yellow().bold(),
                                style(cmd_name).dim()
                            );
                        }
                    }
                } else {
                    send(&controller, &text).await;
                }

                chat_input.update_prompt(&prompt(controller.turn_count()));
            }
        }
    }

    info!(exchanges = controller.turn_count(), "Chat session ended");
    Ok(())
}

/// Submit one message and print the footer or retry hint.
async fn send(controller: &TerminalController, text: &str) {
    let started = Instant::now();
    match controller.submit(text).await {
        SubmitOutcome::Resolved(turn) => {
            let elapsed_ms = started.elapsed().as_millis() as u64;
            let footer = controller.presenter().renderer().stats_footer(
                turn.label.as_deref(),
                elapsed_ms,
                controller.turn_count(),
            );
            println!("\n{footer}\n");
        }
        SubmitOutcome::Failed(_) => {
            println!(
                "\n  {}\n",
                style("Type a message to try again, /exit to quit.").dim()
            );
        }
        SubmitOutcome::Rejected(reason) => {
            tracing::debug!(?reason, "Submission rejected");
        }
    }
}

fn rate_last_reply(controller: &TerminalController, ledger: &mut FeedbackLedger, rating: Feedback) {
    let presenter = controller.presenter();
    let Some(turn) = controller.transcript().last_bot_turn() else {
        presenter.notify("No reply to rate yet.");
        return;
    };

    match ledger.toggle(turn.id, rating).notice() {
        Some(notice) => presenter.notify(notice),
        None => tracing::debug!(turn = %turn.id, "Feedback cleared"),
    }
}

fn copy_last_reply(controller: &TerminalController) {
    let presenter = controller.presenter();
    let Some(turn) = controller.transcript().last_bot_turn() else {
        presenter.notify("No reply to copy yet.");
        return;
    };

    match copy_to_clipboard(&mut std::io::stdout(), &turn.text) {
        Ok(()) => presenter.notify("Message copied to clipboard"),
        Err(e) => {
            tracing::warn!(error = %e, "Clipboard copy failed");
            presenter.notify("Failed to copy message");
        }
    }
}

/// Copy `text` through the terminal's OSC 52 clipboard sequence.
fn copy_to_clipboard(out: &mut impl Write, text: &str) -> std::io::Result<()> {
    queue!(out, CopyToClipboard::to_clipboard_from(text))?;
    out.flush()
}

fn print_history(controller: &TerminalController, ledger: &FeedbackLedger) {
    let turns = controller.transcript().snapshot();
    println!();
    if turns.is_empty() {
        println!("  {}", style("Nothing here yet.").dim());
        println!();
        return;
    }

    for turn in &turns {
        let role_label = match turn.role {
            TurnRole::User => format!("{}", style("You").green().bold()),
            TurnRole::Bot => {
                let badge = turn
                    .label
                    .as_deref()
                    .map(|l| format!(" [{}]", l.trim().to_uppercase()))
                    .unwrap_or_default();
                format!("{}{}", style("AI").cyan().bold(), style(badge).dim())
            }
        };
        let rating = ledger
            .get(turn.id)
            .map(|r| format!(" {}", style(format!("({})", r.marker())).dim()))
            .unwrap_or_default();
        println!("  {} {}{}", role_label, preview(&turn.text), rating);
    }
    println!();
}

fn preview(text: &str) -> String {
    let flat = text.replace('\n', " ");
    match flat.char_indices().nth(HISTORY_PREVIEW_CHARS - 3) {
        Some((cut, _)) if flat.chars().count() > HISTORY_PREVIEW_CHARS => {
            format!("{}...", &flat[..cut])
        }
        _ => flat,
    }
}
