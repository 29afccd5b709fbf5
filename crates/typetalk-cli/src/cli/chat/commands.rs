//! Slash command parsing for the chat loop.
//!
//! Commands start with `/`. Anything else is sent to the classifier.

use console::style;

/// Suggested opening messages offered by `/starters`.
pub const STARTERS: [&str; 4] = [
    "Tell me about your ideal weekend.",
    "How do you usually make big decisions?",
    "What recharges you after a long week?",
    "Describe a project you're proud of.",
];

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    Help,
    /// Clear the terminal screen.
    Clear,
    Exit,
    /// Reset the conversation.
    New,
    /// Show the turns of this conversation.
    History,
    /// List all personality types.
    Types,
    /// Show one personality type.
    Type(String),
    /// Mark the last reply as helpful.
    Like,
    /// Mark the last reply as not helpful.
    Dislike,
    /// List the quick-start messages.
    Starters,
    /// Send quick-start message `n` (1-based).
    Starter(usize),
    /// Copy the last reply to the clipboard.
    Copy,
    /// A known command with a bad argument; carries the usage hint.
    Invalid(String),
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let (cmd, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((cmd, arg)) => (cmd.to_lowercase(), arg.trim()),
        None => (trimmed.to_lowercase(), ""),
    };

    let command = match cmd.as_str() {
        "/help" | "/h" | "/?" => ChatCommand::Help,
        "/clear" | "/cls" => ChatCommand::Clear,
        "/exit" | "/quit" | "/q" => ChatCommand::Exit,
        "/new" | "/reset" => ChatCommand::New,
        "/history" => ChatCommand::History,
        "/types" => ChatCommand::Types,
        "/type" if arg.is_empty() => {
            ChatCommand::Invalid("Usage: /type <CODE>, e.g. /type INFP".to_string())
        }
        "/type" => ChatCommand::Type(arg.to_string()),
        "/like" | "/+1" => ChatCommand::Like,
        "/dislike" | "/-1" => ChatCommand::Dislike,
        "/starters" => ChatCommand::Starters,
        "/copy" => ChatCommand::Copy,
        "/starter" => match arg.parse::<usize>() {
            Ok(n) if (1..=STARTERS.len()).contains(&n) => ChatCommand::Starter(n),
            _ => ChatCommand::Invalid(format!(
                "Usage: /starter <n>, where n is 1 to {}",
                STARTERS.len()
            )),
        },
        other => ChatCommand::Unknown(other.to_string()),
    };
    Some(command)
}

/// Print the help text listing all available commands.
pub fn print_help() {
    let rows = [
        ("/help", "Show this help message"),
        ("/new", "Start a new conversation"),
        ("/history", "Show this conversation"),
        ("/types", "List personality types"),
        ("/type <CODE>", "Describe one personality type"),
        ("/like", "Mark the last reply as helpful"),
        ("/dislike", "Mark the last reply as not helpful"),
        ("/copy", "Copy the last reply to the clipboard"),
        ("/starters", "Show conversation starters"),
        ("/starter <n>", "Send conversation starter n"),
        ("/clear", "Clear the screen"),
        ("/exit", "End the chat session"),
    ];

    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    for (cmd, description) in rows {
        println!("  {:<14} {}", style(cmd).cyan(), description);
    }
    println!();
    println!("  {}", style("Ctrl+D to exit").dim());
    println!();
}

/// Print the numbered conversation starters.
pub fn print_starters() {
    println!();
    for (i, starter) in STARTERS.iter().enumerate() {
        println!("  {} {}", style(format!("{}.", i + 1)).cyan(), starter);
    }
    println!();
    println!("  {}", style("Send one with /starter <n>").dim());
    println!();
}
