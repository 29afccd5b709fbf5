//! Welcome banner display for chat sessions.
//!
//! Shown when a session starts and again after the conversation is reset,
//! standing in for the empty-chat welcome card.

use console::style;

/// Print the welcome banner.
pub fn print_welcome_banner(endpoint: &str) {
    println!();
    println!(
        "  {} {}",
        style("\u{2726}").magenta().bold(),
        style("typetalk").cyan().bold()
    );
    println!(
        "  {}",
        style("Chat away -- every reply comes with a guess at your personality type.").dim()
    );
    println!();
    println!("  {}  {}", style("Classifier:").bold(), style(endpoint).dim());
    println!();
    println!(
        "  {}",
        style("Type /help for commands, /starters for ideas, Ctrl+D to exit").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}
