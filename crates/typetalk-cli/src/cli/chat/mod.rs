//! Interactive terminal chat.
//!
//! Implements the chat loop around the turn controller: welcome banner,
//! spinner while a reply is pending, markdown-rendered replies with a
//! personality badge, slash commands, and in-session feedback. Entry point:
//! `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod feedback;
pub mod input;
pub mod loop_runner;
pub mod presenter;
pub mod renderer;
