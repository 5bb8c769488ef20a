//! Interactive terminal chat.
//!
//! Runs the same turn logic as the web page: each line is classified and
//! the bot answers with the top intent name or the fallback text. Entry
//! point: `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
