//! Main chat loop orchestration.
//!
//! Registers a session, prints the banner, then reads lines until Ctrl+D or
//! `/exit`. Plain lines run a turn through the shared chat service; slash
//! commands inspect or reset the session.

use std::path::PathBuf;

use console::style;
use uuid::Uuid;

use witchat_core::chat::registry::SessionHandle;
use witchat_core::nlu::classifier::IntentClassifier;
use witchat_infra::filesystem::{default_export_path, write_transcript_export};
use witchat_types::error::SessionError;

use crate::state::AppState;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::{format_reply, print_transcript};

/// Run the interactive chat loop.
pub async fn run_chat_loop(state: &AppState) -> anyhow::Result<()> {
    let session_id = state.sessions.create().await;
    let handle = state.sessions.get(&session_id).await?;

    print_welcome_banner(
        state.chat_service.classifier().name(),
        &state.config.wit.api_version,
        &session_id.to_string(),
    );

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, _writer) = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        let event = chat_input.read_line().await;
        if event.is_blank() {
            continue;
        }
        match event {
            InputEvent::Eof => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
                continue;
            }
            InputEvent::Message(text) => {
                if let Some(cmd) = commands::parse(&text) {
                    match cmd {
                        ChatCommand::Help => commands::print_help(),
                        ChatCommand::History => {
                            let rows = handle.lock().await.render_transcript();
                            print_transcript(&rows);
                        }
                        ChatCommand::Clear => {
                            handle.lock().await.reset();
                            println!("\n  {}\n", style("Conversation cleared.").dim());
                        }
                        ChatCommand::Export(path) => {
                            export(state, &handle, &session_id, path).await;
                        }
                        ChatCommand::Exit => {
                            println!("\n  {}", style("Session ended.").dim());
                            break;
                        }
                        ChatCommand::Unknown(name) => {
                            println!(
                                "\n  {} Unknown command: {}. Type /help for available commands.\n",
                                style("?").yellow().bold(),
                                style(name).dim()
                            );
                        }
                    }
                    continue;
                }

                let result = {
                    let mut session = handle.lock().await;
                    state.chat_service.handle_turn(&mut session, &text).await
                };
                match result {
                    Ok(report) => println!("  {}\n", format_reply(&report)),
                    Err(SessionError::EmptyUtterance) => continue,
                    Err(e) => println!("\n  {} {e}\n", style("!").red().bold()),
                }
            }
        }
    }

    chat_input.flush();
    // The registry may already have dropped a session left idle at the prompt.
    if let Err(e) = state.sessions.remove(&session_id).await {
        tracing::debug!("{e}");
    }
    Ok(())
}

async fn export(state: &AppState, handle: &SessionHandle, session_id: &Uuid, path: Option<String>) {
    let path = path
        .map(PathBuf::from)
        .unwrap_or_else(|| default_export_path(&state.data_dir, session_id));

    let entries = {
        let mut session = handle.lock().await;
        session.render_transcript();
        session.interleaved().to_vec()
    };

    match write_transcript_export(&path, &entries).await {
        Ok(()) => println!(
            "\n  {} Transcript saved to {}\n",
            style("*").cyan().bold(),
            style(path.display()).dim()
        ),
        Err(e) => {
            tracing::warn!(path = %path.display(), "transcript export failed: {e}");
            println!("\n  {} Failed to save transcript: {e}\n", style("!").red().bold());
        }
    }
}
