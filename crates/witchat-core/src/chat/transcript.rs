//! Transcript rendering.
//!
//! Turns a conversation history into display rows, newest turn first. Each
//! turn contributes the bot's response followed by the user utterance it
//! answered, so a top-down reading shows the latest exchange at the top.

use witchat_types::conversation::ConversationHistory;
use witchat_types::transcript::{InterleavedEntry, Speaker, TranscriptRow};

/// Lazily render `history` as display rows, newest turn first.
///
/// Row keys are `ai_{idx}` / `human_{idx}` with `idx` counting from the
/// newest turn.
pub fn render(history: &ConversationHistory) -> impl Iterator<Item = TranscriptRow> + '_ {
    history
        .turns()
        .rev()
        .enumerate()
        .flat_map(|(idx, turn)| {
            [
                TranscriptRow {
                    speaker: Speaker::Bot,
                    text: turn.system_response.to_string(),
                    key: format!("ai_{idx}"),
                },
                TranscriptRow {
                    speaker: Speaker::User,
                    text: turn.user_utterance.to_string(),
                    key: format!("human_{idx}"),
                },
            ]
        })
}

/// Flatten rendered rows into the export list, keeping their order.
pub fn interleave(rows: &[TranscriptRow]) -> Vec<InterleavedEntry> {
    rows.iter().map(InterleavedEntry::from).collect()
}
