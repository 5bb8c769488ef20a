//! Terminal rendering of turns and transcripts.

use console::style;

use witchat_core::chat::service::TurnReport;
use witchat_types::intent::IntentOutcome;
use witchat_types::transcript::TranscriptRow;

/// Format the bot's reply to one turn.
///
/// The confidence is shown when an intent was found; a failed
/// classification is flagged so the terminal user can tell it apart from
/// "no intent".
pub fn format_reply(report: &TurnReport) -> String {
    let mut line = format!("{} {}", style("Bot >").cyan().bold(), report.response);
    match &report.outcome {
        IntentOutcome::Classified { intent } => {
            line.push_str(&format!(" {}", style(format!("({:.2})", intent.confidence)).dim()));
        }
        IntentOutcome::NoIntent => {}
        IntentOutcome::Failed { reason } => {
            line.push_str(&format!(" {}", style(format!("[{reason}]")).red().dim()));
        }
    }
    if report.cached {
        line.push_str(&format!(" {}", style("cached").dim()));
    }
    line
}

/// Format one transcript row.
pub fn format_row(row: &TranscriptRow) -> String {
    if row.is_user() {
        format!("{} {}", style("You >").green().bold(), row.text)
    } else {
        format!("{} {}", style("Bot >").cyan().bold(), row.text)
    }
}

/// Print the transcript, newest first.
pub fn print_transcript(rows: &[TranscriptRow]) {
    println!();
    if rows.is_empty() {
        println!("  {}", style("No messages yet.").dim());
    }
    for row in rows {
        println!("  {}", format_row(row));
    }
    println!();
}
