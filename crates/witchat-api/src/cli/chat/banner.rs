//! Welcome banner display for chat sessions.

use console::style;

/// Print the welcome banner at the start of a chat session.
pub fn print_welcome_banner(classifier: &str, api_version: &str, session_id: &str) {
    println!();
    println!("  {}", style("witchat").cyan().bold());
    println!(
        "  {}",
        style("Every message is answered with the intent it was classified as.").dim()
    );
    println!();
    println!(
        "  {}  {} {}",
        style("NLU:").bold(),
        classifier,
        style(format!("(v={api_version})")).dim()
    );
    println!(
        "  {}  {}",
        style("Session:").bold(),
        style(&session_id[..8.min(session_id.len())]).dim()
    );
    println!();
    println!("  {}", style("Type /help for commands, Ctrl+D to exit").dim());
    println!("  {}", style("---").dim());
    println!();
}
