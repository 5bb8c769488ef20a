//! Slash command parsing for the chat loop.

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    Help,
    /// Show the transcript, newest first.
    History,
    /// Reset the conversation.
    Clear,
    /// Write the interleaved transcript as JSON, optionally to a given path.
    Export(Option<String>),
    Exit,
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

    let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
    let cmd = parts[0].to_lowercase();
    let arg = parts
        .get(1)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/history" => Some(ChatCommand::History),
        "/clear" => Some(ChatCommand::Clear),
        "/export" | "/download" => Some(ChatCommand::Export(arg)),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// Print the help text listing all available commands.
pub fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    println!("  {}           {}", style("/help").cyan(), "Show this help message");
    println!("  {}        {}", style("/history").cyan(), "Show the conversation, newest first");
    println!("  {}          {}", style("/clear").cyan(), "Clear the conversation");
    println!("  {} {}", style("/export [path]").cyan(), "Save the transcript as JSON");
    println!("  {}           {}", style("/exit").cyan(), "End the chat session");
    println!();
    println!("  {}", style("Ctrl+D to exit").dim());
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_help() {
        assert_eq!(parse("/help"), Some(ChatCommand::Help));
        assert_eq!(parse("/h"), Some(ChatCommand::Help));
        assert_eq!(parse("/?"), Some(ChatCommand::Help));
    }

    #[test]
    fn test_parse_exit() {
        assert_eq!(parse("/exit"), Some(ChatCommand::Exit));
        assert_eq!(parse("/quit"), Some(ChatCommand::Exit));
        assert_eq!(parse("/q"), Some(ChatCommand::Exit));
    }

    #[test]
    fn test_parse_export() {
        assert_eq!(parse("/export"), Some(ChatCommand::Export(None)));
        assert_eq!(parse("/export   "), Some(ChatCommand::Export(None)));
        assert_eq!(
            parse("/export out/chat.json"),
            Some(ChatCommand::Export(Some("out/chat.json".to_string())))
        );
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(parse("/HISTORY"), Some(ChatCommand::History));
        assert_eq!(parse("/Clear"), Some(ChatCommand::Clear));
    }

    #[test]
    fn test_parse_not_a_command() {
        assert_eq!(parse("hola"), None);
        assert_eq!(parse("  hola /help"), None);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            parse("/dance"),
            Some(ChatCommand::Unknown("/dance".to_string()))
        );
    }
}
