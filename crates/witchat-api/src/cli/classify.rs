//! `witchat classify <text>`: one-shot classification.

use console::style;

use crate::state::AppState;

/// Classify `text` and print the intents and entities.
///
/// Bypasses the cache and sessions; classifier errors are returned.
pub async fn classify(state: &AppState, text: &str, json: bool) -> anyhow::Result<()> {
    let classification = state.chat_service.classify_uncached(text).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&classification)?);
        return Ok(());
    }

    println!();
    match classification.top_intent() {
        Some(intent) => println!(
            "  {} {} {}",
            style("Intent:").bold(),
            style(&intent.name).cyan().bold(),
            style(format!("({:.2})", intent.confidence)).dim()
        ),
        None => println!(
            "  {} {}",
            style("Intent:").bold(),
            style(state.chat_service.policy().fallback()).yellow()
        ),
    }

    for intent in classification.intents.iter().skip(1) {
        println!(
            "          {} {}",
            intent.name,
            style(format!("({:.2})", intent.confidence)).dim()
        );
    }

    if !classification.entities.is_empty() {
        println!();
        println!("  {}", style("Entities:").bold());
        for (name, values) in &classification.entities {
            for value in values {
                let shown = value
                    .get("value")
                    .or_else(|| value.get("body"))
                    .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
                    .unwrap_or_else(|| value.to_string());
                println!("    {} {}", style(name).cyan(), shown);
            }
        }
    }
    println!();

    Ok(())
}
