//! Conversation history types for witchat.
//!
//! A conversation is stored as two parallel, chronologically ordered
//! sequences: what the user said and what the bot answered. Index *i* of one
//! sequence belongs to index *i* of the other.

use serde::{Deserialize, Serialize};

use crate::error::HistoryError;

/// One completed exchange: a user utterance and the bot's response to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConversationTurn<'a> {
    pub user_utterance: &'a str,
    pub system_response: &'a str,
}

/// Ordered conversation history, oldest turn first.
///
/// Both sequences always have the same length. The fields are private and
/// every constructor (including deserialization) checks the invariant, so
/// consumers can pair the sequences index for index without truncation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawHistory")]
pub struct ConversationHistory {
    past_user_inputs: Vec<String>,
    generated_responses: Vec<String>,
}

/// Unchecked wire shape, validated through `TryFrom`.
#[derive(Deserialize)]
struct RawHistory {
    #[serde(default)]
    past_user_inputs: Vec<String>,
    #[serde(default)]
    generated_responses: Vec<String>,
}

impl TryFrom<RawHistory> for ConversationHistory {
    type Error = HistoryError;

    fn try_from(raw: RawHistory) -> Result<Self, Self::Error> {
        Self::from_parts(raw.past_user_inputs, raw.generated_responses)
    }
}

impl ConversationHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a history from two existing sequences.
    ///
    /// Returns [`HistoryError::LengthMismatch`] if the sequences differ in length.
    pub fn from_parts(
        past_user_inputs: Vec<String>,
        generated_responses: Vec<String>,
    ) -> Result<Self, HistoryError> {
        if past_user_inputs.len() != generated_responses.len() {
            return Err(HistoryError::LengthMismatch {
                inputs: past_user_inputs.len(),
                responses: generated_responses.len(),
            });
        }
        Ok(Self {
            past_user_inputs,
            generated_responses,
        })
    }

    /// Append one turn to both sequences.
    pub fn append_turn(
        &mut self,
        user_utterance: impl Into<String>,
        system_response: impl Into<String>,
    ) {
        self.past_user_inputs.push(user_utterance.into());
        self.generated_responses.push(system_response.into());
    }

    /// Empty both sequences.
    pub fn reset(&mut self) {
        self.past_user_inputs.clear();
        self.generated_responses.clear();
    }

    /// Number of completed turns.
    pub fn len(&self) -> usize {
        self.past_user_inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.past_user_inputs.is_empty()
    }

    pub fn past_user_inputs(&self) -> &[String] {
        &self.past_user_inputs
    }

    pub fn generated_responses(&self) -> &[String] {
        &self.generated_responses
    }

    /// Iterate over turns, oldest first. Reverse it for newest first.
    pub fn turns(&self) -> impl DoubleEndedIterator<Item = ConversationTurn<'_>> + ExactSizeIterator {
        self.past_user_inputs
            .iter()
            .zip(self.generated_responses.iter())
            .map(|(user, bot)| ConversationTurn {
                user_utterance: user,
                system_response: bot,
            })
    }

    /// The most recent turn, if any.
    pub fn last_turn(&self) -> Option<ConversationTurn<'_>> {
        self.turns().next_back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_keeps_lengths_equal() {
        let mut history = ConversationHistory::new();
        for i in 0..5 {
            history.append_turn(format!("u{i}"), format!("r{i}"));
        }
        assert_eq!(history.len(), 5);
        assert_eq!(history.past_user_inputs().len(), 5);
        assert_eq!(history.generated_responses().len(), 5);
    }

    #[test]
    fn test_append_then_last_elements() {
        let mut history = ConversationHistory::new();
        history.append_turn("hola", "greet");
        history.append_turn("adios", "bye");

        assert_eq!(history.past_user_inputs().last().unwrap(), "adios");
        assert_eq!(history.generated_responses().last().unwrap(), "bye");

        let last = history.last_turn().unwrap();
        assert_eq!(last.user_utterance, "adios");
        assert_eq!(last.system_response, "bye");
    }

    #[test]
    fn test_reset_empties_history() {
        let mut history = ConversationHistory::new();
        history.append_turn("hola", "greet");
        history.reset();
        assert!(history.is_empty());
        assert!(history.last_turn().is_none());
    }

    #[test]
    fn test_from_parts_rejects_mismatch() {
        let err = ConversationHistory::from_parts(
            vec!["a".to_string(), "b".to_string()],
            vec!["x".to_string()],
        )
        .unwrap_err();
        assert_eq!(
            err,
            HistoryError::LengthMismatch {
                inputs: 2,
                responses: 1
            }
        );
    }

    #[test]
    fn test_turns_pair_by_index() {
        let history = ConversationHistory::from_parts(
            vec!["u1".to_string(), "u2".to_string()],
            vec!["r1".to_string(), "r2".to_string()],
        )
        .unwrap();

        let pairs: Vec<(&str, &str)> = history
            .turns()
            .map(|t| (t.user_utterance, t.system_response))
            .collect();
        assert_eq!(pairs, vec![("u1", "r1"), ("u2", "r2")]);
    }

    #[test]
    fn test_serde_shape() {
        let mut history = ConversationHistory::new();
        history.append_turn("hola", "greet");
        let json = serde_json::to_value(&history).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "past_user_inputs": ["hola"],
                "generated_responses": ["greet"],
            })
        );
    }

    #[test]
    fn test_deserialize_validates_lengths() {
        let ok: ConversationHistory = serde_json::from_str(
            r#"{"past_user_inputs": ["a"], "generated_responses": ["b"]}"#,
        )
        .unwrap();
        assert_eq!(ok.len(), 1);

        let empty: ConversationHistory = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());

        let bad = serde_json::from_str::<ConversationHistory>(
            r#"{"past_user_inputs": ["a", "b"], "generated_responses": ["c"]}"#,
        );
        assert!(bad.is_err());
    }
}
