//! Closest-ASCII transliteration of user input.
//!
//! Accented and non-Latin characters are replaced by their nearest ASCII
//! spelling before the text is sent to the NLU endpoint. Characters with no
//! ASCII equivalent are dropped.

/// Transliterate `text` to ASCII.
pub fn to_ascii(text: &str) -> String {
    if text.is_ascii() {
        return text.to_string();
    }
    deunicode::deunicode_with_tofu(text, "")
}
