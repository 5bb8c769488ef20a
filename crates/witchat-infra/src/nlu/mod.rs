//! NLU backend implementations.

pub mod transliterate;
pub mod wit;
