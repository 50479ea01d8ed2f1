/// Intent and trigger-token types.
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Intent
// ---------------------------------------------------------------------------

/// What a message is asking for, after priority resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Intent {
    /// A command id found in the active profile's catalog.
    ExplicitCommand(String),
    /// The registered literal of a matched trigger token.
    TriggerToken(String),
    /// Anything else.
    FreeText(String),
}

impl Intent {
    pub fn label(&self) -> &'static str {
        match self {
            Intent::ExplicitCommand(_) => "command",
            Intent::TriggerToken(_) => "trigger",
            Intent::FreeText(_) => "free_text",
        }
    }
}

// ---------------------------------------------------------------------------
// Trigger tokens
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenMatch {
    /// Word-like literal, compared ignoring case.
    CaseInsensitive,
    /// Symbol literal (emoji, punctuation), compared byte for byte.
    Exact,
}

/// A small fixed literal that selects a non-command response path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerToken {
    pub literal: String,
    pub matching: TokenMatch,
}

impl TriggerToken {
    /// Build a token, picking the match mode from the literal's shape.
    pub fn new(literal: impl Into<String>) -> Self {
        let literal = literal.into();
        let word_like = !literal.is_empty()
            && literal
                .chars()
                .all(|c| c.is_alphanumeric() || c == '_' || c == '-' || c == ' ');
        let matching = if word_like { TokenMatch::CaseInsensitive } else { TokenMatch::Exact };
        Self { literal, matching }
    }

    /// Whether `content` is exactly this token. Content is not trimmed.
    pub fn matches(&self, content: &str) -> bool {
        match self.matching {
            TokenMatch::CaseInsensitive => content.to_lowercase() == self.literal.to_lowercase(),
            TokenMatch::Exact => content == self.literal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_tokens_ignore_case() {
        let t = TriggerToken::new("info");
        assert_eq!(t.matching, TokenMatch::CaseInsensitive);
        assert!(t.matches("INFO"));
        assert!(t.matches("Info"));
        assert!(!t.matches("info "));
        assert!(!t.matches("information"));
    }

    #[test]
    fn symbol_tokens_match_exact_bytes() {
        let t = TriggerToken::new("🎨");
        assert_eq!(t.matching, TokenMatch::Exact);
        assert!(t.matches("🎨"));
        assert!(!t.matches("🎨🎨"));
        assert!(!t.matches(" 🎨"));
    }
}
