use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::nlm::NlmError;

/// Prose documents nlm can generate from a notebook's sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerateKind {
    Guide,
    Outline,
    Faq,
    Glossary,
}

impl GenerateKind {
    pub const ALL: [GenerateKind; 4] = [
        GenerateKind::Guide,
        GenerateKind::Outline,
        GenerateKind::Faq,
        GenerateKind::Glossary,
    ];

    /// The nlm subcommand producing this document.
    pub fn subcommand(&self) -> &'static str {
        match self {
            GenerateKind::Guide => "generate-guide",
            GenerateKind::Outline => "generate-outline",
            GenerateKind::Faq => "faq",
            GenerateKind::Glossary => "glossary",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GenerateKind::Guide => "guide",
            GenerateKind::Outline => "outline",
            GenerateKind::Faq => "faq",
            GenerateKind::Glossary => "glossary",
        }
    }
}

impl fmt::Display for GenerateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenerateKind {
    type Err = NlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GenerateKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| {
                NlmError::Validation(format!(
                    "Unknown content kind '{}' (expected guide, outline, faq or glossary)",
                    s
                ))
            })
    }
}

/// Generated prose returned by the HTTP layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub notebook_id: String,
    pub kind: GenerateKind,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_kind() {
        for kind in GenerateKind::ALL {
            assert_eq!(kind.as_str().parse::<GenerateKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_kind_is_validation_error() {
        assert!(matches!(
            "summary".parse::<GenerateKind>(),
            Err(NlmError::Validation(_))
        ));
    }
}
