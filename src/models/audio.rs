use serde::{Deserialize, Serialize};

use super::check_len;
use crate::nlm::NlmError;

pub const DEFAULT_AUDIO_INSTRUCTIONS: &str = "Provide a comprehensive overview";

fn default_instructions() -> String {
    DEFAULT_AUDIO_INSTRUCTIONS.to_string()
}

/// Input for generating an audio overview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAudioInput {
    #[serde(default = "default_instructions")]
    pub instructions: String,
}

impl Default for CreateAudioInput {
    fn default() -> Self {
        Self {
            instructions: default_instructions(),
        }
    }
}

impl CreateAudioInput {
    pub fn validate(&self) -> Result<(), NlmError> {
        check_len("instructions", &self.instructions, 0, 500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_instructions_use_default() {
        let input: CreateAudioInput = serde_json::from_str("{}").unwrap();
        assert_eq!(input.instructions, DEFAULT_AUDIO_INSTRUCTIONS);
    }

    #[test]
    fn instructions_are_capped() {
        let input = CreateAudioInput {
            instructions: "a".repeat(501),
        };
        assert!(input.validate().is_err());
    }
}
