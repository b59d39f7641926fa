//! Maps a failed nlm invocation to a typed error.
//!
//! The binary has no machine-readable error channel, so classification is a
//! case-insensitive substring match on its error text. All rules live in
//! [`RULES`]; they are checked in order and the first match wins.

use super::error::NlmError;
use super::invocation::InvocationOutput;

/// A classification rule: every needle must appear in the lowercased message.
struct Rule {
    needles: &'static [&'static str],
    build: fn(String) -> NlmError,
}

const RULES: &[Rule] = &[
    Rule {
        needles: &["not found", "notebook"],
        build: NlmError::NotebookNotFound,
    },
    Rule {
        needles: &["not found", "source"],
        build: NlmError::SourceNotFound,
    },
];

/// Human-readable message of a failed run: trimmed stderr, or trimmed
/// stdout when stderr is blank.
pub fn error_message(output: &InvocationOutput) -> String {
    let stderr = output.stderr.trim();
    if stderr.is_empty() {
        output.stdout.trim().to_string()
    } else {
        stderr.to_string()
    }
}

/// Classify a non-zero exit.
pub fn classify(output: &InvocationOutput) -> NlmError {
    let message = error_message(output);
    let lowered = message.to_lowercase();

    match RULES
        .iter()
        .find(|rule| rule.needles.iter().all(|n| lowered.contains(n)))
    {
        Some(rule) => (rule.build)(message),
        None => NlmError::CommandFailed(message),
    }
}
