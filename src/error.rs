use serde::{Deserialize, Serialize};

/// The error type of the crate: an explanation of what could not be done,
/// optionally carrying the stringified error that caused it.
///
/// The context is written at the call site in the voice of the failing
/// operation ("Unable to save the document") and the source is whatever the
/// lower layer reported, so a propagated failure reads as one sentence from the
/// outermost intent down to the root cause.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ContextError {
    pub context: String,
    pub source_error: Option<String>,
}

impl ContextError {
    /// An error with an explanation and no underlying cause.
    pub fn with_context<S: Into<String>>(context: S) -> ContextError {
        ContextError {
            context: context.into(),
            source_error: None,
        }
    }

    /// An error wrapping the one that caused it.
    pub fn with_error<S: Into<String>>(context: S, error: &dyn std::error::Error) -> ContextError {
        ContextError {
            context: context.into(),
            source_error: Some(error.to_string()),
        }
    }
}

impl std::fmt::Display for ContextError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.source_error {
            Some(source_error) => write!(
                formatter,
                "{}: {}",
                self.context,
                decapitalize(source_error),
            ),
            None => write!(formatter, "{}", self.context),
        }
    }
}

impl std::error::Error for ContextError {}

/// Lowercases the leading letter, so the source message reads as the
/// continuation of the context sentence.
fn decapitalize(message: &str) -> String {
    let mut characters = message.chars();
    match characters.next() {
        None => String::new(),
        Some(character) => character.to_lowercase().chain(characters).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_the_decapitalized_source_message() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "No such document");
        let error = ContextError::with_error("Unable to load the document", &io_error);
        assert_eq!(
            error.to_string(),
            "Unable to load the document: no such document"
        );
    }

    #[test]
    fn display_without_a_source_is_the_context_alone() {
        let error = ContextError::with_context("A save is already in progress");
        assert_eq!(error.to_string(), "A save is already in progress");
    }
}
