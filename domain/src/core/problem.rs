//! Problem value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// An arithmetic word problem put to the debate (Value Object)
///
/// Owned by the caller and read-only to the engine: every round's context
/// carries the same problem text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Problem {
    text: String,
}

impl Problem {
    /// Create a problem, rejecting empty or whitespace-only text
    pub fn new(text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DomainError::InvalidProblem(
                "problem text cannot be empty".to_string(),
            ));
        }
        Ok(Self { text })
    }

    /// Get the problem text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consume and return the inner text
    pub fn into_text(self) -> String {
        self.text
    }
}

impl std::fmt::Display for Problem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl TryFrom<&str> for Problem {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Problem::new(s)
    }
}

impl TryFrom<String> for Problem {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Problem::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_creation() {
        let p = Problem::new("Tom has 3 apples and buys 4 more. How many?").unwrap();
        assert!(p.text().starts_with("Tom has 3 apples"));
    }

    #[test]
    fn test_empty_problem_rejected() {
        assert!(Problem::new("").is_err());
        assert!(Problem::new("   \n").is_err());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let p = Problem::new("What is 2 + 2?").unwrap();
        assert_eq!(serde_json::to_string(&p).unwrap(), "\"What is 2 + 2?\"");
        let back: Problem = serde_json::from_str("\"What is 2 + 2?\"").unwrap();
        assert_eq!(back, p);
    }
}
