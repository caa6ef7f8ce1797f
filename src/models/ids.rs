//! Tournament identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque tournament identifier as issued by the record store.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TournamentId(String);

impl TournamentId {
    /// Create a new TournamentId.
    pub fn new(id: String) -> Self {
        Self(id)
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for TournamentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for TournamentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TournamentId({})", self.0)
    }
}

impl From<String> for TournamentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TournamentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tournament_id_serializes_as_plain_string() {
        let id = TournamentId::from("t-42");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"t-42\"");

        let parsed: TournamentId = serde_json::from_str("\"t-42\"").unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_tournament_id_display() {
        let id = TournamentId::new("abc123".to_string());
        assert_eq!(format!("{}", id), "abc123");
    }

    #[test]
    fn test_tournament_id_debug() {
        let id = TournamentId::from("debug-test");
        assert!(format!("{:?}", id).contains("debug-test"));
    }

    #[test]
    fn test_tournament_id_blank_is_empty() {
        assert!(TournamentId::from("   ").is_empty());
        assert!(!TournamentId::from("x").is_empty());
    }

    #[test]
    fn test_tournament_id_equality() {
        assert_eq!(TournamentId::from("same"), TournamentId::from("same".to_string()));
        assert_ne!(TournamentId::from("same"), TournamentId::from("other"));
    }
}
