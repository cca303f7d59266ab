//! Named tool pool entries

use crate::domain::params::ToolParameters;
use serde::{Deserialize, Serialize};

/// Reserved sentinel tool name meaning "no tool mounted". Always present in
/// the pool, never removable.
pub const FLANGE: &str = "Flange";

/// A named binding of tool parameters in the controller's pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolEntry {
    /// Unique, non-empty name within the pool
    pub name: String,

    /// Physical parameters of the tool
    pub params: ToolParameters,
}

impl ToolEntry {
    pub fn new(name: impl Into<String>, params: ToolParameters) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }

    /// The built-in flange entry present on every controller.
    pub fn flange() -> Self {
        Self::new(FLANGE, ToolParameters::flange())
    }

    /// Whether this entry is the reserved sentinel.
    pub fn is_flange(&self) -> bool {
        self.name == FLANGE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flange_entry() {
        let entry = ToolEntry::flange();
        assert_eq!(entry.name, FLANGE);
        assert!(entry.is_flange());
    }

    #[test]
    fn test_named_entry() {
        let entry = ToolEntry::new("Gripper", ToolParameters::flange());
        assert_eq!(entry.name, "Gripper");
        assert!(!entry.is_flange());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let entry = ToolEntry::flange();
        let json = serde_json::to_string(&entry).unwrap();
        let restored: ToolEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, restored);
    }
}
