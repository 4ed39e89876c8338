use crate::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Engineering discipline a component belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    System,
    Mechanical,
    Electrical,
    Electronics,
    Software,
}

impl ComponentType {
    /// Palette order.
    pub const ALL: [ComponentType; 5] = [
        ComponentType::System,
        ComponentType::Mechanical,
        ComponentType::Electrical,
        ComponentType::Electronics,
        ComponentType::Software,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ComponentType::System => "System",
            ComponentType::Mechanical => "Mechanical",
            ComponentType::Electrical => "Electrical",
            ComponentType::Electronics => "Electronics",
            ComponentType::Software => "Software",
        }
    }

    /// Token used for drag-and-drop payloads and transcript messages.
    pub fn token(self) -> &'static str {
        match self {
            ComponentType::System => "system",
            ComponentType::Mechanical => "mechanical",
            ComponentType::Electrical => "electrical",
            ComponentType::Electronics => "electronics",
            ComponentType::Software => "software",
        }
    }

    /// Accent color as RGB.
    pub fn color(self) -> [u8; 3] {
        match self {
            ComponentType::System => [0x25, 0x63, 0xEB],
            ComponentType::Mechanical => [0x10, 0xB9, 0x81],
            ComponentType::Electrical => [0xF5, 0x9E, 0x0B],
            ComponentType::Electronics => [0x8B, 0x5C, 0xF6],
            ComponentType::Software => [0xEC, 0x48, 0x99],
        }
    }

    pub fn default_label(self) -> String {
        format!("New {}", self.label())
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ComponentType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        ComponentType::ALL
            .into_iter()
            .find(|kind| kind.token().eq_ignore_ascii_case(token))
            .ok_or_else(|| CoreError::UnknownComponentType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token() {
        assert_eq!("mechanical".parse::<ComponentType>(), Ok(ComponentType::Mechanical));
        assert_eq!(" Software ".parse::<ComponentType>(), Ok(ComponentType::Software));
        assert_eq!(
            "hydraulic".parse::<ComponentType>(),
            Err(CoreError::UnknownComponentType("hydraulic".to_string()))
        );
    }

    #[test]
    fn test_default_label() {
        assert_eq!(ComponentType::Electronics.default_label(), "New Electronics");
    }

    #[test]
    fn test_token_roundtrip_for_all() {
        for kind in ComponentType::ALL {
            assert_eq!(kind.token().parse::<ComponentType>(), Ok(kind));
        }
    }
}
