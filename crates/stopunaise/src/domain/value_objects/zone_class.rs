//! ZoneClass - Delivery fee bucket for a municipality

use serde::{Deserialize, Serialize};

/// Delivery zone classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ZoneClass {
    /// Communes of Abidjan proper
    Near,
    /// Communes on the outskirts of Abidjan
    Outlying,
    /// Everywhere outside Abidjan
    Far,
}

impl ZoneClass {
    /// All classes, in display order
    pub const ALL: [ZoneClass; 3] = [ZoneClass::Near, ZoneClass::Outlying, ZoneClass::Far];

    /// Group label shown next to the municipality picker
    pub fn label(&self) -> &'static str {
        match self {
            ZoneClass::Near => "Abidjan",
            ZoneClass::Outlying => "Communes périphériques",
            ZoneClass::Far => "Hors Abidjan",
        }
    }
}

impl std::fmt::Display for ZoneClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ZoneClass::Near => write!(f, "near"),
            ZoneClass::Outlying => write!(f, "outlying"),
            ZoneClass::Far => write!(f, "far"),
        }
    }
}

impl std::str::FromStr for ZoneClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "near" | "abidjan" => Ok(ZoneClass::Near),
            "outlying" => Ok(ZoneClass::Outlying),
            "far" | "outside" => Ok(ZoneClass::Far),
            _ => Err(format!("Unknown zone class: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_legacy_names() {
        assert_eq!("abidjan".parse::<ZoneClass>().unwrap(), ZoneClass::Near);
        assert_eq!("Outside".parse::<ZoneClass>().unwrap(), ZoneClass::Far);
        assert!("suburb".parse::<ZoneClass>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for class in ZoneClass::ALL {
            assert_eq!(class.to_string().parse::<ZoneClass>().unwrap(), class);
        }
    }
}
