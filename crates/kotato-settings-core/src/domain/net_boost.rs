//! Network speed boost level.
//!
//! The boost level controls how aggressively media is downloaded in parallel.
//! Four levels exist; the user picks one in the settings UI and the value is
//! persisted as an integer in the custom document.
//!
//! # Accepted JSON shapes
//!
//! Hand-edited documents may spell the level several ways:
//!
//! | JSON value                 | Level          |
//! |----------------------------|----------------|
//! | `"high"`                   | 3 (`Big`)      |
//! | `"medium"`                 | 2 (`Medium`)   |
//! | `"low"`                    | 1 (`Slight`)   |
//! | any other string, `null`   | 0 (`Default`)  |
//! | a number                   | truncated, then clamped to 0..=3 |

use std::fmt;

/// Network speed boost level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum NetBoost {
    /// No boost; the upstream download settings are used unchanged.
    #[default]
    Default = 0,
    Slight = 1,
    Medium = 2,
    Big = 3,
}

impl NetBoost {
    /// Every level, in ascending order.
    pub const ALL: [NetBoost; 4] = [
        NetBoost::Default,
        NetBoost::Slight,
        NetBoost::Medium,
        NetBoost::Big,
    ];

    /// Converts a numeric level, clamping anything outside 0..=3.
    pub fn from_level(level: i64) -> Self {
        match level {
            i64::MIN..=0 => NetBoost::Default,
            1 => NetBoost::Slight,
            2 => NetBoost::Medium,
            _ => NetBoost::Big,
        }
    }

    /// Converts a level name as written in the custom document.
    ///
    /// Unknown names map to [`NetBoost::Default`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "high" => NetBoost::Big,
            "medium" => NetBoost::Medium,
            "low" => NetBoost::Slight,
            _ => NetBoost::Default,
        }
    }

    /// Numeric level (0..=3).
    pub fn level(self) -> u8 {
        self as u8
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            NetBoost::Default => "Default",
            NetBoost::Slight => "Slight",
            NetBoost::Medium => "Medium",
            NetBoost::Big => "Big",
        }
    }
}

impl fmt::Display for NetBoost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_maps_known_names() {
        assert_eq!(NetBoost::from_name("high"), NetBoost::Big);
        assert_eq!(NetBoost::from_name("medium"), NetBoost::Medium);
        assert_eq!(NetBoost::from_name("low"), NetBoost::Slight);
    }

    #[test]
    fn test_from_name_unknown_is_default() {
        assert_eq!(NetBoost::from_name("turbo"), NetBoost::Default);
        assert_eq!(NetBoost::from_name(""), NetBoost::Default);
        // Names are case-sensitive.
        assert_eq!(NetBoost::from_name("High"), NetBoost::Default);
    }

    #[test]
    fn test_from_level_clamps_out_of_range() {
        assert_eq!(NetBoost::from_level(-5), NetBoost::Default);
        assert_eq!(NetBoost::from_level(0), NetBoost::Default);
        assert_eq!(NetBoost::from_level(2), NetBoost::Medium);
        assert_eq!(NetBoost::from_level(3), NetBoost::Big);
        assert_eq!(NetBoost::from_level(42), NetBoost::Big);
    }

    #[test]
    fn test_level_matches_discriminant() {
        for (i, boost) in NetBoost::ALL.iter().enumerate() {
            assert_eq!(boost.level() as usize, i);
            assert_eq!(NetBoost::from_level(i as i64), *boost);
        }
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(NetBoost::Slight.to_string(), "Slight");
        assert_eq!(NetBoost::default().to_string(), "Default");
    }
}
