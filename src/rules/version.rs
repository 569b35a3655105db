use crate::error::{M209Error, M209Result};
use crate::machine::{BARS, MAX_WHEEL_SIZE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use strum_macros::{Display, EnumIter, EnumString};

/// Historical operating instructions the key was produced under.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Version {
    #[strum(to_string = "V1942")]
    V1942,
    #[strum(to_string = "V1943")]
    V1943,
    #[strum(to_string = "V1944")]
    V1944,
    #[strum(to_string = "V1947")]
    V1947,
    #[strum(to_string = "V1953")]
    V1953,
    #[strum(to_string = "SWEDISH")]
    Swedish,
    #[strum(to_string = "UNRESTRICTED")]
    Unrestricted,
    #[strum(to_string = "NO_OVERLAP")]
    NoOverlap,
}

/// Numeric and boolean key-generation rules for one version.
///
/// Built once before the workers start and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    pub version: Version,

    // === LUG COUNTS ===
    pub min_overlap: usize,
    pub max_overlap: usize,
    pub min_kick: u8,
    pub max_kick: u8,
    /// Upper bound for the smallest per-wheel lug count.
    pub max_lowest_kick: u8,
    pub same_successor_allowed: bool,
    pub even_3: bool,
    pub even_2_3_4: bool,
    /// Every displacement 1..=27 must be reachable by some set of wheels.
    pub coverage_27: bool,
    pub from_table: bool,
    pub only_table_group_a: bool,
    pub only_table_group_b: bool,

    // === OVERLAP PLACEMENT (random key generation only) ===
    pub max_same_overlap: usize,
    pub min_involved_wheels: usize,
    pub overlaps_side_by_side_separated: bool,
    pub overlaps_evenly: bool,
    /// Maximum number of wheels engaged only through overlapping bars.
    /// Values of 6 or more disable the check.
    pub max_total_overlap: usize,
    /// Maximum occurrences of any displacement in the 64-entry vector.
    /// Values above 64 disable the check.
    pub max_kick_repetition_64: usize,

    // === PINS ===
    /// Longest allowed run of equal pins around a wheel. Values of 26 or
    /// more disable the check.
    pub max_consecutive_same_pins: usize,
    pub min_percent_active_pins: usize,
    pub max_percent_active_pins: usize,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self::for_version(Version::V1947)
    }
}

impl RuleConfig {
    fn base(version: Version) -> Self {
        Self {
            version,
            min_overlap: 1,
            max_overlap: 12,
            min_kick: 1,
            max_kick: 13,
            max_lowest_kick: 1,
            same_successor_allowed: true,
            even_3: false,
            even_2_3_4: false,
            coverage_27: false,
            from_table: false,
            only_table_group_a: false,
            only_table_group_b: false,
            max_same_overlap: BARS,
            min_involved_wheels: 0,
            overlaps_side_by_side_separated: false,
            overlaps_evenly: false,
            max_total_overlap: 6,
            max_kick_repetition_64: 100,
            max_consecutive_same_pins: 6,
            min_percent_active_pins: 40,
            max_percent_active_pins: 60,
        }
    }

    pub fn for_version(version: Version) -> Self {
        let base = Self::base(version);
        match version {
            Version::V1942 => Self {
                max_overlap: 14,
                max_consecutive_same_pins: 7,
                min_percent_active_pins: 35,
                max_percent_active_pins: 65,
                ..base
            },
            Version::V1943 => Self {
                same_successor_allowed: false,
                coverage_27: true,
                ..base
            },
            Version::V1944 => Self {
                from_table: true,
                max_same_overlap: 2,
                min_involved_wheels: 4,
                overlaps_side_by_side_separated: true,
                overlaps_evenly: true,
                ..base
            },
            Version::V1947 => Self {
                min_overlap: 2,
                coverage_27: true,
                even_2_3_4: true,
                max_same_overlap: 2,
                ..base
            },
            Version::V1953 => Self {
                min_overlap: 2,
                same_successor_allowed: false,
                coverage_27: true,
                even_3: true,
                max_same_overlap: 2,
                max_consecutive_same_pins: 5,
                ..base
            },
            Version::Swedish => Self {
                min_overlap: 0,
                max_consecutive_same_pins: MAX_WHEEL_SIZE,
                min_percent_active_pins: 30,
                max_percent_active_pins: 70,
                ..base
            },
            Version::Unrestricted => Self {
                min_overlap: 0,
                max_overlap: BARS,
                max_kick: BARS as u8,
                max_consecutive_same_pins: MAX_WHEEL_SIZE,
                min_percent_active_pins: 0,
                max_percent_active_pins: 100,
                ..base
            },
            Version::NoOverlap => Self {
                min_overlap: 0,
                max_overlap: 0,
                max_kick: BARS as u8,
                max_consecutive_same_pins: MAX_WHEEL_SIZE,
                min_percent_active_pins: 0,
                max_percent_active_pins: 100,
                ..base
            },
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> M209Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> M209Result<()> {
        if self.min_overlap > self.max_overlap {
            return Err(M209Error::Config(format!(
                "min_overlap {} exceeds max_overlap {}",
                self.min_overlap, self.max_overlap
            )));
        }
        if self.max_overlap > BARS {
            return Err(M209Error::Config(format!(
                "max_overlap {} exceeds the {} bars of the cage",
                self.max_overlap, BARS
            )));
        }
        if self.min_kick == 0 || self.min_kick > self.max_lowest_kick || self.max_lowest_kick > self.max_kick
        {
            return Err(M209Error::Config(format!(
                "kick bounds must satisfy 1 <= min_kick ({}) <= max_lowest_kick ({}) <= max_kick ({})",
                self.min_kick, self.max_lowest_kick, self.max_kick
            )));
        }
        if self.min_percent_active_pins > self.max_percent_active_pins
            || self.max_percent_active_pins > 100
        {
            return Err(M209Error::Config(format!(
                "active pin percentage bounds {}..{} are invalid",
                self.min_percent_active_pins, self.max_percent_active_pins
            )));
        }
        if self.max_consecutive_same_pins == 0 {
            return Err(M209Error::Config(
                "max_consecutive_same_pins must be at least 1".to_string(),
            ));
        }
        if self.from_table && self.only_table_group_a && self.only_table_group_b {
            return Err(M209Error::Config(
                "Cannot exclude both table groups A and B".to_string(),
            ));
        }
        Ok(())
    }

    /// Versions whose legality is decided by the bar count alone.
    pub fn bars_only(&self) -> bool {
        matches!(self.version, Version::NoOverlap | Version::Swedish)
    }

    pub fn is_unrestricted(&self) -> bool {
        self.version == Version::Unrestricted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_all_versions_validate() {
        for v in Version::iter() {
            RuleConfig::for_version(v)
                .validate()
                .unwrap_or_else(|e| panic!("{} failed validation: {}", v, e));
        }
    }

    #[test]
    fn test_version_names_round_trip() {
        for v in Version::iter() {
            assert_eq!(Version::from_str(&v.to_string()).unwrap(), v);
        }
        assert_eq!(Version::from_str("no_overlap").unwrap(), Version::NoOverlap);
    }

    #[test]
    fn test_validate_rejects_inverted_overlap() {
        let cfg = RuleConfig {
            min_overlap: 5,
            max_overlap: 2,
            ..RuleConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(M209Error::Config(_))));
    }
}
