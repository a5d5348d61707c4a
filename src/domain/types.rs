// ==========================================
// Class Assign - domain value types
// ==========================================
// Gender / assignment method / destination code
// ==========================================

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Ordered destination alphabet (신설 학급 이름)
pub const DESTINATION_LABELS: [&str; 9] = ["가", "나", "다", "라", "마", "바", "사", "아", "자"];

/// Upper bound for both origin and destination class counts
pub const MAX_CLASSES: u32 = 9;

// ==========================================
// Gender
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Gender {
    M, // 남
    F, // 여
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::M => write!(f, "M"),
            Gender::F => write!(f, "F"),
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "M" | "m" => Ok(Gender::M),
            "F" | "f" => Ok(Gender::F),
            other => Err(format!("unknown gender: {}", other)),
        }
    }
}

// ==========================================
// AssignmentMethod
// ==========================================
// Selects the start offset / direction rule of the allocator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentMethod {
    Simple,    // every origin class starts at 가
    #[default]
    Staggered, // boys at (g-1), girls one ahead
    Snake,     // direction flips on even origin classes
}

impl fmt::Display for AssignmentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssignmentMethod::Simple => write!(f, "simple"),
            AssignmentMethod::Staggered => write!(f, "staggered"),
            AssignmentMethod::Snake => write!(f, "snake"),
        }
    }
}

impl FromStr for AssignmentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simple" => Ok(AssignmentMethod::Simple),
            "staggered" => Ok(AssignmentMethod::Staggered),
            "snake" => Ok(AssignmentMethod::Snake),
            other => Err(format!("unknown assignment method: {}", other)),
        }
    }
}

// ==========================================
// DestinationCode
// ==========================================
// Index into DESTINATION_LABELS; serialized as its label ("가", "나", ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DestinationCode(u8);

impl DestinationCode {
    /// Build a code from its alphabet index (0 = 가)
    pub fn from_index(index: usize) -> Option<Self> {
        if index < DESTINATION_LABELS.len() {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// Parse a label; accepts a trailing "반" ("가반")
    pub fn from_label(label: &str) -> Option<Self> {
        let trimmed = label.trim();
        let trimmed = trimmed.strip_suffix('반').unwrap_or(trimmed);
        DESTINATION_LABELS
            .iter()
            .position(|l| *l == trimmed)
            .and_then(Self::from_index)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }

    pub fn label(&self) -> &'static str {
        DESTINATION_LABELS[self.index()]
    }

    /// True when the code is one of the first `total_new_classes` codes
    pub fn is_within(&self, total_new_classes: u32) -> bool {
        (self.index() as u32) < total_new_classes
    }

    /// The first `count` codes in alphabet order
    pub fn first_n(count: u32) -> Vec<DestinationCode> {
        (0..(count as usize).min(DESTINATION_LABELS.len()))
            .filter_map(Self::from_index)
            .collect()
    }
}

impl fmt::Display for DestinationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for DestinationCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| format!("unknown destination code: {}", s))
    }
}

impl Serialize for DestinationCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for DestinationCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_code_labels() {
        let code = DestinationCode::from_index(2).unwrap();
        assert_eq!(code.label(), "다");
        assert_eq!(DestinationCode::from_label("다"), Some(code));
        assert_eq!(DestinationCode::from_label(" 다반 "), Some(code));
        assert_eq!(DestinationCode::from_label("차"), None);
        assert_eq!(DestinationCode::from_index(9), None);
    }

    #[test]
    fn test_destination_code_range() {
        let ra = DestinationCode::from_label("라").unwrap();
        assert!(ra.is_within(4));
        assert!(!ra.is_within(3));

        let codes = DestinationCode::first_n(4);
        let labels: Vec<&str> = codes.iter().map(|c| c.label()).collect();
        assert_eq!(labels, vec!["가", "나", "다", "라"]);
    }

    #[test]
    fn test_destination_code_serde_as_label() {
        let code = DestinationCode::from_label("마").unwrap();
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"마\"");
        let back: DestinationCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, code);
        assert!(serde_json::from_str::<DestinationCode>("\"Z\"").is_err());
    }

    #[test]
    fn test_assignment_method_parse() {
        assert_eq!("Snake".parse::<AssignmentMethod>(), Ok(AssignmentMethod::Snake));
        assert_eq!(AssignmentMethod::default(), AssignmentMethod::Staggered);
        assert_eq!(AssignmentMethod::Simple.to_string(), "simple");
        assert!("zigzag".parse::<AssignmentMethod>().is_err());
    }
}
