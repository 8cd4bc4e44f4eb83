//! The node label category set.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Node category label.
///
/// The set is closed: every node carries exactly one of these values,
/// and anything else in the dataset is rejected at the parse boundary.
/// Variant order is ascending label-name order, which is also the
/// iteration order of [`Label::ALL`] and the sort order used by the
/// per-label summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Label {
    /// Category "L1".
    L1,
    /// Category "L2".
    L2,
    /// Category "L3".
    L3,
    /// Category "L4".
    L4,
    /// Category "L5".
    L5,
    /// Category "L6".
    L6,
    /// Category "L7".
    L7,
    /// Nodes the dataset could not categorise.
    Unknown,
}

impl Label {
    /// The fixed recognised label set, in ascending order.
    pub const ALL: [Self; 8] = [
        Self::L1,
        Self::L2,
        Self::L3,
        Self::L4,
        Self::L5,
        Self::L6,
        Self::L7,
        Self::Unknown,
    ];

    /// The label's dataset name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::L1 => "L1",
            Self::L2 => "L2",
            Self::L3 => "L3",
            Self::L4 => "L4",
            Self::L5 => "L5",
            Self::L6 => "L6",
            Self::L7 => "L7",
            Self::Unknown => "Unknown",
        }
    }

    /// Parse a dataset name into a label.
    ///
    /// Anything outside the recognised set is a [`CoreError::UnknownLabel`].
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "L1" => Ok(Self::L1),
            "L2" => Ok(Self::L2),
            "L3" => Ok(Self::L3),
            "L4" => Ok(Self::L4),
            "L5" => Ok(Self::L5),
            "L6" => Ok(Self::L6),
            "L7" => Ok(Self::L7),
            "Unknown" => Ok(Self::Unknown),
            other => Err(CoreError::UnknownLabel(other.to_owned())),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_roundtrip() {
        for label in Label::ALL {
            assert_eq!(Label::parse(label.as_str()).unwrap(), label);
        }
    }

    #[test]
    fn parse_rejects_unrecognised() {
        let err = Label::parse("L8").unwrap_err();
        assert!(matches!(err, CoreError::UnknownLabel(ref name) if name == "L8"));
    }

    #[test]
    fn ascending_name_order() {
        assert!(Label::L1 < Label::L2);
        assert!(Label::L7 < Label::Unknown);
        let mut sorted = Label::ALL;
        sorted.sort();
        assert_eq!(sorted, Label::ALL);
    }

    #[test]
    fn display_matches_dataset_name() {
        assert_eq!(Label::L3.to_string(), "L3");
        assert_eq!(Label::Unknown.to_string(), "Unknown");
    }

    #[test]
    fn serde_roundtrip() {
        let json = serde_json::to_string(&Label::L5).unwrap();
        assert_eq!(json, "\"L5\"");
        let back: Label = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Label::L5);
    }
}
