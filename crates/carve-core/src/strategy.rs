//! Placement strategies and their wire spellings.

use std::fmt;
use std::str::FromStr;

/// The rule choosing which free block satisfies an allocation request.
///
/// Strategies only differ in *which* qualifying free block they select;
/// the carve itself (allocated prefix, free remainder) is identical for
/// all of them. Ties on equally-good candidates always resolve to the
/// lowest offset.
///
/// # Examples
///
/// ```
/// use carve_core::PlacementStrategy;
///
/// let s: PlacementStrategy = "best-fit".parse().unwrap();
/// assert_eq!(s, PlacementStrategy::BestFit);
/// assert_eq!(s.to_string(), "best-fit");
/// assert!("buddy".parse::<PlacementStrategy>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlacementStrategy {
    /// First free block with sufficient size, scanning in offset order.
    FirstFit,
    /// Free block minimizing leftover space; lowest offset on ties.
    BestFit,
    /// Free block maximizing leftover space; lowest offset on ties.
    WorstFit,
    /// Like first-fit, but the scan resumes just past the previous
    /// successful allocation and wraps around the arena.
    NextFit,
}

impl PlacementStrategy {
    /// All strategies, in wire order.
    pub const ALL: [PlacementStrategy; 4] = [
        PlacementStrategy::FirstFit,
        PlacementStrategy::BestFit,
        PlacementStrategy::WorstFit,
        PlacementStrategy::NextFit,
    ];

    /// The canonical wire spelling (`first-fit`, `best-fit`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstFit => "first-fit",
            Self::BestFit => "best-fit",
            Self::WorstFit => "worst-fit",
            Self::NextFit => "next-fit",
        }
    }
}

impl fmt::Display for PlacementStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognised strategy spelling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseStrategyError {
    /// The spelling that did not match any strategy.
    pub unrecognised: String,
}

impl fmt::Display for ParseStrategyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognised placement strategy '{}'", self.unrecognised)
    }
}

impl std::error::Error for ParseStrategyError {}

impl FromStr for PlacementStrategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first-fit" => Ok(Self::FirstFit),
            "best-fit" => Ok(Self::BestFit),
            "worst-fit" => Ok(Self::WorstFit),
            "next-fit" => Ok(Self::NextFit),
            other => Err(ParseStrategyError {
                unrecognised: other.to_string(),
            }),
        }
    }
}
