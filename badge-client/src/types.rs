//! Badge domain types.

use std::fmt;
use std::str::FromStr;

/// One printable side of an ID badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BadgeSide {
    Front,
    Back,
}

impl BadgeSide {
    /// Path segment used by `GET /employees/{id}/id-card/{side}`
    pub fn as_path_segment(&self) -> &'static str {
        match self {
            BadgeSide::Front => "front",
            BadgeSide::Back => "back",
        }
    }
}

impl fmt::Display for BadgeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_path_segment())
    }
}

/// Server-rendered markup for one side of one employee's badge.
///
/// Never cached; every fetch yields a fresh instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeRender {
    pub employee_id: String,
    pub side: BadgeSide,
    pub markup: String,
}

/// What a generate request asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationTarget {
    Front,
    Back,
    Both,
}

impl fmt::Display for GenerationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GenerationTarget::Front => "front",
            GenerationTarget::Back => "back",
            GenerationTarget::Both => "both",
        };
        f.write_str(s)
    }
}

impl FromStr for GenerationTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "front" => Ok(GenerationTarget::Front),
            "back" => Ok(GenerationTarget::Back),
            "both" => Ok(GenerationTarget::Both),
            other => Err(format!("unknown badge side: {other}")),
        }
    }
}

impl From<BadgeSide> for GenerationTarget {
    fn from(side: BadgeSide) -> Self {
        match side {
            BadgeSide::Front => GenerationTarget::Front,
            BadgeSide::Back => GenerationTarget::Back,
        }
    }
}
