//! Common types used across the calculator

use serde::{Deserialize, Serialize};

/// Pod mesocarp color classes of the Hull Scrape method, youngest first
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ColorClass {
    White,
    YellowStage1,
    YellowStage2,
    Orange,
    Brown,
    Black,
}

impl ColorClass {
    /// All classes in fixed chart order
    pub const ALL: [ColorClass; 6] = [
        ColorClass::White,
        ColorClass::YellowStage1,
        ColorClass::YellowStage2,
        ColorClass::Orange,
        ColorClass::Brown,
        ColorClass::Black,
    ];

    /// Axis label shown under the distribution chart bars
    pub fn label(&self) -> &'static str {
        match self {
            ColorClass::White => "White",
            ColorClass::YellowStage1 => "Yellow 1",
            ColorClass::YellowStage2 => "Yellow 2",
            ColorClass::Orange => "Orange",
            ColorClass::Brown => "Brown",
            ColorClass::Black => "Black",
        }
    }

    /// Fixed bar fill color for this class
    pub fn fill(&self) -> &'static str {
        match self {
            ColorClass::White => "white",
            ColorClass::YellowStage1 => "yellow",
            ColorClass::YellowStage2 => "yellow",
            ColorClass::Orange => "orange",
            ColorClass::Brown => "brown",
            ColorClass::Black => "black",
        }
    }

    /// Whether pods of this color count toward the maturity index
    pub fn is_mature(&self) -> bool {
        matches!(
            self,
            ColorClass::Orange | ColorClass::Brown | ColorClass::Black
        )
    }
}

impl std::fmt::Display for ColorClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
