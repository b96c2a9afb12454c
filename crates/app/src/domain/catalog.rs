//! Catalog value types.
//!
//! The category and color sets are shared between product validation and
//! order pricing so the two can never drift apart.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Merchandise category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Hoodie,
    Beanie,
    Shirt,
    Trackpants,
}

impl Category {
    /// Every sellable category.
    pub const ALL: [Category; 4] = [
        Category::Hoodie,
        Category::Beanie,
        Category::Shirt,
        Category::Trackpants,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Hoodie => "hoodie",
            Category::Beanie => "beanie",
            Category::Shirt => "shirt",
            Category::Trackpants => "trackpants",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category: {0}")]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hoodie" => Ok(Category::Hoodie),
            "beanie" => Ok(Category::Beanie),
            "shirt" => Ok(Category::Shirt),
            "trackpants" => Ok(Category::Trackpants),
            other => Err(ParseCategoryError(other.to_string())),
        }
    }
}

/// Merchandise color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Green,
    Black,
    Yellow,
    White,
}

impl Color {
    /// Every orderable color.
    pub const ALL: [Color; 4] = [Color::Green, Color::Black, Color::Yellow, Color::White];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Color::Green => "green",
            Color::Black => "black",
            Color::Yellow => "yellow",
            Color::White => "white",
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown color: {0}")]
pub struct ParseColorError(pub String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "green" => Ok(Color::Green),
            "black" => Ok(Color::Black),
            "yellow" => Ok(Color::Yellow),
            "white" => Ok(Color::White),
            other => Err(ParseColorError(other.to_string())),
        }
    }
}
