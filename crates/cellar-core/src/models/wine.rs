//! Collection item model.

use std::str::FromStr;

use jiff::Timestamp;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{Readiness, WineProfile};

/// Wine color category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum WineColor {
    Red,
    White,
    Rose,
    Sparkling,
}

impl FromStr for WineColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "red" => Ok(WineColor::Red),
            "white" => Ok(WineColor::White),
            "rose" | "rosé" => Ok(WineColor::Rose),
            "sparkling" => Ok(WineColor::Sparkling),
            _ => Err(format!("Invalid wine color: {s}")),
        }
    }
}

impl WineColor {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            WineColor::Red => "red",
            WineColor::White => "white",
            WineColor::Rose => "rose",
            WineColor::Sparkling => "sparkling",
        }
    }
}

/// A bottle (or case) in the owner's collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Wine {
    /// Unique identifier for the wine
    pub id: u64,

    /// Owner of the collection this wine belongs to
    pub owner: String,

    /// Label name, e.g. "Château Musar"
    pub name: String,

    pub color: WineColor,

    pub vintage: Option<i32>,

    pub region: Option<String>,

    /// Free-form style hint such as "oaked" or "late harvest"
    pub style: Option<String>,

    /// Alcohol by volume in percent
    pub abv: Option<f64>,

    /// Bottles on hand
    pub quantity: u32,

    #[serde(default)]
    pub readiness: Readiness,

    /// Owner's rating on a 0–5 scale
    pub rating: Option<f32>,

    /// Previously computed profile, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<WineProfile>,

    /// Timestamp when the wine was added (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the wine was last modified (UTC)
    pub updated_at: Timestamp,
}
