//! Genre types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of song genres
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Genre {
    Pop,
    Rock,
    Jazz,
    Classical,
    Hiphop,
    Country,
    Electronic,
    #[default]
    Other,
}

impl Genre {
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Pop => "pop",
            Genre::Rock => "rock",
            Genre::Jazz => "jazz",
            Genre::Classical => "classical",
            Genre::Hiphop => "hiphop",
            Genre::Country => "country",
            Genre::Electronic => "electronic",
            Genre::Other => "other",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Genre {
    type Err = crate::ChordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pop" => Ok(Genre::Pop),
            "rock" => Ok(Genre::Rock),
            "jazz" => Ok(Genre::Jazz),
            "classical" => Ok(Genre::Classical),
            "hiphop" => Ok(Genre::Hiphop),
            "country" => Ok(Genre::Country),
            "electronic" => Ok(Genre::Electronic),
            "other" => Ok(Genre::Other),
            unknown => Err(crate::ChordError::invalid_input(format!(
                "Unknown genre: {unknown}"
            ))),
        }
    }
}
