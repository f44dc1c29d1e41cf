//! Payload shapes read from the API and the record the pipeline builds.

use serde::{Deserialize, Serialize};

/// Primary entity payload. Only the fields the pipeline reads; the rest are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PrimaryEntity {
    pub name: String,
    /// Film references, in payload order. Absent means no films.
    #[serde(default)]
    pub films: Vec<String>,
}

/// Film payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Film {
    pub title: String,
}

/// The record one pipeline run produces: a name and the titles of its films.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Character {
    pub name: String,
    pub film_titles: Vec<String>,
}

impl Character {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.film_titles.is_empty()
    }
}
