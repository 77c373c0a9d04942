//! Query filters for listing books.

use super::models::Book;

/// Raw `GET /books` query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub name: Option<String>,
    pub reading: Option<String>,
    pub finished: Option<String>,
}

impl ListQuery {
    /// Collect the known keys from decoded query pairs. A repeated key keeps
    /// its first value; unknown keys are ignored.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "name" => &mut query.name,
                "reading" => &mut query.reading,
                "finished" => &mut query.finished,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }
}

/// Parse a `reading`/`finished` query flag.
///
/// | query value   | result          |
/// |---------------|-----------------|
/// | absent        | `None` (no filter) |
/// | `"1"`         | `Some(true)`    |
/// | anything else | `Some(false)`   |
pub fn parse_flag(value: Option<&str>) -> Option<bool> {
    value.map(|v| v == "1")
}

/// Parsed list filters; every present filter must match (AND).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    /// Lowercased substring to look for in the book name
    pub name: Option<String>,
    pub reading: Option<bool>,
    pub finished: Option<bool>,
}

impl ListFilter {
    pub fn matches(&self, book: &Book) -> bool {
        if let Some(needle) = &self.name {
            if !book.name.to_lowercase().contains(needle.as_str()) {
                return false;
            }
        }
        if let Some(reading) = self.reading {
            if book.reading != reading {
                return false;
            }
        }
        if let Some(finished) = self.finished {
            if book.finished != finished {
                return false;
            }
        }
        true
    }
}

impl From<ListQuery> for ListFilter {
    fn from(query: ListQuery) -> Self {
        Self {
            name: query.name.map(|name| name.to_lowercase()),
            reading: parse_flag(query.reading.as_deref()),
            finished: parse_flag(query.finished.as_deref()),
        }
    }
}
