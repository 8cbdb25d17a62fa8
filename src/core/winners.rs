//! Ordered record of spin results.

use chrono::{DateTime, Local};

/// A single recorded result.
#[derive(Debug, Clone, PartialEq)]
pub struct Winner {
    pub name: String,
    pub won_at: DateTime<Local>,
}

/// Append-only (until cleared) list of winners.  The same name may appear
/// more than once.
#[derive(Debug, Clone, Default)]
pub struct Winners {
    entries: Vec<Winner>,
}

impl Winners {
    pub fn record(&mut self, name: impl Into<String>) {
        self.entries.push(Winner {
            name: name.into(),
            won_at: Local::now(),
        });
    }

    pub fn entries(&self) -> &[Winner] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|w| w.name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
