//! Session configuration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::ident::quote_char_for_driver;

/// Configuration for a [`Session`](crate::session::Session).
///
/// All fields have workable defaults; deserializing a partial document
/// fills the rest in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Driver name, used to pick the identifier quote character when
    /// `quote_character` is not set.
    pub driver_name: String,
    /// Explicit identifier quote character; overrides the driver default.
    pub quote_character: Option<char>,
    /// Primary key column assumed for every table without an override.
    pub id_column: String,
    /// Per-table primary key column overrides.
    pub id_overrides: HashMap<String, String>,
    /// Serve repeated identical SELECTs from an in-memory cache.
    pub enable_cache: bool,
    /// Record executed statements in the session's query log.
    pub enable_query_log: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            driver_name: "sqlite".to_string(),
            quote_character: None,
            id_column: "id".to_string(),
            id_overrides: HashMap::new(),
            enable_cache: false,
            enable_query_log: false,
        }
    }
}

impl Config {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the driver name.
    pub fn driver(mut self, name: &str) -> Self {
        self.driver_name = name.to_string();
        self
    }

    /// Force a specific identifier quote character.
    pub fn quote(mut self, quote: char) -> Self {
        self.quote_character = Some(quote);
        self
    }

    /// Set the primary key column assumed for tables without an override.
    pub fn default_id_column(mut self, column: &str) -> Self {
        self.id_column = column.to_string();
        self
    }

    /// Override the primary key column for one table.
    pub fn id_override(mut self, table: &str, column: &str) -> Self {
        self.id_overrides
            .insert(table.to_string(), column.to_string());
        self
    }

    /// Enable the query cache.
    pub fn with_cache(mut self) -> Self {
        self.enable_cache = true;
        self
    }

    /// Enable the query log.
    pub fn with_query_log(mut self) -> Self {
        self.enable_query_log = true;
        self
    }

    /// The identifier quote character: the explicit override when set,
    /// otherwise derived from the driver name.
    pub fn quote_char(&self) -> char {
        self.quote_character
            .unwrap_or_else(|| quote_char_for_driver(&self.driver_name))
    }

    /// The primary key column for a table, honoring per-table overrides.
    pub fn id_column_for(&self, table: &str) -> &str {
        self.id_overrides
            .get(table)
            .map(String::as_str)
            .unwrap_or(&self.id_column)
    }
}
