//! PrestaShop sort building
//!
//! Provides ordered `sort=[field_DIR,...]` construction

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> anyhow::Result<Self> {
        match value.to_ascii_uppercase().as_str() {
            "ASC" => Ok(SortDirection::Asc),
            "DESC" => Ok(SortDirection::Desc),
            other => anyhow::bail!("Unknown sort direction '{}', expected ASC or DESC", other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortDirective {
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortDirective {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Convert to a single `field_DIR` sort entry
    pub fn to_sort_entry(&self) -> String {
        format!("{}_{}", self.field, self.direction.as_str())
    }
}

/// Helper to combine multiple sort directives, order is precedence
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortClause {
    directives: Vec<SortDirective>,
}

impl SortClause {
    pub fn new() -> Self {
        Self {
            directives: Vec::new(),
        }
    }

    pub fn add(mut self, directive: SortDirective) -> Self {
        self.directives.push(directive);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    pub fn directives(&self) -> &[SortDirective] {
        &self.directives
    }

    /// Bracketed, comma-joined value of the `sort` parameter (not yet URL encoded)
    pub fn to_sort_value(&self) -> Option<String> {
        if self.directives.is_empty() {
            None
        } else {
            let entries: Vec<String> = self.directives.iter().map(|d| d.to_sort_entry()).collect();
            Some(format!("[{}]", entries.join(",")))
        }
    }
}

impl From<Vec<SortDirective>> for SortClause {
    fn from(directives: Vec<SortDirective>) -> Self {
        Self { directives }
    }
}
