//! PrestaShop filter building
//!
//! Provides typed filter conditions for the webservice `filter[field]` dialect

use serde::{Deserialize, Serialize};

/// Comparison operators understood by the webservice filter syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionType {
    #[default]
    Eq,
    Neq,
    Gt,
    Lt,
    /// Pipe-separated list inside the value (example: `1|2|3`)
    In,
    /// Pipe-separated list inside the value, negated
    Nin,
    /// Comma-separated range inside the value (example: `10,33`)
    Interval,
    /// SQL-style `%` wildcard at the beginning, end or both
    Like,
}

impl ConditionType {
    /// Operator placed between `filter[field]` and the bracketed value
    pub fn operator(&self) -> &'static str {
        match self {
            ConditionType::Eq | ConditionType::In | ConditionType::Interval | ConditionType::Like => "=",
            // `!` negates the whole bracket, so `=![1|2]` reads as "none of"
            ConditionType::Neq | ConditionType::Nin => "=!",
            ConditionType::Gt => "=>",
            ConditionType::Lt => "=<",
        }
    }
}

impl std::str::FromStr for ConditionType {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> anyhow::Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "eq" => Ok(ConditionType::Eq),
            "neq" => Ok(ConditionType::Neq),
            "gt" => Ok(ConditionType::Gt),
            "lt" => Ok(ConditionType::Lt),
            "in" => Ok(ConditionType::In),
            "nin" => Ok(ConditionType::Nin),
            "interval" => Ok(ConditionType::Interval),
            "like" => Ok(ConditionType::Like),
            other => anyhow::bail!("Unknown condition type '{}'", other),
        }
    }
}

/// One filter predicate of a search request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub field: String,
    #[serde(default, alias = "conditionType")]
    pub condition_type: ConditionType,
    #[serde(default, deserialize_with = "crate::api::payload::multilang::string_or_number")]
    pub value: String,
}

impl Condition {
    pub fn new(field: impl Into<String>, condition_type: ConditionType, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            condition_type,
            value: value.into(),
        }
    }

    pub fn eq(field: impl Into<String>, value: impl ToString) -> Self {
        Self::new(field, ConditionType::Eq, value.to_string())
    }

    pub fn neq(field: impl Into<String>, value: impl ToString) -> Self {
        Self::new(field, ConditionType::Neq, value.to_string())
    }

    pub fn gt(field: impl Into<String>, value: impl ToString) -> Self {
        Self::new(field, ConditionType::Gt, value.to_string())
    }

    pub fn lt(field: impl Into<String>, value: impl ToString) -> Self {
        Self::new(field, ConditionType::Lt, value.to_string())
    }

    pub fn like(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::new(field, ConditionType::Like, pattern)
    }

    /// Render as `filter[field]<op><value>`
    pub fn to_query_string(&self) -> String {
        let value = match self.condition_type {
            ConditionType::Like => translate_like_pattern(&self.value),
            _ => format!("[{}]", self.value),
        };
        format!("filter[{}]{}{}", self.field, self.condition_type.operator(), value)
    }
}

/// Move SQL-style `%` wildcards outside of the bracketed literal.
///
/// `%foo%` becomes `%[foo]%`, `%foo` becomes `%[foo]`, `foo%` becomes `[foo]%`
/// and anything else is simply bracketed.
pub fn translate_like_pattern(value: &str) -> String {
    let leading = value.starts_with('%');
    let trailing = value.ends_with('%');

    match (leading, trailing) {
        (true, true) => {
            let inner = if value.len() >= 2 { &value[1..value.len() - 1] } else { "" };
            format!("%[{}]%", inner)
        }
        (true, false) => format!("%[{}]", &value[1..]),
        (false, true) => format!("[{}]%", &value[..value.len() - 1]),
        (false, false) => format!("[{}]", value),
    }
}
