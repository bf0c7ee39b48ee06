//! Partial-update planning.
//!
//! An update body `{ "title": "x", "views": 3 }` becomes
//!
//! ```text
//! SET #key0 = :value0, #key1 = :value1
//! ```
//!
//! with `#key0 -> "title"`, `#key1 -> "views"` as attribute names and
//! `:value0 -> "x"`, `:value1 -> 3` as attribute values. Field names only ever
//! reach the backend through the name map, so reserved words and odd
//! characters in user-supplied keys cannot alter the expression.
//!
//! This is part of the Functional Core - all functions are pure with no side effects.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::RequestError;
use crate::record::Record;

/// One `SET` assignment with its generated placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetClause {
    pub name_placeholder: String,
    pub value_placeholder: String,
    pub field: String,
    pub value: Value,
}

/// A field-by-field merge of an update body into a stored record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePlan {
    clauses: Vec<SetClause>,
}

impl UpdatePlan {
    /// Plans one `SET` clause per body field, numbered in field order.
    ///
    /// An empty body is rejected here rather than sent to the backend as an
    /// expression with no clauses.
    pub fn from_record(body: &Record) -> Result<Self, RequestError> {
        if body.is_empty() {
            return Err(RequestError::EmptyUpdate);
        }

        let clauses = body
            .fields()
            .enumerate()
            .map(|(index, (field, value))| SetClause {
                name_placeholder: format!("#key{index}"),
                value_placeholder: format!(":value{index}"),
                field: field.clone(),
                value: value.clone(),
            })
            .collect();

        Ok(Self { clauses })
    }

    pub fn clauses(&self) -> &[SetClause] {
        &self.clauses
    }

    /// The update expression, built from placeholders only.
    pub fn expression(&self) -> String {
        let assignments: Vec<String> = self
            .clauses
            .iter()
            .map(|c| format!("{} = {}", c.name_placeholder, c.value_placeholder))
            .collect();

        format!("SET {}", assignments.join(", "))
    }

    /// Name placeholder to field name.
    pub fn attribute_names(&self) -> BTreeMap<String, String> {
        self.clauses
            .iter()
            .map(|c| (c.name_placeholder.clone(), c.field.clone()))
            .collect()
    }

    /// Value placeholder to field value.
    pub fn attribute_values(&self) -> BTreeMap<String, Value> {
        self.clauses
            .iter()
            .map(|c| (c.value_placeholder.clone(), c.value.clone()))
            .collect()
    }

    pub fn touches(&self, field: &str) -> bool {
        self.clauses.iter().any(|c| c.field == field)
    }

    /// Applies every assignment to `record`, leaving other fields untouched.
    pub fn apply_to(&self, record: &mut Record) {
        for clause in &self.clauses {
            record.insert(clause.field.clone(), clause.value.clone());
        }
    }
}
