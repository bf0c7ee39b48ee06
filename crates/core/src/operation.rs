use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The five post operations. Each is deployed as its own function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Get,
    Create,
    Update,
    Delete,
    List,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown operation `{0}`, expected one of: get, create, update, delete, list")]
pub struct ParseOperationError(String);

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::Get,
        Operation::Create,
        Operation::Update,
        Operation::Delete,
        Operation::List,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::Get => "get",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::List => "list",
        }
    }

    pub fn success_message(self) -> &'static str {
        match self {
            Operation::Get => "Successfully retrieved post.",
            Operation::Create => "Successfully created post.",
            Operation::Update => "Successfully updated post.",
            Operation::Delete => "Successfully deleted post.",
            Operation::List => "Successfully retrieve all post.",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::Get => "Failed to get post.",
            Operation::Create => "Failed to post post.",
            Operation::Update => "Failed to update post.",
            Operation::Delete => "Failed to delete post.",
            Operation::List => "Failed to retrieve all post.",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = ParseOperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseOperationError(s.to_string()))
    }
}
