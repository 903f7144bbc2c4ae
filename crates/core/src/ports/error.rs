use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// A collaborator could not be reached or answered with something unusable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Transport failure: {0}")]
pub struct TransportError(pub String);

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Structured validation failure: field name to messages.
///
/// Each field may arrive as a single message or a list of messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a message for `field`.
    pub fn with(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.0.entry(field.into()).or_default().push(message.into());
        self
    }

    /// Messages for a single field.
    pub fn field(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every message, ordered by field name.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.0.values().flatten().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }
}

impl<'de> Deserialize<'de> for FieldErrors {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Messages(
            #[serde(deserialize_with = "crate::serde::deserialize_one_or_many")] Vec<String>,
        );

        let raw: BTreeMap<String, Messages> = BTreeMap::deserialize(deserializer)?;
        Ok(Self(
            raw.into_iter()
                .map(|(field, Messages(messages))| (field, messages))
                .collect(),
        ))
    }
}

/// Reasons a commit was not acknowledged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommitError {
    #[error("Validation failed: {} message(s)", .0.messages().count())]
    Validation(FieldErrors),
    #[error(transparent)]
    Transport(#[from] TransportError),
}
