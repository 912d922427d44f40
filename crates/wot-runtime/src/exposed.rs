//! Exposed thing records.
//!
//! A servient keeps one [`ExposedThing`] per name. Only the description is
//! held; serving interactions to remote callers is out of scope.

use std::sync::Arc;

use serde_json::Value;
use wot_core::{DescriptionResult, ThingDescription};

/// A thing registered with a servient under its name.
#[derive(Debug, Clone)]
pub struct ExposedThing {
    name: String,
    description: Arc<ThingDescription>,
}

impl ExposedThing {
    /// Creates a record with an empty description named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_description(ThingDescription::new(name))
    }

    /// Creates a record from a parsed description; the name is taken from it.
    pub fn from_description(description: impl Into<Arc<ThingDescription>>) -> Self {
        let description = description.into();
        Self {
            name: description.name.clone(),
            description,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn thing_description(&self) -> &ThingDescription {
        &self.description
    }

    /// Returns the description in its serialized object form.
    pub fn description(&self) -> DescriptionResult<Value> {
        self.description.to_value()
    }
}
