use std::collections::BTreeMap;

use serde::Serialize;

/// Per-field validation messages, returned with a 400 so the client can
/// redisplay the form inline.
#[derive(Serialize, Default, Debug)]
pub struct FormErrors {
    pub errors: BTreeMap<String, Vec<String>>,
}

impl FormErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}
