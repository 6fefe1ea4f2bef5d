use std::collections::BTreeMap;

use serde::Serialize;

/// One entry of an index page: the detail-page identifier and the label shown
/// next to it.
///
/// Some listings carry data the detail page lacks; it travels in `extras` and
/// is merged into the parsed record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemReference {
    pub id: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extras: BTreeMap<String, String>,
}

impl ItemReference {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            extras: BTreeMap::new(),
        }
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
    Records(Vec<Record>),
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

impl From<Vec<Record>> for FieldValue {
    fn from(value: Vec<Record>) -> Self {
        FieldValue::Records(value)
    }
}

/// Parsed output of one detail page.
///
/// Serializes flat: `id`, `name`, then the remaining fields in key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    id: String,
    name: String,
    #[serde(flatten)]
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    const RESERVED: [&'static str; 2] = ["id", "name"];

    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Adds a field. `id` and `name` are fixed at construction and are ignored here.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        let key = key.into();
        if !Self::RESERVED.contains(&key.as_str()) {
            self.fields.insert(key, value.into());
        }
        self
    }

    /// Adds each entry whose key the record does not have yet.
    pub fn with_missing_fields<'a, I>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        for (key, value) in entries {
            if Self::RESERVED.contains(&key.as_str()) || self.fields.contains_key(key) {
                continue;
            }
            self.fields.insert(key.clone(), FieldValue::Text(value.clone()));
        }
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        match self.fields.get(key) {
            Some(FieldValue::Text(text)) => Some(text),
            _ => None,
        }
    }
}
