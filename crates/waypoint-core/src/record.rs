//! Accumulated records and the patches steps contribute to them.
//!
//! Every flow accumulates a single flat record shared by all of its steps.
//! Steps never write the record directly: they hand the controller a patch,
//! and the controller merges it. The merge contract is shallow and additive:
//!
//! - a field carried by the patch overwrites the record's field,
//! - a field the patch does not carry leaves the record untouched,
//! - nothing is ever removed. Clearing a field means writing an empty value.
//!
//! [`Fields`] is the untyped record (a JSON object) used by scripted flows and
//! tests; the typed records live in [`crate::flows`].

use std::fmt::Debug;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

/// Partial data produced by one step.
pub trait Patch: Clone + Debug + Default + Serialize + DeserializeOwned {
    /// Whether the boolean signal `name` is set on this patch.
    ///
    /// Branch edges consult signals to decide whether to loop back.
    fn signal(&self, name: &str) -> bool {
        let _ = name;
        false
    }
}

/// A record type with shallow-mergeable fields.
pub trait Record: Clone + Debug + Default + Serialize + DeserializeOwned {
    /// Partial update accepted by [`Record::merge`]
    type Patch: Patch;

    /// Version of the record layout, stamped onto drafts.
    const SCHEMA_VERSION: u32;

    /// Merge `patch` into `self`; later values win.
    fn merge(&mut self, patch: Self::Patch);
}

/// Untyped record: a flat JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(transparent)]
pub struct Fields(pub Map<String, Value>);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Read a string field.
    pub fn str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for Fields {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl Patch for Fields {
    fn signal(&self, name: &str) -> bool {
        matches!(self.0.get(name), Some(Value::Bool(true)))
    }
}

impl Record for Fields {
    type Patch = Fields;

    const SCHEMA_VERSION: u32 = 1;

    fn merge(&mut self, patch: Fields) {
        self.0.extend(patch.0);
    }
}

/// Overwrite `target` when the patch carries a value.
///
/// Shared by the typed records, whose fields are all optional.
pub(crate) fn overwrite<T>(target: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *target = value;
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_merge_later_keys_win() {
        let mut record = Fields::new().with("name", "A").with("city", "X");
        record.merge(Fields::new().with("city", "Y").with("stars", 4));

        assert_eq!(record.get("name"), Some(&json!("A")));
        assert_eq!(record.get("city"), Some(&json!("Y")));
        assert_eq!(record.get("stars"), Some(&json!(4)));
        assert_eq!(record.len(), 3);
    }

    #[test]
    fn test_clearing_keeps_key() {
        let mut record = Fields::new().with("name", "A");
        record.merge(Fields::new().with("name", Value::Null));
        assert_eq!(record.get("name"), Some(&Value::Null));
    }

    #[test]
    fn test_signal_requires_literal_true() {
        assert!(Fields::new().with("addAnother", true).signal("addAnother"));
        assert!(!Fields::new().with("addAnother", false).signal("addAnother"));
        assert!(!Fields::new().with("addAnother", "yes").signal("addAnother"));
        assert!(!Fields::new().signal("addAnother"));
    }

    #[test]
    fn test_overwrite_skips_none() {
        let mut field = Some(1);
        overwrite(&mut field, None);
        assert_eq!(field, Some(1));
        overwrite(&mut field, Some(2));
        assert_eq!(field, Some(2));
    }

    #[test]
    fn test_fields_serialize_as_plain_object() {
        let record = Fields::new().with("name", "A");
        assert_eq!(serde_json::to_value(&record).unwrap(), json!({"name": "A"}));
    }
}
