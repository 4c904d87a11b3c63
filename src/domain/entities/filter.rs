use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainError, Result};

/// Scalar payload value a filter condition can compare against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Bool(bool),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// A single field condition: exact match, or membership in a value set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Condition {
    Equals { field: String, value: FieldValue },
    AnyOf { field: String, values: Vec<FieldValue> },
}

impl Condition {
    pub fn equals(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn any_of<V: Into<FieldValue>>(
        field: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self::AnyOf {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn field(&self) -> &str {
        match self {
            Self::Equals { field, .. } | Self::AnyOf { field, .. } => field,
        }
    }

    /// Whether the condition holds for the value stored under its field.
    /// An absent field (`None`) never matches.
    pub fn matches(&self, actual: Option<&FieldValue>) -> bool {
        let Some(actual) = actual else {
            return false;
        };
        match self {
            Self::Equals { value, .. } => actual == value,
            Self::AnyOf { values, .. } => values.contains(actual),
        }
    }
}

/// Boolean condition combinator restricting a similarity search:
/// every `must` condition ANDed, at least one `should` condition (when any
/// are present), every `must_not` condition negated and ANDed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub must: Vec<Condition>,
    pub should: Vec<Condition>,
    pub must_not: Vec<Condition>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn must(mut self, condition: Condition) -> Self {
        self.must.push(condition);
        self
    }

    pub fn should(mut self, condition: Condition) -> Self {
        self.should.push(condition);
        self
    }

    pub fn must_not(mut self, condition: Condition) -> Self {
        self.must_not.push(condition);
        self
    }

    /// An empty spec means "search everything", as opposed to a spec that
    /// happens to match nothing.
    pub fn is_empty(&self) -> bool {
        self.must.is_empty() && self.should.is_empty() && self.must_not.is_empty()
    }

    /// Rejects shapes the store backends cannot express: empty `AnyOf` sets
    /// and sets mixing value kinds (or containing booleans).
    pub fn validate(&self) -> Result<()> {
        for condition in self
            .must
            .iter()
            .chain(self.should.iter())
            .chain(self.must_not.iter())
        {
            if let Condition::AnyOf { field, values } = condition {
                if values.is_empty() {
                    return Err(DomainError::validation(format!(
                        "AnyOf condition on `{field}` has no values"
                    )));
                }
                let homogeneous = values.iter().all(|v| matches!(v, FieldValue::String(_)))
                    || values.iter().all(|v| matches!(v, FieldValue::Integer(_)));
                if !homogeneous {
                    return Err(DomainError::validation(format!(
                        "AnyOf condition on `{field}` must hold all-string or all-integer values"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Evaluates the spec against a record via a field lookup.
    pub fn evaluate(&self, lookup: impl Fn(&str) -> Option<FieldValue>) -> bool {
        if !self
            .must
            .iter()
            .all(|c| c.matches(lookup(c.field()).as_ref()))
        {
            return false;
        }
        if !self.should.is_empty()
            && !self
                .should
                .iter()
                .any(|c| c.matches(lookup(c.field()).as_ref()))
        {
            return false;
        }
        self.must_not
            .iter()
            .all(|c| !c.matches(lookup(c.field()).as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_lookup(field: &str) -> Option<FieldValue> {
        match field {
            "lang" => Some("en".into()),
            "section" => Some("deprecated".into()),
            "chunk_id" => Some(3i64.into()),
            _ => None,
        }
    }

    #[test]
    fn test_empty_spec() {
        let spec = FilterSpec::new();
        assert!(spec.is_empty());
        assert!(spec.validate().is_ok());
        assert!(spec.evaluate(record_lookup));
    }

    #[test]
    fn test_must_and_must_not() {
        let spec = FilterSpec::new()
            .must(Condition::equals("lang", "en"))
            .must_not(Condition::any_of("section", ["deprecated", "legacy"]));

        // The record's section is "deprecated", so the must_not group rejects it.
        assert!(!spec.evaluate(record_lookup));

        let passing = FilterSpec::new()
            .must(Condition::equals("lang", "en"))
            .must_not(Condition::any_of("section", ["legacy"]));
        assert!(passing.evaluate(record_lookup));
    }

    #[test]
    fn test_should_requires_one_match() {
        let spec = FilterSpec::new()
            .should(Condition::equals("lang", "fr"))
            .should(Condition::equals("chunk_id", 3i64));
        assert!(spec.evaluate(record_lookup));

        let spec = FilterSpec::new()
            .should(Condition::equals("lang", "fr"))
            .should(Condition::equals("chunk_id", 7i64));
        assert!(!spec.evaluate(record_lookup));
    }

    #[test]
    fn test_missing_field_never_matches() {
        let spec = FilterSpec::new().must(Condition::equals("author", "anyone"));
        assert!(!spec.evaluate(record_lookup));

        // A must_not on an absent field is vacuously satisfied.
        let spec = FilterSpec::new().must_not(Condition::equals("author", "anyone"));
        assert!(spec.evaluate(record_lookup));
    }

    #[test]
    fn test_validate_rejects_empty_any_of() {
        let spec = FilterSpec::new().must(Condition::AnyOf {
            field: "section".into(),
            values: vec![],
        });
        assert!(matches!(
            spec.validate(),
            Err(crate::domain::errors::DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_rejects_mixed_any_of() {
        let spec = FilterSpec::new().must(Condition::AnyOf {
            field: "section".into(),
            values: vec!["api".into(), 2i64.into()],
        });
        assert!(spec.validate().is_err());

        let spec = FilterSpec::new().must(Condition::any_of("chunk_id", [1i64, 2]));
        assert!(spec.validate().is_ok());
    }
}
