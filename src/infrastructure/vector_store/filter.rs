use qdrant_client::qdrant::{Condition as QdrantCondition, Filter};

use crate::domain::{Condition, FieldValue, FilterSpec};

/// Translates a [`FilterSpec`] into Qdrant's native filter expression.
///
/// Returns `None` for an empty spec so callers can distinguish "search
/// everything" from a filter that matches nothing. Pure and deterministic;
/// callers validate the spec before building.
pub fn build_filter(spec: &FilterSpec) -> Option<Filter> {
    if spec.is_empty() {
        return None;
    }

    Some(Filter {
        must: conditions(&spec.must),
        should: conditions(&spec.should),
        must_not: conditions(&spec.must_not),
        ..Default::default()
    })
}

fn conditions(group: &[Condition]) -> Vec<QdrantCondition> {
    group.iter().map(to_qdrant).collect()
}

fn to_qdrant(condition: &Condition) -> QdrantCondition {
    match condition {
        Condition::Equals { field, value } => match value {
            FieldValue::String(s) => QdrantCondition::matches(field.clone(), s.clone()),
            FieldValue::Integer(i) => QdrantCondition::matches(field.clone(), *i),
            FieldValue::Bool(b) => QdrantCondition::matches(field.clone(), *b),
        },
        // Validation guarantees a non-empty, homogeneous set of strings or
        // integers before this point is reached.
        Condition::AnyOf { field, values } => {
            if matches!(values.first(), Some(FieldValue::Integer(_))) {
                let ints: Vec<i64> = values
                    .iter()
                    .filter_map(|v| match v {
                        FieldValue::Integer(i) => Some(*i),
                        _ => None,
                    })
                    .collect();
                QdrantCondition::matches(field.clone(), ints)
            } else {
                let keywords: Vec<String> = values
                    .iter()
                    .filter_map(|v| match v {
                        FieldValue::String(s) => Some(s.clone()),
                        _ => None,
                    })
                    .collect();
                QdrantCondition::matches(field.clone(), keywords)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_spec_builds_no_filter() {
        assert!(build_filter(&FilterSpec::new()).is_none());
    }

    #[test]
    fn test_groups_map_to_qdrant_clauses() {
        let spec = FilterSpec::new()
            .must(Condition::equals("lang", "en"))
            .must(Condition::equals("chunk_id", 0i64))
            .should(Condition::equals("section", "library"))
            .must_not(Condition::any_of("section", ["deprecated", "legacy"]));

        let filter = build_filter(&spec).unwrap();
        assert_eq!(filter.must.len(), 2);
        assert_eq!(filter.should.len(), 1);
        assert_eq!(filter.must_not.len(), 1);
    }

    #[test]
    fn test_single_group_leaves_others_empty() {
        let spec = FilterSpec::new().must(Condition::equals("url", "https://docs.example.com/"));
        let filter = build_filter(&spec).unwrap();

        assert_eq!(filter.must.len(), 1);
        assert!(filter.should.is_empty());
        assert!(filter.must_not.is_empty());
    }
}
