//! Object merger (spec.md §4.6): `merge(base, extension)`.

use vela_values::{ObjectValue, Value, ValueField};

/// Produces the merged object per spec.md §4.6's field-by-field rule.
/// Both operands are assumed already forced.
pub fn merge(base: &ObjectValue, extension: &ObjectValue) -> ObjectValue {
    let mut result_fields: Vec<ValueField> = Vec::with_capacity(base.fields.len() + extension.fields.len());

    for base_field in &base.fields {
        match extension.get(&base_field.name) {
            Some(ext_field) => {
                let merged = if ext_field.is_patch {
                    match (&base_field.value, &ext_field.value) {
                        (Value::Object(b), Value::Object(e)) => ValueField {
                            name: base_field.name.clone(),
                            value: Value::object(merge(b, e)),
                            is_patch: false,
                        },
                        // Non-object base under a patch flag: extension
                        // wins verbatim (spec.md §9 open question 1).
                        _ => ValueField {
                            name: base_field.name.clone(),
                            value: ext_field.value.clone(),
                            is_patch: ext_field.is_patch,
                        },
                    }
                } else {
                    ValueField {
                        name: base_field.name.clone(),
                        value: ext_field.value.clone(),
                        is_patch: ext_field.is_patch,
                    }
                };
                result_fields.push(merged);
            }
            None => result_fields.push(base_field.clone()),
        }
    }

    for ext_field in &extension.fields {
        if base.get(&ext_field.name).is_none() {
            result_fields.push(ext_field.clone());
        }
    }

    ObjectValue {
        fields: result_fields,
        doc: extension.doc.clone().or_else(|| base.doc.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn field(name: &str, value: Value, is_patch: bool) -> ValueField {
        ValueField {
            name: Rc::from(name),
            value,
            is_patch,
        }
    }

    #[test]
    fn shallow_overwrite_replaces_value() {
        let base = ObjectValue {
            fields: vec![field("a", Value::int(1), false)],
            doc: None,
        };
        let extension = ObjectValue {
            fields: vec![field("a", Value::int(2), false)],
            doc: None,
        };
        let merged = merge(&base, &extension);
        assert_eq!(merged.get("a").unwrap().value, Value::int(2));
    }

    #[test]
    fn patch_recursively_merges_nested_objects() {
        let inner_base = ObjectValue {
            fields: vec![field("x", Value::int(1), false)],
            doc: None,
        };
        let inner_ext = ObjectValue {
            fields: vec![field("y", Value::int(2), false)],
            doc: None,
        };
        let base = ObjectValue {
            fields: vec![field("a", Value::object(inner_base), false)],
            doc: None,
        };
        let extension = ObjectValue {
            fields: vec![field("a", Value::object(inner_ext), true)],
            doc: None,
        };
        let merged = merge(&base, &extension);
        let a_field = merged.get("a").unwrap();
        assert!(!a_field.is_patch);
        let Value::Object(a) = &a_field.value else {
            panic!("expected object")
        };
        assert_eq!(a.get("x").unwrap().value, Value::int(1));
        assert_eq!(a.get("y").unwrap().value, Value::int(2));
    }

    #[test]
    fn patch_over_non_object_base_extension_wins_verbatim() {
        let base = ObjectValue {
            fields: vec![field("a", Value::int(1), false)],
            doc: None,
        };
        let extension = ObjectValue {
            fields: vec![field(
                "a",
                Value::object(ObjectValue {
                    fields: vec![field("b", Value::int(2), false)],
                    doc: None,
                }),
                true,
            )],
            doc: None,
        };
        let merged = merge(&base, &extension);
        assert!(matches!(merged.get("a").unwrap().value, Value::Object(_)));
    }

    #[test]
    fn extension_only_fields_are_appended_in_order() {
        let base = ObjectValue {
            fields: vec![field("a", Value::int(1), false)],
            doc: None,
        };
        let extension = ObjectValue {
            fields: vec![field("b", Value::int(2), false)],
            doc: None,
        };
        let merged = merge(&base, &extension);
        let names: Vec<&str> = merged.fields.iter().map(|f| &*f.name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
