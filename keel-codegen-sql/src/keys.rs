//! Primary and foreign key inference.

use keel_ir::{DefinitionTable, Kind, ObjectType, Property};

use crate::type_mapper::PostgresTypeMapper;

/// Key columns of an object, in property order.
///
/// Properties marked `x-primary-key` form the key. When none is marked, a
/// property named `id` is the key. Otherwise the object has no key.
pub fn primary_key_columns(object: &ObjectType) -> Vec<&Property> {
    let marked: Vec<&Property> = object.properties.iter().filter(|p| p.primary_key).collect();
    if !marked.is_empty() {
        return marked;
    }
    object.property("id").into_iter().collect()
}

/// A column referencing the single-column key of another table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    pub target_table: String,
    pub target_column: String,
    /// Column type of the target key, used for the referencing column.
    pub sql_type: &'static str,
}

/// The foreign key implied by a property, if any.
///
/// Only a direct reference to an object definition with exactly one key
/// column qualifies.
pub fn foreign_key_for(definitions: &DefinitionTable, property: &Property) -> Option<ForeignKey> {
    let target = property.ty.kind.ref_target()?;
    let Kind::Object(object) = &definitions.get(target)?.kind else {
        return None;
    };

    match primary_key_columns(object).as_slice() {
        [key] => Some(ForeignKey {
            target_table: target.to_string(),
            target_column: key.name.clone(),
            sql_type: PostgresTypeMapper::new(definitions).column_type(&key.ty),
        }),
        keys => {
            tracing::debug!(
                property = property.name.as_str(),
                definition = target,
                keys = keys.len(),
                "target is not a single-column key, no foreign key"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use keel_ir::{Primitive, StringFormat, TypeDef};

    use super::*;

    fn uuid() -> TypeDef {
        TypeDef::new(Kind::Primitive(Primitive::String(Some(StringFormat::Uuid))))
    }

    fn integer() -> TypeDef {
        TypeDef::new(Kind::Primitive(Primitive::Integer))
    }

    fn object(properties: Vec<Property>) -> TypeDef {
        TypeDef::new(Kind::Object(ObjectType {
            properties,
            ..ObjectType::default()
        }))
    }

    fn names(columns: Vec<&Property>) -> Vec<&str> {
        columns.into_iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_marked_columns_win_over_id() {
        let object = ObjectType {
            properties: vec![
                Property::new("id", integer()),
                Property::new("tenant", uuid()).primary_key(),
                Property::new("slug", integer()).primary_key(),
            ],
            ..ObjectType::default()
        };
        assert_eq!(names(primary_key_columns(&object)), ["tenant", "slug"]);
    }

    #[test]
    fn test_id_fallback() {
        let object = ObjectType {
            properties: vec![Property::new("name", integer()), Property::new("id", integer())],
            ..ObjectType::default()
        };
        assert_eq!(names(primary_key_columns(&object)), ["id"]);
        assert!(primary_key_columns(&ObjectType::default()).is_empty());
    }

    #[test]
    fn test_foreign_key_to_single_key_object() {
        let defs: DefinitionTable = [
            (
                "Org".to_string(),
                object(vec![Property::new("key", uuid()).primary_key()]),
            ),
            (
                "Pair".to_string(),
                object(vec![
                    Property::new("a", integer()).primary_key(),
                    Property::new("b", integer()).primary_key(),
                ]),
            ),
            ("Keyless".to_string(), object(vec![Property::new("x", integer())])),
            ("Code".to_string(), integer()),
        ]
        .into_iter()
        .collect();

        let org = Property::new("org", TypeDef::new(Kind::Ref("Org".into())));
        assert_eq!(
            foreign_key_for(&defs, &org),
            Some(ForeignKey {
                target_table: "Org".into(),
                target_column: "key".into(),
                sql_type: "uuid",
            })
        );

        for target in ["Pair", "Keyless", "Code"] {
            let property = Property::new("p", TypeDef::new(Kind::Ref(target.into())));
            assert_eq!(foreign_key_for(&defs, &property), None, "{target}");
        }
        assert_eq!(foreign_key_for(&defs, &Property::new("n", integer())), None);
    }
}
