//! Adapts plain-function resolvers to dynamic field resolvers.

use std::sync::Arc;

use async_graphql::dynamic::{FieldValue, ResolverContext};
use async_graphql::{Error, Name, Value};
use indexmap::IndexMap;

use crate::types::{
    EnumType, FieldDef, FieldResolver, NamedType, ResolverArgs, SchemaType, TypeRef,
};

/// Everything a dynamic field needs at execution time.
#[derive(Debug)]
pub(crate) struct FieldBinding {
    field: Name,
    ty: TypeRef,
    resolver: Option<FieldResolver>,
    /// Argument types, consulted to hand enum arguments over as literals.
    args: IndexMap<Name, TypeRef>,
}

impl FieldBinding {
    pub(crate) fn new(field: &FieldDef) -> Self {
        Self {
            field: field.name.clone(),
            ty: field.ty.clone(),
            resolver: field.resolver.clone(),
            args: field
                .args
                .iter()
                .map(|(name, arg)| (name.clone(), arg.ty.clone()))
                .collect(),
        }
    }

    /// Runs the attached resolver, or reads the parent property of the same
    /// name, and shapes the result for the host executor.
    pub(crate) fn resolve<'a>(
        &self,
        ctx: &ResolverContext<'a>,
    ) -> Result<Option<FieldValue<'a>>, Error> {
        let parent = ctx.parent_value.as_value().cloned();
        let value = match &self.resolver {
            Some(resolver) => {
                let args = ctx
                    .args
                    .iter()
                    .map(|(name, value)| {
                        let value = value.as_value().clone();
                        let value = match self.args.get(name) {
                            Some(ty) => input_literal(ty, value),
                            None => value,
                        };
                        (name.clone(), value)
                    })
                    .collect();
                resolver.call(&ResolverArgs { parent, args })?
            }
            None => match parent {
                Some(Value::Object(mut obj)) => obj.swap_remove(&self.field).unwrap_or(Value::Null),
                _ => Value::Null,
            },
        };

        if value == Value::Null {
            return Ok(None);
        }
        to_field_value(&self.ty, value).map(Some)
    }
}

/// Returns the enum type behind a reference, if it was resolved to one.
fn resolved_enum(ty: &TypeRef) -> Option<&EnumType> {
    match ty.innermost() {
        NamedType::Resolved(resolved) => match resolved.as_ref() {
            SchemaType::Enum(enum_type) => Some(enum_type),
            _ => None,
        },
        _ => None,
    }
}

/// Maps enum value names in an argument to their literals.
fn input_literal(ty: &TypeRef, value: Value) -> Value {
    let Some(enum_type) = resolved_enum(ty) else {
        return value;
    };
    map_leaves(value, &|leaf| match leaf {
        Value::Enum(name) => enum_type
            .literal_for(name.as_str())
            .cloned()
            .unwrap_or(Value::Enum(name)),
        Value::String(name) => enum_type
            .literal_for(&name)
            .cloned()
            .unwrap_or(Value::String(name)),
        other => other,
    })
}

fn map_leaves(value: Value, f: &dyn Fn(Value) -> Value) -> Value {
    match value {
        Value::List(items) => Value::List(items.into_iter().map(|i| map_leaves(i, f)).collect()),
        other => f(other),
    }
}

/// Shapes a resolver result along the field's type: lists become list field
/// values, enum literals become enum names, abstract values get tagged with
/// their concrete type.
pub(crate) fn to_field_value<'a>(ty: &TypeRef, value: Value) -> Result<FieldValue<'a>, Error> {
    match ty {
        TypeRef::NonNull(inner) => to_field_value(inner, value),
        TypeRef::List(inner) => match value {
            Value::Null => Ok(FieldValue::NULL),
            Value::List(items) => Ok(FieldValue::list(
                items
                    .into_iter()
                    .map(|item| to_field_value(inner, item))
                    .collect::<Result<Vec<_>, Error>>()?,
            )),
            other => Err(Error::new(format!("expected a list for `{ty}`, got `{other}`"))),
        },
        TypeRef::Named(named) => named_value(named, value),
    }
}

fn named_value<'a>(named: &NamedType, value: Value) -> Result<FieldValue<'a>, Error> {
    if value == Value::Null {
        return Ok(FieldValue::NULL);
    }
    let Some(resolved) = named.resolved().map(Arc::as_ref) else {
        return Ok(FieldValue::value(value));
    };

    let resolve_type = match resolved {
        SchemaType::Enum(enum_type) => {
            let value = match enum_type.name_for_literal(&value) {
                Some(name) => Value::Enum(name.clone()),
                None => value,
            };
            return Ok(FieldValue::value(value));
        }
        SchemaType::Interface(interface) => interface.resolve_type.as_ref(),
        SchemaType::Union(union) => union.resolve_type.as_ref(),
        _ => None,
    };

    match resolve_type {
        Some(hook) => {
            let concrete = hook.call(&value).ok_or_else(|| {
                Error::new(format!(
                    "unable to determine the concrete type of `{}`",
                    resolved.name()
                ))
            })?;
            Ok(FieldValue::value(value).with_type(concrete))
        }
        None => Ok(FieldValue::value(value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::AstTypeBuilder;
    use crate::extend::extend_enum;
    use crate::types::EnumValues;

    fn resolved(sdl: &str) -> TypeRef {
        let ty = AstTypeBuilder::new().build(sdl).unwrap();
        TypeRef::NonNull(Box::new(TypeRef::Named(NamedType::Resolved(Arc::new(ty)))))
    }

    fn level() -> TypeRef {
        let built = AstTypeBuilder::new().build("enum Level { LOW HIGH }").unwrap();
        let SchemaType::Enum(built) = built else {
            panic!("expected enum");
        };
        let extended = extend_enum(&built, &EnumValues::new().value("LOW", 1).value("HIGH", 2));
        TypeRef::Named(NamedType::Resolved(Arc::new(SchemaType::Enum(extended))))
    }

    #[test]
    fn test_input_literal_maps_enum_names() {
        let ty = TypeRef::List(Box::new(level()));
        let value = Value::List(vec![
            Value::Enum(Name::new("HIGH")),
            Value::Enum(Name::new("LOW")),
        ]);
        assert_eq!(
            input_literal(&ty, value),
            Value::List(vec![Value::from(2), Value::from(1)])
        );
    }

    #[test]
    fn test_input_literal_ignores_other_types() {
        let ty = resolved("scalar Date");
        assert_eq!(input_literal(&ty, Value::from("x")), Value::from("x"));
    }

    #[test]
    fn test_list_shape_mismatch() {
        let ty = TypeRef::List(Box::new(level()));
        assert!(to_field_value(&ty, Value::from(1)).is_err());
    }

    #[test]
    fn test_abstract_without_answer_fails() {
        let SchemaType::Union(mut union) = AstTypeBuilder::new().build("union U = A | B").unwrap()
        else {
            panic!("expected union");
        };
        union.resolve_type = Some(crate::types::ResolveTypeFn::new(|_| None));
        let ty = TypeRef::Named(NamedType::Resolved(Arc::new(SchemaType::Union(union))));
        assert!(named_value(ty.innermost(), Value::from("a")).is_err());
    }
}
