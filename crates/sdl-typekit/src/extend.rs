//! Type extenders.
//!
//! Each extender takes a built type and returns a new one of the same kind
//! with its references resolved and its executable hooks attached. The input
//! is never modified.

use async_graphql::Name;
use indexmap::IndexMap;
use tracing::debug;

use crate::dependencies::{Dependencies, DependencyResolver};
use crate::error::TypeKitError;
use crate::types::{
    EnumType, EnumValues, FieldDef, InputValueDef, InterfaceType, NamedType, ObjectType,
    ResolveTypeFn, Resolvers, UnionType,
};

/// Resolves field and argument types and attaches resolvers by field name.
///
/// Fields without an entry in `resolvers` keep their current resolver.
///
/// # Errors
///
/// Returns `TypeKitError::DependencyLoad` if a dependency cannot be loaded.
pub fn extend_object(
    ty: &ObjectType,
    resolvers: &Resolvers,
    dependencies: &Dependencies,
) -> Result<ObjectType, TypeKitError> {
    debug!(type_name = %ty.name, resolvers = resolvers.len(), "Extending object type");
    let resolver = dependencies.resolver();
    Ok(ObjectType {
        name: ty.name.clone(),
        description: ty.description.clone(),
        implements: resolve_all(&resolver, &ty.implements)?,
        fields: extend_fields(&resolver, &ty.fields, Some(resolvers))?,
    })
}

/// Resolves field and argument types and attaches the resolveType hook.
///
/// # Errors
///
/// Returns `TypeKitError::DependencyLoad` if a dependency cannot be loaded.
pub fn extend_interface(
    ty: &InterfaceType,
    resolve_type: Option<ResolveTypeFn>,
    dependencies: &Dependencies,
) -> Result<InterfaceType, TypeKitError> {
    debug!(type_name = %ty.name, "Extending interface type");
    let resolver = dependencies.resolver();
    Ok(InterfaceType {
        name: ty.name.clone(),
        description: ty.description.clone(),
        implements: resolve_all(&resolver, &ty.implements)?,
        fields: extend_fields(&resolver, &ty.fields, None)?,
        resolve_type,
    })
}

/// Resolves every member type, keeping declaration order, and attaches the
/// resolveType hook.
///
/// # Errors
///
/// Returns `TypeKitError::DependencyLoad` if a dependency cannot be loaded.
pub fn extend_union(
    ty: &UnionType,
    resolve_type: Option<ResolveTypeFn>,
    dependencies: &Dependencies,
) -> Result<UnionType, TypeKitError> {
    debug!(type_name = %ty.name, members = ty.members.len(), "Extending union type");
    Ok(UnionType {
        name: ty.name.clone(),
        description: ty.description.clone(),
        members: resolve_all(&dependencies.resolver(), &ty.members)?,
        resolve_type,
    })
}

/// Replaces the literal of every value named in `values`.
pub fn extend_enum(ty: &EnumType, values: &EnumValues) -> EnumType {
    debug!(type_name = %ty.name, "Extending enum type");
    let mut extended = ty.clone();
    for value in extended.values.values_mut() {
        if let Some(literal) = values.get(value.name.as_str()) {
            value.value = literal.clone();
        }
    }
    extended
}

fn resolve_all(
    resolver: &DependencyResolver<'_>,
    names: &[NamedType],
) -> Result<Vec<NamedType>, TypeKitError> {
    names.iter().map(|named| resolver.resolve_named(named)).collect()
}

fn extend_fields(
    resolver: &DependencyResolver<'_>,
    fields: &IndexMap<Name, FieldDef>,
    resolvers: Option<&Resolvers>,
) -> Result<IndexMap<Name, FieldDef>, TypeKitError> {
    fields
        .iter()
        .map(|(name, field)| {
            let attached = resolvers.and_then(|r| r.get(name.as_str()));
            let extended = FieldDef {
                name: field.name.clone(),
                description: field.description.clone(),
                ty: resolver.resolve(&field.ty)?,
                args: field
                    .args
                    .iter()
                    .map(|(arg_name, arg)| {
                        Ok((
                            arg_name.clone(),
                            InputValueDef {
                                ty: resolver.resolve(&arg.ty)?,
                                ..arg.clone()
                            },
                        ))
                    })
                    .collect::<Result<_, TypeKitError>>()?,
                deprecation: field.deprecation.clone(),
                resolver: attached.cloned().or_else(|| field.resolver.clone()),
            };
            Ok((name.clone(), extended))
        })
        .collect()
}
