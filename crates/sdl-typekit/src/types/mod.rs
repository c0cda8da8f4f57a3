//! Built and extended schema types.
//!
//! A [`SchemaType`] is the kind-tagged output of the AST builder. Extension
//! produces a new value of the same kind with dependencies resolved and
//! executable hooks attached; built values are never mutated in place.

mod resolver;
mod type_ref;

use async_graphql::{Name, Value};
use indexmap::IndexMap;

pub use resolver::{
    EnumValues, FieldResolver, FieldResult, ResolveTypeFn, ResolverArgs, Resolvers,
    SchemaResolvers,
};
pub use type_ref::{BUILTIN_SCALARS, NamedType, TypeRef, is_builtin_scalar};

/// An argument or input object field.
#[derive(Debug, Clone)]
pub struct InputValueDef {
    pub name: Name,
    pub description: Option<String>,
    pub ty: TypeRef,
    pub default_value: Option<Value>,
}

/// An object or interface field.
#[derive(Debug, Clone)]
pub struct FieldDef {
    pub name: Name,
    pub description: Option<String>,
    pub ty: TypeRef,
    pub args: IndexMap<Name, InputValueDef>,
    pub deprecation: Option<String>,
    /// Attached resolver. `None` falls back to reading the parent property.
    pub resolver: Option<FieldResolver>,
}

#[derive(Debug, Clone)]
pub struct ObjectType {
    pub name: Name,
    pub description: Option<String>,
    pub implements: Vec<NamedType>,
    pub fields: IndexMap<Name, FieldDef>,
}

#[derive(Debug, Clone)]
pub struct InterfaceType {
    pub name: Name,
    pub description: Option<String>,
    pub implements: Vec<NamedType>,
    pub fields: IndexMap<Name, FieldDef>,
    pub resolve_type: Option<ResolveTypeFn>,
}

#[derive(Debug, Clone)]
pub struct UnionType {
    pub name: Name,
    pub description: Option<String>,
    /// Member types in declaration order.
    pub members: Vec<NamedType>,
    pub resolve_type: Option<ResolveTypeFn>,
}

/// One declared enum value and its literal.
#[derive(Debug, Clone)]
pub struct EnumValueDef {
    pub name: Name,
    pub description: Option<String>,
    pub deprecation: Option<String>,
    /// Literal handed to and accepted from resolvers.
    pub value: Value,
}

#[derive(Debug, Clone)]
pub struct EnumType {
    pub name: Name,
    pub description: Option<String>,
    pub values: IndexMap<Name, EnumValueDef>,
}

impl EnumType {
    /// Finds the enum value whose literal equals `literal`.
    pub fn name_for_literal(&self, literal: &Value) -> Option<&Name> {
        self.values
            .values()
            .find(|v| &v.value == literal)
            .map(|v| &v.name)
    }

    /// Returns the literal of the named enum value.
    pub fn literal_for(&self, name: &str) -> Option<&Value> {
        self.values.get(name).map(|v| &v.value)
    }
}

#[derive(Debug, Clone)]
pub struct InputObjectType {
    pub name: Name,
    pub description: Option<String>,
    pub fields: IndexMap<Name, InputValueDef>,
}

#[derive(Debug, Clone)]
pub struct ScalarType {
    pub name: Name,
    pub description: Option<String>,
}

/// Any type the builder can produce.
#[derive(Debug, Clone)]
pub enum SchemaType {
    Object(ObjectType),
    Interface(InterfaceType),
    Union(UnionType),
    Enum(EnumType),
    InputObject(InputObjectType),
    Scalar(ScalarType),
}

impl SchemaType {
    pub fn name(&self) -> &str {
        match self {
            Self::Object(ty) => ty.name.as_str(),
            Self::Interface(ty) => ty.name.as_str(),
            Self::Union(ty) => ty.name.as_str(),
            Self::Enum(ty) => ty.name.as_str(),
            Self::InputObject(ty) => ty.name.as_str(),
            Self::Scalar(ty) => ty.name.as_str(),
        }
    }

    /// Lowercase kind name used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Object(_) => "object",
            Self::Interface(_) => "interface",
            Self::Union(_) => "union",
            Self::Enum(_) => "enum",
            Self::InputObject(_) => "input",
            Self::Scalar(_) => "scalar",
        }
    }
}

impl From<ObjectType> for SchemaType {
    fn from(ty: ObjectType) -> Self {
        Self::Object(ty)
    }
}

impl From<InterfaceType> for SchemaType {
    fn from(ty: InterfaceType) -> Self {
        Self::Interface(ty)
    }
}

impl From<UnionType> for SchemaType {
    fn from(ty: UnionType) -> Self {
        Self::Union(ty)
    }
}

impl From<EnumType> for SchemaType {
    fn from(ty: EnumType) -> Self {
        Self::Enum(ty)
    }
}

impl From<InputObjectType> for SchemaType {
    fn from(ty: InputObjectType) -> Self {
        Self::InputObject(ty)
    }
}

impl From<ScalarType> for SchemaType {
    fn from(ty: ScalarType) -> Self {
        Self::Scalar(ty)
    }
}
