//! Builds [`SchemaType`]s from SDL fragments.

use async_graphql::Name;
use async_graphql_parser::Positioned;
use async_graphql_parser::types::{
    BaseType, ConstDirective, EnumValueDefinition, FieldDefinition, InputValueDefinition, Type,
    TypeDefinition, TypeKind, TypeSystemDefinition,
};
use async_graphql_value::ConstValue;
use indexmap::IndexMap;
use tracing::debug;

use super::placeholder::PlaceholderRegistry;
use crate::error::TypeKitError;
use crate::types::{
    EnumType, EnumValueDef, FieldDef, InputObjectType, InputValueDef, InterfaceType, NamedType,
    ObjectType, ScalarType, SchemaType, TypeRef, UnionType, is_builtin_scalar,
};

const DEFAULT_DEPRECATION_REASON: &str = "No longer supported";

/// Source of a single type definition.
#[derive(Debug, Clone)]
pub enum TypeDefSource {
    /// SDL text; only the first definition is used.
    Text(String),
    /// An already parsed definition.
    Node(TypeDefinition),
}

impl From<&str> for TypeDefSource {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for TypeDefSource {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<TypeDefinition> for TypeDefSource {
    fn from(node: TypeDefinition) -> Self {
        Self::Node(node)
    }
}

impl From<Positioned<TypeDefinition>> for TypeDefSource {
    fn from(node: Positioned<TypeDefinition>) -> Self {
        Self::Node(node.node)
    }
}

/// Parses an SDL document into its top-level type definitions.
///
/// # Errors
///
/// Returns `TypeKitError::Parse` for invalid SDL and `TypeKitError::Build`
/// if the document contains `schema` or `directive` definitions.
pub fn parse_type_definitions(text: &str) -> Result<Vec<TypeDefinition>, TypeKitError> {
    let document = async_graphql_parser::parse_schema(text)?;
    document
        .definitions
        .into_iter()
        .map(|definition| match definition {
            TypeSystemDefinition::Type(ty) => Ok(ty.node),
            TypeSystemDefinition::Schema(_) => {
                Err(TypeKitError::build("schema definitions are not supported"))
            }
            TypeSystemDefinition::Directive(directive) => Err(TypeKitError::build(format!(
                "directive definition `@{}` is not supported",
                directive.node.name.node
            ))),
        })
        .collect()
}

/// Turns type definitions into [`SchemaType`]s.
///
/// Names that are neither built-in scalars nor the type being defined are
/// satisfied with placeholders from the builder's registry, so building never
/// fails on a forward reference.
#[derive(Debug, Default)]
pub struct AstTypeBuilder {
    placeholders: PlaceholderRegistry,
    defining: Option<Name>,
}

impl AstTypeBuilder {
    /// Creates a builder with a fresh placeholder registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the placeholder registry of this build.
    pub fn placeholders(&self) -> &PlaceholderRegistry {
        &self.placeholders
    }

    /// Builds a type from SDL text or a definition node. Definitions after
    /// the first one in the text are ignored.
    ///
    /// # Errors
    ///
    /// Returns `TypeKitError::Parse` if the text is not valid SDL and
    /// `TypeKitError::Build` if it holds no usable type definition.
    pub fn build(&mut self, source: impl Into<TypeDefSource>) -> Result<SchemaType, TypeKitError> {
        match source.into() {
            TypeDefSource::Node(node) => self.build_definition(&node),
            TypeDefSource::Text(text) => {
                let document = async_graphql_parser::parse_schema(&text)?;
                match document.definitions.into_iter().next() {
                    Some(TypeSystemDefinition::Type(first)) => self.build_definition(&first.node),
                    Some(_) => Err(TypeKitError::build(
                        "first definition of the document is not a type definition",
                    )),
                    None => Err(TypeKitError::build("type definition document is empty")),
                }
            }
        }
    }

    /// Builds a type from a parsed definition.
    ///
    /// # Errors
    ///
    /// Returns `TypeKitError::Build` for type extensions.
    pub fn build_definition(&mut self, def: &TypeDefinition) -> Result<SchemaType, TypeKitError> {
        let name = def.name.node.clone();
        if def.extend {
            return Err(TypeKitError::build(format!(
                "type extension `extend {name}` is not supported"
            )));
        }

        debug!(type_name = %name, "Building type from definition");
        self.defining = Some(name.clone());
        let description = def.description.as_ref().map(|d| d.node.clone());

        let ty = match &def.kind {
            TypeKind::Scalar => SchemaType::Scalar(ScalarType { name, description }),
            TypeKind::Object(object) => SchemaType::Object(ObjectType {
                name,
                description,
                implements: self.named_list(&object.implements),
                fields: self.fields(&object.fields),
            }),
            TypeKind::Interface(interface) => SchemaType::Interface(InterfaceType {
                name,
                description,
                implements: self.named_list(&interface.implements),
                fields: self.fields(&interface.fields),
                resolve_type: None,
            }),
            TypeKind::Union(union) => SchemaType::Union(UnionType {
                name,
                description,
                members: self.named_list(&union.members),
                resolve_type: None,
            }),
            TypeKind::Enum(enum_type) => SchemaType::Enum(EnumType {
                name,
                description,
                values: enum_type
                    .values
                    .iter()
                    .map(|value| {
                        let value = enum_value(&value.node);
                        (value.name.clone(), value)
                    })
                    .collect(),
            }),
            TypeKind::InputObject(input) => SchemaType::InputObject(InputObjectType {
                name,
                description,
                fields: self.input_values(&input.fields),
            }),
        };

        self.defining = None;
        Ok(ty)
    }

    fn fields(&mut self, fields: &[Positioned<FieldDefinition>]) -> IndexMap<Name, FieldDef> {
        fields
            .iter()
            .map(|field| {
                let field = &field.node;
                let def = FieldDef {
                    name: field.name.node.clone(),
                    description: field.description.as_ref().map(|d| d.node.clone()),
                    ty: self.type_ref(&field.ty.node),
                    args: self.input_values(&field.arguments),
                    deprecation: deprecation(&field.directives),
                    resolver: None,
                };
                (def.name.clone(), def)
            })
            .collect()
    }

    fn input_values(
        &mut self,
        values: &[Positioned<InputValueDefinition>],
    ) -> IndexMap<Name, InputValueDef> {
        values
            .iter()
            .map(|value| {
                let value = &value.node;
                let def = InputValueDef {
                    name: value.name.node.clone(),
                    description: value.description.as_ref().map(|d| d.node.clone()),
                    ty: self.type_ref(&value.ty.node),
                    default_value: value.default_value.as_ref().map(|v| v.node.clone()),
                };
                (def.name.clone(), def)
            })
            .collect()
    }

    fn type_ref(&mut self, ty: &Type) -> TypeRef {
        let base = match &ty.base {
            BaseType::Named(name) => TypeRef::Named(self.named(name)),
            BaseType::List(inner) => TypeRef::List(Box::new(self.type_ref(inner))),
        };
        if ty.nullable {
            base
        } else {
            TypeRef::NonNull(Box::new(base))
        }
    }

    fn named_list(&mut self, names: &[Positioned<Name>]) -> Vec<NamedType> {
        names.iter().map(|name| self.named(&name.node)).collect()
    }

    fn named(&mut self, name: &Name) -> NamedType {
        if is_builtin_scalar(name.as_str()) || self.defining.as_ref() == Some(name) {
            NamedType::Known(name.clone())
        } else {
            NamedType::Pending(self.placeholders.get_or_create(name))
        }
    }
}

fn enum_value(value: &EnumValueDefinition) -> EnumValueDef {
    let name = value.value.node.clone();
    EnumValueDef {
        description: value.description.as_ref().map(|d| d.node.clone()),
        deprecation: deprecation(&value.directives),
        value: ConstValue::String(name.to_string()),
        name,
    }
}

/// Extracts the reason of a `@deprecated` directive.
fn deprecation(directives: &[Positioned<ConstDirective>]) -> Option<String> {
    let directive = directives
        .iter()
        .find(|d| d.node.name.node.as_str() == "deprecated")?;
    let reason = directive
        .node
        .arguments
        .iter()
        .find(|(name, _)| name.node.as_str() == "reason")
        .and_then(|(_, value)| match &value.node {
            ConstValue::String(reason) => Some(reason.clone()),
            _ => None,
        });
    Some(reason.unwrap_or_else(|| DEFAULT_DEPRECATION_REASON.to_string()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn object(ty: SchemaType) -> ObjectType {
        match ty {
            SchemaType::Object(object) => object,
            other => panic!("expected object, got {}", other.kind()),
        }
    }

    #[test]
    fn test_build_object_from_text() {
        let mut builder = AstTypeBuilder::new();
        let ty = object(
            builder
                .build("type GMObject { id: ID! name(test: Int!): String }")
                .unwrap(),
        );

        assert_eq!(ty.name.as_str(), "GMObject");
        assert_eq!(ty.fields["id"].ty.to_string(), "ID!");
        assert_eq!(ty.fields["name"].ty.to_string(), "String");
        assert_eq!(ty.fields["name"].args["test"].ty.to_string(), "Int!");
        assert!(builder.placeholders().is_empty());
    }

    #[test]
    fn test_forward_references_use_shared_placeholders() {
        let mut builder = AstTypeBuilder::new();
        let ty = object(
            builder
                .build("type Post { author: User! reviewers: [User!] }")
                .unwrap(),
        );

        let (NamedType::Pending(a), NamedType::Pending(b)) = (
            ty.fields["author"].ty.innermost(),
            ty.fields["reviewers"].ty.innermost(),
        ) else {
            panic!("expected pending references");
        };
        assert!(Arc::ptr_eq(a, b));
        assert_eq!(a.name(), "User");
        assert_eq!(builder.placeholders().len(), 1);
    }

    #[test]
    fn test_self_reference_is_known() {
        let mut builder = AstTypeBuilder::new();
        let ty = object(builder.build("type Node { next: Node }").unwrap());
        assert!(matches!(ty.fields["next"].ty.innermost(), NamedType::Known(_)));
    }

    #[test]
    fn test_only_first_definition_is_used() {
        let mut builder = AstTypeBuilder::new();
        let ty = builder
            .build("enum First { A } type Second { id: ID }")
            .unwrap();
        assert_eq!(ty.name(), "First");
        assert_eq!(ty.kind(), "enum");
    }

    #[test]
    fn test_enum_defaults_and_deprecation() {
        let mut builder = AstTypeBuilder::new();
        let SchemaType::Enum(ty) = builder
            .build(r#"enum Color { RED GREEN @deprecated(reason: "use RED") BLUE @deprecated }"#)
            .unwrap()
        else {
            panic!("expected enum");
        };

        assert_eq!(ty.values["RED"].value, ConstValue::String("RED".into()));
        assert_eq!(ty.values["GREEN"].deprecation.as_deref(), Some("use RED"));
        assert_eq!(
            ty.values["BLUE"].deprecation.as_deref(),
            Some(DEFAULT_DEPRECATION_REASON)
        );
    }

    #[test]
    fn test_input_default_values() {
        let mut builder = AstTypeBuilder::new();
        let SchemaType::InputObject(ty) = builder
            .build("input Page { first: Int = 10 after: String }")
            .unwrap()
        else {
            panic!("expected input");
        };
        assert_eq!(ty.fields["first"].default_value, Some(ConstValue::from(10)));
        assert!(ty.fields["after"].default_value.is_none());
    }

    #[test]
    fn test_build_from_node() {
        let definitions = parse_type_definitions("union Pet = Cat | Dog").unwrap();
        let mut builder = AstTypeBuilder::new();
        let SchemaType::Union(ty) = builder.build(definitions[0].clone()).unwrap() else {
            panic!("expected union");
        };
        let members: Vec<_> = ty.members.iter().map(NamedType::name).collect();
        assert_eq!(members, ["Cat", "Dog"]);
    }

    #[test]
    fn test_trailing_definitions_are_ignored() {
        let ty = AstTypeBuilder::new()
            .build("type Query { n: Int }\ndirective @foo on FIELD_DEFINITION")
            .unwrap();
        assert_eq!(ty.name(), "Query");

        let ty = AstTypeBuilder::new()
            .build("type Query { n: Int }\nschema { query: Query }")
            .unwrap();
        assert_eq!(ty.kind(), "object");
    }

    #[test]
    fn test_leading_non_type_definition() {
        let err = AstTypeBuilder::new()
            .build("directive @foo on FIELD_DEFINITION\ntype Query { n: Int }")
            .unwrap_err();
        assert_eq!(err.error_code(), "BUILD_ERROR");
    }

    #[test]
    fn test_document_parse_rejects_schema_definitions() {
        let err = parse_type_definitions("type Query { n: Int }\nschema { query: Query }")
            .unwrap_err();
        assert_eq!(err.error_code(), "BUILD_ERROR");
    }

    #[test]
    fn test_parse_error() {
        let err = AstTypeBuilder::new().build("type {").unwrap_err();
        assert_eq!(err.error_code(), "PARSE_ERROR");
    }

    #[test]
    fn test_unsupported_definitions() {
        let err = AstTypeBuilder::new()
            .build("extend type Query { n: Int }")
            .unwrap_err();
        assert_eq!(err.error_code(), "BUILD_ERROR");

        let err = AstTypeBuilder::new()
            .build("schema { query: Query }")
            .unwrap_err();
        assert_eq!(err.error_code(), "BUILD_ERROR");
    }
}
