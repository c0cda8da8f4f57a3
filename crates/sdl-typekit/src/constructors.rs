//! One-call constructors per GraphQL kind.
//!
//! Each constructor builds a type from its definition with a fresh
//! placeholder registry and, where the kind calls for it, runs the matching
//! extender.
//!
//! # Example
//!
//! ```ignore
//! let user = object_type(
//!     ObjectTypeArgs::new("type User { id: ID! role: Role }")
//!         .resolvers(Resolvers::new().resolver("id", |_| Ok(Value::from("1"))))
//!         .dependencies(Dependencies::new().with_type("Role", role)),
//! )?;
//! ```

use async_graphql::Value;
use async_graphql::dynamic::Schema;
use tracing::{debug, info};

use crate::builder::{AstTypeBuilder, TypeDefSource, parse_type_definitions};
use crate::config::TypeKitConfig;
use crate::dependencies::Dependencies;
use crate::error::TypeKitError;
use crate::extend::{extend_enum, extend_interface, extend_object, extend_union};
use crate::schema::SchemaAssembler;
use crate::types::{
    EnumType, EnumValues, InputObjectType, InterfaceType, ObjectType, ResolveTypeFn, Resolvers,
    SchemaResolvers, SchemaType, UnionType,
};

/// Arguments of [`object_type`].
#[derive(Debug, Clone)]
pub struct ObjectTypeArgs {
    pub type_def: TypeDefSource,
    pub resolvers: Option<Resolvers>,
    pub dependencies: Dependencies,
}

impl ObjectTypeArgs {
    pub fn new(type_def: impl Into<TypeDefSource>) -> Self {
        Self {
            type_def: type_def.into(),
            resolvers: None,
            dependencies: Dependencies::new(),
        }
    }

    #[must_use]
    pub fn resolvers(mut self, resolvers: Resolvers) -> Self {
        self.resolvers = Some(resolvers);
        self
    }

    #[must_use]
    pub fn dependencies(mut self, dependencies: Dependencies) -> Self {
        self.dependencies = dependencies;
        self
    }
}

/// Arguments of [`interface_type`] and [`union_type`].
#[derive(Debug, Clone)]
pub struct CompositeTypeArgs {
    pub type_def: TypeDefSource,
    pub resolve_type: Option<ResolveTypeFn>,
    pub dependencies: Dependencies,
}

impl CompositeTypeArgs {
    pub fn new(type_def: impl Into<TypeDefSource>) -> Self {
        Self {
            type_def: type_def.into(),
            resolve_type: None,
            dependencies: Dependencies::new(),
        }
    }

    #[must_use]
    pub fn resolve_type<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> Option<String> + Send + Sync + 'static,
    {
        self.resolve_type = Some(ResolveTypeFn::new(f));
        self
    }

    #[must_use]
    pub fn dependencies(mut self, dependencies: Dependencies) -> Self {
        self.dependencies = dependencies;
        self
    }
}

/// Arguments of [`schema_type`].
#[derive(Debug, Clone)]
pub struct SchemaTypeArgs {
    pub type_def: String,
    pub resolvers: Option<SchemaResolvers>,
    pub dependencies: Dependencies,
    pub config: TypeKitConfig,
}

impl SchemaTypeArgs {
    pub fn new(type_def: impl Into<String>) -> Self {
        Self {
            type_def: type_def.into(),
            resolvers: None,
            dependencies: Dependencies::new(),
            config: TypeKitConfig::default(),
        }
    }

    #[must_use]
    pub fn resolvers(mut self, resolvers: SchemaResolvers) -> Self {
        self.resolvers = Some(resolvers);
        self
    }

    #[must_use]
    pub fn dependencies(mut self, dependencies: Dependencies) -> Self {
        self.dependencies = dependencies;
        self
    }

    #[must_use]
    pub fn config(mut self, config: TypeKitConfig) -> Self {
        self.config = config;
        self
    }
}

/// Builds an object type, extending it only when resolvers are supplied.
///
/// Without resolvers the built type is returned unchanged and forward
/// references stay pending.
///
/// # Errors
///
/// Returns parse and build errors, `TypeKitError::UnexpectedKind` for
/// non-object definitions and `TypeKitError::DependencyLoad` when a
/// dependency cannot be loaded.
pub fn object_type(args: ObjectTypeArgs) -> Result<ObjectType, TypeKitError> {
    object_type_with(&mut AstTypeBuilder::new(), args)
}

fn object_type_with(
    builder: &mut AstTypeBuilder,
    args: ObjectTypeArgs,
) -> Result<ObjectType, TypeKitError> {
    let built = match builder.build(args.type_def)? {
        SchemaType::Object(built) => built,
        other => return Err(unexpected_kind("object", &other)),
    };
    match args.resolvers {
        Some(resolvers) => extend_object(&built, &resolvers, &args.dependencies),
        None => Ok(built),
    }
}

/// Builds and extends an interface type.
///
/// # Errors
///
/// Same as [`object_type`], for interface definitions.
pub fn interface_type(args: CompositeTypeArgs) -> Result<InterfaceType, TypeKitError> {
    let built = match AstTypeBuilder::new().build(args.type_def)? {
        SchemaType::Interface(built) => built,
        other => return Err(unexpected_kind("interface", &other)),
    };
    extend_interface(&built, args.resolve_type, &args.dependencies)
}

/// Builds and extends a union type.
///
/// # Errors
///
/// Same as [`object_type`], for union definitions.
pub fn union_type(args: CompositeTypeArgs) -> Result<UnionType, TypeKitError> {
    let built = match AstTypeBuilder::new().build(args.type_def)? {
        SchemaType::Union(built) => built,
        other => return Err(unexpected_kind("union", &other)),
    };
    extend_union(&built, args.resolve_type, &args.dependencies)
}

/// Builds an enum type and applies literal overrides.
///
/// The extension pass always runs, even with an empty override map.
///
/// # Errors
///
/// Returns parse and build errors and `TypeKitError::UnexpectedKind` for
/// non-enum definitions.
pub fn enum_type(
    type_def: impl Into<TypeDefSource>,
    values: EnumValues,
) -> Result<EnumType, TypeKitError> {
    match AstTypeBuilder::new().build(type_def)? {
        SchemaType::Enum(built) => Ok(extend_enum(&built, &values)),
        other => Err(unexpected_kind("enum", &other)),
    }
}

/// Builds an input object type. Input types have no extension step.
///
/// # Errors
///
/// Returns parse and build errors and `TypeKitError::UnexpectedKind` for
/// non-input definitions.
pub fn input_type(type_def: impl Into<TypeDefSource>) -> Result<InputObjectType, TypeKitError> {
    match AstTypeBuilder::new().build(type_def)? {
        SchemaType::InputObject(built) => Ok(built),
        other => Err(unexpected_kind("input", &other)),
    }
}

/// Builds a schema from a document of object type definitions.
///
/// Every definition goes through [`object_type`] with the shared dependency
/// map and the resolver map registered under its name. Results are keyed by
/// the lowercased type name: `query` and `mutation` become root operation
/// types, any other slot is registered as an ordinary type. All definitions
/// share one placeholder registry.
///
/// # Errors
///
/// Returns `TypeKitError::MissingResolverMap` when no resolver map exists for
/// a definition, `TypeKitError::Build` for a missing `Query` root or a
/// `Subscription` root, and `TypeKitError::SchemaBuild` if the host library
/// rejects the assembled schema.
pub fn schema_type(args: SchemaTypeArgs) -> Result<Schema, TypeKitError> {
    args.config.validate()?;
    let definitions = parse_type_definitions(&args.type_def)?;
    debug!(definitions = definitions.len(), "Building schema from document");

    let mut builder = AstTypeBuilder::new();
    let mut assembler = SchemaAssembler::new(args.config);
    for definition in definitions {
        let name = definition.name.node.to_string();
        let resolvers = args
            .resolvers
            .as_ref()
            .and_then(|r| r.get(&name))
            .cloned()
            .ok_or_else(|| TypeKitError::MissingResolverMap(name.clone()))?;

        let object = object_type_with(
            &mut builder,
            ObjectTypeArgs {
                type_def: definition.into(),
                resolvers: Some(resolvers),
                dependencies: args.dependencies.clone(),
            },
        )?;
        assembler.insert_slot(name.to_lowercase(), object);
    }

    let schema = assembler.finish()?;
    info!(placeholders = builder.placeholders().len(), "Schema built");
    Ok(schema)
}

fn unexpected_kind(expected: &'static str, found: &SchemaType) -> TypeKitError {
    TypeKitError::UnexpectedKind {
        expected,
        found: found.kind(),
        name: found.name().to_string(),
    }
}
