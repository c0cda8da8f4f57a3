//! Schema assembly.
//!
//! Projects finished types into `async_graphql::dynamic` types, registers
//! every type reachable through resolved references and builds the schema.

use std::collections::HashMap;
use std::ptr;
use std::sync::Arc;

use async_graphql::Name;
use async_graphql::dynamic::{
    Enum, EnumItem, Field, FieldFuture, InputObject, InputValue, Interface, InterfaceField,
    Object, Scalar, Schema, Type, Union,
};
use indexmap::IndexMap;
use tracing::{debug, trace};

use super::binding::FieldBinding;
use crate::config::TypeKitConfig;
use crate::error::TypeKitError;
use crate::types::{
    EnumType, FieldDef, InputObjectType, InputValueDef, InterfaceType, NamedType, ObjectType,
    ScalarType, SchemaType, TypeRef, UnionType,
};

/// Root slot names that become operation types.
pub const QUERY_SLOT: &str = "query";
pub const MUTATION_SLOT: &str = "mutation";
pub const SUBSCRIPTION_SLOT: &str = "subscription";

/// Collects object types by slot name and assembles them into a schema.
///
/// # Example
///
/// ```ignore
/// let mut assembler = SchemaAssembler::new(TypeKitConfig::default());
/// assembler.insert_slot("query", query_type);
/// let schema = assembler.finish()?;
/// ```
#[derive(Debug)]
pub struct SchemaAssembler {
    config: TypeKitConfig,
    slots: IndexMap<String, ObjectType>,
}

impl SchemaAssembler {
    pub fn new(config: TypeKitConfig) -> Self {
        Self {
            config,
            slots: IndexMap::new(),
        }
    }

    /// Stores an object type under a slot name. A later type with the same
    /// slot replaces the earlier one.
    pub fn insert_slot(&mut self, slot: impl Into<String>, object: ObjectType) {
        self.slots.insert(slot.into(), object);
    }

    /// Builds the schema.
    ///
    /// # Errors
    ///
    /// Returns `TypeKitError::Build` without a `query` slot or with a
    /// `subscription` slot, and `TypeKitError::SchemaBuild` if two different
    /// types share a name or the host library rejects the result (for
    /// example a pending reference that names no registered type).
    pub fn finish(self) -> Result<Schema, TypeKitError> {
        if self.slots.contains_key(SUBSCRIPTION_SLOT) {
            return Err(TypeKitError::build("subscription root types are not supported"));
        }
        let query = self
            .slots
            .get(QUERY_SLOT)
            .ok_or_else(|| TypeKitError::build("schema document defines no Query type"))?;
        let mutation = self.slots.get(MUTATION_SLOT).map(|m| m.name.as_str());

        debug!(
            query = %query.name,
            mutation = ?mutation,
            slots = self.slots.len(),
            "Assembling GraphQL schema"
        );

        let mut projector = Projector::default();
        for object in self.slots.values() {
            projector.add_object(object)?;
        }

        let mut builder = Schema::build(query.name.as_str(), mutation, None);
        for ty in projector.types {
            builder = builder.register(ty);
        }

        let mut builder = builder
            .limit_depth(self.config.max_depth)
            .limit_complexity(self.config.max_complexity);
        if !self.config.introspection {
            builder = builder.disable_introspection();
        }

        builder
            .finish()
            .map_err(|e| TypeKitError::SchemaBuild(e.to_string()))
    }
}

/// Converts types once per name, following resolved references.
///
/// A name belongs to the first type instance that claims it; a different
/// instance with the same name is an error.
#[derive(Default)]
struct Projector {
    registered: HashMap<String, *const ()>,
    types: Vec<Type>,
}

impl Projector {
    /// Returns `Ok(true)` for a fresh name, `Ok(false)` if `ty` itself was
    /// already registered.
    fn claim<T>(&mut self, name: &str, ty: &T) -> Result<bool, TypeKitError> {
        let identity = ptr::from_ref(ty).cast::<()>();
        match self.registered.get(name) {
            Some(&owner) if owner == identity => Ok(false),
            Some(_) => Err(TypeKitError::SchemaBuild(format!(
                "type `{name}` is defined by more than one type instance"
            ))),
            None => {
                trace!(type_name = name, "Registering type");
                self.registered.insert(name.to_string(), identity);
                Ok(true)
            }
        }
    }

    fn add(&mut self, ty: &SchemaType) -> Result<(), TypeKitError> {
        match ty {
            SchemaType::Object(object) => self.add_object(object),
            SchemaType::Interface(interface) => self.add_interface(interface),
            SchemaType::Union(union) => self.add_union(union),
            SchemaType::Enum(enum_type) => self.add_enum(enum_type),
            SchemaType::InputObject(input) => self.add_input(input),
            SchemaType::Scalar(scalar) => self.add_scalar(scalar),
        }
    }

    fn visit_named(&mut self, named: &NamedType) -> Result<(), TypeKitError> {
        match named.resolved() {
            Some(resolved) => self.add(Arc::as_ref(resolved)),
            None => Ok(()),
        }
    }

    fn visit(&mut self, ty: &TypeRef) -> Result<(), TypeKitError> {
        self.visit_named(ty.innermost())
    }

    fn visit_fields(&mut self, fields: &IndexMap<Name, FieldDef>) -> Result<(), TypeKitError> {
        for field in fields.values() {
            self.visit(&field.ty)?;
            for arg in field.args.values() {
                self.visit(&arg.ty)?;
            }
        }
        Ok(())
    }

    fn add_object(&mut self, ty: &ObjectType) -> Result<(), TypeKitError> {
        if !self.claim(ty.name.as_str(), ty)? {
            return Ok(());
        }
        let mut object = Object::new(ty.name.as_str());
        if let Some(description) = &ty.description {
            object = object.description(description);
        }
        for interface in &ty.implements {
            object = object.implement(interface.name());
        }
        for field in ty.fields.values() {
            object = object.field(object_field(field));
        }
        self.types.push(object.into());

        for interface in &ty.implements {
            self.visit_named(interface)?;
        }
        self.visit_fields(&ty.fields)
    }

    fn add_interface(&mut self, ty: &InterfaceType) -> Result<(), TypeKitError> {
        if !self.claim(ty.name.as_str(), ty)? {
            return Ok(());
        }
        let mut interface = Interface::new(ty.name.as_str());
        if let Some(description) = &ty.description {
            interface = interface.description(description);
        }
        for parent in &ty.implements {
            interface = interface.implement(parent.name());
        }
        for field in ty.fields.values() {
            let mut out = InterfaceField::new(field.name.as_str(), field.ty.to_dynamic())
                .deprecation(field.deprecation.as_deref());
            if let Some(description) = &field.description {
                out = out.description(description);
            }
            for arg in field.args.values() {
                out = out.argument(input_value(arg));
            }
            interface = interface.field(out);
        }
        self.types.push(interface.into());

        for parent in &ty.implements {
            self.visit_named(parent)?;
        }
        self.visit_fields(&ty.fields)
    }

    fn add_union(&mut self, ty: &UnionType) -> Result<(), TypeKitError> {
        if !self.claim(ty.name.as_str(), ty)? {
            return Ok(());
        }
        let mut union = Union::new(ty.name.as_str());
        if let Some(description) = &ty.description {
            union = union.description(description);
        }
        for member in &ty.members {
            union = union.possible_type(member.name());
        }
        self.types.push(union.into());

        for member in &ty.members {
            self.visit_named(member)?;
        }
        Ok(())
    }

    fn add_enum(&mut self, ty: &EnumType) -> Result<(), TypeKitError> {
        if !self.claim(ty.name.as_str(), ty)? {
            return Ok(());
        }
        let mut out = Enum::new(ty.name.as_str());
        if let Some(description) = &ty.description {
            out = out.description(description);
        }
        for value in ty.values.values() {
            let mut item =
                EnumItem::new(value.name.as_str()).deprecation(value.deprecation.as_deref());
            if let Some(description) = &value.description {
                item = item.description(description);
            }
            out = out.item(item);
        }
        self.types.push(out.into());
        Ok(())
    }

    fn add_input(&mut self, ty: &InputObjectType) -> Result<(), TypeKitError> {
        if !self.claim(ty.name.as_str(), ty)? {
            return Ok(());
        }
        let mut input = InputObject::new(ty.name.as_str());
        if let Some(description) = &ty.description {
            input = input.description(description);
        }
        for field in ty.fields.values() {
            input = input.field(input_value(field));
        }
        self.types.push(input.into());

        for field in ty.fields.values() {
            self.visit(&field.ty)?;
        }
        Ok(())
    }

    fn add_scalar(&mut self, ty: &ScalarType) -> Result<(), TypeKitError> {
        if !self.claim(ty.name.as_str(), ty)? {
            return Ok(());
        }
        let mut scalar = Scalar::new(ty.name.as_str());
        if let Some(description) = &ty.description {
            scalar = scalar.description(description);
        }
        self.types.push(scalar.into());
        Ok(())
    }
}

fn object_field(field: &FieldDef) -> Field {
    let binding = Arc::new(FieldBinding::new(field));
    let mut out = Field::new(field.name.as_str(), field.ty.to_dynamic(), move |ctx| {
        let binding = Arc::clone(&binding);
        FieldFuture::new(async move { binding.resolve(&ctx) })
    })
    .deprecation(field.deprecation.as_deref());
    if let Some(description) = &field.description {
        out = out.description(description);
    }
    for arg in field.args.values() {
        out = out.argument(input_value(arg));
    }
    out
}

fn input_value(def: &InputValueDef) -> InputValue {
    let mut value = InputValue::new(def.name.as_str(), def.ty.to_dynamic());
    if let Some(description) = &def.description {
        value = value.description(description);
    }
    if let Some(default) = &def.default_value {
        value = value.default_value(default.clone());
    }
    value
}
