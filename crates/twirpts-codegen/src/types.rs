//! Wire type to TypeScript type mapping.
//!
//! | wire kind | type | wire-JSON type |
//! |-----------|------|----------------|
//! | numeric scalars | `number` | `number` |
//! | `string`, `bytes` | `string` | `string` |
//! | `bool` | `boolean` | `boolean` |
//! | message | `Name` | `NameJSON` |
//! | `google.protobuf.Timestamp` | `string` | `string` |
//! | enum | `Name` | `Name` |
//!
//! Repeated fields get `[]` on both types unless they are map fields.

use prost_types::FieldDescriptorProto;
use prost_types::field_descriptor_proto::{Label, Type};
use twirpts_core::naming::resolve;
use twirpts_core::{CompileError, CompileResult};

/// Fully-qualified name of the well-known timestamp message
pub const TIMESTAMP_TYPE_NAME: &str = ".google.protobuf.Timestamp";

/// Suffix distinguishing a message's wire-JSON interface
pub const JSON_SUFFIX: &str = "JSON";

/// The pair of types a field gets in the generated module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedType {
    pub ty: String,
    pub wire_type: String,
}

impl MappedType {
    fn same(ty: &str) -> Self {
        Self {
            ty: ty.to_string(),
            wire_type: ty.to_string(),
        }
    }
}

/// Decode the field's wire kind, rejecting missing or unknown values.
pub fn wire_kind(field: &FieldDescriptorProto) -> CompileResult<Type> {
    let raw = field.r#type.ok_or_else(|| {
        CompileError::UnsupportedShape(format!("field {} has no wire type", field.name()))
    })?;

    Type::try_from(raw).map_err(|_| {
        CompileError::UnsupportedShape(format!(
            "field {} has unknown wire type {raw}",
            field.name()
        ))
    })
}

pub fn is_repeated(field: &FieldDescriptorProto) -> bool {
    field.label() == Label::Repeated
}

pub fn is_timestamp(field: &FieldDescriptorProto) -> bool {
    field.type_name() == TIMESTAMP_TYPE_NAME
}

/// A message-typed field other than the well-known timestamp.
pub fn is_message(field: &FieldDescriptorProto) -> CompileResult<bool> {
    Ok(wire_kind(field)? == Type::Message && !is_timestamp(field))
}

/// Map a field to its TypeScript and wire-JSON types.
///
/// `is_map` tells whether the referenced type is a synthesized map-entry
/// model; such fields are keyed mappings and never get an array suffix.
pub fn map_type(
    package: &str,
    field: &FieldDescriptorProto,
    is_map: bool,
) -> CompileResult<MappedType> {
    let mut mapped = match wire_kind(field)? {
        Type::Double
        | Type::Float
        | Type::Fixed32
        | Type::Fixed64
        | Type::Sfixed32
        | Type::Sfixed64
        | Type::Int32
        | Type::Int64
        | Type::Uint32
        | Type::Uint64
        | Type::Sint32
        | Type::Sint64 => MappedType::same("number"),
        Type::String | Type::Bytes => MappedType::same("string"),
        Type::Bool => MappedType::same("boolean"),
        Type::Message if is_timestamp(field) => MappedType::same("string"),
        Type::Message => {
            let name = referenced_name(package, field)?;
            MappedType {
                wire_type: format!("{name}{JSON_SUFFIX}"),
                ty: name,
            }
        }
        Type::Enum => MappedType::same(&referenced_name(package, field)?),
        Type::Group => {
            return Err(CompileError::UnsupportedShape(format!(
                "group field {}",
                field.name()
            )));
        }
    };

    if is_repeated(field) && !is_map {
        mapped.ty.push_str("[]");
        mapped.wire_type.push_str("[]");
    }

    Ok(mapped)
}

fn referenced_name(package: &str, field: &FieldDescriptorProto) -> CompileResult<String> {
    if field.type_name().is_empty() {
        return Err(CompileError::UnsupportedShape(format!(
            "field {} references a type without a name",
            field.name()
        )));
    }
    Ok(resolve(package, field.type_name()))
}
