//! Model and service builders
//!
//! Walks a [`FileDescriptorProto`] once, top-down, and produces an
//! [`ApiContext`]. Nesting is flattened exactly one level: a message's direct
//! nested messages and enums become `Outer_Inner` declarations, anything
//! nested deeper is dropped.
//!
//! Nested models (map entries included) are registered before their parent's
//! fields are resolved, because field resolution is a lookup-table read.

use crate::types::{self, MappedType};
use prost_types::{
    DescriptorProto, EnumDescriptorProto, FieldDescriptorProto, FileDescriptorProto,
    ServiceDescriptorProto,
};
use twirpts_core::naming::{camel_case, lower_first, nested_name, resolve};
use twirpts_core::{
    ApiContext, CompileError, CompileResult, Enum, MAP_VALUE_FIELD, Model, ModelField, RoutePrefix,
    Service, ServiceMethod,
};

/// Build the object model for one schema file.
///
/// The timestamp sentinel is registered last. Flags are left unset; run
/// [`twirpts_core::apply_flags`] afterwards.
pub fn build_context(file: &FileDescriptorProto, route_prefix: RoutePrefix) -> CompileResult<ApiContext> {
    let mut ctx = ApiContext::new(file.package(), route_prefix);

    for e in &file.enum_type {
        ctx.add_enum(build_enum(require_name(e.name(), "enum")?.to_string(), e));
    }

    for message in &file.message_type {
        build_message(&mut ctx, message)?;
    }

    for service in &file.service {
        let service = build_service(&ctx, service)?;
        ctx.add_service(service);
    }

    ctx.add_model(Model::timestamp_sentinel());
    Ok(ctx)
}

fn build_enum(name: String, e: &EnumDescriptorProto) -> Enum {
    Enum {
        name,
        values: e.value.iter().map(|v| v.name().to_string()).collect(),
    }
}

fn build_message(ctx: &mut ApiContext, message: &DescriptorProto) -> CompileResult<()> {
    let name = require_name(message.name(), "message")?;

    for e in &message.enum_type {
        ctx.add_enum(build_enum(nested_name(name, e.name()), e));
    }

    for nested in &message.nested_type {
        let model = build_nested_model(ctx, name, nested)?;
        ctx.add_model(model);
    }

    let mut model = Model::new(name);
    for field in &message.field {
        model.fields.push(build_field(ctx, field)?);
    }
    ctx.add_model(model);

    Ok(())
}

fn build_nested_model(
    ctx: &ApiContext,
    outer: &str,
    nested: &DescriptorProto,
) -> CompileResult<Model> {
    let mut model = Model::new(nested_name(outer, require_name(nested.name(), "message")?));
    model.is_map = nested
        .options
        .as_ref()
        .is_some_and(|options| options.map_entry());

    if !nested.nested_type.is_empty() || !nested.enum_type.is_empty() {
        tracing::debug!(
            model = %model.name,
            messages = nested.nested_type.len(),
            enums = nested.enum_type.len(),
            "dropping declarations nested more than one level deep"
        );
    }

    for field in &nested.field {
        let field = build_field(ctx, field)?;
        if model.is_map && field.name == MAP_VALUE_FIELD {
            model.map_value_type = Some(field.ty.clone());
            model.map_value_type_primitive = !field.is_message;
        }
        model.fields.push(field);
    }

    Ok(model)
}

/// Resolve one field against the models registered so far.
fn build_field(ctx: &ApiContext, field: &FieldDescriptorProto) -> CompileResult<ModelField> {
    let wire_name = require_name(field.name(), "field")?;

    let referenced = if field.type_name().is_empty() {
        None
    } else {
        ctx.model(&resolve(&ctx.package, field.type_name()))
    };
    let is_map = referenced.is_some_and(|m| m.is_map);

    let MappedType { ty, wire_type } = types::map_type(&ctx.package, field, is_map)?;

    Ok(ModelField {
        name: camel_case(wire_name),
        wire_name: wire_name.to_string(),
        ty,
        wire_type,
        is_message: types::is_message(field)?,
        is_repeated: types::is_repeated(field),
        is_map,
        map_value_type_primitive: referenced.is_some_and(|m| m.is_map && m.map_value_type_primitive),
    })
}

fn build_service(ctx: &ApiContext, service: &ServiceDescriptorProto) -> CompileResult<Service> {
    let name = require_name(service.name(), "service")?;
    let mut methods = Vec::with_capacity(service.method.len());

    for method in &service.method {
        let path = require_name(method.name(), "method")?;
        if method.client_streaming() || method.server_streaming() {
            return Err(CompileError::UnsupportedShape(format!(
                "streaming method {name}.{path}"
            )));
        }

        let input_type = resolve(&ctx.package, method.input_type());
        methods.push(ServiceMethod {
            name: lower_first(path),
            path: path.to_string(),
            input_arg: lower_first(&input_type),
            input_type,
            output_type: resolve(&ctx.package, method.output_type()),
        });
    }

    Ok(Service {
        name: name.to_string(),
        package: ctx.package.clone(),
        methods,
    })
}

fn require_name<'a>(name: &'a str, what: &str) -> CompileResult<&'a str> {
    if name.is_empty() {
        return Err(CompileError::UnsupportedShape(format!("{what} without a name")));
    }
    Ok(name)
}
