//! TypeScript client module rendering
//!
//! [`render`] is a pure function of a finished [`ApiContext`]: no I/O, and the
//! output follows the insertion order of enums, models, and services, so the
//! same context always renders to the same text.
//!
//! The module imports `createTwirpRequest`, `throwTwirpError`, and `Fetch`
//! from the support runtime `./twirp`, which is shipped separately.

use std::fmt::Write;
use twirpts_core::{ApiContext, CompileError, CompileResult, Enum, Model, ModelField, Service};

const RUNTIME_IMPORT: &str = "import {createTwirpRequest, throwTwirpError, Fetch} from './twirp';";

/// How a field's value is carried between the typed and wire-JSON shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldConversion<'a> {
    /// Same value on both sides (scalars, enums, timestamps, primitive maps)
    Passthrough,
    /// Single message value converted by the named model's converter
    Message(&'a str),
    /// Array of messages, each converted by the named model's converter
    RepeatedMessage(&'a str),
}

impl<'a> FieldConversion<'a> {
    pub fn of(field: &'a ModelField) -> Self {
        if field.is_array() && field.is_message {
            FieldConversion::RepeatedMessage(field.base_type())
        } else if field.is_message && !field.map_value_type_primitive {
            FieldConversion::Message(&field.ty)
        } else {
            FieldConversion::Passthrough
        }
    }

    /// Referenced model whose converter this conversion calls
    pub fn model(&self) -> Option<&'a str> {
        match *self {
            FieldConversion::Passthrough => None,
            FieldConversion::Message(name) | FieldConversion::RepeatedMessage(name) => Some(name),
        }
    }

    /// Expression reading `field` off a typed value `m`, in wire shape
    pub fn to_json_expr(&self, field: &ModelField) -> String {
        let access = format!("m.{}", field.name);
        match self {
            FieldConversion::Passthrough => access,
            FieldConversion::Message(ty) => format!("{access} && {}({access})", to_json_fn(ty)),
            FieldConversion::RepeatedMessage(ty) => {
                format!("{access} && {access}.map({})", to_json_fn(ty))
            }
        }
    }

    /// Expression reading `field` off a wire value `m`, in typed shape
    pub fn from_json_expr(&self, field: &ModelField) -> String {
        let access = format!("m.{}", field.wire_name);
        match self {
            FieldConversion::Passthrough => access,
            FieldConversion::Message(ty) => format!("{access} && {}({access})", from_json_fn(ty)),
            FieldConversion::RepeatedMessage(ty) => {
                format!("{access} && {access}.map({})", from_json_fn(ty))
            }
        }
    }
}

/// Name of the generated to-JSON converter for `model`
pub fn to_json_fn(model: &str) -> String {
    format!("{model}ToJSON")
}

/// Name of the generated from-JSON converter for `model`
pub fn from_json_fn(model: &str) -> String {
    format!("JSONTo{model}")
}

fn json_interface(model: &str) -> String {
    format!("{model}JSON")
}

/// Render the client module for a flagged context.
///
/// # Errors
///
/// [`CompileError::Render`] when a map model lacks a value type, or when a
/// converter would call a converter that is not generated (usually because
/// [`twirpts_core::apply_flags`] was not run).
pub fn render(ctx: &ApiContext) -> CompileResult<String> {
    let mut out = String::new();
    out.push_str(RUNTIME_IMPORT);
    out.push('\n');

    for e in &ctx.enums {
        render_enum(&mut out, e)?;
    }

    for model in ctx.models.iter().filter(|m| !m.primitive) {
        render_model(&mut out, ctx, model)?;
    }

    for service in &ctx.services {
        render_service(&mut out, ctx, service)?;
    }

    Ok(out)
}

fn render_enum(out: &mut String, e: &Enum) -> CompileResult<()> {
    writeln!(out)?;
    writeln!(out, "export enum {} {{", e.name)?;
    for value in &e.values {
        writeln!(out, "    {value} = \"{value}\",")?;
    }
    writeln!(out, "}}")?;
    Ok(())
}

fn render_model(out: &mut String, ctx: &ApiContext, model: &Model) -> CompileResult<()> {
    let map_value = if model.is_map {
        Some(model.map_value_type.as_deref().ok_or_else(|| {
            CompileError::Render(format!("map model {} has no value type", model.name))
        })?)
    } else {
        None
    };

    writeln!(out)?;
    writeln!(out, "export interface {} {{", model.name)?;
    match map_value {
        Some(value) => writeln!(out, "    [key: string]: {value};")?,
        None => {
            for field in &model.fields {
                writeln!(out, "    {}?: {};", field.name, field.ty)?;
            }
        }
    }
    writeln!(out, "}}")?;

    writeln!(out)?;
    writeln!(out, "interface {} {{", json_interface(&model.name))?;
    match map_value {
        Some(value) if model.map_value_type_primitive => {
            writeln!(out, "    [key: string]: {value};")?
        }
        Some(value) => writeln!(out, "    [key: string]: {};", json_interface(value))?,
        None => {
            for field in &model.fields {
                writeln!(out, "    {}?: {};", field.wire_name, field.wire_type)?;
            }
        }
    }
    writeln!(out, "}}")?;

    if !model.has_converters() {
        return Ok(());
    }
    if model.can_marshal {
        render_to_json(out, ctx, model, map_value)?;
    }
    if model.can_unmarshal {
        render_from_json(out, ctx, model, map_value)?;
    }
    Ok(())
}

fn render_to_json(
    out: &mut String,
    ctx: &ApiContext,
    model: &Model,
    map_value: Option<&str>,
) -> CompileResult<()> {
    let name = &model.name;
    let json = json_interface(name);

    writeln!(out)?;
    writeln!(out, "const {name}ToJSON = (m: {name}): {json} => {{")?;
    match map_value {
        Some(value) => {
            require_converter(ctx, value, true, name)?;
            render_map_reduce(out, &to_json_fn(value), &json)?;
        }
        None => {
            writeln!(out, "    return {{")?;
            for field in &model.fields {
                let conversion = FieldConversion::of(field);
                if let Some(target) = conversion.model() {
                    require_converter(ctx, target, true, name)?;
                }
                writeln!(
                    out,
                    "        {}: {},",
                    field.wire_name,
                    conversion.to_json_expr(field)
                )?;
            }
            writeln!(out, "    }};")?;
        }
    }
    writeln!(out, "}};")?;
    Ok(())
}

fn render_from_json(
    out: &mut String,
    ctx: &ApiContext,
    model: &Model,
    map_value: Option<&str>,
) -> CompileResult<()> {
    let name = &model.name;
    let json = json_interface(name);

    writeln!(out)?;
    writeln!(out, "const JSONTo{name} = (m: {json}): {name} => {{")?;
    match map_value {
        Some(value) => {
            require_converter(ctx, value, false, name)?;
            render_map_reduce(out, &from_json_fn(value), name)?;
        }
        None => {
            writeln!(out, "    return {{")?;
            for field in &model.fields {
                let conversion = FieldConversion::of(field);
                if let Some(target) = conversion.model() {
                    require_converter(ctx, target, false, name)?;
                }
                writeln!(
                    out,
                    "        {}: {},",
                    field.name,
                    conversion.from_json_expr(field)
                )?;
            }
            writeln!(out, "    }};")?;
        }
    }
    writeln!(out, "}};")?;
    Ok(())
}

fn render_map_reduce(out: &mut String, convert: &str, acc_type: &str) -> CompileResult<()> {
    writeln!(out, "    return Object.keys(m).reduce((acc, key) => {{")?;
    writeln!(out, "        acc[key] = {convert}(m[key]);")?;
    writeln!(out, "        return acc;")?;
    writeln!(out, "    }}, {{}} as {acc_type});")?;
    Ok(())
}

fn render_service(out: &mut String, ctx: &ApiContext, service: &Service) -> CompileResult<()> {
    let name = &service.name;

    writeln!(out)?;
    writeln!(out, "export interface {name} {{")?;
    for method in &service.methods {
        writeln!(
            out,
            "    {}: ({}: {}) => Promise<{}>;",
            method.name, method.input_arg, method.input_type, method.output_type
        )?;
    }
    writeln!(out, "}}")?;

    writeln!(out)?;
    writeln!(out, "export class {name}Client implements {name} {{")?;
    writeln!(out, "    private hostname: string;")?;
    writeln!(out, "    private fetch: Fetch;")?;
    writeln!(out, "    private writeCamelCase: boolean;")?;
    writeln!(
        out,
        "    private pathPrefix = \"{}/{}.{name}/\";",
        ctx.route_prefix, service.package
    )?;
    writeln!(out, "    private optionsOverride: object;")?;
    writeln!(out)?;
    writeln!(
        out,
        "    constructor(hostname: string, fetch: Fetch, writeCamelCase = false, optionsOverride: any = {{}}) {{"
    )?;
    writeln!(out, "        this.hostname = hostname;")?;
    writeln!(out, "        this.fetch = fetch;")?;
    writeln!(out, "        this.writeCamelCase = writeCamelCase;")?;
    writeln!(out, "        this.optionsOverride = optionsOverride;")?;
    writeln!(out, "    }}")?;

    for method in &service.methods {
        let context = format!("method {name}.{}", method.path);
        require_converter(ctx, &method.input_type, true, &context)?;
        require_converter(ctx, &method.output_type, false, &context)?;

        let arg = &method.input_arg;
        let input = &method.input_type;

        writeln!(out)?;
        writeln!(
            out,
            "    {}({arg}: {input}): Promise<{}> {{",
            method.name, method.output_type
        )?;
        writeln!(
            out,
            "        const url = this.hostname + this.pathPrefix + \"{}\";",
            method.path
        )?;
        writeln!(
            out,
            "        let body: {input} | {} = {arg};",
            json_interface(input)
        )?;
        writeln!(out, "        if (!this.writeCamelCase) {{")?;
        writeln!(out, "            body = {}({arg});", to_json_fn(input))?;
        writeln!(out, "        }}")?;
        writeln!(
            out,
            "        return this.fetch(createTwirpRequest(url, body, this.optionsOverride)).then((resp) => {{"
        )?;
        writeln!(out, "            if (!resp.ok) {{")?;
        writeln!(out, "                return throwTwirpError(resp);")?;
        writeln!(out, "            }}")?;
        writeln!(out)?;
        writeln!(
            out,
            "            return resp.json().then({});",
            from_json_fn(&method.output_type)
        )?;
        writeln!(out, "        }});")?;
        writeln!(out, "    }}")?;
    }
    writeln!(out, "}}")?;
    Ok(())
}

/// Fail unless `target` gets the converter `context` is about to call.
fn require_converter(
    ctx: &ApiContext,
    target: &str,
    marshal: bool,
    context: &str,
) -> CompileResult<()> {
    let model = ctx.require_model(target, context)?;
    let flagged = if marshal {
        model.can_marshal
    } else {
        model.can_unmarshal
    };

    if flagged && model.has_converters() {
        return Ok(());
    }
    Err(CompileError::Render(format!(
        "{context} needs {} but it is not generated",
        if marshal {
            to_json_fn(target)
        } else {
            from_json_fn(target)
        }
    )))
}
