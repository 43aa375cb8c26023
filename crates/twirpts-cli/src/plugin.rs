//! protoc plugin protocol
//!
//! protoc runs the plugin with a `CodeGeneratorRequest` on stdin and reads a
//! `CodeGeneratorResponse` from stdout. Compilation failures are reported in
//! the response's `error` field; the process itself only fails when the
//! request cannot be read or the response cannot be written.

use crate::config::apply_log_level;
use crate::descriptor::select;
use anyhow::{Context, Result};
use prost::Message;
use prost_types::compiler::code_generator_response::{Feature, File};
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};
use std::io::{Read, Write};
use twirpts_codegen::Generator;
use twirpts_core::GeneratorConfig;

/// Run one request/response exchange over stdin/stdout
pub fn run() -> Result<()> {
    let mut input = Vec::new();
    std::io::stdin()
        .read_to_end(&mut input)
        .context("Failed to read CodeGeneratorRequest from stdin")?;
    let request = CodeGeneratorRequest::decode(input.as_slice())
        .context("Failed to decode CodeGeneratorRequest")?;

    let response = respond(&request);

    let mut output = Vec::with_capacity(response.encoded_len());
    response
        .encode(&mut output)
        .context("Failed to encode CodeGeneratorResponse")?;
    std::io::stdout()
        .write_all(&output)
        .context("Failed to write CodeGeneratorResponse to stdout")?;
    Ok(())
}

/// Build the response for a request. Either every requested file is
/// generated or the response carries only an error.
pub fn respond(request: &CodeGeneratorRequest) -> CodeGeneratorResponse {
    let mut response = CodeGeneratorResponse {
        supported_features: Some(Feature::Proto3Optional as u64),
        ..Default::default()
    };

    match generate(request) {
        Ok(files) => response.file = files,
        Err(e) => {
            let message = format!("{e:#}");
            tracing::error!(error = %message, "generation failed");
            response.error = Some(message);
        }
    }
    response
}

fn generate(request: &CodeGeneratorRequest) -> Result<Vec<File>> {
    let config = GeneratorConfig::from_parameter(request.parameter())
        .context("Invalid plugin parameter")?;
    apply_log_level(&config)?;

    if request.file_to_generate.is_empty() {
        return Ok(Vec::new());
    }
    let files = select(&request.proto_file, &request.file_to_generate)?;
    let generated = Generator::new(config).generate_all(files)?;

    Ok(generated
        .into_iter()
        .map(|g| File {
            name: Some(g.name),
            content: Some(g.content),
            ..Default::default()
        })
        .collect())
}
