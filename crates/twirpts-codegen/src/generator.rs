//! Per-file compilation driver
//!
//! ```text
//! FileDescriptorProto
//!     ↓
//!  [build_context]
//!     ↓
//!  ApiContext ──[apply_flags]──→ flagged ApiContext
//!     ↓
//!  [render] → <basename>.ts
//! ```

use crate::builder::build_context;
use crate::render::render;
use prost_types::FileDescriptorProto;
use twirpts_core::{ApiContext, CompileResult, GeneratorConfig, apply_flags};

/// Schema file that only declares the timestamp type and yields no module
pub const TIMESTAMP_PROTO: &str = "google/protobuf/timestamp.proto";

/// One emitted output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path relative to the output root
    pub name: String,
    pub content: String,
}

/// Compiles schema files into TypeScript client modules
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Build and flag the object model for one file, without rendering.
    pub fn compile(&self, file: &FileDescriptorProto) -> CompileResult<ApiContext> {
        let mut ctx = build_context(file, self.config.route_prefix())?;
        apply_flags(&mut ctx)?;
        Ok(ctx)
    }

    /// Generate the client module for one file.
    ///
    /// Returns an empty list for [`TIMESTAMP_PROTO`], exactly one file
    /// otherwise.
    pub fn generate(&self, file: &FileDescriptorProto) -> CompileResult<Vec<GeneratedFile>> {
        if file.name() == TIMESTAMP_PROTO {
            tracing::debug!(file = TIMESTAMP_PROTO, "skipping well-known timestamp schema");
            return Ok(Vec::new());
        }

        let ctx = self.compile(file)?;
        let generated = GeneratedFile {
            name: module_filename(file.name()),
            content: render(&ctx)?,
        };

        tracing::info!(
            schema = file.name(),
            output = %generated.name,
            models = ctx.models.len(),
            services = ctx.services.len(),
            "generated client module"
        );
        Ok(vec![generated])
    }

    /// Generate every file, or nothing if any of them fails.
    pub fn generate_all<'a, I>(&self, files: I) -> CompileResult<Vec<GeneratedFile>>
    where
        I: IntoIterator<Item = &'a FileDescriptorProto>,
    {
        let mut generated = Vec::new();
        for file in files {
            generated.extend(self.generate(file).inspect_err(|e| {
                tracing::error!(schema = file.name(), kind = e.kind(), error = %e, "compilation failed");
            })?);
        }
        Ok(generated)
    }
}

/// Output name for a schema file.
///
/// `.proto` and `.protodevel` files keep only their basename; anything else
/// keeps its full name. `.ts` is appended in both cases.
pub fn module_filename(schema: &str) -> String {
    let stem = ["proto", "protodevel"]
        .iter()
        .find_map(|ext| {
            schema
                .strip_suffix(ext)
                .and_then(|s| s.strip_suffix('.'))
        })
        .map(|stem| stem.rsplit('/').next().unwrap_or(stem));

    format!("{}.ts", stem.unwrap_or(schema))
}

#[cfg(test)]
#[path = "generator/generator_tests.rs"]
mod generator_tests;
