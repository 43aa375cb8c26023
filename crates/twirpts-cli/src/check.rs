//! Descriptor set validation without output

use crate::descriptor::load_set;
use anyhow::{Context, Result};
use std::path::Path;
use twirpts_codegen::{Generator, TIMESTAMP_PROTO};
use twirpts_core::{ApiContext, GeneratorConfig};

/// Counts reported for one compiled file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    pub name: String,
    pub models: usize,
    pub services: usize,
    pub enums: usize,
    pub converters: usize,
}

impl FileSummary {
    fn new(name: &str, ctx: &ApiContext) -> Self {
        let (marshal, unmarshal) = ctx.flagged_models();
        let converters = ctx
            .models
            .iter()
            .filter(|m| m.has_converters())
            .map(|m| usize::from(m.can_marshal) + usize::from(m.can_unmarshal))
            .sum();

        tracing::debug!(
            file = name,
            marshal = marshal.len(),
            unmarshal = unmarshal.len(),
            "checked file"
        );
        Self {
            name: name.to_string(),
            models: ctx.models.iter().filter(|m| !m.primitive).count(),
            services: ctx.services.len(),
            enums: ctx.enums.len(),
            converters,
        }
    }
}

pub fn run(descriptor_set: &Path, config: GeneratorConfig) -> Result<()> {
    println!("Checking descriptor set: {}", descriptor_set.display());

    let set = load_set(descriptor_set)?;
    let summaries = summarize(&Generator::new(config), &set.file)?;

    for s in &summaries {
        println!(
            "✓ {}: {} models, {} services, {} enums, {} converters",
            s.name, s.models, s.services, s.enums, s.converters
        );
    }
    println!("\nDescriptor set is valid!");

    Ok(())
}

/// Compile every file of the set, stopping at the first failure
pub fn summarize(
    generator: &Generator,
    files: &[prost_types::FileDescriptorProto],
) -> Result<Vec<FileSummary>> {
    files
        .iter()
        .filter(|f| f.name() != TIMESTAMP_PROTO)
        .map(|f| {
            let ctx = generator
                .compile(f)
                .with_context(|| format!("Failed to compile {}", f.name()))?;
            Ok(FileSummary::new(f.name(), &ctx))
        })
        .collect()
}
