//! Offline generation from a descriptor set file

use crate::descriptor::{load_set, select};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use twirpts_codegen::{GeneratedFile, Generator};
use twirpts_core::GeneratorConfig;

/// Compile the selected files and write the modules under `output`.
///
/// Nothing is written unless every file compiles.
pub fn run(
    descriptor_set: &Path,
    output: &Path,
    config: GeneratorConfig,
    files: &[String],
) -> Result<()> {
    println!("Generating TypeScript clients from {}", descriptor_set.display());

    let set = load_set(descriptor_set)?;
    let selected = select(&set.file, files)?;
    let generated = Generator::new(config)
        .generate_all(selected)
        .context("Code generation failed")?;

    let written = write_all(output, &generated)?;
    for path in &written {
        println!("✓ {}", path.display());
    }
    println!("\nGenerated {} file(s) in {}", written.len(), output.display());

    Ok(())
}

/// Write generated files below `output`, creating directories as needed
pub fn write_all(output: &Path, generated: &[GeneratedFile]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(generated.len());

    for file in generated {
        let path = output.join(&file.name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        std::fs::write(&path, &file.content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(path);
    }

    Ok(written)
}
