//! Descriptor set loading and file selection

use anyhow::{Context, Result, bail};
use prost::Message;
use prost_types::{FileDescriptorProto, FileDescriptorSet};
use std::path::Path;

/// Read a serialized `FileDescriptorSet`
pub fn load_set(path: &Path) -> Result<FileDescriptorSet> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read descriptor set: {}", path.display()))?;

    FileDescriptorSet::decode(bytes.as_slice())
        .with_context(|| format!("Failed to decode descriptor set: {}", path.display()))
}

/// Pick the files named in `names`, in that order.
///
/// An empty `names` selects every file.
pub fn select<'a>(
    files: &'a [FileDescriptorProto],
    names: &[String],
) -> Result<Vec<&'a FileDescriptorProto>> {
    if names.is_empty() {
        return Ok(files.iter().collect());
    }

    let mut selected = Vec::with_capacity(names.len());
    for name in names {
        match files.iter().find(|f| f.name() == name) {
            Some(file) => selected.push(file),
            None => bail!("File to generate not found in descriptors: {name}"),
        }
    }
    Ok(selected)
}
