//! twirpts-codegen - TypeScript Twirp client generation from protobuf descriptors
//!
//! # Architecture
//!
//! ```text
//! FileDescriptorProto
//!     ↓
//!  [builder]  one top-down pass, names resolved through the lookup table
//!     ↓
//!  ApiContext
//!     ↓
//!  [twirpts_core::apply_flags]  marshal/unmarshal reachability
//!     ↓
//!  [render] → TypeScript module
//! ```
//!
//! [`Generator`] ties the stages together per file.
//!
//! # Example
//!
//! ```rust,no_run
//! use prost_types::FileDescriptorProto;
//! use twirpts_codegen::Generator;
//! use twirpts_core::GeneratorConfig;
//!
//! # fn load() -> FileDescriptorProto { FileDescriptorProto::default() }
//! let generator = Generator::new(GeneratorConfig::from_parameter("version=v6")?);
//! for file in generator.generate(&load())? {
//!     println!("{}:\n{}", file.name, file.content);
//! }
//! # Ok::<(), twirpts_core::CompileError>(())
//! ```

pub mod builder;
pub mod generator;
pub mod render;
pub mod types;

#[cfg(test)]
mod test_support;

pub use builder::build_context;
pub use generator::{GeneratedFile, Generator, TIMESTAMP_PROTO, module_filename};
pub use render::{FieldConversion, render};
