//! protoc-gen-twirp_ts - TypeScript Twirp client generator
//!
//! Modes:
//! - no subcommand - protoc plugin: `CodeGeneratorRequest` on stdin,
//!   `CodeGeneratorResponse` on stdout
//! - `protoc-gen-twirp_ts generate` - Generate clients from a descriptor set file
//! - `protoc-gen-twirp_ts check` - Compile a descriptor set without writing anything

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use twirpts_core::LogLevel;

mod check;
mod config;
mod descriptor;
mod generate;
mod plugin;

#[cfg(test)]
mod test_support;

#[derive(Parser)]
#[command(name = "protoc-gen-twirp_ts")]
#[command(author, version, about = "TypeScript Twirp client generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate client modules from a serialized FileDescriptorSet
    Generate {
        /// Descriptor set (e.g. from `protoc --descriptor_set_out`)
        #[arg(short, long)]
        descriptor_set: PathBuf,

        /// Output directory for generated modules
        #[arg(short, long)]
        output: PathBuf,

        /// Path to a TOML generator configuration
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Twirp version of the target server (v6 drops the /twirp prefix)
        #[arg(long)]
        twirp_version: Option<String>,

        /// Schema file to generate (default: every file in the set)
        #[arg(short, long = "file")]
        files: Vec<String>,
    },

    /// Compile a descriptor set and report what would be generated
    Check {
        /// Descriptor set (e.g. from `protoc --descriptor_set_out`)
        #[arg(short, long)]
        descriptor_set: PathBuf,

        /// Path to a TOML generator configuration
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    twirpts_logging::init_logging(LogLevel::default());

    let cli = Cli::parse();

    match cli.command {
        None => {
            plugin::run()?;
        }
        Some(Commands::Generate {
            descriptor_set,
            output,
            config,
            twirp_version,
            files,
        }) => {
            let config = config::load(config.as_deref(), twirp_version)?;
            generate::run(&descriptor_set, &output, config, &files)?;
        }
        Some(Commands::Check {
            descriptor_set,
            config,
        }) => {
            let config = config::load(config.as_deref(), None)?;
            check::run(&descriptor_set, config)?;
        }
    }

    Ok(())
}
