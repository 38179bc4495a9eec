//! CLI for the fimark integrity marker tool.

mod commands;
mod expand;
mod resolve;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use fimark_core::config;
use std::path::PathBuf;

use commands::{run_check, run_completions, run_stamp, run_verify};

/// Top-level CLI for the fimark integrity marker tool.
#[derive(Debug, Parser)]
#[command(name = "fimark")]
#[command(version)]
#[command(about = "fimark: trailing CRC-32 integrity markers for text files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Add or update integrity markers in files.
    Stamp {
        /// Comment style (go|c|python|shell|ruby|js|sql|html|css|decl). Default: detect from file extension.
        #[arg(long, value_name = "STYLE")]
        style: Option<String>,

        /// Files to stamp; directories are walked recursively.
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Verify integrity markers (exit 0 only when every file is valid).
    Verify {
        /// Comment style (go|c|python|shell|ruby|js|sql|html|css|decl). Default: detect from file extension.
        #[arg(long, value_name = "STYLE")]
        style: Option<String>,

        /// Quiet mode: no output, exit code only.
        #[arg(short, long)]
        quiet: bool,

        /// Files to verify; directories are walked recursively.
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Check files and print per-file integrity status.
    Check {
        /// Comment style (go|c|python|shell|ruby|js|sql|html|css|decl). Default: detect from file extension.
        #[arg(long, value_name = "STYLE")]
        style: Option<String>,

        /// Files to check; directories are walked recursively.
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

impl CliCommand {
    /// Parse the process arguments, run the selected command, and return its
    /// exit code.
    pub fn run_from_args() -> Result<i32> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        let code = match cli.command {
            CliCommand::Stamp { style, paths } => run_stamp(&paths, style.as_deref(), &cfg)?,
            CliCommand::Verify {
                style,
                quiet,
                paths,
            } => run_verify(&paths, style.as_deref(), quiet, &cfg)?,
            CliCommand::Check { style, paths } => run_check(&paths, style.as_deref(), &cfg)?,
            CliCommand::Completions { shell } => run_completions(shell),
        };
        Ok(code)
    }
}

#[cfg(test)]
mod tests;
