//! `fimark verify` – verify integrity markers, exit code only in quiet mode.

use anyhow::Result;
use std::path::{Path, PathBuf};

use fimark_core::config::{Config, ToolConfig};
use fimark_core::verify::Verifier;

use crate::cli::{expand, resolve};

pub fn run_verify(
    paths: &[PathBuf],
    style: Option<&str>,
    quiet: bool,
    cfg: &ToolConfig,
) -> Result<i32> {
    let files = expand::expand_files(paths);
    if files.is_empty() {
        if !quiet {
            eprintln!("error: no files to verify");
        }
        return Ok(1);
    }
    let flag = style.map(resolve::flag_style);

    let mut valid = 0usize;
    let mut invalid = Vec::new();
    let mut errors = Vec::new();

    for file in &files {
        let config = Config {
            style: resolve::style_for(file, flag, cfg.default_style.as_deref()),
            buffer_size: cfg.buffer_size,
        };
        match verify_one(file, config) {
            Ok(true) => valid += 1,
            Ok(false) => invalid.push(file),
            Err(err) => errors.push(format!("{}: {err}", file.display())),
        }
    }

    if !quiet {
        for err in &errors {
            eprintln!("error: {err}");
        }
        for file in &invalid {
            eprintln!("invalid: {}", file.display());
        }
    }

    if !invalid.is_empty() || !errors.is_empty() {
        if !quiet {
            eprintln!(
                "\nVerified {} files: {valid} valid, {} invalid, {} errors",
                files.len(),
                invalid.len(),
                errors.len()
            );
        }
        return Ok(1);
    }

    if !quiet {
        println!("All {valid} file(s) verified");
    }
    Ok(0)
}

fn verify_one(path: &Path, config: Config) -> fimark_core::error::Result<bool> {
    Verifier::new(config)?.verify_file(path)
}
