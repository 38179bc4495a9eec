//! `fimark check` – human-readable per-file integrity status.

use anyhow::Result;
use std::path::{Path, PathBuf};

use fimark_core::config::{Config, ToolConfig};
use fimark_core::verify::Verifier;

use crate::cli::{expand, resolve};

pub fn run_check(paths: &[PathBuf], style: Option<&str>, cfg: &ToolConfig) -> Result<i32> {
    let files = expand::expand_files(paths);
    if files.is_empty() {
        eprintln!("error: no files to check");
        return Ok(1);
    }
    let flag = style.map(resolve::flag_style);

    let mut valid = 0usize;
    let mut invalid = 0usize;
    let mut errors = 0usize;

    for file in &files {
        let config = Config {
            style: resolve::style_for(file, flag, cfg.default_style.as_deref()),
            buffer_size: cfg.buffer_size,
        };
        match check_one(file, config) {
            Ok(true) => {
                println!("✓ {}", file.display());
                valid += 1;
            }
            Ok(false) => {
                println!("✗ {} (integrity check failed)", file.display());
                invalid += 1;
            }
            Err(err) => {
                println!("✗ {} (error: {err})", file.display());
                errors += 1;
            }
        }
    }

    println!(
        "\nTotal: {} files, {valid} valid, {invalid} invalid, {errors} errors",
        files.len()
    );

    if invalid > 0 || errors > 0 {
        return Ok(1);
    }
    Ok(0)
}

fn check_one(path: &Path, config: Config) -> fimark_core::error::Result<bool> {
    Verifier::new(config)?.verify_file(path)
}
