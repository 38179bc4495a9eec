//! `fimark stamp` – add or update integrity markers.

use anyhow::Result;
use std::path::{Path, PathBuf};

use fimark_core::config::{Config, ToolConfig};
use fimark_core::stamp::{Outcome, Stamper};

use crate::cli::{expand, resolve};

pub fn run_stamp(paths: &[PathBuf], style: Option<&str>, cfg: &ToolConfig) -> Result<i32> {
    let files = expand::expand_files(paths);
    if files.is_empty() {
        eprintln!("error: no files to stamp");
        return Ok(1);
    }
    let flag = style.map(resolve::flag_style);

    let mut stamped = 0usize;
    let mut unchanged = 0usize;
    let mut failures = Vec::new();

    for file in &files {
        let config = Config {
            style: resolve::style_for(file, flag, cfg.default_style.as_deref()),
            buffer_size: cfg.buffer_size,
        };
        match stamp_one(file, config) {
            Ok(Outcome::Stamped) => {
                tracing::info!(path = %file.display(), "stamped");
                stamped += 1;
            }
            Ok(Outcome::Unchanged) => unchanged += 1,
            Err(err) => failures.push(format!("{}: {err}", file.display())),
        }
    }

    for failure in &failures {
        eprintln!("error: {failure}");
    }
    if !failures.is_empty() {
        eprintln!(
            "\nStamped {stamped}, unchanged {unchanged}, failed {}",
            failures.len()
        );
        return Ok(1);
    }

    println!("Stamped {stamped} file(s), {unchanged} already current");
    Ok(0)
}

fn stamp_one(path: &Path, config: Config) -> fimark_core::error::Result<Outcome> {
    Stamper::new(config)?.process_file(path)
}
