//! Expansion of command-line paths into the list of files to process.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use fimark_core::style::CommentStyle;
use walkdir::WalkDir;

/// Expand arguments into concrete file paths.
///
/// Plain paths are kept as given; a missing file surfaces as a per-file
/// error when it is processed. Directories are walked recursively, keeping
/// only files whose extension maps to a known comment style. Duplicates
/// are dropped, first occurrence wins. Shell globs arrive pre-expanded in
/// the argument list.
pub(crate) fn expand_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
            {
                if entry.file_type().is_file() && has_known_extension(entry.path()) {
                    push_unique(&mut files, &mut seen, entry.into_path());
                }
            }
        } else {
            push_unique(&mut files, &mut seen, path.clone());
        }
    }

    files
}

fn has_known_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(CommentStyle::known_extension)
}

fn push_unique(files: &mut Vec<PathBuf>, seen: &mut HashSet<PathBuf>, path: PathBuf) {
    if seen.insert(path.clone()) {
        files.push(path);
    }
}
