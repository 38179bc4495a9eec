//! Per-file comment style resolution.

use std::path::Path;

use fimark_core::style::{self, CommentStyle};

/// Resolve the `--style` flag once per invocation. An unknown name warns on
/// stderr and falls back to the double-slash default.
pub(crate) fn flag_style(name: &str) -> CommentStyle {
    match CommentStyle::from_name(name) {
        Some(s) => s,
        None => {
            eprintln!("warning: unknown style '{name}', using default");
            style::DOUBLE_SLASH
        }
    }
}

/// Style for one file: explicit flag, then the extension table, then the
/// configured default style, then double-slash.
pub(crate) fn style_for(
    path: &Path,
    flag: Option<CommentStyle>,
    default_style: Option<&str>,
) -> CommentStyle {
    if let Some(s) = flag {
        return s;
    }
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        if CommentStyle::known_extension(ext) {
            return CommentStyle::for_extension(ext);
        }
    }
    default_style
        .and_then(CommentStyle::from_name)
        .unwrap_or(style::DOUBLE_SLASH)
}
