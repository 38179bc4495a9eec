//! Comment styles for the language families fimark knows how to stamp.

/// How a marker line is rendered and recognized for one language family.
///
/// `prefix_contains_key` marks declaration styles: the prefix itself carries
/// the key text and the checksum is rendered as a quoted literal instead of
/// following a `FileIntegrity: ` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentStyle {
    pub prefix: &'static str,
    pub suffix: &'static str,
    pub prefix_contains_key: bool,
}

/// `// ` line comments (Go, C family, Java, JavaScript, TypeScript).
pub const DOUBLE_SLASH: CommentStyle = CommentStyle {
    prefix: "// ",
    suffix: "",
    prefix_contains_key: false,
};

/// `# ` line comments (Python, shell, Ruby).
pub const HASH: CommentStyle = CommentStyle {
    prefix: "# ",
    suffix: "",
    prefix_contains_key: false,
};

/// `-- ` line comments (SQL).
pub const SQL: CommentStyle = CommentStyle {
    prefix: "-- ",
    suffix: "",
    prefix_contains_key: false,
};

/// `<!-- -->` bracket comments (HTML, XML).
pub const HTML: CommentStyle = CommentStyle {
    prefix: "<!-- ",
    suffix: " -->",
    prefix_contains_key: false,
};

/// `/* */` block comments (CSS).
pub const BLOCK: CommentStyle = CommentStyle {
    prefix: "/* ",
    suffix: " */",
    prefix_contains_key: false,
};

/// Declaration form: the marker is a key/value line like
/// `FileIntegrity = "ABCD1234"`, valid syntax in TOML and INI files.
pub const DECLARATION: CommentStyle = CommentStyle {
    prefix: "FileIntegrity = ",
    suffix: "",
    prefix_contains_key: true,
};

impl CommentStyle {
    /// Style for a file extension (with or without the leading dot).
    /// Unknown extensions get `DOUBLE_SLASH`.
    pub fn for_extension(ext: &str) -> CommentStyle {
        match normalize(ext).as_str() {
            "go" | "c" | "h" | "cpp" | "hpp" | "cc" | "cxx" | "java" | "js" | "ts" | "jsx"
            | "tsx" => DOUBLE_SLASH,
            "py" | "sh" | "bash" | "rb" => HASH,
            "sql" => SQL,
            "html" | "htm" | "xml" => HTML,
            "css" => BLOCK,
            "toml" | "ini" => DECLARATION,
            _ => DOUBLE_SLASH,
        }
    }

    /// True when the extension maps to a style of its own. Used when
    /// expanding directories so unrelated files are not stamped by accident.
    pub fn known_extension(ext: &str) -> bool {
        matches!(
            normalize(ext).as_str(),
            "go" | "c"
                | "h"
                | "cpp"
                | "hpp"
                | "cc"
                | "cxx"
                | "java"
                | "js"
                | "ts"
                | "jsx"
                | "tsx"
                | "py"
                | "sh"
                | "bash"
                | "rb"
                | "sql"
                | "html"
                | "htm"
                | "xml"
                | "css"
                | "toml"
                | "ini"
        )
    }

    /// Style for a user-supplied name (the CLI `--style` flag).
    pub fn from_name(name: &str) -> Option<CommentStyle> {
        match name.to_ascii_lowercase().as_str() {
            "go" | "c" | "cpp" | "java" | "js" | "javascript" | "ts" => Some(DOUBLE_SLASH),
            "python" | "py" | "shell" | "sh" | "bash" | "ruby" | "rb" => Some(HASH),
            "sql" => Some(SQL),
            "html" | "xml" => Some(HTML),
            "css" | "block" => Some(BLOCK),
            "decl" | "declaration" | "toml" | "ini" => Some(DECLARATION),
            _ => None,
        }
    }
}

fn normalize(ext: &str) -> String {
    ext.trim_start_matches('.').to_ascii_lowercase()
}
