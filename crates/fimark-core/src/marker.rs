//! Rendering and locating the trailing integrity marker line.

use regex::bytes::Regex;

use crate::style::CommentStyle;

/// Label preceding the hex checksum in ordinary comment markers.
pub(crate) const KEY: &str = "FileIntegrity: ";

/// Line-ending convention of a file, preserved when inserting text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_bytes(self) -> &'static [u8] {
        match self {
            LineEnding::Lf => b"\n",
            LineEnding::CrLf => b"\r\n",
        }
    }
}

/// Result of scanning a window for a marker line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerScan {
    /// Well-formed marker: byte offset of its line start and the stored value.
    Found { start: usize, value: u32 },
    /// A marker-shaped line whose payload is not eight uppercase hex digits.
    Malformed,
    /// No marker line in the window.
    Absent,
}

/// Compiled matcher and renderer for one comment style.
///
/// The strict pattern accepts exactly eight uppercase hex digits. The
/// lenient pattern also matches wrong-length or lowercase payloads so they
/// can be reported as malformed instead of silently absent; for checksum
/// purposes a malformed line is ordinary content.
#[derive(Debug)]
pub struct MarkerPattern {
    style: CommentStyle,
    strict: Regex,
    lenient: Regex,
}

impl MarkerPattern {
    pub fn new(style: CommentStyle) -> Self {
        let prefix = regex::escape(style.prefix);
        let suffix = regex::escape(style.suffix);
        let (strict, lenient) = if style.prefix_contains_key {
            (
                format!(r#"(?m)^{prefix}"([0-9A-F]{{8}})"{suffix}\r?$"#),
                format!(r#"(?m)^{prefix}"([0-9A-Fa-f]*)"{suffix}\r?$"#),
            )
        } else {
            let key = KEY;
            (
                format!(r"(?m)^{prefix}{key}([0-9A-F]{{8}}){suffix}\r?$"),
                format!(r"(?m)^{prefix}{key}([0-9A-Fa-f]*){suffix}\r?$"),
            )
        };
        Self {
            style,
            strict: Regex::new(&strict).expect("marker pattern is a fixed literal"),
            lenient: Regex::new(&lenient).expect("marker pattern is a fixed literal"),
        }
    }

    /// Longest possible rendered marker line, including a CRLF ending.
    pub fn max_len(&self) -> usize {
        let key_len = if self.style.prefix_contains_key {
            2 // the two quotes around the hex field
        } else {
            KEY.len()
        };
        self.style.prefix.len() + key_len + 8 + self.style.suffix.len() + 2
    }

    /// Render the marker line for `value`, terminated with `ending`.
    pub fn render(&self, value: u32, ending: LineEnding) -> Vec<u8> {
        let line = if self.style.prefix_contains_key {
            format!("{}\"{:08X}\"{}", self.style.prefix, value, self.style.suffix)
        } else {
            format!("{}{}{:08X}{}", self.style.prefix, KEY, value, self.style.suffix)
        };
        let mut bytes = line.into_bytes();
        bytes.extend_from_slice(ending.as_bytes());
        bytes
    }

    /// Locate the last marker line in `window`.
    pub fn scan(&self, window: &[u8]) -> MarkerScan {
        if let Some(caps) = self.strict.captures_iter(window).last() {
            if let (Some(whole), Some(hex8)) = (caps.get(0), caps.get(1)) {
                if let Some(value) = parse_value(hex8.as_bytes()) {
                    return MarkerScan::Found {
                        start: whole.start(),
                        value,
                    };
                }
                return MarkerScan::Malformed;
            }
        }
        if self.lenient.is_match(window) {
            return MarkerScan::Malformed;
        }
        MarkerScan::Absent
    }
}

/// Decode exactly eight hex digits into the stored checksum value.
fn parse_value(hex8: &[u8]) -> Option<u32> {
    let bytes = hex::decode(hex8).ok()?;
    let bytes: [u8; 4] = bytes.as_slice().try_into().ok()?;
    Some(u32::from_be_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style;

    #[test]
    fn render_double_slash() {
        let pattern = MarkerPattern::new(style::DOUBLE_SLASH);
        assert_eq!(
            pattern.render(0xDEADBEEF, LineEnding::Lf),
            b"// FileIntegrity: DEADBEEF\n"
        );
        assert_eq!(
            pattern.render(0, LineEnding::CrLf),
            b"// FileIntegrity: 00000000\r\n"
        );
    }

    #[test]
    fn render_html_keeps_suffix() {
        let pattern = MarkerPattern::new(style::HTML);
        assert_eq!(
            pattern.render(0x0123ABCD, LineEnding::Lf),
            b"<!-- FileIntegrity: 0123ABCD -->\n"
        );
    }

    #[test]
    fn render_declaration_form() {
        let pattern = MarkerPattern::new(style::DECLARATION);
        assert_eq!(
            pattern.render(0xCAFEF00D, LineEnding::Lf),
            b"FileIntegrity = \"CAFEF00D\"\n"
        );
    }

    #[test]
    fn scan_finds_marker_at_end() {
        let pattern = MarkerPattern::new(style::DOUBLE_SLASH);
        let window = b"fn main() {}\n// FileIntegrity: DEADBEEF\n";
        assert_eq!(
            pattern.scan(window),
            MarkerScan::Found {
                start: 13,
                value: 0xDEADBEEF
            }
        );
    }

    #[test]
    fn scan_finds_marker_without_trailing_newline() {
        let pattern = MarkerPattern::new(style::DOUBLE_SLASH);
        let window = b"x\n// FileIntegrity: 00000001";
        assert_eq!(
            pattern.scan(window),
            MarkerScan::Found { start: 2, value: 1 }
        );
    }

    #[test]
    fn scan_matches_crlf_lines() {
        let pattern = MarkerPattern::new(style::DOUBLE_SLASH);
        let window = b"x\r\n// FileIntegrity: 000000FF\r\n";
        assert_eq!(
            pattern.scan(window),
            MarkerScan::Found {
                start: 3,
                value: 0xFF
            }
        );
    }

    #[test]
    fn scan_takes_last_of_multiple_markers() {
        let pattern = MarkerPattern::new(style::DOUBLE_SLASH);
        let window = b"// FileIntegrity: 00000001\n// FileIntegrity: 00000002\n";
        assert_eq!(
            pattern.scan(window),
            MarkerScan::Found {
                start: 27,
                value: 2
            }
        );
    }

    #[test]
    fn scan_requires_line_start() {
        let pattern = MarkerPattern::new(style::DOUBLE_SLASH);
        let window = b"code // FileIntegrity: DEADBEEF\n";
        assert_eq!(pattern.scan(window), MarkerScan::Absent);
    }

    #[test]
    fn scan_rejects_lowercase_as_malformed() {
        let pattern = MarkerPattern::new(style::DOUBLE_SLASH);
        let window = b"x\n// FileIntegrity: deadbeef\n";
        assert_eq!(pattern.scan(window), MarkerScan::Malformed);
    }

    #[test]
    fn scan_rejects_short_payload_as_malformed() {
        let pattern = MarkerPattern::new(style::DOUBLE_SLASH);
        let window = b"x\n// FileIntegrity: ABCDEF\n";
        assert_eq!(pattern.scan(window), MarkerScan::Malformed);
    }

    #[test]
    fn scan_ignores_non_hex_garbage() {
        let pattern = MarkerPattern::new(style::DOUBLE_SLASH);
        let window = b"x\n// FileIntegrity: NOTAHASH\n";
        assert_eq!(pattern.scan(window), MarkerScan::Absent);
    }

    #[test]
    fn scan_declaration_form() {
        let pattern = MarkerPattern::new(style::DECLARATION);
        let window = b"value = 1\nFileIntegrity = \"0000ABCD\"\n";
        assert_eq!(
            pattern.scan(window),
            MarkerScan::Found {
                start: 10,
                value: 0xABCD
            }
        );
        assert_eq!(
            pattern.scan(b"FileIntegrity = \"abcd\"\n"),
            MarkerScan::Malformed
        );
    }

    #[test]
    fn max_len_covers_rendered_line() {
        for s in [
            style::DOUBLE_SLASH,
            style::HASH,
            style::SQL,
            style::HTML,
            style::BLOCK,
            style::DECLARATION,
        ] {
            let pattern = MarkerPattern::new(s);
            let rendered = pattern.render(u32::MAX, LineEnding::CrLf);
            assert!(rendered.len() <= pattern.max_len());
        }
    }
}
