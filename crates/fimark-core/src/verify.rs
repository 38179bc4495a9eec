//! Verification: recompute the content checksum and compare it with the
//! stored marker.

use std::fs;
use std::io::Read;
use std::path::Path;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::marker::{MarkerPattern, MarkerScan};
use crate::stream;

/// Checks integrity markers with the same sliding-window pass as stamping,
/// minus the output side.
pub struct Verifier {
    config: Config,
    pattern: MarkerPattern,
    window_size: usize,
}

impl Verifier {
    pub fn new(config: Config) -> Result<Self> {
        let pattern = MarkerPattern::new(config.style);
        let window_size = pattern.max_len() + 2;
        if config.buffer_size <= window_size {
            return Err(Error::BufferTooSmall {
                given: config.buffer_size,
                minimum: window_size,
            });
        }
        Ok(Self {
            config,
            pattern,
            window_size,
        })
    }

    /// Verify the integrity marker of `path`.
    ///
    /// `Ok(true)` when a well-formed marker matches the content checksum,
    /// `Ok(false)` when it does not. A missing marker, a malformed payload,
    /// and an empty file are errors, so callers can tell a tampered file
    /// from one that was never stamped.
    pub fn verify_file(&self, path: &Path) -> Result<bool> {
        let mut src = fs::File::open(path).map_err(|e| Error::io(path, e))?;
        let valid = self.verify_stream(&mut src, path)?;
        tracing::debug!(path = %path.display(), valid, "verified");
        Ok(valid)
    }

    fn verify_stream<R: Read>(&self, src: &mut R, path: &Path) -> Result<bool> {
        let mut buf = vec![0u8; self.config.buffer_size];
        let mut crc = crc32fast::Hasher::new();
        let mut sink = std::io::sink();

        let filled = stream::drain_to_window(src, &mut sink, &mut crc, &mut buf, self.window_size)
            .map_err(|e| Error::io(path, e))?;
        if filled == 0 {
            return Err(Error::EmptyFile);
        }

        let report = stream::inspect_window(&buf[..filled], &self.pattern);
        let stored = match report.scan {
            MarkerScan::Found { value, .. } => value,
            MarkerScan::Malformed => return Err(Error::MalformedMarker),
            MarkerScan::Absent => return Err(Error::MarkerNotFound),
        };

        crc.update(report.body);
        Ok(crc.finalize() == stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style;
    use std::io::Cursor;
    use std::path::PathBuf;

    fn verifier(style: crate::style::CommentStyle) -> Verifier {
        Verifier::new(Config {
            style,
            buffer_size: 4096,
        })
        .unwrap()
    }

    fn verify(v: &Verifier, input: &[u8]) -> Result<bool> {
        v.verify_stream(&mut Cursor::new(input), &PathBuf::from("test-input"))
    }

    fn crc_hex(data: &[u8]) -> String {
        let mut crc = crc32fast::Hasher::new();
        crc.update(data);
        format!("{:08X}", crc.finalize())
    }

    #[test]
    fn valid_marker_verifies() {
        let v = verifier(style::DOUBLE_SLASH);
        let input = format!("package main\n// FileIntegrity: {}\n", crc_hex(b"package main"));
        assert_eq!(verify(&v, input.as_bytes()).unwrap(), true);
    }

    #[test]
    fn stale_marker_is_invalid_not_error() {
        let v = verifier(style::DOUBLE_SLASH);
        let input = b"package main\n// FileIntegrity: 00000000\n";
        assert_eq!(verify(&v, input).unwrap(), false);
    }

    #[test]
    fn missing_marker_is_error() {
        let v = verifier(style::DOUBLE_SLASH);
        let err = verify(&v, b"plain content\n").unwrap_err();
        assert!(matches!(err, Error::MarkerNotFound));
    }

    #[test]
    fn malformed_marker_is_error() {
        let v = verifier(style::DOUBLE_SLASH);
        let err = verify(&v, b"x\n// FileIntegrity: deadbeef\n").unwrap_err();
        assert!(matches!(err, Error::MalformedMarker));

        let err = verify(&v, b"x\n// FileIntegrity: ABC\n").unwrap_err();
        assert!(matches!(err, Error::MalformedMarker));
    }

    #[test]
    fn empty_input_is_error() {
        let v = verifier(style::DOUBLE_SLASH);
        let err = verify(&v, b"").unwrap_err();
        assert!(matches!(err, Error::EmptyFile));
    }

    #[test]
    fn marker_only_file_verifies() {
        let v = verifier(style::DOUBLE_SLASH);
        assert_eq!(verify(&v, b"// FileIntegrity: 00000000\n").unwrap(), true);
    }

    #[test]
    fn declaration_marker_verifies() {
        let v = verifier(style::DECLARATION);
        let input = format!(
            "key = \"value\"\nFileIntegrity = \"{}\"\n",
            crc_hex(b"key = \"value\"")
        );
        assert_eq!(verify(&v, input.as_bytes()).unwrap(), true);
    }
}
