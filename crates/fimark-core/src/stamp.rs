//! Stamping: add or refresh the trailing integrity marker of a file.

use std::fs;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::marker::{LineEnding, MarkerPattern, MarkerScan};
use crate::stream;

/// Result of processing one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A marker was added or updated; the file was atomically replaced.
    Stamped,
    /// The existing marker already matched; the file was left untouched.
    Unchanged,
}

/// Adds or updates integrity markers with a single streaming pass per file.
#[derive(Debug)]
pub struct Stamper {
    config: Config,
    pattern: MarkerPattern,
    window_size: usize,
}

impl Stamper {
    pub fn new(config: Config) -> Result<Self> {
        let pattern = MarkerPattern::new(config.style);
        // Room for a line ending that may precede the marker and is excluded
        // from the content checksum.
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

    /// Add or update the integrity marker in `path`.
    ///
    /// The file is streamed through a fixed-size buffer into a temp file in
    /// the same directory. When the existing marker already matches, the
    /// temp file is discarded and the original is left untouched, mtime
    /// included. Otherwise the original permission bits (and ownership,
    /// best-effort) are applied to the temp file before it is renamed over
    /// the target. Every error path removes the temp file.
    pub fn process_file(&self, path: &Path) -> Result<Outcome> {
        let meta = fs::metadata(path).map_err(|e| Error::io(path, e))?;
        let mut src = fs::File::open(path).map_err(|e| Error::io(path, e))?;

        let dir = match path.parent() {
            Some(d) if !d.as_os_str().is_empty() => d,
            _ => Path::new("."),
        };
        let temp = tempfile::Builder::new()
            .prefix(".fimark-")
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(|e| Error::io(dir, e))?;

        let changed = {
            let mut out = BufWriter::new(temp.as_file());
            let changed = self
                .process_stream(&mut src, &mut out)
                .map_err(|e| Error::io(path, e))?;
            out.flush().map_err(|e| Error::io(path, e))?;
            changed
        };

        if !changed {
            tracing::debug!(path = %path.display(), "marker already current, leaving file untouched");
            return Ok(Outcome::Unchanged);
        }

        temp.as_file().sync_all().map_err(|e| Error::io(path, e))?;
        temp.as_file()
            .set_permissions(meta.permissions())
            .map_err(|e| Error::io(path, e))?;
        preserve_ownership(temp.as_file(), &meta);

        temp.persist(path).map_err(|e| Error::io(path, e.error))?;
        tracing::debug!(path = %path.display(), "stamped");
        Ok(Outcome::Stamped)
    }

    /// Single streaming pass from `src` to `out`. Returns false when the
    /// existing marker already matches the computed checksum.
    fn process_stream<R: Read, W: Write>(&self, src: &mut R, out: &mut W) -> std::io::Result<bool> {
        let mut buf = vec![0u8; self.config.buffer_size];
        let mut crc = crc32fast::Hasher::new();

        let filled = stream::drain_to_window(src, out, &mut crc, &mut buf, self.window_size)?;
        if filled == 0 {
            // Empty file: stamp with the checksum of zero-length content.
            out.write_all(&self.pattern.render(crc.finalize(), LineEnding::Lf))?;
            return Ok(true);
        }

        let window = &buf[..filled];
        let report = stream::inspect_window(window, &self.pattern);
        crc.update(report.body);
        let calculated = crc.finalize();

        if let MarkerScan::Found { value, .. } = report.scan {
            if value == calculated {
                out.write_all(window)?;
                return Ok(false);
            }
        }

        out.write_all(report.content)?;
        if report.needs_newline {
            out.write_all(report.line_ending.as_bytes())?;
        }
        out.write_all(&self.pattern.render(calculated, report.line_ending))?;
        Ok(true)
    }
}

#[cfg(unix)]
fn preserve_ownership(file: &fs::File, meta: &fs::Metadata) {
    use std::os::unix::fs::MetadataExt;
    use std::os::unix::io::AsRawFd;

    // May legitimately fail without privilege; permissions alone are still
    // preserved in that case.
    let rc = unsafe { libc::fchown(file.as_raw_fd(), meta.uid(), meta.gid()) };
    if rc != 0 {
        tracing::debug!(uid = meta.uid(), gid = meta.gid(), "fchown failed, keeping current ownership");
    }
}

#[cfg(not(unix))]
fn preserve_ownership(_file: &fs::File, _meta: &fs::Metadata) {}
