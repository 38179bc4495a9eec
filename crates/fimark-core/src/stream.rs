//! Single-buffer sliding-window streaming over file content.
//!
//! The trailing marker must be excluded from the checksum, but its byte
//! length is unknown until it is matched. The last `window` bytes of input
//! are therefore held back in the tail of the one reusable buffer until end
//! of stream; everything ahead of them is folded into the checksum (and the
//! output, when stamping) exactly once, in input order.

use std::io::{Read, Write};

use crate::marker::{LineEnding, MarkerPattern, MarkerScan};

/// Stream `src` through `buf`, folding every byte that falls out of the
/// trailing `window` into `crc` and `out`. Returns the number of bytes
/// retained at the front of `buf` when the stream ends; `0` means the input
/// was empty. The retained bytes necessarily contain the whole marker, if
/// one exists, because `window` exceeds the largest possible marker line.
pub(crate) fn drain_to_window<R: Read, W: Write>(
    src: &mut R,
    out: &mut W,
    crc: &mut crc32fast::Hasher,
    buf: &mut [u8],
    window: usize,
) -> std::io::Result<usize> {
    debug_assert!(buf.len() > window);

    let mut filled = src.read(buf)?;
    if filled == 0 {
        return Ok(0);
    }

    loop {
        if filled > window {
            let surplus = filled - window;
            out.write_all(&buf[..surplus])?;
            crc.update(&buf[..surplus]);
            buf.copy_within(surplus..filled, 0);
            filled = window;
        }
        let n = src.read(&mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }

    Ok(filled)
}

/// What the final window contains once the marker matcher has run.
pub(crate) struct WindowReport<'a> {
    /// Bytes before the marker, or the whole window when none was found.
    pub content: &'a [u8],
    /// `content` minus exactly one trailing line ending; what the checksum
    /// covers.
    pub body: &'a [u8],
    pub scan: MarkerScan,
    /// True when non-empty `content` does not end with a line ending.
    pub needs_newline: bool,
    /// Line-ending convention to use for any inserted text.
    pub line_ending: LineEnding,
}

pub(crate) fn inspect_window<'a>(window: &'a [u8], pattern: &MarkerPattern) -> WindowReport<'a> {
    let scan = pattern.scan(window);
    let content = match scan {
        MarkerScan::Found { start, .. } => &window[..start],
        _ => window,
    };
    let (body, needs_newline) = strip_line_ending(content);
    WindowReport {
        content,
        body,
        scan,
        needs_newline,
        line_ending: detect_line_ending(window),
    }
}

/// Remove one trailing line ending; CRLF counts as a single ending. The
/// bool is true when non-empty content had no ending to remove.
fn strip_line_ending(content: &[u8]) -> (&[u8], bool) {
    match content {
        [] => (content, false),
        [.., b'\r', b'\n'] => (&content[..content.len() - 2], false),
        [.., b'\n'] => (&content[..content.len() - 1], false),
        _ => (content, true),
    }
}

/// Line-ending convention in use, judged from the first newline in the
/// window. Defaults to LF when the window has no newline at all.
fn detect_line_ending(window: &[u8]) -> LineEnding {
    match window.iter().position(|&b| b == b'\n') {
        Some(i) if i > 0 && window[i - 1] == b'\r' => LineEnding::CrLf,
        Some(_) => LineEnding::Lf,
        None => LineEnding::Lf,
    }
}
