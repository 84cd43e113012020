//! Hex image loader.
//!
//! Program and data images are plain text: one 32-bit word per line in ASCII
//! hexadecimal, most significant digit first, with an optional `0x` prefix.
//! Blank lines and lines starting with `#` are ignored. Line *k* of an
//! instruction image lands at word address *k*; data images load from data
//! word 0.
//!
//! Any malformed line aborts initialization with an error naming the file
//! and line number; the simulator never starts on a bad image.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// Initialization failures while reading an image file.
#[derive(Debug)]
pub enum ImageError {
    /// The file could not be opened or read.
    Io {
        /// Path of the offending file.
        path: String,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// A line was not a valid hexadecimal word.
    Parse {
        /// Path of the offending file.
        path: String,
        /// One-based line number.
        line: usize,
        /// The offending text.
        text: String,
    },
    /// The image holds more words than the target memory.
    TooLarge {
        /// Path of the offending file.
        path: String,
        /// Words present in the image.
        words: usize,
        /// Words the memory can hold.
        capacity: usize,
    },
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::Io { path, source } => {
                write!(f, "cannot read image '{}': {}", path, source)
            }
            ImageError::Parse { path, line, text } => {
                write!(f, "{}:{}: not a hexadecimal word: '{}'", path, line, text)
            }
            ImageError::TooLarge {
                path,
                words,
                capacity,
            } => {
                write!(
                    f,
                    "image '{}' holds {} words but the memory holds {}",
                    path, words, capacity
                )
            }
        }
    }
}

impl std::error::Error for ImageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImageError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Reads a hex image file into a word vector.
///
/// # Examples
///
/// An image with comments, blank lines, and mixed prefixes:
///
/// ```text
/// # sum loop
/// 0x00000093
/// 00108133
///
/// 0000006f
/// ```
pub fn load_hex_image(path: &Path) -> Result<Vec<u32>, ImageError> {
    let text = fs::read_to_string(path).map_err(|source| ImageError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_hex_image(&text, path)
}

/// Parses image text; split out so tests can feed strings directly.
fn parse_hex_image(text: &str, path: &Path) -> Result<Vec<u32>, ImageError> {
    let mut words = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let digits = line
            .strip_prefix("0x")
            .or_else(|| line.strip_prefix("0X"))
            .unwrap_or(line);
        let word = u32::from_str_radix(digits, 16).map_err(|_| ImageError::Parse {
            path: path.display().to_string(),
            line: idx + 1,
            text: raw.to_string(),
        })?;
        words.push(word);
    }
    Ok(words)
}

/// Rejects images that do not fit the target memory.
pub fn check_capacity(
    words: &[u32],
    capacity: usize,
    path: &Path,
) -> Result<(), ImageError> {
    if words.len() > capacity {
        return Err(ImageError::TooLarge {
            path: path.display().to_string(),
            words: words.len(),
            capacity,
        });
    }
    Ok(())
}
