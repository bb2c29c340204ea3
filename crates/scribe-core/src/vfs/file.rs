use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use crate::vfs::error::VfsError;

/// Character encodings understood by [`VirtualFile::read_text`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Utf16Le,
    Utf16Be,
    /// ISO-8859-1, every byte maps to the code point of the same value
    Latin1,
}

impl TextEncoding {
    /// Parse an encoding label such as "utf-8" or "ISO-8859-1"
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().replace('_', "-").as_str() {
            "utf-8" | "utf8" => Some(TextEncoding::Utf8),
            "utf-16le" | "utf16le" => Some(TextEncoding::Utf16Le),
            "utf-16be" | "utf16be" => Some(TextEncoding::Utf16Be),
            "iso-8859-1" | "latin1" | "latin-1" => Some(TextEncoding::Latin1),
            _ => None,
        }
    }

    /// Decode raw bytes. Returns `None` when the bytes are not valid in this encoding.
    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        match self {
            TextEncoding::Utf8 => {
                // A UTF-8 BOM is not part of the text
                let bytes = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);
                String::from_utf8(bytes.to_vec()).ok()
            }
            TextEncoding::Utf16Le | TextEncoding::Utf16Be => {
                if bytes.len() % 2 != 0 {
                    return None;
                }
                let units: Vec<u16> = bytes
                    .chunks_exact(2)
                    .map(|pair| match self {
                        TextEncoding::Utf16Le => u16::from_le_bytes([pair[0], pair[1]]),
                        _ => u16::from_be_bytes([pair[0], pair[1]]),
                    })
                    .collect();
                let units = units.strip_prefix(&[0xFEFF]).unwrap_or(&units);
                String::from_utf16(units).ok()
            }
            TextEncoding::Latin1 => Some(bytes.iter().map(|&b| b as char).collect()),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextEncoding::Utf8 => write!(f, "UTF-8"),
            TextEncoding::Utf16Le => write!(f, "UTF-16LE"),
            TextEncoding::Utf16Be => write!(f, "UTF-16BE"),
            TextEncoding::Latin1 => write!(f, "ISO-8859-1"),
        }
    }
}

/// Uniform read-only handle over a file-like resource.
///
/// Implementations must not cache metadata: every call re-queries the
/// backing resource. Extensions should only rely on [`VirtualFile::local_path`]
/// being present for the local scheme.
pub trait VirtualFile: Send + Sync + fmt::Debug {
    /// File name including the extension
    fn name(&self) -> String;

    /// Scheme-independent path string identifying the resource
    fn path(&self) -> String;

    /// Local filesystem path, `None` for non-local schemes
    fn local_path(&self) -> Option<&Path>;

    /// Extension without the leading dot
    fn extension(&self) -> Option<String>;

    fn is_directory(&self) -> bool;

    /// Length in bytes, 0 when the resource is missing
    fn length(&self) -> u64;

    fn last_modified(&self) -> Option<SystemTime>;

    /// Open a byte stream over the content
    fn input_stream(&self) -> Result<Box<dyn Read + Send>, VfsError>;

    /// Read the full content as text in the given encoding
    fn read_text(&self, encoding: TextEncoding) -> Result<String, VfsError> {
        let mut bytes = Vec::new();
        self.input_stream()?
            .read_to_end(&mut bytes)
            .map_err(|e| VfsError::io(e, "read_text", PathBuf::from(self.path())))?;
        encoding.decode(&bytes).ok_or_else(|| VfsError::Decode {
            path: PathBuf::from(self.path()),
            encoding,
        })
    }

    fn parent(&self) -> Option<Arc<dyn VirtualFile>>;

    /// Children of a directory; empty for regular files
    fn children(&self) -> Result<Vec<Arc<dyn VirtualFile>>, VfsError>;
}
