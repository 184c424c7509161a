//! # Export Path Encoding
//!
//! Resource paths become file system paths in an export package by form-encoding
//! every character that may not be allowed in a file name (`:` in particular) while
//! keeping `/` so the resource hierarchy survives as directories. [`decode`] reverses
//! [`encode`] exactly.
#[cfg(test)]
mod tests;

use percent_encoding::percent_decode_str;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::{form_urlencoded, Url};

/// Extension given to the file holding a binary resource's content.
pub const BINARY_EXTENSION: &str = ".binary";

/// Errors which occur while decoding an encoded path.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PathError {
    /// A `%` was not followed by two hexadecimal digits.
    #[error("Malformed percent escape at byte {position} of \"{input}\"")]
    MalformedEscape {
        /// The string being decoded.
        input: String,
        /// Byte offset of the offending `%`.
        position: usize,
    },
    /// The decoded bytes are not valid UTF-8.
    #[error("Decoded path \"{0}\" is not valid UTF-8")]
    InvalidUtf8(String),
}

/// Encode the path portion of a URI so it can be used as a relative file path.
pub fn encode(path: &str) -> String {
    form_urlencoded::byte_serialize(path.as_bytes())
        .collect::<String>()
        .replace("%2F", "/")
}

/// Decode a path produced by [`encode`].
pub fn decode(encoded: &str) -> Result<String, PathError> {
    percent_decode(&encoded.replace('+', " "))
}

fn percent_decode(input: &str) -> Result<String, PathError> {
    // percent_decode_str passes malformed escapes through untouched
    let bytes = input.as_bytes();
    if let Some(position) = bytes.iter().enumerate().position(|(i, &b)| {
        b == b'%'
            && !bytes
                .get(i + 1..i + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit))
    }) {
        return Err(PathError::MalformedEscape {
            input: input.to_owned(),
            position,
        });
    }

    percent_decode_str(input)
        .decode_utf8()
        .map(|s| s.into_owned())
        .map_err(|_| PathError::InvalidUtf8(input.to_owned()))
}

/// The encoded, root-relative form of a resource's path.
fn relative(uri: &Url) -> Result<String, PathError> {
    let path = percent_decode(uri.path())?;
    Ok(encode(path.trim_start_matches('/')))
}

/// The file where the content of the binary resource at `uri` is stored.
pub fn file_for_binary(uri: &Url, binary_root: &Path) -> Result<PathBuf, PathError> {
    Ok(binary_root.join(relative(uri)? + BINARY_EXTENSION))
}

/// The file where the description of the resource at `uri` is stored.
pub fn file_for_container(
    uri: &Url,
    metadata_root: &Path,
    extension: &str,
) -> Result<PathBuf, PathError> {
    Ok(metadata_root.join(relative(uri)? + extension))
}

/// The directory holding the descriptions of resources contained by `uri`.
pub fn directory_for_container(uri: &Url, metadata_root: &Path) -> Result<PathBuf, PathError> {
    Ok(metadata_root.join(relative(uri)?))
}
