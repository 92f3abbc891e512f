//! Loading of the game's Docs JSON dump
//!
//! The community resources ship `en-US.json` as UTF-16 text holding a
//! top-level array of sections. Each section names the native class its
//! records share and lists the records themselves as flat field tables.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum DocsError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("input is {0} bytes long, which is not whole UTF-16 code units")]
    OddLength(usize),
    #[error("input is not valid UTF-16: {0}")]
    Utf16(#[from] std::char::DecodeUtf16Error),
    #[error("input is not a list of sections: {0}")]
    Json(#[from] serde_json::Error),
}

/// A group of records sharing one native class.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSection {
    #[serde(rename = "NativeClass")]
    pub native_class: String,
    #[serde(rename = "Classes", default)]
    pub records: Vec<RawRecord>,
}

/// One class-record. Every value of interest is a string in the dump, so
/// non-string values are kept but never read.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(HashMap<String, serde_json::Value>);

impl RawRecord {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(|v| v.as_str())
    }

    /// Field value, or `default` when absent.
    pub fn get_or<'a>(&'a self, field: &str, default: &'a str) -> &'a str {
        self.get(field).unwrap_or(default)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        RawRecord(
            iter.into_iter()
                .map(|(k, v)| (k.into(), serde_json::Value::String(v.into())))
                .collect(),
        )
    }
}

/// Decode UTF-16 bytes, honouring a byte-order mark and assuming little
/// endian without one.
pub fn decode_utf16(bytes: &[u8]) -> Result<String, DocsError> {
    if bytes.len() % 2 != 0 {
        return Err(DocsError::OddLength(bytes.len()));
    }

    let (big_endian, body) = match bytes {
        [0xFE, 0xFF, rest @ ..] => (true, rest),
        [0xFF, 0xFE, rest @ ..] => (false, rest),
        _ => (false, bytes),
    };

    let units = body.chunks_exact(2).map(|pair| {
        let pair = [pair[0], pair[1]];
        if big_endian {
            u16::from_be_bytes(pair)
        } else {
            u16::from_le_bytes(pair)
        }
    });

    let text = char::decode_utf16(units).collect::<Result<String, _>>()?;
    Ok(text)
}

pub fn parse_sections(text: &str) -> Result<Vec<RawSection>, DocsError> {
    Ok(serde_json::from_str(text)?)
}

pub fn parse_sections_bytes(bytes: &[u8]) -> Result<Vec<RawSection>, DocsError> {
    parse_sections(&decode_utf16(bytes)?)
}

/// Read and parse a Docs dump from disk.
pub fn load_sections(path: &Path) -> Result<Vec<RawSection>, DocsError> {
    let bytes = fs::read(path).map_err(|source| DocsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_sections_bytes(&bytes)
}
