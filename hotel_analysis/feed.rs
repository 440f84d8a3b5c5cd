use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Number, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to read hotel feed {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse hotel feed {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("hotel feed {path:?} is not a JSON array")]
    NotAnArray { path: PathBuf },
}

/// Read the whole feed into memory and return its top-level records.
/// Individual records are not validated here.
pub fn load(path: &Path) -> Result<Vec<Value>, FeedError> {
    let raw = fs::read_to_string(path).map_err(|source| FeedError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let doc: Value = serde_json::from_str(&raw).map_err(|source| FeedError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    match doc {
        Value::Array(records) => Ok(records),
        _ => Err(FeedError::NotAnArray {
            path: path.to_path_buf(),
        }),
    }
}

/// Typed, total view over one semi-structured hotel object.
/// Every accessor returns `None` when the field is absent or has the wrong shape.
#[derive(Debug, Clone, Copy)]
pub struct HotelRecord<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> HotelRecord<'a> {
    pub fn from_value(value: &'a Value) -> Option<Self> {
        value.as_object().map(|fields| HotelRecord { fields })
    }

    pub fn name(&self) -> Option<&'a str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    /// Top-level price; strings and booleans do not count as numeric.
    pub fn price(&self) -> Option<&'a Number> {
        match self.fields.get("price") {
            Some(Value::Number(n)) => Some(n),
            _ => None,
        }
    }

    pub fn options(&self) -> Option<&'a [Value]> {
        self.fields
            .get("options")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
    }

    pub fn rooms(&self) -> Option<&'a [Value]> {
        self.fields
            .get("rooms")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
    }

    pub fn rooms_left(&self) -> Option<&'a Value> {
        self.fields.get("roomsLeft")
    }

    /// Raw `address.full` value, whatever its type.
    pub fn address_full(&self) -> Option<&'a Value> {
        self.fields
            .get("address")
            .and_then(Value::as_object)
            .and_then(|address| address.get("full"))
    }
}

/// Lenient integer parse for room counts.
///
/// Accepts integers, finite floats (truncated toward zero), booleans and
/// strings holding an optionally signed integer with surrounding whitespace.
pub fn parse_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}
