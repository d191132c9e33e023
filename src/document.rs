//! Loading settings documents from disk.

use crate::error::{Error, Result};
use crate::value::TreeValue;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Read a JSON settings file whose root is an object.
pub fn read_document(path: &Path) -> Result<TreeValue> {
    let bytes = std::fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "Read settings file");
    parse_bytes(&bytes, path)
}

/// Parse in-memory JSON text; `origin` only labels errors.
pub fn parse_document(text: &str, origin: &Path) -> Result<TreeValue> {
    parse_bytes(text.as_bytes(), origin)
}

fn parse_bytes(bytes: &[u8], origin: &Path) -> Result<TreeValue> {
    let value: Value = serde_json::from_slice(bytes).map_err(|source| Error::Parse {
        path: origin.to_path_buf(),
        source,
    })?;
    if !value.is_object() {
        return Err(Error::NotAnObject {
            path: origin.to_path_buf(),
            found: json_kind(&value),
        });
    }
    TreeValue::from_json(value)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use tempfile::TempDir;

    #[test]
    fn test_read_document() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("appsettings.json");
        std::fs::write(&path, r#"{"Logging": {"LogLevel": {"Default": "Information"}}}"#).unwrap();

        let tree = read_document(&path).unwrap();
        assert_eq!(tree.leaf_count(), 1);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        let err = read_document(&temp.path().join("missing.json")).unwrap_err();
        assert_eq!(err.code(), ErrorCode::FileUnreadable);
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = parse_document("{\"a\": ", Path::new("bad.json")).unwrap_err();
        assert_eq!(err.code(), ErrorCode::MalformedJson);
    }

    #[test]
    fn test_root_must_be_object() {
        let err = parse_document("[1, 2]", Path::new("list.json")).unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotAnObject);
        assert_eq!(err.to_string(), "list.json: root must be a JSON object, found array");

        let err = parse_document("\"text\"", Path::new("s.json")).unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotAnObject);
    }

    #[test]
    fn test_nested_array_is_unsupported() {
        let err = parse_document(r#"{"hosts": {"allowed": ["a", "b"]}}"#, Path::new("x.json"))
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::UnsupportedValue);
        assert!(err.to_string().contains("hosts:allowed"));
    }
}
