//! Loading and writing value lists
//!
//! A list file holds one bracketed, comma separated list such as
//! `[5, -3, 2.5, "apple"]`. Each element is read as an integer if it
//! parses as one, otherwise as a float, otherwise as a string with any
//! surrounding double quotes removed.

use crate::error::{SortContext, SortError, SortResult};
use crate::value::Value;
use itertools::Itertools;
use memmap2::Mmap;
use std::fs::{self, File};
use std::path::Path;

pub const INPUT_FILE: &str = "input.txt";
pub const EXPECTED_FILE: &str = "expected.txt";
pub const DESCRIPTION_FILE: &str = "description.txt";

/// Input and expected output of one on-disk case.
#[derive(Debug, Clone, PartialEq)]
pub struct SortCase {
    pub input: Vec<Value>,
    pub expected: Vec<Value>,
}

/// Classify one list element.
pub fn parse_token(token: &str) -> Value {
    let token = token.trim().trim_matches('"');
    if let Ok(int) = token.parse::<i64>() {
        Value::Int(int)
    } else if let Ok(float) = token.parse::<f64>() {
        Value::Float(float)
    } else {
        Value::Str(token.to_string())
    }
}

/// Parse a whole list. Blank or `[]` content yields an empty list.
pub fn parse_values(text: &str) -> Vec<Value> {
    let body = text.trim().trim_start_matches('[').trim_end_matches(']');
    if body.trim().is_empty() {
        return Vec::new();
    }
    body.split(',').map(parse_token).collect()
}

/// Render values in the list format read by [`parse_values`].
pub fn format_values(values: &[Value]) -> String {
    format!("[{}]", values.iter().join(", "))
}

/// Memory-map `path` and parse its list.
pub fn load_values(path: &Path) -> SortResult<Vec<Value>> {
    let name = path.display().to_string();
    let file = File::open(path).with_file_context(&name)?;
    let len = file.metadata().with_file_context(&name)?.len();

    // Zero-length files cannot be mapped on every platform.
    if len == 0 {
        return Ok(Vec::new());
    }

    let mmap = unsafe { Mmap::map(&file).with_file_context(&name)? };
    let text = std::str::from_utf8(&mmap)
        .map_err(|e| SortError::parse_error(&format!("{name}: {e}")))?;
    Ok(parse_values(text))
}

/// Write `values` to `path` followed by a newline.
pub fn save_values(path: &Path, values: &[Value]) -> SortResult<()> {
    let name = path.display().to_string();
    fs::write(path, format!("{}\n", format_values(values))).with_file_context(&name)
}

/// Load `input.txt` and `expected.txt` from a case directory.
pub fn load_case(dir: &Path) -> SortResult<SortCase> {
    let input = load_values(&dir.join(INPUT_FILE))?;
    let expected = load_values(&dir.join(EXPECTED_FILE))?;
    Ok(SortCase { input, expected })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_token_precedence() {
        assert_eq!(parse_token(" 42 "), Value::Int(42));
        assert_eq!(parse_token("-7"), Value::Int(-7));
        assert_eq!(parse_token("2.5"), Value::Float(2.5));
        assert_eq!(parse_token("2e-10"), Value::Float(2e-10));
        assert_eq!(parse_token("\"apple\""), Value::from("apple"));
        assert_eq!(parse_token("kiwi"), Value::from("kiwi"));
    }

    #[test]
    fn test_parse_values() {
        assert_eq!(
            parse_values("[3, \"a\", 2.5, 1]\n"),
            vec![Value::Int(3), Value::from("a"), Value::Float(2.5), Value::Int(1)]
        );
        assert!(parse_values("[]").is_empty());
        assert!(parse_values("  \n").is_empty());
        assert_eq!(parse_values("[1]"), vec![Value::Int(1)]);
    }

    #[test]
    fn test_format_reparses() {
        let values = vec![Value::Float(0.0), Value::Float(-0.0), Value::Float(2e10), Value::Int(5)];
        let text = format_values(&values);
        assert_eq!(text, "[0.0, -0.0, 20000000000.0, 5]");
        let back = parse_values(&text);
        assert_eq!(back[2], Value::Float(2e10));
        assert!(back[1].as_float().map_or(false, |f| f.is_sign_negative()));
    }

    #[test]
    fn test_load_case_from_disk() -> SortResult<()> {
        let dir = TempDir::new()?;
        fs::write(dir.path().join(INPUT_FILE), "[orange, apple, banana]\n")?;
        fs::write(dir.path().join(EXPECTED_FILE), "[apple, banana, orange]\n")?;

        let case = load_case(dir.path())?;
        assert_eq!(case.input.len(), 3);
        assert_eq!(case.expected[0], Value::from("apple"));
        Ok(())
    }

    #[test]
    fn test_empty_file_and_missing_file() -> SortResult<()> {
        let dir = TempDir::new()?;
        let empty = dir.path().join("empty.txt");
        fs::write(&empty, "")?;
        assert!(load_values(&empty)?.is_empty());

        match load_values(&dir.path().join("missing.txt")) {
            Err(SortError::FileNotFound { .. }) => {}
            other => panic!("unexpected result: {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_save_then_load() -> SortResult<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("out.txt");
        let values = vec![Value::Int(-1), Value::from("x"), Value::Float(1.5)];
        save_values(&path, &values)?;
        assert_eq!(load_values(&path)?, values);
        Ok(())
    }
}
