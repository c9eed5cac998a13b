//! JSON I/O handling for CLI
//!
//! - Input: one JSON document from a file or stdin
//! - Output: one JSON envelope per command on stdout
//! - UTF-8 only

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use serde_json::{json, Value};

use super::errors::{CliError, CliResult};

/// Read the input document from `path`, or from stdin when `None`
pub fn read_input(path: Option<&Path>) -> CliResult<Value> {
    let content = match path {
        Some(path) => fs::read_to_string(path).map_err(|e| {
            CliError::io_error(format!("Failed to read {}: {}", path.display(), e))
        })?,
        None => {
            let mut buffer = String::new();
            io::stdin().lock().read_to_string(&mut buffer)?;
            buffer
        }
    };

    parse_input(&content)
}

/// Parse an input document. Blank input is an error, not `null`.
pub fn parse_input(content: &str) -> CliResult<Value> {
    if content.trim().is_empty() {
        return Err(CliError::invalid_input("Empty input"));
    }

    Ok(serde_json::from_str(content)?)
}

/// Write a success envelope
pub fn write_response<W: Write>(writer: &mut W, data: Value, pretty: bool) -> CliResult<()> {
    write_envelope(writer, &json!({ "status": "ok", "data": data }), pretty)
}

/// Write an error envelope
pub fn write_error<W: Write>(writer: &mut W, code: &str, message: &str) -> CliResult<()> {
    let response = json!({
        "status": "error",
        "code": code,
        "message": message
    });
    write_envelope(writer, &response, false)
}

fn write_envelope<W: Write>(writer: &mut W, envelope: &Value, pretty: bool) -> CliResult<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, envelope)?;
    } else {
        serde_json::to_writer(&mut *writer, envelope)?;
    }
    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input_rejects_blank() {
        let err = parse_input("  \n").unwrap_err();
        assert_eq!(err.code_str(), "CLI_INVALID_INPUT");
    }

    #[test]
    fn test_parse_input_accepts_null_document() {
        assert_eq!(parse_input("null").unwrap(), Value::Null);
    }

    #[test]
    fn test_write_response_envelope() {
        let mut out = Vec::new();
        write_response(&mut out, json!([1, 2]), false).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "{\"data\":[1,2],\"status\":\"ok\"}\n");
    }

    #[test]
    fn test_write_error_envelope() {
        let mut out = Vec::new();
        write_error(&mut out, "CLI_IO_ERROR", "boom").unwrap();

        let parsed: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed["status"], "error");
        assert_eq!(parsed["code"], "CLI_IO_ERROR");
    }

    #[test]
    fn test_read_input_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("input.json");
        fs::write(&path, "[1, \"USD\"]").unwrap();

        assert_eq!(read_input(Some(&path)).unwrap(), json!([1, "USD"]));
    }

    #[test]
    fn test_read_input_missing_file() {
        let err = read_input(Some(Path::new("/nonexistent/input.json"))).unwrap_err();
        assert_eq!(err.code_str(), "CLI_IO_ERROR");
    }
}
