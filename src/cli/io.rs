//! JSON output for the CLI
//!
//! - Rows: one JSON object per line
//! - Everything else: a single pretty-printed JSON document
//! - UTF-8 only

use std::io::Write;

use serde::Serialize;

use crate::storage::Row;

use super::errors::CliResult;

/// Write rows as JSON lines
pub fn write_rows<W: Write>(out: &mut W, rows: &[Row]) -> CliResult<()> {
    for row in rows {
        serde_json::to_writer(&mut *out, row)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

/// Write one JSON document
pub fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> CliResult<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_rows_as_json_lines() {
        let rows = vec![
            Row::new().with("name", "Pi").with("year", 1998),
            Row::new().with("name", "UHF"),
        ];
        let mut out = Vec::new();
        write_rows(&mut out, &rows).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "{\"name\":\"Pi\",\"year\":1998}\n{\"name\":\"UHF\"}\n");
    }
}
