//! Sample output formatting.

use std::io::{self, Write};

use serde::Serialize;

use crate::config::OutputFormat;

#[derive(Serialize)]
struct SampleDocument<'a> {
    count: usize,
    values: &'a [f64],
}

/// Write `values` to `out` in the requested format.
pub fn write_values<W: Write>(out: &mut W, values: &[f64], format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Lines => {
            for v in values {
                writeln!(out, "{v}")?;
            }
        }
        OutputFormat::Json => {
            let doc = SampleDocument {
                count: values.len(),
                values,
            };
            serde_json::to_writer(&mut *out, &doc)?;
            writeln!(out)?;
        }
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_format() {
        let mut buf = Vec::new();
        write_values(&mut buf, &[0.4375, 0.5, 0.375], OutputFormat::Lines).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "0.4375\n0.5\n0.375\n");
    }

    #[test]
    fn json_format() {
        let mut buf = Vec::new();
        write_values(&mut buf, &[0.25, 1.0], OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed["count"], 2);
        assert_eq!(parsed["values"][0], 0.25);
        assert_eq!(parsed["values"][1], 1.0);
    }

    #[test]
    fn empty_output() {
        let mut buf = Vec::new();
        write_values(&mut buf, &[], OutputFormat::Lines).unwrap();
        assert!(buf.is_empty());

        let mut buf = Vec::new();
        write_values(&mut buf, &[], OutputFormat::Json).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "{\"count\":0,\"values\":[]}\n");
    }
}
