//! Record encoding and decoding for the textual parameter format.

use std::io::{BufRead, Write};

use loam_tensor::Dim;

use crate::error::IoError;

/// Header tag opening every parameter record.
pub(crate) const PARAMETER_TAG: &str = "#Parameter#";

/// A decoded parameter record.
#[derive(Debug)]
pub(crate) struct Record {
    pub name: String,
    pub dim: Dim,
    pub values: Vec<f32>,
}

/// Write one parameter record: header line, then the values line.
pub(crate) fn encode_record(
    w: &mut impl Write,
    name: &str,
    dim: &Dim,
    values: &[f32],
) -> Result<(), IoError> {
    write!(w, "{PARAMETER_TAG} {name} {}", dim.ndims())?;
    for d in dim.dims() {
        write!(w, " {d}")?;
    }
    writeln!(w, " {}", dim.total_elems())?;

    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            write!(w, " ")?;
        }
        // Round-trip precision: f32 -> decimal -> f32 is exact with Rust's
        // shortest-representation float formatting.
        write!(w, "{v}")?;
    }
    writeln!(w)?;
    Ok(())
}

/// Read the next record, or `None` at end of stream.
///
/// `line` is the running 1-based line counter, advanced for each line read.
pub(crate) fn decode_record(
    r: &mut impl BufRead,
    line: &mut u64,
) -> Result<Option<Record>, IoError> {
    let mut header = String::new();
    loop {
        header.clear();
        if r.read_line(&mut header)? == 0 {
            return Ok(None);
        }
        *line += 1;
        if !header.trim().is_empty() {
            break;
        }
    }
    let header_line = *line;

    let mut tokens = header.split_whitespace();
    match tokens.next() {
        Some(PARAMETER_TAG) => {}
        Some(other) => {
            return Err(IoError::MalformedRecord {
                line: header_line,
                detail: format!("expected '{PARAMETER_TAG}', got '{other}'"),
            });
        }
        None => unreachable!("blank lines are skipped above"),
    }

    let name = tokens
        .next()
        .ok_or_else(|| IoError::MalformedRecord {
            line: header_line,
            detail: "missing parameter name".into(),
        })?
        .to_string();

    let ndims: usize = parse_token(tokens.next(), header_line, "dimension count")?;
    let mut dims = Vec::with_capacity(ndims);
    for i in 0..ndims {
        dims.push(parse_token(
            tokens.next(),
            header_line,
            &format!("dimension {i}"),
        )?);
    }
    let dim = Dim::from(dims);

    let elem_count: usize = parse_token(tokens.next(), header_line, "element count")?;
    if elem_count != dim.total_elems() {
        return Err(IoError::MalformedRecord {
            line: header_line,
            detail: format!(
                "element count {elem_count} does not match shape {dim}"
            ),
        });
    }

    let mut values_line = String::new();
    if r.read_line(&mut values_line)? == 0 {
        return Err(IoError::MalformedRecord {
            line: header_line,
            detail: format!("record '{name}' is missing its values line"),
        });
    }
    *line += 1;

    let mut values = Vec::with_capacity(elem_count);
    for token in values_line.split_whitespace() {
        let v: f32 = token.parse().map_err(|_| IoError::MalformedRecord {
            line: *line,
            detail: format!("invalid value '{token}'"),
        })?;
        values.push(v);
    }
    if values.len() != elem_count {
        return Err(IoError::MalformedRecord {
            line: *line,
            detail: format!(
                "record '{name}' holds {} values, expected {elem_count}",
                values.len()
            ),
        });
    }

    Ok(Some(Record { name, dim, values }))
}

fn parse_token<T: std::str::FromStr>(
    token: Option<&str>,
    line: u64,
    what: &str,
) -> Result<T, IoError> {
    let token = token.ok_or_else(|| IoError::MalformedRecord {
        line,
        detail: format!("missing {what}"),
    })?;
    token.parse().map_err(|_| IoError::MalformedRecord {
        line,
        detail: format!("invalid {what} '{token}'"),
    })
}
