use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::error::ColoringError;
use crate::types::{Color, ColoredEdge, EdgeId, EdgeRecord, VertexId};

/// Layout of an input edge list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeListFormat {
    /// Optional count line, then `x y m` per line; ids assigned from 1.
    #[default]
    Text,
    /// Header `id,x,y[,m]`.
    Csv,
}

/// Layout of a written coloring.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColoringFormat {
    /// `Edge {id}: ({x}, {y}), Color: {color}` per line.
    #[default]
    Text,
    /// Header `id,x,y,m,color`.
    Csv,
    /// Pretty-printed JSON array.
    Json,
}

/// Error type for reading edge lists and reading/writing colorings.
#[derive(Error, Debug)]
pub enum CliError {
    /// Generic error message.
    #[error("{0}")]
    Message(String),
    /// A line or record that could not be understood.
    #[error("line {line}: {message}")]
    Parse {
        /// 1-based line (or CSV record) number.
        line: u64,
        /// What was wrong.
        message: String,
    },
    /// IO error from file operations.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// CSV parsing or writing error.
    #[error(transparent)]
    Csv(#[from] csv::Error),
    /// JSON encoding error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// Graph construction or coloring error.
    #[error(transparent)]
    Coloring(#[from] ColoringError),
}

impl From<&str> for CliError {
    fn from(value: &str) -> Self {
        CliError::Message(value.to_string())
    }
}

impl From<String> for CliError {
    fn from(value: String) -> Self {
        CliError::Message(value)
    }
}

/// Reads an edge list from `path`.
pub fn read_edge_list(path: &Path, format: EdgeListFormat) -> Result<Vec<EdgeRecord>, CliError> {
    match format {
        EdgeListFormat::Text => {
            let file = File::open(path)?;
            parse_edge_list_text(BufReader::new(file))
        }
        EdgeListFormat::Csv => read_edge_list_csv(path),
    }
}

/// Parses the plain edge-list layout.
///
/// A first line holding a single integer is taken as the declared edge
/// count. Every other non-blank line must be `x y m`; lines with a different
/// number of fields are skipped with a warning.
pub fn parse_edge_list_text<R: BufRead>(reader: R) -> Result<Vec<EdgeRecord>, CliError> {
    let mut records = Vec::new();
    let mut declared: Option<u64> = None;
    let mut next_id = 1i64;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = index as u64 + 1;
        let fields: Vec<&str> = line.split_whitespace().collect();
        match fields.as_slice() {
            [] => continue,
            [count] if index == 0 => {
                declared = Some(parse_field(count, line_no, "edge count")?);
            }
            [x, y, m] => {
                records.push(EdgeRecord {
                    ident: EdgeId(next_id),
                    x: VertexId(parse_field(x, line_no, "x")?),
                    y: VertexId(parse_field(y, line_no, "y")?),
                    m: parse_field(m, line_no, "m")?,
                });
                next_id += 1;
            }
            other => {
                warn!(line = line_no, fields = other.len(), "skipping edge-list line");
            }
        }
    }

    if let Some(count) = declared {
        if count != records.len() as u64 {
            warn!(
                declared = count,
                parsed = records.len(),
                "edge count header disagrees with the edge lines"
            );
        }
    }
    debug!(edges = records.len(), "parsed text edge list");
    Ok(records)
}

/// Reads an edge list with an `id,x,y[,m]` header.
pub fn read_edge_list_csv(path: &Path) -> Result<Vec<EdgeRecord>, CliError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;
    let headers = reader.headers()?.clone();
    let id_index = find_column(&headers, "id")?;
    let x_index = find_column(&headers, "x")?;
    let y_index = find_column(&headers, "y")?;
    let m_index = headers.iter().position(|h| h.eq_ignore_ascii_case("m"));

    let mut records = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result?;
        let line_no = index as u64 + 2;
        let m = match m_index.and_then(|i| record.get(i)).filter(|s| !s.is_empty()) {
            Some(raw) => parse_field(raw, line_no, "m")?,
            None => 1,
        };
        records.push(EdgeRecord {
            ident: EdgeId(parse_field(column(&record, id_index, line_no, "id")?, line_no, "id")?),
            x: VertexId(parse_field(column(&record, x_index, line_no, "x")?, line_no, "x")?),
            y: VertexId(parse_field(column(&record, y_index, line_no, "y")?, line_no, "y")?),
            m,
        });
    }
    debug!(edges = records.len(), "parsed csv edge list");
    Ok(records)
}

/// Writes `edges` to `path`, or to stdout when `path` is `None`.
pub fn write_coloring(
    path: Option<&Path>,
    format: ColoringFormat,
    edges: &[ColoredEdge],
) -> Result<(), CliError> {
    match path {
        Some(path) => {
            let mut out = BufWriter::new(File::create(path)?);
            write_coloring_to(&mut out, format, edges)?;
            out.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            write_coloring_to(&mut out, format, edges)?;
            out.flush()?;
        }
    }
    Ok(())
}

/// Writes `edges` in `format` to any writer.
pub fn write_coloring_to<W: Write>(
    out: &mut W,
    format: ColoringFormat,
    edges: &[ColoredEdge],
) -> Result<(), CliError> {
    match format {
        ColoringFormat::Text => {
            for edge in edges {
                writeln!(
                    out,
                    "Edge {}: ({}, {}), Color: {}",
                    edge.ident, edge.x, edge.y, edge.color
                )?;
            }
        }
        ColoringFormat::Csv => {
            let mut writer = WriterBuilder::new().from_writer(out);
            writer.write_record(["id", "x", "y", "m", "color"])?;
            for edge in edges {
                writer.write_record([
                    edge.ident.to_string(),
                    edge.x.to_string(),
                    edge.y.to_string(),
                    edge.m.to_string(),
                    edge.color.to_string(),
                ])?;
            }
            writer.flush()?;
        }
        ColoringFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, edges)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Reads a coloring written by [`write_coloring`].
pub fn read_coloring(path: &Path, format: ColoringFormat) -> Result<Vec<ColoredEdge>, CliError> {
    match format {
        ColoringFormat::Text => parse_coloring_text(BufReader::new(File::open(path)?)),
        ColoringFormat::Csv => read_coloring_csv(path),
        ColoringFormat::Json => Ok(serde_json::from_reader(BufReader::new(File::open(path)?))?),
    }
}

/// Parses `Edge {id}: ({x}, {y}), Color: {color}` lines; other lines are ignored.
///
/// The text layout does not carry multiplicity, so parsed edges report `m = 1`.
pub fn parse_coloring_text<R: BufRead>(reader: R) -> Result<Vec<ColoredEdge>, CliError> {
    let mut edges = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = index as u64 + 1;
        let Some(rest) = line.trim().strip_prefix("Edge ") else {
            continue;
        };
        edges.push(parse_coloring_line(rest, line_no)?);
    }
    Ok(edges)
}

fn parse_coloring_line(rest: &str, line_no: u64) -> Result<ColoredEdge, CliError> {
    let malformed = || CliError::Parse {
        line: line_no,
        message: "expected `Edge <id>: (<x>, <y>), Color: <color>`".into(),
    };
    let (id, rest) = rest.split_once(':').ok_or_else(malformed)?;
    let (pair, color) = rest.split_once("Color:").ok_or_else(malformed)?;
    let pair = pair
        .trim()
        .trim_end_matches(',')
        .trim()
        .strip_prefix('(')
        .and_then(|p| p.strip_suffix(')'))
        .ok_or_else(malformed)?;
    let (x, y) = pair.split_once(',').ok_or_else(malformed)?;
    Ok(ColoredEdge {
        ident: EdgeId(parse_field(id.trim(), line_no, "id")?),
        x: VertexId(parse_field(x.trim(), line_no, "x")?),
        y: VertexId(parse_field(y.trim(), line_no, "y")?),
        m: 1,
        color: Color(parse_field(color.trim(), line_no, "color")?),
    })
}

fn read_coloring_csv(path: &Path) -> Result<Vec<ColoredEdge>, CliError> {
    let mut reader = ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
    let mut edges = Vec::new();
    for result in reader.deserialize() {
        let edge: ColoredEdge = result.map_err(|err| match err.position() {
            Some(pos) => CliError::Parse {
                line: pos.line(),
                message: err.to_string(),
            },
            None => CliError::Csv(err),
        })?;
        edges.push(edge);
    }
    Ok(edges)
}

fn find_column(headers: &StringRecord, name: &str) -> Result<usize, CliError> {
    headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(name))
        .ok_or_else(|| CliError::Message(format!("column '{name}' not found in CSV header")))
}

fn column<'r>(
    record: &'r StringRecord,
    index: usize,
    line: u64,
    name: &str,
) -> Result<&'r str, CliError> {
    record
        .get(index)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| CliError::Parse {
            line,
            message: format!("missing value for column '{name}'"),
        })
}

fn parse_field<T: std::str::FromStr>(raw: &str, line: u64, name: &str) -> Result<T, CliError> {
    raw.parse().map_err(|_| CliError::Parse {
        line,
        message: format!("invalid {name} '{raw}'"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_edge_list_assigns_ids_and_skips_bad_lines() {
        let input = "3\n1 2 1\n\n2 3\n2 3 4\n1 3 1 9\n";
        let records = parse_edge_list_text(input.as_bytes()).unwrap();
        assert_eq!(
            records,
            vec![EdgeRecord::new(1, 1, 2, 1), EdgeRecord::new(2, 2, 3, 4)]
        );
    }

    #[test]
    fn text_edge_list_without_count_header() {
        let records = parse_edge_list_text("5 6 1\n6 7 2\n".as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].ident, EdgeId(2));
        assert_eq!(records[1].m, 2);
    }

    #[test]
    fn text_edge_list_accepts_negative_integers() {
        let records = parse_edge_list_text("2\n-1 2 1\n2 -3 -4\n".as_bytes()).unwrap();
        assert_eq!(
            records,
            vec![EdgeRecord::new(1, -1, 2, 1), EdgeRecord::new(2, 2, -3, -4)]
        );
        let mut graph = crate::graph::Multigraph::from_records(records).unwrap();
        let report = graph.edge_coloring().unwrap();
        assert_eq!(report.colors_used, 2);
        assert_eq!(graph.colored_edges()[1].y, VertexId(-3));
    }

    #[test]
    fn text_edge_list_rejects_non_numeric_fields() {
        let err = parse_edge_list_text("1 two 1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, CliError::Parse { line: 1, .. }));
    }

    #[test]
    fn coloring_text_matches_the_writer_layout() {
        let edges = vec![ColoredEdge {
            ident: EdgeId(7),
            x: VertexId(3),
            y: VertexId(9),
            m: 1,
            color: Color(2),
        }];
        let mut out = Vec::new();
        write_coloring_to(&mut out, ColoringFormat::Text, &edges).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "Edge 7: (3, 9), Color: 2\n");
        assert_eq!(parse_coloring_text(text.as_bytes()).unwrap(), edges);
    }

    #[test]
    fn coloring_text_reports_malformed_lines() {
        let err = parse_coloring_text("header\nEdge 1 (1, 2) Color 3\n".as_bytes()).unwrap_err();
        assert!(matches!(err, CliError::Parse { line: 2, .. }));
    }

    #[test]
    fn csv_edge_list_defaults_multiplicity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edges.csv");
        std::fs::write(&path, "id,x,y\n10,1,2\n11, 2 ,3\n").unwrap();
        let records = read_edge_list(&path, EdgeListFormat::Csv).unwrap();
        assert_eq!(
            records,
            vec![EdgeRecord::new(10, 1, 2, 1), EdgeRecord::new(11, 2, 3, 1)]
        );
    }
}
