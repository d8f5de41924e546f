//! Reading item lists and writing matrices for external heatmap tools.

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::{PairwiseError, Result};
use crate::measure::{Atom, Measurable, PairwiseMatrix};
use crate::Float;

/// Parses a JSON array of items, each an array of numbers, strings or booleans.
pub fn read_items<R: Read>(reader: R) -> Result<Vec<Vec<Atom>>> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn load_items<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<Atom>>> {
    let file = File::open(path)?;
    read_items(BufReader::new(file))
}

fn resolve_labels(labels: Option<&[String]>, n_elements: usize) -> Result<Vec<String>> {
    match labels {
        Some(labels) if labels.len() != n_elements => Err(PairwiseError::DimensionMismatch {
            expected: n_elements,
            actual: labels.len(),
        }),
        Some(labels) => Ok(labels.to_vec()),
        None => Ok((0..n_elements).map(|i| i.to_string()).collect()),
    }
}

/// Finite value of a cell, `None` for NaN and infinities.
fn finite_cell<T: Float>(value: T) -> Option<f64> {
    value.to_f64().filter(|x| x.is_finite())
}

fn format_cell<T: Float>(value: T, precision: Option<usize>) -> String {
    match (finite_cell(value), precision) {
        (Some(v), Some(p)) => format!("{:.*}", p, v),
        (Some(v), None) => v.to_string(),
        (None, _) => String::new(),
    }
}

/// Writes the matrix as CSV: a header of labels, then one labelled row per item.
///
/// Items are labelled by index when no labels are given. Non-finite cells are
/// left empty, the CSV counterpart of `null` in [`write_json`].
pub fn write_csv<T, W>(
    matrix: &PairwiseMatrix<T>,
    labels: Option<&[String]>,
    precision: Option<usize>,
    writer: W,
) -> Result<()>
where
    T: Float,
    W: Write,
{
    let labels = resolve_labels(labels, matrix.num_elements())?;
    let mut out = csv::Writer::from_writer(writer);

    let mut header = Vec::with_capacity(labels.len() + 1);
    header.push(String::new());
    header.extend(labels.iter().cloned());
    out.write_record(&header)?;

    for (label, row) in labels.iter().zip(matrix.rows()) {
        let mut record = Vec::with_capacity(row.len() + 1);
        record.push(label.clone());
        record.extend(row.iter().map(|&v| format_cell(v, precision)));
        out.write_record(&record)?;
    }

    out.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct MatrixReport<'a> {
    labels: &'a [String],
    matrix: Vec<Vec<Option<f64>>>,
}

/// Writes `{"labels": [...], "matrix": [[...]]}`.
///
/// Non-finite cells become `null`, matching the empty cells of [`write_csv`].
pub fn write_json<T, W>(
    matrix: &PairwiseMatrix<T>,
    labels: Option<&[String]>,
    mut writer: W,
) -> Result<()>
where
    T: Float,
    W: Write,
{
    let labels = resolve_labels(labels, matrix.num_elements())?;
    let rows: Vec<Vec<Option<f64>>> = matrix
        .rows()
        .map(|row| row.iter().map(|&v| finite_cell(v)).collect())
        .collect();

    let report = MatrixReport {
        labels: &labels,
        matrix: rows,
    };

    serde_json::to_writer_pretty(&mut writer, &report)?;
    writer.flush()?;
    Ok(())
}
