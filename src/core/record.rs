use std::fmt;

use itertools::Itertools;
use thiserror::Error;

/// Record tags that are rewritten into fixed columns. Anything else is copied.
pub const COORDINATE_RECORDS: [&str; 2] = ["ATOM", "HETATM"];

/// Minimum number of whitespace tokens for a coordinate line to be reformatted.
///
/// Lines carrying one of the [`COORDINATE_RECORDS`] tags but fewer tokens than
/// this are passed through untouched instead of being reported as errors.
pub const MIN_COORDINATE_TOKENS: usize = 11;

/// The numeric columns of a coordinate record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    X,
    Y,
    Z,
    Occupancy,
    BFactor,
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NumericField::X => "x",
            NumericField::Y => "y",
            NumericField::Z => "z",
            NumericField::Occupancy => "occupancy",
            NumericField::BFactor => "B-factor",
        };
        f.write_str(name)
    }
}

/// A numeric column of a qualifying coordinate line could not be parsed.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{field} value `{value}` is not a valid number")]
pub struct FormatError {
    pub field: NumericField,
    pub value: String,
}

/// One `ATOM`/`HETATM` record split into its fields.
///
/// Text fields borrow from the source line; the five numeric fields are parsed
/// so they can be re-rendered with a fixed number of decimals.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateRecord<'a> {
    pub record_type: &'a str,
    pub serial: &'a str,
    pub atom_name: &'a str,
    pub residue_name: &'a str,
    pub chain_id: &'a str,
    pub residue_seq: &'a str,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub occupancy: f64,
    pub b_factor: f64,
    /// Empty when the line has no twelfth token.
    pub element: &'a str,
}

impl<'a> CoordinateRecord<'a> {
    /// Builds a record from the whitespace tokens of a coordinate line.
    ///
    /// # Arguments
    ///
    /// * `tokens` - The split line. Must hold at least [`MIN_COORDINATE_TOKENS`]
    ///   entries; tokens past the twelfth are ignored.
    ///
    /// # Returns
    ///
    /// * `Ok(CoordinateRecord)` - If every numeric column parses as `f64`.
    /// * `Err(FormatError)` - Naming the first numeric column that does not.
    ///
    pub(crate) fn from_tokens(tokens: &[&'a str]) -> Result<Self, FormatError> {
        debug_assert!(tokens.len() >= MIN_COORDINATE_TOKENS);

        Ok(CoordinateRecord {
            record_type: tokens[0],
            serial: tokens[1],
            atom_name: tokens[2],
            residue_name: tokens[3],
            chain_id: tokens[4],
            residue_seq: tokens[5],
            x: parse_numeric(tokens[6], NumericField::X)?,
            y: parse_numeric(tokens[7], NumericField::Y)?,
            z: parse_numeric(tokens[8], NumericField::Z)?,
            occupancy: parse_numeric(tokens[9], NumericField::Occupancy)?,
            b_factor: parse_numeric(tokens[10], NumericField::BFactor)?,
            element: tokens.get(11).copied().unwrap_or(""),
        })
    }
}

/// Parses a numeric column. Single underscores between digits are accepted
/// as digit separators, so `1_000.5` reads as `1000.5`.
fn parse_numeric(token: &str, field: NumericField) -> Result<f64, FormatError> {
    let invalid = || FormatError {
        field,
        value: token.to_string(),
    };

    if !token.contains('_') {
        return token.parse::<f64>().map_err(|_| invalid());
    }

    let bytes = token.as_bytes();
    let separators_ok = bytes.iter().enumerate().all(|(i, &b)| {
        b != b'_'
            || (i > 0
                && i + 1 < bytes.len()
                && bytes[i - 1].is_ascii_digit()
                && bytes[i + 1].is_ascii_digit())
    });
    if !separators_ok {
        return Err(invalid());
    }

    token.replace('_', "").parse::<f64>().map_err(|_| invalid())
}

/// Fixed-point text for a numeric column. NaN is written as `nan`.
fn fixed(value: f64, precision: usize) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else {
        format!("{:.*}", precision, value)
    }
}

/// Renders the record in PDB column layout, without the line terminator.
///
/// Padding only ever widens a field: a value longer than its column range
/// pushes the following columns to the right.
impl fmt::Display for CoordinateRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<6}{:>5} {:<4} {:>3} {:>1}{:>4}    {:>8}{:>8}{:>8}{:>6}{:>6}          {:>2}",
            self.record_type,
            self.serial,
            self.atom_name,
            self.residue_name,
            self.chain_id,
            self.residue_seq,
            fixed(self.x, 3),
            fixed(self.y, 3),
            fixed(self.z, 3),
            fixed(self.occupancy, 2),
            fixed(self.b_factor, 2),
            self.element,
        )
    }
}

/// The outcome of classifying one input line.
#[derive(Debug, Clone, PartialEq)]
pub enum AlignedLine<'a> {
    /// A coordinate record to be written in fixed columns, followed by `\n`.
    Formatted(CoordinateRecord<'a>),
    /// A line to be written back exactly as read, terminator included.
    Passthrough(&'a str),
}

/// Returns `true` if `line` opens at column 1 with a coordinate tag followed by
/// whitespace or the end of the line.
pub fn is_coordinate_record(line: &str) -> bool {
    if line.starts_with(char::is_whitespace) {
        return false;
    }
    line.split_whitespace()
        .next()
        .is_some_and(|tag| COORDINATE_RECORDS.contains(&tag))
}

/// Classifies a single line and, for qualifying coordinate records, parses it.
///
/// A line qualifies when it starts at column 1 with a first token of exactly
/// `ATOM` or `HETATM` and it has at least [`MIN_COORDINATE_TOKENS`] tokens.
/// Every other line, including indented and short coordinate lines, comes
/// back as [`AlignedLine::Passthrough`] holding the input unchanged.
///
/// # Arguments
///
/// * `line` - One input line. It may still carry its `\n` or `\r\n`.
///
/// # Errors
///
/// Returns a [`FormatError`] when the line qualifies but one of x, y, z,
/// occupancy or B-factor is not a number.
///
/// # Examples
///
/// ```
/// use pdb_align::{AlignedLine, align_line};
///
/// let line = "ATOM 1 N MET A 1 10.0 20.0 30.0 1.00 20.00 N\n";
/// match align_line(line).unwrap() {
///     AlignedLine::Formatted(record) => assert_eq!(&record.to_string()[30..38], "  10.000"),
///     AlignedLine::Passthrough(_) => unreachable!(),
/// }
/// ```
pub fn align_line(line: &str) -> Result<AlignedLine<'_>, FormatError> {
    if !is_coordinate_record(line) {
        return Ok(AlignedLine::Passthrough(line));
    }

    let tokens = line.split_whitespace().collect_vec();
    if tokens.len() < MIN_COORDINATE_TOKENS {
        return Ok(AlignedLine::Passthrough(line));
    }

    CoordinateRecord::from_tokens(&tokens).map(AlignedLine::Formatted)
}
