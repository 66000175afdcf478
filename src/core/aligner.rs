use std::fmt;
use std::io::{BufRead, Write};

use log::{debug, trace};

use super::error::AlignError;
use super::record::{AlignedLine, align_line, is_coordinate_record};

/// Counters collected over one alignment run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AlignStats {
    /// Lines read, which is also the number of lines written.
    pub lines: usize,
    /// Coordinate records rewritten in fixed columns.
    pub reformatted: usize,
    /// Lines copied unchanged, short coordinate records included.
    pub passthrough: usize,
    /// `ATOM`/`HETATM` lines copied because they had too few fields.
    pub short_records: usize,
}

impl AlignStats {
    fn record(&mut self, line: &AlignedLine<'_>) {
        self.lines += 1;
        match line {
            AlignedLine::Formatted(_) => self.reformatted += 1,
            AlignedLine::Passthrough(_) => {
                self.passthrough += 1;
                if is_short_record(line) {
                    self.short_records += 1;
                }
            }
        }
    }
}

impl fmt::Display for AlignStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} lines: {} reformatted, {} copied ({} short coordinate records)",
            self.lines, self.reformatted, self.passthrough, self.short_records
        )
    }
}

/// A coordinate-tagged line that was copied because it has too few fields.
fn is_short_record(line: &AlignedLine<'_>) -> bool {
    matches!(line, AlignedLine::Passthrough(raw) if is_coordinate_record(raw))
}

fn classify(line_number: usize, line: &str) -> Result<AlignedLine<'_>, AlignError> {
    let aligned = align_line(line).map_err(|e| AlignError::format(line_number, line, e))?;
    if is_short_record(&aligned) {
        debug!(
            "line {}: coordinate record has too few fields, copied unchanged",
            line_number
        );
    }
    Ok(aligned)
}

/// Aligns a sequence of lines, yielding one output line per input line.
///
/// Input lines keep their terminators, as produced by `str::split_inclusive('\n')`
/// or `BufRead::read_line`. Passthrough lines come back byte for byte; formatted
/// records always end in a single `\n`. Line numbers in errors are 1-based.
pub fn align_lines<I, S>(lines: I) -> impl Iterator<Item = Result<String, AlignError>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines.into_iter().enumerate().map(|(index, line)| {
        let line = line.as_ref();
        match classify(index + 1, line)? {
            AlignedLine::Formatted(record) => Ok(format!("{}\n", record)),
            AlignedLine::Passthrough(raw) => Ok(raw.to_string()),
        }
    })
}

/// Aligns a whole PDB text held in memory.
///
/// Stops at the first malformed coordinate record.
pub fn align_str(input: &str) -> Result<String, AlignError> {
    align_lines(input.split_inclusive('\n')).collect()
}

/// Streams `reader` into `writer` one line at a time.
///
/// Only the current line is held in memory. Lines that are not valid UTF-8
/// cannot be split into fields and are copied as raw bytes. The writer is
/// flushed before returning successfully; on error, whatever was written for
/// earlier lines stays in the sink.
///
/// # Arguments
///
/// * `reader` - Source of PDB text.
/// * `writer` - Sink for the aligned text.
///
/// # Returns
///
/// * `Ok(AlignStats)` - Counters for the run.
/// * `Err(AlignError)` - The first format error or I/O failure encountered.
///
pub fn align_stream<R, W>(mut reader: R, mut writer: W) -> Result<AlignStats, AlignError>
where
    R: BufRead,
    W: Write,
{
    let mut stats = AlignStats::default();
    let mut buf: Vec<u8> = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line_number = stats.lines + 1;

        let Ok(line) = std::str::from_utf8(&buf) else {
            debug!("line {}: not valid UTF-8, copied unchanged", line_number);
            writer.write_all(&buf)?;
            stats.lines += 1;
            stats.passthrough += 1;
            continue;
        };

        let aligned = classify(line_number, line)?;
        match &aligned {
            AlignedLine::Formatted(record) => {
                trace!("line {}: {}", line_number, record);
                writeln!(writer, "{}", record)?;
            }
            AlignedLine::Passthrough(raw) => writer.write_all(raw.as_bytes())?,
        }
        stats.record(&aligned);
    }

    writer.flush()?;
    Ok(stats)
}
