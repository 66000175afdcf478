use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::Path;

use log::info;

use crate::core::aligner::{AlignStats, align_stream};
use crate::core::error::AlignError;

/// Aligns the coordinate records of a PDB file into a new file.
///
/// The input is opened first, so a missing input never creates or truncates the
/// output. The output is created or truncated, then filled line by line. Both
/// files are closed when this function returns, on success and on error.
///
/// # Arguments
///
/// * `input` - Path of the PDB file to read.
/// * `output` - Path of the file to write. Must not be the input file itself.
///
/// # Returns
///
/// * `Ok(AlignStats)` - Line counters for the run.
/// * `Err(AlignError)` - If a file cannot be opened or created, if reading or
///   writing fails, or if a coordinate record has a non-numeric column.
///
/// # Functionality
///
/// 1. Opens the input with a buffered reader.
/// 2. Refuses to proceed if the output resolves to the same file as the input.
/// 3. Creates the output with a buffered writer.
/// 4. Streams every line through the aligner and flushes the writer.
///
pub fn align_file<P, Q>(input: P, output: Q) -> Result<AlignStats, AlignError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let input = input.as_ref();
    let output = output.as_ref();

    let reader = File::open(input)
        .map(BufReader::new)
        .map_err(|source| AlignError::OpenInput {
            path: input.to_path_buf(),
            source,
        })?;

    if is_same_file(input, output) {
        return Err(AlignError::CreateOutput {
            path: output.to_path_buf(),
            source: io::Error::new(
                io::ErrorKind::InvalidInput,
                "output path is the input file",
            ),
        });
    }

    let writer = File::create(output)
        .map(BufWriter::new)
        .map_err(|source| AlignError::CreateOutput {
            path: output.to_path_buf(),
            source,
        })?;

    info!("Aligning {} -> {}", input.display(), output.display());
    let stats = align_stream(reader, writer)?;
    info!("{}", stats);

    Ok(stats)
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
