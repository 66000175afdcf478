use std::path::Path;

use anyhow::{Context, Result};

pub fn handle_align(input: &Path, output: &Path) -> Result<()> {
    pdb_align::align_file(input, output)
        .with_context(|| format!("Failed to align {}", input.display()))?;

    println!("{}", confirmation(output));
    Ok(())
}

fn confirmation(output: &Path) -> String {
    format!("Aligned PDB file saved as: {}", output.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_confirmation_names_output() {
        assert_eq!(
            confirmation(Path::new("out/fixed.pdb")),
            "Aligned PDB file saved as: out/fixed.pdb"
        );
    }

    #[test]
    fn test_handle_align_success() {
        let dir = TempDir::new().unwrap();
        let out_path = dir.path().join("aligned.pdb");

        handle_align(Path::new("tests/data/loose.pdb"), &out_path).unwrap();

        assert_eq!(
            fs::read_to_string(&out_path).unwrap(),
            fs::read_to_string("tests/data/aligned.pdb").unwrap()
        );
    }

    #[test]
    fn test_handle_align_format_error() {
        let dir = TempDir::new().unwrap();
        let out_path = dir.path().join("aligned.pdb");

        let err = handle_align(Path::new("tests/data/bad_occupancy.pdb"), &out_path).unwrap_err();

        let chain = format!("{:#}", err);
        assert!(chain.contains("Failed to align"));
        assert!(chain.contains("occupancy value `full`"));
    }

    #[test]
    fn test_handle_align_missing_input() {
        let dir = TempDir::new().unwrap();
        let err = handle_align(&dir.path().join("missing.pdb"), &dir.path().join("out.pdb"))
            .unwrap_err();

        assert!(format!("{:#}", err).contains("could not open input file"));
    }
}
