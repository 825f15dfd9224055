//! Validate command implementation

use crate::error::CliError;
use anyhow::Result;
use clap::Args;
use gridsent_core::{GridIndex, Lexicon};
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Lexicon file to check
    #[arg(short, long, value_name = "FILE", required = true)]
    pub lexicon: PathBuf,

    /// Grid file to check
    #[arg(short, long, value_name = "FILE", required = true)]
    pub grid: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        let mut failures = Vec::new();

        println!("Validating lexicon: {}", self.lexicon.display());
        match Lexicon::from_file(&self.lexicon) {
            Ok(lexicon) => {
                println!("✓ Lexicon is valid!");
                println!("  Entries: {}", lexicon.len());
                println!("  Longest phrase: {} tokens", lexicon.max_phrase_len());
                let multi_word = lexicon.iter().filter(|(phrase, _)| phrase.contains(' ')).count();
                println!("  Multi-word phrases: {multi_word}");
            }
            Err(e) => {
                println!("✗ Lexicon is invalid!");
                println!("  Error: {e}");
                failures.push(format!("lexicon: {e}"));
            }
        }

        println!("Validating grid: {}", self.grid.display());
        match GridIndex::from_file(&self.grid) {
            Ok(grid) => {
                println!("✓ Grid is valid!");
                println!("  Cells: {}", grid.len());
                for (a, b) in grid.overlapping_pairs() {
                    println!("  ! Cells {a} and {b} overlap; shared points resolve to {a}");
                }
            }
            Err(e) => {
                println!("✗ Grid is invalid!");
                println!("  Error: {e}");
                failures.push(format!("grid: {e}"));
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(CliError::ValidationFailed(failures.join("; ")).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    #[test]
    fn test_valid_inputs() {
        let lexicon = file("good 2\nnot good -1\n");
        let grid = file(
            r#"{"features":[{"properties":{"id":"A1","xmin":0,"xmax":1,"ymin":0,"ymax":1}}]}"#,
        );

        let args = ValidateArgs {
            lexicon: lexicon.path().to_path_buf(),
            grid: grid.path().to_path_buf(),
        };
        assert!(args.execute().is_ok());
    }

    #[test]
    fn test_invalid_lexicon_line() {
        let lexicon = file("good 2\nterrible\n");
        let grid = file(
            r#"{"features":[{"properties":{"id":"A1","xmin":0,"xmax":1,"ymin":0,"ymax":1}}]}"#,
        );

        let args = ValidateArgs {
            lexicon: lexicon.path().to_path_buf(),
            grid: grid.path().to_path_buf(),
        };
        let err = args.execute().unwrap_err();
        assert!(err.to_string().contains("lexicon"));
    }

    #[test]
    fn test_empty_grid() {
        let lexicon = file("good 2\n");
        let grid = file(r#"{"features":[]}"#);

        let args = ValidateArgs {
            lexicon: lexicon.path().to_path_buf(),
            grid: grid.path().to_path_buf(),
        };
        let err = args.execute().unwrap_err();
        assert!(err.to_string().contains("grid"));
    }
}
