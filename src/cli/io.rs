//! File and stream handling for the CLI
//!
//! - Input: a UTF-8 command script, one command per line
//! - Output: result lines to a file or stdout
//! - Reports: single JSON objects on stdout

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use serde_json::Value;

use super::config::Config;
use super::errors::{CliError, CliResult};

/// Open a command script for buffered line reading
pub fn open_input(path: &Path) -> CliResult<BufReader<File>> {
    let file = File::open(path).map_err(|e| {
        CliError::io_error(format!("Failed to open input {}: {}", path.display(), e))
    })?;
    Ok(BufReader::new(file))
}

/// Open the configured result sink: a file, or stdout for `"-"`.
pub fn open_output(config: &Config) -> CliResult<Box<dyn Write>> {
    if config.writes_stdout() {
        return Ok(Box::new(io::stdout().lock()));
    }
    let target = &config.output_path;
    let file = File::create(target)
        .map_err(|e| CliError::io_error(format!("Failed to create output {}: {}", target, e)))?;
    Ok(Box::new(BufWriter::new(file)))
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });

    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, &response)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::BufRead;
    use tempfile::TempDir;

    #[test]
    fn test_open_input_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = open_input(&dir.path().join("nope.txt")).unwrap_err();
        assert_eq!(err.code_str(), "RIDE_CLI_IO_ERROR");
    }

    #[test]
    fn test_output_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        let config = Config {
            output_path: path.to_string_lossy().to_string(),
            ..Config::default()
        };

        {
            let mut out = open_output(&config).unwrap();
            writeln!(out, "(1,2,3)").unwrap();
            out.flush().unwrap();
        }

        let lines: Vec<String> = open_input(&path).unwrap().lines().map(Result::unwrap).collect();
        assert_eq!(lines, vec!["(1,2,3)"]);
        assert_eq!(fs::read_to_string(&path).unwrap(), "(1,2,3)\n");
    }
}
