use std::io::BufRead;
use std::path::PathBuf;

use crate::error::{convert_io_error, CliError};

pub fn read_file(path: PathBuf) -> Result<String, CliError> {
    let contents = std::fs::read_to_string(&path).map_err(|e| convert_io_error(e, path))?;
    Ok(contents)
}

/// Read a single line from standard input, without its line terminator.
pub fn read_line() -> Result<String, CliError> {
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|source| CliError::StdinError { source })?;
    Ok(strip_line_ending(line))
}

fn strip_line_ending(mut line: String) -> String {
    let len = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(len);
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_line_ending() {
        assert_eq!(strip_line_ending("\\x.x\n".to_string()), "\\x.x");
        assert_eq!(strip_line_ending("a b\r\n".to_string()), "a b");
        assert_eq!(strip_line_ending("a b ".to_string()), "a b ");
    }

    #[test]
    fn test_missing_file_reports_path() {
        let path = PathBuf::from("does/not/exist.lc");
        let error = read_file(path.clone()).unwrap_err();

        assert!(matches!(error, CliError::IoError { path: ref p, .. } if *p == path));
        assert_eq!(error.to_string(), "Failed to read file does/not/exist.lc");
    }
}
