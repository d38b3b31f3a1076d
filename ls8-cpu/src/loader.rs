use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

const COMMENT: char = '#';
const LITERAL_DIGITS: usize = 8;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read program '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("line {line}: '{text}' is not an 8-digit binary literal")]
    InvalidLiteral { line: usize, text: String },
    #[error("program contains no instructions")]
    Empty,
}

/// Converts program source into bytes. Each line holds one 8-digit binary
/// literal; `#` starts a comment, and blank or comment-only lines are skipped.
pub fn parse_program(text: &str) -> Result<Vec<u8>, LoadError> {
    let mut program = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let literal = line.split(COMMENT).next().unwrap_or_default().trim();
        if literal.is_empty() {
            continue;
        }
        let byte = parse_literal(literal).ok_or_else(|| LoadError::InvalidLiteral {
            line: idx + 1,
            text: String::from(literal),
        })?;
        program.push(byte);
    }

    if program.is_empty() {
        return Err(LoadError::Empty);
    }
    Ok(program)
}

pub fn load_file(path: impl AsRef<Path>) -> Result<Vec<u8>, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let program = parse_program(&text)?;
    tracing::debug!("read {} bytes from {}", program.len(), path.display());
    Ok(program)
}

fn parse_literal(literal: &str) -> Option<u8> {
    let is_binary =
        literal.len() == LITERAL_DIGITS && literal.bytes().all(|b| b == b'0' || b == b'1');
    if !is_binary {
        return None;
    }
    u8::from_str_radix(literal, 2).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRINT8: &str = "\
# print8.ls8: Print the number 8 on the screen

10000010 # LDI R0,8
00000000
00001000
01000111 # PRN R0
00000000
00000001 # HLT
";

    #[test]
    fn parses_commented_program() {
        let program = parse_program(PRINT8).unwrap();
        assert_eq!(program, vec![0x82, 0x00, 0x08, 0x47, 0x00, 0x01]);
    }

    #[test]
    fn tolerates_whitespace_and_crlf() {
        let program = parse_program("  10000010  \r\n\r\n\t00000001#HLT\r\n").unwrap();
        assert_eq!(program, vec![0x82, 0x01]);
    }

    #[test]
    fn rejects_non_binary_digits() {
        let err = parse_program("10000010\n1000001x # bad\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidLiteral { line: 2, ref text } if text == "1000001x"
        ));
    }

    #[test]
    fn rejects_wrong_width() {
        for text in ["1010", "100000010", "0b000001", "+0000001"] {
            assert!(
                matches!(parse_program(text), Err(LoadError::InvalidLiteral { line: 1, .. })),
                "{}",
                text
            );
        }
    }

    #[test]
    fn rejects_empty_program() {
        assert!(matches!(parse_program(""), Err(LoadError::Empty)));
        assert!(matches!(parse_program("# nothing\n\n"), Err(LoadError::Empty)));
    }

    #[test]
    fn missing_file() {
        let err = load_file("/nonexistent/program.ls8").unwrap_err();
        assert!(matches!(err, LoadError::Io { ref path, .. } if path == Path::new("/nonexistent/program.ls8")));
    }

    #[test]
    fn reads_file() {
        let path = std::env::temp_dir().join(format!("ls8-loader-{}.ls8", std::process::id()));
        fs::write(&path, PRINT8).unwrap();
        let program = load_file(&path);
        fs::remove_file(&path).unwrap();
        assert_eq!(program.unwrap(), vec![0x82, 0x00, 0x08, 0x47, 0x00, 0x01]);
    }
}
