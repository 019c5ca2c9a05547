use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use log::warn;

mod board;
pub mod error;
pub mod item;
pub mod parser;
pub mod runner;
pub mod selection;
pub mod solver;
pub mod testing;

pub use error::{Error, Result};
pub use item::{Instance, Item};
pub use parser::{parse_line, Limits};
pub use selection::Selection;
pub use solver::solve;

/// Line reader over any buffered source, keeping track of the line number for diagnostics.
pub struct Scanner {
    reader: Box<dyn BufRead>,
    line_no: usize,
}

impl Scanner {
    pub fn new(reader: impl BufRead + 'static) -> Self {
        Self {
            reader: Box::new(reader),
            line_no: 0,
        }
    }

    /// Next line without its terminator, `None` at end of input. Lines that are not valid
    /// UTF-8 are logged and skipped.
    pub fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut input = Vec::new();
        loop {
            if self.reader.read_until(b'\n', &mut input)? == 0 {
                return Ok(None);
            }
            self.line_no += 1;
            if let Some(line) = decode_line(self.line_no, std::mem::take(&mut input)) {
                return Ok(Some(line));
            }
        }
    }

    /// Number of the line last returned by `next_line`, starting at 1.
    pub fn line_no(&self) -> usize {
        self.line_no
    }
}

/// Turn the raw bytes of a line into text, without its `\n` or `\r\n` terminator.
pub(crate) fn decode_line(line_no: usize, mut bytes: Vec<u8>) -> Option<String> {
    while matches!(bytes.last(), Some(b'\n' | b'\r')) {
        bytes.pop();
    }
    match String::from_utf8(bytes) {
        Ok(line) => Some(line),
        Err(err) => {
            warn!("line {}: skipped: {}", line_no, err.utf8_error());
            None
        }
    }
}

/// Collects one rendered result per line.
pub struct Writer(String);

impl Writer {
    pub fn new() -> Self {
        Self(String::new())
    }

    pub fn println<T: std::fmt::Display>(&mut self, value: T) {
        // writing into a String cannot fail
        let _ = writeln!(self.0, "{}", value);
    }

    /// All lines joined by `\n`, without a trailing line break.
    pub fn into_string(mut self) -> String {
        if self.0.ends_with('\n') {
            self.0.pop();
        }
        self.0
    }
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

/// Solve every problem in the file at `path` with the default limits.
pub fn pack(path: impl AsRef<Path>) -> Result<String> {
    pack_with(path, &Limits::default())
}

/// Solve every problem in the file at `path`, one after the other.
pub fn pack_with(path: impl AsRef<Path>, limits: &Limits) -> Result<String> {
    let path = path.as_ref();
    let read_error = |source| Error::Read {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(read_error)?;
    let mut scanner = Scanner::new(BufReader::new(file));
    pack_scanner(&mut scanner, limits).map_err(read_error)
}

/// Solve every problem held in `input`.
pub fn pack_str(input: &str, limits: &Limits) -> String {
    let mut out = Writer::new();
    for (i, line) in input.lines().enumerate() {
        pack_line(i + 1, line, limits, &mut out);
    }
    out.into_string()
}

/// Solve every problem the scanner yields until it runs dry.
pub fn pack_scanner(scanner: &mut Scanner, limits: &Limits) -> io::Result<String> {
    let mut out = Writer::new();
    while let Some(line) = scanner.next_line()? {
        pack_line(scanner.line_no(), &line, limits, &mut out);
    }
    Ok(out.into_string())
}

fn pack_line(line_no: usize, line: &str, limits: &Limits, out: &mut Writer) {
    if let Some(instance) = parser::parse_logged(line_no, line, limits) {
        out.println(solve(&instance));
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    const INPUT: &str = "81 : (1,53.38,€45) (2,88.62,€98) (3,78.48,€3) (4,72.30,€76) (5,30.18,€9) (6,46.34,€48)
8 : (1,15.3,€34)

no separator here
75 : (1,85.31,€29) (2,14.55,€74) (3,3.98,€16) (4,26.24,€55) (5,63.69,€52) (6,76.25,€75) (7,60.02,€74) (8,93.18,€35) (9,89.95,€78)
56 : (1,90.72,€13) (2,33.80,€40) (3,43.15,€10) (4,37.97,€16) (5,46.81,€36) (6,48.77,€79) (7,81.80,€45) (8,19.36,€79) (9,6.76,€64)";

    #[test]
    fn test_pack_str() {
        assert_eq!(pack_str(INPUT, &Limits::default()), "4\n-\n2,7\n8,9");
    }

    #[test]
    fn test_pack_str_empty() {
        assert_eq!(pack_str("", &Limits::default()), "");
    }

    #[test]
    fn test_pack_scanner() -> io::Result<()> {
        let mut scanner = Scanner::new(Cursor::new(INPUT.replace('\n', "\r\n")));
        let out = pack_scanner(&mut scanner, &Limits::default())?;
        assert_eq!(out, "4\n-\n2,7\n8,9");
        assert_eq!(scanner.line_no(), 6);
        Ok(())
    }

    #[test]
    fn test_invalid_utf8_line_is_skipped() -> io::Result<()> {
        let raw: &[u8] = b"8 : (1,15.3,34)\n\xff\xfe junk\n81 : (4,72.30,76)\n";
        let mut scanner = Scanner::new(Cursor::new(raw));
        let out = pack_scanner(&mut scanner, &Limits::default())?;
        assert_eq!(out, "-\n4");
        assert_eq!(scanner.line_no(), 3);
        Ok(())
    }

    #[test]
    fn test_decode_line() {
        assert_eq!(decode_line(1, b"10 : (1,1,1)\r\n".to_vec()), Some("10 : (1,1,1)".to_string()));
        assert_eq!(decode_line(1, b"".to_vec()), Some(String::new()));
        assert_eq!(decode_line(1, vec![0xc3, 0x28]), None);
    }

    #[test]
    fn test_missing_file() {
        match pack("does/not/exist.txt") {
            Err(Error::Read { path, .. }) => assert_eq!(path, Path::new("does/not/exist.txt")),
            other => panic!("expected a read error, got {:?}", other),
        }
    }

    #[test]
    fn test_writer() {
        let mut out = Writer::new();
        out.println(1);
        out.println("-");
        assert_eq!(out.into_string(), "1\n-");
    }
}
