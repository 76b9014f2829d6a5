//! Line-at-a-time input for the lexer.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Supplies raw source text one line at a time.
pub trait LineSource {
    /// Returns the next line without its terminator, or `None` once the
    /// input is exhausted.
    fn next_line(&mut self) -> io::Result<Option<String>>;
}

/// Lines of an in-memory string.
pub struct StrSource<'a> {
    lines: std::str::Lines<'a>,
}

impl<'a> StrSource<'a> {
    pub fn new(text: &'a str) -> Self {
        StrSource { lines: text.lines() }
    }
}

impl LineSource for StrSource<'_> {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.lines.next().map(str::to_owned))
    }
}

/// Lines of any buffered reader.
///
/// The reader is dropped as soon as end of input is seen, or together with
/// the source on any other exit path.
pub struct ReaderSource<R> {
    reader: Option<R>,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        ReaderSource {
            reader: Some(reader),
        }
    }

    /// False once the reader has been released.
    pub fn is_open(&self) -> bool {
        self.reader.is_some()
    }
}

impl ReaderSource<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(ReaderSource::new(BufReader::new(file)))
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let Some(reader) = self.reader.as_mut() else {
            return Ok(None);
        };

        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            self.reader = None;
            return Ok(None);
        }

        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }
}

#[test]
fn test_reader_source_strips_terminators() {
    let mut source = ReaderSource::new("let x\r\n= 1\nin x".as_bytes());
    assert_eq!(source.next_line().unwrap().as_deref(), Some("let x"));
    assert_eq!(source.next_line().unwrap().as_deref(), Some("= 1"));
    assert_eq!(source.next_line().unwrap().as_deref(), Some("in x"));
    assert!(source.is_open());
    assert_eq!(source.next_line().unwrap(), None);
    assert!(!source.is_open());
    assert_eq!(source.next_line().unwrap(), None);
}

#[test]
fn test_str_source_keeps_blank_lines() {
    let mut source = StrSource::new("a\n\nb");
    assert_eq!(source.next_line().unwrap().as_deref(), Some("a"));
    assert_eq!(source.next_line().unwrap().as_deref(), Some(""));
    assert_eq!(source.next_line().unwrap().as_deref(), Some("b"));
    assert_eq!(source.next_line().unwrap(), None);
}
