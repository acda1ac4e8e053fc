//! Transaction sources and the statistics pass over them.
//!
//! A dataset is text with one transaction per line: whitespace-separated
//! non-negative item ids. Whitespace-only lines are separators; they are
//! neither transactions nor the end of input.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{Item, MAX_ITEM};
use crate::{MineError, Result};

/// Something that can be read from the start any number of times. Every
/// call to [`open`](TransactionSource::open) yields a fresh reader, and the
/// reader is released when dropped.
pub trait TransactionSource {
    type Reader<'a>: BufRead
    where
        Self: 'a;

    fn open(&self) -> io::Result<Self::Reader<'_>>;

    /// Name used in error messages.
    fn name(&self) -> String;
}

#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        FileSource {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TransactionSource for FileSource {
    type Reader<'a> = BufReader<File>;

    fn open(&self) -> io::Result<Self::Reader<'_>> {
        File::open(&self.path).map(BufReader::new)
    }

    fn name(&self) -> String {
        self.path.display().to_string()
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    text: String,
}

impl InMemorySource {
    pub fn new(text: impl Into<String>) -> Self {
        InMemorySource { text: text.into() }
    }

    pub fn from_transactions<T, I>(transactions: T) -> Self
    where
        T: IntoIterator<Item = I>,
        I: IntoIterator<Item = Item>,
    {
        let text = transactions
            .into_iter()
            .map(|tx| {
                tx.into_iter()
                    .map(|item| item.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n");
        InMemorySource { text }
    }
}

impl TransactionSource for InMemorySource {
    type Reader<'a> = Cursor<&'a [u8]>;

    fn open(&self) -> io::Result<Self::Reader<'_>> {
        Ok(Cursor::new(self.text.as_bytes()))
    }

    fn name(&self) -> String {
        "<memory>".to_string()
    }
}

/// Dataset-wide figures computed once by [`scan`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DatasetStats {
    /// One past the largest item id seen, `0` for an empty dataset.
    pub item_count: usize,
    /// Number of non-blank lines.
    pub transaction_count: usize,
}

/// Single pass over `source` computing [`DatasetStats`].
pub fn scan<S: TransactionSource>(source: &S) -> Result<DatasetStats> {
    let name = source.name();
    let reader = source.open().map_err(|e| MineError::io(&name, e))?;

    let mut stats = DatasetStats::default();
    for transaction in Transactions::new(reader, name) {
        let (line_no, line) = transaction?;
        stats.transaction_count += 1;
        for item in parse_transaction(&line, line_no) {
            stats.item_count = stats.item_count.max(item? + 1);
        }
    }

    debug!(
        item_count = stats.item_count,
        transaction_count = stats.transaction_count,
        "scanned dataset"
    );
    Ok(stats)
}

/// Item ids on one transaction line. `line_no` is 1-based and only used
/// for error context. Ids above [`MAX_ITEM`] are rejected.
pub fn parse_transaction(line: &str, line_no: usize) -> impl Iterator<Item = Result<Item>> + '_ {
    line.split_whitespace().map(move |token| {
        token
            .parse::<Item>()
            .ok()
            .filter(|&item| item <= MAX_ITEM)
            .ok_or_else(|| MineError::Parse {
                line: line_no,
                token: token.to_owned(),
            })
    })
}

/// Non-blank lines of a reader, tagged with their 1-based line number.
pub(crate) struct Transactions<R> {
    lines: io::Lines<R>,
    line_no: usize,
    name: String,
}

impl<R: BufRead> Transactions<R> {
    pub(crate) fn new(reader: R, name: String) -> Self {
        Transactions {
            lines: reader.lines(),
            line_no: 0,
            name,
        }
    }
}

impl<R: BufRead> Iterator for Transactions<R> {
    type Item = Result<(usize, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.lines.next()?;
            self.line_no += 1;
            match line {
                Err(e) => return Some(Err(MineError::io(&self.name, e))),
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => return Some(Ok((self.line_no, line))),
            }
        }
    }
}
