//! Tab-separated dataset reading: one `timestamp<TAB>value` record per line.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::types::{Record, TallyError, TallyResult};

use super::prefix::parse_timestamp;

/// Parse one dataset line. `line_no` is 1-based and only used for errors.
///
/// The value is everything after the first tab, minus a trailing line
/// terminator; it may itself contain tabs.
pub fn parse_record(line: &str, line_no: usize) -> TallyResult<Record> {
    let (timestamp, value) = line
        .split_once('\t')
        .ok_or_else(|| TallyError::MalformedRecord {
            line: line_no,
            reason: "missing tab separator".to_string(),
        })?;
    let timestamp =
        parse_timestamp(timestamp.trim()).map_err(|e| TallyError::MalformedRecord {
            line: line_no,
            reason: e.to_string(),
        })?;
    Ok(Record::new(timestamp, value.trim_end_matches(['\r', '\n'])))
}

/// Streaming reader over a dataset, yielding one result per non-blank line.
pub struct DatasetReader<R> {
    lines: io::Lines<R>,
    line_no: usize,
}

impl<R: BufRead> DatasetReader<R> {
    /// Read records from any buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }

    /// Number of lines consumed so far, blank ones included.
    pub fn lines_read(&self) -> usize {
        self.line_no
    }
}

impl DatasetReader<BufReader<File>> {
    /// Open a dataset file for buffered reading.
    pub fn open(path: &Path) -> TallyResult<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> Iterator for DatasetReader<R> {
    type Item = TallyResult<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.lines.next()?;
            self.line_no += 1;
            return match line {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => Some(parse_record(&line, self.line_no)),
                Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                    Some(Err(TallyError::MalformedRecord {
                        line: self.line_no,
                        reason: "invalid UTF-8".to_string(),
                    }))
                }
                Err(e) => Some(Err(e.into())),
            };
        }
    }
}
