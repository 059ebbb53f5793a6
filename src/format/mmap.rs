//! Memory-mapped dataset access.

use std::path::Path;

use memmap2::Mmap;

use crate::types::{Record, TallyError, TallyResult};

use super::dataset::parse_record;

/// Read-only memory-mapped view of a dataset file.
pub struct MmapDataset {
    /// `None` for an empty file, which cannot be mapped on every platform.
    mmap: Option<Mmap>,
}

impl MmapDataset {
    /// Map a dataset file for reading.
    pub fn open(path: &Path) -> TallyResult<Self> {
        let file = std::fs::File::open(path)?;
        if file.metadata()?.len() == 0 {
            return Ok(Self { mmap: None });
        }
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(Self { mmap: Some(mmap) })
    }

    /// The mapped bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.mmap.as_deref().unwrap_or(&[])
    }

    /// Size of the mapped file in bytes.
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parse the mapped lines into records, skipping blank lines.
    ///
    /// Yields the same results, line numbers included, as
    /// [`super::DatasetReader`] over the same file.
    pub fn records(&self) -> impl Iterator<Item = TallyResult<Record>> + '_ {
        self.as_bytes()
            .split(|&b| b == b'\n')
            .enumerate()
            .filter_map(|(i, raw)| {
                let line_no = i + 1;
                match std::str::from_utf8(raw) {
                    Ok(line) if line.trim().is_empty() => None,
                    Ok(line) => Some(parse_record(line, line_no)),
                    Err(_) => Some(Err(TallyError::MalformedRecord {
                        line: line_no,
                        reason: "invalid UTF-8".to_string(),
                    })),
                }
            })
    }
}
