//! Book-level reading of an ods document

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use crate::datatype::Grid;
use crate::document::SpreadsheetDocument;
use crate::errors::{OdsError, Result};
use crate::sheet::OdsSheet;

/// An opened ods document, ready for sheet reads.
///
/// The package is parsed once on open; sheet reads decode cell values
/// out of the parsed tree without touching the source again.
pub struct OdsBook {
    document: SpreadsheetDocument,
    auto_detect_int: bool,
}

impl OdsBook {
    /// Opens an ods file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<OdsBook> {
        Self::open_stream(BufReader::new(File::open(path)?))
    }

    /// Opens an ods document from any seekable byte stream
    pub fn open_stream<RS: Read + Seek>(stream: RS) -> Result<OdsBook> {
        Ok(OdsBook {
            document: SpreadsheetDocument::load(stream)?,
            auto_detect_int: true,
        })
    }

    /// Whether whole-valued floats should narrow to integers (default on)
    pub fn with_auto_detect_int(mut self, auto_detect_int: bool) -> OdsBook {
        self.auto_detect_int = auto_detect_int;
        self
    }

    /// Sheet names in document order
    pub fn sheet_names(&self) -> Vec<&str> {
        self.document.tables.iter().map(|t| t.name.as_str()).collect()
    }

    /// Number of sheets in the document
    pub fn sheet_count(&self) -> usize {
        self.document.tables.len()
    }

    /// A lazy view over the named sheet
    pub fn sheet_by_name(&self, name: &str) -> Result<OdsSheet<'_>> {
        let table = self
            .document
            .tables
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| OdsError::WorksheetName(name.to_string()))?;
        OdsSheet::new(table, self.auto_detect_int)
    }

    /// A lazy view over the sheet at `index` in document order
    pub fn sheet_by_index(&self, index: usize) -> Result<OdsSheet<'_>> {
        let table = self
            .document
            .tables
            .get(index)
            .ok_or(OdsError::WorksheetIndex(index))?;
        OdsSheet::new(table, self.auto_detect_int)
    }

    /// Reads the named sheet into a grid
    pub fn read_sheet_by_name(&self, name: &str) -> Result<Grid> {
        self.sheet_by_name(name)?.to_grid()
    }

    /// Reads the sheet at `index` into a grid
    pub fn read_sheet_by_index(&self, index: usize) -> Result<Grid> {
        self.sheet_by_index(index)?.to_grid()
    }

    /// Reads every sheet, in document order
    pub fn read_all(&self) -> Result<Vec<(String, Grid)>> {
        let mut sheets = Vec::with_capacity(self.sheet_count());
        for table in &self.document.tables {
            let sheet = OdsSheet::new(table, self.auto_detect_int)?;
            sheets.push((sheet.name().to_string(), sheet.to_grid()?));
        }
        Ok(sheets)
    }
}
