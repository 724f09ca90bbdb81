//! Book-level writing of an ods document

use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use crate::converter::encode_cell;
use crate::datatype::CellValue;
use crate::document::{SpreadsheetDocument, Table, TableRow};
use crate::errors::Result;

/// Builds an ods document sheet by sheet.
///
/// Nothing touches the output stream until [`OdsWriter::write`] or
/// [`OdsWriter::save`]; both consume the writer so the package is
/// serialized exactly once.
#[derive(Default)]
pub struct OdsWriter {
    document: SpreadsheetDocument,
}

impl OdsWriter {
    /// A writer for an empty document
    pub fn new() -> OdsWriter {
        OdsWriter::default()
    }

    /// Starts a new sheet with the given name.
    ///
    /// The sheet joins the document when the returned writer is closed;
    /// dropping it without closing discards the sheet entirely.
    pub fn create_sheet(&mut self, name: &str) -> OdsSheetWriter<'_> {
        OdsSheetWriter {
            document: &mut self.document,
            table: Table {
                name: name.to_string(),
                rows: Vec::new(),
            },
        }
    }

    /// Serializes the document as an ods package into `writer`
    pub fn write<W: Write + Seek>(self, writer: W) -> Result<()> {
        self.document.write(writer)
    }

    /// Serializes the document as an ods file at `path`
    pub fn save<P: AsRef<Path>>(self, path: P) -> Result<()> {
        self.document.write(BufWriter::new(File::create(path)?))
    }
}

/// Appends rows to one sheet under construction
pub struct OdsSheetWriter<'a> {
    document: &'a mut SpreadsheetDocument,
    table: Table,
}

impl OdsSheetWriter<'_> {
    /// Appends one row of values, in order.
    ///
    /// Encoding never fails: every value has an explicit cell encoding.
    pub fn write_row(&mut self, row: &[CellValue]) {
        let mut cells = Vec::with_capacity(row.len());
        for value in row {
            cells.push(encode_cell(value));
        }
        self.table.rows.push(TableRow {
            cells,
            ..TableRow::default()
        });
    }

    /// Attaches the sheet to the document, making it visible
    pub fn close(self) {
        self.document.tables.push(self.table);
    }
}
