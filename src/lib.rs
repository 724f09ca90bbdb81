//! Rust OpenDocument Spreadsheet reader and writer
//!
//! **ods-io** is a pure Rust library to read and write OpenDocument
//! Spreadsheet (ods) files as plain grids of scalar values. Strings
//! (including multiline), integers, floats, booleans and ISO dates and
//! times round-trip; styles, formulas and formatting are out of scope.
//!
//! # Examples
//! ```
//! use ods_io::{CellValue, OdsBook, OdsWriter};
//! use std::io::Cursor;
//!
//! // build a document sheet by sheet
//! let mut writer = OdsWriter::new();
//! let mut sheet = writer.create_sheet("Sheet1");
//! sheet.write_row(&[CellValue::Int(1), CellValue::from("hello\nworld")]);
//! sheet.write_row(&[CellValue::Float(10.5), CellValue::Bool(true)]);
//! sheet.close();
//!
//! let mut buf = Cursor::new(Vec::new());
//! writer.write(&mut buf)?;
//!
//! // read it back
//! buf.set_position(0);
//! let book = OdsBook::open_stream(buf)?;
//! let grid = book.read_sheet_by_name("Sheet1")?;
//! assert_eq!(grid[0][0], CellValue::Int(1));
//! assert_eq!(grid[0][1], CellValue::String("hello\nworld".to_string()));
//! assert_eq!(grid[1][0], CellValue::Float(10.5));
//! # Ok::<(), ods_io::OdsError>(())
//! ```
#![deny(missing_docs)]

mod book;
mod converter;
mod datatype;
mod document;
pub mod errors;
mod sheet;
mod writer;

pub use book::OdsBook;
pub use datatype::{CellValue, Grid};
pub use errors::OdsError;
pub use sheet::OdsSheet;
pub use writer::{OdsSheetWriter, OdsWriter};
