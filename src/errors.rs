//! `OdsError` management module
//!
//! Wraps every error the reading and writing paths can produce and
//! provides `Result` as an alias of `Result<_, OdsError>`.

use std::fmt;
use std::io;
use std::num::{ParseFloatError, ParseIntError};

use quick_xml::events::attributes::AttrError;
use quick_xml::Error as XmlError;
use zip::result::ZipError;

/// An enum for all the errors raised while reading or writing an ods document
#[derive(Debug)]
pub enum OdsError {
    /// An error originating from reading or writing the underlying buffer
    Io(io::Error),
    /// An error occurred while reading or writing the zip package
    Zip(ZipError),
    /// An error occurred while parsing or writing xml
    Xml(XmlError),
    /// An error occurred while parsing an xml attribute
    XmlAttr(AttrError),
    /// A numeric cell holds a literal which is not a valid float
    ParseFloat(ParseFloatError),
    /// A repeat count attribute is not a valid integer
    ParseInt(ParseIntError),
    /// A boolean cell holds a literal other than `true` or `false`
    ParseBool(String),
    /// A date or time cell holds a literal which is not in ISO shape
    ParseDateTime(String),
    /// A non-string typed cell is missing its value attribute
    MissingValue(&'static str),
    /// The `mimetype` package entry does not declare a spreadsheet
    InvalidMime(Vec<u8>),
    /// A mandatory package entry is missing from the zip
    FileNotFound(&'static str),
    /// The document has no sheet with the requested name
    WorksheetName(String),
    /// The requested sheet index is past the number of sheets
    WorksheetIndex(usize),
    /// Unexpected xml structure
    Unexpected(&'static str),
}

/// Result type for this crate
pub type Result<T> = ::std::result::Result<T, OdsError>;

impl fmt::Display for OdsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OdsError::Io(e) => write!(f, "I/O error: {e}"),
            OdsError::Zip(e) => write!(f, "Zip error: {e}"),
            OdsError::Xml(e) => write!(f, "Xml error: {e}"),
            OdsError::XmlAttr(e) => write!(f, "Xml attribute error: {e}"),
            OdsError::ParseFloat(e) => write!(f, "Cannot parse float value: {e}"),
            OdsError::ParseInt(e) => write!(f, "Cannot parse integer value: {e}"),
            OdsError::ParseBool(v) => write!(f, "Cannot parse boolean value: '{v}'"),
            OdsError::ParseDateTime(v) => write!(f, "Cannot parse date or time value: '{v}'"),
            OdsError::MissingValue(a) => write!(f, "Missing '{a}' attribute on typed cell"),
            OdsError::InvalidMime(m) => write!(f, "Invalid mimetype: {m:?}"),
            OdsError::FileNotFound(file) => write!(f, "Cannot find '{file}' in the package"),
            OdsError::WorksheetName(name) => write!(f, "Worksheet '{name}' does not exist"),
            OdsError::WorksheetIndex(i) => write!(f, "Worksheet index {i} is out of bounds"),
            OdsError::Unexpected(s) => write!(f, "{s}"),
        }
    }
}

impl std::error::Error for OdsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OdsError::Io(e) => Some(e),
            OdsError::Zip(e) => Some(e),
            OdsError::Xml(e) => Some(e),
            OdsError::XmlAttr(e) => Some(e),
            OdsError::ParseFloat(e) => Some(e),
            OdsError::ParseInt(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for OdsError {
    fn from(err: io::Error) -> OdsError {
        OdsError::Io(err)
    }
}

impl From<ZipError> for OdsError {
    fn from(err: ZipError) -> OdsError {
        OdsError::Zip(err)
    }
}

impl From<XmlError> for OdsError {
    fn from(err: XmlError) -> OdsError {
        OdsError::Xml(err)
    }
}

impl From<AttrError> for OdsError {
    fn from(err: AttrError) -> OdsError {
        OdsError::XmlAttr(err)
    }
}

impl From<ParseFloatError> for OdsError {
    fn from(err: ParseFloatError) -> OdsError {
        OdsError::ParseFloat(err)
    }
}

impl From<ParseIntError> for OdsError {
    fn from(err: ParseIntError) -> OdsError {
        OdsError::ParseInt(err)
    }
}
