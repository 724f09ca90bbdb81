use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An enum to represent all different data types that can appear as
/// a value in a worksheet cell
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CellValue {
    /// Signed integer
    Int(i64),
    /// Float
    Float(f64),
    /// String
    String(String),
    /// Boolean
    Bool(bool),
    /// Date in ISO 8601 (`YYYY-MM-DD`)
    Date(String),
    /// Time duration in ISO 8601 (`PThhHmmMssS`)
    Time(String),
    /// Empty cell
    #[default]
    Empty,
}

/// A grid of cell values as exchanged with the book reader and writer.
///
/// Reading a sheet yields a rectangular grid padded with
/// [`CellValue::Empty`] up to the sheet column count; writing accepts
/// ragged rows.
pub type Grid = Vec<Vec<CellValue>>;

impl CellValue {
    /// Whether the cell is empty
    pub fn is_empty(&self) -> bool {
        *self == CellValue::Empty
    }

    /// Try getting int value
    pub fn get_int(&self) -> Option<i64> {
        if let CellValue::Int(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    /// Try getting float value
    pub fn get_float(&self) -> Option<f64> {
        if let CellValue::Float(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    /// Try getting bool value
    pub fn get_bool(&self) -> Option<bool> {
        if let CellValue::Bool(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    /// Try getting string value
    pub fn get_string(&self) -> Option<&str> {
        if let CellValue::String(v) = self {
            Some(&**v)
        } else {
            None
        }
    }

    /// Value as float, converting ints
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(v) => Some(*v as f64),
            CellValue::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CellValue::Int(v) => write!(f, "{v}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::String(v) => write!(f, "{v}"),
            CellValue::Bool(v) => write!(f, "{v}"),
            CellValue::Date(v) => write!(f, "{v}"),
            CellValue::Time(v) => write!(f, "{v}"),
            CellValue::Empty => Ok(()),
        }
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> CellValue {
        CellValue::Int(v)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> CellValue {
        CellValue::Float(v)
    }
}

impl From<bool> for CellValue {
    fn from(v: bool) -> CellValue {
        CellValue::Bool(v)
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> CellValue {
        CellValue::String(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> CellValue {
        CellValue::String(v.to_string())
    }
}

impl<T> From<Option<T>> for CellValue
where
    CellValue: From<T>,
{
    fn from(v: Option<T>) -> CellValue {
        match v {
            Some(v) => From::from(v),
            None => CellValue::Empty,
        }
    }
}
