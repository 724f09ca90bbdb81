//! Conversion between typed ods cells and native scalar values
//!
//! ODF 1.2-19.385 `office:value-type`

use log::debug;

use crate::datatype::CellValue;
use crate::document::TableCell;
use crate::errors::{OdsError, Result};

/// The known `office:value-type` tags.
///
/// An unknown or missing tag resolves to `String`, so cells written by
/// producers using tags this crate does not model still read as their
/// displayed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValueType {
    Boolean,
    Float,
    Percentage,
    Currency,
    Date,
    Time,
    String,
    Void,
}

impl ValueType {
    pub fn from_tag(tag: Option<&str>) -> ValueType {
        match tag {
            Some("boolean") => ValueType::Boolean,
            Some("float") | Some("integer") => ValueType::Float,
            Some("percentage") => ValueType::Percentage,
            Some("currency") => ValueType::Currency,
            Some("date") => ValueType::Date,
            Some("time") => ValueType::Time,
            Some("void") => ValueType::Void,
            Some("string") | None => ValueType::String,
            Some(other) => {
                debug!("unknown value-type '{}', reading as string", other);
                ValueType::String
            }
        }
    }

    /// The attribute carrying the literal value for this type
    pub fn value_token(self) -> &'static str {
        match self {
            ValueType::Boolean => "office:boolean-value",
            ValueType::Date => "office:date-value",
            ValueType::Time => "office:time-value",
            ValueType::String => "office:string-value",
            _ => "office:value",
        }
    }
}

/// Converts a table cell into a native scalar.
///
/// With `auto_detect_int`, floats with a zero fractional part narrow to
/// integers, mirroring how spreadsheets display whole numbers.
pub(crate) fn decode_cell(cell: &TableCell, auto_detect_int: bool) -> Result<CellValue> {
    match ValueType::from_tag(cell.value_type.as_deref()) {
        ValueType::String => Ok(CellValue::String(read_text(cell))),
        ValueType::Void => Ok(CellValue::Empty),
        ValueType::Boolean => match literal(cell)? {
            "true" => Ok(CellValue::Bool(true)),
            "false" => Ok(CellValue::Bool(false)),
            other => Err(OdsError::ParseBool(other.to_string())),
        },
        ValueType::Float => {
            let v: f64 = literal(cell)?.parse()?;
            if auto_detect_int && is_whole(v) {
                Ok(CellValue::Int(v as i64))
            } else {
                Ok(CellValue::Float(v))
            }
        }
        // percentages and currencies are plain floats, never narrowed
        ValueType::Percentage | ValueType::Currency => {
            Ok(CellValue::Float(literal(cell)?.parse()?))
        }
        ValueType::Date => {
            let v = literal(cell)?;
            if !is_iso_date(v) {
                return Err(OdsError::ParseDateTime(v.to_string()));
            }
            Ok(CellValue::Date(v.to_string()))
        }
        ValueType::Time => {
            let v = literal(cell)?;
            if !v.starts_with("PT") && !v.starts_with("-PT") {
                return Err(OdsError::ParseDateTime(v.to_string()));
            }
            Ok(CellValue::Time(v.to_string()))
        }
    }
}

/// Converts a native scalar into a table cell.
///
/// Never fails: every variant has an explicit encoding. Non-string cells
/// carry one paragraph with the formatted literal so the value displays
/// without recalculation.
pub(crate) fn encode_cell(value: &CellValue) -> TableCell {
    match value {
        CellValue::String(s) => TableCell {
            value_type: Some("string".to_string()),
            paragraphs: s.split('\n').map(str::to_string).collect(),
            ..TableCell::default()
        },
        CellValue::Int(v) => typed_cell("float", v.to_string()),
        CellValue::Float(v) => typed_cell("float", v.to_string()),
        CellValue::Bool(v) => typed_cell("boolean", v.to_string()),
        CellValue::Date(v) => typed_cell("date", v.clone()),
        CellValue::Time(v) => typed_cell("time", v.clone()),
        CellValue::Empty => TableCell {
            value_type: Some("void".to_string()),
            ..TableCell::default()
        },
    }
}

fn typed_cell(tag: &str, literal: String) -> TableCell {
    TableCell {
        value_type: Some(tag.to_string()),
        paragraphs: vec![literal.clone()],
        value: Some(literal),
        ..TableCell::default()
    }
}

/// The literal value attribute of a non-string typed cell
fn literal(cell: &TableCell) -> Result<&str> {
    cell.value
        .as_deref()
        .ok_or(OdsError::MissingValue("office:value"))
}

/// Element content of a string cell: paragraphs are lines
fn read_text(cell: &TableCell) -> String {
    if let Some(v) = &cell.value {
        // office:string-value takes precedence over the element content
        return v.clone();
    }
    cell.paragraphs.join("\n")
}

fn is_whole(v: f64) -> bool {
    v.fract() == 0.0 && v.is_finite() && v >= i64::MIN as f64 && v <= i64::MAX as f64
}

/// `YYYY-MM-DD`, optionally followed by a time part
fn is_iso_date(v: &str) -> bool {
    let b = v.as_bytes();
    b.len() >= 10
        && b[..4].iter().all(u8::is_ascii_digit)
        && b[4] == b'-'
        && b[5..7].iter().all(u8::is_ascii_digit)
        && b[7] == b'-'
        && b[8..10].iter().all(u8::is_ascii_digit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn typed(tag: &str, value: &str) -> TableCell {
        TableCell {
            value_type: Some(tag.to_string()),
            value: Some(value.to_string()),
            ..TableCell::default()
        }
    }

    #[test]
    fn whole_floats_narrow_to_int() {
        let cell = typed("float", "10");
        assert_eq!(decode_cell(&cell, true).unwrap(), CellValue::Int(10));
        assert_eq!(decode_cell(&cell, false).unwrap(), CellValue::Float(10.0));
    }

    #[test]
    fn fractional_floats_stay_float() {
        let cell = typed("float", "10.5");
        assert_eq!(decode_cell(&cell, true).unwrap(), CellValue::Float(10.5));
    }

    #[test]
    fn percentage_never_narrows() {
        let cell = typed("percentage", "2");
        assert_eq!(decode_cell(&cell, true).unwrap(), CellValue::Float(2.0));
    }

    #[test]
    fn malformed_float_is_an_error() {
        let cell = typed("float", "not a number");
        assert!(matches!(
            decode_cell(&cell, true),
            Err(OdsError::ParseFloat(_))
        ));
    }

    #[rstest]
    #[case("true", true)]
    #[case("false", false)]
    fn boolean_literals(#[case] literal: &str, #[case] expected: bool) {
        let cell = typed("boolean", literal);
        assert_eq!(
            decode_cell(&cell, true).unwrap(),
            CellValue::Bool(expected)
        );
    }

    #[test]
    fn malformed_boolean_is_an_error() {
        let cell = typed("boolean", "TRUE");
        assert!(matches!(
            decode_cell(&cell, true),
            Err(OdsError::ParseBool(_))
        ));
    }

    #[test]
    fn malformed_date_is_an_error() {
        let cell = typed("date", "tomorrow");
        assert!(matches!(
            decode_cell(&cell, true),
            Err(OdsError::ParseDateTime(_))
        ));
    }

    #[rstest]
    #[case("date", "2014-12-25", CellValue::Date("2014-12-25".to_string()))]
    #[case("time", "PT11H22M33S", CellValue::Time("PT11H22M33S".to_string()))]
    fn date_and_time_literals(
        #[case] tag: &str,
        #[case] literal: &str,
        #[case] expected: CellValue,
    ) {
        let cell = typed(tag, literal);
        assert_eq!(decode_cell(&cell, true).unwrap(), expected);
    }

    #[test]
    fn unknown_tag_reads_as_string() {
        let cell = TableCell {
            value_type: Some("fraction".to_string()),
            paragraphs: vec!["1/2".to_string()],
            ..TableCell::default()
        };
        assert_eq!(
            decode_cell(&cell, true).unwrap(),
            CellValue::String("1/2".to_string())
        );
    }

    #[test]
    fn string_paragraphs_join_with_newline() {
        let cell = TableCell {
            value_type: Some("string".to_string()),
            paragraphs: vec!["line1".to_string(), "line2".to_string()],
            ..TableCell::default()
        };
        assert_eq!(
            decode_cell(&cell, true).unwrap(),
            CellValue::String("line1\nline2".to_string())
        );
    }

    #[test]
    fn cell_without_content_reads_as_empty_string() {
        let cell = TableCell::default();
        assert_eq!(
            decode_cell(&cell, true).unwrap(),
            CellValue::String(String::new())
        );
    }

    #[test]
    fn void_cell_reads_as_empty() {
        let cell = TableCell {
            value_type: Some("void".to_string()),
            ..TableCell::default()
        };
        assert_eq!(decode_cell(&cell, true).unwrap(), CellValue::Empty);
    }

    #[test]
    fn multiline_string_encodes_one_paragraph_per_line() {
        let cell = encode_cell(&CellValue::String("line1\nline2".to_string()));
        assert_eq!(cell.value_type.as_deref(), Some("string"));
        assert_eq!(cell.paragraphs, vec!["line1", "line2"]);
    }

    #[test]
    fn empty_string_encodes_one_empty_paragraph() {
        let cell = encode_cell(&CellValue::String(String::new()));
        assert_eq!(cell.paragraphs, vec![""]);
    }

    #[test]
    fn ints_encode_as_float_cells() {
        let cell = encode_cell(&CellValue::Int(42));
        assert_eq!(cell.value_type.as_deref(), Some("float"));
        assert_eq!(cell.value.as_deref(), Some("42"));
        assert_eq!(cell.paragraphs, vec!["42"]);
    }

    #[test]
    fn bools_encode_lowercase() {
        let cell = encode_cell(&CellValue::Bool(true));
        assert_eq!(cell.value_type.as_deref(), Some("boolean"));
        assert_eq!(cell.value.as_deref(), Some("true"));
    }

    #[test]
    fn empty_encodes_as_void() {
        let cell = encode_cell(&CellValue::Empty);
        assert_eq!(cell.value_type.as_deref(), Some("void"));
        assert!(cell.value.is_none() && cell.paragraphs.is_empty());
    }
}
