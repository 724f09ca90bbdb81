//! Read-side view of a single table

use std::collections::HashMap;

use crate::converter::decode_cell;
use crate::datatype::{CellValue, Grid};
use crate::document::{Table, TableRow};
use crate::errors::Result;

/// A lazily decoded view of one sheet.
///
/// Rows needing repeat expansion are decoded eagerly and memoized while
/// the column count is established; every other cell is decoded straight
/// from the backing table on access. The backing table is never mutated.
pub struct OdsSheet<'a> {
    table: &'a Table,
    /// Logical rows, row repeats already expanded
    rows: Vec<&'a TableRow>,
    /// Expanded value rows, keyed by logical row index
    cached_rows: HashMap<usize, Vec<CellValue>>,
    n_columns: usize,
    auto_detect_int: bool,
}

impl<'a> OdsSheet<'a> {
    pub(crate) fn new(table: &'a Table, auto_detect_int: bool) -> Result<OdsSheet<'a>> {
        // Row repeats expand like cell repeats, except that a blank row
        // never multiplies: real files end with a filler row repeated up
        // to the table size limit.
        let mut rows = Vec::new();
        for row in &table.rows {
            let repeat = if row.is_blank() {
                1
            } else {
                row.rows_repeated.max(1)
            };
            rows.extend(std::iter::repeat(row).take(repeat));
        }

        // The column count needs every repeated row fully expanded; keep
        // those expansions around since re-counting them is the expensive
        // part of reading.
        let mut cached_rows = HashMap::new();
        let mut n_columns = 0;
        let mut index = 0;
        for row in &table.rows {
            let repeat = if row.is_blank() {
                1
            } else {
                row.rows_repeated.max(1)
            };
            let length = if row.cells.iter().any(|c| c.columns_repeated > 1) {
                let expanded = expand_row(row, auto_detect_int)?;
                let length = expanded.len();
                for i in index..index + repeat {
                    cached_rows.insert(i, expanded.clone());
                }
                length
            } else {
                row.cells.len()
            };
            n_columns = n_columns.max(length);
            index += repeat;
        }

        Ok(OdsSheet {
            table,
            rows,
            cached_rows,
            n_columns,
            auto_detect_int,
        })
    }

    /// The table's declared name
    pub fn name(&self) -> &str {
        &self.table.name
    }

    /// Number of logical rows
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Maximum expanded row length across all rows
    pub fn n_columns(&self) -> usize {
        self.n_columns
    }

    /// The value at `(row, column)`.
    ///
    /// Out of range access is not an error: it yields
    /// [`CellValue::Empty`], since ragged sheets are the norm. Decode
    /// errors on malformed literals do propagate.
    pub fn cell_value(&self, row: usize, column: usize) -> Result<CellValue> {
        if let Some(cache) = self.cached_rows.get(&row) {
            return Ok(cache.get(column).cloned().unwrap_or(CellValue::Empty));
        }
        match self.rows.get(row).and_then(|r| r.cells.get(column)) {
            Some(cell) => decode_cell(cell, self.auto_detect_int),
            None => Ok(CellValue::Empty),
        }
    }

    /// The whole sheet as a rectangular grid padded with empty values
    pub fn to_grid(&self) -> Result<Grid> {
        let mut grid = Vec::with_capacity(self.n_rows());
        for row in 0..self.n_rows() {
            let mut values = Vec::with_capacity(self.n_columns);
            for column in 0..self.n_columns {
                values.push(self.cell_value(row, column)?);
            }
            grid.push(values);
        }
        Ok(grid)
    }
}

/// Expands cell repeats into a flat sequence of decoded values.
///
/// Trailing blank cells are dropped before expansion so the column
/// filler at the end of a row (a blank cell repeated to the table width)
/// does not count towards the sheet extent.
fn expand_row(row: &TableRow, auto_detect_int: bool) -> Result<Vec<CellValue>> {
    let mut cells = &row.cells[..];
    while cells.last().is_some_and(|c| c.is_blank()) {
        cells = &cells[..cells.len() - 1];
    }
    let mut values = Vec::new();
    for cell in cells {
        let value = decode_cell(cell, auto_detect_int)?;
        let repeat = cell.columns_repeated.max(1);
        values.extend(std::iter::repeat(value).take(repeat));
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::TableCell;

    fn float_cell(v: &str, repeat: usize) -> TableCell {
        TableCell {
            value_type: Some("float".to_string()),
            value: Some(v.to_string()),
            columns_repeated: repeat,
            ..TableCell::default()
        }
    }

    fn row_of(cells: Vec<TableCell>) -> TableRow {
        TableRow {
            cells,
            ..TableRow::default()
        }
    }

    #[test]
    fn repeated_cells_expand_in_order() {
        let table = Table {
            name: "repeats".to_string(),
            rows: vec![row_of(vec![float_cell("1", 3), float_cell("2", 1)])],
        };
        let sheet = OdsSheet::new(&table, true).unwrap();
        assert_eq!(sheet.n_columns(), 4);
        let expected = [1i64, 1, 1, 2];
        for (column, v) in expected.iter().enumerate() {
            assert_eq!(sheet.cell_value(0, column).unwrap(), CellValue::Int(*v));
        }
    }

    #[test]
    fn column_count_is_the_maximum_row_length() {
        let table = Table {
            name: "ragged".to_string(),
            rows: vec![
                row_of(vec![float_cell("1", 1), float_cell("2", 1), float_cell("3", 1)]),
                row_of(vec![float_cell("4", 1)]),
            ],
        };
        let sheet = OdsSheet::new(&table, true).unwrap();
        assert_eq!(sheet.n_columns(), 3);
        assert_eq!(sheet.cell_value(1, 2).unwrap(), CellValue::Empty);
    }

    #[test]
    fn out_of_range_row_is_empty() {
        let table = Table {
            name: "small".to_string(),
            rows: vec![row_of(vec![float_cell("1", 1)])],
        };
        let sheet = OdsSheet::new(&table, true).unwrap();
        assert_eq!(sheet.cell_value(10, 0).unwrap(), CellValue::Empty);
    }

    #[test]
    fn repeated_rows_expand() {
        let table = Table {
            name: "rows".to_string(),
            rows: vec![TableRow {
                cells: vec![float_cell("7", 1)],
                rows_repeated: 3,
            }],
        };
        let sheet = OdsSheet::new(&table, true).unwrap();
        assert_eq!(sheet.n_rows(), 3);
        assert_eq!(sheet.cell_value(2, 0).unwrap(), CellValue::Int(7));
    }

    #[test]
    fn blank_filler_row_does_not_multiply() {
        let table = Table {
            name: "filler".to_string(),
            rows: vec![
                row_of(vec![float_cell("1", 1)]),
                TableRow {
                    cells: vec![TableCell {
                        columns_repeated: 1024,
                        ..TableCell::default()
                    }],
                    rows_repeated: 1_048_575,
                },
            ],
        };
        let sheet = OdsSheet::new(&table, true).unwrap();
        assert_eq!(sheet.n_rows(), 2);
        assert_eq!(sheet.n_columns(), 1);
    }

    #[test]
    fn decode_errors_fail_construction_of_repeated_rows() {
        let table = Table {
            name: "bad".to_string(),
            rows: vec![row_of(vec![float_cell("oops", 2)])],
        };
        assert!(OdsSheet::new(&table, true).is_err());
    }
}
