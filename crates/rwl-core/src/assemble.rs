//! Matrix assembly: parsed cores scattered onto one contiguous year axis.

use rwl_model::{MISSING, MeasurementMatrix, is_missing};

use crate::decade::ParsedCore;

/// One output column, still carrying the lines it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct CoreColumn {
    pub id: String,
    pub lines: Vec<usize>,
    /// Aligned with [`CoreTable::years`]; NaN when missing.
    pub values: Vec<f64>,
}

impl CoreColumn {
    pub fn first_line(&self) -> usize {
        self.lines.first().copied().unwrap_or_default()
    }

    pub fn is_all_missing(&self) -> bool {
        self.values.iter().all(|value| is_missing(*value))
    }

    pub fn same_label(&self, other: &CoreColumn) -> bool {
        self.id.eq_ignore_ascii_case(&other.id)
    }

    /// Element-wise equality with missing cells comparing equal.
    pub fn same_values(&self, other: &CoreColumn) -> bool {
        self.values.len() == other.values.len()
            && self
                .values
                .iter()
                .zip(&other.values)
                .all(|(a, b)| (is_missing(*a) && is_missing(*b)) || a == b)
    }
}

/// Year-by-core working table used by the merge and resolve passes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoreTable {
    pub years: Vec<i32>,
    pub columns: Vec<CoreColumn>,
}

impl CoreTable {
    pub fn is_empty(&self) -> bool {
        self.years.is_empty() || self.columns.is_empty()
    }

    fn row_has_value(&self, row: usize) -> bool {
        self.columns
            .iter()
            .any(|column| column.values.get(row).is_some_and(|value| !is_missing(*value)))
    }

    /// Remove all-missing years at both ends of the axis. Interior years are
    /// kept so the axis stays contiguous.
    pub fn trim_missing_borders(&mut self) {
        let rows = self.years.len();
        let Some(start) = (0..rows).find(|row| self.row_has_value(*row)) else {
            self.years.clear();
            for column in &mut self.columns {
                column.values.clear();
            }
            return;
        };
        let end = (0..rows)
            .rfind(|row| self.row_has_value(*row))
            .map_or(rows, |row| row + 1);
        if start == 0 && end == rows {
            return;
        }
        tracing::debug!(leading = start, trailing = rows - end, "trimming empty years");
        self.years = self.years[start..end].to_vec();
        for column in &mut self.columns {
            column.values = column.values[start..end].to_vec();
        }
    }

    pub fn into_matrix(self) -> MeasurementMatrix {
        if self.is_empty() {
            return MeasurementMatrix::empty();
        }
        let columns = self
            .columns
            .into_iter()
            .map(|column| (column.id, column.values))
            .collect();
        MeasurementMatrix::from_columns(self.years, columns)
    }
}

/// Place every core on the union of their year ranges.
pub fn assemble(cores: Vec<ParsedCore>) -> CoreTable {
    let first = cores
        .iter()
        .filter(|core| core.last_year().is_some())
        .map(|core| core.first_year)
        .min();
    let last = cores.iter().filter_map(ParsedCore::last_year).max();
    let years: Vec<i32> = match (first, last) {
        (Some(first), Some(last)) => (first..=last).collect(),
        _ => Vec::new(),
    };
    let base = years.first().copied().unwrap_or_default();
    let columns = cores
        .into_iter()
        .map(|core| {
            let mut values = vec![MISSING; years.len()];
            let offset = usize::try_from(core.first_year - base).unwrap_or_default();
            for (cell, value) in values.iter_mut().skip(offset).zip(&core.values) {
                if let Some(value) = value {
                    *cell = *value;
                }
            }
            CoreColumn {
                id: core.id,
                lines: core.lines,
                values,
            }
        })
        .collect();
    let mut table = CoreTable { years, columns };
    table.trim_missing_borders();
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(id: &str, first_year: i32, values: &[Option<f64>], line: usize) -> ParsedCore {
        ParsedCore {
            id: id.to_string(),
            first_year,
            values: values.to_vec(),
            lines: vec![line],
        }
    }

    #[test]
    fn union_axis_with_missing_fill() {
        let table = assemble(vec![
            parsed("A", 2000, &[Some(1.0), Some(2.0)], 1),
            parsed("B", 2003, &[Some(5.0)], 2),
        ]);
        assert_eq!(table.years, vec![2000, 2001, 2002, 2003]);
        assert!(is_missing(table.columns[0].values[2]));
        assert!(is_missing(table.columns[1].values[2]));
        assert_eq!(table.columns[1].values[3], 5.0);
    }

    #[test]
    fn empty_edges_are_trimmed() {
        let table = assemble(vec![parsed("A", 2000, &[None, Some(1.0), None], 1)]);
        assert_eq!(table.years, vec![2001]);
        assert_eq!(table.columns[0].values, vec![1.0]);
    }

    #[test]
    fn valueless_cores_produce_an_empty_axis() {
        let table = assemble(vec![parsed("A", 2000, &[], 1)]);
        assert!(table.is_empty());
        assert!(table.into_matrix().is_empty());
    }
}
