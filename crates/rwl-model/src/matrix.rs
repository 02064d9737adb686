//! Year-by-core measurement matrix.

use serde::{Deserialize, Serialize};

/// Missing cell marker.
pub const MISSING: f64 = f64::NAN;

pub fn is_missing(value: f64) -> bool {
    value.is_nan()
}

/// Dense year-by-core table.
///
/// `values[row][col]` holds the measurement of core `core_ids[col]` in year
/// `years[row]`; missing cells are NaN. `years` is ascending and contiguous.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasurementMatrix {
    pub years: Vec<i32>,
    pub core_ids: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl MeasurementMatrix {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from column-major series aligned with `years`.
    pub fn from_columns(years: Vec<i32>, columns: Vec<(String, Vec<f64>)>) -> Self {
        let mut values = vec![Vec::with_capacity(columns.len()); years.len()];
        let mut core_ids = Vec::with_capacity(columns.len());
        for (id, series) in columns {
            for (row, cells) in values.iter_mut().enumerate() {
                cells.push(series.get(row).copied().unwrap_or(MISSING));
            }
            core_ids.push(id);
        }
        Self {
            years,
            core_ids,
            values,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty() || self.core_ids.is_empty()
    }

    pub fn n_years(&self) -> usize {
        self.years.len()
    }

    pub fn n_cores(&self) -> usize {
        self.core_ids.len()
    }

    /// Value at (row, col); `None` when missing or out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values
            .get(row)
            .and_then(|cells| cells.get(col))
            .copied()
            .filter(|value| !is_missing(*value))
    }

    /// Value of the first core labeled `core_id` in `year`.
    pub fn value_at(&self, year: i32, core_id: &str) -> Option<f64> {
        let first = *self.years.first()?;
        let row = usize::try_from(year - first).ok()?;
        let col = self
            .core_ids
            .iter()
            .position(|id| id.eq_ignore_ascii_case(core_id))?;
        self.get(row, col)
    }

    pub fn column(&self, col: usize) -> Vec<f64> {
        self.values
            .iter()
            .map(|cells| cells.get(col).copied().unwrap_or(MISSING))
            .collect()
    }

    /// First and last year with a measurement for the given column.
    pub fn core_span(&self, col: usize) -> Option<(i32, i32)> {
        let present: Vec<i32> = self
            .years
            .iter()
            .zip(&self.values)
            .filter(|(_, cells)| cells.get(col).is_some_and(|value| !is_missing(*value)))
            .map(|(year, _)| *year)
            .collect();
        Some((*present.first()?, *present.last()?))
    }

    /// Count of non-missing cells in a column.
    pub fn measured(&self, col: usize) -> usize {
        self.values
            .iter()
            .filter(|cells| cells.get(col).is_some_and(|value| !is_missing(*value)))
            .count()
    }
}
