//! Polars export of the measurement matrix.

use std::collections::BTreeSet;

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, PolarsResult, Series};
use rwl_model::{MeasurementMatrix, is_missing};

/// Name of the year column in exported frames.
pub const YEAR_COLUMN: &str = "year";

/// Column names for the cores, with `_2`, `_3`, ... appended to repeated
/// labels so every frame column is unique.
pub fn unique_column_names(core_ids: &[String]) -> Vec<String> {
    let mut taken: BTreeSet<String> = BTreeSet::from([YEAR_COLUMN.to_string()]);
    core_ids
        .iter()
        .map(|id| {
            let mut name = id.clone();
            let mut suffix = 2;
            while taken.contains(&name) {
                name = format!("{id}_{suffix}");
                suffix += 1;
            }
            taken.insert(name.clone());
            name
        })
        .collect()
}

/// Convert the matrix to a frame: an `Int32` year column followed by one
/// nullable `Float64` column per core.
pub fn to_dataframe(matrix: &MeasurementMatrix) -> PolarsResult<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(matrix.n_cores() + 1);
    columns.push(Series::new(YEAR_COLUMN.into(), matrix.years.clone()).into_column());
    for (col, name) in unique_column_names(&matrix.core_ids).into_iter().enumerate() {
        let values: Vec<Option<f64>> = matrix
            .column(col)
            .into_iter()
            .map(|value| (!is_missing(value)).then_some(value))
            .collect();
        columns.push(Series::new(name.into(), values).into_column());
    }
    DataFrame::new(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rwl_model::MISSING;

    #[test]
    fn repeated_labels_get_suffixes() {
        let ids = vec!["A".to_string(), "A".to_string(), "year".to_string(), "A".to_string()];
        assert_eq!(unique_column_names(&ids), vec!["A", "A_2", "year_2", "A_3"]);
    }

    #[test]
    fn missing_cells_become_nulls() {
        let matrix = MeasurementMatrix::from_columns(
            vec![1990, 1991],
            vec![("ABC01".to_string(), vec![1.5, MISSING])],
        );
        let df = to_dataframe(&matrix).unwrap();
        assert_eq!(df.shape(), (2, 2));
        assert_eq!(df.column("ABC01").unwrap().null_count(), 1);
        assert_eq!(df.column(YEAR_COLUMN).unwrap().i32().unwrap().get(1), Some(1991));
    }
}
