//! Property tests: well-formed files pass through untouched.

mod common;

use common::{Series, write_decadal, write_matrix};
use proptest::prelude::*;
use rwl_core::read_str;
use rwl_model::ReadOptions;

fn arb_series() -> impl Strategy<Value = Vec<Series>> {
    prop::collection::vec(
        (1000i32..2000, prop::collection::vec(1i64..=800, 1..45)),
        1..5,
    )
    .prop_map(|cores| {
        cores
            .into_iter()
            .enumerate()
            .map(|(idx, (first_year, values))| Series {
                id: format!("C{idx:03}"),
                first_year,
                values,
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn clean_files_read_back_exactly(series in arb_series()) {
        let output = read_str(&write_decadal(&series), &ReadOptions::default());
        prop_assert!(output.log.is_empty(), "log: {}", output.log.render());
        prop_assert_eq!(output.core_ids().len(), series.len());

        let years = output.years();
        prop_assert!(years.windows(2).all(|pair| pair[1] == pair[0] + 1));
        let first = series.iter().map(|core| core.first_year).min();
        prop_assert_eq!(years.first().copied(), first);

        for core in &series {
            for (offset, value) in core.values.iter().enumerate() {
                let year = core.first_year + offset as i32;
                prop_assert_eq!(output.matrix.value_at(year, &core.id), Some(*value as f64));
            }
        }
    }

    #[test]
    fn reading_is_idempotent(series in arb_series()) {
        let first = read_str(&write_decadal(&series), &ReadOptions::default());
        let second = read_str(&write_matrix(&first.matrix), &ReadOptions::default());
        prop_assert!(second.log.is_empty(), "log: {}", second.log.render());
        prop_assert!(common::same_cells(&first.matrix, &second.matrix));
    }
}
