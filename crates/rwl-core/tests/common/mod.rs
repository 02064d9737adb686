//! Fixed-width fixture writers shared by the pipeline tests.

#![allow(dead_code)]

use rwl_model::{MeasurementMatrix, is_missing};

/// Core series to serialize.
#[derive(Debug, Clone)]
pub struct Series {
    pub id: String,
    pub first_year: i32,
    pub values: Vec<i64>,
}

/// One decade row: id padded to 8 columns, 4-column year, 6-column fields.
pub fn row<S: AsRef<str>>(id: &str, year: i32, fields: &[S]) -> String {
    let mut line = format!("{id:<8}{year:>4}");
    for field in fields {
        line.push_str(&format!("{:>6}", field.as_ref()));
    }
    line
}

/// Join rows into file content.
pub fn file(rows: &[String]) -> String {
    let mut content = rows.join("\n");
    content.push('\n');
    content
}

fn write_core(out: &mut Vec<String>, id: &str, first_year: i32, fields: &[String]) {
    let mut year = first_year;
    let mut rest = fields;
    let mut last_len = 0;
    while !rest.is_empty() {
        let room = usize::try_from(10 - year.rem_euclid(10)).unwrap_or(10);
        let (head, tail) = rest.split_at(room.min(rest.len()));
        out.push(row(id, year, head));
        last_len = head.len();
        year = year - year.rem_euclid(10) + 10;
        rest = tail;
    }
    if last_len > 0 && last_len < 10 {
        if let Some(last) = out.last_mut() {
            last.push_str(&format!("{:>6}", "999"));
        }
    } else {
        out.push(row(id, year, &["999"]));
    }
}

/// Ten consecutive integer fields starting at `start`.
pub fn ten(start: i64) -> Vec<String> {
    (start..start + 10).map(|value| value.to_string()).collect()
}

/// Serialize clean series in the standard decadal convention.
pub fn write_decadal(series: &[Series]) -> String {
    let mut out = Vec::new();
    for core in series {
        let fields: Vec<String> = core.values.iter().map(ToString::to_string).collect();
        write_core(&mut out, &core.id, core.first_year, &fields);
    }
    file(&out)
}

/// Serialize a matrix back to decadal text; interior gaps are written as
/// `-1`, which reads back as missing.
pub fn write_matrix(matrix: &MeasurementMatrix) -> String {
    let mut out = Vec::new();
    let base = matrix.years.first().copied().unwrap_or_default();
    for (col, id) in matrix.core_ids.iter().enumerate() {
        let Some((first, last)) = matrix.core_span(col) else {
            continue;
        };
        let fields: Vec<String> = (first..=last)
            .map(|year| {
                let row = usize::try_from(year - base).unwrap_or_default();
                match matrix.get(row, col) {
                    Some(value) => format!("{value}"),
                    None => "-1".to_string(),
                }
            })
            .collect();
        write_core(&mut out, id, first, &fields);
    }
    file(&out)
}

/// Same axis, labels and cells, with missing cells comparing equal.
pub fn same_cells(a: &MeasurementMatrix, b: &MeasurementMatrix) -> bool {
    a.years == b.years
        && a.core_ids == b.core_ids
        && a.values.iter().zip(&b.values).all(|(left, right)| {
            left.len() == right.len()
                && left
                    .iter()
                    .zip(right)
                    .all(|(x, y)| (is_missing(*x) && is_missing(*y)) || x == y)
        })
}
