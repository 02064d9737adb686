//! Column splicing for fixed-width character grids.

/// Insert `filler` in front of each column offset of every row.
///
/// Offsets index the original row; they are applied together, so later
/// offsets are not shifted by earlier insertions. Offsets at or past the end
/// of a row are skipped for that row.
pub fn insert_columns(grid: &[Vec<char>], offsets: &[usize], filler: &[char]) -> Vec<Vec<char>> {
    let mut sorted = offsets.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    grid.iter()
        .map(|row| {
            let inserts = sorted.iter().filter(|offset| **offset < row.len()).count();
            let mut spliced = Vec::with_capacity(row.len() + inserts * filler.len());
            let mut pending = sorted.iter().peekable();
            for (col, ch) in row.iter().enumerate() {
                while pending.next_if(|offset| **offset == col).is_some() {
                    spliced.extend_from_slice(filler);
                }
                spliced.push(*ch);
            }
            spliced
        })
        .collect()
}
