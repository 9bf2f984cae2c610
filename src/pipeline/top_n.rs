//! Top-N selection over aggregated rows.

use crate::models::AggregatedRow;

/// Keep the `n` rows with the largest totals, largest first.
///
/// The sort is stable, so rows with equal totals keep their incoming order
/// (first appearance in the dataset when fed from [`super::aggregate`]).
pub fn top_n(mut rows: Vec<AggregatedRow>, n: usize) -> Vec<AggregatedRow> {
    if n == 0 {
        return Vec::new();
    }

    rows.sort_by(|a, b| b.total.total_cmp(&a.total));
    rows.truncate(n);
    rows
}
