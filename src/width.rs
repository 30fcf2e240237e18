//! Column width allocation.
//!
//! Pure functions over width slices, independent of any table state. Both
//! directions move whole units at a time and break ties on equal
//! deficit/slack by column index, first-registered wins.

/// Total of a width slice.
#[must_use]
pub fn sum(widths: &[usize]) -> usize {
    widths.iter().sum()
}

/// Distribute `extra` cells of width, growing columns toward `max_widths`.
///
/// Columns are processed in ascending order of remaining deficit
/// (`max - width`), so near-satisfied columns reach their maximum before
/// columns far from it are touched. Each grant is capped at the deficit;
/// leftover extra beyond `sum(max_widths)` is simply not spent.
pub fn expand(widths: &mut [usize], max_widths: &[usize], mut extra: usize) {
    debug_assert_eq!(widths.len(), max_widths.len());

    let mut order: Vec<usize> = (0..widths.len()).collect();
    // Stable sort keeps column order on equal deficits.
    order.sort_by_key(|&i| max_widths[i].saturating_sub(widths[i]));

    for i in order {
        if extra == 0 {
            return;
        }
        let deficit = max_widths[i].saturating_sub(widths[i]);
        let grant = deficit.min(extra);
        widths[i] += grant;
        extra -= grant;
    }
}

/// Remove `excess` cells of width, squeezing columns toward `floors`.
///
/// Columns are processed in descending order of slack (`width - floor`);
/// no column ever drops below its floor, so excess beyond the total slack
/// is left unresolved and the caller renders overwide.
pub fn shrink(widths: &mut [usize], floors: &[usize], mut excess: usize) {
    debug_assert_eq!(widths.len(), floors.len());

    let slack = |i: usize, ws: &[usize]| ws[i].saturating_sub(floors[i]);

    let mut order: Vec<usize> = (0..widths.len()).collect();
    order.sort_by(|&a, &b| slack(b, widths).cmp(&slack(a, widths)));

    for i in order {
        if excess == 0 {
            return;
        }
        let cut = slack(i, widths).min(excess);
        widths[i] -= cut;
        excess -= cut;
    }
}
