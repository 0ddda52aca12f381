//! Receipt-level category resolution.

use crate::models::receipt::Category;

/// Resolve the receipt-level category by plurality vote.
///
/// Categories are counted in first-appearance order and a later
/// category takes the lead only with a strictly greater count, so ties
/// go to the category seen first. An empty input resolves to
/// [`Category::Other`].
pub fn resolve_category<I>(categories: I) -> Category
where
    I: IntoIterator<Item = Category>,
{
    let mut counts: Vec<(Category, usize)> = Vec::new();
    for category in categories {
        match counts.iter_mut().find(|(seen, _)| *seen == category) {
            Some((_, count)) => *count += 1,
            None => counts.push((category, 1)),
        }
    }

    let mut winner: Option<(Category, usize)> = None;
    for (category, count) in counts {
        match winner {
            Some((_, best)) if count <= best => {}
            _ => winner = Some((category, count)),
        }
    }

    winner.map(|(category, _)| category).unwrap_or_default()
}
