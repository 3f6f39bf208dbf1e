use crate::coerce::coerce_date;
use crate::config::SortMode;
use crate::model::Donor;
use crate::normalize::fold;
use std::cmp::Reverse;

pub const PODIUM_SIZE: usize = 3;

/// Case-insensitive substring search over name and resolved identity.
/// An empty query returns the list unchanged. Ranks are never touched.
pub fn apply_filter(donors: &[Donor], query: &str) -> Vec<Donor> {
    let q = fold(query.trim());
    if q.is_empty() {
        return donors.to_vec();
    }
    donors
        .iter()
        .filter(|d| matches_query(d, &q))
        .cloned()
        .collect()
}

/// `query` must already be folded.
pub fn matches_query(donor: &Donor, query: &str) -> bool {
    if fold(&donor.name).contains(query) {
        return true;
    }
    match &donor.social {
        Some(social) => [&social.username, &social.uid, &social.platform]
            .iter()
            .any(|field| fold(field).contains(query)),
        None => false,
    }
}

/// Reorders a view in place. Stable, so equal keys keep rank order.
pub fn sort_view(view: &mut [Donor], mode: SortMode) {
    match mode {
        SortMode::AmountDesc => view.sort_by_key(|d| Reverse(d.amount)),
        SortMode::AmountAsc => view.sort_by_key(|d| d.amount),
        SortMode::DateDesc => view.sort_by_cached_key(|d| Reverse(coerce_date(&d.date))),
        SortMode::DateAsc => view.sort_by_cached_key(|d| coerce_date(&d.date)),
        SortMode::NameAsc => view.sort_by_cached_key(|d| (fold(&d.name), d.rank)),
    }
}

pub fn build_view(donors: &[Donor], query: &str, mode: SortMode) -> Vec<Donor> {
    let mut view = apply_filter(donors, query);
    sort_view(&mut view, mode);
    view
}

/// The global top three by amount. Ignores search and sort mode.
pub fn podium(donors: &[Donor]) -> Vec<&Donor> {
    let mut top: Vec<&Donor> = donors.iter().collect();
    top.sort_by_key(|d| (Reverse(d.amount), d.rank));
    top.truncate(PODIUM_SIZE);
    top
}
