//! Filtering, sorting, and pagination for ranch listings.
//!
//! Pure functions over an already-loaded ranch collection: one predicate
//! per filter criterion composed by a coordinator, a comparator per sort
//! field, and 1-indexed page math.

use std::cmp::Ordering;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tap::Pipe;

use crate::domain::{Ranch, RanchStatus};

/// Filter criteria for ranch listings. Empty criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RanchFilter {
    /// Case-insensitive substring match on the ranch name
    pub search: Option<String>,
    pub state: Option<String>,
    pub municipality: Option<String>,
    pub status: Option<RanchStatus>,
}

/// Sortable listing columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RanchSort {
    #[default]
    Name,
    CreatedAt,
    TotalArea,
    Municipality,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// A complete listing request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RanchQuery {
    #[serde(default)]
    pub filter: RanchFilter,
    /// 1-indexed
    pub page: usize,
    pub page_size: usize,
    #[serde(default)]
    pub sort: RanchSort,
    #[serde(default)]
    pub direction: SortDirection,
}

impl Default for RanchQuery {
    fn default() -> Self {
        Self {
            filter: RanchFilter::default(),
            page: 1,
            page_size: 10,
            sort: RanchSort::default(),
            direction: SortDirection::default(),
        }
    }
}

/// One page of listing results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total matches across all pages
    pub total_count: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

// ═══════════════════════════════════════════════════════════════════════════
// PREDICATES
// ═══════════════════════════════════════════════════════════════════════════

/// Check whether a ranch matches the filter (main coordinator).
pub(super) fn matches_filter(ranch: &Ranch, filter: &RanchFilter) -> bool {
    matches_search(ranch, filter)
        && matches_state(ranch, filter)
        && matches_municipality(ranch, filter)
        && matches_status(ranch, filter)
}

fn matches_search(ranch: &Ranch, filter: &RanchFilter) -> bool {
    filter.search.as_ref().is_none_or(|needle| {
        ranch
            .name
            .to_lowercase()
            .contains(&needle.to_lowercase())
    })
}

fn matches_state(ranch: &Ranch, filter: &RanchFilter) -> bool {
    filter
        .state
        .as_ref()
        .is_none_or(|state| &ranch.state_name == state)
}

fn matches_municipality(ranch: &Ranch, filter: &RanchFilter) -> bool {
    filter
        .municipality
        .as_ref()
        .is_none_or(|municipality| &ranch.municipality == municipality)
}

fn matches_status(ranch: &Ranch, filter: &RanchFilter) -> bool {
    filter.status.is_none_or(|status| ranch.status == status)
}

// ═══════════════════════════════════════════════════════════════════════════
// SORTING & PAGINATION
// ═══════════════════════════════════════════════════════════════════════════

fn compare(a: &Ranch, b: &Ranch, sort: RanchSort) -> Ordering {
    match sort {
        RanchSort::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        RanchSort::CreatedAt => a.created_at.cmp(&b.created_at),
        RanchSort::TotalArea => a
            .total_area_hectares
            .partial_cmp(&b.total_area_hectares)
            .unwrap_or(Ordering::Equal),
        RanchSort::Municipality => a.municipality.cmp(&b.municipality),
    }
}

/// Apply filter, sort, and pagination to a loaded ranch collection.
///
/// The query must hold `page >= 1` and `page_size >= 1`; the directory
/// validates requests before calling in here.
pub(super) fn apply_query(ranches: Vec<Ranch>, query: &RanchQuery) -> Page<Ranch> {
    ranches
        .into_iter()
        .filter(|r| matches_filter(r, &query.filter))
        .sorted_by(|a, b| {
            compare(a, b, query.sort).pipe(|ordering| match query.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            })
        })
        .collect::<Vec<Ranch>>()
        .pipe(|matched| paginate(matched, query.page, query.page_size))
}

/// Slice one 1-indexed page out of the full match list.
pub(super) fn paginate<T>(items: Vec<T>, page: usize, page_size: usize) -> Page<T> {
    let total_count = items.len();
    let total_pages = total_count.div_ceil(page_size);

    let items: Vec<T> = items
        .into_iter()
        .skip(page.saturating_sub(1).saturating_mul(page_size))
        .take(page_size)
        .collect();

    Page {
        items,
        total_count,
        page,
        page_size,
        total_pages,
        has_next_page: page < total_pages,
        has_previous_page: page > 1 && total_pages > 0,
    }
}
