//! Project list selection: exclusion, date ordering and range slicing.
//!
//! Selection never touches the caller's collection. Every step works on
//! borrowed views, so the records keep their order and membership.

use super::ProjectRecord;
use std::collections::HashSet;

/// Default assumed card height used when reserving space
pub const DEFAULT_ESTIMATED_CARD_HEIGHT: u32 = 520;

/// A 1-indexed display range.
///
/// `start` is the first entry to show. `end` bounds the slice as
/// `min(len, end)`; when unset the range is open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayRange {
    pub start: i64,
    pub end: Option<i64>,
}

impl DisplayRange {
    pub fn new(start: i64, end: Option<i64>) -> Self {
        Self { start, end }
    }

    /// Range covering page `page` (0-based) of `page_size` entries
    pub fn page(page: usize, page_size: usize) -> Self {
        let start = page * page_size + 1;
        let end = (page + 1) * page_size;
        Self {
            start: start as i64,
            end: Some(end as i64),
        }
    }

    /// Convert into a 0-indexed half-open `[start, end)` over `len` entries.
    ///
    /// The returned bounds always satisfy `start <= end <= len`.
    pub fn to_bounds(self, len: usize) -> (usize, usize) {
        let start = usize::try_from(self.start.saturating_sub(1).max(0)).unwrap_or(usize::MAX);
        let end = match self.end {
            Some(end) => usize::try_from(end.max(0)).unwrap_or(usize::MAX).min(len),
            None => len,
        };
        let start = start.min(end);
        (start, end)
    }
}

/// Options for [`select`], with documented defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSelection {
    /// Slugs to omit; empty means no exclusion
    pub exclude: HashSet<String>,
    /// Entries to show; everything when `None`
    pub range: Option<DisplayRange>,
    /// Cards to reserve vertical space for; zero or negative reserves nothing
    pub reserve_count: i64,
    /// Assumed height per card, only used for the reservation
    pub estimated_card_height: u32,
}

impl Default for ListSelection {
    fn default() -> Self {
        Self {
            exclude: HashSet::new(),
            range: None,
            reserve_count: 0,
            estimated_card_height: DEFAULT_ESTIMATED_CARD_HEIGHT,
        }
    }
}

impl ListSelection {
    /// Exclude the given slugs
    pub fn excluding<I, S>(mut self, slugs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(slugs.into_iter().map(Into::into));
        self
    }

    /// Restrict to a display range
    pub fn with_range(mut self, range: DisplayRange) -> Self {
        self.range = Some(range);
        self
    }

    /// Reserve space for `count` cards of `card_height` each
    pub fn reserving(mut self, count: i64, card_height: u32) -> Self {
        self.reserve_count = count;
        self.estimated_card_height = card_height;
        self
    }
}

/// Result of a selection: the records to display and an optional
/// minimum height for the list container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<'a> {
    pub projects: Vec<&'a ProjectRecord>,
    pub min_layout_height: Option<u64>,
}

impl Selection<'_> {
    /// Slugs in display order
    pub fn slugs(&self) -> Vec<&str> {
        self.projects.iter().map(|p| p.slug.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }
}

/// Filter, sort and slice `records` for display.
pub fn select<'a>(records: &'a [ProjectRecord], options: &ListSelection) -> Selection<'a> {
    let mut ordered = filter_excluded(records, &options.exclude);
    sort_by_published_desc(&mut ordered);
    let filtered_len = ordered.len();

    let projects = match options.range {
        Some(range) => slice_range(ordered, range),
        None => ordered,
    };

    let min_layout_height = reserved_height(options.reserve_count, options.estimated_card_height);

    tracing::debug!(
        total = records.len(),
        filtered = filtered_len,
        shown = projects.len(),
        ?min_layout_height,
        "Selected projects"
    );

    Selection {
        projects,
        min_layout_height,
    }
}

/// Number of records left once exclusions are applied
pub fn count_visible(records: &[ProjectRecord], exclude: &HashSet<String>) -> usize {
    records
        .iter()
        .filter(|record| !exclude.contains(&record.slug))
        .count()
}

/// Borrow every record whose slug is not excluded, keeping input order
pub fn filter_excluded<'a>(
    records: &'a [ProjectRecord],
    exclude: &HashSet<String>,
) -> Vec<&'a ProjectRecord> {
    records
        .iter()
        .filter(|record| !exclude.contains(&record.slug))
        .collect()
}

/// Newest first. Undated records sort after every dated one; ties keep
/// their relative order.
pub fn sort_by_published_desc(records: &mut [&ProjectRecord]) {
    // `None < Some(_)`, so comparing b to a puts undated records last.
    records.sort_by(|a, b| b.published_at.cmp(&a.published_at));
}

/// Keep the 1-indexed `range` of an ordered list
pub fn slice_range<T>(mut ordered: Vec<T>, range: DisplayRange) -> Vec<T> {
    let (start, end) = range.to_bounds(ordered.len());
    ordered.truncate(end);
    ordered.drain(..start);
    ordered
}

/// Minimum container height for `reserve_count` cards, if any
pub fn reserved_height(reserve_count: i64, estimated_card_height: u32) -> Option<u64> {
    if reserve_count > 0 {
        Some((reserve_count as u64).saturating_mul(u64::from(estimated_card_height)))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn record(slug: &str, published_at: &str) -> ProjectRecord {
        ProjectRecord::new(slug, slug.to_uppercase()).published(published_at)
    }

    fn five_records() -> Vec<ProjectRecord> {
        vec![
            record("one", "2024-05-01"),
            record("two", "2024-04-01"),
            record("three", "2024-03-01"),
            record("four", "2024-02-01"),
            record("five", "2024-01-01"),
        ]
    }

    #[test]
    fn test_end_to_end_exclude_and_order() {
        let records = vec![
            record("a", "2023-01-01"),
            record("b", "2024-01-01"),
            record("c", "2022-01-01"),
        ];
        let options = ListSelection::default().excluding(["c"]);

        let selection = select(&records, &options);
        insta::assert_debug_snapshot!(selection.slugs(), @r###"
        [
            "b",
            "a",
        ]
        "###);
        assert_eq!(selection.min_layout_height, None);
    }

    #[test]
    fn test_range_absent_selects_everything() {
        let records = five_records();
        let selection = select(&records, &ListSelection::default());
        assert_eq!(selection.len(), 5);
    }

    #[test]
    fn test_range_two_to_four() {
        let records = five_records();
        let options = ListSelection::default().with_range(DisplayRange::new(2, Some(4)));

        let selection = select(&records, &options);
        assert_eq!(selection.slugs(), vec!["two", "three", "four"]);
    }

    #[test]
    fn test_open_ended_range() {
        let records = five_records();
        let options = ListSelection::default().with_range(DisplayRange::new(2, None));

        let selection = select(&records, &options);
        assert_eq!(selection.slugs(), vec!["two", "three", "four", "five"]);
    }

    #[test]
    fn test_first_entry_only() {
        let records = five_records();
        let options = ListSelection::default().with_range(DisplayRange::new(1, Some(1)));

        assert_eq!(select(&records, &options).slugs(), vec!["one"]);
    }

    #[test]
    fn test_range_start_beyond_length_is_empty() {
        let records = five_records();
        let options = ListSelection::default().with_range(DisplayRange::new(9, None));
        assert!(select(&records, &options).is_empty());
    }

    #[test]
    fn test_range_end_before_start_is_empty() {
        let records = five_records();
        let options = ListSelection::default().with_range(DisplayRange::new(4, Some(2)));
        assert!(select(&records, &options).is_empty());
    }

    #[test]
    fn test_non_positive_start_clamps_to_first() {
        let records = five_records();
        let options = ListSelection::default().with_range(DisplayRange::new(-3, Some(2)));
        assert_eq!(select(&records, &options).slugs(), vec!["one", "two"]);
    }

    #[test]
    fn test_negative_end_is_empty() {
        let records = five_records();
        let options = ListSelection::default().with_range(DisplayRange::new(1, Some(-1)));
        assert!(select(&records, &options).is_empty());
    }

    #[test]
    fn test_page_ranges() {
        assert_eq!(DisplayRange::page(0, 3), DisplayRange::new(1, Some(3)));
        assert_eq!(DisplayRange::page(2, 3), DisplayRange::new(7, Some(9)));
        assert_eq!(DisplayRange::page(1, 3).to_bounds(5), (3, 5));
    }

    #[test]
    fn test_reservation() {
        assert_eq!(reserved_height(3, 500), Some(1500));
        assert_eq!(reserved_height(0, 500), None);
        assert_eq!(reserved_height(-2, 500), None);

        let records = five_records();
        let options = ListSelection::default().reserving(2, DEFAULT_ESTIMATED_CARD_HEIGHT);
        assert_eq!(select(&records, &options).min_layout_height, Some(1040));
    }

    #[test]
    fn test_duplicate_exclusions_have_no_extra_effect() {
        let records = five_records();
        let once = ListSelection::default().excluding(["two"]);
        let twice = ListSelection::default().excluding(["two", "two"]);
        assert_eq!(select(&records, &once), select(&records, &twice));
    }

    #[test]
    fn test_undated_records_sort_last_in_original_order() {
        let records = vec![
            ProjectRecord::new("undated-1", "U1"),
            record("old", "2020-01-01"),
            ProjectRecord::new("undated-2", "U2").published("not a date"),
            record("new", "2024-01-01"),
        ];

        let selection = select(&records, &ListSelection::default());
        assert_eq!(
            selection.slugs(),
            vec!["new", "old", "undated-1", "undated-2"]
        );
    }

    #[test]
    fn test_ties_keep_input_order() {
        let records = vec![
            record("x", "2024-01-01"),
            record("y", "2024-01-01"),
            record("z", "2024-01-01"),
        ];
        let selection = select(&records, &ListSelection::default());
        assert_eq!(selection.slugs(), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_count_visible() {
        let records = five_records();
        let exclude: HashSet<String> = ["one", "missing"].iter().map(|s| s.to_string()).collect();
        assert_eq!(count_visible(&records, &exclude), 4);
    }

    fn arb_records() -> impl Strategy<Value = Vec<ProjectRecord>> {
        // Few distinct days so ties and undated records show up often.
        prop::collection::vec(prop::option::of(0i64..40), 0..24).prop_map(|days| {
            days.into_iter()
                .enumerate()
                .map(|(idx, day)| {
                    let mut record = ProjectRecord::new(format!("p{idx}"), format!("P{idx}"));
                    record.published_at =
                        day.and_then(|d| chrono::DateTime::from_timestamp(d * 86_400, 0));
                    record
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_input_is_not_mutated(
            records in arb_records(),
            excluded in prop::collection::vec(0usize..24, 0..6),
            start in -2i64..30,
            end in prop::option::of(-2i64..30),
        ) {
            let before = records.clone();
            let options = ListSelection::default()
                .excluding(excluded.iter().map(|i| format!("p{i}")))
                .with_range(DisplayRange::new(start, end));
            let _ = select(&records, &options);
            prop_assert_eq!(records, before);
        }

        #[test]
        fn prop_filter_keeps_exactly_non_excluded(
            records in arb_records(),
            excluded in prop::collection::vec(0usize..24, 0..6),
        ) {
            let exclude: HashSet<String> = excluded.iter().map(|i| format!("p{i}")).collect();
            let kept: Vec<&str> = filter_excluded(&records, &exclude)
                .iter()
                .map(|r| r.slug.as_str())
                .collect();
            let expected: Vec<&str> = records
                .iter()
                .filter(|r| !exclude.contains(&r.slug))
                .map(|r| r.slug.as_str())
                .collect();
            prop_assert_eq!(kept, expected);
        }

        #[test]
        fn prop_output_is_newest_first(records in arb_records()) {
            let selection = select(&records, &ListSelection::default());
            prop_assert_eq!(selection.len(), records.len());
            for pair in selection.projects.windows(2) {
                prop_assert!(pair[0].published_at >= pair[1].published_at);
            }
        }

        #[test]
        fn prop_range_matches_slice_of_full_order(
            records in arb_records(),
            start in -2i64..30,
            end in prop::option::of(-2i64..30),
        ) {
            let full = select(&records, &ListSelection::default());
            let ranged = select(
                &records,
                &ListSelection::default().with_range(DisplayRange::new(start, end)),
            );
            let (lo, hi) = DisplayRange::new(start, end).to_bounds(full.len());
            prop_assert_eq!(ranged.slugs(), full.slugs()[lo..hi].to_vec());
        }
    }
}
