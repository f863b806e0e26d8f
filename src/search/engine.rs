use super::types::{PageRequest, Pagination, ParticipantFilter, ParticipantPage};
use crate::storage::types::ParticipantRecord;
use std::collections::BTreeSet;

impl ParticipantFilter {
    pub fn matches(&self, record: &ParticipantRecord) -> bool {
        contains_ignore_case(&record.p_no, self.p_no.as_deref())
            && self
                .mobile_no
                .as_deref()
                .is_none_or(|needle| record.mobile_no.contains(needle))
            && contains_ignore_case(&record.name, self.name.as_deref())
            && self.trade.as_deref().is_none_or(|trade| record.trade == trade)
            && self
                .gender
                .as_deref()
                .is_none_or(|gender| record.gender == gender)
    }
}

/// Filters `records` and returns one page of the matches, in store order.
///
/// Pages past the end yield an empty slice with the usual metadata rather
/// than an error.
pub fn search(
    records: &[ParticipantRecord],
    filter: &ParticipantFilter,
    request: PageRequest,
) -> ParticipantPage {
    let matched: Vec<&ParticipantRecord> = records.iter().filter(|r| filter.matches(r)).collect();

    let total = matched.len();
    let limit = request.limit.max(1);
    let page = request.page;
    let total_pages = total.div_ceil(limit);

    let start = page.saturating_sub(1).saturating_mul(limit).min(total);
    let end = page.saturating_mul(limit).min(total).max(start);

    let participants = matched[start..end].iter().map(|r| (*r).clone()).collect();

    ParticipantPage {
        participants,
        pagination: Pagination {
            total,
            page,
            total_pages,
            limit,
            has_next: page < total_pages,
            has_prev: page > 1,
        },
    }
}

/// Non-empty distinct values of one field, in ascending order.
pub fn distinct_values<F>(records: &[ParticipantRecord], field: F) -> Vec<String>
where
    F: Fn(&ParticipantRecord) -> &str,
{
    records
        .iter()
        .map(field)
        .filter(|value| !value.is_empty())
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn contains_ignore_case(haystack: &str, needle: Option<&str>) -> bool {
    needle.is_none_or(|needle| haystack.to_lowercase().contains(&needle.to_lowercase()))
}
