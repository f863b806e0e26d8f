use crate::storage::types::ParticipantRecord;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 10;

/// Raw query string of `GET /api/participants`.
///
/// Everything is taken as text so malformed numbers fall back to defaults
/// instead of failing the request.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub p_no: Option<String>,
    pub mobile_no: Option<String>,
    pub name: Option<String>,
    pub trade: Option<String>,
    pub gender: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl SearchParams {
    pub fn filter(&self) -> ParticipantFilter {
        ParticipantFilter {
            p_no: non_empty(&self.p_no),
            mobile_no: non_empty(&self.mobile_no),
            name: non_empty(&self.name),
            trade: non_empty(&self.trade),
            gender: non_empty(&self.gender),
        }
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest {
            page: positive(&self.page).unwrap_or(DEFAULT_PAGE),
            limit: positive(&self.limit).unwrap_or(DEFAULT_LIMIT),
        }
    }
}

/// Optional predicates over participants. All supplied predicates must hold.
///
/// - `p_no`, `name`: case-insensitive substring
/// - `mobile_no`: case-sensitive substring
/// - `trade`, `gender`: exact match
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipantFilter {
    pub p_no: Option<String>,
    pub mobile_no: Option<String>,
    pub name: Option<String>,
    pub trade: Option<String>,
    pub gender: Option<String>,
}

impl ParticipantFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_p_no(mut self, p_no: impl Into<String>) -> Self {
        self.p_no = Some(p_no.into());
        self
    }

    pub fn with_mobile_no(mut self, mobile_no: impl Into<String>) -> Self {
        self.mobile_no = Some(mobile_no.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_trade(mut self, trade: impl Into<String>) -> Self {
        self.trade = Some(trade.into());
        self
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }
}

/// 1-indexed page and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub limit: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
    pub limit: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ParticipantPage {
    pub participants: Vec<ParticipantRecord>,
    pub pagination: Pagination,
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|v| !v.is_empty()).map(str::to_string)
}

fn positive(value: &Option<String>) -> Option<usize> {
    value
        .as_deref()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|n| *n >= 1)
}
