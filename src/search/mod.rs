//! Participant Query Module
//!
//! Read side of the registry: filtered, paginated listing plus the lookups the
//! browser UI needs.
//!
//! ## Responsibilities
//! - **Filtering**: Conjunctive predicates over the stored participants (substring
//!   matches on `p_no`, `mobile_no`, `name`; exact matches on `trade`, `gender`).
//! - **Pagination**: 1-indexed pages with `total`, `totalPages`, `hasNext`, `hasPrev`.
//! - **Lookups**: Detail by `p_no` and the distinct trades/genders used to fill
//!   filter dropdowns.
//!
//! ## Submodules
//! - **`engine`**: Filter evaluation, pagination and distinct-value extraction.
//! - **`handlers`**: HTTP request handlers for the Axum web server.
//! - **`types`**: Query parameters, filters and response DTOs.

pub mod engine;
pub mod handlers;
pub mod types;
