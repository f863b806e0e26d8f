//! Participant Registry Library
//!
//! This library crate defines the modules behind the participant registry
//! service. The binary (`main.rs`) wires them into an HTTP server.
//!
//! ## Modules
//! - **`ingestion`**: Spreadsheet upload pipeline. Decodes `.xls`/`.xlsx` files, validates
//!   the schema and every row, and appends new participants while skipping ones already stored.
//! - **`storage`**: The participant store. An ordered in-memory list with `p_no` and
//!   `mobile_no` uniqueness indexes, mirrored to a JSON snapshot after every append.
//! - **`search`**: Filtering and pagination over the store, plus detail and lookup-list queries.
//! - **`app`**: Route table, middleware layers and the JSON 404/500 fallbacks.
//! - **`config`**: Environment and command-line configuration.
//! - **`error`**: The error type returned by handlers and its JSON rendering.

pub mod app;
pub mod config;
pub mod error;
pub mod ingestion;
pub mod search;
pub mod storage;
