//! Ingestion Service Module
//!
//! Turns an uploaded spreadsheet into stored participants.
//!
//! ## Workflow
//! 1. **Accept**: The upload handler takes the `excelFile` multipart field and rejects
//!    anything that is not an `.xls`/`.xlsx` file before parsing.
//! 2. **Decode**: The first worksheet is read into rows keyed by header name.
//! 3. **Validate**: Required columns are checked, then every row. All row errors are
//!    collected so the user can fix the sheet in one pass; any error rejects the batch.
//! 4. **Deduplicate**: Rows whose `P.No` or `Mobile No` already exist in the store are
//!    skipped and counted.
//! 5. **Store**: The remaining rows are appended in sheet order and the snapshot is rewritten.

pub mod handlers;
pub mod spreadsheet;
pub mod types;
pub mod validator;
