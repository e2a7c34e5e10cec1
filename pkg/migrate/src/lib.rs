//! The two migration passes: `extract` writes monitor definition files,
//! `upload` submits them and records the created ids.

pub mod extract;
pub mod files;
pub mod upload;

pub use extract::{ExtractOutcome, ExtractRequest, ExtractSummary, SkipReason, extract_monitors};
pub use upload::{UploadOutcome, UploadReport, upload_monitors};
