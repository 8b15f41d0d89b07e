//! Unified error type for high-level report operations.

use siteform_capture::CaptureError;
use siteform_schema::SchemaError;
use siteform_traits::StoreError;
use thiserror::Error;

/// The error surface of [`crate::ReportService`].
///
/// Every variant is transparent: validation messages already name the
/// offending section for the user, and store failures are shown verbatim
/// with no retry.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
