//! Parsing surface: multipart intake, backend dispatch, the single-file
//! pipeline and the batch coordinator.

pub mod batch;
pub mod dispatch;
pub mod handlers;
pub mod pipeline;
pub mod upload;
