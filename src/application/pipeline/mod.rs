//! Request pipeline between resource stores and the HTTP transport.

mod request_pipeline;

pub use request_pipeline::{RequestPipeline, TrackedRequest};
