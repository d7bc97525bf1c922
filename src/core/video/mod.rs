//! Video generation: request model, HTTP client and submission state.

pub mod client;
pub mod submission;
pub mod types;

pub use client::{build_form, HttpVideoGenerator, VideoGenerator, DEFAULT_ENDPOINT};
pub use submission::{SubmissionResult, SubmissionState, SubmissionStatus, Submitter};
pub use types::*;
