//! Submission status machine: `Idle → Loading → {Success, Error}`.
//!
//! `Success` and `Error` both go straight back to `Loading` on the next
//! trigger. A trigger while `Loading` is refused.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::instrument;

use super::client::VideoGenerator;
use super::types::{PhotoFile, Result, VideoReference, VideoRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Outcome of one submission as the view shows it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmissionResult {
    pub status: SubmissionStatus,
    /// Set only after an HTTP 200.
    pub video_url: Option<String>,
}

impl SubmissionResult {
    pub fn success(reference: VideoReference) -> Self {
        Self {
            status: SubmissionStatus::Success,
            video_url: Some(reference.0),
        }
    }

    pub fn error() -> Self {
        Self {
            status: SubmissionStatus::Error,
            video_url: None,
        }
    }

    pub fn loading(&self) -> bool {
        self.status == SubmissionStatus::Loading
    }
}

/// Display state owned by the wizard view.
#[derive(Debug, Default)]
pub struct SubmissionState {
    current: SubmissionResult,
    attempts: u32,
}

impl SubmissionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> SubmissionStatus {
        self.current.status
    }

    pub fn loading(&self) -> bool {
        self.current.loading()
    }

    pub fn video_url(&self) -> Option<&str> {
        self.current.video_url.as_deref()
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Enter `Loading`, clearing the previous video. Returns false (and
    /// changes nothing) if a submission is already in flight.
    pub fn begin(&mut self) -> bool {
        if self.loading() {
            return false;
        }
        self.attempts += 1;
        self.current = SubmissionResult {
            status: SubmissionStatus::Loading,
            video_url: None,
        };
        true
    }

    /// Apply a finished submission. Ignored unless `Loading`.
    pub fn finish(&mut self, result: SubmissionResult) {
        if !self.loading() {
            log::warn!("Dropping submission result outside of loading state");
            return;
        }
        self.current = match result.status {
            SubmissionStatus::Success => result,
            _ => SubmissionResult::error(),
        };
    }
}

/// Runs one request against a generator and folds any failure into a
/// plain `Error` result. Failure detail goes to the log only.
#[derive(Clone)]
pub struct Submitter {
    generator: Arc<dyn VideoGenerator>,
}

impl Submitter {
    pub fn new(generator: Arc<dyn VideoGenerator>) -> Self {
        Self { generator }
    }

    #[instrument(skip_all, fields(variant = ?request.variant))]
    pub async fn submit(&self, request: VideoRequest) -> SubmissionResult {
        match self.generator.generate(&request).await {
            Ok(reference) => SubmissionResult::success(reference),
            Err(e) => {
                log::error!("Error generating video: {e}");
                SubmissionResult::error()
            }
        }
    }

    /// Resolve the chosen photo path, then submit.
    #[instrument(skip_all, fields(photo = ?photo_path))]
    pub async fn submit_with_photo(
        &self,
        mut request: VideoRequest,
        photo_path: Option<PathBuf>,
    ) -> SubmissionResult {
        match resolve_photo(photo_path).await {
            Ok(photo) => {
                request.photo = photo;
                self.submit(request).await
            }
            Err(e) => {
                log::error!("Error generating video: {e}");
                SubmissionResult::error()
            }
        }
    }
}

async fn resolve_photo(path: Option<PathBuf>) -> Result<Option<PhotoFile>> {
    match path {
        Some(path) => Ok(Some(PhotoFile::load(&path).await?)),
        None => Ok(None),
    }
}
