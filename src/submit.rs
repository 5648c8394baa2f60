//! Submit adapter for the write endpoint (the sheet's intake script).
//!
//! The script answers cross-origin with an opaque response: status and body
//! are unreadable by the caller. A POST that completes is therefore treated
//! as success, and a transport-level failure is the only reportable error.
//! "Accepted and stored" versus "silently rejected" cannot be told apart on
//! this transport; the `Result` seam exists so a transport that can read
//! real status codes can plumb a richer acknowledgment through unchanged
//! call sites.

use thiserror::Error;

use crate::draft::ReportDraft;

/// Acknowledgment text shown to the field agent after a completed POST.
pub const SUBMIT_SUCCESS_MESSAGE: &str = "تم إرسال البيانات بنجاح";

/// Acknowledgment for a completed submission.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SubmitAck {
    pub message: String,
}

/// The only failure path: the POST itself did not complete. Carries the
/// retry prompt shown to the field agent.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("حدث خطأ أثناء إرسال البيانات. يرجى المحاولة مرة أخرى.")]
    Transport(#[source] reqwest::Error),
}

/// Serializes a completed draft and delivers it to the intake script.
pub struct ReportSubmitter {
    client: reqwest::Client,
    script_url: String,
}

impl ReportSubmitter {
    pub fn new(script_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            script_url: script_url.into(),
        }
    }

    /// POST the draft as JSON, fire-and-forget.
    pub async fn submit(&self, draft: &ReportDraft) -> Result<SubmitAck, SubmitError> {
        tracing::info!("Submitting report for douar '{}'", draft.douar);

        self.client
            .post(&self.script_url)
            .json(draft)
            .send()
            .await
            .map_err(SubmitError::Transport)?;

        Ok(SubmitAck { message: SUBMIT_SUCCESS_MESSAGE.to_string() })
    }
}
