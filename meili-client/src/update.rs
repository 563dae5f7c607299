//! Asynchronous update tracking.
//!
//! Most Meilisearch write endpoints only enqueue work and answer with an
//! update id. An [`Update`] wraps that id together with the last known state
//! of the job and can re-fetch it on demand with [`Update::refresh`]. Polling
//! is entirely caller driven.
//!
//! ```text
//! Enqueued ──► Processed
//!     └──────► Failed
//! ```
//!
//! Processed and Failed are terminal.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, error, instrument, warn};

use crate::errors::{CodecError, MeiliError};
use crate::interfaces::{Encoder, EncoderExt, Remote};
use crate::types::Request;

/// Status of an update job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UpdateStatus {
    #[default]
    Enqueued,
    Processed,
    Failed,
}

impl UpdateStatus {
    const VARIANTS: &'static [&'static str] = &["enqueued", "processed", "failed"];

    /// The lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Enqueued => "enqueued",
            Self::Processed => "processed",
            Self::Failed => "failed",
        }
    }

    /// Whether no further transition can happen.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Processed | Self::Failed)
    }
}

impl fmt::Display for UpdateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UpdateStatus {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("enqueued") {
            Ok(Self::Enqueued)
        } else if s.eq_ignore_ascii_case("processed") {
            Ok(Self::Processed)
        } else if s.eq_ignore_ascii_case("failed") {
            Ok(Self::Failed)
        } else {
            Err(CodecError::decode(
                "UpdateStatus",
                format!("unknown update status, expected one of {:?}", Self::VARIANTS),
                s,
            ))
        }
    }
}

impl Serialize for UpdateStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for UpdateStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse()
            .map_err(|_| de::Error::unknown_variant(&raw, Self::VARIANTS))
    }
}

/// Kind and sequence number of an update.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JobType {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub number: i64,
}

/// State of an update as reported by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInfo {
    /// The update identifier.
    pub update_id: i64,
    /// Current status; a freshly enqueued update reports no status.
    #[serde(default)]
    pub status: UpdateStatus,
    /// Kind of update.
    #[serde(rename = "type", default)]
    pub job_type: JobType,
    /// Error message when the update failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Execution time in seconds.
    #[serde(rename = "duration", default)]
    pub duration_seconds: f64,
    /// When the update was enqueued.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enqueued_at: Option<DateTime<FixedOffset>>,
    /// When the update was processed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<DateTime<FixedOffset>>,
}

impl UpdateInfo {
    /// An enqueued update with the given id and nothing else known.
    pub fn enqueued(update_id: i64) -> Self {
        Self {
            update_id,
            status: UpdateStatus::Enqueued,
            job_type: JobType::default(),
            error: None,
            duration_seconds: 0.0,
            enqueued_at: None,
            processed_at: None,
        }
    }
}

/// References needed to re-fetch an update.
#[derive(Clone)]
struct Binding {
    index_uid: String,
    remote: Arc<dyn Remote>,
    encoder: Arc<dyn Encoder>,
}

/// Handle to an asynchronous server-side job.
///
/// Handles returned by [`Index`](crate::Index) are bound to the index,
/// remote and encoder that produced them. A handle is not synchronized:
/// [`refresh`](Self::refresh) takes `&mut self`.
#[derive(Clone)]
pub struct Update {
    info: UpdateInfo,
    binding: Option<Binding>,
}

impl Update {
    pub(crate) fn bound(
        info: UpdateInfo,
        index_uid: impl Into<String>,
        remote: Arc<dyn Remote>,
        encoder: Arc<dyn Encoder>,
    ) -> Self {
        Self {
            info,
            binding: Some(Binding {
                index_uid: index_uid.into(),
                remote,
                encoder,
            }),
        }
    }

    /// Wrap update state that did not come from an index. Such a handle
    /// cannot be refreshed.
    pub fn detached(info: UpdateInfo) -> Self {
        Self {
            info,
            binding: None,
        }
    }

    /// The last known state.
    pub fn info(&self) -> &UpdateInfo {
        &self.info
    }

    pub fn update_id(&self) -> i64 {
        self.info.update_id
    }

    pub fn status(&self) -> UpdateStatus {
        self.info.status
    }

    pub fn job_type(&self) -> &JobType {
        &self.info.job_type
    }

    pub fn error(&self) -> Option<&str> {
        self.info.error.as_deref()
    }

    pub fn duration_seconds(&self) -> f64 {
        self.info.duration_seconds
    }

    pub fn enqueued_at(&self) -> Option<DateTime<FixedOffset>> {
        self.info.enqueued_at
    }

    pub fn processed_at(&self) -> Option<DateTime<FixedOffset>> {
        self.info.processed_at
    }

    /// Uid of the index this update belongs to, if bound.
    pub fn index_uid(&self) -> Option<&str> {
        self.binding.as_ref().map(|b| b.index_uid.as_str())
    }

    /// Whether the update reached Processed or Failed.
    pub fn done(&self) -> bool {
        self.info.status.is_terminal()
    }

    /// Fetch the current state of the update from the server.
    ///
    /// Every field is replaced by the server's answer, except that a terminal
    /// update never goes back to Enqueued: such an answer is logged and
    /// ignored.
    ///
    /// # Errors
    ///
    /// * `IllegalState` - the update is detached
    /// * `OperationError` - the server did not answer 200
    /// * `TransportError` / `CodecError` - from the collaborators
    #[instrument(skip(self), fields(update_id = self.info.update_id))]
    pub async fn refresh(&mut self) -> Result<&mut Self, MeiliError> {
        let binding = self.binding.as_ref().ok_or_else(|| {
            MeiliError::illegal_state(format!(
                "update {} was not produced by an index and cannot be refreshed",
                self.info.update_id
            ))
        })?;

        let path = format!(
            "/indexes/{}/updates/{}",
            binding.index_uid, self.info.update_id
        );
        let response = binding.remote.get(Request::new(path)).await?;

        if response.status() != 200 {
            error!(status = response.status(), "Refreshing update failed");
            return Err(MeiliError::operation("refresh", response.status()));
        }

        let fresh: UpdateInfo = binding.encoder.decode_body(response.body())?;

        if self.done() && !fresh.status.is_terminal() {
            warn!(
                current = %self.info.status,
                reported = %fresh.status,
                "Ignoring status regression of a finished update"
            );
            return Ok(self);
        }

        debug!(status = %fresh.status, "Update refreshed");
        self.info = fresh;
        Ok(self)
    }
}

impl fmt::Debug for Update {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Update")
            .field("info", &self.info)
            .field("index_uid", &self.index_uid())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TransportError;
    use crate::interfaces::Method;
    use crate::json::JsonEncoder;
    use crate::types::Response;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Remote answering with queued responses and recording requests.
    struct QueueRemote {
        responses: Mutex<VecDeque<Response>>,
        requests: Mutex<Vec<(Method, String)>>,
    }

    impl QueueRemote {
        fn new(responses: Vec<Response>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Remote for QueueRemote {
        async fn execute(
            &self,
            method: Method,
            request: Request,
        ) -> Result<Response, TransportError> {
            self.requests
                .lock()
                .unwrap()
                .push((method, request.path().to_string()));
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| TransportError::connection("no response queued"))
        }
    }

    fn ok(body: serde_json::Value) -> Response {
        Response::new(200, Some(serde_json::to_vec(&body).unwrap()))
    }

    fn bound(info: UpdateInfo, remote: Arc<QueueRemote>) -> Update {
        Update::bound(info, "movies", remote, Arc::new(JsonEncoder::new()))
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("ENQUEUED".parse::<UpdateStatus>().unwrap(), UpdateStatus::Enqueued);
        assert_eq!("Processed".parse::<UpdateStatus>().unwrap(), UpdateStatus::Processed);
        assert!("paused".parse::<UpdateStatus>().is_err());
        assert!(UpdateStatus::Failed.is_terminal());
        assert!(!UpdateStatus::Enqueued.is_terminal());
    }

    #[test]
    fn test_decode_minimal_envelope() {
        let info: UpdateInfo = serde_json::from_value(json!({ "updateId": 3 })).unwrap();

        assert_eq!(info, UpdateInfo::enqueued(3));
    }

    #[test]
    fn test_decode_full_envelope() {
        let info: UpdateInfo = serde_json::from_value(json!({
            "status": "failed",
            "updateId": 1,
            "type": { "name": "DocumentsAddition", "number": 4 },
            "error": "document id is missing",
            "duration": 0.076,
            "enqueuedAt": "2020-04-12T18:32:02.581+00:00",
            "processedAt": "2020-04-12T18:32:02.657+00:00"
        }))
        .unwrap();

        assert_eq!(info.status, UpdateStatus::Failed);
        assert_eq!(info.job_type.name, "DocumentsAddition");
        assert_eq!(info.job_type.number, 4);
        assert_eq!(info.error.as_deref(), Some("document id is missing"));
        assert!(info.processed_at.unwrap() > info.enqueued_at.unwrap());
    }

    #[tokio::test]
    async fn test_refresh_updates_in_place() {
        let remote = QueueRemote::new(vec![ok(json!({
            "updateId": 7,
            "status": "processed",
            "duration": 1.5
        }))]);
        let mut update = bound(UpdateInfo::enqueued(7), remote.clone());

        update.refresh().await.unwrap();

        assert!(update.done());
        assert_eq!(update.status(), UpdateStatus::Processed);
        assert_eq!(update.duration_seconds(), 1.5);
        assert_eq!(update.index_uid(), Some("movies"));
        assert_eq!(
            *remote.requests.lock().unwrap(),
            vec![(Method::Get, "/indexes/movies/updates/7".to_string())]
        );
    }

    #[tokio::test]
    async fn test_refresh_keeps_terminal_status() {
        let remote = QueueRemote::new(vec![ok(json!({
            "updateId": 7,
            "status": "enqueued"
        }))]);
        let mut info = UpdateInfo::enqueued(7);
        info.status = UpdateStatus::Processed;
        let mut update = bound(info, remote);

        update.refresh().await.unwrap();

        assert_eq!(update.status(), UpdateStatus::Processed);
    }

    #[tokio::test]
    async fn test_refresh_allows_terminal_to_terminal() {
        let remote = QueueRemote::new(vec![ok(json!({
            "updateId": 7,
            "status": "failed",
            "error": "late failure"
        }))]);
        let mut info = UpdateInfo::enqueued(7);
        info.status = UpdateStatus::Processed;
        let mut update = bound(info, remote);

        update.refresh().await.unwrap();

        assert_eq!(update.status(), UpdateStatus::Failed);
        assert_eq!(update.error(), Some("late failure"));
    }

    #[tokio::test]
    async fn test_refresh_detached_is_illegal_state() {
        let mut update = Update::detached(UpdateInfo::enqueued(1));

        let err = update.refresh().await.unwrap_err();

        assert!(matches!(err, MeiliError::IllegalState(_)));
    }

    #[tokio::test]
    async fn test_refresh_requires_200() {
        let remote = QueueRemote::new(vec![Response::empty(500)]);
        let mut update = bound(UpdateInfo::enqueued(2), remote);

        let err = update.refresh().await.unwrap_err();

        assert_eq!(err, MeiliError::operation("refresh", 500));
        assert_eq!(update.status(), UpdateStatus::Enqueued);
    }

    #[tokio::test]
    async fn test_refresh_propagates_transport_error() {
        let remote = QueueRemote::new(vec![]);
        let mut update = bound(UpdateInfo::enqueued(2), remote);

        let err = update.refresh().await.unwrap_err();

        assert!(matches!(err, MeiliError::TransportError(_)));
    }
}
