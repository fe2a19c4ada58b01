//! Simulated document uploads.
//!
//! Each document kind owns at most one [`DocumentSlot`]. Choosing a file
//! starts a ticker that advances the slot's progress until it succeeds. The
//! tickers live in a registry on the simulator keyed by document kind, so
//! replacing or removing a slot (or dropping the simulator) aborts its ticker.
//! Ticks that were already queued carry the upload id they belong to and are
//! ignored once that upload is gone.

use super::validate::{self, ChosenFile, ValidationError};
use crate::app::event::{AppEvent, UploadId};
use crate::catalog::{DocumentKind, DocumentSpec};
use crate::config::{SubmissionConfig, UploadConfig};
use crate::timer::{self, TimerHandle};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tokio::sync::mpsc;

static NEXT_UPLOAD_ID: AtomicU64 = AtomicU64::new(1);

fn allocate_upload_id() -> UploadId {
    NEXT_UPLOAD_ID.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    Idle,
    Uploading,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSlot {
    pub upload_id: UploadId,
    pub kind: DocumentKind,
    pub file_name: String,
    pub status: UploadStatus,
    pub progress: u8,
    pub error: Option<String>,
}

impl DocumentSlot {
    fn new(upload_id: UploadId, kind: DocumentKind, file_name: String) -> Self {
        Self {
            upload_id,
            kind,
            file_name,
            status: UploadStatus::Idle,
            progress: 0,
            error: None,
        }
    }

    fn begin(&mut self) {
        self.status = UploadStatus::Uploading;
        self.progress = 0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Editing,
    Submitting,
    Submitted,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("missing required documents: {}", .0.join(", "))]
    MissingDocuments(Vec<String>),
    #[error("application already submitted")]
    AlreadySubmitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The upload is gone, replaced, or no longer uploading.
    Ignored,
    Progressed(u8),
    Completed(DocumentKind),
}

pub struct UploadSimulator {
    config: UploadConfig,
    submission_config: SubmissionConfig,
    catalogue: &'static [DocumentSpec],
    slots: BTreeMap<DocumentKind, DocumentSlot>,
    tickers: HashMap<DocumentKind, TimerHandle>,
    errors: Vec<ValidationError>,
    submission: SubmissionState,
    submission_timer: Option<TimerHandle>,
    event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl UploadSimulator {
    pub fn new(
        config: UploadConfig,
        submission_config: SubmissionConfig,
        catalogue: &'static [DocumentSpec],
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            config,
            submission_config,
            catalogue,
            slots: BTreeMap::new(),
            tickers: HashMap::new(),
            errors: Vec::new(),
            submission: SubmissionState::Editing,
            submission_timer: None,
            event_tx,
        }
    }

    pub fn catalogue(&self) -> &'static [DocumentSpec] {
        self.catalogue
    }

    /// Validate `file` and start uploading it into the slot for `kind`,
    /// replacing whatever was there. A rejected file leaves every slot as it
    /// was and is added to the error list.
    pub fn choose_file(&mut self, kind: DocumentKind, file: ChosenFile) -> Result<UploadId, ValidationError> {
        if let Err(err) = validate::check(&file, &self.config) {
            tracing::warn!(%kind, error = %err, "file rejected");
            self.errors.push(err.clone());
            return Err(err);
        }

        // Dropping the old handle aborts the previous upload's ticker
        self.tickers.remove(&kind);

        let upload_id = allocate_upload_id();
        let mut slot = DocumentSlot::new(upload_id, kind, file.name);
        slot.begin();
        tracing::info!(%kind, upload_id, file = %slot.file_name, size = file.size_bytes, "upload started");
        self.slots.insert(kind, slot);

        let ticker = timer::every(self.config.tick_interval(), self.event_tx.clone(), move || {
            AppEvent::UploadTick { upload_id }
        });
        self.tickers.insert(kind, ticker);
        Ok(upload_id)
    }

    /// Mark the slot for `kind` as failed, replacing any earlier upload. Used
    /// when the picked file cannot be read at all.
    pub fn record_failure(&mut self, kind: DocumentKind, file_name: &str, message: String) {
        self.tickers.remove(&kind);
        let mut slot = DocumentSlot::new(allocate_upload_id(), kind, validate::display_name(file_name));
        slot.status = UploadStatus::Error;
        tracing::warn!(%kind, file = %slot.file_name, error = %message, "upload failed");
        slot.error = Some(message);
        self.slots.insert(kind, slot);
    }

    /// Apply one progress tick for `upload_id`.
    pub fn tick(&mut self, upload_id: UploadId) -> TickOutcome {
        let Some(slot) = self
            .slots
            .values_mut()
            .find(|s| s.upload_id == upload_id && s.status == UploadStatus::Uploading)
        else {
            return TickOutcome::Ignored;
        };

        let next = slot.progress.saturating_add(self.config.step());
        if next >= 100 {
            slot.progress = 100;
            slot.status = UploadStatus::Success;
            let kind = slot.kind;
            self.tickers.remove(&kind);
            tracing::info!(%kind, upload_id, "upload complete");
            TickOutcome::Completed(kind)
        } else {
            slot.progress = next;
            TickOutcome::Progressed(next)
        }
    }

    /// Delete the slot for `kind` whatever its state. Idempotent.
    pub fn remove_slot(&mut self, kind: DocumentKind) {
        self.tickers.remove(&kind);
        if self.slots.remove(&kind).is_some() {
            tracing::info!(%kind, "upload removed");
        }
    }

    /// Remove every slot and stop every ticker.
    pub fn clear(&mut self) {
        self.tickers.clear();
        self.slots.clear();
        tracing::info!("uploads cleared");
    }

    pub fn slot(&self, kind: DocumentKind) -> Option<&DocumentSlot> {
        self.slots.get(&kind)
    }

    pub fn slots(&self) -> impl Iterator<Item = &DocumentSlot> {
        self.slots.values()
    }

    pub fn active_tickers(&self) -> usize {
        self.tickers.len()
    }

    /// Required documents that do not have a successful upload yet.
    pub fn required_outstanding(&self) -> Vec<&'static DocumentSpec> {
        self.catalogue
            .iter()
            .filter(|doc| doc.required)
            .filter(|doc| {
                self.slots
                    .get(&doc.kind)
                    .map(|s| s.status != UploadStatus::Success)
                    .unwrap_or(true)
            })
            .collect()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn dismiss_error(&mut self, index: usize) {
        if index < self.errors.len() {
            self.errors.remove(index);
        }
    }

    pub fn dismiss_all_errors(&mut self) {
        self.errors.clear();
    }

    pub fn submission(&self) -> SubmissionState {
        self.submission
    }

    /// Start the simulated submission. Completes with
    /// [`AppEvent::SubmissionDelivered`] after the configured delay.
    pub fn submit(&mut self) -> Result<(), SubmitError> {
        if self.submission != SubmissionState::Editing {
            return Err(SubmitError::AlreadySubmitting);
        }
        let missing = self.required_outstanding();
        if !missing.is_empty() {
            return Err(SubmitError::MissingDocuments(
                missing.iter().map(|d| d.title.to_string()).collect(),
            ));
        }

        self.submission = SubmissionState::Submitting;
        self.submission_timer = Some(timer::after(
            self.submission_config.delay(),
            self.event_tx.clone(),
            AppEvent::SubmissionDelivered,
        ));
        tracing::info!(documents = self.slots.len(), "application submitting");
        Ok(())
    }

    /// Finish a pending submission. Returns false if none was in flight.
    pub fn complete_submission(&mut self) -> bool {
        if self.submission != SubmissionState::Submitting {
            return false;
        }
        self.submission = SubmissionState::Submitted;
        self.submission_timer = None;
        tracing::info!("application submitted");
        true
    }
}
