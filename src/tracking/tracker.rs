//! Five-stage application status pipeline.
//!
//! The tracker stores a single stage index. Every stage's status, text, ETA
//! and available actions are derived from that index and the stage's
//! position. Submission and the two review stages are advanced by a timer;
//! agreement and disbursement only move through [`StatusTracker::advance_stage`].

use super::clock::{Clock, IdSource};
use crate::app::event::AppEvent;
use crate::catalog::bank_display_name;
use crate::config::TrackingConfig;
use crate::timer::{self, TimerHandle};
use chrono::{Days, NaiveDate};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Submission,
    Verification,
    Approval,
    Agreement,
    Disbursement,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::Submission,
        Stage::Verification,
        Stage::Approval,
        Stage::Agreement,
        Stage::Disbursement,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Stage::Submission => "submission",
            Stage::Verification => "verification",
            Stage::Approval => "approval",
            Stage::Agreement => "agreement",
            Stage::Disbursement => "disbursement",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Stage::Submission => "Application Submitted",
            Stage::Verification => "Document Verification",
            Stage::Approval => "Loan Approval",
            Stage::Agreement => "Agreement Signing",
            Stage::Disbursement => "Loan Disbursement",
        }
    }

    fn position(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStatus {
    Pending,
    InProgress,
    Completed,
    /// Reserved for a real lender decision; the simulation never rejects.
    #[allow(dead_code)]
    Rejected,
}

/// Actions handed to the outside world. The tracker only decides which ones
/// a stage offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalAction {
    DownloadApprovalLetter,
    ScheduleAppointment,
    ViewAgreementDraft,
    ContactSupport,
    ScheduleCall,
}

impl ExternalAction {
    pub fn label(self) -> &'static str {
        match self {
            ExternalAction::DownloadApprovalLetter => "Download Approval Letter",
            ExternalAction::ScheduleAppointment => "Schedule Appointment",
            ExternalAction::ViewAgreementDraft => "View Agreement Draft",
            ExternalAction::ContactSupport => "Contact Support",
            ExternalAction::ScheduleCall => "Schedule a Call",
        }
    }

    pub fn key(self) -> char {
        match self {
            ExternalAction::DownloadApprovalLetter => 'l',
            ExternalAction::ScheduleAppointment => 'p',
            ExternalAction::ViewAgreementDraft => 'v',
            ExternalAction::ContactSupport => 'h',
            ExternalAction::ScheduleCall => 'c',
        }
    }

    pub fn notice(self) -> &'static str {
        match self {
            ExternalAction::DownloadApprovalLetter => "Downloading approval letter...",
            ExternalAction::ScheduleAppointment => "Opening appointment scheduler...",
            ExternalAction::ViewAgreementDraft => "Opening agreement draft...",
            ExternalAction::ContactSupport => "Connecting you to support...",
            ExternalAction::ScheduleCall => "Opening call scheduler...",
        }
    }
}

const NO_ACTIONS: &[ExternalAction] = &[];
const APPROVAL_ACTIONS: &[ExternalAction] = &[ExternalAction::DownloadApprovalLetter];
const AGREEMENT_ACTIONS: &[ExternalAction] = &[
    ExternalAction::ScheduleAppointment,
    ExternalAction::ViewAgreementDraft,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eta {
    By(NaiveDate),
    Note(&'static str),
}

/// Everything the status screen shows for one stage.
#[derive(Debug, Clone, PartialEq)]
pub struct StageView {
    pub stage: Stage,
    pub status: StageStatus,
    pub description: String,
    pub completed_on: Option<NaiveDate>,
    pub eta: Option<Eta>,
    pub actions: &'static [ExternalAction],
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error("the bank is still reviewing your application")]
    AwaitingReview,
    #[error("the loan has already been disbursed")]
    AlreadyDisbursed,
}

pub struct StatusTracker {
    application_id: String,
    bank_name: &'static str,
    stage_index: usize,
    ceiling: usize,
    started_on: NaiveDate,
    completed_on: [Option<NaiveDate>; 5],
    clock: Arc<dyn Clock>,
    auto_advance: Option<TimerHandle>,
}

impl StatusTracker {
    /// Record a freshly submitted application and start auto-advance.
    pub fn begin(
        bank_id: &str,
        config: &TrackingConfig,
        clock: Arc<dyn Clock>,
        ids: &mut dyn IdSource,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        let today = clock.today();
        let ceiling = config.auto_advance_ceiling.min(Stage::ALL.len() - 1);
        let mut completed_on = [None; 5];
        completed_on[0] = Some(today);

        let auto_advance = (ceiling > 0).then(|| {
            timer::every(config.advance_interval(), event_tx, || AppEvent::StatusAdvance)
        });

        let tracker = Self {
            application_id: ids.application_id(),
            bank_name: bank_display_name(bank_id),
            stage_index: 0,
            ceiling,
            started_on: today,
            completed_on,
            clock,
            auto_advance,
        };
        tracing::info!(
            application = %tracker.application_id,
            bank = tracker.bank_name,
            "application tracking started"
        );
        tracker
    }

    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    pub fn bank_name(&self) -> &'static str {
        self.bank_name
    }

    pub fn stage_index(&self) -> usize {
        self.stage_index
    }

    pub fn current_stage(&self) -> Stage {
        Stage::ALL[self.stage_index]
    }

    pub fn is_auto_advancing(&self) -> bool {
        self.auto_advance.is_some()
    }

    fn complete_next(&mut self) {
        self.stage_index += 1;
        self.completed_on[self.stage_index] = Some(self.clock.today());
        tracing::info!(
            application = %self.application_id,
            stage = self.current_stage().id(),
            "stage completed"
        );
    }

    /// Handle one auto-advance tick. Returns true if the stage moved.
    pub fn auto_advance(&mut self) -> bool {
        if self.stage_index >= self.ceiling {
            self.auto_advance = None;
            return false;
        }
        self.complete_next();
        if self.stage_index >= self.ceiling {
            // Stops for good; later stages need advance_stage
            self.auto_advance = None;
        }
        true
    }

    /// Complete the next stage on an explicit signal (agreement signed,
    /// funds released). Only allowed once auto-advance has finished.
    pub fn advance_stage(&mut self) -> Result<Stage, TrackerError> {
        if self.stage_index + 1 >= Stage::ALL.len() {
            return Err(TrackerError::AlreadyDisbursed);
        }
        if self.stage_index < self.ceiling {
            return Err(TrackerError::AwaitingReview);
        }
        self.complete_next();
        Ok(self.current_stage())
    }

    pub fn stage_status(&self, stage: Stage) -> StageStatus {
        let position = stage.position();
        if position <= self.stage_index {
            StageStatus::Completed
        } else if position == self.stage_index + 1 && position <= self.ceiling {
            StageStatus::InProgress
        } else {
            StageStatus::Pending
        }
    }

    fn days_after_start(&self, days: u64) -> NaiveDate {
        self.started_on
            .checked_add_days(Days::new(days))
            .unwrap_or(self.started_on)
    }

    pub fn stages(&self) -> Vec<StageView> {
        Stage::ALL.iter().map(|&stage| self.view(stage)).collect()
    }

    fn view(&self, stage: Stage) -> StageView {
        let idx = self.stage_index;
        let status = self.stage_status(stage);
        let completed_on = match status {
            StageStatus::Completed => self.completed_on[stage.position()],
            _ => None,
        };

        let (description, eta, actions): (String, Option<Eta>, &'static [ExternalAction]) = match stage {
            Stage::Submission => (
                format!(
                    "Your application has been received by {} and is being processed.",
                    self.bank_name
                ),
                None,
                NO_ACTIONS,
            ),
            Stage::Verification => (
                if idx >= 1 {
                    "Your documents have been verified successfully.".to_string()
                } else {
                    "We are verifying the documents you submitted.".to_string()
                },
                (idx < 1).then(|| Eta::By(self.days_after_start(1))),
                NO_ACTIONS,
            ),
            Stage::Approval => (
                if idx >= 2 {
                    "Congratulations! Your loan has been approved.".to_string()
                } else {
                    "Your application is being reviewed for approval.".to_string()
                },
                (idx == 1).then(|| Eta::By(self.days_after_start(2))),
                if idx >= 2 { APPROVAL_ACTIONS } else { NO_ACTIONS },
            ),
            Stage::Agreement => (
                "Review and sign your loan agreement.".to_string(),
                (idx == 2).then_some(Eta::Note("Schedule appointment")),
                if idx >= 2 { AGREEMENT_ACTIONS } else { NO_ACTIONS },
            ),
            Stage::Disbursement => (
                "Funds will be transferred to your account.".to_string(),
                (idx >= 3).then_some(Eta::Note("Expected within 24 hours after agreement signing")),
                NO_ACTIONS,
            ),
        };

        StageView {
            stage,
            status,
            description,
            completed_on,
            eta,
            actions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::clock::{FixedClock, FixedIds};
    use std::time::Duration;
    use tokio::sync::mpsc::UnboundedReceiver;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn tracker(bank: &str) -> (StatusTracker, UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let t = StatusTracker::begin(
            bank,
            &TrackingConfig::default(),
            Arc::new(FixedClock(day(10))),
            &mut FixedIds("APP123456"),
            tx,
        );
        (t, rx)
    }

    fn statuses(t: &StatusTracker) -> Vec<StageStatus> {
        Stage::ALL.iter().map(|s| t.stage_status(*s)).collect()
    }

    use StageStatus::{Completed as C, InProgress as I, Pending as P};

    #[tokio::test(start_paused = true)]
    async fn test_begin_at_submission() {
        let (t, _rx) = tracker("hdfc");
        assert_eq!(t.application_id(), "APP123456");
        assert_eq!(t.stage_index(), 0);
        assert!(t.is_auto_advancing());
        assert_eq!(statuses(&t), vec![C, I, P, P, P]);

        let stages = t.stages();
        assert_eq!(
            stages[0].description,
            "Your application has been received by HDFC Bank and is being processed."
        );
        assert_eq!(stages[0].completed_on, Some(day(10)));
        assert_eq!(stages[1].description, "We are verifying the documents you submitted.");
        assert_eq!(stages[1].eta, Some(Eta::By(day(11))));
        assert_eq!(stages[2].eta, None);
        assert!(stages[2].actions.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_advance_stops_at_approval() {
        let (mut t, mut rx) = tracker("sbi");
        let start = tokio::time::Instant::now();

        assert!(matches!(rx.recv().await, Some(AppEvent::StatusAdvance)));
        assert!(start.elapsed() >= Duration::from_secs(5));
        assert!(t.auto_advance());
        assert_eq!(statuses(&t), vec![C, C, I, P, P]);
        let stages = t.stages();
        assert_eq!(stages[1].description, "Your documents have been verified successfully.");
        assert_eq!(stages[1].eta, None);
        assert_eq!(stages[2].eta, Some(Eta::By(day(12))));

        assert!(matches!(rx.recv().await, Some(AppEvent::StatusAdvance)));
        assert!(t.auto_advance());
        assert_eq!(t.stage_index(), 2);
        assert_eq!(statuses(&t), vec![C, C, C, P, P]);
        assert!(!t.is_auto_advancing());

        // Late ticks never push past the ceiling
        assert!(!t.auto_advance());
        assert_eq!(t.stage_index(), 2);
        let waited = tokio::time::timeout(Duration::from_secs(60), rx.recv()).await;
        assert!(!matches!(waited, Ok(Some(_))));

        let stages = t.stages();
        assert_eq!(stages[2].description, "Congratulations! Your loan has been approved.");
        assert_eq!(stages[2].actions, APPROVAL_ACTIONS);
        assert_eq!(stages[3].eta, Some(Eta::Note("Schedule appointment")));
        assert_eq!(stages[3].actions, AGREEMENT_ACTIONS);
    }

    #[tokio::test(start_paused = true)]
    async fn test_explicit_advance_after_review() {
        let (mut t, _rx) = tracker("pnb");
        assert_eq!(t.advance_stage(), Err(TrackerError::AwaitingReview));
        t.auto_advance();
        assert_eq!(t.advance_stage(), Err(TrackerError::AwaitingReview));
        t.auto_advance();

        assert_eq!(t.advance_stage(), Ok(Stage::Agreement));
        assert_eq!(statuses(&t), vec![C, C, C, C, P]);
        assert_eq!(
            t.stages()[4].eta,
            Some(Eta::Note("Expected within 24 hours after agreement signing"))
        );

        assert_eq!(t.advance_stage(), Ok(Stage::Disbursement));
        assert_eq!(statuses(&t), vec![C, C, C, C, C]);
        assert!(t.stages().iter().all(|s| s.completed_on == Some(day(10))));
        // The disbursement note stays once the stage is completed
        assert_eq!(
            t.stages()[4].eta,
            Some(Eta::Note("Expected within 24 hours after agreement signing"))
        );
        assert_eq!(t.advance_stage(), Err(TrackerError::AlreadyDisbursed));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_bank_falls_back() {
        let (t, _rx) = tracker("mystery");
        assert_eq!(t.bank_name(), "Your Bank");
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_ceiling_never_starts_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let config = TrackingConfig {
            auto_advance_ceiling: 0,
            ..TrackingConfig::default()
        };
        let mut t = StatusTracker::begin(
            "icici",
            &config,
            Arc::new(FixedClock(day(1))),
            &mut FixedIds("APP100000"),
            tx,
        );
        assert!(!t.is_auto_advancing());
        assert_eq!(statuses(&t), vec![C, P, P, P, P]);
        assert_eq!(t.advance_stage(), Ok(Stage::Verification));
        let waited = tokio::time::timeout(Duration::from_secs(60), rx.recv()).await;
        assert!(!matches!(waited, Ok(Some(_))));
    }
}
