use crossterm::event::Event as CrosstermEvent;

pub type UploadId = u64;

#[derive(Debug)]
pub enum AppEvent {
    /// Terminal input event
    Terminal(CrosstermEvent),

    /// Simulated transfer progress for one upload instance
    UploadTick { upload_id: UploadId },

    /// The simulated submission delay elapsed
    SubmissionDelivered,

    /// Status tracker auto-advance timer fired
    StatusAdvance,
}
