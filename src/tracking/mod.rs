//! Application status tracking after submission.

pub mod clock;
pub mod tracker;

pub use clock::{Clock, IdSource, RandomIds, SystemClock};
pub use tracker::{Eta, ExternalAction, Stage, StageStatus, StageView, StatusTracker, TrackerError};
