//! Document upload simulation.
//!
//! Borrowers attach one file per required document. Files are validated for
//! size and type, then "uploaded" by a ticker that advances progress until
//! the slot succeeds. Nothing is transferred or stored.

pub mod chooser;
pub mod simulator;
pub mod validate;

pub use simulator::{DocumentSlot, SubmissionState, SubmitError, TickOutcome, UploadSimulator, UploadStatus};
pub use validate::{ChosenFile, ValidationError};
