//! Borrower intake wizard: step navigation and the answers it collects.

pub mod answers;
pub mod navigator;

pub use answers::{EmploymentAnswer, Field, FormAnswers};
pub use navigator::{Navigator, StepOutcome, WizardStep};
