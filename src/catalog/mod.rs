//! Static reference data: question content, bank offers, and the
//! required-document list.
//!
//! None of this is computed. The wizard, offer screen, and upload simulator
//! treat it as opaque configuration.

pub mod documents;
pub mod offers;
pub mod questions;

pub use documents::{DocumentKind, DocumentSpec, DOCUMENTS};
pub use offers::{bank_by_id, bank_display_name, Bank, BANKS, DEFAULT_TENURE_INDEX, TENURE_YEARS};
pub use questions::{Choice, EmploymentKind, Question, Questionnaire};
