use crate::catalog::DocumentKind;
use crate::tracking::ExternalAction;

/// Work the handler cannot do synchronously; carried out by the main loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Read the metadata of `path` and start uploading it into `kind`.
    ChooseFile { kind: DocumentKind, path: String },
    External(ExternalAction),
    Quit,
}
