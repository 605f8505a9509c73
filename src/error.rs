//! Error types for scan collaborators.
//!
//! Errors only exist at the boundary with the injected host collaborators
//! (stylesheet access and selector matching). The scanner recovers from all
//! of them by skipping the affected sheet or rule; nothing propagates past
//! [`crate::analyze`].

use thiserror::Error;

/// Errors a host collaborator can report during a scan.
#[derive(Error, Debug)]
pub enum Error {
    /// The stylesheet's rules cannot be read (e.g. cross-origin restriction).
    /// The whole sheet is omitted from the scan.
    #[error("stylesheet {0:?} is not accessible")]
    InaccessibleStylesheet(String),

    /// The host's matching primitive rejected a selector. Only the affected
    /// rule is skipped.
    #[error("invalid selector: {0:?}")]
    InvalidSelector(String),
}

pub type Result<T> = std::result::Result<T, Error>;
