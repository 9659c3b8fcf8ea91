//! Session data model for the Proctor workflow: the phased [`Session`]
//! value, the append-only tutoring [`Transcript`], and the immutable
//! [`VerdictReport`]. All state is in-memory; persistence across process
//! restarts is out of scope.

pub mod report;
pub mod session;
pub mod transcript;

pub use report::VerdictReport;
pub use session::{ExportOutcome, Identity, Phase, Session};
pub use transcript::{Speaker, Transcript, Turn};
