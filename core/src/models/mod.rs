//! Domain models for the scheduling simulation

pub mod event;
pub mod process;
pub mod snapshot;
pub mod table;

pub use event::{Event, EventLog};
pub use process::{Process, ProcessError, ProcessState};
pub use snapshot::{ProcessView, Snapshot};
pub use table::{ProcessId, ProcessTable};
