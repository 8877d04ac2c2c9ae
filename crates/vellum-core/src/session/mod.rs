//! Analysis session domain module.
//!
//! # Module Structure
//!
//! - `status`: lifecycle states (`SessionStatus`)
//! - `event`: events that drive transitions (`SessionEvent`)
//! - `model`: the state machine itself (`AnalysisSession`)
//! - `observer`: read-only update hook for the presentation layer (`SessionObserver`)

mod event;
mod model;
mod observer;
mod status;

pub use event::SessionEvent;
pub use model::{AnalysisSession, GENERIC_FAILURE_MESSAGE};
pub use observer::{NoopObserver, SessionObserver};
pub use status::SessionStatus;
