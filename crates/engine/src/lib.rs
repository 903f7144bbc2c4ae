//! leavecal_engine - drives interactive reschedule gestures over a calendar grid.
//!
//! A [`DragController`] owns the single drag session, feeds pointer moves
//! through the geometry resolver and mutation rules from `leavecal_core`, and
//! on release runs the [`ConflictChecker`] and [`CommitCoordinator`].

pub mod checker;
pub mod commit;
pub mod config;
pub mod error;
pub mod feedback;
#[cfg(any(test, feature = "inmemory"))]
pub mod inmemory;
pub mod session;

pub use checker::ConflictChecker;
pub use commit::{CommitCoordinator, CommitOutcome, CommitTicket};
pub use config::{ConflictPolicy, EngineConfig};
pub use error::SessionError;
pub use feedback::{FeedbackController, PreviewGuard};
pub use session::{
    Collaborators, DragController, DragSession, MoveOutcome, ReleaseOutcome, SessionState,
};
