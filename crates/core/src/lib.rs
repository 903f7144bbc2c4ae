//! leavecal_core - functional core of the calendar rescheduling engine.
//!
//! Everything in this crate is either a pure function over calendar values or a
//! port trait describing an external collaborator. The imperative shell that
//! drives a drag session lives in `leavecal_engine`.

pub mod calendar;
pub mod drag;
pub mod feedback;
pub mod geometry;
pub mod holiday;
pub mod ports;
pub mod serde;
