//! Data models for the invitation backend.
//!
//! Records serialize with the same camelCase field names the invitation frontend reads.

mod rsvp;
mod validate;
mod wish;

pub use rsvp::*;
pub use wish::*;
