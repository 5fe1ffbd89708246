//! Repository modules implementing the operations on every Roster entity.
//!
//! Each module adds methods to `RosterService` via `impl RosterService` blocks.

pub mod activity;
pub mod cancellation;
pub mod communication;
pub mod contact;
pub mod enrollment;
pub mod location;
pub mod meeting;
pub mod organization;
pub mod reports;
pub mod session;
pub mod signin;
pub mod stats;
pub mod student;
