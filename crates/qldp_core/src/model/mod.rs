//! Client-side data model.
//!
//! # Responsibility
//! - Define the records and session shape held in the state tree.
//!
//! # Invariants
//! - Model types carry data only; transitions live in `reducer`.

pub mod record;
pub mod session;
