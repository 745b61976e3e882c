//! Adapters between the payload generator and the outside world.

pub mod csv;
