//! Background Tasks Module
//!
//! Housekeeping for the in-memory cache store. The caching layer itself runs
//! no background work.

mod cleanup;

pub use cleanup::spawn_cleanup_task;
