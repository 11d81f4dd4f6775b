//! Background Tasks Module
//!
//! Periodic maintenance work that runs alongside the cache engine.

mod cleanup;

pub(crate) use cleanup::spawn_cleanup_task;
