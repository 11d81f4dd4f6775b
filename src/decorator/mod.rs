//! Decorator Module
//!
//! Cache wrappers that add cross-cutting behavior (latency accounting,
//! retry with fixed delay) around any `Cache` implementation without
//! modifying it. Decorators hold, never own, the wrapped cache's
//! semantics: hit/miss behavior passes through unchanged.

mod retry;
mod timed;

pub use retry::RetryCache;
pub use timed::{OperationTiming, TimedCache};
