//! Application layer: query caching, invalidation and polling.
//!
//! Sits between the service modules and any consumer (CLI today). The
//! cache guarantees that concurrent observations of one key share a
//! single request, that the newest request always wins, and that
//! mutations invalidate the whole resource they touched.

pub mod keys;
pub mod poller;
pub mod query_cache;

pub use poller::PollHandle;
pub use query_cache::{FetchStatus, QueryCache, QueryKey};
