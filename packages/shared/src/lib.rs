//! Shared utilities for the marubatsu workspace.
//!
//! Provides time handling (JST timestamps with a `Clock` abstraction for
//! testability) and the logging bootstrap used by binaries and tests.

pub mod logger;
pub mod time;
