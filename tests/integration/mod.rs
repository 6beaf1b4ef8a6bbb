//! Integration tests for the execution timeline

mod store_bridge;

pub use test_utils::{frame, result, with_env};
