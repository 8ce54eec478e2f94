//! Demo applications for the `shutdown-demo` binary.

pub mod http;
pub mod query;
pub mod ticker;
pub mod worker;
