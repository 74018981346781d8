//! Runtime module: logging, boot and the invocation loop.

pub mod boot;
pub mod serve;
