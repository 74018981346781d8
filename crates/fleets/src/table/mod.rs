//! Table module: the fleet store abstraction and its implementations.
//!
//! `ops.rs` defines the [`FleetTable`] trait the resolver talks to.
//! `dynamo.rs` + `live.rs` back it with DynamoDB; `memory.rs` keeps
//! records in-process for tests and the local gateway.

pub mod dynamo;
pub mod error;
pub mod live;
pub mod memory;
pub mod ops;

pub use dynamo::DynamoTable;
pub use error::TableError;
pub use memory::MemoryTable;
pub use ops::FleetTable;
