pub mod schema;
pub mod types;
pub mod mutations;

pub use schema::{build_schema, FleetSchema};
