//! Resolver module: the four fleet operations and their AppSync dispatch.

pub mod dispatch;
pub mod error;
pub mod fleet;
pub mod request;

pub use dispatch::Operation;
pub use error::{ResolverError, ResolverResult};
pub use fleet::FleetResolver;
pub use request::{AddFleetRequest, DeleteFleetRequest, UpdateFleetRequest};
