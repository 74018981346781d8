// Module structure for the fleet resolver function.

// Core infrastructure
pub mod conf;
pub mod event;
pub mod model;
pub mod table;

// Domain modules
pub mod client_config;
pub mod resolver;
pub mod runtime;
