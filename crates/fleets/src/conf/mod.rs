//! Conf module: function configuration model and loading.

pub mod load;
pub mod model;

pub use model::{FunctionConfig, LogFormat, LoggingConfig, TableConfig};
