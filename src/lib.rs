mod clients;
mod config;
mod constants;
mod context;
mod errors;
mod gateway;
pub mod metrics;
pub mod proto;
pub mod utils;

pub use clients::*;
pub use config::*;
pub use constants::*;
pub use context::*;
pub use errors::*;
pub use gateway::*;

pub(crate) use utils::async_task;
pub(crate) use utils::flight;
pub(crate) use utils::time;
pub use utils::util;

//-----------------------------------------------------------
// Test utils

#[cfg(test)]
pub mod test_utils;
