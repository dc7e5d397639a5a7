//! Contracts of the collaborators the gateway depends on.
//!
//! Implementations live outside this crate (gRPC clients, pub/sub
//! publishers, the shared cache, the evaluation library). Every trait is
//! object safe and is held as `Arc<dyn Trait>` by the service.

mod account;
mod cache;
mod evaluator;
mod feature;
mod publisher;

pub use account::*;
pub use cache::*;
pub use evaluator::*;
pub use feature::*;
pub use publisher::*;
