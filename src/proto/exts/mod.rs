//! Protocol buffer type extensions
//!
//! Helper methods and domain predicates for the message types in
//! [`crate::proto`].

mod account_ext;
mod event_ext;
mod feature_ext;

pub use event_ext::*;
pub(crate) use feature_ext::filter_by_tag;

#[cfg(test)]
mod event_ext_test;
