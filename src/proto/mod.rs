//! Protocol Buffer messages exchanged with SDKs and downstream services.
//!
//! The message definitions live in `src/generated` and are kept wire
//! compatible with the platform's `.proto` files. Helper methods on the
//! messages are implemented in [`exts`].

pub mod user {
    include!("../generated/gateway.user.rs");
}

pub mod feature {
    include!("../generated/gateway.feature.rs");
}

pub mod account {
    include!("../generated/gateway.account.rs");
}

pub mod event {
    pub use prost_types::Any;

    include!("../generated/gateway.event.rs");
}

pub mod gateway {
    include!("../generated/gateway.service.rs");
}

pub mod exts;
