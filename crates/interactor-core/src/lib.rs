pub mod dom;
pub mod host;
pub mod lifecycle;
pub mod logging;
pub mod recorder;
pub mod selector;
pub mod session;
pub mod transmitter;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use dom::{DomElement, DomEvent};
pub use host::{BeaconPayload, BeaconTransport, Host, NavigatorInfo, VisibilityState};
pub use interactor_common::{
    Category, InteractionRecord, InteractorConfig, SessionDescriptor, TransportError,
};
pub use lifecycle::{Capture, Interactor, LifecycleState, Subscription, SubscriptionId};
pub use selector::selector_for;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;

/// Crate version, reported by the wasm binding.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
