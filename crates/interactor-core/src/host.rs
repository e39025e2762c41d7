//! Host Environment Abstraction
//!
//! Everything the recorder reads from the page environment, plus the one-shot
//! delivery primitive it writes to.

use chrono::{DateTime, Utc};
use interactor_common::error::TransportError;
use interactor_common::protocol::{ClientSnapshot, PageInfo};
use std::collections::BTreeMap;

/// Navigator properties recorded once per session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigatorInfo {
    pub language: String,
    pub platform: String,
}

/// Document visibility as reported by the `visibilitychange` signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityState {
    Visible,
    Hidden,
}

/// Read access to the page environment.
pub trait Host {
    /// Current wall-clock time.
    fn now(&self) -> DateTime<Utc>;

    fn navigator(&self) -> NavigatorInfo;

    /// Current window metrics. Called once at open and once at close.
    fn client_snapshot(&self) -> ClientSnapshot;

    fn page(&self) -> PageInfo;

    /// Flat copy of session storage, or `None` if it is not accessible.
    fn session_storage(&self) -> Option<BTreeMap<String, String>>;
}

impl<H: Host + ?Sized> Host for &H {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }

    fn navigator(&self) -> NavigatorInfo {
        (**self).navigator()
    }

    fn client_snapshot(&self) -> ClientSnapshot {
        (**self).client_snapshot()
    }

    fn page(&self) -> PageInfo {
        (**self).page()
    }

    fn session_storage(&self) -> Option<BTreeMap<String, String>> {
        (**self).session_storage()
    }
}

/// A serialized payload ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeaconPayload {
    pub body: String,
    pub content_type: &'static str,
}

/// Fire-and-forget delivery, e.g. `navigator.sendBeacon`.
///
/// Implementations must not block and must not depend on the page staying
/// alive after the call returns.
pub trait BeaconTransport {
    fn send_beacon(&self, url: &str, payload: BeaconPayload) -> Result<(), TransportError>;
}

impl<T: BeaconTransport + ?Sized> BeaconTransport for &T {
    fn send_beacon(&self, url: &str, payload: BeaconPayload) -> Result<(), TransportError> {
        (**self).send_beacon(url, payload)
    }
}
