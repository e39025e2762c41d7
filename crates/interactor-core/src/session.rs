//! Session Assembly
//!
//! `open_session` and `close_session` are the only two places a
//! `SessionDescriptor` is built. Closing consumes the open descriptor so the
//! end snapshot cannot be applied twice to the same value.

use crate::host::Host;
use interactor_common::config::InteractorConfig;
use interactor_common::protocol::{Environment, InteractionRecord, SessionDescriptor};

/// Build the start-of-session descriptor.
pub fn open_session<H: Host>(host: &H, config: &InteractorConfig) -> SessionDescriptor {
    let navigator = host.navigator();

    SessionDescriptor {
        start_time: host.now(),
        end_time: None,
        environment: Environment {
            language: navigator.language,
            platform: navigator.platform,
            client_start: host.client_snapshot(),
            client_end: None,
        },
        page: host.page(),
        endpoint: config.endpoint.clone(),
        interactions: None,
        storage_snapshot: None,
    }
}

/// Finalize an open descriptor with the end snapshot and the captured records.
pub fn close_session<H: Host>(
    mut descriptor: SessionDescriptor,
    records: Vec<InteractionRecord>,
    host: &H,
    config: &InteractorConfig,
) -> SessionDescriptor {
    debug_assert!(!descriptor.is_closed(), "session closed twice");

    descriptor.end_time = Some(host.now());
    descriptor.environment.client_end = Some(host.client_snapshot());
    descriptor.interactions = Some(records);

    if config.storage {
        descriptor.storage_snapshot = Some(host.session_storage().unwrap_or_default());
    }

    if config.debug {
        match serde_json::to_string(&descriptor) {
            Ok(json) => tracing::info!("Session: {}", json),
            Err(e) => tracing::warn!("Session could not be serialized: {}", e),
        }
    }

    descriptor
}
