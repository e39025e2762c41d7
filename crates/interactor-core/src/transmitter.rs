use crate::host::{BeaconPayload, BeaconTransport};
use interactor_common::error::TransportError;
use interactor_common::protocol::SessionDescriptor;
use thiserror::Error;

pub const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Error)]
pub enum TransmitError {
    #[error("Failed to serialize session: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Serializes a finalized session and hands it to the beacon transport.
///
/// One attempt, no response, no retry.
pub struct Transmitter<T> {
    transport: T,
}

impl<T: BeaconTransport> Transmitter<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn send(&self, descriptor: &SessionDescriptor) -> Result<(), TransmitError> {
        let body = serde_json::to_string(descriptor)?;
        let payload = BeaconPayload {
            body,
            content_type: JSON_CONTENT_TYPE,
        };
        self.transport.send_beacon(&descriptor.endpoint, payload)?;
        Ok(())
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}
