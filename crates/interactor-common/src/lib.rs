pub mod config;
pub mod error;
pub mod protocol;

pub use config::{CaptureRule, InteractorConfig};
pub use error::TransportError;
pub use protocol::{
    Category, ClientSnapshot, Environment, InteractionRecord, PageInfo, Point,
    SessionDescriptor,
};
