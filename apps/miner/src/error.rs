// [apps/miner/src/error.rs]
//! APARATO: GPU MINER FAULT CATALOG

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MinerError {
    #[error("NO_ADAPTER: no compatible GPU adapter found")]
    NoAdapter,

    #[error("DEVICE_REQUEST_FAULT: failed to request GPU device: {0}")]
    DeviceRequest(String),

    #[error("BUFFER_MAP_FAULT: GPU buffer readback failed: {0}")]
    BufferMap(String),

    #[error("READBACK_CHANNEL_CLOSED: GPU readback channel closed before a result arrived")]
    ReadbackChannelClosed,
}
