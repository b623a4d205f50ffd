//! Error taxonomy for the resolver core.
//!
//! Wire faults surface to the UDP front-end, which drops the datagram.
//! Transport faults are dead branches inside the engine. Cache faults are
//! logged and degraded; clients never see them.

use thiserror::Error;

/// Malformed DNS wire data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("message is {0} bytes, shorter than the 12 byte header")]
    ShortMessage(usize),

    #[error("message has an empty question section")]
    NoQuestion,

    #[error("truncated while reading {0}")]
    Truncated(&'static str),

    #[error("label of {0} bytes exceeds the 63 byte limit")]
    LabelTooLong(usize),

    #[error("encoded name of {0} bytes exceeds the 255 byte limit")]
    NameTooLong(usize),

    #[error("reserved label length byte {0:#04x}")]
    ReservedLabel(u8),

    #[error("compression pointer to offset {offset} outside a {len} byte message")]
    PointerOutOfBounds { offset: usize, len: usize },

    #[error("compression pointer loop")]
    PointerLoop,

    #[error("rdata parser needs more than the declared {0} byte rdlength")]
    RdataOverrun(u16),

    #[error("response id {got:#06x} does not match query id {expected:#06x}")]
    IdMismatch { expected: u16, got: u16 },
}

/// Failure of a single upstream UDP exchange.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("no response within the timeout")]
    Timeout,

    #[error("socket error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Failure of the cache backing store or its value codec.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("store error: {0}")]
    Store(String),

    #[error("value codec error: {0}")]
    Codec(#[from] serde_json::Error),
}
