use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomError {
    #[error("missing element: {0}")]
    Missing(String),
    #[error("could not create <{tag}>: {reason}")]
    Create { tag: String, reason: String },
    #[error("could not insert element: {0}")]
    Insert(String),
}

#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("invalid url {href:?}: {source}")]
    InvalidUrl {
        href: String,
        #[source]
        source: url::ParseError,
    },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
    #[error("could not encode request: {0}")]
    Encode(String),
    #[error("undecodable response (HTTP {status}): {reason}")]
    Decode { status: u16, reason: String },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FileRejection {
    #[error("file type {0:?} is not allowed")]
    UnsupportedType(String),
    #[error("file is {size} bytes, limit is {max}")]
    TooLarge { size: u64, max: u64 },
}

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("rejected before upload: {0}")]
    Rejected(#[from] FileRejection),
    #[error("backend refused the request: {0}")]
    Backend(String),
    #[error(transparent)]
    Transport(#[from] TransportError),
}
