use std::fmt;

use harvester_core::Record;

/// Transport outcome for one URL. A failed fetch never carries a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    pub body: String,
    pub ok: bool,
}

impl FetchResult {
    pub fn success(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ok: true,
        }
    }

    pub fn failed() -> Self {
        Self {
            body: String::new(),
            ok: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Decode { encoding: String },
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Decode { encoding } => write!(f, "undecodable {encoding} body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Result of one harvest: the successful records plus how many items were tried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestOutcome {
    records: Vec<Record>,
    attempted: usize,
}

impl HarvestOutcome {
    /// `attempted` is raised to `records.len()` if it is smaller.
    pub fn new(records: Vec<Record>, attempted: usize) -> Self {
        let attempted = attempted.max(records.len());
        Self { records, attempted }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), 0)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn attempted(&self) -> usize {
        self.attempted
    }

    pub fn succeeded(&self) -> usize {
        self.records.len()
    }

    pub fn failed(&self) -> usize {
        self.attempted - self.records.len()
    }
}

/// Errors that stop a harvest before any item is attempted.
#[derive(Debug, thiserror::Error)]
pub enum HarvestError {
    #[error("concurrency limit must be between 1 and {max}, got {requested}")]
    InvalidConcurrency { requested: usize, max: usize },
    #[error("failed to build http client: {0}")]
    Client(FetchError),
}
