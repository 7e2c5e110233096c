use thiserror::Error;

/// Top-level error type used across the entire application.
///
/// Construction-time variants (`Connection`, `Config`) are fatal to the
/// module being built.  `Property` and `Invocation` are transient: modules
/// catch them and degrade their widget instead of propagating.
#[derive(Debug, Error)]
pub enum BarError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("property error: {0}")]
    Property(String),

    #[error("invocation error: {0}")]
    Invocation(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("runtime error: {0}")]
    Runtime(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl BarError {
    /// Short, stable label for structured log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Connection(_) => "connection",
            Self::Property(_)   => "property",
            Self::Invocation(_) => "invocation",
            Self::Config(_)     => "config",
            Self::Runtime(_)    => "runtime",
            Self::Io { .. }     => "io",
        }
    }
}

pub type Result<T, E = BarError> = std::result::Result<T, E>;
