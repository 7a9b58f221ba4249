use serde_json::Value;
use thiserror::Error;

/// Fallback message rendered when a failure carries no public message.
pub const GENERIC_FAILURE_MESSAGE: &str = "Translation failed.";

/// Status used when a failure has no usable status code of its own.
pub const BAD_GATEWAY: u16 = 502;

/// What went wrong when talking to an upstream backend.
///
/// The caller may see the same status for several kinds, so the kind is what
/// tells them apart in the operator logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderFailure {
    /// The request never produced an HTTP response (DNS, TLS, timeout...).
    Transport,
    /// The backend answered with a non-2xx status.
    UpstreamStatus,
    /// The backend answered 2xx but no translation text could be extracted.
    EmptyTranslation,
}

impl ProviderFailure {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderFailure::Transport => "transport",
            ProviderFailure::UpstreamStatus => "upstream_status",
            ProviderFailure::EmptyTranslation => "empty_translation",
        }
    }
}

#[derive(Error, Debug)]
pub enum GatewayError {
    /// Caller's fault: bad prompt or unknown provider.
    #[error("{message}")]
    Validation { message: String },

    /// Operator's fault: a deployment secret is missing.
    #[error("{message}")]
    Configuration {
        message: String,
        details: Option<Value>,
    },

    /// Upstream's fault.
    #[error("{message}")]
    Provider {
        status: u16,
        kind: ProviderFailure,
        message: String,
        details: Option<Value>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration file error: {0}")]
    ConfigFile(String),

    #[error("Start-up error: {0}")]
    Init(String),
}

impl GatewayError {
    pub fn validation(message: impl Into<String>) -> Self {
        GatewayError::Validation {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>, details: Option<Value>) -> Self {
        GatewayError::Configuration {
            message: message.into(),
            details,
        }
    }

    pub fn provider(
        status: u16,
        kind: ProviderFailure,
        message: impl Into<String>,
        details: Option<Value>,
    ) -> Self {
        GatewayError::Provider {
            status,
            kind,
            message: message.into(),
            details,
        }
    }

    /// Status code reported to the caller.
    ///
    /// Anything outside the 4xx/5xx error range collapses to 502.
    pub fn status_code(&self) -> u16 {
        let raw = match self {
            GatewayError::Validation { .. } => 400,
            GatewayError::Configuration { .. } => 500,
            GatewayError::Provider { status, .. } => *status,
            GatewayError::Io(_)
            | GatewayError::Toml(_)
            | GatewayError::ConfigFile(_)
            | GatewayError::Init(_) => 500,
        };
        if (400..=599).contains(&raw) {
            raw
        } else {
            BAD_GATEWAY
        }
    }

    /// Message that is safe to show the caller.
    pub fn public_message(&self) -> &str {
        let message = match self {
            GatewayError::Validation { message }
            | GatewayError::Configuration { message, .. }
            | GatewayError::Provider { message, .. } => message.as_str(),
            GatewayError::Io(_)
            | GatewayError::Toml(_)
            | GatewayError::ConfigFile(_)
            | GatewayError::Init(_) => "",
        };
        if message.trim().is_empty() {
            GENERIC_FAILURE_MESSAGE
        } else {
            message
        }
    }

    /// Operator-only diagnostic payload.
    pub fn details(&self) -> Option<&Value> {
        match self {
            GatewayError::Configuration { details, .. } | GatewayError::Provider { details, .. } => {
                details.as_ref()
            }
            _ => None,
        }
    }
}
