//! Helper functions for creating and classifying errors

use super::types::ImportError;

impl ImportError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport(message.into())
    }

    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout(message.into())
    }

    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// Map a non-2xx HTTP status to the matching error class.
    ///
    /// Anything that is not a 5xx is treated as a client error, including
    /// unexpected 1xx/3xx statuses.
    pub fn from_status<S: Into<String>>(status: u16, message: S) -> Self {
        if (500..600).contains(&status) {
            Self::TransientServer {
                status,
                message: message.into(),
            }
        } else {
            Self::ClientRequest {
                status,
                message: message.into(),
            }
        }
    }

    /// Whether another attempt may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ImportError::TransientServer { .. } | ImportError::Transport(_) | ImportError::Timeout(_)
        )
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ImportError::ClientRequest { status, .. }
            | ImportError::TransientServer { status, .. } => Some(*status),
            ImportError::Aborted { source, .. } => source.status(),
            _ => None,
        }
    }
}
