use thiserror::Error;

/// Failure to obtain a remote image
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("Unable to fetch image from URL: {0}")]
    Status(u16),

    #[error("Error fetching image: {0}")]
    Transport(String),
}

/// Everything that can go wrong while answering one chat completion
#[derive(Error, Debug)]
pub enum ChatError {
    /// The request itself cannot be served: no user turn, unreadable image data
    #[error("{0}")]
    ClientInput(String),

    #[error(transparent)]
    UpstreamFetch(#[from] FetchError),

    #[error("Error processing request: {0}")]
    RuntimeInvocation(String),
}

impl ChatError {
    /// Both input problems and unreachable images are the caller's to fix
    pub fn is_client_error(&self) -> bool {
        matches!(self, ChatError::ClientInput(_) | ChatError::UpstreamFetch(_))
    }
}

pub type ChatResult<T> = Result<T, ChatError>;
