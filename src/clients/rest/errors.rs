use crate::clients::HttpError;
use thiserror::Error;

/// Failure of a [`RestClient`](super::RestClient) call.
///
/// Status-code interpretation (401, 404, 422) happens one layer up in
/// [`ResourceError`](crate::ResourceError); at this level every non-2xx
/// response is an [`HttpError::Response`].
#[derive(Debug, Error)]
pub enum RestError {
    /// The path was blank or consisted only of slashes.
    #[error("Path '{path}' does not name an EasyPost endpoint")]
    InvalidPath { path: String },

    #[error(transparent)]
    Http(#[from] HttpError),
}
