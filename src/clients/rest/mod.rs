//! Path-level access to the REST API.
//!
//! [`RestClient`] sits between the resource types in [`crate::rest`] and the
//! raw [`HttpClient`](crate::clients::HttpClient). It accepts paths such as
//! `pickups/pickup_123/cancel`, normalizes them, and attaches an optional
//! JSON body and query string.

mod client;
mod errors;

pub use client::RestClient;
pub use errors::RestError;
