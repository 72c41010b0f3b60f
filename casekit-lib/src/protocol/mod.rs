//! Wire-level contract with the manufacturer API.
//!
//! Path construction and header assembly live here; the HTTP client that
//! actually transmits requests is supplied by the caller.

mod headers;
mod paths;

pub use headers::{signed_headers, AUTHORIZATION_HEADER, REQ_SOURCE_HEADER, SIGN_HEADER};
pub use paths::{endpoint_url, Endpoint, API_PREFIX};
