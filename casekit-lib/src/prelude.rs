//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use casekit_lib::prelude::*;
//! ```

pub use crate::config::VendorConfig;
pub use crate::errors::CasekitError;
pub use crate::protocol::{endpoint_url, signed_headers, Endpoint};
pub use crate::session::{SessionId, SessionIdError};
pub use crate::sign::{canonical_string, sign_payload, Signature};
pub use crate::third_id::{IdPrefix, ThirdId, ThirdIdError};
pub use crate::Result;
