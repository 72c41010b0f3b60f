//! Casekit core library.
//!
//! One shared implementation of the three wire contracts the vending
//! backend must get byte-exact when talking to the case manufacturer's
//! API, consolidated out of the per-script copies that used to drift:
//!
//! - **Request signing**: MD5 over a canonical string (sorted keys,
//!   primitives only, secrets last) attached as the `sign` header.
//! - **Session IDs**: the 4-segment token a vending machine embeds in its
//!   QR code, validated with corrective hints instead of bare rejections.
//! - **Correlation tokens**: caller-minted `PYEN…`/`OREN…` IDs that link a
//!   payment to its later order-creation call.
//!
//! The crate intentionally stays pure: no I/O, no clock reads outside the
//! explicit `generate` conveniences, no async. The HTTP client that
//! transmits signed requests is the caller's.
//!
//! # Example
//!
//! ```
//! use casekit_lib::prelude::*;
//! use serde_json::json;
//!
//! let config = VendorConfig::new("https://vendor.example", "mobileShell", "secret");
//!
//! let payload = json!({"mobile_model_id": "MM1020250226000002", "pay_type": 5});
//! let headers = signed_headers(&payload, &config);
//! assert_eq!(headers[0].0, "sign");
//!
//! let session: SessionId = "10HKNTDOH2BA_20250729_143022_A1B2C3D4".parse()?;
//! assert_eq!(session.machine_id(), "10HKNTDOH2BA");
//! # Ok::<(), SessionIdError>(())
//! ```

pub mod config;
pub mod errors;
pub mod prelude;
pub mod protocol;
pub mod session;
pub mod sign;
pub mod third_id;

pub use config::VendorConfig;
pub use errors::CasekitError;
pub use session::{SessionId, SessionIdError};
pub use sign::{canonical_string, sign_payload, Signature};
pub use third_id::{IdPrefix, ThirdId, ThirdIdError};

/// Common result alias for Casekit operations.
pub type Result<T> = std::result::Result<T, CasekitError>;
