//! # Usersync Webhooks
//!
//! Verification side of Svix-delivered webhooks, as used by Clerk:
//! - Extraction of the `svix-id` / `svix-timestamp` / `svix-signature` headers
//! - HMAC-SHA256 signature generation and verification
//! - Typed access to Clerk user lifecycle events
//!
//! ## Example
//!
//! ```rust,ignore
//! use usersync_webhooks::{SvixHeaders, WebhookReceiver};
//!
//! let receiver = WebhookReceiver::new(&secret)?;
//! let headers = SvixHeaders::from_header_map(request.headers())?;
//! let event = receiver.verify(&headers, &body)?;
//! ```

mod error;
mod event;
mod headers;
mod receiver;
mod signature;

pub use error::{WebhookError, WebhookResult};
pub use event::{EventKind, USER_CREATED, USER_UPDATED, UserEventData, WebhookEvent};
pub use headers::{SVIX_ID, SVIX_SIGNATURE, SVIX_TIMESTAMP, SvixHeaders};
pub use receiver::{DEFAULT_TOLERANCE_SECS, WebhookReceiver};
pub use signature::{SECRET_PREFIX, SignatureError, SignatureVersion, WebhookSigner};
