//! Typed Rust client for the UniSender email-marketing HTTP API.
//!
//! Two layers share one [`UnisenderClient`]:
//! - [`UnisenderClient::call`] invokes any [`ApiMethod`] with flattened [`Params`] and returns
//!   the decoded `result` payload;
//! - the campaign helpers ([`UnisenderClient::create_email_campaign`] and
//!   [`UnisenderClient::create_many_email_campaigns`]) run the whole fields → list → import →
//!   message → campaign sequence for a batch of [`Recipient`]s.
//!
//! The crate is split into a domain layer of strong types, a transport layer for wire-format
//! quirks, and a small client layer orchestrating requests.
//!
//! ```rust,no_run
//! use unisender::{ApiMethod, Auth, Params, UnisenderClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), unisender::UnisenderError> {
//!     let client = UnisenderClient::new(Auth::api_key("...")?);
//!     let lists = client.call(ApiMethod::GetLists, Params::new()).await?;
//!     println!("{lists}");
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{Auth, ErrorKind, UnisenderClient, UnisenderClientBuilder, UnisenderError};
pub use domain::{
    ApiKey, ApiMethod, CampaignData, CampaignDefaults, CampaignEntry, CampaignId, EmailAddress,
    EmailData, ErrorCode, FieldType, KnownErrorCode, Lang, ListId, MessageId, ParamValue, Params,
    Platform, Recipient, StartTime, SystemTemplateId, TemplateId, Timezone, ValidationError,
};
