//! # Freshdesk
//!
//! A typed async client for the Freshdesk v2 REST API.
//!
//! Each API operation is one method on [`FreshdeskClient`](client::FreshdeskClient)
//! taking a typed payload and returning a decoded resource or a
//! [`FreshdeskError`](error::FreshdeskError).
//!
//! ## Features
//!
//! - **Tickets**: get, list, create (with or without attachments), update,
//!   reply and delete
//! - **Contacts**: email lookup, full listing across pages, create, update,
//!   soft/hard delete, company associations
//! - **Companies, groups and custom objects**: the common read/write calls
//! - **Rate limiting**: a token bucket paces the company ticket listing
//! - **Errors**: unexpected statuses surface with the server's body verbatim;
//!   nothing is retried
//!
//! ## Architecture
//!
//! - [`config`] - Configuration from explicit values or environment variables
//! - [`error`] - The unified error type
//! - [`client`] - The request executor and all resource operations
//! - [`models`] - Request payloads and response records
//! - [`rate_limit`] - Token bucket used by paced operations
//!
//! ## Configuration
//!
//! [`Config::from_env`](config::Config::from_env) reads:
//!
//! - `FRESHDESK_BASE_URL`: Base URL of the helpdesk
//! - `FRESHDESK_USER`: Agent email or API key
//! - `FRESHDESK_PASSWORD`: Password (optional, `X` when using an API key)
//! - `FRESHDESK_MAX_REQUESTS_PER_MINUTE`: Request budget (optional, 50)
//!
//! Several clients with different configurations can coexist; each owns its
//! own limiter.
//!
//! ## Example
//!
//! ```ignore
//! use freshdesk::client::FreshdeskClient;
//! use freshdesk::config::Config;
//! use freshdesk::models::{Attachment, Status, TicketCreatePayload};
//!
//! async fn example() -> Result<(), freshdesk::error::FreshdeskError> {
//!     let config = Config::from_env()?;
//!     let client = FreshdeskClient::new(&config)?;
//!
//!     let payload = TicketCreatePayload {
//!         email: Some("jane@example.com".to_string()),
//!         subject: Some("Printer on fire".to_string()),
//!         description: Some("Smoke everywhere".to_string()),
//!         status: Some(Status::Open),
//!         ..Default::default()
//!     };
//!     let files = vec![Attachment::from_path("photo.jpg").await?];
//!
//!     let ticket = client.create_ticket_with_attachments(&payload, &files).await?;
//!     println!("#{}: {}", ticket.id, ticket.display_subject());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod rate_limit;
