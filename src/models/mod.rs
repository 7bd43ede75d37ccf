//! Data models for the Freshdesk API.
//!
//! This module contains type definitions for tickets, conversations,
//! contacts, companies, groups, custom objects and attachments, plus the
//! status/priority codes and page type shared between them.

mod attachment;
mod common;
mod company;
mod contact;
mod conversation;
mod custom_object;
mod group;
mod ticket;

pub use attachment::*;
pub use common::*;
pub use company::*;
pub use contact::*;
pub use conversation::*;
pub use custom_object::*;
pub use group::*;
pub use ticket::*;
