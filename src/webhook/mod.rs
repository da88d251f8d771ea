//! Notification delivery to chat webhooks.
//!
//! This module provides:
//! - HTTP plumbing ([`HttpRequest`], [`HttpResponse`], [`HttpClient`], [`ReqwestClient`])
//! - The messenger capability ([`Messenger`]) with Slack and Discord backends
//! - Fan-out of one message to every registered backend ([`MessengerGroup`])

mod client;
mod delivery;
mod discord;
mod error;
mod group;
mod http;
mod messenger;
mod slack;


pub use client::ReqwestClient;
pub use discord::DiscordMessenger;
pub use error::HttpError;
pub use group::{DeliveryReport, MessengerGroup};
pub use http::{HttpClient, HttpRequest, HttpResponse};
pub use messenger::Messenger;
pub use slack::SlackMessenger;
