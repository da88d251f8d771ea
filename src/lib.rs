//! IP Poster: Host Address Change Announcer
//!
//! A library for watching the addresses of selected network interfaces,
//! along with the host name, and posting a summary to chat webhooks
//! (Slack, Discord) whenever something changes.

pub mod config;
pub mod monitor;
pub mod network;
pub mod state;
pub mod time;
pub mod webhook;
