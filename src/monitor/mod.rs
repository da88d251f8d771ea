//! Monitor layer: decide when the host's addresses need announcing.
//!
//! This module provides:
//! - Change detection against the last announced state ([`detect`], [`ChangeResult`])
//! - The notification text ([`compose_message`])
//! - The tick-driven orchestrator ([`Poller`], [`PollOptions`], [`TickOutcome`])

mod change;
mod error;
mod message;
mod poller;


pub use change::{ChangeResult, detect};
pub use error::MonitorError;
pub use message::compose_message;
pub use poller::{NotifyReason, PollOptions, Poller, TickOutcome};
