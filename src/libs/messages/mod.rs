//! User-facing messages.
//!
//! [`Message`] enumerates every text the CLI shows, [`display`] holds their
//! wording, and [`macros`] prints them.

pub mod display;
pub mod macros;
pub mod types;

pub use types::Message;
