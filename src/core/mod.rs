//! Core types for YAML Buddy
//!
//! Error handling shared by every module. The domain types live in their own
//! modules ([`crate::placeholder`], [`crate::yaml`], [`crate::locator`]).

pub mod error;

pub use error::{ErrorContext, YamlBuddyError, user_friendly_error};
