//! User-facing surroundings of the program engine: who the user is,
//! which persona they chose, and milestone notifications.

pub mod identity;
pub mod notify;
pub mod profile;

pub use identity::{Identity, LocalIdentity};
pub use notify::{Milestone, Notifier, NullNotifier, SmtpConfig, SmtpNotifier};
pub use profile::{MemoryProfile, Persona, ProfileStore, UserProfile};
