//! Local key-value persistence for the Potaful client.
//!
//! Session, profile and onboarding data are kept in a single JSON file
//! managed by [`PreferenceStore`]. [`Session`] is an immutable snapshot of
//! that data handed to code that needs the current login.

pub mod error;
pub mod prefs;
pub mod session;

pub use error::StoreError;
pub use prefs::PreferenceStore;
pub use session::Session;
