//! Infrastructure layer for the preferences store.
//!
//! Contains the adapters behind the application ports: the TOML document on
//! disk, broadcast channels for UI and lifecycle events, the headless host's
//! sinks, and the in-memory doubles used by tests.
//!
//! **Dependency rule**: this layer may depend on `application` and `prefs_core`,
//! but MUST NOT be imported by the `application` layer outside of tests.

pub mod events;
pub mod host;
pub mod mock;
pub mod storage;
