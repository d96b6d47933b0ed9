//! Domain entities for the preferences store.
//!
//! This module contains pure business logic with no infrastructure dependencies.
//!
//! # What lives here? (for beginners)
//!
//! The innermost layer of the store defines *what* a preference is, without
//! caring *where* it is stored or *who* reacts when it changes:
//!
//! - The five option kinds and the rules for building them from raw integers.
//! - Which collaborators must be notified when each kind changes.
//! - The snapshot that groups one value per kind.
//! - The unit conversions that give the temperature and distance options
//!   their visible meaning.
//!
//! Code in outer layers (application, infrastructure) depends on the domain,
//! but the domain never depends on them.

/// Unit conversions driven by the temperature and distance options.
pub mod conversion;

/// The option kinds and their value domains.
///
/// See [`option::PreferenceOption`] for the shared contract.
pub mod option;

/// The settings snapshot, the unit of persistence.
pub mod snapshot;
