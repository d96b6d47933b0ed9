//! Application layer of the preferences store.
//!
//! # What is the "application" layer? (for beginners)
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (the option types and snapshot in `prefs-core`) and the infrastructure
//! (files, permission queries, UI notifications).
//!
//! Code in this layer:
//!
//! - **Orchestrates** domain objects to fulfil a user goal (e.g., "change the
//!   temperature unit, refresh the badge, and save the result").
//! - **Depends on abstractions** (traits in `ports`) rather than concrete
//!   implementations, so storage and sinks can be swapped freely.
//! - **Does no file system access** of its own.
//!
//! # Sub-modules
//!
//! - **`ports`** – Collaborator traits and the `Collaborators` bundle.
//!
//! - **`persistence`** – The background save queue.  Only one save runs at a
//!   time and the newest snapshot always wins.
//!
//! - **`preferences_store`** – The store itself: getters, setters, side-effect
//!   dispatch and the revalidation rule.
//!
//! - **`lifecycle`** – Runs revalidation whenever the app becomes active.

pub mod lifecycle;
pub mod persistence;
pub mod ports;
pub mod preferences_store;
