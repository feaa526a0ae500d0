//! # Vitrin Architecture
//!
//! Vitrin is the decision core of a real-estate back office: which listings are
//! featured on the homepage, which projects rotate in the carousel, how a
//! project's media is categorized, and which records a search returns. It is a
//! library first; the `vitrin` binary is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (crates/vitrin)                                        │
//! │  - Parses arguments, renders results, owns stdout/stderr    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Resolves SKUs and ids, parses slot text                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Reads state, asks the rules, performs the writes         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Rules (rules/*.rs)                                         │
//! │  - Pure functions: slot policy, media precedence, filters   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - DataStore trait, FileStore and InMemoryStore             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: Rules Decide, Commands Write
//!
//! Everything in [`rules`] is a pure function of its arguments. It never reads a
//! store and never logs a write. Commands gather the facts the rules need (how many
//! slots are taken, which media exist), then apply the answer. That keeps the
//! business rules testable with plain values and usable from any persistence layer.
//!
//! ## Module Overview
//!
//! - [`api`]: the facade, entry point for all operations
//! - [`commands`]: hero, carousel, media, listings and import operations
//! - [`rules`]: slot policy, slot allocation, media reconciliation, filter builders
//! - [`store`]: storage abstraction and implementations
//! - [`model`]: `Listing`, `Unit`, `Media` and the closed enums
//! - [`normalize`]: locale, phone and localized title helpers
//! - [`config`]: layered configuration
//! - [`init`]: data directory discovery
//! - [`error`]: error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod model;
pub mod normalize;
pub mod rules;
pub mod store;
