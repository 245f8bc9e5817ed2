//! Application layer: the settings store and the use cases built on it.
//!
//! - **`store`** – [`store::SettingsStore`], the in-memory source of truth and
//!   its resolution rules.
//! - **`migrate`** – version-gated rules that upgrade a freshly loaded store.
//! - **`persistence`** – the load/save orchestration, including first-run
//!   synthesis and recovery from corrupt documents.

pub mod migrate;
pub mod persistence;
pub mod store;
