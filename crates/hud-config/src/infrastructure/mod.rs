//! Infrastructure layer: adapters between the settings engine and the outside
//! world.
//!
//! - **`storage`** – where the settings document is kept (a file on disk, or
//!   memory in tests).
//! - **`host`** – read-only signals from the host application: the remote
//!   advisory list, the chroma color, and the locale.

pub mod host;
pub mod storage;
