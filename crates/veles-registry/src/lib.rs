//! Registry id-map persistence built on the veles stream primitives.
//!
//! A registry assigns small integer ids to named items; those ids end up
//! baked into saved data, so they must survive the registry being rebuilt
//! in a different order. This crate persists `(id, name)` pairs to a map
//! file and resolves them back against the live registry on load:
//!
//! - [`PackedId`] - a `registry:item` id pair packed into one `u32`
//! - [`RegistryRecord`] - one persisted `(id, name)` pair
//! - [`IdMap`] - stored-id to live-id mapping loaded from a map file
//!
//! # Example
//!
//! ```no_run
//! use veles_registry::{IdMap, PackedId};
//!
//! let (map, missing) = IdMap::load("items.map", |name| {
//!     // resolve against the live registry
//!     (name == "core:stone").then(|| PackedId::new(0, 1))
//! })?;
//!
//! for name in &missing {
//!     eprintln!("unknown item: {name}");
//! }
//! # Ok::<(), veles_registry::Error>(())
//! ```

mod error;
mod id;
mod map;

pub mod name;

pub use error::{Error, Result};
pub use id::PackedId;
pub use map::{read_records, write_records, IdMap, RegistryRecord, NAME_MASK};
