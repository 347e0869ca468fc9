//! Read-only source access for the Guides documentation compiler.
//!
//! Documents, included files, and embedded resources (diagrams, literal
//! includes) are read through the [`Origin`] trait rather than the local
//! filesystem directly. This enables:
//!
//! - **Unit testing** without touching the real filesystem
//! - **Backend flexibility** (a directory tree, an archive, a remote source)
//! - **Clean separation** between compilation logic and I/O
//!
//! The compiler never writes through an [`Origin`]; rendered output is
//! emitted by a layer above this crate.
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Origin`] trait with `read()` and `exists()` methods
//! - [`FsOrigin`] implementation rooted at a source directory
//! - [`MemoryOrigin`] for testing (behind the `memory` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use guides_storage::{FsOrigin, Origin};
//!
//! let origin = FsOrigin::new("docs");
//! let text = origin.read("guide/intro.rst")?;
//! ```

mod fs;
#[cfg(feature = "memory")]
mod memory;
mod origin;

pub use fs::FsOrigin;
#[cfg(feature = "memory")]
pub use memory::MemoryOrigin;
pub use origin::{Origin, OriginError};
