//! Output generation for the persisted snapshot.
//!
//! One submodule today:
//!
//! - [`snapshot`]: writes the run's full record set to a fixed-schema CSV
//!   file, atomically replacing the previous snapshot
//!
//! The snapshot is the collaborator boundary to the presentation layer,
//! which reads it read-only and depends on the exact column set and order.

pub mod snapshot;
