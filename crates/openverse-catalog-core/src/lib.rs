//! Core types for the Openverse catalog ingestion helpers.
//!
//! Holds the pieces that have no dependency on a workflow engine:
//! media types, schedule parsing, Hive-style partition prefixes and the
//! static provider identity tables.

pub mod media;
pub mod partition;
pub mod providers;
pub mod schedule;

pub use media::MediaType;
pub use partition::date_partition_for_prefix;
pub use schedule::{Cadence, Schedule};
