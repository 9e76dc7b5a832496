//! Wait-free ring-backed section profiler: `start`/`stop_and_collect`,
//! `begin`/`end`/scoped `section`, and tree reconstruction over the
//! collected records. See the crate's module docs for the record layout
//! and reconstruction stack machine.

pub mod location;
pub mod profiler;
pub mod record;
pub mod registry;
pub mod report;
pub mod ring;
pub mod tree;

pub use location::{OwnedProfileLocation, ProfileLocation};
pub use profiler::{global, Profiler, Section};
pub use record::{ProfileRecord, RecordType};
pub use registry::LocationRegistry;
pub use report::{print_list, print_tree};
pub use ring::RecordRing;
pub use tree::{reconstruct, ProfileNode, ProfileReport};
