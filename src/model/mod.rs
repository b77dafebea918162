//! Reference data model: the code hierarchy and the pathway registry.
//!
//! Both structures are constructed once at startup and shared read-only
//! across all scoring calls.

pub mod hierarchy;
pub mod pathway;

pub use hierarchy::{CategoryId, HierarchyEntry, HierarchyIndex};
pub use pathway::{CarePathway, PathwayRegistry, PathwayStep};
