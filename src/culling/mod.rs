//! Section visibility: bounded position sets, the tracer and the manager
//! that keeps its result current

pub mod position_set;
pub mod graph;
pub mod tracer;
pub mod manager;

pub use position_set::SectionPositionSet;
pub use graph::OcclusionGraph;
pub use tracer::OcclusionTracer;
pub use manager::{VisibilityGraphChanged, WorldOcclusionManager};
