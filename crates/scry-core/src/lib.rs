//! Core domain model for scry: the mirrored project/snapshot/analysis
//! hierarchy, the run-keyed metadata registry, and the schema interpreters
//! that turn server-provided schemas into forms and tables.

pub mod dataset;
pub mod form;
pub mod records;
pub mod run;
pub mod tree;

pub use run::{AnalysisRun, AnalysisRunRegistry, RunInfo};
pub use tree::{HierarchyNode, HierarchyTree, Selection};
