//! The combination engine: directory filtering, tree rendering, selection
//! bookkeeping and the streaming writer that produces the combined artifact.

pub mod decode;
pub mod engine;
pub mod filter;
pub mod paths;
pub mod selection;
pub mod tree;

pub use engine::{CombineEvent, CombineJob, CombineSummary, CombinerEngine, Progress, RunHandle};
pub use selection::{DirectoryAdd, SelectionSet};
pub use tree::{NodeKind, TreeNode};
