//! Calendar-bucketed index tree: insertion, point lookup and interval scan.

pub mod index_tree;
pub mod level;
pub mod node;
pub mod scan;

pub use index_tree::IndexTree;
pub use level::Level;
pub use node::BucketNode;
pub use scan::Scan;
