//! Structural analyses over a loaded [`Graph`](crate::Graph).
//!
//! Every analysis borrows the graph immutably and returns an owned result,
//! so independent analyses never interfere with each other.
//!
//! ## Operations
//!
//! | Operation | Algorithm | Cost |
//! |-----------|-----------|------|
//! | Degrees, centrality | Adjacency list lengths | O(V) |
//! | Strongly connected components | Tarjan, explicit work stack | O(V + E) |
//! | Simple cycles | Johnson, explicit work stack | O((V + E)(C + 1)) for C cycles |
//! | Clustering coefficient | Neighbor marking | O(sum of neighbor out-degrees) |

pub mod clustering;
pub mod cycles;
pub mod degree;
pub mod scc;

pub use clustering::{average_clustering, clustering, local_clustering};
pub use cycles::{CycleAbort, CycleCount, CycleLimits, SimpleCycles, count_simple_cycles};
pub use degree::DegreeAnalyzer;
pub use scc::{SccResult, extract_largest, strongly_connected_components};
