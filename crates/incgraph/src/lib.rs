//! # incgraph: Include-Graph Analysis
//!
//! incgraph loads a directed dependency graph extracted from a source tree
//! (nodes are files, an edge `a -> b` means "a includes b"), computes its
//! structural statistics, annotates nodes for visualization, and extracts the
//! largest strongly connected component.
//!
//! ## Design Philosophy
//!
//! - **Load once, analyze many** - One immutable [`Graph`] feeds every analysis
//! - **Owned results** - Analyses borrow the graph and return plain structs
//! - **Deterministic** - Every ranking and tie-break follows node insertion order
//! - **Bounded** - Cycle counting carries a guard instead of running unbounded
//! - **Library first, CLI second**
//!
//! ## Quick Start
//!
//! ```no_run
//! use incgraph::{Palette, StatsOptions, apply_labels, classify, compute_statistics, load_graph};
//!
//! let (mut graph, _report) = load_graph("chromium.graphml")?;
//!
//! let stats = compute_statistics(&graph, &StatsOptions::default());
//! println!("{} nodes, {} simple cycles", stats.node_count, stats.cycles.count);
//!
//! classify(&mut graph, &Palette::chromium());
//! apply_labels(&mut graph, 10);
//! incgraph::save_graph(&graph, "annotated.graphml")?;
//! # Ok::<(), incgraph::Error>(())
//! ```

pub mod analysis;
pub mod classify;
pub mod config;
mod error;
mod graph;
pub mod io;
pub mod stats;
mod types;

pub use analysis::{
    CycleAbort, CycleCount, CycleLimits, DegreeAnalyzer, SccResult, SimpleCycles,
    average_clustering, clustering, count_simple_cycles, extract_largest, local_clustering,
    strongly_connected_components,
};
pub use classify::{LabelSummary, Palette, apply_labels, classify, component_of};
pub use config::{AnalysisConfig, CycleConfig};
pub use error::{Error, Result};
pub use graph::Graph;
pub use io::{LoadReport, graph_from_document, graph_to_document, load_graph, save_graph};
pub use stats::{GraphStats, RankedFile, StatsOptions, compute_statistics};
pub use types::{
    AttrValue, Attributes, COLOR_ATTR, COMPONENT_ATTR, FILE_ATTR, HIDDEN_LABEL, LABEL_ATTR, Label,
    NodeIndex, NodeMap, Ranked, file_attrs,
};
