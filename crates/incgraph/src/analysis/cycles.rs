//! Simple-cycle enumeration (Johnson's algorithm).
//!
//! [`SimpleCycles`] is a lazy iterator: each call to `next` resumes the
//! circuit search where the previous cycle was found. Self-loops are reported
//! first as length-1 cycles. Then, for every non-trivial strongly connected
//! component, the search starts at the component's lowest-index node `s`,
//! reports every elementary circuit through `s`, removes `s`, and re-splits
//! the rest of the component.
//!
//! The number of simple cycles can grow exponentially with the density of a
//! component. [`count_simple_cycles`] takes a [`CycleLimits`] guard and
//! records which limit stopped it instead of running unbounded.

use std::fmt;
use std::mem;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, warn};

use crate::analysis::scc::tarjan;
use crate::graph::Graph;
use crate::types::NodeIndex;

/// How many search steps run between deadline checks.
const DEADLINE_CHECK_INTERVAL: u64 = 1024;

/// Default for [`CycleLimits::max_cycles`].
pub const DEFAULT_MAX_CYCLES: u64 = 10_000_000;

/// Default for [`CycleLimits::time_budget`].
pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_secs(300);

/// Guard for [`count_simple_cycles`]. `None` disables a limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleLimits {
    /// Stop after this many cycles.
    pub max_cycles: Option<u64>,
    /// Stop once this much wall-clock time has elapsed.
    pub time_budget: Option<Duration>,
}

impl CycleLimits {
    /// No limits at all.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            max_cycles: None,
            time_budget: None,
        }
    }
}

impl Default for CycleLimits {
    fn default() -> Self {
        Self {
            max_cycles: Some(DEFAULT_MAX_CYCLES),
            time_budget: Some(DEFAULT_TIME_BUDGET),
        }
    }
}

/// The guard that stopped an enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "kebab-case")]
pub enum CycleAbort {
    /// More than `limit` cycles exist.
    CycleLimit {
        /// The configured maximum.
        limit: u64,
    },
    /// The time budget ran out.
    TimeBudget {
        /// The configured budget in seconds.
        #[serde(rename = "budget-secs")]
        budget_secs: u64,
    },
}

impl fmt::Display for CycleAbort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CycleLimit { limit } => write!(f, "stopped after {limit} cycles"),
            Self::TimeBudget { budget_secs } => {
                write!(f, "stopped after the {budget_secs}s time budget")
            }
        }
    }
}

/// Result of [`count_simple_cycles`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CycleCount {
    /// Cycles found. A lower bound when `aborted` is set.
    pub count: u64,
    /// The guard that tripped, if any.
    pub aborted: Option<CycleAbort>,
}

impl CycleCount {
    /// Returns `true` if every cycle was counted.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.aborted.is_none()
    }
}

/// One level of the circuit search.
#[derive(Debug, Clone, Copy)]
struct Frame {
    node: NodeIndex,
    /// Position of the next successor to try.
    next: usize,
    /// A circuit back to the start was found below this frame.
    closed: bool,
}

/// Circuit search rooted at the lowest node of one component.
#[derive(Debug)]
struct CircuitSearch {
    start: NodeIndex,
    members: Vec<NodeIndex>,
    frames: Vec<Frame>,
    path: Vec<NodeIndex>,
}

/// What one step of the enumeration produced.
enum Found {
    SelfLoop(NodeIndex),
    /// The current search path is a circuit.
    Circuit,
}

/// Lazy iterator over every simple cycle of a graph.
///
/// Each cycle is a list of nodes in traversal order; the edge from the last
/// node back to the first closes it. Every cycle is reported exactly once,
/// starting from its lowest-index node.
///
/// # Examples
///
/// ```
/// use incgraph::{Graph, SimpleCycles, file_attrs};
///
/// let mut graph = Graph::new();
/// for id in ["a", "b", "c"] {
///     graph.add_node(id, file_attrs(id))?;
/// }
/// graph.add_edge("a", "b")?;
/// graph.add_edge("b", "c")?;
/// graph.add_edge("c", "a")?;
///
/// let cycles: Vec<_> = SimpleCycles::new(&graph).collect();
/// assert_eq!(cycles.len(), 1);
/// assert_eq!(cycles[0].len(), 3);
/// # Ok::<(), incgraph::Error>(())
/// ```
#[derive(Debug)]
pub struct SimpleCycles<'g> {
    graph: &'g Graph,
    self_loops: std::vec::IntoIter<NodeIndex>,
    /// Non-trivial components still to search.
    pending: Vec<Vec<NodeIndex>>,
    search: Option<CircuitSearch>,
    in_scope: Vec<bool>,
    blocked: Vec<bool>,
    blocked_by: Vec<Vec<NodeIndex>>,
    deadline: Option<Instant>,
    steps: u64,
    timed_out: bool,
}

impl<'g> SimpleCycles<'g> {
    /// Prepare the enumeration. The graph's components are computed here;
    /// no cycle is searched until the iterator is advanced.
    #[must_use]
    pub fn new(graph: &'g Graph) -> Self {
        let self_loops: Vec<NodeIndex> =
            graph.nodes().filter(|&n| graph.has_self_loop(n)).collect();

        let all: Vec<NodeIndex> = graph.nodes().collect();
        let mut pending: Vec<Vec<NodeIndex>> = tarjan(graph, &all)
            .into_iter()
            .filter(|component| component.len() > 1)
            .collect();
        // Popped from the back, so the component holding the lowest index goes first
        pending.sort_unstable_by(|a, b| b[0].cmp(&a[0]));

        debug!(
            self_loops = self_loops.len(),
            components = pending.len(),
            "Prepared cycle enumeration"
        );

        let n = graph.node_count();
        Self {
            graph,
            self_loops: self_loops.into_iter(),
            pending,
            search: None,
            in_scope: vec![false; n],
            blocked: vec![false; n],
            blocked_by: vec![Vec::new(); n],
            deadline: None,
            steps: 0,
            timed_out: false,
        }
    }

    /// Stop the enumeration once `deadline` has passed.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Returns `true` if the iterator ended because the deadline passed.
    #[must_use]
    pub fn timed_out(&self) -> bool {
        self.timed_out
    }

    fn advance(&mut self) -> Option<Found> {
        if let Some(node) = self.self_loops.next() {
            return Some(Found::SelfLoop(node));
        }

        loop {
            if self.timed_out {
                return None;
            }
            if self.search.is_none() {
                let members = self.pending.pop()?;
                self.begin(members);
            }
            if self.resume() {
                return Some(Found::Circuit);
            }
            self.finish();
        }
    }

    fn begin(&mut self, members: Vec<NodeIndex>) {
        for &m in &members {
            self.in_scope[m.index()] = true;
            self.blocked[m.index()] = false;
            self.blocked_by[m.index()].clear();
        }
        let start = members[0];
        self.blocked[start.index()] = true;
        self.search = Some(CircuitSearch {
            start,
            members,
            frames: vec![Frame {
                node: start,
                next: 0,
                closed: false,
            }],
            path: vec![start],
        });
    }

    /// Run the current search until it finds a circuit (`true`) or is
    /// exhausted (`false`).
    fn resume(&mut self) -> bool {
        let graph = self.graph;
        let Some(search) = self.search.as_mut() else {
            return false;
        };

        while let Some(frame) = search.frames.last_mut() {
            self.steps += 1;
            if self.steps % DEADLINE_CHECK_INTERVAL == 0
                && self.deadline.is_some_and(|d| Instant::now() >= d)
            {
                self.timed_out = true;
                return false;
            }

            let v = frame.node;
            let successors = graph.successors(v);

            if let Some(&w) = successors.get(frame.next) {
                frame.next += 1;
                // Self-loops were reported up front
                if w == v || !self.in_scope[w.index()] {
                    continue;
                }
                if w == search.start {
                    frame.closed = true;
                    return true;
                }
                if !self.blocked[w.index()] {
                    self.blocked[w.index()] = true;
                    search.path.push(w);
                    search.frames.push(Frame {
                        node: w,
                        next: 0,
                        closed: false,
                    });
                }
                continue;
            }

            let Frame { closed, .. } = *frame;
            search.frames.pop();
            search.path.pop();

            if closed {
                unblock(&mut self.blocked, &mut self.blocked_by, v);
            } else {
                for &w in successors {
                    let waiting = &mut self.blocked_by[w.index()];
                    if w != v && self.in_scope[w.index()] && !waiting.contains(&v) {
                        waiting.push(v);
                    }
                }
            }

            if let Some(parent) = search.frames.last_mut() {
                parent.closed |= closed;
            }
        }

        false
    }

    /// Drop the start node of the finished search and queue what remains.
    fn finish(&mut self) {
        let Some(search) = self.search.take() else {
            return;
        };
        if self.timed_out {
            return;
        }

        for &m in &search.members {
            self.in_scope[m.index()] = false;
        }
        let rest: Vec<NodeIndex> = search
            .members
            .into_iter()
            .filter(|&m| m != search.start)
            .collect();

        let mut split: Vec<Vec<NodeIndex>> = tarjan(self.graph, &rest)
            .into_iter()
            .filter(|component| component.len() > 1)
            .collect();
        split.sort_unstable_by(|a, b| b[0].cmp(&a[0]));
        self.pending.extend(split);
    }

    fn current_path(&self) -> Vec<NodeIndex> {
        self.search
            .as_ref()
            .map(|search| search.path.clone())
            .unwrap_or_default()
    }
}

impl Iterator for SimpleCycles<'_> {
    type Item = Vec<NodeIndex>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.advance()? {
            Found::SelfLoop(node) => Some(vec![node]),
            Found::Circuit => Some(self.current_path()),
        }
    }
}

/// Clear `node`'s blocked flag and, transitively, every node waiting on it.
fn unblock(blocked: &mut [bool], blocked_by: &mut [Vec<NodeIndex>], node: NodeIndex) {
    let mut stack = vec![node];
    while let Some(u) = stack.pop() {
        blocked[u.index()] = false;
        for w in mem::take(&mut blocked_by[u.index()]) {
            if blocked[w.index()] {
                stack.push(w);
            }
        }
    }
}

/// Count the simple cycles of `graph` within `limits`.
///
/// The cycle limit only trips when a cycle beyond the limit exists, so a
/// graph with exactly `max_cycles` cycles is counted completely. A tripped
/// guard is logged at warn level and recorded in the result.
#[must_use]
pub fn count_simple_cycles(graph: &Graph, limits: &CycleLimits) -> CycleCount {
    let mut cycles = SimpleCycles::new(graph);
    if let Some(deadline) = limits
        .time_budget
        .and_then(|budget| Instant::now().checked_add(budget))
    {
        cycles = cycles.with_deadline(deadline);
    }

    let mut count: u64 = 0;
    let mut aborted = None;
    while cycles.advance().is_some() {
        if let Some(limit) = limits.max_cycles.filter(|&limit| count >= limit) {
            aborted = Some(CycleAbort::CycleLimit { limit });
            break;
        }
        count += 1;
    }

    if aborted.is_none() && cycles.timed_out() {
        aborted = Some(CycleAbort::TimeBudget {
            budget_secs: limits.time_budget.map_or(0, |b| b.as_secs()),
        });
    }

    if let Some(reason) = aborted {
        warn!(count, %reason, "Cycle enumeration guard tripped; count is partial");
    } else {
        debug!(count, "Counted simple cycles");
    }

    CycleCount { count, aborted }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::file_attrs;
    use std::collections::HashSet;

    fn graph(n: usize, edges: &[(usize, usize)]) -> Graph {
        let mut g = Graph::new();
        for i in 0..n {
            g.add_node(format!("n{i}"), file_attrs(&format!("dir/{i}.h")))
                .unwrap();
        }
        for &(a, b) in edges {
            g.add_edge_indices(NodeIndex(a), NodeIndex(b));
        }
        g
    }

    fn cycles(g: &Graph) -> Vec<Vec<usize>> {
        SimpleCycles::new(g)
            .map(|c| c.into_iter().map(NodeIndex::index).collect())
            .collect()
    }

    #[test]
    fn triangle_has_one_cycle() {
        let g = graph(3, &[(0, 1), (1, 2), (2, 0)]);
        assert_eq!(cycles(&g), vec![vec![0, 1, 2]]);
    }

    #[test]
    fn self_loop_is_a_cycle_of_length_one() {
        let g = graph(2, &[(0, 0), (0, 1)]);
        assert_eq!(cycles(&g), vec![vec![0]]);
    }

    #[test]
    fn dag_has_no_cycles() {
        let g = graph(4, &[(0, 1), (0, 2), (1, 3), (2, 3)]);
        assert!(cycles(&g).is_empty());
        let count = count_simple_cycles(&g, &CycleLimits::default());
        assert_eq!(count.count, 0);
        assert!(count.is_complete());
    }

    #[test]
    fn overlapping_cycles_share_a_node() {
        // 0 -> 1 -> 0 and 0 -> 2 -> 0
        let g = graph(3, &[(0, 1), (1, 0), (0, 2), (2, 0)]);
        let found: HashSet<Vec<usize>> = cycles(&g).into_iter().collect();
        assert_eq!(found, HashSet::from([vec![0, 1], vec![0, 2]]));
    }

    #[test]
    fn complete_digraph_on_three_nodes() {
        let edges: Vec<_> = (0..3)
            .flat_map(|a| (0..3).filter(move |&b| b != a).map(move |b| (a, b)))
            .collect();
        let g = graph(3, &edges);
        let found = cycles(&g);

        // Three 2-cycles and both orientations of the triangle
        assert_eq!(found.len(), 5);
        assert_eq!(found.iter().filter(|c| c.len() == 2).count(), 3);
        assert_eq!(found.iter().filter(|c| c.len() == 3).count(), 2);
        let unique: HashSet<_> = found.iter().cloned().collect();
        assert_eq!(unique.len(), 5);
    }

    #[test]
    fn self_loop_inside_component_is_not_repeated() {
        let g = graph(2, &[(0, 0), (0, 1), (1, 0)]);
        let found = cycles(&g);
        assert_eq!(found, vec![vec![0], vec![0, 1]]);
    }

    #[test]
    fn separate_components_are_all_searched() {
        let g = graph(5, &[(0, 1), (1, 0), (2, 3), (3, 4), (4, 2), (1, 2)]);
        assert_eq!(cycles(&g), vec![vec![0, 1], vec![2, 3, 4]]);
    }

    #[test]
    fn cycle_limit_trips_only_past_the_limit() {
        let edges: Vec<_> = (0..3)
            .flat_map(|a| (0..3).filter(move |&b| b != a).map(move |b| (a, b)))
            .collect();
        let g = graph(3, &edges);

        let exact = CycleLimits {
            max_cycles: Some(5),
            time_budget: None,
        };
        assert_eq!(
            count_simple_cycles(&g, &exact),
            CycleCount {
                count: 5,
                aborted: None
            }
        );

        let short = CycleLimits {
            max_cycles: Some(3),
            time_budget: None,
        };
        let partial = count_simple_cycles(&g, &short);
        assert_eq!(partial.count, 3);
        assert_eq!(partial.aborted, Some(CycleAbort::CycleLimit { limit: 3 }));
    }

    #[test]
    fn expired_deadline_stops_dense_search() {
        // K8 has far more than a thousand simple cycles
        let n = 8;
        let edges: Vec<_> = (0..n)
            .flat_map(|a| (0..n).filter(move |&b| b != a).map(move |b| (a, b)))
            .collect();
        let g = graph(n, &edges);

        let mut cycles = SimpleCycles::new(&g).with_deadline(Instant::now());
        let seen = cycles.by_ref().count();
        assert!(cycles.timed_out());
        assert!(seen < 8_000);
    }

    #[test]
    fn zero_budget_reports_time_abort() {
        let n = 8;
        let edges: Vec<_> = (0..n)
            .flat_map(|a| (0..n).filter(move |&b| b != a).map(move |b| (a, b)))
            .collect();
        let g = graph(n, &edges);

        let limits = CycleLimits {
            max_cycles: None,
            time_budget: Some(Duration::ZERO),
        };
        let result = count_simple_cycles(&g, &limits);
        assert_eq!(
            result.aborted,
            Some(CycleAbort::TimeBudget { budget_secs: 0 })
        );
    }

    #[test]
    fn unbounded_limits_disable_both_guards() {
        let limits = CycleLimits::unbounded();
        assert!(limits.max_cycles.is_none());
        assert!(limits.time_budget.is_none());
    }
}
