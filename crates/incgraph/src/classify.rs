//! Component classification and the labeling pass.
//!
//! A node's *component* is the first `/`-separated segment of its `file`
//! path (`base/logging.h` belongs to `base`). The classifier writes the
//! component and its palette color onto every node; the labeling pass then
//! decides which nodes show their file path in a rendered graph.
//!
//! Both passes only overwrite attributes with values derived from the
//! graph's structure and `file` attributes, so running them again changes
//! nothing.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::analysis::degree::{DegreeAnalyzer, top_k};
use crate::graph::Graph;
use crate::types::{COLOR_ATTR, COMPONENT_ATTR, LABEL_ATTR, Label, NodeIndex};

/// Color for components the palette does not name.
pub const DEFAULT_COLOR: &str = "#000000";

/// Number of most-included nodes labeled by default.
pub const DEFAULT_LABEL_TOP_K: usize = 10;

/// Colors of the top-level directories of a Chromium checkout.
const CHROMIUM_PALETTE: [(&str, &str); 38] = [
    ("third_party", "#33CC33"),
    ("chrome", "#FF33FF"),
    ("components", "#FF9900"),
    ("out", "#00CCCC"),
    ("content", "#800000"),
    ("ui", "#808000"),
    ("net", "#7B68EE"),
    ("services", "#0000FF"),
    ("media", "#FF66CC"),
    ("extensions", "#FF3399"),
    ("base", "#20B2AA"),
    ("remoting", "#8B4513"),
    ("cc", "#87CEEB"),
    ("gpu", "#228B22"),
    ("device", "#006400"),
    ("mojo", "#2F4F4F"),
    ("v8", "#800080"),
    ("storage", "#008080"),
    ("google_apis", "#7FFF00"),
    ("sandbox", "#556B2F"),
    ("pdf", "#DAA520"),
    ("ppapi", "#FF8C00"),
    ("headless", "#008B8B"),
    ("ipc", "#CD853F"),
    ("printing", "#696969"),
    ("crypto", "#E0FFFF"),
    ("gin", "#FF0000"),
    ("tools", "#A9A9A9"),
    ("skia", "#DDA0DD"),
    ("url", "#008B8B"),
    ("sql", "#90EE90"),
    ("dbus", "#D3D3D3"),
    ("testing", "#C0C0C0"),
    ("apps", "#4169E1"),
    ("build", "#FF1493"),
    ("codelabs", "#FFDAB9"),
    ("chromeos", "#FA8072"),
    ("ash", "#FF00FF"),
];

/// Immutable mapping from component name to hex color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: BTreeMap<String, String>,
    default_color: String,
}

impl Palette {
    /// Build a palette from explicit entries.
    #[must_use]
    pub fn new(colors: BTreeMap<String, String>, default_color: impl Into<String>) -> Self {
        Self {
            colors,
            default_color: default_color.into(),
        }
    }

    /// The built-in palette for Chromium source trees.
    #[must_use]
    pub fn chromium() -> Self {
        let colors = CHROMIUM_PALETTE
            .iter()
            .map(|(component, color)| ((*component).to_string(), (*color).to_string()))
            .collect();
        Self::new(colors, DEFAULT_COLOR)
    }

    /// The same entries with a different default color.
    #[must_use]
    pub fn with_default_color(mut self, color: impl Into<String>) -> Self {
        self.default_color = color.into();
        self
    }

    /// Color of a component, the default color if it has no entry.
    #[must_use]
    pub fn color_for(&self, component: &str) -> &str {
        self.colors
            .get(component)
            .map_or(self.default_color.as_str(), String::as_str)
    }

    /// Color used for unknown and empty components.
    #[must_use]
    pub fn default_color(&self) -> &str {
        &self.default_color
    }

    /// Number of named components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns `true` if only the default color is available.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::chromium()
    }
}

/// The component of a path: everything before the first `/`.
///
/// ```
/// assert_eq!(incgraph::component_of("base/files/file.h"), "base");
/// assert_eq!(incgraph::component_of("config.h"), "config.h");
/// assert_eq!(incgraph::component_of(""), "");
/// ```
#[must_use]
pub fn component_of(path: &str) -> &str {
    path.split('/').next().unwrap_or("")
}

/// Write `component` and `color` onto every node.
///
/// Returns the distinct non-empty components, sorted.
pub fn classify(graph: &mut Graph, palette: &Palette) -> BTreeSet<String> {
    let mut components = BTreeSet::new();
    for node in graph.nodes() {
        let component = component_of(graph.file(node)).to_string();
        let color = palette.color_for(&component).to_string();
        graph.set_attribute(node, COLOR_ATTR, color);
        if !component.is_empty() {
            components.insert(component.clone());
        }
        graph.set_attribute(node, COMPONENT_ATTR, component);
    }
    debug!(components = components.len(), "Classified nodes");
    components
}

/// Outcome of [`apply_labels`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LabelSummary {
    /// Nodes labeled for ranking among the most included.
    pub top: usize,
    /// Nodes labeled only so that their component shows at least one label.
    pub forced: usize,
}

impl LabelSummary {
    /// Total number of shown labels.
    #[must_use]
    pub fn shown(&self) -> usize {
        self.top + self.forced
    }
}

/// Write `label` onto every node.
///
/// The `top_k` most included nodes show their file path and all other nodes
/// are hidden. Then, for every non-empty component, its most included node
/// (lowest index on ties) is shown as well. Reads the `component` attribute,
/// so [`classify`] must run first.
pub fn apply_labels(graph: &mut Graph, top_k_count: usize) -> LabelSummary {
    let in_degree = DegreeAnalyzer::new(graph).in_degree_map().clone();

    let mut shown = vec![false; graph.node_count()];
    for ranked in top_k(&in_degree, top_k_count) {
        shown[ranked.node.index()] = true;
    }
    let top = shown.iter().filter(|&&s| s).count();

    // Most included node per component; strict `>` keeps the lowest index
    let mut best: BTreeMap<String, NodeIndex> = BTreeMap::new();
    for node in graph.nodes() {
        let Some(component) = graph
            .attribute(node, COMPONENT_ATTR)
            .and_then(|value| value.as_str())
            .filter(|c| !c.is_empty())
        else {
            continue;
        };
        match best.get_mut(component) {
            Some(current) if in_degree[node] > in_degree[*current] => *current = node,
            Some(_) => {}
            None => {
                best.insert(component.to_string(), node);
            }
        }
    }

    let mut forced = 0;
    for &node in best.values() {
        if !shown[node.index()] {
            shown[node.index()] = true;
            forced += 1;
        }
    }

    for node in graph.nodes() {
        let label = if shown[node.index()] {
            Label::Shown(graph.file(node).to_string())
        } else {
            Label::Hidden
        };
        graph.set_attribute(node, LABEL_ATTR, label);
    }

    debug!(top, forced, "Applied labels");
    LabelSummary { top, forced }
}
