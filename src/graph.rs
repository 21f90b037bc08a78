//! Dependency graph export.
//!
//! Turns a tracker's node map into a directed graph (provided item → required
//! item) and renders it as Graphviz DOT or PlantUML. Nodes and edges appear
//! in node map order, so the same inputs always render the same text.
//!
//! A kind filter drops every node whose kind does not match, together with
//! the edges touching it.
//!
//! # Examples
//!
//! ```rust
//! use deparse_cli::core::{Item, NodeMap};
//! use deparse_cli::graph::{GraphFormat, render};
//! use deparse_cli::pattern::KindFilter;
//!
//! let mut nodes = NodeMap::new();
//! nodes.merge(&Item::new("js:module", "app"), &[Item::new("js:module", "lodash")]);
//!
//! let uml = render(&nodes, &KindFilter::any(), GraphFormat::PlantUml);
//! assert!(uml.contains("app +-- lodash"));
//! ```

use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;
use std::fmt::Write;

use crate::core::{Item, NodeMap};
use crate::pattern::KindFilter;

/// Output syntax for `--graph`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum GraphFormat {
    /// Graphviz DOT
    Dot,
    /// PlantUML package diagram
    #[value(name = "plantuml")]
    PlantUml,
}

/// Items and the requirements between them.
pub struct DependencyGraph {
    graph: DiGraph<Item, ()>,
    node_map: HashMap<Item, NodeIndex>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        }
    }

    /// Builds the graph of every node map entry whose kind matches `filter`.
    pub fn from_nodes(nodes: &NodeMap, filter: &KindFilter) -> Self {
        let mut graph = Self::new();
        for (item, requires) in nodes.iter() {
            if !filter.matches(&item.kind) {
                continue;
            }
            graph.ensure_node(item);
            for required in requires.iter().filter(|required| filter.matches(&required.kind)) {
                graph.add_dependency(item, required);
            }
        }
        graph
    }

    fn ensure_node(&mut self, item: &Item) -> NodeIndex {
        if let Some(&index) = self.node_map.get(item) {
            index
        } else {
            let index = self.graph.add_node(item.clone());
            self.node_map.insert(item.clone(), index);
            index
        }
    }

    /// `from` requires `to`.
    pub fn add_dependency(&mut self, from: &Item, to: &Item) {
        let from_idx = self.ensure_node(from);
        let to_idx = self.ensure_node(to);
        if !self.graph.contains_edge(from_idx, to_idx) {
            self.graph.add_edge(from_idx, to_idx, ());
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Items `item` requires, in insertion order.
    pub fn dependencies(&self, item: &Item) -> Vec<&Item> {
        let Some(&index) = self.node_map.get(item) else {
            return Vec::new();
        };
        // petgraph walks outgoing edges newest first
        let mut found: Vec<&Item> = self.graph.neighbors(index).map(|next| &self.graph[next]).collect();
        found.reverse();
        found
    }

    /// Graphviz DOT, one node per item labelled with its name.
    pub fn to_dot(&self) -> String {
        let dot = Dot::with_attr_getters(
            &self.graph,
            &[Config::EdgeNoLabel, Config::NodeNoLabel],
            &|_, _| String::new(),
            &|_, (_, item)| {
                format!("label = \"{}\" tooltip = \"{}\" ", escape(&item.name), escape(&item.kind))
            },
        );
        format!("{dot:?}")
    }

    /// PlantUML package diagram.
    pub fn to_plantuml(&self) -> String {
        let mut out = String::from("@startuml\nskinparam packageStyle rect\n");
        for index in self.graph.node_indices() {
            let _ = writeln!(out, "package {} {{}}", self.graph[index].name);
        }
        for edge in self.graph.raw_edges() {
            let _ = writeln!(
                out,
                "{} +-- {}",
                self.graph[edge.source()].name,
                self.graph[edge.target()].name
            );
        }
        out.push_str("@enduml\n");
        out
    }

    pub fn render(&self, format: GraphFormat) -> String {
        match format {
            GraphFormat::Dot => self.to_dot(),
            GraphFormat::PlantUml => self.to_plantuml(),
        }
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Renders the node map entries matching `filter` in `format`.
pub fn render(nodes: &NodeMap, filter: &KindFilter, format: GraphFormat) -> String {
    DependencyGraph::from_nodes(nodes, filter).render(format)
}
