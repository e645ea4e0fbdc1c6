//! Typed entity graph for relationship visualization
//!
//! Nodes are entities (phone, email, social account, breach), links are
//! observed associations. The wire shape is exactly what the force-directed
//! renderer consumes: `{nodes: [{id, type, label}], links: [{source, target}]}`.

use serde::{Deserialize, Serialize};

/// Categories of graph entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Phone,
    Email,
    Social,
    Breach,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Phone => "phone",
            EntityKind::Email => "email",
            EntityKind::Social => "social",
            EntityKind::Breach => "breach",
        }
    }
}

/// Normalize an entity value for identity comparison.
///
/// Emails and breach names compare case-insensitively; phone numbers and
/// account URLs are compared as written (URL paths can be case-sensitive).
pub fn normalize_value(kind: EntityKind, value: &str) -> String {
    let trimmed = value.trim();
    match kind {
        EntityKind::Email | EntityKind::Breach => trimmed.to_lowercase(),
        EntityKind::Phone | EntityKind::Social => trimmed.to_string(),
    }
}

/// Stable node id derived from the entity value
pub fn node_id(kind: EntityKind, value: &str) -> String {
    format!("{}:{}", kind.as_str(), normalize_value(kind, value))
}

/// A graph entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub label: String,
}

/// An observed association between two entities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub source: String,
    pub target: String,
}

/// Entity graph: nodes unique by `(kind, normalized value)`, links in
/// discovery order. Built fresh per investigation, never mutated after.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, collapsing duplicates by `(kind, normalized value)`.
    /// The first occurrence wins: its label (first-seen casing) is kept.
    /// Returns the node id either way.
    pub fn add_node(&mut self, kind: EntityKind, value: &str, label: &str) -> String {
        let id = node_id(kind, value);
        if !self.nodes.iter().any(|n| n.id == id) {
            self.nodes.push(Node {
                id: id.clone(),
                kind,
                label: label.to_string(),
            });
        }
        id
    }

    /// Record an association between two existing nodes.
    ///
    /// Both endpoints must already be in the node set; a dangling link is a
    /// builder bug, not a recoverable runtime state.
    pub fn link(&mut self, source: &str, target: &str) {
        debug_assert!(self.contains(source), "dangling link source: {}", source);
        debug_assert!(self.contains(target), "dangling link target: {}", target);
        self.links.push(Link {
            source: source.to_string(),
            target: target.to_string(),
        });
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_dedup_by_normalized_value() {
        let mut graph = Graph::new();
        let a = graph.add_node(EntityKind::Email, "a@x.com", "a@x.com");
        let b = graph.add_node(EntityKind::Email, "A@X.com", "A@X.com");

        assert_eq!(a, b);
        assert_eq!(graph.node_count(), 1);
        // First-seen casing kept as label
        assert_eq!(graph.nodes[0].label, "a@x.com");
    }

    #[test]
    fn test_same_value_different_kind_stays_distinct() {
        let mut graph = Graph::new();
        graph.add_node(EntityKind::Email, "foo", "foo");
        graph.add_node(EntityKind::Breach, "foo", "foo");
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn test_links_reference_existing_nodes() {
        let mut graph = Graph::new();
        let hub = graph.add_node(EntityKind::Phone, "+12025550123", "+12025550123");
        let email = graph.add_node(EntityKind::Email, "a@x.com", "a@x.com");
        graph.link(&hub, &email);

        for link in &graph.links {
            assert!(graph.contains(&link.source));
            assert!(graph.contains(&link.target));
        }
    }

    #[test]
    fn test_wire_shape() {
        let mut graph = Graph::new();
        let hub = graph.add_node(EntityKind::Phone, "+12025550123", "+12025550123");
        let social = graph.add_node(EntityKind::Social, "https://twitter.com/x", "x");
        graph.link(&hub, &social);

        let json = serde_json::to_value(&graph).unwrap();
        assert_eq!(json["nodes"][0]["type"], "phone");
        assert_eq!(json["nodes"][1]["type"], "social");
        assert_eq!(json["links"][0]["source"], "phone:+12025550123");
    }
}
