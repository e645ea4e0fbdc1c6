//! Normalized investigation records and the entity-graph builder
//!
//! `build_result` is a pure transformation from a raw backend payload to a
//! per-subject record plus its entity graph. It never fails: missing or
//! malformed sections have already degraded to empty at the deserialization
//! boundary, and everything else defaults.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::{EntityKind, GeosocialFootprint, Graph, RawEnrichment, Subject};

/// Known platform domains for account URL classification.
///
/// Substring match, first hit wins. Classification is presentation metadata
/// only; an unrecognized URL is "unknown", never an error.
const PLATFORM_DOMAINS: &[(&str, &str)] = &[
    ("facebook.com", "facebook"),
    ("twitter.com", "twitter"),
    ("instagram.com", "instagram"),
    ("linkedin.com", "linkedin"),
    ("github.com", "github"),
    ("t.me", "telegram"),
    ("telegram.org", "telegram"),
    ("tiktok.com", "tiktok"),
    ("youtube.com", "youtube"),
    ("reddit.com", "reddit"),
    ("snapchat.com", "snapchat"),
    ("vk.com", "vk"),
    ("pinterest.com", "pinterest"),
    ("twitch.tv", "twitch"),
];

/// Infer the platform name from an account URL
pub fn infer_platform(url: &str) -> &'static str {
    let lower = url.to_lowercase();
    PLATFORM_DOMAINS
        .iter()
        .find(|(domain, _)| lower.contains(domain))
        .map(|(_, platform)| *platform)
        .unwrap_or("unknown")
}

/// Best-effort handle extraction from a profile URL (last path segment)
fn handle_from_url(url: &str) -> Option<&str> {
    let segment = url.trim_end_matches('/').rsplit('/').next()?;
    if segment.is_empty() || segment.contains('.') || segment.contains(':') {
        None
    } else {
        Some(segment)
    }
}

/// A discovered social account, normalized for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialAccount {
    pub platform: String,
    pub handle: String,
    pub url: String,
}

/// Normalized record for one subject.
///
/// Created fresh per successful response, immutable once built, replaced
/// wholesale when a new search begins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestigationResult {
    pub subject: String,
    pub valid: bool,
    pub country: Option<String>,
    pub carrier: Option<String>,
    pub line_type: Option<String>,
    pub name: Option<String>,
    pub accounts: Vec<SocialAccount>,
    pub emails: Vec<String>,
    pub breaches: Vec<String>,
    pub email_breaches: Vec<String>,
    pub geosocial: Option<GeosocialFootprint>,
    pub graph: Graph,
}

/// Build the normalized record and entity graph for one subject.
///
/// The graph is a star per investigation: the subject is the hub (a phone
/// node for phone subjects, a social node for handles), and every email,
/// account and breach derived from this response links directly to it.
/// A bare validity payload yields exactly the hub node and zero links.
pub fn build_result(subject: &Subject, raw: RawEnrichment) -> InvestigationResult {
    let hub_kind = if subject.is_phone() {
        EntityKind::Phone
    } else {
        EntityKind::Social
    };

    let mut graph = Graph::new();
    let hub = graph.add_node(hub_kind, subject.value(), subject.value());

    // Emails: case-insensitive dedup, first-seen casing retained
    let mut emails = Vec::new();
    let mut seen_emails = HashSet::new();
    for email in &raw.emails {
        let email = email.trim();
        if email.is_empty() || !seen_emails.insert(email.to_lowercase()) {
            continue;
        }
        let id = graph.add_node(EntityKind::Email, email, email);
        graph.link(&hub, &id);
        emails.push(email.to_string());
    }

    // Accounts: dedup by URL, discovery order preserved
    let mut accounts = Vec::new();
    let mut seen_urls = HashSet::new();
    for entry in &raw.accounts {
        let url = entry.url().trim();
        if url.is_empty() || !seen_urls.insert(url.to_string()) {
            continue;
        }
        let handle = entry
            .username()
            .or_else(|| handle_from_url(url))
            .unwrap_or(url)
            .to_string();
        let id = graph.add_node(EntityKind::Social, url, &handle);
        if id != hub {
            graph.link(&hub, &id);
        }
        accounts.push(SocialAccount {
            platform: infer_platform(url).to_string(),
            handle,
            url: url.to_string(),
        });
    }

    // Breaches: one node per unique name across both breach lists
    let mut seen_breaches = HashSet::new();
    for name in raw.breaches.iter().chain(raw.email_breaches.iter()) {
        let name = name.trim();
        if name.is_empty() || !seen_breaches.insert(name.to_lowercase()) {
            continue;
        }
        let id = graph.add_node(EntityKind::Breach, name, name);
        graph.link(&hub, &id);
    }

    InvestigationResult {
        subject: subject.value().to_string(),
        valid: raw.valid,
        country: raw.country,
        carrier: raw.carrier,
        line_type: raw.line_type,
        name: raw.name,
        accounts,
        emails,
        breaches: raw.breaches,
        email_breaches: raw.email_breaches,
        geosocial: raw.geosocial,
        graph,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phone_subject() -> Subject {
        Subject::parse("+12025550123").unwrap()
    }

    #[test]
    fn test_infer_platform() {
        assert_eq!(infer_platform("https://twitter.com/x"), "twitter");
        assert_eq!(infer_platform("https://www.FACEBOOK.com/someone"), "facebook");
        assert_eq!(infer_platform("https://t.me/someone"), "telegram");
        assert_eq!(infer_platform("https://example.org/profile"), "unknown");
    }

    #[test]
    fn test_handle_from_url() {
        assert_eq!(handle_from_url("https://twitter.com/x"), Some("x"));
        assert_eq!(handle_from_url("https://twitter.com/x/"), Some("x"));
        assert_eq!(handle_from_url("https://twitter.com"), None);
    }

    #[test]
    fn test_star_topology_end_to_end() {
        let raw: RawEnrichment = serde_json::from_value(serde_json::json!({
            "valid": true,
            "country": "US",
            "accounts": ["https://twitter.com/x"],
            "emails": ["a@x.com", "A@X.com"],
            "breaches": ["Foo"]
        }))
        .unwrap();

        let result = build_result(&phone_subject(), raw);

        // phone + social + one email (case collapse) + one breach
        assert_eq!(result.graph.node_count(), 4);
        assert_eq!(result.graph.link_count(), 3);

        let hub = node_hub_id(&result);
        for link in &result.graph.links {
            assert_eq!(link.source, hub);
            assert!(result.graph.contains(&link.target));
        }

        assert_eq!(result.emails, vec!["a@x.com"]);
        assert_eq!(result.accounts.len(), 1);
        assert_eq!(result.accounts[0].platform, "twitter");
        assert_eq!(result.accounts[0].handle, "x");
    }

    fn node_hub_id(result: &InvestigationResult) -> String {
        crate::node_id(EntityKind::Phone, &result.subject)
    }

    #[test]
    fn test_bare_validity_payload_yields_hub_only() {
        let raw: RawEnrichment =
            serde_json::from_value(serde_json::json!({"valid": false})).unwrap();
        let result = build_result(&phone_subject(), raw);

        assert_eq!(result.graph.node_count(), 1);
        assert_eq!(result.graph.link_count(), 0);
        assert_eq!(result.graph.nodes[0].kind, EntityKind::Phone);
    }

    #[test]
    fn test_breach_shared_across_lists_collapses() {
        let raw: RawEnrichment = serde_json::from_value(serde_json::json!({
            "breaches": ["Foo", "Bar"],
            "email_breaches": ["foo"]
        }))
        .unwrap();
        let result = build_result(&phone_subject(), raw);

        let breach_nodes = result
            .graph
            .nodes
            .iter()
            .filter(|n| n.kind == EntityKind::Breach)
            .count();
        assert_eq!(breach_nodes, 2);
        // Raw lists are preserved as reported
        assert_eq!(result.breaches, vec!["Foo", "Bar"]);
        assert_eq!(result.email_breaches, vec!["foo"]);
    }

    #[test]
    fn test_no_duplicate_nodes_for_any_payload() {
        let raw: RawEnrichment = serde_json::from_value(serde_json::json!({
            "accounts": ["https://twitter.com/x", "https://twitter.com/x"],
            "emails": ["a@x.com", "A@X.COM", "b@x.com"],
            "breaches": ["Foo", "Foo"]
        }))
        .unwrap();
        let result = build_result(&phone_subject(), raw);

        let mut seen = HashSet::new();
        for node in &result.graph.nodes {
            assert!(seen.insert(node.id.clone()), "duplicate node: {}", node.id);
        }
    }

    #[test]
    fn test_handle_subject_hub_is_social() {
        let subject = Subject::parse("shadow_user").unwrap();
        let raw = RawEnrichment {
            geosocial: Some(GeosocialFootprint::default()),
            ..Default::default()
        };
        let result = build_result(&subject, raw);

        assert_eq!(result.graph.node_count(), 1);
        assert_eq!(result.graph.nodes[0].kind, EntityKind::Social);
        assert!(result.geosocial.is_some());
    }
}
