//! Tabbed read-only projection of investigation results
//!
//! Pure selection, no business logic: a tab id picks a borrowed slice of
//! the result. An empty section still projects (with a defined placeholder
//! text), the tab is never omitted.

use crate::{Graph, InvestigationResult, SocialAccount};

/// Tab identifiers, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultTab {
    General,
    Accounts,
    Breaches,
    Emails,
    Graph,
}

impl ResultTab {
    pub const ALL: [ResultTab; 5] = [
        ResultTab::General,
        ResultTab::Accounts,
        ResultTab::Breaches,
        ResultTab::Emails,
        ResultTab::Graph,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ResultTab::General => "general",
            ResultTab::Accounts => "accounts",
            ResultTab::Breaches => "breaches",
            ResultTab::Emails => "emails",
            ResultTab::Graph => "graph",
        }
    }

    pub fn from_name(name: &str) -> Option<ResultTab> {
        Self::ALL.iter().copied().find(|t| t.name() == name)
    }

    /// Placeholder text shown when the projected section is empty
    pub fn empty_text(&self) -> &'static str {
        match self {
            ResultTab::General => "No data.",
            ResultTab::Accounts => "No accounts found.",
            ResultTab::Breaches => "No breaches found.",
            ResultTab::Emails => "No emails found.",
            ResultTab::Graph => "No graph data.",
        }
    }
}

/// A borrowed slice of an investigation result, keyed by tab
#[derive(Debug)]
pub enum TabView<'a> {
    General(&'a InvestigationResult),
    Accounts(&'a [SocialAccount]),
    Breaches(&'a [String]),
    Emails(&'a [String]),
    Graph(&'a Graph),
}

impl TabView<'_> {
    /// Whether the selected section has anything to show
    pub fn is_empty(&self) -> bool {
        match self {
            TabView::General(_) => false,
            TabView::Accounts(accounts) => accounts.is_empty(),
            TabView::Breaches(breaches) => breaches.is_empty(),
            TabView::Emails(emails) => emails.is_empty(),
            TabView::Graph(graph) => graph.nodes.is_empty(),
        }
    }
}

/// Select one tab's view of a result
pub fn project(result: &InvestigationResult, tab: ResultTab) -> TabView<'_> {
    match tab {
        ResultTab::General => TabView::General(result),
        ResultTab::Accounts => TabView::Accounts(&result.accounts),
        ResultTab::Breaches => TabView::Breaches(&result.breaches),
        ResultTab::Emails => TabView::Emails(&result.emails),
        ResultTab::Graph => TabView::Graph(&result.graph),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build_result, RawEnrichment, Subject};

    fn sample_result() -> InvestigationResult {
        let subject = Subject::parse("+12025550123").unwrap();
        let raw: RawEnrichment = serde_json::from_value(serde_json::json!({
            "valid": true,
            "emails": ["a@x.com"]
        }))
        .unwrap();
        build_result(&subject, raw)
    }

    #[test]
    fn test_tab_names_round_trip() {
        for tab in ResultTab::ALL {
            assert_eq!(ResultTab::from_name(tab.name()), Some(tab));
        }
        assert_eq!(ResultTab::from_name("bogus"), None);
    }

    #[test]
    fn test_empty_section_still_projects() {
        let result = sample_result();
        let view = project(&result, ResultTab::Accounts);
        assert!(view.is_empty());
        assert_eq!(ResultTab::Accounts.empty_text(), "No accounts found.");
    }

    #[test]
    fn test_populated_section_projects_data() {
        let result = sample_result();
        match project(&result, ResultTab::Emails) {
            TabView::Emails(emails) => assert_eq!(emails, ["a@x.com"]),
            other => panic!("wrong view: {:?}", other),
        }
    }

    #[test]
    fn test_graph_tab_always_has_hub() {
        let result = sample_result();
        let view = project(&result, ResultTab::Graph);
        assert!(!view.is_empty());
    }
}
