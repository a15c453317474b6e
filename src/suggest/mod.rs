//! Suggestion engine
//!
//! Maps the signals of an analyzed page to prioritized findings. Every rule
//! in [`rules::RULES`] runs on every evaluation; the resulting findings are
//! ordered by priority, keeping rule order within a priority.

mod finding;
pub mod rules;

pub use finding::{Finding, Priority};

use crate::extract::Page;
use crate::probe::SiteChecks;

/// Result of one engine evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suggestions {
    /// No rule fired
    None,
    /// At least one rule fired; most urgent first
    Found(Vec<Finding>),
}

impl Suggestions {
    /// Runs every rule against the page and the site checks
    pub fn evaluate(page: &Page, checks: &SiteChecks) -> Self {
        let mut findings: Vec<Finding> = rules::RULES
            .iter()
            .filter_map(|rule| rule(page, checks))
            .collect();

        // sort_by_key is stable, so rule order survives within a priority
        findings.sort_by_key(|finding| finding.priority.rank());

        tracing::debug!("{} finding(s) for {}", findings.len(), page.url());

        if findings.is_empty() {
            Self::None
        } else {
            Self::Found(findings)
        }
    }

    pub fn findings(&self) -> &[Finding] {
        match self {
            Self::None => &[],
            Self::Found(findings) => findings,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Number of findings with the given priority
    pub fn count(&self, priority: Priority) -> usize {
        self.findings()
            .iter()
            .filter(|finding| finding.priority == priority)
            .count()
    }
}
