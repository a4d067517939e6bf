//! Per-view state owned by the presentation layer
//!
//! The tree builder never sees any of this; views pass the relevant bits
//! (years, show details) down as plain values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::statement::StatementKind;

/// Company/year selection and panel toggles for one statements view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub ticker: String,
    pub year: i32,
    /// Panels currently expanded; all of them by default
    #[serde(default = "all_statements")]
    pub expanded: BTreeSet<StatementKind>,
    #[serde(default = "default_show_details")]
    pub show_details: bool,
}

fn all_statements() -> BTreeSet<StatementKind> {
    StatementKind::ALL.into_iter().collect()
}

fn default_show_details() -> bool {
    true
}

impl ViewState {
    pub fn new(ticker: impl Into<String>, year: i32) -> Self {
        Self {
            ticker: ticker.into(),
            year,
            expanded: all_statements(),
            show_details: true,
        }
    }

    pub fn is_expanded(&self, kind: StatementKind) -> bool {
        self.expanded.contains(&kind)
    }

    /// Flip one panel between expanded and collapsed; returns the new state
    pub fn toggle(&mut self, kind: StatementKind) -> bool {
        if self.expanded.remove(&kind) {
            false
        } else {
            self.expanded.insert(kind);
            true
        }
    }

    /// Switch company/year and start the request that will load it
    ///
    /// An unchanged selection still starts a new request, so a failed load
    /// can be retried.
    pub fn select(&mut self, ticker: impl Into<String>, year: i32, sequencer: &RequestSequencer) -> RequestTicket {
        self.ticker = ticker.into();
        self.year = year;
        sequencer.begin()
    }
}

/// Identifies one fetch started by [`RequestSequencer::begin`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Last-request-wins sequencing for asynchronous loads
///
/// Every new request supersedes all earlier ones; a response is applied
/// only while its ticket is still current.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> RequestTicket {
        RequestTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_panels_expanded_by_default() {
        let state = ViewState::new("NOVO-B", 2024);
        assert!(StatementKind::ALL.iter().all(|kind| state.is_expanded(*kind)));
        assert!(state.show_details);
    }

    #[test]
    fn test_toggle() {
        let mut state = ViewState::new("AAPL", 2024);
        assert!(!state.toggle(StatementKind::CashFlow));
        assert!(!state.is_expanded(StatementKind::CashFlow));
        assert!(state.is_expanded(StatementKind::BalanceSheet));
        assert!(state.toggle(StatementKind::CashFlow));
        assert!(state.is_expanded(StatementKind::CashFlow));
    }

    #[test]
    fn test_latest_request_wins() {
        let sequencer = RequestSequencer::new();
        let first = sequencer.begin();
        let second = sequencer.begin();
        assert!(!sequencer.is_current(first));
        assert!(sequencer.is_current(second));
        assert!(second > first);
    }

    #[test]
    fn test_select_supersedes_earlier_requests() {
        let sequencer = RequestSequencer::new();
        let mut state = ViewState::new("AAPL", 2024);

        let stale = state.select("AAPL", 2023, &sequencer);
        let fresh = state.select("MSFT", 2023, &sequencer);
        assert_eq!(state.ticker, "MSFT");
        assert_eq!(state.year, 2023);
        assert!(!sequencer.is_current(stale));
        assert!(sequencer.is_current(fresh));
    }

    #[test]
    fn test_reselecting_same_company_retries() {
        let sequencer = RequestSequencer::new();
        let mut state = ViewState::new("NOVO-B", 2024);
        let failed = sequencer.begin();

        let retry = state.select("NOVO-B", 2024, &sequencer);
        assert_ne!(retry, failed);
        assert!(sequencer.is_current(retry));
        assert!(!sequencer.is_current(failed));
        assert_eq!(state, ViewState::new("NOVO-B", 2024));
    }

    #[test]
    fn test_serde_defaults() {
        let state: ViewState = serde_json::from_str(r#"{"ticker": "NOVO-B", "year": 2024}"#).unwrap();
        assert_eq!(state, ViewState::new("NOVO-B", 2024));

        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"income_statement\""));
    }
}
