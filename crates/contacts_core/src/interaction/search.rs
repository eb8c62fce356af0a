//! Search submission flow.
//!
//! # Responsibility
//! - Turn search-field input into index navigations.
//! - Decide push vs replace for navigation history.
//! - Track the `idle`/`searching` state and the displayed input value.
//!
//! # Invariants
//! - Only the first search from a page without `q` pushes a history entry.
//! - Only the latest navigation may update the loaded query (last wins).
//! - After a completed navigation the input shows the loaded query.

use super::routes::{index_location, query_from_location};
use log::debug;

/// One requested page load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub seq: u64,
    pub location: String,
    /// Replace the current history entry instead of pushing a new one.
    pub replace: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    Searching,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFlow {
    loaded_query: Option<String>,
    input_value: String,
    last_seq: u64,
    in_flight: Option<Navigation>,
}

impl SearchFlow {
    /// Flow for a page that was loaded with `loaded_query` as its `q`.
    pub fn new(loaded_query: Option<String>) -> Self {
        let input_value = loaded_query.clone().unwrap_or_default();
        Self {
            loaded_query,
            input_value,
            last_seq: 0,
            in_flight: None,
        }
    }

    pub fn loaded_query(&self) -> Option<&str> {
        self.loaded_query.as_deref()
    }

    pub fn input_value(&self) -> &str {
        &self.input_value
    }

    pub fn in_flight(&self) -> Option<&Navigation> {
        self.in_flight.as_ref()
    }

    /// Whether the next search leaves the null baseline.
    pub fn is_first_search(&self) -> bool {
        let pending_search = self
            .in_flight
            .as_ref()
            .is_some_and(|nav| query_from_location(&nav.location).is_some());
        self.loaded_query.is_none() && !pending_search
    }

    /// Records typed text and issues the matching index navigation.
    pub fn submit(&mut self, text: &str) -> Navigation {
        self.input_value = text.to_string();
        let replace = !self.is_first_search();
        self.begin(index_location(Some(text)), replace)
    }

    /// Starts any navigation (search, link, back/forward).
    ///
    /// Supersedes whatever was in flight.
    pub fn begin(&mut self, location: impl Into<String>, replace: bool) -> Navigation {
        self.last_seq += 1;
        let navigation = Navigation {
            seq: self.last_seq,
            location: location.into(),
            replace,
        };
        debug!(
            "event=navigation_start module=interaction seq={} replace={}",
            navigation.seq, navigation.replace
        );
        self.in_flight = Some(navigation.clone());
        navigation
    }

    /// Applies a finished navigation.
    ///
    /// Returns `false` and changes nothing when `seq` was superseded.
    pub fn complete(&mut self, seq: u64, loaded_query: Option<String>) -> bool {
        if seq != self.last_seq {
            debug!("event=navigation_complete module=interaction seq={seq} status=stale");
            return false;
        }

        self.input_value = loaded_query.clone().unwrap_or_default();
        self.loaded_query = loaded_query;
        self.in_flight = None;
        true
    }

    pub fn state(&self) -> SearchState {
        match &self.in_flight {
            Some(nav) if query_from_location(&nav.location).is_some() => SearchState::Searching,
            _ => SearchState::Idle,
        }
    }

    pub fn is_searching(&self) -> bool {
        self.state() == SearchState::Searching
    }
}

#[cfg(test)]
mod tests {
    use super::{SearchFlow, SearchState};

    #[test]
    fn link_navigation_is_not_searching() {
        let mut flow = SearchFlow::new(None);
        flow.begin("/contacts/abc", false);
        assert_eq!(flow.state(), SearchState::Idle);
    }

    #[test]
    fn back_navigation_syncs_input_to_loaded_query() {
        let mut flow = SearchFlow::new(Some("anna".to_string()));
        assert_eq!(flow.input_value(), "anna");

        let back = flow.begin("/?q=ann", false);
        assert!(flow.is_searching());
        assert!(flow.complete(back.seq, Some("ann".to_string())));
        assert_eq!(flow.input_value(), "ann");
        assert!(!flow.is_searching());
    }
}
