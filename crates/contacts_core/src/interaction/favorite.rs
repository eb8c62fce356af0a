//! Optimistic favorite toggle.
//!
//! # Invariants
//! - Displayed value is the in-flight submission's value when one exists,
//!   otherwise the last server-confirmed value.
//! - The accessible label names the action a click would perform.
//! - A submission always carries the negation of the displayed value.

use log::debug;
use serde::Serialize;

/// Form field name carrying the submitted value.
pub const FAVORITE_FIELD: &str = "favorite";

pub const LABEL_ADD: &str = "Add to favorites";
pub const LABEL_REMOVE: &str = "Remove from favorites";
pub const GLYPH_ON: &str = "★";
pub const GLYPH_OFF: &str = "☆";

/// Interprets a submitted `favorite` form value. Only `"true"` is true.
pub fn parse_favorite_field(value: Option<&str>) -> bool {
    value == Some("true")
}

/// Wire literal for a favorite value.
pub fn favorite_form_value(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Everything needed to draw the control for one state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FavoriteView {
    pub favorite: bool,
    pub glyph: &'static str,
    pub label: &'static str,
    /// Value a click would submit.
    pub submit_value: &'static str,
}

impl FavoriteView {
    pub fn for_value(favorite: bool) -> Self {
        Self {
            favorite,
            glyph: if favorite { GLYPH_ON } else { GLYPH_OFF },
            label: if favorite { LABEL_REMOVE } else { LABEL_ADD },
            submit_value: favorite_form_value(!favorite),
        }
    }
}

/// One submitted toggle, numbered in submission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FavoriteSubmission {
    pub seq: u64,
    pub favorite: bool,
}

/// Pending-vs-confirmed state of one contact's favorite control.
///
/// Only the latest submission counts as pending. Responses are matched to
/// submissions by `seq`; an older response never clears a newer pending
/// value and never overwrites a newer confirmed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FavoriteToggle {
    confirmed: bool,
    in_flight: Option<FavoriteSubmission>,
    last_seq: u64,
    confirmed_seq: u64,
}

impl FavoriteToggle {
    pub fn new(confirmed: bool) -> Self {
        Self {
            confirmed,
            in_flight: None,
            last_seq: 0,
            confirmed_seq: 0,
        }
    }

    pub fn displayed(&self) -> bool {
        self.in_flight
            .map_or(self.confirmed, |submission| submission.favorite)
    }

    pub fn confirmed(&self) -> bool {
        self.confirmed
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn view(&self) -> FavoriteView {
        FavoriteView::for_value(self.displayed())
    }

    /// Starts a submission of the negated displayed value.
    ///
    /// A second submit while one is in flight supersedes it.
    pub fn submit(&mut self) -> FavoriteSubmission {
        self.last_seq += 1;
        let submission = FavoriteSubmission {
            seq: self.last_seq,
            favorite: !self.displayed(),
        };
        self.in_flight = Some(submission);
        debug!(
            "event=favorite_submit module=interaction seq={} value={}",
            submission.seq, submission.favorite
        );
        submission
    }

    /// Records the server's answer to submission `seq`.
    ///
    /// Returns `true` when `seq` was the pending submission and it is now
    /// settled.
    pub fn resolve(&mut self, seq: u64, server_value: bool) -> bool {
        if seq < self.confirmed_seq {
            debug!("event=favorite_resolve module=interaction seq={seq} status=stale");
            return false;
        }
        self.confirmed = server_value;
        self.confirmed_seq = seq;
        self.settle(seq)
    }

    /// Drops the pending value after submission `seq` failed.
    ///
    /// A failure of a superseded submission changes nothing.
    pub fn fail(&mut self, seq: u64) -> bool {
        self.settle(seq)
    }

    fn settle(&mut self, seq: u64) -> bool {
        if self.in_flight.is_some_and(|pending| pending.seq == seq) {
            self.in_flight = None;
            return true;
        }
        false
    }
}
