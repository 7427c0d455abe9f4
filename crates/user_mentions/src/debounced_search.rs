// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Suggestions for the `@word` being typed.
//!
//! Every keystroke calls [`DebouncedSearch::query`], but a lookup is only
//! handed out by [`DebouncedSearch::poll`] once the user has paused for the
//! debounce delay. Lookups can finish in any order: only the result for the
//! most recent ticket is kept, anything older is dropped on arrival.
//!
//! The caller owns the clock. `now` is passed in so that hosts can drive the
//! search from their own timers.

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::directory::{DirectoryError, UserDirectory, MAX_SUGGESTIONS};
use crate::user_record::UserRecord;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Identifies one lookup handed out by [`DebouncedSearch::poll`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SearchTicket(u64);

/// A lookup the host should run against its directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchRequest {
    pub ticket: SearchTicket,
    pub fragment: String,
}

#[derive(Clone, Debug)]
struct Pending {
    fragment: String,
    due: Instant,
}

#[derive(Clone, Debug)]
pub struct DebouncedSearch {
    delay: Duration,
    pending: Option<Pending>,
    next_ticket: u64,
    in_flight: Option<SearchTicket>,
    suggestions: Vec<UserRecord>,
}

impl Default for DebouncedSearch {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl DebouncedSearch {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            next_ticket: 0,
            in_flight: None,
            suggestions: Vec::new(),
        }
    }

    /// The user typed `fragment`. Any earlier lookup, scheduled or running,
    /// is superseded. An empty fragment clears the suggestions.
    pub fn query(&mut self, fragment: &str, now: Instant) {
        self.in_flight = None;
        if fragment.is_empty() {
            self.pending = None;
            self.suggestions.clear();
            return;
        }
        self.pending = Some(Pending {
            fragment: fragment.to_owned(),
            due: now + self.delay,
        });
    }

    /// Stop suggesting. Lookups still running are ignored when they finish.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.in_flight = None;
        self.suggestions.clear();
    }

    /// Hand out the scheduled lookup once its delay has passed.
    pub fn poll(&mut self, now: Instant) -> Option<SearchRequest> {
        if self.pending.as_ref()?.due > now {
            return None;
        }
        let Pending { fragment, .. } = self.pending.take()?;
        let ticket = SearchTicket(self.next_ticket);
        self.next_ticket += 1;
        self.in_flight = Some(ticket);
        debug!(?ticket, %fragment, "Directory lookup due");
        Some(SearchRequest { ticket, fragment })
    }

    /// A lookup finished. Returns whether its result was used.
    pub fn resolve(
        &mut self,
        ticket: SearchTicket,
        result: Result<Vec<UserRecord>, DirectoryError>,
    ) -> bool {
        if self.in_flight != Some(ticket) {
            debug!(?ticket, "Ignoring a superseded directory lookup");
            return false;
        }
        self.in_flight = None;
        match result {
            Ok(mut users) => {
                users.truncate(MAX_SUGGESTIONS);
                self.suggestions = users;
            }
            Err(error) => {
                warn!(%error, "Directory lookup failed");
                self.suggestions.clear();
            }
        }
        true
    }

    /// Run the due lookup, if any, against `directory` straight away.
    pub fn run_due(&mut self, now: Instant, directory: &dyn UserDirectory) -> bool {
        let Some(request) = self.poll(now) else {
            return false;
        };
        let result = directory.search(&request.fragment);
        self.resolve(request.ticket, result)
    }

    pub fn suggestions(&self) -> &[UserRecord] {
        &self.suggestions
    }

    pub fn is_waiting(&self) -> bool {
        self.pending.is_some() || self.in_flight.is_some()
    }
}

#[cfg(test)]
mod test {
    use speculoos::prelude::*;

    use super::*;
    use crate::directory::StaticDirectory;

    fn directory() -> StaticDirectory {
        StaticDirectory::new(vec![
            UserRecord::new("u1", "Alice"),
            UserRecord::new("u2", "Bob"),
        ])
    }

    #[test]
    fn lookups_wait_for_the_debounce_delay() {
        let start = Instant::now();
        let mut search = DebouncedSearch::default();
        search.query("a", start);
        assert_that!(search.poll(start + Duration::from_millis(100))).is_none();

        search.query("al", start + Duration::from_millis(100));
        assert_that!(search.poll(start + Duration::from_millis(300))).is_none();

        let request = search.poll(start + Duration::from_millis(400)).unwrap();
        assert_eq!(request.fragment, "al");
        assert_that!(search.poll(start + Duration::from_millis(500))).is_none();
    }

    #[test]
    fn superseded_results_are_ignored() {
        let start = Instant::now();
        let mut search = DebouncedSearch::new(Duration::ZERO);
        search.query("a", start);
        let first = search.poll(start).unwrap();
        search.query("b", start);
        let second = search.poll(start).unwrap();

        assert!(search.resolve(second.ticket, Ok(vec![UserRecord::new("u2", "Bob")])));
        assert!(!search.resolve(first.ticket, Ok(vec![UserRecord::new("u1", "Alice")])));
        assert_that!(search.suggestions().to_vec())
            .is_equal_to(vec![UserRecord::new("u2", "Bob")]);
    }

    #[test]
    fn failures_leave_no_suggestions() {
        let start = Instant::now();
        let mut search = DebouncedSearch::new(Duration::ZERO);
        search.query("a", start);
        assert!(search.run_due(start, &directory()));
        assert_eq!(search.suggestions().len(), 1);

        search.query("b", start);
        let request = search.poll(start).unwrap();
        search.resolve(
            request.ticket,
            Err(DirectoryError::Unavailable("offline".to_owned())),
        );
        assert!(search.suggestions().is_empty());
        assert!(!search.is_waiting());
    }

    #[test]
    fn an_empty_fragment_clears_everything() {
        let start = Instant::now();
        let mut search = DebouncedSearch::new(Duration::ZERO);
        search.query("b", start);
        search.run_due(start, &directory());
        search.query("", start);
        assert!(search.suggestions().is_empty());
        assert!(!search.run_due(start, &directory()));
    }
}
