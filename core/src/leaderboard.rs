use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Reverse;
use serde::{Deserialize, Serialize};

use crate::Count;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player_name: String,
    pub score: u32,
    pub level_reached: Count,
}

impl LeaderboardEntry {
    pub fn new(player_name: impl Into<String>, score: u32, level_reached: Count) -> Self {
        Self {
            player_name: player_name.into(),
            score,
            level_reached,
        }
    }
}

/// Append-only list of scores, kept in submission order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: LeaderboardEntry) {
        self.entries.push(entry);
    }

    /// Entries in the order they were submitted.
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn best_score(&self) -> Option<u32> {
        self.entries.iter().map(|entry| entry.score).max()
    }

    /// Display order: score descending, ties in submission order. Storage order is untouched.
    pub fn ranked(&self) -> RankedView<'_> {
        let mut order: Vec<usize> = (0..self.entries.len()).collect();
        order.sort_by_key(|&index| Reverse(self.entries[index].score));
        RankedView {
            entries: &self.entries,
            order,
        }
    }
}

impl From<Vec<LeaderboardEntry>> for Leaderboard {
    fn from(entries: Vec<LeaderboardEntry>) -> Self {
        Self { entries }
    }
}

/// Sorted view over a [`Leaderboard`]; can be iterated any number of times.
#[derive(Clone, Debug)]
pub struct RankedView<'a> {
    entries: &'a [LeaderboardEntry],
    order: Vec<usize>,
}

impl<'a> RankedView<'a> {
    /// Yields `(rank, entry)` with ranks starting at 1.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &'a LeaderboardEntry)> + Clone + '_ {
        let entries = self.entries;
        self.order
            .iter()
            .enumerate()
            .map(move |(rank, &index)| (rank + 1, &entries[index]))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
