//! Suggestion selector: picks reviewers to CC on a PR that is not fully
//! approved yet.
//!
//! Assignees who can approve something take priority and are surfaced as
//! assigned CCs. For whatever they and the existing approvals do not cover, a
//! greedy pass suggests approvers out of a deterministically shuffled
//! candidate pool, preferring candidates that cover the most still-unapproved
//! directories, so one suggestion can settle several sibling directories at
//! once.
//!
//! The shuffle is driven by SplitMix64 over the evaluation seed. The exact
//! algorithm and constants are a compatibility contract: the same (seed,
//! candidates) pair must yield the same suggestions on every platform and in
//! every release.

use std::collections::BTreeSet;

use log::warn;

use super::coverage::unapproved_dirs;
use super::ledger::ApprovalLedger;
use super::owners::{reverse_map, OwnersView};

const SPLITMIX64_GOLDEN: u64 = 0x9E37_79B9_7F4A_7C15;

/// SplitMix64 sequence generator (Steele, Lea & Flood's 64-bit finalizer).
pub(crate) struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    /// The seed is xored with the golden-ratio increment so that seed 0 does
    /// not start from an all-zero state.
    pub(crate) fn new(seed: i64) -> Self {
        Self {
            state: (seed as u64) ^ SPLITMIX64_GOLDEN,
        }
    }

    pub(crate) fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(SPLITMIX64_GOLDEN);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

/// Descending Fisher-Yates shuffle of `items` under `seed`.
///
/// Index selection is `next_u64() % (i + 1)`; the modulo bias is irrelevant
/// at candidate-pool sizes and keeping the mapping trivial keeps it stable.
pub fn shuffled(mut items: Vec<String>, seed: i64) -> Vec<String> {
    let mut rng = SplitMix64::new(seed);
    for i in (1..items.len()).rev() {
        let j = (rng.next_u64() % (i as u64 + 1)) as usize;
        items.swap(i, j);
    }
    items
}

/// Greedy most-covering suggestions for everything `known` identities leave
/// unapproved, in ascending order.
///
/// Each round scans the shuffled pool and keeps the first candidate whose
/// leaf coverage of the remaining directories is strictly larger than any
/// earlier candidate's, then removes what that pick covers. A directory no
/// candidate can cover is left behind (and logged) rather than failing the
/// evaluation.
pub fn suggested_ccs(view: &OwnersView, known: &BTreeSet<String>) -> Vec<String> {
    let pool = shuffled(view.potential_approvers(), view.seed());
    let reverse = reverse_map(&view.leaf_map());
    let mut unapproved = unapproved_dirs(view, known);
    let mut picks = BTreeSet::new();

    while !unapproved.is_empty() {
        let mut best: Option<&str> = None;
        let mut best_covered = 0usize;
        for candidate in &pool {
            let covered = reverse
                .get(candidate)
                .map(|dirs| dirs.intersection(&unapproved).count())
                .unwrap_or(0);
            if covered > best_covered {
                best = Some(candidate.as_str());
                best_covered = covered;
            }
        }
        let Some(pick) = best else {
            warn!(
                "no potential approver covers {:?}; leaving them unapproved",
                unapproved
            );
            break;
        };
        for dir in &reverse[pick] {
            unapproved.remove(dir);
        }
        picks.insert(pick.to_string());
    }

    picks.into_iter().collect()
}

/// Assignees able to approve at least one directory the current ledger leaves
/// unapproved, in ascending order. Tested against the effective approver
/// sets, so an assigned root approver surfaces for any uncovered directory.
pub fn assigned_ccs(view: &OwnersView, ledger: &ApprovalLedger) -> Vec<String> {
    let reverse = reverse_map(&view.effective_map());
    let unapproved = unapproved_dirs(view, &ledger.identities());
    ledger
        .assignees()
        .iter()
        .filter(|assignee| {
            reverse
                .get(*assignee)
                .map(|dirs| dirs.intersection(&unapproved).next().is_some())
                .unwrap_or(false)
        })
        .cloned()
        .collect()
}
