//! Coverage engine: matches ledger identities against the effective approver
//! set of every governing directory and derives the unapproved set and the
//! per-directory status records.
//!
//! Membership tests are case-insensitive on both sides; the outputs carry the
//! ledger's display casing. Every iteration runs over sorted sets so the
//! observable results are deterministic.

use std::collections::{BTreeMap, BTreeSet};

use super::ledger::ApprovalLedger;
use super::owners::OwnersView;
use super::types::DirectoryStatus;

/// Governing directory -> display logins of ledger identities that cover it.
pub fn directory_approvers(
    view: &OwnersView,
    ledger: &ApprovalLedger,
) -> BTreeMap<String, BTreeSet<String>> {
    let mut result = BTreeMap::new();
    for dir in view.governing_dirs() {
        let effective = view.effective_approvers(dir);
        let covering: BTreeSet<String> = ledger
            .grants()
            .filter(|(identity, _)| effective.contains(*identity))
            .map(|(_, grant)| grant.login.clone())
            .collect();
        result.insert(dir.to_string(), covering);
    }
    result
}

/// Governing directories not covered by any of `known` (lowercase identities).
pub fn unapproved_dirs(view: &OwnersView, known: &BTreeSet<String>) -> BTreeSet<String> {
    view.governing_dirs()
        .filter(|dir| {
            let effective = view.effective_approvers(dir);
            effective.intersection(known).next().is_none()
        })
        .map(str::to_string)
        .collect()
}

/// One status record per governing directory, ascending path order. The
/// covering logins of an approved directory are sorted by their lowercase
/// form but keep the ledger's casing.
pub fn directory_statuses(view: &OwnersView, ledger: &ApprovalLedger) -> Vec<DirectoryStatus> {
    directory_approvers(view, ledger)
        .into_iter()
        .map(|(directory, approvers)| {
            if approvers.is_empty() {
                DirectoryStatus::Unapproved { directory }
            } else {
                let mut approvers: Vec<String> = approvers.into_iter().collect();
                approvers.sort_by_key(|login| login.to_lowercase());
                DirectoryStatus::Approved {
                    directory,
                    approvers,
                }
            }
        })
        .collect()
}
