//! Approval ledger for a single PR evaluation.
//!
//! Entries are keyed by the lowercase login, so re-approving under different
//! casing or switching between approval and lgtm updates the existing slot
//! (last write wins). The original casing of the latest write is kept for
//! display. Assignees are tracked alongside; they are not approvals but feed
//! the suggestion selector.

use std::collections::{BTreeMap, BTreeSet};

use super::types::{ApprovalGrant, ApprovalKind};

#[derive(Debug, Default)]
pub struct ApprovalLedger {
    /// Lowercase login -> latest grant.
    grants: BTreeMap<String, ApprovalGrant>,
    /// Lowercase assignee logins.
    assignees: BTreeSet<String>,
}

impl ApprovalLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an explicit approval.
    pub fn add_approver(&mut self, login: &str, reference: &str, no_issue: bool) {
        self.insert(login, ApprovalKind::Approve, reference, no_issue);
    }

    /// Records an lgtm; counts towards coverage like an approval.
    pub fn add_lgtmer(&mut self, login: &str, reference: &str, no_issue: bool) {
        self.insert(login, ApprovalKind::Lgtm, reference, no_issue);
    }

    /// Records the author approving their own PR.
    pub fn add_author_self_approver(&mut self, login: &str, reference: &str, no_issue: bool) {
        self.insert(login, ApprovalKind::AuthorSelf, reference, no_issue);
    }

    /// Records assigned reviewers.
    pub fn add_assignees<I, S>(&mut self, logins: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for login in logins {
            self.assignees.insert(login.as_ref().to_lowercase());
        }
    }

    fn insert(&mut self, login: &str, kind: ApprovalKind, reference: &str, no_issue: bool) {
        self.grants.insert(
            login.to_lowercase(),
            ApprovalGrant {
                login: login.to_string(),
                kind,
                reference: reference.to_string(),
                no_issue,
            },
        );
    }

    /// Grants in ascending lowercase-login order.
    pub fn grants(&self) -> impl Iterator<Item = (&str, &ApprovalGrant)> {
        self.grants.iter().map(|(login, grant)| (login.as_str(), grant))
    }

    /// Lowercase identities of everyone who approved, lgtm'ed or
    /// self-approved.
    pub fn identities(&self) -> BTreeSet<String> {
        self.grants.keys().cloned().collect()
    }

    /// Lowercase assignee logins in ascending order.
    pub fn assignees(&self) -> &BTreeSet<String> {
        &self.assignees
    }

    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }

    /// True when the author's self-approval carries the no-issue flag.
    pub fn author_self_approved_no_issue(&self) -> bool {
        self.grants
            .values()
            .any(|grant| grant.kind == ApprovalKind::AuthorSelf && grant.no_issue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins_and_is_case_insensitive() {
        let mut ledger = ApprovalLedger::new();
        ledger.add_approver("Alice", "ref-1", false);
        ledger.add_lgtmer("ALICE", "ref-2", true);

        let grants: Vec<_> = ledger.grants().collect();
        assert_eq!(grants.len(), 1);
        let (identity, grant) = grants[0];
        assert_eq!(identity, "alice");
        assert_eq!(grant.login, "ALICE");
        assert_eq!(grant.kind, ApprovalKind::Lgtm);
        assert_eq!(grant.reference, "ref-2");
        assert!(grant.no_issue);
    }

    #[test]
    fn test_identities_are_lowercased_and_sorted() {
        let mut ledger = ApprovalLedger::new();
        ledger.add_approver("Charlie", "REFERENCE", false);
        ledger.add_approver("alice", "REFERENCE", false);
        ledger.add_author_self_approver("Bob", "REFERENCE", false);

        let identities: Vec<_> = ledger.identities().into_iter().collect();
        assert_eq!(identities, vec!["alice", "bob", "charlie"]);
    }

    #[test]
    fn test_assignees_are_not_approvals() {
        let mut ledger = ApprovalLedger::new();
        ledger.add_assignees(["Art", "Ben"]);
        assert!(ledger.is_empty());
        let assignees: Vec<_> = ledger.assignees().iter().cloned().collect();
        assert_eq!(assignees, vec!["art", "ben"]);
    }

    #[test]
    fn test_author_self_approved_no_issue() {
        let mut ledger = ApprovalLedger::new();
        ledger.add_author_self_approver("Author", "REFERENCE", false);
        assert!(!ledger.author_self_approved_no_issue());
        ledger.add_author_self_approver("Author", "REFERENCE", true);
        assert!(ledger.author_self_approved_no_issue());
    }
}
