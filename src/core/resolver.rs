//! The approval resolver: one instance per PR evaluation.
//!
//! Ties the ownership view, the ledger, the coverage engine and the
//! suggestion selector together and applies the final approval policy
//! (full coverage, the associated-issue requirement with its no-issue
//! bypass, and the manual approval-label override).

use std::collections::BTreeSet;

use log::debug;

use super::coverage::{directory_statuses, unapproved_dirs};
use super::ledger::ApprovalLedger;
use super::owners::{reverse_map, OwnersView};
use super::suggest::{assigned_ccs, suggested_ccs};
use super::types::{ApprovalGrant, DirectoryStatus};

pub struct ApprovalResolver<'r> {
    view: OwnersView<'r>,
    ledger: ApprovalLedger,
    /// Whether final approval requires an associated issue.
    pub require_issue: bool,
    /// Number of the associated issue; 0 means none.
    pub associated_issue: u64,
    manually_approved: bool,
}

impl<'r> ApprovalResolver<'r> {
    pub fn new(view: OwnersView<'r>) -> Self {
        Self {
            view,
            ledger: ApprovalLedger::new(),
            require_issue: false,
            associated_issue: 0,
            manually_approved: false,
        }
    }

    pub fn view(&self) -> &OwnersView<'r> {
        &self.view
    }

    pub fn ledger(&self) -> &ApprovalLedger {
        &self.ledger
    }

    pub fn add_approver(&mut self, login: &str, reference: &str, no_issue: bool) {
        self.ledger.add_approver(login, reference, no_issue);
    }

    pub fn add_lgtmer(&mut self, login: &str, reference: &str, no_issue: bool) {
        self.ledger.add_lgtmer(login, reference, no_issue);
    }

    pub fn add_author_self_approver(&mut self, login: &str, reference: &str, no_issue: bool) {
        self.ledger.add_author_self_approver(login, reference, no_issue);
    }

    pub fn add_assignees<I, S>(&mut self, logins: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.ledger.add_assignees(logins);
    }

    /// A human applied the approval label directly; overrides the policy gate.
    pub fn set_manually_approved(&mut self, manually_approved: bool) {
        self.manually_approved = manually_approved;
    }

    pub fn manually_approved(&self) -> bool {
        self.manually_approved
    }

    /// Governing directories the current ledger leaves unapproved.
    pub fn unapproved_dirs(&self) -> BTreeSet<String> {
        unapproved_dirs(&self.view, &self.ledger.identities())
    }

    /// One record per governing directory, ascending path order.
    pub fn directory_statuses(&self) -> Vec<DirectoryStatus> {
        directory_statuses(&self.view, &self.ledger)
    }

    /// Deterministic suggestions for directories neither approvals nor
    /// assignees cover.
    pub fn suggested_ccs(&self) -> Vec<String> {
        let known: BTreeSet<String> = self
            .ledger
            .identities()
            .union(self.ledger.assignees())
            .cloned()
            .collect();
        suggested_ccs(&self.view, &known)
    }

    /// Assignees able to approve something still unapproved.
    pub fn assigned_ccs(&self) -> Vec<String> {
        assigned_ccs(&self.view, &self.ledger)
    }

    /// Ascending union of suggested and assigned CCs.
    pub fn ccs(&self) -> Vec<String> {
        let mut union: BTreeSet<String> = self.suggested_ccs().into_iter().collect();
        union.extend(self.assigned_ccs());
        union.into_iter().collect()
    }

    /// True when the change is non-empty and every governing directory is
    /// covered (auto-covered files need no approver at all).
    pub fn files_approved(&self) -> bool {
        !self.view.filenames().is_empty() && self.unapproved_dirs().is_empty()
    }

    /// Approvals that waive the issue requirement and actually contribute to
    /// coverage, ascending by identity.
    pub fn no_issue_approvers(&self) -> Vec<&ApprovalGrant> {
        let reverse = reverse_map(&self.view.effective_map());
        self.ledger
            .grants()
            .filter(|(identity, grant)| grant.no_issue && reverse.contains_key(*identity))
            .map(|(_, grant)| grant)
            .collect()
    }

    /// The associated-issue policy: an issue is linked, or a covering
    /// approver waived it, or the author self-approved with the waiver.
    pub fn issue_requirement_met(&self) -> bool {
        if !self.require_issue || self.associated_issue > 0 {
            return true;
        }
        !self.no_issue_approvers().is_empty() || self.ledger.author_self_approved_no_issue()
    }

    /// Final verdict for the PR.
    pub fn is_approved(&self) -> bool {
        if self.manually_approved {
            debug!("approved via manually added approval label");
            return true;
        }
        self.files_approved() && self.issue_requirement_met()
    }
}
