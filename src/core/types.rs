//! # Core Data Types
//!
//! This module defines the primary data structures and enumerations used throughout the
//! core logic of the application. These types represent approval grants, per-directory
//! approval status, the PR evaluation snapshot consumed by the CLI, and various
//! configuration options like output formats.
//!
//! The main types include:
//! - `ApprovalKind`: Classifies how an approval was granted (approve, lgtm, author self-approval).
//! - `ApprovalGrant`: A single approval entry with display login, reference URL and no-issue flag.
//! - `DirectoryStatus`: The approval state of one governing directory.
//! - `OwnersRule`: The ownership entry for a directory (approvers and per-directory toggles).
//! - `Snapshot`: A complete, self-contained PR evaluation request.
//! - `Verdict`: The machine-readable result of an evaluation.
//! - `OutputFormat`: Enum for specifying how command output should be formatted.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Classifies how an approval entry was granted.
///
/// The display titles are part of the rendered message contract and must not change.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalKind {
    /// An explicit `/approve` from a listed approver.
    #[default]
    Approve,
    /// An `lgtm` that also counts towards directory coverage.
    Lgtm,
    /// The PR author approving their own change.
    AuthorSelf,
}

impl ApprovalKind {
    /// Title attribute used in the rendered approvers line.
    pub fn title(&self) -> &'static str {
        match self {
            ApprovalKind::Approve => "Approved",
            ApprovalKind::Lgtm => "LGTM",
            ApprovalKind::AuthorSelf => "Author self-approved",
        }
    }
}

impl std::fmt::Display for ApprovalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// A single approval ledger entry.
///
/// `login` preserves the casing of the most recent write; matching against
/// ownership entries is always performed on the lowercase form.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ApprovalGrant {
    /// Login of the approver, original casing.
    pub login: String,
    /// How the approval was granted.
    #[serde(default)]
    pub kind: ApprovalKind,
    /// URL of the comment or review that granted the approval.
    #[serde(default)]
    pub reference: String,
    /// Whether this approval also waives the associated-issue requirement.
    #[serde(default)]
    pub no_issue: bool,
}

impl std::fmt::Display for ApprovalGrant {
    /// Renders the `*<a href="REF" title="TITLE">LOGIN</a>*` fragment used in
    /// the approvers and bypassers lines.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            r#"*<a href="{}" title="{}">{}</a>*"#,
            self.reference,
            self.kind.title(),
            self.login
        )
    }
}

/// Approval state of one governing directory, as shown in the details block.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DirectoryStatus {
    /// At least one ledger identity covers the directory. `approvers` holds
    /// the covering display logins in ascending lowercase order.
    Approved {
        directory: String,
        approvers: Vec<String>,
    },
    /// No ledger identity covers the directory.
    Unapproved { directory: String },
}

impl DirectoryStatus {
    pub fn directory(&self) -> &str {
        match self {
            DirectoryStatus::Approved { directory, .. } => directory,
            DirectoryStatus::Unapproved { directory } => directory,
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, DirectoryStatus::Approved { .. })
    }
}

/// The ownership entry for a single directory (or file-specific path) as
/// provided by the ownership database.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OwnersRule {
    /// Identities allowed to approve changes under this path.
    #[serde(default)]
    pub approvers: BTreeSet<String>,
    /// When true this level is skipped entirely; the nearest non-disabled
    /// ancestor governs instead.
    #[serde(default)]
    pub approval_disabled: bool,
    /// When true, strict subfolders without an entry of their own are
    /// approved without any approver.
    #[serde(default)]
    pub auto_approve_unowned_subfolders: bool,
    /// Name of the ownership file for link rendering. `OWNERS` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owners_filename: Option<String>,
}

/// A complete PR evaluation request, read by `evaluate` from a JSON file.
///
/// Everything the resolver needs is inline: the changed files, the ownership
/// database snapshot, the recorded approvals and the rendering parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Changed file paths, forward-slash separated, repo-root relative.
    #[serde(default)]
    pub files: Vec<String>,
    /// Ownership entries keyed by directory path (empty string is the root).
    #[serde(default)]
    pub owners: BTreeMap<String, OwnersRule>,
    /// Recorded approvals, LGTMs and author self-approval.
    #[serde(default)]
    pub approvals: Vec<ApprovalGrant>,
    /// Currently assigned reviewers.
    #[serde(default)]
    pub assignees: Vec<String>,
    /// Seed for the deterministic suggestion shuffle.
    #[serde(default)]
    pub seed: i64,
    /// Whether an associated issue is required for final approval.
    #[serde(default)]
    pub require_issue: bool,
    /// Number of the associated issue; 0 means none.
    #[serde(default)]
    pub associated_issue: u64,
    /// A human added the approval label manually.
    #[serde(default)]
    pub manually_approved: bool,
    /// Review host name for links, e.g. `github.com`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Override for the bot-commands help page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command_help_link: Option<String>,
    /// Override for the review-process documentation page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pr_process_link: Option<String>,
}

/// Machine-readable result of a PR evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct Verdict {
    pub approved: bool,
    /// Governing directories that still need an approval, ascending path order.
    pub unapproved: Vec<String>,
    pub suggested_ccs: Vec<String>,
    pub assigned_ccs: Vec<String>,
    /// Union of suggested and assigned CCs, ascending.
    pub ccs: Vec<String>,
    /// The rendered status message.
    pub message: String,
}

/// Specifies the desired format for command output.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum OutputFormat {
    /// Human-readable plain text, formatted as a table.
    Text,
    /// Machine-readable JSON verdict.
    Json,
    /// The raw status message as it would be posted to the review host.
    Message,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Message => write!(f, "message"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approval_grant_display() {
        let grant = ApprovalGrant {
            login: "Alice".to_string(),
            kind: ApprovalKind::Approve,
            reference: "REFERENCE".to_string(),
            no_issue: false,
        };
        assert_eq!(
            grant.to_string(),
            r#"*<a href="REFERENCE" title="Approved">Alice</a>*"#
        );

        let grant = ApprovalGrant {
            login: "John".to_string(),
            kind: ApprovalKind::AuthorSelf,
            reference: "REFERENCE".to_string(),
            no_issue: true,
        };
        assert_eq!(
            grant.to_string(),
            r#"*<a href="REFERENCE" title="Author self-approved">John</a>*"#
        );
    }

    #[test]
    fn test_snapshot_deserialize_defaults() {
        let snapshot: Snapshot = serde_json::from_str(r#"{"files": ["a/main.go"]}"#).unwrap();
        assert_eq!(snapshot.files, vec!["a/main.go"]);
        assert!(snapshot.owners.is_empty());
        assert_eq!(snapshot.seed, 0);
        assert!(!snapshot.require_issue);
    }

    #[test]
    fn test_approval_kind_deserialize() {
        let grant: ApprovalGrant =
            serde_json::from_str(r#"{"login": "Bill", "kind": "lgtm"}"#).unwrap();
        assert_eq!(grant.kind, ApprovalKind::Lgtm);
        assert_eq!(grant.reference, "");

        // kind defaults to a plain approval
        let grant: ApprovalGrant = serde_json::from_str(r#"{"login": "Bill"}"#).unwrap();
        assert_eq!(grant.kind, ApprovalKind::Approve);
    }
}
