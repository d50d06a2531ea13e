//! # Core Logic Module
//!
//! This module (`core/mod.rs`) serves as the central hub for the application's
//! core business logic. It re-exports and organizes functionalities from its submodules:
//!
//! - `commands`: Contains the implementations for the various CLI commands.
//! - `common`: Path arithmetic shared across the resolver.
//! - `coverage`: Matches ledger identities against effective approver sets.
//! - `display`: Terminal table rendering for command output.
//! - `ledger`: The per-evaluation approval ledger.
//! - `message`: The status message renderer.
//! - `owners`: The ownership view and the ownership database trait.
//! - `resolver`: The per-PR resolver facade and its approval policy.
//! - `suggest`: The deterministic suggestion selector.
//! - `types`: Defines core data types and structures used throughout the application.

pub mod commands;
pub mod common;
pub mod coverage;
pub mod display;
pub mod ledger;
pub mod message;
pub mod owners;
pub mod resolver;
pub mod suggest;
pub mod types;

#[cfg(test)]
pub(crate) mod testutil {
    //! Shared fixtures for core tests.

    use std::collections::BTreeMap;

    use super::owners::SnapshotRepo;
    use super::types::OwnersRule;

    pub(crate) struct RepoBuilder {
        rules: BTreeMap<String, OwnersRule>,
    }

    impl RepoBuilder {
        pub(crate) fn new() -> Self {
            Self {
                rules: BTreeMap::new(),
            }
        }

        pub(crate) fn owners(mut self, dir: &str, approvers: &[&str]) -> Self {
            let rule = self.rules.entry(dir.to_string()).or_default();
            rule.approvers = approvers.iter().map(|login| login.to_string()).collect();
            self
        }

        pub(crate) fn auto(mut self, dir: &str) -> Self {
            self.rules
                .entry(dir.to_string())
                .or_default()
                .auto_approve_unowned_subfolders = true;
            self
        }

        pub(crate) fn disabled(mut self, dir: &str) -> Self {
            self.rules
                .entry(dir.to_string())
                .or_default()
                .approval_disabled = true;
            self
        }

        pub(crate) fn build(self) -> SnapshotRepo {
            SnapshotRepo::new(self.rules)
        }
    }

    pub(crate) fn files(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    /// The ownership layout used across the selector and resolver tests.
    pub(crate) fn standard_repo() -> SnapshotRepo {
        RepoBuilder::new()
            .owners("", &["Alice", "Bob"])
            .owners("a", &["Art", "Anne"])
            .owners("b", &["Bill", "Ben", "Barbara"])
            .owners("c", &["Chris", "Carol"])
            .owners("a/d", &["David", "Dan", "Debbie"])
            .owners(
                "a/combo",
                &["Eve", "Erin", "David", "Dan", "Debbie", "Chris", "Carol"],
            )
            .build()
    }
}
