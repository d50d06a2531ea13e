//! Ownership view over a changed-file list.
//!
//! Maps every changed file to its governing ownership entry by walking from
//! the path itself up through its ancestors, tracks files covered by the
//! auto-approve-unowned-subfolders rule, and computes the effective (inherited)
//! and leaf approver sets that the coverage engine and the suggestion selector
//! consume. All approver sets handed out by this module are lowercased;
//! original casing only matters for display and lives in the ledger.

use std::collections::{BTreeMap, BTreeSet};

use super::common::{dir_of, is_strict_ancestor, self_and_ancestors};
use super::types::OwnersRule;

/// Default name of the per-directory ownership file.
pub const DEFAULT_OWNERS_FILE: &str = "OWNERS";

/// Read-only ownership database consulted during an evaluation.
///
/// A path has an ownership entry iff `approvers` returns `Some`; an entry with
/// an empty approver set is still an entry (it stops the governing walk).
pub trait OwnersRepo {
    /// Approvers listed for `path`, or `None` when `path` has no entry.
    fn approvers(&self, path: &str) -> Option<&BTreeSet<String>>;

    /// True when approvals are disabled at this level; the walk skips it.
    fn approval_disabled(&self, path: &str) -> bool;

    /// True when strict subfolders of `path` without an entry of their own
    /// are approved automatically.
    fn auto_approve_unowned_subfolders(&self, path: &str) -> bool;

    /// Filename of the ownership file at `path`, for link rendering.
    fn owners_filename(&self, path: &str) -> &str {
        DEFAULT_OWNERS_FILE
    }
}

/// An `OwnersRepo` backed by the ownership entries of an evaluation snapshot.
#[derive(Debug, Default)]
pub struct SnapshotRepo {
    rules: BTreeMap<String, OwnersRule>,
}

impl SnapshotRepo {
    pub fn new(rules: BTreeMap<String, OwnersRule>) -> Self {
        Self { rules }
    }
}

impl OwnersRepo for SnapshotRepo {
    fn approvers(&self, path: &str) -> Option<&BTreeSet<String>> {
        self.rules.get(path).map(|rule| &rule.approvers)
    }

    fn approval_disabled(&self, path: &str) -> bool {
        self.rules
            .get(path)
            .map(|rule| rule.approval_disabled)
            .unwrap_or(false)
    }

    fn auto_approve_unowned_subfolders(&self, path: &str) -> bool {
        self.rules
            .get(path)
            .map(|rule| rule.auto_approve_unowned_subfolders)
            .unwrap_or(false)
    }

    fn owners_filename(&self, path: &str) -> &str {
        self.rules
            .get(path)
            .and_then(|rule| rule.owners_filename.as_deref())
            .unwrap_or(DEFAULT_OWNERS_FILE)
    }
}

/// The ownership view of one PR evaluation: which entry governs each changed
/// file, and which files are auto-covered without any approver.
pub struct OwnersView<'r> {
    filenames: Vec<String>,
    repo: &'r dyn OwnersRepo,
    seed: i64,
    /// Governing path -> files it governs, after ancestor collapse.
    governed: BTreeMap<String, BTreeSet<String>>,
    /// Files approved by the auto-approve-unowned-subfolders rule.
    auto_covered: BTreeSet<String>,
}

impl<'r> OwnersView<'r> {
    pub fn new(filenames: Vec<String>, repo: &'r dyn OwnersRepo, seed: i64) -> Self {
        let mut pre: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        let mut auto_covered = BTreeSet::new();

        for file in &filenames {
            let governing = governing_entry(repo, file);
            if repo.auto_approve_unowned_subfolders(&governing)
                && is_strict_ancestor(&governing, dir_of(file))
            {
                auto_covered.insert(file.clone());
            } else {
                pre.entry(governing).or_default().insert(file.clone());
            }
        }

        // Collapse: a governing path that sits below another governing path is
        // folded into it ([a, a/d, b] -> [a, b]); effective approver sets
        // inherit upward, so nothing approvable is lost.
        let survivors: BTreeSet<String> = pre
            .keys()
            .filter(|dir| {
                !pre.keys()
                    .any(|other| is_strict_ancestor(other.as_str(), dir.as_str()))
            })
            .cloned()
            .collect();
        let mut governed: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (dir, files) in pre {
            let target = self_and_ancestors(&dir)
                .find(|node| survivors.contains(*node))
                .unwrap_or("")
                .to_string();
            governed.entry(target).or_default().extend(files);
        }

        Self {
            filenames,
            repo,
            seed,
            governed,
            auto_covered,
        }
    }

    pub fn filenames(&self) -> &[String] {
        &self.filenames
    }

    pub fn seed(&self) -> i64 {
        self.seed
    }

    /// Collapsed governing paths in ascending order.
    pub fn governing_dirs(&self) -> impl Iterator<Item = &str> {
        self.governed.keys().map(String::as_str)
    }

    /// Governing path -> changed files it governs. Auto-covered files are not
    /// listed here.
    pub fn governed_files(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.governed
    }

    /// Files approved by the auto-approve-unowned-subfolders rule regardless
    /// of any ledger entry.
    pub fn auto_covered_files(&self) -> &BTreeSet<String> {
        &self.auto_covered
    }

    /// Lowercased union of the approvers of `dir` and all of its ancestors,
    /// skipping disabled levels.
    pub fn effective_approvers(&self, dir: &str) -> BTreeSet<String> {
        let mut union = BTreeSet::new();
        for node in self_and_ancestors(dir) {
            if self.repo.approval_disabled(node) {
                continue;
            }
            if let Some(approvers) = self.repo.approvers(node) {
                union.extend(approvers.iter().map(|login| login.to_lowercase()));
            }
        }
        union
    }

    /// Lowercased approvers of `dir` alone.
    pub fn leaf_approvers(&self, dir: &str) -> BTreeSet<String> {
        if self.repo.approval_disabled(dir) {
            return BTreeSet::new();
        }
        self.repo
            .approvers(dir)
            .map(|approvers| approvers.iter().map(|login| login.to_lowercase()).collect())
            .unwrap_or_default()
    }

    /// Governing path -> effective approvers, for every governing path.
    pub fn effective_map(&self) -> BTreeMap<String, BTreeSet<String>> {
        self.governed
            .keys()
            .map(|dir| (dir.clone(), self.effective_approvers(dir)))
            .collect()
    }

    /// Governing path -> leaf approvers, for every governing path.
    pub fn leaf_map(&self) -> BTreeMap<String, BTreeSet<String>> {
        self.governed
            .keys()
            .map(|dir| (dir.clone(), self.leaf_approvers(dir)))
            .collect()
    }

    /// Sorted, deduplicated leaf approvers across all governing paths; the
    /// candidate pool for suggestions.
    pub fn potential_approvers(&self) -> Vec<String> {
        let mut pool = BTreeSet::new();
        for dir in self.governed.keys() {
            pool.extend(self.leaf_approvers(dir));
        }
        pool.into_iter().collect()
    }

    /// Repo-relative path of the ownership file shown for `dir` in the
    /// details block. A file-specific entry (markdown ownership) displays its
    /// own path.
    pub fn owners_file_path(&self, dir: &str) -> String {
        if dir.ends_with(".md") {
            return dir.to_string();
        }
        let filename = self.repo.owners_filename(dir);
        if dir.is_empty() {
            filename.to_string()
        } else {
            format!("{}/{}", dir, filename)
        }
    }
}

/// Inverts a path -> approvers map into approver -> paths.
pub fn reverse_map(map: &BTreeMap<String, BTreeSet<String>>) -> BTreeMap<String, BTreeSet<String>> {
    let mut reverse: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for (dir, approvers) in map {
        for approver in approvers {
            reverse
                .entry(approver.clone())
                .or_default()
                .insert(dir.clone());
        }
    }
    reverse
}

/// Deepest path on the `self -> ancestors` chain of `file` with a
/// non-disabled ownership entry; the root when nothing is found.
fn governing_entry(repo: &dyn OwnersRepo, file: &str) -> String {
    for node in self_and_ancestors(file) {
        if !repo.approval_disabled(node) && repo.approvers(node).is_some() {
            return node.to_string();
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::super::testutil::{files, RepoBuilder};
    use super::*;

    fn dirs(view: &OwnersView) -> Vec<String> {
        view.governing_dirs().map(str::to_string).collect()
    }

    #[test]
    fn test_governing_walk_stops_at_first_entry() {
        let repo = RepoBuilder::new()
            .owners("", &["Alice", "Bob"])
            .owners("a", &["Art", "Anne"])
            .build();
        let view = OwnersView::new(files(&["a/test.go"]), &repo, 0);
        assert_eq!(dirs(&view), vec!["a"]);

        let view = OwnersView::new(files(&["kubernetes.go"]), &repo, 0);
        assert_eq!(dirs(&view), vec![""]);

        // no entry between a and the file: a governs arbitrarily deep paths
        let view = OwnersView::new(files(&["a/x/y/z/test.go"]), &repo, 0);
        assert_eq!(dirs(&view), vec!["a"]);
    }

    #[test]
    fn test_governing_walk_without_any_entry_degrades_to_root() {
        let repo = RepoBuilder::new().build();
        let view = OwnersView::new(files(&["a/test.go"]), &repo, 0);
        assert_eq!(dirs(&view), vec![""]);
        assert!(view.effective_approvers("").is_empty());
    }

    #[test]
    fn test_file_specific_entry_governs_itself() {
        let repo = RepoBuilder::new()
            .owners("a", &["Alice"])
            .owners("b", &["Bill"])
            .owners("b/README.md", &["Doctor"])
            .build();
        let view = OwnersView::new(files(&["a/a.go", "b/README.md"]), &repo, 0);
        assert_eq!(dirs(&view), vec!["a", "b/README.md"]);
        assert_eq!(view.owners_file_path("b/README.md"), "b/README.md");
        assert_eq!(view.owners_file_path("a"), "a/OWNERS");
        assert_eq!(view.owners_file_path(""), "OWNERS");
    }

    #[test]
    fn test_disabled_level_is_skipped() {
        let repo = RepoBuilder::new()
            .owners("", &["Alice"])
            .owners("a", &["Art"])
            .disabled("a")
            .build();
        let view = OwnersView::new(files(&["a/test.go"]), &repo, 0);
        assert_eq!(dirs(&view), vec![""]);
        assert!(view.effective_approvers("a/d").contains("alice"));
        assert!(!view.effective_approvers("a/d").contains("art"));
    }

    #[test]
    fn test_governing_set_collapses_nested_entries() {
        let repo = RepoBuilder::new()
            .owners("", &["Alice", "Bob"])
            .owners("a", &["Art", "Anne"])
            .owners("b", &["Bill"])
            .owners("a/d", &["David"])
            .build();
        let view = OwnersView::new(files(&["a/test.go", "a/d/test.go", "b/test"]), &repo, 0);
        assert_eq!(dirs(&view), vec!["a", "b"]);
        let governed = view.governed_files();
        assert_eq!(governed["a"].len(), 2);
        assert_eq!(governed["b"].len(), 1);
    }

    #[test]
    fn test_sibling_entries_do_not_collapse() {
        let repo = RepoBuilder::new()
            .owners("a/combo", &["Eve"])
            .owners("a/d", &["David"])
            .build();
        let view = OwnersView::new(files(&["a/combo/test.go", "a/d/test.go"]), &repo, 0);
        assert_eq!(dirs(&view), vec!["a/combo", "a/d"]);
    }

    #[test]
    fn test_effective_approvers_union_up_the_chain() {
        let repo = RepoBuilder::new()
            .owners("", &["Alice", "Bob"])
            .owners("a", &["Art"])
            .owners("a/d", &["David"])
            .build();
        let view = OwnersView::new(files(&["a/d/test.go"]), &repo, 0);
        let effective = view.effective_approvers("a/d");
        assert_eq!(
            effective.into_iter().collect::<Vec<_>>(),
            vec!["alice", "art", "bob", "david"]
        );
        let leaf = view.leaf_approvers("a/d");
        assert_eq!(leaf.into_iter().collect::<Vec<_>>(), vec!["david"]);
    }

    #[test]
    fn test_auto_covered_only_for_strict_unowned_subfolders() {
        let repo = RepoBuilder::new()
            .owners("", &["Alice"])
            .owners("a", &["Art"])
            .owners("a/d", &["David"])
            .auto("a")
            .build();

        // directly in the auto directory: not auto-covered
        let view = OwnersView::new(files(&["a/test.go"]), &repo, 0);
        assert!(view.auto_covered_files().is_empty());
        assert_eq!(dirs(&view), vec!["a"]);

        // unowned subfolder, arbitrarily deep: auto-covered, not governed
        let view = OwnersView::new(files(&["a/new/child/test.go"]), &repo, 0);
        assert_eq!(view.auto_covered_files().len(), 1);
        assert!(dirs(&view).is_empty());

        // subfolder with its own entry: ordinary coverage applies
        let view = OwnersView::new(files(&["a/d/new.go"]), &repo, 0);
        assert!(view.auto_covered_files().is_empty());
        assert_eq!(dirs(&view), vec!["a/d"]);
    }

    #[test]
    fn test_potential_approvers_are_deduplicated_leaves() {
        let repo = RepoBuilder::new()
            .owners("", &["Alice"])
            .owners("a", &["Art", "alice"])
            .owners("b", &["Bill"])
            .build();
        let view = OwnersView::new(files(&["a/test.go", "b/test.go"]), &repo, 0);
        // root is not a governing dir here, but "alice" appears as a leaf of a
        assert_eq!(view.potential_approvers(), vec!["alice", "art", "bill"]);
    }

    #[test]
    fn test_reverse_map() {
        let repo = RepoBuilder::new()
            .owners("a", &["Art"])
            .owners("b", &["Art", "Bill"])
            .build();
        let view = OwnersView::new(files(&["a/test.go", "b/test.go"]), &repo, 0);
        let reverse = reverse_map(&view.leaf_map());
        assert_eq!(reverse["art"].iter().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(reverse["bill"].iter().collect::<Vec<_>>(), vec!["b"]);
    }
}
