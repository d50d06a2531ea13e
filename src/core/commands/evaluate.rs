use std::path::Path;

use log::{debug, info};

use crate::core::display::status_table;
use crate::core::message::{render_message, MessageContext};
use crate::core::owners::{OwnersView, SnapshotRepo};
use crate::core::resolver::ApprovalResolver;
use crate::core::types::{ApprovalKind, OutputFormat, Snapshot, Verdict};
use crate::utils::app_config::AppConfig;
use crate::utils::error::{Error, Result};

/// Evaluate a PR snapshot and report its approval status
pub fn run(snapshot_file: &Path, format: &OutputFormat, seed: Option<i64>) -> Result<()> {
    let raw = std::fs::read_to_string(snapshot_file).map_err(|e| {
        Error::with_source(
            &format!("Failed to read snapshot {}", snapshot_file.display()),
            Box::new(e),
        )
    })?;
    let snapshot: Snapshot = serde_json::from_str(&raw)
        .map_err(|e| Error::with_source("Failed to parse evaluation snapshot", Box::new(e)))?;

    let config = AppConfig::fetch()?;
    let seed = seed.unwrap_or(snapshot.seed);
    info!(
        "evaluating {} changed files against {} ownership entries (seed {})",
        snapshot.files.len(),
        snapshot.owners.len(),
        seed
    );

    let repo = SnapshotRepo::new(snapshot.owners);
    let view = OwnersView::new(snapshot.files, &repo, seed);
    debug!(
        "{} governing directories, {} auto-approved files",
        view.governed_files().len(),
        view.auto_covered_files().len()
    );
    let mut resolver = ApprovalResolver::new(view);
    resolver.require_issue = snapshot.require_issue;
    resolver.associated_issue = snapshot.associated_issue;
    resolver.set_manually_approved(snapshot.manually_approved);
    for grant in &snapshot.approvals {
        match grant.kind {
            ApprovalKind::Approve => {
                resolver.add_approver(&grant.login, &grant.reference, grant.no_issue)
            }
            ApprovalKind::Lgtm => resolver.add_lgtmer(&grant.login, &grant.reference, grant.no_issue),
            ApprovalKind::AuthorSelf => {
                resolver.add_author_self_approver(&grant.login, &grant.reference, grant.no_issue)
            }
        }
    }
    resolver.add_assignees(&snapshot.assignees);

    let context = MessageContext {
        host: snapshot.host.as_deref().unwrap_or(&config.host),
        command_help_link: snapshot
            .command_help_link
            .as_deref()
            .unwrap_or(&config.command_help_link),
        pr_process_link: snapshot
            .pr_process_link
            .as_deref()
            .unwrap_or(&config.pr_process_link),
        org: snapshot.org.as_deref().unwrap_or(&config.org),
        repo: snapshot.repo.as_deref().unwrap_or(&config.repo),
        branch: snapshot.branch.as_deref().unwrap_or(&config.branch),
    };
    let message = render_message(&resolver, &context);

    match format {
        OutputFormat::Message => {
            println!("{}", message);
        }
        OutputFormat::Json => {
            let verdict = Verdict {
                approved: resolver.is_approved(),
                unapproved: resolver.unapproved_dirs().into_iter().collect(),
                suggested_ccs: resolver.suggested_ccs(),
                assigned_ccs: resolver.assigned_ccs(),
                ccs: resolver.ccs(),
                message,
            };
            println!("{}", serde_json::to_string_pretty(&verdict)?);
        }
        OutputFormat::Text => {
            println!("{}", status_table(&resolver));
            if resolver.is_approved() {
                println!("Verdict: APPROVED");
            } else {
                println!("Verdict: NOT APPROVED");
                let ccs = resolver.ccs();
                if !ccs.is_empty() {
                    println!("Waiting on: {}", ccs.join(", "));
                }
            }
        }
    }

    Ok(())
}
