//! Status message renderer.
//!
//! Produces the markdown notification posted back to the review host. The
//! output is a compatibility contract down to the byte: header banner,
//! approvers line, the CC sentence variants, the issue block, the
//! `<details>` section listing every governing ownership file, and the
//! machine-readable `<!-- META=... -->` trailer that downstream tooling
//! parses. Ordering is fixed everywhere (ascending lowercase identities,
//! ascending paths), so the same evaluation always renders the same bytes.

use super::resolver::ApprovalResolver;
use super::types::DirectoryStatus;

/// Rendering parameters for one evaluation.
pub struct MessageContext<'a> {
    /// Review host name, e.g. `github.com`.
    pub host: &'a str,
    /// Help page listing the bot commands.
    pub command_help_link: &'a str,
    /// Documentation page for the review process.
    pub pr_process_link: &'a str,
    pub org: &'a str,
    pub repo: &'a str,
    pub branch: &'a str,
}

/// Renders the full status message.
pub fn render_message(resolver: &ApprovalResolver, ctx: &MessageContext) -> String {
    let mut lines: Vec<String> = Vec::new();
    let files_approved = resolver.files_approved();

    let banner = if resolver.is_approved() {
        "APPROVED"
    } else {
        "NOT APPROVED"
    };
    lines.push(format!("[APPROVALNOTIFIER] This PR is **{}**", banner));
    lines.push(String::new());

    if resolver.manually_approved() && resolver.ledger().is_empty() {
        lines.push("Approval requirements bypassed by manually added approval label".to_string());
    } else {
        let fragments: Vec<String> = resolver
            .ledger()
            .grants()
            .map(|(_, grant)| grant.to_string())
            .collect();
        let mut line = "This pull-request has been approved by:".to_string();
        if !fragments.is_empty() {
            line.push(' ');
            line.push_str(&fragments.join(", "));
        }
        lines.push(line);
    }

    let suggested = resolver.suggested_ccs();
    let assigned = resolver.assigned_ccs();
    if !files_approved
        && !resolver.manually_approved()
        && !(suggested.is_empty() && assigned.is_empty())
    {
        lines.push(format!(
            "**Once this PR has been reviewed and has the lgtm label**, {}. For more information see [the Code Review Process]({}).",
            cc_sentence(&assigned, &suggested, ctx.host),
            ctx.pr_process_link
        ));
        lines.push(
            "**Please ensure that each of them provides their approval before proceeding.**"
                .to_string(),
        );
    }
    lines.push(String::new());

    if resolver.require_issue {
        if resolver.associated_issue > 0 {
            lines.push(format!("Associated issue: *#{}*", resolver.associated_issue));
        } else {
            let bypassers: Vec<String> = resolver
                .no_issue_approvers()
                .iter()
                .map(|grant| grant.to_string())
                .collect();
            if bypassers.is_empty() {
                lines.push(
                    "*No associated issue*. Update pull-request body to add a reference to an issue, or get approval with `/approve no-issue`"
                        .to_string(),
                );
            } else {
                lines.push(format!(
                    "Associated issue requirement bypassed by: {}",
                    bypassers.join(", ")
                ));
            }
        }
        lines.push(String::new());
    }

    lines.push(format!(
        "The full list of commands accepted by this bot can be found [here]({}?repo={}).",
        ctx.command_help_link,
        urlencoding::encode(&format!("{}/{}", ctx.org, ctx.repo))
    ));
    lines.push(String::new());

    if files_approved {
        lines.push(format!(
            "The pull request process is described [here]({})",
            ctx.pr_process_link
        ));
        lines.push(String::new());
    }

    lines.push(if files_approved {
        "<details >".to_string()
    } else {
        "<details open>".to_string()
    });
    lines.push("Needs approval from an approver in each of these files:".to_string());
    lines.push(String::new());
    for status in resolver.directory_statuses() {
        lines.push(directory_bullet(resolver, ctx, &status));
    }
    lines.push(String::new());
    lines.push("Approvers can indicate their approval by writing `/approve` in a comment".to_string());
    lines.push("Approvers can cancel approval by writing `/approve cancel` in a comment".to_string());
    lines.push("</details>".to_string());

    lines.push(format!(
        "<!-- META={} -->",
        serde_json::json!({ "approvers": resolver.ccs() })
    ));

    lines.join("\n")
}

/// The CC sentence core; wording depends on which CC lists are present.
fn cc_sentence(assigned: &[String], suggested: &[String], host: &str) -> String {
    let link = |login: &String| format!("[{}](https://{}/{})", login, host, login);
    let assigned_links: Vec<String> = assigned.iter().map(link).collect();
    let suggested_links: Vec<String> = suggested.iter().map(link).collect();

    if !assigned.is_empty() && !suggested.is_empty() {
        format!(
            "please ask for approval from {} and additionally assign {} for approval",
            assigned_links.join(", "),
            suggested_links.join(", ")
        )
    } else if !assigned.is_empty() {
        format!("please ask for approval from {}", assigned_links.join(", "))
    } else {
        format!("please assign {} for approval", suggested_links.join(", "))
    }
}

fn directory_bullet(
    resolver: &ApprovalResolver,
    ctx: &MessageContext,
    status: &DirectoryStatus,
) -> String {
    let path = resolver.view().owners_file_path(status.directory());
    let url = format!(
        "https://{}/{}/{}/blob/{}/{}",
        ctx.host, ctx.org, ctx.repo, ctx.branch, path
    );
    match status {
        DirectoryStatus::Approved { approvers, .. } => {
            format!("- ~~[{}]({})~~ [{}]", path, url, approvers.join(", "))
        }
        DirectoryStatus::Unapproved { .. } => format!("- **[{}]({})**", path, url),
    }
}
