//! Pure conversions from tracker records to domain types.
//!
//! No I/O happens here; every function is a total mapping over its
//! input, with skipped epics reported as tagged outcomes rather than
//! silently dropped.

use crate::jira::types::{IssueRecord, StatusRecord};
use crate::model::{Project, SkipReason, SkippedEpic, Status, TagColor, Task};

/// Map a Jira status-category color name to a local tag color.
///
/// Unmapped names yield [`TagColor::Default`] so tag creation always
/// has a color to use.
#[must_use]
pub fn map_status_color(color: &str) -> TagColor {
    match color {
        "red" => TagColor::Red,
        "green" => TagColor::Green,
        "blue" => TagColor::Blue,
        "blue-grey" => TagColor::Grey,
        "yellow" => TagColor::Yellow,
        _ => TagColor::Default,
    }
}

/// Replace filesystem-illegal characters in a tracker-derived string
/// used as a folder name: `: \ / * | >` become `-`, `"` becomes `'`.
#[must_use]
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            ':' | '\\' | '/' | '*' | '|' | '>' => '-',
            '"' => '\'',
            other => other,
        })
        .collect()
}

/// Filter the unscoped status catalog to statuses scoped to
/// `project_id` and map their colors.
#[must_use]
pub fn project_statuses(project_id: &str, catalog: &[StatusRecord]) -> Vec<Status> {
    catalog
        .iter()
        .filter(|record| {
            record.scope.as_ref().is_some_and(|scope| {
                scope.scope_type == "PROJECT"
                    && scope.project.as_ref().is_some_and(|p| p.id == project_id)
            })
        })
        .map(|record| Status {
            id: record.id.clone(),
            name: record.name.clone(),
            color: map_status_color(&record.status_category.color_name),
        })
        .collect()
}

/// Derive projects from Epic search results.
///
/// An Epic maps to a project only when it has exactly one issue link
/// that resolves to an inward or outward issue; the derived name is
/// `{linkedIssueKey}-{summary}`, sanitized. Everything else lands in
/// the skip list with its reason.
#[must_use]
pub fn epics_to_projects(issues: &[IssueRecord]) -> (Vec<Project>, Vec<SkippedEpic>) {
    let mut projects = Vec::new();
    let mut skipped = Vec::new();

    for issue in issues {
        let links = &issue.fields.issuelinks;

        let reason = match links.len() {
            0 => Some(SkipReason::NoLinks),
            1 => None,
            _ => Some(SkipReason::AmbiguousLinks),
        };

        if let Some(reason) = reason {
            skipped.push(SkippedEpic {
                key: issue.key.clone(),
                reason,
            });
            continue;
        }

        let link = &links[0];
        let Some(linked) = link.inward_issue.as_ref().or(link.outward_issue.as_ref()) else {
            skipped.push(SkippedEpic {
                key: issue.key.clone(),
                reason: SkipReason::UnresolvedLink,
            });
            continue;
        };

        projects.push(Project {
            id: issue.id.clone(),
            key: issue.key.clone(),
            name: sanitize_file_name(&format!("{}-{}", linked.key, issue.fields.summary)),
        });
    }

    (projects, skipped)
}

/// Convert Task search results to domain tasks.
///
/// Missing assignees (or assignees with hidden emails) become `None`;
/// a missing status field becomes an empty status name.
#[must_use]
pub fn issues_to_tasks(issues: &[IssueRecord]) -> Vec<Task> {
    issues
        .iter()
        .map(|issue| Task {
            id: issue.id.clone(),
            key: issue.key.clone(),
            name: issue.fields.summary.clone(),
            assignee: issue
                .fields
                .assignee
                .as_ref()
                .and_then(|a| a.email_address.clone())
                .filter(|email| !email.is_empty()),
            status: issue
                .fields
                .status
                .as_ref()
                .map(|s| s.name.clone())
                .unwrap_or_default(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jira::types::{
        Assignee, IssueFields, IssueLink, IssueStatus, LinkedIssue, ScopeProject, StatusCategory,
        StatusScope,
    };

    fn epic(key: &str, summary: &str, links: Vec<IssueLink>) -> IssueRecord {
        IssueRecord {
            id: format!("id-{key}"),
            key: key.to_string(),
            fields: IssueFields {
                summary: summary.to_string(),
                issuelinks: links,
                ..IssueFields::default()
            },
        }
    }

    fn inward(key: &str) -> IssueLink {
        IssueLink {
            inward_issue: Some(LinkedIssue {
                key: key.to_string(),
            }),
            outward_issue: None,
        }
    }

    #[test]
    fn test_sanitize_replaces_illegal_characters() {
        assert_eq!(sanitize_file_name("A:B/C*D"), "A-B-C-D");
        assert_eq!(sanitize_file_name("Say \"hi\""), "Say 'hi'");
        assert_eq!(sanitize_file_name("a\\b|c>d"), "a-b-c-d");
        assert_eq!(sanitize_file_name("plain name"), "plain name");
    }

    #[test]
    fn test_color_table() {
        assert_eq!(map_status_color("red"), TagColor::Red);
        assert_eq!(map_status_color("green"), TagColor::Green);
        assert_eq!(map_status_color("blue"), TagColor::Blue);
        assert_eq!(map_status_color("blue-grey"), TagColor::Grey);
        assert_eq!(map_status_color("yellow"), TagColor::Yellow);
        assert_eq!(map_status_color("magenta"), TagColor::Default);
        assert_eq!(map_status_color(""), TagColor::Default);
    }

    #[test]
    fn test_epic_with_one_link_maps_to_project() {
        let (projects, skipped) =
            epics_to_projects(&[epic("ACME-1", "Foo", vec![inward("PROJ-1")])]);
        assert!(skipped.is_empty());
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name, "PROJ-1-Foo");
        assert_eq!(projects[0].key, "ACME-1");
    }

    #[test]
    fn test_epic_name_uses_outward_issue_when_no_inward() {
        let link = IssueLink {
            inward_issue: None,
            outward_issue: Some(LinkedIssue {
                key: "OUT-2".to_string(),
            }),
        };
        let (projects, _) = epics_to_projects(&[epic("ACME-1", "Bar", vec![link])]);
        assert_eq!(projects[0].name, "OUT-2-Bar");
    }

    #[test]
    fn test_epic_name_is_sanitized() {
        let (projects, _) =
            epics_to_projects(&[epic("ACME-1", "Client: A/B", vec![inward("PROJ-1")])]);
        assert_eq!(projects[0].name, "PROJ-1-Client- A-B");
    }

    #[test]
    fn test_epic_without_links_is_skipped() {
        let (projects, skipped) = epics_to_projects(&[epic("ACME-2", "Foo", vec![])]);
        assert!(projects.is_empty());
        assert_eq!(
            skipped,
            vec![SkippedEpic {
                key: "ACME-2".to_string(),
                reason: SkipReason::NoLinks,
            }]
        );
    }

    #[test]
    fn test_epic_with_two_links_is_skipped() {
        let (projects, skipped) = epics_to_projects(&[epic(
            "ACME-3",
            "Foo",
            vec![inward("PROJ-1"), inward("PROJ-2")],
        )]);
        assert!(projects.is_empty());
        assert_eq!(skipped[0].reason, SkipReason::AmbiguousLinks);
    }

    #[test]
    fn test_epic_with_unresolved_link_is_skipped() {
        let link = IssueLink {
            inward_issue: None,
            outward_issue: None,
        };
        let (projects, skipped) = epics_to_projects(&[epic("ACME-4", "Foo", vec![link])]);
        assert!(projects.is_empty());
        assert_eq!(skipped[0].reason, SkipReason::UnresolvedLink);
    }

    #[test]
    fn test_tasks_carry_assignee_and_status() {
        let issue = IssueRecord {
            id: "1".to_string(),
            key: "ACME-5".to_string(),
            fields: IssueFields {
                summary: "Do work".to_string(),
                assignee: Some(Assignee {
                    email_address: Some("dev@example.com".to_string()),
                }),
                status: Some(IssueStatus {
                    name: "In Progress".to_string(),
                }),
                ..IssueFields::default()
            },
        };
        let tasks = issues_to_tasks(&[issue]);
        assert_eq!(tasks[0].assignee.as_deref(), Some("dev@example.com"));
        assert_eq!(tasks[0].status, "In Progress");
    }

    #[test]
    fn test_unassigned_task_has_no_assignee() {
        let issue = IssueRecord {
            id: "1".to_string(),
            key: "ACME-6".to_string(),
            fields: IssueFields {
                summary: "Nobody's work".to_string(),
                ..IssueFields::default()
            },
        };
        let tasks = issues_to_tasks(&[issue]);
        assert!(tasks[0].assignee.is_none());
    }

    #[test]
    fn test_hidden_empty_email_is_treated_as_unassigned() {
        let issue = IssueRecord {
            id: "1".to_string(),
            key: "ACME-7".to_string(),
            fields: IssueFields {
                summary: "x".to_string(),
                assignee: Some(Assignee {
                    email_address: Some(String::new()),
                }),
                ..IssueFields::default()
            },
        };
        let tasks = issues_to_tasks(&[issue]);
        assert!(tasks[0].assignee.is_none());
    }

    #[test]
    fn test_project_statuses_filters_scope() {
        let catalog = vec![
            StatusRecord {
                id: "1".to_string(),
                name: "To Do".to_string(),
                scope: Some(StatusScope {
                    scope_type: "PROJECT".to_string(),
                    project: Some(ScopeProject {
                        id: "10000".to_string(),
                    }),
                }),
                status_category: StatusCategory {
                    color_name: "blue-grey".to_string(),
                },
            },
            StatusRecord {
                id: "2".to_string(),
                name: "Other Project".to_string(),
                scope: Some(StatusScope {
                    scope_type: "PROJECT".to_string(),
                    project: Some(ScopeProject {
                        id: "99999".to_string(),
                    }),
                }),
                status_category: StatusCategory {
                    color_name: "green".to_string(),
                },
            },
            StatusRecord {
                id: "3".to_string(),
                name: "Global".to_string(),
                scope: None,
                status_category: StatusCategory {
                    color_name: "green".to_string(),
                },
            },
        ];

        let statuses = project_statuses("10000", &catalog);
        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].name, "To Do");
        assert_eq!(statuses[0].color, TagColor::Grey);
    }
}
