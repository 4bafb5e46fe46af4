//! Dashboard search: case-insensitive substring matching over the display
//! fields of all four collections, truncated to a combined limit. No index,
//! no ranking — results appear in collection order (clients, projects,
//! leads, tasks), newest first within each.

use serde::Serialize;

use crate::error::Result;
use crate::store::Store;

pub const DEFAULT_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchKind {
    Client,
    Project,
    Lead,
    Task,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub kind: SearchKind,
    pub id: String,
    pub title: String,
    pub detail: Option<String>,
}

fn matches(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(needle))
}

/// Scan all four collections for `query`. Blank queries return nothing.
pub fn search(store: &Store, query: &str, limit: usize) -> Result<Vec<SearchHit>> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Ok(Vec::new());
    }

    let mut hits = Vec::new();

    for client in store.list_clients()? {
        if hits.len() >= limit {
            return Ok(hits);
        }
        if matches(Some(&client.name), &needle)
            || matches(Some(&client.email), &needle)
            || matches(client.company.as_deref(), &needle)
        {
            hits.push(SearchHit {
                kind: SearchKind::Client,
                id: client.id,
                title: client.name,
                detail: Some(client.email),
            });
        }
    }

    for project in store.list_projects()? {
        if hits.len() >= limit {
            return Ok(hits);
        }
        if matches(Some(&project.title), &needle)
            || matches(project.description.as_deref(), &needle)
        {
            hits.push(SearchHit {
                kind: SearchKind::Project,
                id: project.id,
                title: project.title,
                detail: project.description,
            });
        }
    }

    for lead in store.list_leads()? {
        if hits.len() >= limit {
            return Ok(hits);
        }
        if matches(Some(&lead.name), &needle)
            || matches(Some(&lead.email), &needle)
            || matches(lead.company.as_deref(), &needle)
        {
            hits.push(SearchHit {
                kind: SearchKind::Lead,
                id: lead.id,
                title: lead.name,
                detail: Some(lead.email),
            });
        }
    }

    for task in store.list_tasks()? {
        if hits.len() >= limit {
            return Ok(hits);
        }
        if matches(Some(&task.title), &needle)
            || matches(task.description.as_deref(), &needle)
            || matches(task.assigned_to.as_deref(), &needle)
        {
            hits.push(SearchHit {
                kind: SearchKind::Task,
                id: task.id,
                title: task.title,
                detail: task.assigned_to,
            });
        }
    }

    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::NewClient;
    use crate::lead::NewLead;
    use crate::task::NewTask;
    use crate::types::{ClientStatus, LeadStatus, TaskPriority, TaskStatus};
    use tempfile::TempDir;

    fn open_tmp() -> (TempDir, Store) {
        let dir = TempDir::new().unwrap();
        let store = Store::open(&dir.path().join("agency.db")).unwrap();
        (dir, store)
    }

    fn seed(store: &Store) {
        store
            .create_client(NewClient {
                name: "Northwind Traders".into(),
                email: "contact@northwind.test".into(),
                phone: None,
                company: Some("Northwind".into()),
                status: ClientStatus::Active,
            })
            .unwrap();
        store
            .create_lead(NewLead {
                name: "Dana North".into(),
                email: "dana@north.test".into(),
                phone: None,
                company: None,
                source: None,
                status: LeadStatus::New,
                notes: None,
                estimated_value: None,
                currency: None,
            })
            .unwrap();
        store
            .create_task(NewTask {
                title: "Ship northbound campaign".into(),
                description: None,
                project_id: None,
                assigned_to: None,
                status: TaskStatus::Todo,
                priority: TaskPriority::Low,
                due_date: None,
            })
            .unwrap();
    }

    #[test]
    fn matches_across_collections_case_insensitive() {
        let (_dir, store) = open_tmp();
        seed(&store);

        let hits = search(&store, "NORTH", DEFAULT_LIMIT).unwrap();
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].kind, SearchKind::Client);
        assert_eq!(hits[1].kind, SearchKind::Lead);
        assert_eq!(hits[2].kind, SearchKind::Task);
    }

    #[test]
    fn blank_query_returns_nothing() {
        let (_dir, store) = open_tmp();
        seed(&store);
        assert!(search(&store, "   ", DEFAULT_LIMIT).unwrap().is_empty());
    }

    #[test]
    fn no_match_returns_empty() {
        let (_dir, store) = open_tmp();
        seed(&store);
        assert!(search(&store, "zeppelin", DEFAULT_LIMIT)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn combined_results_truncate_at_limit() {
        let (_dir, store) = open_tmp();
        for i in 0..12 {
            store
                .create_client(NewClient {
                    name: format!("Studio {i}"),
                    email: format!("studio{i}@test.test"),
                    phone: None,
                    company: None,
                    status: ClientStatus::Active,
                })
                .unwrap();
        }

        let hits = search(&store, "studio", DEFAULT_LIMIT).unwrap();
        assert_eq!(hits.len(), DEFAULT_LIMIT);
    }
}
