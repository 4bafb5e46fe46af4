//! Embedded document store over redb.
//!
//! One table per entity, keyed by id string, values JSON-encoded. Filters are
//! full-table scans over decoded records; lists return newest-first. There is
//! no cross-table consistency: deleting a client leaves its projects' client
//! reference dangling, and concurrent patches are last-write-wins.

use std::path::Path;

use chrono::{DateTime, Utc};
use redb::{Database, ReadableTable, TableDefinition};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::analytics::{AnalyticsEntry, NewAnalyticsEntry, NewRevenue};
use crate::client::{Client, ClientPatch, NewClient};
use crate::error::{AgencyError, Result};
use crate::lead::{Lead, LeadPatch, NewLead};
use crate::project::{NewProject, Project, ProjectPatch};
use crate::task::{NewTask, Task, TaskPatch};
use crate::types::{AnalyticsType, ClientStatus, LeadStatus, ProjectStatus, TaskStatus};
use crate::user::{User, UserSync};

// ---------------------------------------------------------------------------
// Table definitions
// ---------------------------------------------------------------------------

pub(crate) const USERS: TableDefinition<&str, &[u8]> = TableDefinition::new("users");
pub(crate) const CLIENTS: TableDefinition<&str, &[u8]> = TableDefinition::new("clients");
pub(crate) const PROJECTS: TableDefinition<&str, &[u8]> = TableDefinition::new("projects");
pub(crate) const LEADS: TableDefinition<&str, &[u8]> = TableDefinition::new("leads");
pub(crate) const TASKS: TableDefinition<&str, &[u8]> = TableDefinition::new("tasks");
pub(crate) const ANALYTICS: TableDefinition<&str, &[u8]> = TableDefinition::new("analytics");

const ALL_TABLES: [TableDefinition<&str, &[u8]>; 6] =
    [USERS, CLIENTS, PROJECTS, LEADS, TASKS, ANALYTICS];

pub(crate) fn db_err(e: impl std::fmt::Display) -> AgencyError {
    AgencyError::Db(e.to_string())
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Handle to the agency database. Cheap to share behind an `Arc`; every
/// operation runs in its own redb transaction.
pub struct Store {
    db: Database,
}

impl Store {
    /// Open or create the database at `path` and ensure all tables exist.
    pub fn open(path: &Path) -> Result<Self> {
        let db = Database::create(path).map_err(db_err)?;
        let wt = db.begin_write().map_err(db_err)?;
        for table in ALL_TABLES {
            wt.open_table(table).map_err(db_err)?;
        }
        wt.commit().map_err(db_err)?;
        Ok(Self { db })
    }

    // -----------------------------------------------------------------------
    // Raw helpers shared by the typed methods
    // -----------------------------------------------------------------------

    pub(crate) fn put<T: Serialize>(
        &self,
        table: TableDefinition<&'static str, &'static [u8]>,
        key: &str,
        record: &T,
    ) -> Result<()> {
        let value = serde_json::to_vec(record)?;
        let wt = self.db.begin_write().map_err(db_err)?;
        {
            let mut t = wt.open_table(table).map_err(db_err)?;
            t.insert(key, value.as_slice()).map_err(db_err)?;
        }
        wt.commit().map_err(db_err)?;
        Ok(())
    }

    pub(crate) fn fetch<T: DeserializeOwned>(
        &self,
        table: TableDefinition<&'static str, &'static [u8]>,
        key: &str,
    ) -> Result<Option<T>> {
        let rt = self.db.begin_read().map_err(db_err)?;
        let t = rt.open_table(table).map_err(db_err)?;
        match t.get(key).map_err(db_err)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    pub(crate) fn scan<T: DeserializeOwned>(
        &self,
        table: TableDefinition<&'static str, &'static [u8]>,
    ) -> Result<Vec<T>> {
        let rt = self.db.begin_read().map_err(db_err)?;
        let t = rt.open_table(table).map_err(db_err)?;
        let mut out = Vec::new();
        for entry in t.iter().map_err(db_err)? {
            let (_, v) = entry.map_err(db_err)?;
            out.push(serde_json::from_slice(v.value())?);
        }
        Ok(out)
    }

    /// Remove a key. Returns whether it existed.
    pub(crate) fn remove(
        &self,
        table: TableDefinition<&'static str, &'static [u8]>,
        key: &str,
    ) -> Result<bool> {
        let wt = self.db.begin_write().map_err(db_err)?;
        let existed;
        {
            let mut t = wt.open_table(table).map_err(db_err)?;
            existed = t.remove(key).map_err(db_err)?.is_some();
        }
        wt.commit().map_err(db_err)?;
        Ok(existed)
    }

    // -----------------------------------------------------------------------
    // Clients
    // -----------------------------------------------------------------------

    pub fn list_clients(&self) -> Result<Vec<Client>> {
        let mut clients: Vec<Client> = self.scan(CLIENTS)?;
        clients.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(clients)
    }

    pub fn get_client(&self, id: &str) -> Result<Client> {
        self.fetch(CLIENTS, id)?
            .ok_or_else(|| AgencyError::ClientNotFound(id.to_string()))
    }

    pub fn clients_by_status(&self, status: ClientStatus) -> Result<Vec<Client>> {
        let mut clients = self.list_clients()?;
        clients.retain(|c| c.status == status);
        Ok(clients)
    }

    pub fn create_client(&self, input: NewClient) -> Result<Client> {
        let client = Client::new(input);
        self.put(CLIENTS, &client.id, &client)?;
        Ok(client)
    }

    pub fn update_client(&self, id: &str, patch: ClientPatch) -> Result<Client> {
        if patch.is_empty() {
            return Err(AgencyError::NoFieldsToUpdate);
        }
        let mut client = self.get_client(id)?;
        client.apply(patch);
        self.put(CLIENTS, id, &client)?;
        Ok(client)
    }

    pub fn delete_client(&self, id: &str) -> Result<()> {
        if !self.remove(CLIENTS, id)? {
            return Err(AgencyError::ClientNotFound(id.to_string()));
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Projects
    // -----------------------------------------------------------------------

    pub fn list_projects(&self) -> Result<Vec<Project>> {
        let mut projects: Vec<Project> = self.scan(PROJECTS)?;
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(projects)
    }

    pub fn get_project(&self, id: &str) -> Result<Project> {
        self.fetch(PROJECTS, id)?
            .ok_or_else(|| AgencyError::ProjectNotFound(id.to_string()))
    }

    pub fn projects_by_status(&self, status: ProjectStatus) -> Result<Vec<Project>> {
        let mut projects = self.list_projects()?;
        projects.retain(|p| p.status == status);
        Ok(projects)
    }

    pub fn projects_by_client(&self, client_id: &str) -> Result<Vec<Project>> {
        let mut projects = self.list_projects()?;
        projects.retain(|p| p.client_id == client_id);
        Ok(projects)
    }

    pub fn create_project(&self, input: NewProject) -> Result<Project> {
        let project = Project::new(input);
        self.put(PROJECTS, &project.id, &project)?;
        Ok(project)
    }

    pub fn update_project(&self, id: &str, patch: ProjectPatch) -> Result<Project> {
        if patch.is_empty() {
            return Err(AgencyError::NoFieldsToUpdate);
        }
        let mut project = self.get_project(id)?;
        project.apply(patch);
        self.put(PROJECTS, id, &project)?;
        Ok(project)
    }

    pub fn delete_project(&self, id: &str) -> Result<()> {
        if !self.remove(PROJECTS, id)? {
            return Err(AgencyError::ProjectNotFound(id.to_string()));
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Leads
    // -----------------------------------------------------------------------

    pub fn list_leads(&self) -> Result<Vec<Lead>> {
        let mut leads: Vec<Lead> = self.scan(LEADS)?;
        leads.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(leads)
    }

    pub fn get_lead(&self, id: &str) -> Result<Lead> {
        self.fetch(LEADS, id)?
            .ok_or_else(|| AgencyError::LeadNotFound(id.to_string()))
    }

    pub fn leads_by_status(&self, status: LeadStatus) -> Result<Vec<Lead>> {
        let mut leads = self.list_leads()?;
        leads.retain(|l| l.status == status);
        Ok(leads)
    }

    pub fn create_lead(&self, input: NewLead) -> Result<Lead> {
        let lead = Lead::new(input);
        self.put(LEADS, &lead.id, &lead)?;
        Ok(lead)
    }

    pub fn update_lead(&self, id: &str, patch: LeadPatch) -> Result<Lead> {
        if patch.is_empty() {
            return Err(AgencyError::NoFieldsToUpdate);
        }
        let mut lead = self.get_lead(id)?;
        lead.apply(patch);
        self.put(LEADS, id, &lead)?;
        Ok(lead)
    }

    pub fn delete_lead(&self, id: &str) -> Result<()> {
        if !self.remove(LEADS, id)? {
            return Err(AgencyError::LeadNotFound(id.to_string()));
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Tasks
    // -----------------------------------------------------------------------

    pub fn list_tasks(&self) -> Result<Vec<Task>> {
        let mut tasks: Vec<Task> = self.scan(TASKS)?;
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }

    pub fn get_task(&self, id: &str) -> Result<Task> {
        self.fetch(TASKS, id)?
            .ok_or_else(|| AgencyError::TaskNotFound(id.to_string()))
    }

    pub fn tasks_by_status(&self, status: TaskStatus) -> Result<Vec<Task>> {
        let mut tasks = self.list_tasks()?;
        tasks.retain(|t| t.status == status);
        Ok(tasks)
    }

    pub fn tasks_by_project(&self, project_id: &str) -> Result<Vec<Task>> {
        let mut tasks = self.list_tasks()?;
        tasks.retain(|t| t.project_id.as_deref() == Some(project_id));
        Ok(tasks)
    }

    pub fn create_task(&self, input: NewTask) -> Result<Task> {
        let task = Task::new(input);
        self.put(TASKS, &task.id, &task)?;
        Ok(task)
    }

    pub fn update_task(&self, id: &str, patch: TaskPatch) -> Result<Task> {
        if patch.is_empty() {
            return Err(AgencyError::NoFieldsToUpdate);
        }
        let mut task = self.get_task(id)?;
        task.apply(patch);
        self.put(TASKS, id, &task)?;
        Ok(task)
    }

    pub fn delete_task(&self, id: &str) -> Result<()> {
        if !self.remove(TASKS, id)? {
            return Err(AgencyError::TaskNotFound(id.to_string()));
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Analytics
    // -----------------------------------------------------------------------

    pub fn list_analytics(&self) -> Result<Vec<AnalyticsEntry>> {
        let mut entries: Vec<AnalyticsEntry> = self.scan(ANALYTICS)?;
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(entries)
    }

    pub fn analytics_by_type(&self, kind: AnalyticsType) -> Result<Vec<AnalyticsEntry>> {
        let mut entries = self.list_analytics()?;
        entries.retain(|e| e.kind == kind);
        Ok(entries)
    }

    /// Entries with `start <= date <= end`.
    pub fn analytics_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<AnalyticsEntry>> {
        let mut entries = self.list_analytics()?;
        entries.retain(|e| e.date >= start && e.date <= end);
        Ok(entries)
    }

    pub fn record_analytics(&self, input: NewAnalyticsEntry) -> Result<AnalyticsEntry> {
        let entry = AnalyticsEntry::new(input);
        self.put(ANALYTICS, &entry.id, &entry)?;
        Ok(entry)
    }

    pub fn record_revenue(&self, input: NewRevenue) -> Result<AnalyticsEntry> {
        let entry = AnalyticsEntry::revenue(input);
        self.put(ANALYTICS, &entry.id, &entry)?;
        Ok(entry)
    }

    /// Cleanup hook; entries are otherwise immutable (no patch operation).
    pub fn delete_analytics(&self, id: &str) -> Result<()> {
        if !self.remove(ANALYTICS, id)? {
            return Err(AgencyError::AnalyticsNotFound(id.to_string()));
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Users (identity-provider mirror, keyed by external id)
    // -----------------------------------------------------------------------

    pub fn list_users(&self) -> Result<Vec<User>> {
        let mut users: Vec<User> = self.scan(USERS)?;
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    pub fn get_user(&self, user_id: &str) -> Result<User> {
        self.fetch(USERS, user_id)?
            .ok_or_else(|| AgencyError::UserNotFound(user_id.to_string()))
    }

    /// Insert or refresh the profile for an external identity.
    pub fn upsert_user(&self, user_id: &str, sync: UserSync) -> Result<User> {
        let user = match self.fetch::<User>(USERS, user_id)? {
            Some(mut existing) => {
                existing.refresh(sync);
                existing
            }
            None => User::new(user_id, sync),
        };
        self.put(USERS, user_id, &user)?;
        Ok(user)
    }

    pub fn remove_user(&self, user_id: &str) -> Result<()> {
        if !self.remove(USERS, user_id)? {
            return Err(AgencyError::UserNotFound(user_id.to_string()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
