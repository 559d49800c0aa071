pub mod chat;
pub mod email;
pub mod event;
pub mod file;
pub mod invoice;
mod model;
pub mod order;
pub mod product;
pub mod ticket;

use std::{collections::BTreeSet, future::Future, path::Path, sync::Arc};

use anyhow::Context;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tokio::sync::RwLock;

use crate::{
    core::{PageState, Record},
    render::Column,
};

pub use model::Money;

/// A dashboard page: its record type, the seed data it ships with and how
/// its rows are laid out.
pub trait Page {
    const NAME: &'static str;
    const TITLE: &'static str;

    type Record: Record + Serialize + DeserializeOwned + Send + Sync + 'static;

    fn seed() -> Vec<Self::Record>;
    fn columns() -> Vec<Column<Self::Record>>;

    /// Header figures, e.g. totals by status.
    fn summary(_records: &[Self::Record]) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// One-click edits offered on a single record.
    fn actions() -> Vec<RecordAction<Self::Record>> {
        Vec::new()
    }

    fn action(name: &str) -> Option<RecordAction<Self::Record>> {
        Self::actions().into_iter().find(|action| action.name == name)
    }
}

/// A named record edit, applied through `PageAction::Edit`.
pub struct RecordAction<R> {
    /// Used on the command line, e.g. `mark-paid`.
    pub name: &'static str,
    pub label: &'static str,
    pub edit: fn(&R) -> R,
}

impl<R> RecordAction<R> {
    pub const fn new(name: &'static str, label: &'static str, edit: fn(&R) -> R) -> Self {
        Self { name, label, edit }
    }
}

impl<R> Clone for RecordAction<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for RecordAction<R> {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    Chat,
    Email,
    Invoices,
    Orders,
    Products,
    Tickets,
    Files,
    Calendar,
}

impl PageKind {
    pub const ALL: &'static [PageKind] = &[
        PageKind::Chat,
        PageKind::Email,
        PageKind::Invoices,
        PageKind::Orders,
        PageKind::Products,
        PageKind::Tickets,
        PageKind::Files,
        PageKind::Calendar,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PageKind::Chat => chat::ChatPage::NAME,
            PageKind::Email => email::EmailPage::NAME,
            PageKind::Invoices => invoice::InvoicePage::NAME,
            PageKind::Orders => order::OrderPage::NAME,
            PageKind::Products => product::ProductPage::NAME,
            PageKind::Tickets => ticket::TicketPage::NAME,
            PageKind::Files => file::FilePage::NAME,
            PageKind::Calendar => event::CalendarPage::NAME,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            PageKind::Chat => chat::ChatPage::TITLE,
            PageKind::Email => email::EmailPage::TITLE,
            PageKind::Invoices => invoice::InvoicePage::TITLE,
            PageKind::Orders => order::OrderPage::TITLE,
            PageKind::Products => product::ProductPage::TITLE,
            PageKind::Tickets => ticket::TicketPage::TITLE,
            PageKind::Files => file::FilePage::TITLE,
            PageKind::Calendar => event::CalendarPage::TITLE,
        }
    }
}

/// Source of a page's records. The in-memory implementation serves seed
/// data; a real backend would implement the same trait.
pub trait RecordRepository {
    type Record: Record;

    fn list(&self) -> impl Future<Output = anyhow::Result<Vec<Self::Record>>>;
    fn get(
        &self,
        id: &<Self::Record as Record>::Id,
    ) -> impl Future<Output = anyhow::Result<Option<Self::Record>>>;
    fn insert(&self, record: Self::Record) -> impl Future<Output = anyhow::Result<Self::Record>>;
    fn update(&self, record: Self::Record) -> impl Future<Output = anyhow::Result<Self::Record>>;
    fn delete(&self, id: &<Self::Record as Record>::Id) -> impl Future<Output = anyhow::Result<()>>;
}

#[derive(Debug)]
pub struct InMemoryRepository<R> {
    records: Arc<RwLock<Vec<R>>>,
}

impl<R> Clone for InMemoryRepository<R> {
    fn clone(&self) -> Self {
        Self {
            records: self.records.clone(),
        }
    }
}

impl<R: Record> InMemoryRepository<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }

    pub fn seeded<P: Page<Record = R>>() -> Self {
        Self::new(P::seed())
    }

    /// Seed from a JSON array of records. Duplicate ids are rejected.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self>
    where
        R: DeserializeOwned,
    {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file {:?}", path))?;
        let records: Vec<R> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse seed file {:?}", path))?;

        let mut seen = BTreeSet::new();
        for record in &records {
            if !seen.insert(record.id()) {
                anyhow::bail!("Duplicate id {:?} in seed file {:?}", record.id(), path);
            }
        }
        tracing::debug!(path = ?path, count = records.len(), "loaded seed file");
        Ok(Self::new(records))
    }
}

impl<R: Record> RecordRepository for InMemoryRepository<R> {
    type Record = R;

    async fn list(&self) -> anyhow::Result<Vec<R>> {
        Ok(self.records.read().await.clone())
    }

    async fn get(&self, id: &R::Id) -> anyhow::Result<Option<R>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|record| &record.id() == id).cloned())
    }

    async fn insert(&self, record: R) -> anyhow::Result<R> {
        let mut records = self.records.write().await;
        let id = record.id();
        if records.iter().any(|existing| existing.id() == id) {
            anyhow::bail!("Record {:?} already exists", id);
        }
        tracing::debug!(id = ?id, "inserting record");
        records.push(record.clone());
        Ok(record)
    }

    async fn update(&self, record: R) -> anyhow::Result<R> {
        let mut records = self.records.write().await;
        let id = record.id();
        let slot = records
            .iter_mut()
            .find(|existing| existing.id() == id)
            .ok_or_else(|| anyhow::anyhow!("Record {:?} not found", id))?;
        tracing::debug!(id = ?id, "updating record");
        *slot = record.clone();
        Ok(record)
    }

    async fn delete(&self, id: &R::Id) -> anyhow::Result<()> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|record| &record.id() != id);
        if records.len() == before {
            anyhow::bail!("Record {:?} not found", id);
        }
        tracing::debug!(id = ?id, "deleted record");
        Ok(())
    }
}

/// Build a loaded page state from whatever the repository currently holds.
pub async fn load_page<Repo>(repo: &Repo) -> anyhow::Result<PageState<Repo::Record>>
where
    Repo: RecordRepository,
{
    let records = repo.list().await.context("Failed to load page records")?;
    Ok(PageState::new(records))
}
