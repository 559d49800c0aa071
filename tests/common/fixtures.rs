use dashkit::core::{FacetSpec, Record, SortKey};
use serde::{Deserialize, Serialize};

pub const STATUSES: &[&str] = &["open", "closed"];

/// A minimal record with one facet, one flag and two sort keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub name: String,
    pub owner: String,
    pub status: String,
    pub pinned: bool,
    pub score: i64,
}

impl Record for Item {
    type Id = u32;

    const FACETS: &'static [FacetSpec] = &[FacetSpec::new("status", STATUSES)];
    const FLAGS: &'static [&'static str] = &["pinned"];
    const SORT_KEYS: &'static [&'static str] = &["name", "score"];

    fn id(&self) -> u32 {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.owner]
    }

    fn facet(&self, name: &str) -> Option<&'static str> {
        match name {
            "status" => STATUSES.iter().copied().find(|status| *status == self.status),
            _ => None,
        }
    }

    fn flag(&self, name: &str) -> Option<bool> {
        match name {
            "pinned" => Some(self.pinned),
            _ => None,
        }
    }

    fn sort_key(&self, key: &str) -> Option<SortKey> {
        match key {
            "name" => Some(SortKey::text(&self.name)),
            "score" => Some(SortKey::Int(self.score)),
            _ => None,
        }
    }
}

pub fn make_item(id: u32, name: &str, owner: &str, status: &str, pinned: bool) -> Item {
    Item {
        id,
        name: name.to_string(),
        owner: owner.to_string(),
        status: status.to_string(),
        pinned,
        score: i64::from(id) * 10,
    }
}

/// `count` items with ids `0..count`: even ids are open, every third id is
/// pinned.
pub fn make_items(count: u32) -> Vec<Item> {
    (0..count)
        .map(|id| {
            let status = if id % 2 == 0 { "open" } else { "closed" };
            make_item(id, &format!("Item {id}"), "Alex", status, id % 3 == 0)
        })
        .collect()
}

/// A handful of items with varied names and owners for search tests.
pub fn sample_items() -> Vec<Item> {
    vec![
        make_item(1, "Quarterly report", "Sarah Johnson", "open", true),
        make_item(2, "Invoice review", "Michael Chen", "closed", false),
        make_item(3, "Server migration", "Emily Davis", "open", false),
        make_item(4, "Report template", "David Wilson", "closed", true),
        make_item(5, "Onboarding checklist", "Sarah Miller", "open", false),
    ]
}

pub fn ids<'a>(items: impl IntoIterator<Item = &'a Item>) -> Vec<u32> {
    items.into_iter().map(|item| item.id).collect()
}
