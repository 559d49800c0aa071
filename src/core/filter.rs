use std::{
    collections::{BTreeMap, BTreeSet},
    str::FromStr,
};

use crate::core::record::{Record, facet_spec};

/// Sentinel accepted by every categorical filter to mean "don't filter".
pub const ALL_SENTINEL: &str = "all";

/// State of a single categorical filter (status, category, priority, ...).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Empty input and `"all"` (any case) both disable the filter.
    pub fn parse(value: &str) -> Self {
        if value.is_empty() || value.eq_ignore_ascii_case(ALL_SENTINEL) {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value.to_string())
        }
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Only(value) => Some(value.as_str()),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CategoryFilter::All)
    }
}

/// One active condition of a derived view. All predicates of a view are
/// combined with logical AND.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Case-insensitive substring match against the searchable fields.
    /// The term is stored lowercased.
    Search(String),
    /// Exact equality against a categorical facet.
    Facet { name: String, value: String },
    /// The named boolean flag must be set.
    Flag(String),
}

impl Predicate {
    pub fn search(term: &str) -> Self {
        Predicate::Search(term.to_lowercase())
    }

    pub fn facet(name: impl Into<String>, value: impl Into<String>) -> Self {
        Predicate::Facet {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn flag(name: impl Into<String>) -> Self {
        Predicate::Flag(name.into())
    }

    pub fn matches<R: Record>(&self, record: &R) -> bool {
        match self {
            Predicate::Search(term) => {
                term.is_empty()
                    || record
                        .search_fields()
                        .iter()
                        .any(|field| field.to_lowercase().contains(term.as_str()))
            }
            Predicate::Facet { name, value } => record.facet(name) == Some(value.as_str()),
            Predicate::Flag(name) => record.flag(name).unwrap_or(false),
        }
    }
}

/// Select the records satisfying every predicate, in their original order.
pub fn filter_records<'a, R: Record>(records: &'a [R], predicates: &[Predicate]) -> Vec<&'a R> {
    records
        .iter()
        .filter(|record| predicates.iter().all(|predicate| predicate.matches(*record)))
        .collect()
}

/// User-controlled filter inputs of one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    search_term: String,
    facets: BTreeMap<String, CategoryFilter>,
    flags: BTreeSet<String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.set_search(term);
        self
    }

    pub fn with_facet(mut self, name: impl Into<String>, value: &str) -> Self {
        self.set_facet(name, CategoryFilter::parse(value));
        self
    }

    pub fn with_flag(mut self, name: impl Into<String>) -> Self {
        self.flags.insert(name.into());
        self
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Setting a facet to [`CategoryFilter::All`] forgets it.
    pub fn set_facet(&mut self, name: impl Into<String>, filter: CategoryFilter) {
        let name = name.into();
        match filter {
            CategoryFilter::All => {
                self.facets.remove(&name);
            }
            only => {
                self.facets.insert(name, only);
            }
        }
    }

    pub fn clear_facet(&mut self, name: &str) {
        self.facets.remove(name);
    }

    /// Returns whether the flag is active afterwards.
    pub fn toggle_flag(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.flags.remove(&name) {
            false
        } else {
            self.flags.insert(name);
            true
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn facet(&self, name: &str) -> CategoryFilter {
        self.facets.get(name).cloned().unwrap_or_default()
    }

    pub fn is_flag_active(&self, name: &str) -> bool {
        self.flags.contains(name)
    }

    pub fn active_flags(&self) -> impl Iterator<Item = &str> {
        self.flags.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.search_term.is_empty() && self.facets.is_empty() && self.flags.is_empty()
    }

    /// Compile the state into predicates for `R`.
    ///
    /// Facets or flags `R` doesn't know about, and facet values outside the
    /// facet's value set, are dropped rather than matching nothing.
    pub fn predicates<R: Record>(&self) -> Vec<Predicate> {
        let mut predicates = Vec::new();
        if !self.search_term.is_empty() {
            predicates.push(Predicate::search(&self.search_term));
        }
        for (name, filter) in &self.facets {
            let Some(value) = filter.value() else {
                continue;
            };
            match facet_spec::<R>(name) {
                Some(spec) if spec.accepts(value) => {
                    predicates.push(Predicate::facet(name.as_str(), value));
                }
                Some(_) => {
                    tracing::debug!(facet = %name, value, "ignoring unknown facet value");
                }
                None => {
                    tracing::debug!(facet = %name, "ignoring unknown facet");
                }
            }
        }
        for flag in &self.flags {
            if R::FLAGS.contains(&flag.as_str()) {
                predicates.push(Predicate::flag(flag.as_str()));
            } else {
                tracing::debug!(flag = %flag, "ignoring unknown flag");
            }
        }
        predicates
    }

    pub fn apply<'a, R: Record>(&self, records: &'a [R]) -> Vec<&'a R> {
        filter_records(records, &self.predicates::<R>())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// An explicit, secondary ordering applied after filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub key: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Descending,
        }
    }

    pub fn is_supported_by<R: Record>(&self) -> bool {
        R::SORT_KEYS.contains(&self.key.as_str())
    }
}

/// Parses `key`, `key:asc` or `key:desc`.
impl FromStr for SortSpec {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, direction) = match s.split_once(':') {
            Some((key, "asc")) => (key, SortDirection::Ascending),
            Some((key, "desc")) => (key, SortDirection::Descending),
            Some((_, other)) => anyhow::bail!("Invalid sort direction: {}", other),
            None => (s, SortDirection::Ascending),
        };
        if key.is_empty() {
            anyhow::bail!("Sort key must not be empty");
        }
        Ok(Self {
            key: key.to_string(),
            direction,
        })
    }
}

/// Stable sort of already filtered rows. Records without a value for the
/// key sort first in ascending order.
pub fn sort_records<R: Record>(rows: &mut [&R], spec: &SortSpec) {
    rows.sort_by(|a, b| {
        let ordering = a.sort_key(&spec.key).cmp(&b.sort_key(&spec.key));
        match spec.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}
