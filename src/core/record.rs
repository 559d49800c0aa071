use std::fmt::Debug;

use time::Date;

/// A categorical attribute a record can be filtered on, with the full set of
/// values it may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FacetSpec {
    pub name: &'static str,
    pub values: &'static [&'static str],
}

impl FacetSpec {
    pub const fn new(name: &'static str, values: &'static [&'static str]) -> Self {
        Self { name, values }
    }

    pub fn accepts(&self, value: &str) -> bool {
        self.values.contains(&value)
    }
}

/// Value a record exposes for explicit sorting.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Bool(bool),
    Int(i64),
    Date(Date),
    Text(String),
}

impl SortKey {
    pub fn text(value: &str) -> Self {
        SortKey::Text(value.to_lowercase())
    }
}

/// A row of a mock data set.
///
/// Implementors describe which string fields free-text search looks at,
/// which categorical facets and boolean flags they can be narrowed by, and
/// which keys they can be sorted on. Everything else about the record is
/// page-specific.
pub trait Record: Clone + Debug {
    type Id: Clone + Ord + Debug + Send + Sync + 'static;

    const FACETS: &'static [FacetSpec] = &[];
    const FLAGS: &'static [&'static str] = &[];
    const SORT_KEYS: &'static [&'static str] = &[];

    fn id(&self) -> Self::Id;

    /// Fields matched by the search box.
    fn search_fields(&self) -> Vec<&str>;

    fn facet(&self, _name: &str) -> Option<&'static str> {
        None
    }

    fn flag(&self, _name: &str) -> Option<bool> {
        None
    }

    fn sort_key(&self, _key: &str) -> Option<SortKey> {
        None
    }
}

pub fn facet_spec<R: Record>(name: &str) -> Option<&'static FacetSpec> {
    R::FACETS.iter().find(|spec| spec.name == name)
}

/// Rebuild `records` with the record identified by `id` passed through `edit`.
///
/// Every element of the returned collection is a fresh clone; the input is
/// left untouched. An unknown id yields an unchanged copy.
pub fn replace_record<R, F>(records: &[R], id: &R::Id, edit: F) -> Vec<R>
where
    R: Record,
    F: Fn(&R) -> R,
{
    records
        .iter()
        .map(|record| {
            if &record.id() == id {
                edit(record)
            } else {
                record.clone()
            }
        })
        .collect()
}

/// Declares a closed set of lowercase string-labelled variants usable as a
/// facet value: serde names, `Display`, `FromStr`, and the `VALUES` table
/// a [`FacetSpec`] points at.
macro_rules! facet_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        $vis enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
            pub const VALUES: &'static [&'static str] = &[$($label),+];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = anyhow::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok($name::$variant),)+
                    other => Err(anyhow::anyhow!(
                        "Invalid {} value: {}",
                        stringify!($name),
                        other
                    )),
                }
            }
        }
    };
}

pub(crate) use facet_enum;
