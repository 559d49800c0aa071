use serde::{Deserialize, Serialize};
use time::{Date, macros::date};

use crate::{
    core::{FacetSpec, Record, SortKey, record::facet_enum},
    data::{Page, RecordAction},
    render::{Column, mark},
};

facet_enum! {
    pub enum FileKind {
        Folder => "folder",
        Image => "image",
        Document => "document",
        Video => "video",
        Audio => "audio",
        Archive => "archive",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FileKind,
    pub size_bytes: u64,
    pub owner: String,
    pub modified_on: Date,
    pub starred: bool,
    pub shared: bool,
}

impl Record for FileEntry {
    type Id = u32;

    const FACETS: &'static [FacetSpec] = &[FacetSpec::new("type", FileKind::VALUES)];
    const FLAGS: &'static [&'static str] = &["starred", "shared"];
    const SORT_KEYS: &'static [&'static str] = &["name", "size", "modified"];

    fn id(&self) -> u32 {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.owner]
    }

    fn facet(&self, name: &str) -> Option<&'static str> {
        match name {
            "type" => Some(self.kind.as_str()),
            _ => None,
        }
    }

    fn flag(&self, name: &str) -> Option<bool> {
        match name {
            "starred" => Some(self.starred),
            "shared" => Some(self.shared),
            _ => None,
        }
    }

    fn sort_key(&self, key: &str) -> Option<SortKey> {
        match key {
            "name" => Some(SortKey::text(&self.name)),
            "size" => Some(SortKey::Int(i64::try_from(self.size_bytes).unwrap_or(i64::MAX))),
            "modified" => Some(SortKey::Date(self.modified_on)),
            _ => None,
        }
    }
}

pub fn toggle_starred(file: &FileEntry) -> FileEntry {
    FileEntry {
        starred: !file.starred,
        ..file.clone()
    }
}

pub fn toggle_shared(file: &FileEntry) -> FileEntry {
    FileEntry {
        shared: !file.shared,
        ..file.clone()
    }
}

pub fn storage_used(files: &[FileEntry]) -> u64 {
    files.iter().map(|file| file.size_bytes).sum()
}

/// Human-readable size in binary units, e.g. `2.4 MB`.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

#[derive(Debug, Clone, Copy)]
pub struct FilePage;

impl Page for FilePage {
    const NAME: &'static str = "files";
    const TITLE: &'static str = "Files";

    type Record = FileEntry;

    fn seed() -> Vec<FileEntry> {
        seed()
    }

    fn columns() -> Vec<Column<FileEntry>> {
        vec![
            Column::new("", |f: &FileEntry| mark(f.starred, "*")),
            Column::new("Name", |f: &FileEntry| f.name.clone()),
            Column::new("Type", |f: &FileEntry| f.kind.to_string()),
            Column::new("Size", |f: &FileEntry| {
                if f.kind == FileKind::Folder {
                    "-".to_string()
                } else {
                    format_size(f.size_bytes)
                }
            }),
            Column::new("Owner", |f: &FileEntry| f.owner.clone()),
            Column::new("Modified", |f: &FileEntry| f.modified_on.to_string()),
            Column::new("Shared", |f: &FileEntry| mark(f.shared, "yes")),
        ]
    }

    fn actions() -> Vec<RecordAction<FileEntry>> {
        vec![
            RecordAction::new("star", "Star", toggle_starred),
            RecordAction::new("share", "Share", toggle_shared),
        ]
    }

    fn summary(records: &[FileEntry]) -> Vec<(&'static str, String)> {
        vec![
            ("Items", records.len().to_string()),
            ("Storage used", format_size(storage_used(records))),
        ]
    }
}

fn file(
    id: u32,
    name: &str,
    kind: FileKind,
    size_bytes: u64,
    owner: &str,
    modified_on: Date,
) -> FileEntry {
    FileEntry {
        id,
        name: name.to_string(),
        kind,
        size_bytes,
        owner: owner.to_string(),
        modified_on,
        starred: false,
        shared: false,
    }
}

pub fn seed() -> Vec<FileEntry> {
    use FileKind::*;
    vec![
        FileEntry { shared: true, ..file(1, "Projects", Folder, 0, "Me", date!(2024-03-14)) },
        file(2, "Invoices 2024", Folder, 0, "Me", date!(2024-03-12)),
        FileEntry {
            starred: true,
            ..file(
                3,
                "Brand guidelines.pdf",
                Document,
                4_718_592,
                "Emily Davis",
                date!(2024-03-11),
            )
        },
        file(4, "Team photo.jpg", Image, 3_355_443, "Me", date!(2024-03-10)),
        FileEntry {
            starred: true,
            shared: true,
            ..file(
                5,
                "Product demo.mp4",
                Video,
                157_286_400,
                "Michael Chen",
                date!(2024-03-09),
            )
        },
        file(6, "Podcast episode 12.mp3", Audio, 52_428_800, "Sarah Johnson", date!(2024-03-08)),
        FileEntry {
            shared: true,
            ..file(7, "Q1 report.docx", Document, 1_153_434, "Me", date!(2024-03-07))
        },
        file(8, "Website backup.zip", Archive, 734_003_200, "Me", date!(2024-03-05)),
        file(9, "Logo.svg", Image, 24_576, "Emily Davis", date!(2024-03-04)),
        FileEntry {
            starred: true,
            ..file(10, "Budget 2024.xlsx", Document, 287_744, "Me", date!(2024-03-02))
        },
    ]
}
