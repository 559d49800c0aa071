//! Integration tests for the in-memory record repository.

mod common;

use std::io::Write;

use dashkit::data::{
    InMemoryRepository, RecordRepository, invoice::InvoicePage, load_page,
};

use common::*;

#[tokio::test]
async fn test_crud_round_trip() -> anyhow::Result<()> {
    let repo = InMemoryRepository::new(sample_items());
    assert_eq!(repo.list().await?.len(), 5);

    let inserted = repo
        .insert(make_item(6, "Budget sign-off", "Jessica Brown", "open", false))
        .await?;
    assert_eq!(inserted.id, 6);
    assert_eq!(repo.list().await?.len(), 6);

    let mut renamed = repo
        .get(&6)
        .await?
        .ok_or_else(|| anyhow::anyhow!("inserted item missing"))?;
    renamed.name = "Budget approval".to_string();
    repo.update(renamed).await?;
    let fetched = repo.get(&6).await?;
    assert_eq!(fetched.map(|item| item.name), Some("Budget approval".to_string()));

    repo.delete(&6).await?;
    assert!(repo.get(&6).await?.is_none());
    assert_eq!(repo.list().await?.len(), 5);
    Ok(())
}

#[tokio::test]
async fn test_constraint_violations() -> anyhow::Result<()> {
    let repo = InMemoryRepository::new(sample_items());

    let duplicate = repo.insert(make_item(1, "Again", "Someone", "open", false)).await;
    assert!(duplicate.is_err(), "Duplicate ids should be rejected");

    let missing = repo.update(make_item(42, "Ghost", "Nobody", "open", false)).await;
    assert!(missing.is_err(), "Updating a missing record should fail");

    assert!(repo.delete(&42).await.is_err());
    assert_eq!(repo.list().await?.len(), 5);
    Ok(())
}

#[tokio::test]
async fn test_clones_share_records() -> anyhow::Result<()> {
    let repo = InMemoryRepository::new(Vec::<Item>::new());
    let other = repo.clone();
    other.insert(make_item(1, "Shared", "Alex", "open", false)).await?;
    assert_eq!(repo.list().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_seed_from_json_file() -> anyhow::Result<()> {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile()?;
    file.write_all(serde_json::to_string(&sample_items())?.as_bytes())?;

    let repo = InMemoryRepository::<Item>::from_json_file(file.path())?;
    let state = load_page(&repo).await?;
    assert!(state.is_loaded());
    assert_eq!(ids(state.records()), vec![1, 2, 3, 4, 5]);
    Ok(())
}

#[tokio::test]
async fn test_seed_file_rejects_duplicates_and_garbage() -> anyhow::Result<()> {
    let mut items = sample_items();
    items.push(items[0].clone());
    let mut duplicates = tempfile::NamedTempFile::new()?;
    duplicates.write_all(serde_json::to_string(&items)?.as_bytes())?;
    assert!(InMemoryRepository::<Item>::from_json_file(duplicates.path()).is_err());

    let mut garbage = tempfile::NamedTempFile::new()?;
    garbage.write_all(b"{ not json")?;
    assert!(InMemoryRepository::<Item>::from_json_file(garbage.path()).is_err());

    let dir = tempfile::TempDir::new()?;
    assert!(InMemoryRepository::<Item>::from_json_file(dir.path().join("missing.json")).is_err());
    Ok(())
}

#[tokio::test]
async fn test_seeded_repository_serves_page_fixtures() -> anyhow::Result<()> {
    let repo = InMemoryRepository::seeded::<InvoicePage>();
    let state = load_page(&repo).await?;
    assert_eq!(state.records().len(), 12);
    Ok(())
}
