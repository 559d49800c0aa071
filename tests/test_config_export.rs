//! Integration tests for configuration loading and JSON export.

use std::path::PathBuf;

use dashkit::{
    DashboardConfig,
    core::{CategoryFilter, PageAction, PageState},
    data::{Page, invoice::InvoicePage},
    export,
};
use time::macros::date;

#[test]
fn test_config_defaults_and_partial_file() -> anyhow::Result<()> {
    let defaults = DashboardConfig::load_or_default(None)?;
    assert_eq!(defaults, DashboardConfig::default());
    assert_eq!(defaults.items_per_page, 10);

    let dir = tempfile::TempDir::new()?;
    let path = dir.path().join("dashkit.json");
    std::fs::write(&path, r#"{ "base_path": "/admin/", "today": "2024-03-15" }"#)?;

    let config = DashboardConfig::load(&path)?;
    assert_eq!(config.base_path, "/admin/");
    assert_eq!(config.items_per_page, 10);
    assert_eq!(config.today(), date!(2024-03-15));
    Ok(())
}

#[test]
fn test_config_errors_are_reported() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    assert!(DashboardConfig::load(dir.path().join("missing.json")).is_err());

    let path = dir.path().join("broken.json");
    std::fs::write(&path, "items_per_page = 3")?;
    assert!(DashboardConfig::load(&path).is_err());
    Ok(())
}

#[test]
fn test_export_path_respects_base_path() -> anyhow::Result<()> {
    let config = DashboardConfig {
        output_dir: PathBuf::from("dist"),
        base_path: "/admin/".to_string(),
        ..DashboardConfig::default()
    };
    assert_eq!(config.export_path("orders"), PathBuf::from("dist/admin/orders.json"));

    let root = DashboardConfig::default();
    assert_eq!(root.export_path("orders"), PathBuf::from("dist/orders.json"));
    Ok(())
}

#[test]
fn test_write_view_exports_filtered_rows() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let config = DashboardConfig {
        output_dir: dir.path().to_path_buf(),
        base_path: "/static".to_string(),
        ..DashboardConfig::default()
    };

    let state = PageState::new(InvoicePage::seed())
        .with_per_page(2)
        .reduce(PageAction::SetFacet(
            "status".to_string(),
            CategoryFilter::parse("paid"),
        ));
    let path = export::write_view::<InvoicePage>(&config, &state)?;
    assert_eq!(path, dir.path().join("static").join("invoices.json"));

    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    assert_eq!(json["page"], "invoices");
    assert_eq!(json["state"], "rows");
    assert_eq!(json["total_records"], 12);
    assert_eq!(json["matched"], 4);
    assert_eq!(json["total_pages"], 2);
    assert_eq!(json["rows"].as_array().map(Vec::len), Some(2));
    assert_eq!(json["rows"][0]["number"], "INV-2024-001");
    Ok(())
}

#[test]
fn test_write_view_marks_empty_results() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let config = DashboardConfig {
        output_dir: dir.path().to_path_buf(),
        ..DashboardConfig::default()
    };
    let state = PageState::new(InvoicePage::seed())
        .reduce(PageAction::SetSearch("no such client".to_string()));

    let path = export::write_view::<InvoicePage>(&config, &state)?;
    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    assert_eq!(json["state"], "no_results");
    assert_eq!(json["rows"].as_array().map(Vec::len), Some(0));
    Ok(())
}
