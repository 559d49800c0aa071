//! Writing derived views out as static JSON assets.

use std::path::PathBuf;

use anyhow::Context;
use serde::Serialize;

use crate::{
    config::DashboardConfig,
    core::{DerivedView, PageState, ViewState},
    data::Page,
};

#[derive(Debug, Serialize)]
pub struct ExportedView<'a, R> {
    pub page: &'static str,
    /// `rows`, `no_results`, `unpopulated` or `loading`.
    pub state: &'static str,
    pub total_records: usize,
    pub matched: usize,
    pub current_page: usize,
    pub total_pages: usize,
    pub rows: Vec<&'a R>,
}

impl<'a, R> ExportedView<'a, R> {
    pub fn new(page: &'static str, total_records: usize, view: &DerivedView<'a, R>) -> Self {
        let state = match &view.state {
            ViewState::Loading => "loading",
            ViewState::Unpopulated => "unpopulated",
            ViewState::NoResults { .. } => "no_results",
            ViewState::Rows(_) => "rows",
        };
        Self {
            page,
            state,
            total_records,
            matched: view.matched,
            current_page: view.window.current_page,
            total_pages: view.window.total_pages,
            rows: view.state.rows().to_vec(),
        }
    }
}

/// Serialize the page's current view to its export path, creating parent
/// directories as needed.
pub fn write_view<P: Page>(
    config: &DashboardConfig,
    state: &PageState<P::Record>,
) -> anyhow::Result<PathBuf> {
    let path = config.export_path(P::NAME);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create export directory {:?}", parent))?;
    }

    let view = state.derive();
    let exported = ExportedView::new(P::NAME, state.records().len(), &view);
    let json = serde_json::to_string_pretty(&exported)
        .with_context(|| format!("Failed to serialize {} view", P::NAME))?;
    std::fs::write(&path, json).with_context(|| format!("Failed to write {:?}", path))?;

    tracing::info!(page = P::NAME, path = ?path, rows = exported.rows.len(), "exported view");
    Ok(path)
}
