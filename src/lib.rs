pub mod config;
pub mod core;
pub mod data;
pub mod export;
pub mod logging;
pub mod render;

pub use config::DashboardConfig;
pub use core::{
    CategoryFilter, FilterState, PageAction, PageState, PageWindow, Record, SelectionAction,
    SelectionState, ViewState,
};
pub use data::{InMemoryRepository, Page, PageKind, RecordRepository};

#[cfg(feature = "gui")]
pub mod gui;
