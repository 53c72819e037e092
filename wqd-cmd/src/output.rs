//! Loading, deriving and writing shared by every command.

use crate::SourceArgs;
use anyhow::Context;
use log::info;
use serde::Serialize;
use wqd_core::{LoadState, RawRecord, RowStore, Rows};
use wqd_data::view::{ChartView, ViewState};

/// Load the source CSV into a fresh store and return its final state.
pub async fn load(source: &SourceArgs) -> LoadState<Rows> {
    let store = RowStore::new();
    let client = reqwest::Client::new();
    store.load(&client, &source.csv).await;
    store.state()
}

/// Derive a chart from loaded rows and write it. A failed load becomes the
/// command's error.
pub fn render<F, O, D>(
    state: &LoadState<Rows>,
    filter: &F,
    derive: D,
    source: &SourceArgs,
) -> anyhow::Result<()>
where
    F: Clone + PartialEq,
    O: Serialize,
    D: FnOnce(&[RawRecord], &F) -> O,
{
    let mut view = ChartView::new();
    match view.refresh(state, filter, derive) {
        ViewState::Ready(output) => write_json(output, source),
        ViewState::Failed(message) => anyhow::bail!("{}", message),
        ViewState::Idle | ViewState::Loading => {
            anyhow::bail!("No rows loaded from {}", source.csv)
        }
    }
}

/// Serialize `value` to the requested output.
pub fn write_json<T: Serialize>(value: &T, source: &SourceArgs) -> anyhow::Result<()> {
    let json = if source.compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    match &source.output {
        Some(path) => {
            std::fs::write(path, format!("{}\n", json))
                .with_context(|| format!("Failed to write {}", path))?;
            info!("Output: {}", path);
        }
        None => println!("{}", json),
    }
    Ok(())
}
