use std::sync::Arc;
use wqd_core::{LoadState, RawRecord, Rows};

/// What a chart should show right now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewState<'a, O> {
    Idle,
    Loading,
    Ready(&'a O),
    Failed(&'a str),
}

impl<'a, O> ViewState<'a, O> {
    pub fn ready(&self) -> Option<&'a O> {
        match self {
            ViewState::Ready(output) => Some(*output),
            _ => None,
        }
    }
}

/// A chart's derived output, recomputed only when its inputs change.
///
/// Inputs are the row sequence (compared by `Arc` identity, since rows are
/// never mutated after loading) and the filter (compared by value).
#[derive(Debug)]
pub struct ChartView<F, O> {
    last: Option<(Rows, F)>,
    output: Option<O>,
    recomputed: usize,
}

impl<F, O> Default for ChartView<F, O> {
    fn default() -> Self {
        Self {
            last: None,
            output: None,
            recomputed: 0,
        }
    }
}

impl<F: Clone + PartialEq, O> ChartView<F, O> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the view up to date with `state` and `filter`.
    ///
    /// Anything but `Ready` clears the cached output, so a later `Ready`
    /// always derives afresh.
    pub fn refresh<'a, D>(
        &'a mut self,
        state: &'a LoadState<Rows>,
        filter: &F,
        derive: D,
    ) -> ViewState<'a, O>
    where
        D: FnOnce(&[RawRecord], &F) -> O,
    {
        let rows = match state {
            LoadState::Idle => return self.clear(ViewState::Idle),
            LoadState::Loading => return self.clear(ViewState::Loading),
            LoadState::Failed(message) => return self.clear(ViewState::Failed(message)),
            LoadState::Ready(rows) => rows,
        };

        let fresh = matches!(
            &self.last,
            Some((last_rows, last_filter)) if Arc::ptr_eq(last_rows, rows) && last_filter == filter
        );
        if !fresh || self.output.is_none() {
            self.output = Some(derive(&rows[..], filter));
            self.last = Some((Arc::clone(rows), filter.clone()));
            self.recomputed += 1;
        }
        match &self.output {
            Some(output) => ViewState::Ready(output),
            None => ViewState::Idle,
        }
    }

    /// How many times `derive` has run.
    pub fn recomputed(&self) -> usize {
        self.recomputed
    }

    fn clear<'a>(&mut self, state: ViewState<'a, O>) -> ViewState<'a, O> {
        self.last = None;
        self.output = None;
        state
    }
}
