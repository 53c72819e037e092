//! Load state shared by every chart-producing view.
//!
//! `Idle -> Loading -> {Ready, Failed}`; re-entering `Loading` from `Ready`
//! or `Failed` is allowed whenever the locator or filters are re-established.

/// Observable state of a fetch-and-decode (or of anything derived from one).
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    /// Nothing requested yet.
    Idle,
    /// A request is in flight; no data and no error.
    Loading,
    /// The last successful result.
    Ready(T),
    /// A user-visible error message; no data.
    Failed(String),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Idle
    }
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LoadState;

    #[test]
    fn default_is_idle() {
        let state: LoadState<Vec<u8>> = LoadState::default();
        assert_eq!(state, LoadState::Idle);
        assert!(state.ready().is_none());
        assert!(state.error().is_none());
    }

    #[test]
    fn only_failed_carries_a_message() {
        assert_eq!(LoadState::Ready(2).ready(), Some(&2));
        assert!(LoadState::Ready(2).error().is_none());
        assert_eq!(LoadState::<i32>::Failed("boom".into()).error(), Some("boom"));
        assert!(LoadState::<i32>::Loading.ready().is_none());
        assert!(LoadState::<i32>::Loading.is_loading());
    }
}
