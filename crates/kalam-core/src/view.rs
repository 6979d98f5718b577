//! Lifecycle state shared by every view controller:
//! `Idle → Loading → {Ready, Error}`.

use crate::error::ViewError;

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<M> {
    Idle,
    Loading,
    Ready(M),
    Error(ViewError),
}

impl<M> ViewState<M> {
    pub fn model(&self) -> Option<&M> {
        match self {
            ViewState::Ready(m) => Some(m),
            _ => None,
        }
    }

    pub fn model_mut(&mut self) -> Option<&mut M> {
        match self {
            ViewState::Ready(m) => Some(m),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ViewError> {
        match self {
            ViewState::Error(e) => Some(e),
            _ => None,
        }
    }

    /// Settle a load result into `Ready` or `Error`.
    pub fn settle(result: Result<M, ViewError>) -> Self {
        match result {
            Ok(m) => ViewState::Ready(m),
            Err(e) => ViewState::Error(e),
        }
    }
}

impl<M> Default for ViewState<M> {
    fn default() -> Self {
        ViewState::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settle_maps_result() {
        let ready: ViewState<u8> = ViewState::settle(Ok(3));
        assert_eq!(ready.model(), Some(&3));
        let failed: ViewState<u8> = ViewState::settle(Err(ViewError::FetchFailed {
            target: "x".to_string(),
            attempts: 3,
            reason: "down".to_string(),
        }));
        assert!(failed.error().is_some());
        assert!(failed.model().is_none());
    }

    #[test]
    fn default_is_idle() {
        let state: ViewState<()> = ViewState::default();
        assert_eq!(state, ViewState::Idle);
        assert!(state.model().is_none());
    }
}
