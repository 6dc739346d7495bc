use std::sync::{Mutex, PoisonError};

use tracing::debug;

use super::location::Location;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// In-app navigation, state is kept.
    Push(Location),
    /// Full navigation: every bit of in-memory state is thrown away.
    Reload(Location),
}

impl Navigation {
    pub fn location(&self) -> &Location {
        match self {
            Navigation::Push(location) | Navigation::Reload(location) => location,
        }
    }
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, navigation: Navigation);
}

/// Keeps every navigation so the shell (or a test) can act on it later.
#[derive(Debug, Default)]
pub struct HistoryNavigator {
    history: Mutex<Vec<Navigation>>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Navigation> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last(&self) -> Option<Navigation> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl Navigator for HistoryNavigator {
    fn navigate(&self, navigation: Navigation) {
        debug!("navigating: {:?}", navigation);
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(navigation);
    }
}
