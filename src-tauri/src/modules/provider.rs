// Tab snapshot provider - the host side of the popup.
// The trait is the seam; `SharedTabList` is an in-process host with no Tauri
// imports, used by embedders that own their tab list and by tests.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::error::TabListError;
use crate::state::{TabId, TabRecord};

#[async_trait]
pub trait TabProvider: Send + Sync {
    /// Current open tabs, in host order.
    async fn list_tabs(&self) -> Result<Vec<TabRecord>, TabListError>;

    /// Closes the given tabs. Completes once the host has removed them.
    async fn close_tabs(&self, ids: &[TabId]) -> Result<(), TabListError>;
}

/// Clonable handle over a tab list owned by the embedding process.
#[derive(Clone, Default)]
pub struct SharedTabList {
    tabs: Arc<Mutex<Vec<TabRecord>>>,
}

impl SharedTabList {
    pub fn new(tabs: Vec<TabRecord>) -> Self {
        Self {
            tabs: Arc::new(Mutex::new(tabs)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<TabRecord>>, TabListError> {
        self.tabs
            .lock()
            .map_err(|e| TabListError::Provider(e.to_string()))
    }

    /// Appends a tab at the end of the host order.
    pub fn open(&self, tab: TabRecord) -> Result<(), TabListError> {
        self.lock()?.push(tab);
        Ok(())
    }

    pub fn snapshot(&self) -> Result<Vec<TabRecord>, TabListError> {
        Ok(self.lock()?.clone())
    }

    pub fn len(&self) -> usize {
        self.lock().map(|tabs| tabs.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl TabProvider for SharedTabList {
    async fn list_tabs(&self) -> Result<Vec<TabRecord>, TabListError> {
        self.snapshot()
    }

    async fn close_tabs(&self, ids: &[TabId]) -> Result<(), TabListError> {
        let wanted: HashSet<&TabId> = ids.iter().collect();
        let mut tabs = self.lock().map_err(|e| TabListError::Close {
            ids: ids.to_vec(),
            reason: e.to_string(),
        })?;

        let before = tabs.len();
        tabs.retain(|tab| !wanted.contains(&tab.id));
        let closed = before - tabs.len();

        if closed < wanted.len() {
            // Already gone on the host side; nothing left to close.
            log::warn!(
                "[TabList] {} of {} tab(s) were not open",
                wanted.len() - closed,
                wanted.len()
            );
        }
        Ok(())
    }
}

/// Ids whose close was requested but which the host may still report.
///
/// Hosts that close asynchronously can list a tab for a while after the close
/// call returned; `retain_open` hides those until they are really gone.
#[derive(Debug, Default)]
pub struct PendingCloses {
    ids: Mutex<HashSet<TabId>>,
}

impl PendingCloses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&self, id: &TabId) {
        if let Ok(mut ids) = self.ids.lock() {
            ids.insert(id.clone());
        }
    }

    pub fn unmark(&self, id: &TabId) {
        if let Ok(mut ids) = self.ids.lock() {
            ids.remove(id);
        }
    }

    pub fn is_pending(&self, id: &TabId) -> bool {
        self.ids.lock().map(|ids| ids.contains(id)).unwrap_or(false)
    }

    /// Drops pending tabs from a host snapshot, and forgets pending ids the
    /// host no longer reports.
    pub fn retain_open(&self, mut tabs: Vec<TabRecord>) -> Vec<TabRecord> {
        let Ok(mut ids) = self.ids.lock() else {
            return tabs;
        };
        if ids.is_empty() {
            return tabs;
        }

        let listed: HashSet<&TabId> = tabs.iter().map(|t| &t.id).collect();
        ids.retain(|id| listed.contains(id));
        tabs.retain(|tab| !ids.contains(&tab.id));
        tabs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> SharedTabList {
        SharedTabList::new(vec![
            TabRecord::new("1", "One", "https://1.example"),
            TabRecord::new("2", "Two", "https://2.example"),
            TabRecord::new("3", "Three", "https://3.example"),
        ])
    }

    fn ids(tabs: &[TabRecord]) -> Vec<&str> {
        tabs.iter().map(|t| t.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_list_returns_host_order() {
        let host = host();
        host.open(TabRecord::new("0", "Zero", "https://0.example")).unwrap();

        let tabs = host.list_tabs().await.unwrap();
        assert_eq!(ids(&tabs), vec!["1", "2", "3", "0"]);
    }

    #[tokio::test]
    async fn test_close_removes_tabs() {
        let host = host();

        host.close_tabs(&[TabId::from("1"), TabId::from("3")]).await.unwrap();

        let tabs = host.list_tabs().await.unwrap();
        assert_eq!(ids(&tabs), vec!["2"]);
    }

    #[tokio::test]
    async fn test_close_unknown_id_is_not_an_error() {
        let host = host();

        host.close_tabs(&[TabId::from("2"), TabId::from("99")]).await.unwrap();

        assert_eq!(host.len(), 2);
    }

    #[test]
    fn test_pending_close_is_hidden_while_host_still_lists_it() {
        let pending = PendingCloses::new();
        pending.mark(&TabId::from("2"));

        // Host has not processed the close yet.
        let listed = pending.retain_open(host().snapshot().unwrap());

        assert_eq!(ids(&listed), vec!["1", "3"]);
        assert!(pending.is_pending(&TabId::from("2")));
    }

    #[test]
    fn test_pending_close_is_forgotten_once_host_drops_it() {
        let pending = PendingCloses::new();
        pending.mark(&TabId::from("2"));
        let host = host();

        let remaining = vec![TabRecord::new("1", "One", "https://1.example")];
        pending.retain_open(remaining);
        assert!(!pending.is_pending(&TabId::from("2")));

        // Nothing pending: snapshots pass through untouched.
        assert_eq!(ids(&pending.retain_open(host.snapshot().unwrap())), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_unmark_after_failed_close_shows_tab_again() {
        let pending = PendingCloses::new();
        pending.mark(&TabId::from("3"));
        pending.unmark(&TabId::from("3"));

        assert_eq!(ids(&pending.retain_open(host().snapshot().unwrap())), vec!["1", "2", "3"]);
    }
}
