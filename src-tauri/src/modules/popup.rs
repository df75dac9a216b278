// Popup glue - Tauri commands, window-backed provider and event renderer.
// Each open webview window other than the popup counts as one tab.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex as StdMutex;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tauri::{AppHandle, Emitter, Manager, State, WebviewUrl, WebviewWindowBuilder, WindowEvent};
use tokio::sync::{oneshot, Mutex};
use url::Url;

use crate::error::TabListError;
use crate::modules::controller::PopupController;
use crate::modules::provider::{PendingCloses, TabProvider};
use crate::modules::renderer::ListRenderer;
use crate::modules::sort::SortMode;
use crate::settings::Settings;
use crate::state::{Row, RowClick, RowUpdate, TabId, TabRecord};

const TAB_LABEL_PREFIX: &str = "tab-";
const CLOSE_TIMEOUT: Duration = Duration::from_secs(5);

pub struct WindowTabProvider {
    app: AppHandle,
    popup_label: String,
    // destroy() is queued to the event loop; windows stay listed until their
    // Destroyed event has been handled.
    pending: PendingCloses,
}

#[async_trait]
impl TabProvider for WindowTabProvider {
    async fn list_tabs(&self) -> Result<Vec<TabRecord>, TabListError> {
        let mut windows: Vec<_> = self
            .app
            .webview_windows()
            .into_iter()
            .filter(|(label, _)| *label != self.popup_label)
            .collect();
        // Labels carry a zero-padded counter, so this is opening order.
        windows.sort_by(|a, b| a.0.cmp(&b.0));

        let tabs = windows
            .into_iter()
            .map(|(label, window)| -> Result<TabRecord, TabListError> {
                let title = window.title().map_err(|e| TabListError::Provider(e.to_string()))?;
                let url = window.url().map_err(|e| TabListError::Provider(e.to_string()))?;
                Ok(TabRecord::new(label, title, url.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(self.pending.retain_open(tabs))
    }

    async fn close_tabs(&self, ids: &[TabId]) -> Result<(), TabListError> {
        let mut closing = Vec::with_capacity(ids.len());

        for id in ids {
            let Some(window) = self.app.get_webview_window(id.as_str()) else {
                log::warn!("[TabList] Window {} already closed", id);
                continue;
            };

            let (tx, rx) = oneshot::channel::<()>();
            let tx = StdMutex::new(Some(tx));
            window.on_window_event(move |event| {
                if let WindowEvent::Destroyed = event {
                    if let Some(sender) = tx.lock().ok().and_then(|mut slot| slot.take()) {
                        let _ = sender.send(());
                    }
                }
            });

            self.pending.mark(id);
            if let Err(e) = window.destroy() {
                self.pending.unmark(id);
                return Err(TabListError::Close {
                    ids: ids.to_vec(),
                    reason: e.to_string(),
                });
            }
            closing.push((id, rx));
        }

        for (id, rx) in closing {
            if tokio::time::timeout(CLOSE_TIMEOUT, rx).await.is_err() {
                log::warn!("[TabList] Window {} still closing after {:?}", id, CLOSE_TIMEOUT);
            }
        }
        Ok(())
    }
}

/// Logs an emit that did not reach the webview. Returns whether it did.
fn check_emit(event: &str, result: tauri::Result<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            log::warn!("[TabList] Failed to emit {}: {}", event, e);
            false
        }
    }
}

/// Pushes list changes to the popup webview as events.
pub struct EventRenderer {
    app: AppHandle,
}

impl EventRenderer {
    fn emit<S: Serialize + Clone>(&self, event: &str, payload: S) {
        check_emit(event, self.app.emit(event, payload));
    }
}

impl ListRenderer for EventRenderer {
    fn render(&mut self, rows: &[Row]) {
        self.emit("popup-rows", rows);
    }

    fn reflect(&mut self, updates: &[RowUpdate]) {
        self.emit("popup-rows-updated", updates);
    }

    fn show_error(&mut self, error: &TabListError) {
        self.emit("popup-error", error.to_string());
    }
}

pub struct PopupState {
    controller: Mutex<PopupController<WindowTabProvider, EventRenderer>>,
    next_tab: AtomicU64,
}

impl PopupState {
    pub fn new(app: AppHandle, settings: &Settings) -> Self {
        let provider = WindowTabProvider {
            app: app.clone(),
            popup_label: settings.popup_window_label.clone(),
            pending: PendingCloses::new(),
        };
        let renderer = EventRenderer { app };

        Self {
            controller: Mutex::new(PopupController::new(provider, renderer, settings)),
            next_tab: AtomicU64::new(1),
        }
    }
}

// The controller mutex queues overlapping requests: a reload issued while a
// close is in flight runs after the close and its own reload finish.

#[tauri::command]
pub async fn popup_reload(state: State<'_, PopupState>) -> Result<(), String> {
    let mut controller = state.controller.lock().await;
    controller.reload().await.map(|_| ()).map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn popup_click(
    state: State<'_, PopupState>,
    event: RowClick,
) -> Result<Vec<RowUpdate>, String> {
    let mut controller = state.controller.lock().await;
    Ok(controller.click(event))
}

#[tauri::command]
pub async fn popup_close_selected(state: State<'_, PopupState>) -> Result<Vec<TabId>, String> {
    let mut controller = state.controller.lock().await;
    controller.close_selected().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn popup_sort(state: State<'_, PopupState>, mode: SortMode) -> Result<(), String> {
    let mut controller = state.controller.lock().await;
    controller.sort_by(mode).await.map(|_| ()).map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn popup_clear_sort(state: State<'_, PopupState>) -> Result<(), String> {
    let mut controller = state.controller.lock().await;
    controller.clear_sort().await.map(|_| ()).map_err(|e| e.to_string())
}

/// Opens `url` in a new window so it shows up in the list.
#[tauri::command]
pub async fn open_tab(
    app: AppHandle,
    state: State<'_, PopupState>,
    url: String,
) -> Result<(), String> {
    let parsed = Url::parse(url.trim()).map_err(|e| e.to_string())?;
    let n = state.next_tab.fetch_add(1, Ordering::Relaxed);
    let label = format!("{}{:06}", TAB_LABEL_PREFIX, n);

    log::info!("[TabList] Opening {} as {}", parsed, label);
    WebviewWindowBuilder::new(&app, &label, WebviewUrl::External(parsed.clone()))
        .title(parsed.as_str())
        .inner_size(1024.0, 768.0)
        .build()
        .map_err(|e| e.to_string())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_emit_reports_failure() {
        assert!(check_emit("popup-rows", Ok(())));
        assert!(!check_emit("popup-error", Err(tauri::Error::WebviewNotFound)));
    }
}
