// Popup controller - wires user actions to the sort policy and selection model.
// No Tauri imports; the desktop glue wraps it in a tokio mutex so requests
// are handled one at a time.

use crate::error::TabListError;
use crate::modules::provider::TabProvider;
use crate::modules::renderer::ListRenderer;
use crate::modules::selection::SelectionModel;
use crate::modules::sort::{order, SortMode};
use crate::settings::Settings;
use crate::state::{Row, RowClick, RowUpdate, TabId};

/// State for one popup session. Dropped when the popup closes.
#[derive(Debug, Default)]
pub struct PopupSession {
    pub sort_mode: SortMode,
    pub selection: SelectionModel,
    pub rows: Vec<Row>,
}

pub struct PopupController<P, R> {
    provider: P,
    renderer: R,
    session: PopupSession,
    reload_when_nothing_selected: bool,
}

impl<P: TabProvider, R: ListRenderer> PopupController<P, R> {
    pub fn new(provider: P, renderer: R, settings: &Settings) -> Self {
        Self {
            provider,
            renderer,
            session: PopupSession {
                sort_mode: settings.default_sort,
                ..PopupSession::default()
            },
            reload_when_nothing_selected: settings.reload_when_nothing_selected,
        }
    }

    pub fn session(&self) -> &PopupSession {
        &self.session
    }

    pub fn rows(&self) -> &[Row] {
        &self.session.rows
    }

    pub fn sort_mode(&self) -> SortMode {
        self.session.sort_mode
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Fetches a fresh snapshot, orders it, reconciles the selection and
    /// redraws. On failure the session and the drawn rows stay as they were.
    pub async fn reload(&mut self) -> Result<&[Row], TabListError> {
        let tabs = match self.provider.list_tabs().await {
            Ok(tabs) => tabs,
            Err(e) => {
                log::error!("[TabList] Reload failed: {}", e);
                self.renderer.show_error(&e);
                return Err(e);
            }
        };

        let tabs = order(tabs, self.session.sort_mode);
        let ids: Vec<TabId> = tabs.iter().map(|t| t.id.clone()).collect();
        self.session.selection.reconcile_after_reload(&ids);

        let selection = &self.session.selection;
        self.session.rows = tabs
            .into_iter()
            .enumerate()
            .map(|(position, tab)| Row {
                position,
                selected: selection.is_selected(&tab.id),
                tab,
            })
            .collect();

        log::info!(
            "[TabList] Rendering {} tab(s), sort {:?}, {} selected",
            self.session.rows.len(),
            self.session.sort_mode,
            self.session.selection.selected_count()
        );
        self.renderer.render(&self.session.rows);
        Ok(&self.session.rows)
    }

    /// Applies a row click. Events that do not address a currently rendered
    /// row are ignored and produce no updates.
    pub fn click(&mut self, event: RowClick) -> Vec<RowUpdate> {
        let (Some(position), Some(id)) = (event.position, event.id) else {
            log::warn!("[TabList] Ignoring click without position or id");
            return Vec::new();
        };

        match self.session.rows.get(position) {
            Some(row) if row.tab.id == id => {}
            _ => {
                log::warn!("[TabList] Ignoring click on stale row {} ({})", position, id);
                return Vec::new();
            }
        }

        let row_ids: Vec<TabId> = self.session.rows.iter().map(|r| r.tab.id.clone()).collect();
        let updates =
            self.session
                .selection
                .toggle(position, &id, event.checked, event.shift_held, &row_ids);

        for update in &updates {
            if let Some(row) = self.session.rows.get_mut(update.position) {
                row.selected = update.checked;
            }
        }
        self.renderer.reflect(&updates);
        updates
    }

    /// Closes every checked row, then reloads. Returns the ids that were sent
    /// to the provider, in display order.
    pub async fn close_selected(&mut self) -> Result<Vec<TabId>, TabListError> {
        let ids: Vec<TabId> = self
            .session
            .rows
            .iter()
            .filter(|row| self.session.selection.is_selected(&row.tab.id))
            .map(|row| row.tab.id.clone())
            .collect();

        if ids.is_empty() {
            log::info!("[TabList] Close pressed with nothing selected");
            if self.reload_when_nothing_selected {
                self.reload().await?;
            }
            return Ok(ids);
        }

        log::info!("[TabList] Closing {} tab(s): {:?}", ids.len(), ids);
        if let Err(e) = self.provider.close_tabs(&ids).await {
            log::error!("[TabList] Close failed: {}", e);
            self.renderer.show_error(&e);
            return Err(e);
        }

        self.reload().await?;
        Ok(ids)
    }

    pub async fn sort_by(&mut self, mode: SortMode) -> Result<&[Row], TabListError> {
        self.session.sort_mode = mode;
        self.reload().await
    }

    pub async fn clear_sort(&mut self) -> Result<&[Row], TabListError> {
        self.sort_by(SortMode::None).await
    }
}
