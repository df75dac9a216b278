// Selection model - pure logic, no Tauri imports.
//
// Membership is keyed by tab id so it survives reloads and re-sorts. The
// shift-click anchor is a display position instead, and is only valid for the
// render it was recorded in.

use std::collections::HashSet;

use crate::state::{RowUpdate, TabId};

#[derive(Debug, Default, Clone)]
pub struct SelectionModel {
    selected: HashSet<TabId>,
    anchor: Option<usize>,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_selected(&self, id: &TabId) -> bool {
        self.selected.contains(id)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn selected_ids(&self) -> impl Iterator<Item = &TabId> {
        self.selected.iter()
    }

    /// Position of the last plain click, if any since the last reload.
    pub fn anchor(&self) -> Option<usize> {
        self.anchor
    }

    /// Drops selected ids that are not in the fresh snapshot and forgets the
    /// anchor. Must run before the new rows are rendered.
    pub fn reconcile_after_reload(&mut self, ordered_ids: &[TabId]) {
        let live: HashSet<&TabId> = ordered_ids.iter().collect();
        let before = self.selected.len();
        self.selected.retain(|id| live.contains(id));

        let dropped = before - self.selected.len();
        if dropped > 0 {
            log::debug!("[Selection] Dropped {} stale id(s) after reload", dropped);
        }
        self.anchor = None;
    }

    /// Applies a click on the row at `position`.
    ///
    /// A plain click (or a shift-click with no anchor) sets the membership of
    /// `id` alone. A shift-click with an anchor fills every row between the
    /// anchor and `position`, inclusive, with `checked`. Either way the clicked
    /// position becomes the new anchor.
    ///
    /// `row_ids` maps positions of the current render to ids. Positions past
    /// its end are skipped.
    ///
    /// Returns the rows whose checked state the UI must show, in position order.
    pub fn toggle(
        &mut self,
        position: usize,
        id: &TabId,
        checked: bool,
        shift_held: bool,
        row_ids: &[TabId],
    ) -> Vec<RowUpdate> {
        let previous = self.anchor.replace(position);

        let anchor = match previous {
            Some(anchor) if shift_held => anchor,
            _ => {
                self.set(id, checked);
                return vec![RowUpdate {
                    position,
                    id: id.clone(),
                    checked,
                }];
            }
        };

        let lo = anchor.min(position);
        let hi = anchor.max(position);
        let mut updates = Vec::new();

        for (pos, row_id) in row_ids.iter().enumerate().take(hi.saturating_add(1)).skip(lo) {
            self.set(row_id, checked);
            updates.push(RowUpdate {
                position: pos,
                id: row_id.clone(),
                checked,
            });
        }

        log::debug!(
            "[Selection] Range fill {}..={} -> {} ({} row(s))",
            lo,
            hi,
            checked,
            updates.len()
        );
        updates
    }

    fn set(&mut self, id: &TabId, checked: bool) {
        if checked {
            self.selected.insert(id.clone());
        } else {
            self.selected.remove(id);
        }
    }
}
