use crate::error::TabListError;
use crate::state::{Row, RowUpdate};

/// Draws the tab list. Owns no selection logic; the controller tells it what
/// to show.
pub trait ListRenderer {
    /// Replaces every row.
    fn render(&mut self, rows: &[Row]);

    /// Updates the checked state of already rendered rows.
    fn reflect(&mut self, updates: &[RowUpdate]);

    /// Surfaces a failed fetch or close to the user.
    fn show_error(&mut self, error: &TabListError);
}
