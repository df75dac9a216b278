// Module exports for pure logic
pub mod sort;                // Sort policy
pub mod selection;           // Id-keyed selection + shift-click anchor
pub mod provider;            // Host tab source
pub mod renderer;            // Row drawing seam
pub mod controller;          // Popup session wiring

// Tauri glue (commands, window-backed provider, event renderer)
#[cfg(feature = "desktop")]
pub mod popup;
