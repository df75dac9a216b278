// Tab Closer Library Entry Point
// This file exposes all modules so they can be imported by main.rs
// and tested independently.

pub mod error;
pub mod settings;

// Shared value types
pub mod state;

// Pure logic modules (no Tauri imports outside modules::popup)
pub mod modules;

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use modules::popup;
    use tauri::Manager;

    tauri::Builder::default()
        .setup(|app| {
            let settings = settings::Settings::load(app.handle());
            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(settings.log_level_filter())
                        .build(),
                )?;
            }
            app.manage(popup::PopupState::new(app.handle().clone(), &settings));
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            popup::popup_reload,
            popup::popup_click,
            popup::popup_close_selected,
            popup::popup_sort,
            popup::popup_clear_sort,
            popup::open_tab
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
