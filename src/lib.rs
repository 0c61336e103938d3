mod analysis;
mod correlation;
mod db;
mod emergency;
mod settings;
mod utils;

use std::sync::Arc;

use correlation::{design_activity_for, DesignActivity};
use db::Database;
use emergency::commands::{
    dismiss_emergency, get_emergency_state, get_pattern_insight, get_pattern_report,
    get_press_history, press_emergency_button,
};
use emergency::EmergencyController;
use settings::{DismissSettings, SettingsStore};
use tauri::{Emitter, Manager, State};
use uuid::Uuid;

pub(crate) struct AppState {
    pub(crate) emergency: EmergencyController,
    pub(crate) settings: Arc<SettingsStore>,
}

#[tauri::command]
fn get_dismiss_settings(state: State<AppState>) -> Result<DismissSettings, String> {
    Ok(state.settings.dismiss())
}

#[tauri::command]
fn set_dismiss_settings(
    settings: DismissSettings,
    state: State<AppState>,
    app_handle: tauri::AppHandle,
) -> Result<(), String> {
    state
        .settings
        .update_dismiss(settings.clone())
        .map_err(|e| e.to_string())?;

    app_handle
        .emit("dismiss-settings-updated", &settings)
        .map_err(|e| e.to_string())?;

    Ok(())
}

#[tauri::command]
fn get_design_activity(date: String) -> Result<DesignActivity, String> {
    let date = chrono::NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|e| e.to_string())?;
    Ok(design_activity_for(date))
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Refocus starting up...");

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            let result = (|| -> anyhow::Result<()> {
                let app_data_dir = app
                    .path()
                    .app_data_dir()
                    .map_err(|err| anyhow::anyhow!(err))?;
                std::fs::create_dir_all(&app_data_dir)?;

                let db_path = app_data_dir.join("refocus.sqlite3");
                let database = Database::new(db_path)?;

                let settings_path = app_data_dir.join("settings.json");
                let settings = Arc::new(SettingsStore::new(settings_path)?);

                // One session id per app launch; every press in this run
                // shares it.
                let session_id = Uuid::new_v4().to_string();

                let emergency = EmergencyController::new(
                    app.handle().clone(),
                    database,
                    settings.clone(),
                    session_id,
                );

                app.manage(AppState {
                    emergency,
                    settings,
                });

                Ok(())
            })();

            result.map_err(|err| err.into())
        })
        .invoke_handler(tauri::generate_handler![
            press_emergency_button,
            dismiss_emergency,
            get_emergency_state,
            get_press_history,
            get_pattern_report,
            get_pattern_insight,
            get_design_activity,
            get_dismiss_settings,
            set_dismiss_settings,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
