use tauri::State;

use crate::{
    analysis::{
        insights::{weekday_insight, PatternInsight},
        PatternReport,
    },
    db::PressEvent,
    emergency::{EmergencyController, EmergencySnapshot},
};

use crate::AppState;

fn controller_from_state(state: &State<'_, AppState>) -> EmergencyController {
    state.emergency.clone()
}

#[tauri::command]
pub async fn press_emergency_button(
    state: State<'_, AppState>,
) -> Result<EmergencySnapshot, String> {
    let controller = controller_from_state(&state);
    controller.press().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn dismiss_emergency(state: State<'_, AppState>) -> Result<(), String> {
    let controller = controller_from_state(&state);
    controller.dismiss().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn get_emergency_state(
    state: State<'_, AppState>,
) -> Result<EmergencySnapshot, String> {
    let controller = controller_from_state(&state);
    Ok(controller.get_snapshot().await)
}

#[tauri::command]
pub async fn get_press_history(state: State<'_, AppState>) -> Result<Vec<PressEvent>, String> {
    let controller = controller_from_state(&state);
    Ok(controller.history().await)
}

#[tauri::command]
pub async fn get_pattern_report(state: State<'_, AppState>) -> Result<PatternReport, String> {
    let controller = controller_from_state(&state);
    Ok(controller.pattern_report().await)
}

#[tauri::command]
pub async fn get_pattern_insight(state: State<'_, AppState>) -> Result<PatternInsight, String> {
    let controller = controller_from_state(&state);
    Ok(weekday_insight(&controller.pattern_report().await))
}
