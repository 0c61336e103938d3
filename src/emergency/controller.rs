use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::Result;
use chrono::Utc;
use log::error;
use serde::Serialize;
use tauri::{AppHandle, Emitter};
use tokio::{sync::Mutex, task::JoinHandle, time};
use tokio_util::sync::CancellationToken;

use crate::{
    analysis::{analyze, AnalysisConfig, PatternReport},
    db::{Database, PressEvent},
    emergency::{
        prompts::{recommendation_for, RecommendationSet},
        state::{EmergencyState, EmergencyStatus},
    },
    settings::SettingsStore,
};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::log_info;

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EmergencySnapshot {
    pub state: EmergencyState,
    pub remaining_ms: u64,
    pub recommendation: Option<RecommendationSet>,
}

struct DismissTask {
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
}

#[derive(Clone)]
pub struct EmergencyController {
    state: Arc<Mutex<EmergencyState>>,
    db: Database,
    app_handle: AppHandle,
    dismiss_task: Arc<Mutex<DismissTask>>,
    settings: Arc<SettingsStore>,
    config: AnalysisConfig,
    user_id: String,
    session_id: String,
}

impl EmergencyController {
    pub fn new(
        app_handle: AppHandle,
        db: Database,
        settings: Arc<SettingsStore>,
        session_id: String,
    ) -> Self {
        let user_id = settings.user_id();
        Self {
            state: Arc::new(Mutex::new(EmergencyState::new())),
            db,
            app_handle,
            dismiss_task: Arc::new(Mutex::new(DismissTask {
                handle: None,
                cancel_token: None,
            })),
            settings,
            config: AnalysisConfig::default(),
            user_id,
            session_id,
        }
    }

    pub async fn get_snapshot(&self) -> EmergencySnapshot {
        let state = self.state.lock().await.clone();
        snapshot_from_state(state)
    }

    /// Record one button press, reclassify the full history, and show the
    /// emergency screen. Storage failures are logged and swallowed: a write
    /// failure drops the event, a read failure classifies an empty history.
    /// The screen activates regardless.
    pub async fn press(&self) -> Result<EmergencySnapshot> {
        let pressed_at = Utc::now();

        let gap_ms = match self.db.latest_press().await {
            Ok(previous) => gap_from_previous(pressed_at, previous.as_ref()),
            Err(err) => {
                error!("Failed to load latest press, treating press as first: {err:?}");
                None
            }
        };

        let event = PressEvent::new(pressed_at, &self.user_id, &self.session_id, gap_ms);
        if let Err(err) = self.db.insert_press(&event).await {
            error!("Failed to persist press {}, dropping it: {err:?}", event.id);
        }

        let report = self.pattern_report().await;
        let classification = report.classification;
        log_info!(
            "press recorded: total={}, classification={}",
            report.total_presses,
            classification.as_str()
        );

        let dismiss_after_ms = self.settings.dismiss().seconds.saturating_mul(1000);

        {
            let mut state = self.state.lock().await;
            state.activate(classification, pressed_at, dismiss_after_ms, Instant::now());
        }

        self.restart_dismiss_task(dismiss_after_ms).await;
        self.emit_state_changed().await;

        Ok(self.get_snapshot().await)
    }

    /// Manual dismissal from the UI; cancels the pending auto-dismiss.
    pub async fn dismiss(&self) -> Result<()> {
        self.cancel_dismiss_task().await;

        {
            let mut state = self.state.lock().await;
            state.dismiss();
        }

        self.emit_state_changed().await;
        Ok(())
    }

    /// Full ordered history; a read failure is logged and yields an empty
    /// sequence so the UI always renders.
    pub async fn history(&self) -> Vec<PressEvent> {
        match self.db.list_presses().await {
            Ok(history) => history,
            Err(err) => {
                error!("Failed to load press history, treating as empty: {err:?}");
                Vec::new()
            }
        }
    }

    /// Recomputed from scratch on demand; the report owns no state.
    pub async fn pattern_report(&self) -> PatternReport {
        let history = self.history().await;
        analyze(&history, &self.config)
    }

    /// Cancel any pending auto-dismiss and schedule a fresh one. Re-triggering
    /// emergency mode therefore never leaves an old countdown running.
    async fn restart_dismiss_task(&self, dismiss_after_ms: u64) {
        let mut task = self.dismiss_task.lock().await;
        if let Some(token) = task.cancel_token.take() {
            token.cancel();
        }
        if let Some(handle) = task.handle.take() {
            handle.abort();
        }

        let cancel_token = CancellationToken::new();
        let token_clone = cancel_token.clone();
        let state = self.state.clone();
        let app_handle = self.app_handle.clone();

        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = time::sleep(Duration::from_millis(dismiss_after_ms)) => {
                    let snapshot = {
                        let mut guard = state.lock().await;
                        guard.dismiss();
                        guard.clone()
                    };
                    log_info!("emergency mode auto-dismissed after {dismiss_after_ms}ms");
                    emit_emergency_state(&app_handle, snapshot);
                }
                _ = token_clone.cancelled() => {
                    log_info!("auto-dismiss cancelled before firing");
                }
            }
        });

        task.handle = Some(handle);
        task.cancel_token = Some(cancel_token);
    }

    async fn cancel_dismiss_task(&self) {
        let mut task = self.dismiss_task.lock().await;
        if let Some(token) = task.cancel_token.take() {
            token.cancel();
        }
        if let Some(handle) = task.handle.take() {
            handle.abort();
        }
    }

    async fn emit_state_changed(&self) {
        let state = self.state.lock().await.clone();
        emit_emergency_state(&self.app_handle, state);
    }
}

/// Gap to the immediately preceding press in history; `None` iff there is
/// no prior press. Clock skew can make the delta negative, clamp to zero.
fn gap_from_previous(
    pressed_at: chrono::DateTime<Utc>,
    previous: Option<&PressEvent>,
) -> Option<u64> {
    previous.map(|press| {
        (pressed_at - press.pressed_at)
            .num_milliseconds()
            .max(0) as u64
    })
}

fn snapshot_from_state(state: EmergencyState) -> EmergencySnapshot {
    let remaining_ms = state.remaining_ms();
    let recommendation = (state.status == EmergencyStatus::Active)
        .then(|| recommendation_for(state.classification));

    EmergencySnapshot {
        remaining_ms,
        recommendation,
        state,
    }
}

fn emit_emergency_state(app_handle: &AppHandle, state: EmergencyState) {
    let payload = snapshot_from_state(state);
    let _ = app_handle.emit("emergency-state-changed", payload);
}
