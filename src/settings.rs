use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DismissSettings {
    /// How long the emergency screen stays up before auto-dismissing.
    pub seconds: u64,
}

impl Default for DismissSettings {
    fn default() -> Self {
        Self { seconds: 10 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserSettings {
    dismiss: DismissSettings,
    /// Static placeholder until accounts exist.
    user_id: String,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            dismiss: DismissSettings::default(),
            user_id: "local-user".into(),
        }
    }
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_default()
        } else {
            UserSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn dismiss(&self) -> DismissSettings {
        self.data.read().unwrap().dismiss.clone()
    }

    pub fn user_id(&self) -> String {
        self.data.read().unwrap().user_id.clone()
    }

    pub fn update_dismiss(&self, settings: DismissSettings) -> Result<()> {
        if settings.seconds == 0 {
            bail!("dismiss duration must be at least one second");
        }

        {
            let mut guard = self.data.write().unwrap();
            guard.dismiss = settings;
            self.persist(&guard)?;
        }
        Ok(())
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}
