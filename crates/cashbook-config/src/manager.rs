use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{Settings, SettingsError};

/// Environment variable overriding the application home directory.
pub const HOME_ENV: &str = "CASHBOOK_HOME";
const HOME_DIR_NAME: &str = ".cashbook";
const SETTINGS_FILE_NAME: &str = "settings.json";
const TMP_SUFFIX: &str = "tmp";

/// `$CASHBOOK_HOME` when set and non-empty, else `~/.cashbook`.
pub fn app_home() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV).filter(|value| !value.is_empty()) {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(HOME_DIR_NAME)
}

/// Handles persistence for [`Settings`].
#[derive(Debug, Clone)]
pub struct SettingsManager {
    home: PathBuf,
    settings_path: PathBuf,
}

impl SettingsManager {
    pub fn new(home: PathBuf, settings_path: PathBuf) -> Self {
        Self {
            home,
            settings_path,
        }
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, SettingsError> {
        fs::create_dir_all(&base)?;
        let settings_path = base.join(SETTINGS_FILE_NAME);
        Ok(Self::new(base, settings_path))
    }

    pub fn from_env() -> Result<Self, SettingsError> {
        Self::with_base_dir(app_home())
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    pub fn load(&self) -> Result<Settings, SettingsError> {
        if self.settings_path.exists() {
            let data = fs::read_to_string(&self.settings_path)?;
            serde_json::from_str(&data).map_err(|err| SettingsError::Serde(err.to_string()))
        } else {
            Ok(Settings::default())
        }
    }

    pub fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        if let Some(parent) = self.settings_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(settings)
            .map_err(|err| SettingsError::Serde(err.to_string()))?;
        let tmp = tmp_path(&self.settings_path);
        write_synced(&tmp, &json)?;
        fs::rename(&tmp, &self.settings_path)?;
        Ok(())
    }

    pub fn workbook_path(&self, settings: &Settings) -> PathBuf {
        settings.resolve_workbook_path(&self.home)
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_synced(path: &Path, data: &str) -> Result<(), SettingsError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    file.sync_all()?;
    Ok(())
}
