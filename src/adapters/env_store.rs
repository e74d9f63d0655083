use crate::domain::ports::CredentialStore;
use crate::utils::error::{Result, SyncError};
use std::fs;
use std::path::PathBuf;

/// `.env` 檔案作為憑證儲存。每行一個 `KEY=VALUE`，其他行原樣保留。
#[derive(Debug, Clone)]
pub struct EnvFileStore {
    path: PathBuf,
}

impl EnvFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CredentialStore for EnvFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let prefix = format!("{}=", key);
        let content = fs::read_to_string(&self.path)?;
        Ok(content
            .lines()
            .find_map(|line| line.strip_prefix(&prefix))
            .map(str::to_string))
    }

    fn upsert(&self, key: &str, value: &str) -> Result<()> {
        if key.is_empty() || key.contains('=') || value.contains('\n') {
            return Err(SyncError::StoreError {
                message: format!("refusing to write malformed entry for key '{}'", key),
            });
        }

        if !self.path.exists() {
            tracing::warn!(
                "⚠️ {} not found, {} was not persisted",
                self.path.display(),
                key
            );
            return Ok(());
        }

        let prefix = format!("{}=", key);
        let entry = format!("{}{}", prefix, value);
        let content = fs::read_to_string(&self.path)?;

        let mut found = false;
        let mut output = String::with_capacity(content.len() + entry.len() + 1);
        for line in content.split_inclusive('\n') {
            if line.starts_with(&prefix) {
                output.push_str(&entry);
                output.push('\n');
                found = true;
            } else {
                output.push_str(line);
            }
        }

        if !found {
            if !output.is_empty() && !output.ends_with('\n') {
                output.push('\n');
            }
            output.push_str(&entry);
            output.push('\n');
        }

        fs::write(&self.path, output)?;
        tracing::debug!("Persisted {} to {}", key, self.path.display());
        Ok(())
    }
}
