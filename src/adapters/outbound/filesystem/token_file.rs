use crate::ports::outbound::TokenStore;
use crate::shared::security::validate_regular_file;
use crate::shared::{FileError, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const TOKEN_DIR: &str = ".fleet-inventory";
const TOKEN_FILE: &str = "auth_token";

/// FileTokenStore keeps the bearer token in a single file
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `~/.fleet-inventory/auth_token`, or relative to the working
    /// directory when HOME is unset
    pub fn default_path() -> PathBuf {
        let base = std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_default();
        base.join(TOKEN_DIR).join(TOKEN_FILE)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        validate_regular_file(&self.path, "token file")?;

        let content = fs::read_to_string(&self.path).map_err(|e| FileError::Read {
            path: self.path.clone(),
            details: e.to_string(),
        })?;
        let token = content.trim();
        Ok((!token.is_empty()).then(|| token.to_string()))
    }

    fn save(&self, token: &str) -> Result<()> {
        let write_error = |e: io::Error| FileError::Write {
            path: self.path.clone(),
            details: e.to_string(),
        };

        if let Some(parent) = self.path.parent() {
            if parent != Path::new("") {
                fs::create_dir_all(parent).map_err(write_error)?;
            }
        }
        fs::write(&self.path, token).map_err(write_error)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))
                .map_err(write_error)?;
        }
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(FileError::Write {
                path: self.path.clone(),
                details: e.to_string(),
            }
            .into()),
        }
    }
}
