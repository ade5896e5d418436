use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use directories_next::ProjectDirs;
use tracing::debug;

pub const ENV_DATA_DIR: &str = "BACKDROP_DATA_DIR";

const QUALIFIER: &str = "io";
const ORGANISATION: &str = "Backdrop";
const APPLICATION: &str = "backdrop";

#[derive(Debug, Clone)]
pub struct AppPaths {
    data_dir: PathBuf,
}

impl AppPaths {
    pub fn discover() -> Result<Self> {
        if let Some(dir) = env::var_os(ENV_DATA_DIR) {
            let data_dir = PathBuf::from(dir);
            debug!(dir = %data_dir.display(), "using data dir from environment");
            return Ok(Self { data_dir });
        }

        let project_dirs = ProjectDirs::from(QUALIFIER, ORGANISATION, APPLICATION)
            .ok_or_else(|| anyhow!("failed to determine user directories"))?;
        Ok(Self {
            data_dir: project_dirs.data_dir().to_path_buf(),
        })
    }

    pub fn shaders_dir(&self) -> PathBuf {
        self.data_dir.join("shaders")
    }
}
