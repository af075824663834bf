//! Environment layer: `.env` loading and `DBP_*` variable tracking

use crate::models::Config;
use crate::types::Result;
use std::path::PathBuf;

/// Names of environment variables the configuration understands
pub const KNOWN_VARS: &[&str] = &[
    "DBP_OUT_DIR",
    "DBP_UNIT",
    "DBP_WIDTH",
    "DBP_HEIGHT",
    "DBP_BUCKET_WIDTH_MS",
    "DBP_HISTOGRAM_BINS",
    "DBP_COLOR",
];

/// Loads `.env` files and applies `DBP_*` overrides
#[derive(Debug, Default)]
pub struct EnvManager {
    /// Path of the `.env` file that was loaded, if any
    loaded_path: Option<PathBuf>,
}

impl EnvManager {
    /// Create a new environment manager, loading `.env` if present.
    ///
    /// A missing `.env` file is not an error; a malformed one is.
    pub fn load() -> Result<Self> {
        if !std::path::Path::new(".env").exists() {
            return Ok(Self::default());
        }

        let path = dotenv::from_filename(".env")?;
        Ok(Self {
            loaded_path: Some(path),
        })
    }

    /// Path of the loaded `.env` file, if one was found
    pub fn loaded_path(&self) -> Option<&PathBuf> {
        self.loaded_path.as_ref()
    }

    /// Apply `DBP_*` environment variables to the configuration
    pub fn apply(&self, config: &mut Config) -> Result<()> {
        config.merge_from_env()
    }

    /// Which known variables are currently set (for debug output)
    pub fn active_vars(&self) -> Vec<String> {
        KNOWN_VARS
            .iter()
            .filter(|name| std::env::var(name).is_ok())
            .map(|name| name.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_vars_reports_set_variables() {
        let _env = crate::test_support::env_lock();
        std::env::set_var("DBP_HISTOGRAM_BINS", "7");
        let manager = EnvManager::default();
        let active = manager.active_vars();
        std::env::remove_var("DBP_HISTOGRAM_BINS");

        assert!(active.contains(&"DBP_HISTOGRAM_BINS".to_string()));
    }

    #[test]
    fn test_apply_reads_environment() {
        let _env = crate::test_support::env_lock();
        std::env::set_var("DBP_OUT_DIR", "figures");
        let manager = EnvManager::default();
        let mut config = Config::default();
        manager.apply(&mut config).unwrap();
        std::env::remove_var("DBP_OUT_DIR");

        assert_eq!(config.out_dir, PathBuf::from("figures"));
    }
}
