//! Configuration and path validation

use crate::models::Config;
use crate::types::{AppError, ImageFormat, Result};
use std::path::Path;

/// Validate the effective configuration
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    // Figure proportions outside this range produce unreadable paper
    // figures long before they break the renderer.
    let aspect = config.width as f64 / config.height as f64;
    if !(0.2..=8.0).contains(&aspect) {
        return Err(AppError::config(format!(
            "Figure aspect ratio {:.2} ({}x{}) is outside the sane range 0.2..8",
            aspect, config.width, config.height
        )));
    }

    Ok(())
}

/// Validate an output image path: supported extension, writable parent
pub fn validate_output_path(path: &Path) -> Result<()> {
    ImageFormat::from_path(path)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && parent.exists() && !parent.is_dir() {
            return Err(AppError::validation(format!(
                "Output parent '{}' exists but is not a directory",
                parent.display()
            )));
        }
    }

    Ok(())
}

/// Validate a fixed y-axis bound
pub fn validate_y_max(y_max: Option<f64>) -> Result<()> {
    if let Some(y) = y_max {
        if !y.is_finite() || y <= 0.0 {
            return Err(AppError::validation(format!(
                "--ymax must be a positive number (got {})",
                y
            )));
        }
    }
    Ok(())
}
