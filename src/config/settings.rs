use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::bail;
use egui::{Color32, Stroke};
use serde::{Deserialize, Serialize};

const APP_DIR: &str = "DAG-Viewer";

/// Drawing and interaction constants, fixed when the viewer is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub node_diameter: f32,
    // If None, twice the node diameter
    pub x_spacing: Option<f32>,
    pub y_spacing: Option<f32>,
    pub zoom_step: f32,
    // Chevron stroke length and half-angle (degrees)
    pub arrow_length: f32,
    pub arrow_angle_deg: f32,
    pub node_fill: [u8; 3],
    pub outline_color: [u8; 3],
    pub outline_width: f32,
    pub edge_color: [u8; 3],
    pub edge_width: f32,
    pub text_color: [u8; 3],
    pub text_size: f32,
    pub background: [u8; 3],
    pub max_property_rows: usize,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            node_diameter: 50.0,
            x_spacing: None,
            y_spacing: None,
            zoom_step: 1.15,
            arrow_length: 6.0,
            arrow_angle_deg: 30.0,
            node_fill: [0, 255, 0],
            outline_color: [0, 0, 0],
            outline_width: 2.0,
            edge_color: [0, 0, 0],
            edge_width: 1.0,
            text_color: [0, 0, 0],
            text_size: 13.0,
            background: [240, 240, 240],
            max_property_rows: 30,
        }
    }
}

fn rgb(c: [u8; 3]) -> Color32 {
    Color32::from_rgb(c[0], c[1], c[2])
}

impl ViewerConfig {
    pub fn x_spacing(&self) -> f32 { self.x_spacing.unwrap_or(2.0 * self.node_diameter) }
    pub fn y_spacing(&self) -> f32 { self.y_spacing.unwrap_or(2.0 * self.node_diameter) }

    pub fn node_fill(&self) -> Color32 { rgb(self.node_fill) }
    pub fn outline_stroke(&self) -> Stroke { Stroke::new(self.outline_width, rgb(self.outline_color)) }
    pub fn edge_stroke(&self) -> Stroke { Stroke::new(self.edge_width, rgb(self.edge_color)) }
    pub fn text_color(&self) -> Color32 { rgb(self.text_color) }
    pub fn background(&self) -> Color32 { rgb(self.background) }

    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn validate(&self) -> anyhow::Result<()> {
        if !(self.node_diameter > 0.0) {
            bail!("node_diameter must be positive (got {})", self.node_diameter);
        }
        if !(self.x_spacing() > 0.0 && self.y_spacing() > 0.0) {
            bail!("spacing must be positive (got {} x {})", self.x_spacing(), self.y_spacing());
        }
        if !(self.zoom_step > 1.0) {
            bail!("zoom_step must be greater than 1 (got {})", self.zoom_step);
        }
        if !(self.arrow_length >= 0.0) {
            bail!("arrow_length must not be negative (got {})", self.arrow_length);
        }
        Ok(())
    }

    fn config_dir() -> PathBuf {
        Self::config_dir_in(dirs::config_dir())
    }

    // Falls back to the working directory when the platform has no config dir
    fn config_dir_in(base: Option<PathBuf>) -> PathBuf {
        base.unwrap_or_default().join(APP_DIR)
    }

    /// Return the directory where the settings file (viewer.json) is stored.
    pub fn settings_dir() -> PathBuf {
        Self::config_dir()
    }

    pub fn load() -> anyhow::Result<Self> {
        let json_path = Self::config_dir().join("viewer.json");
        if json_path.exists() {
            return Self::load_from_path(&json_path);
        }
        // Migrate from legacy RON if present
        let ron_path = Self::config_dir().join("viewer.ron");
        if ron_path.exists() {
            let v = Self::load_from_path(&ron_path)?;
            // Save immediately to JSON for future reads
            if let Err(e) = v.save() {
                log::warn!("could not migrate {} to JSON: {}", ron_path.display(), e);
            }
            return Ok(v);
        }
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        let mut f = fs::File::open(path)?;
        let mut s = String::new();
        f.read_to_string(&mut s)?;
        let v: Self = match path.extension().and_then(|e| e.to_str()) {
            Some("ron") => ron::from_str(&s)?,
            _ => serde_json::from_str(&s)?,
        };
        v.validate()?;
        Ok(v)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;
        self.save_to_path(&dir.join("viewer.json"))
    }

    pub fn save_to_path(&self, path: &Path) -> anyhow::Result<()> {
        let s = serde_json::to_string_pretty(self)?;
        let mut f = fs::File::create(path)?;
        f.write_all(s.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_defaults_to_twice_the_diameter() {
        let cfg = ViewerConfig { node_diameter: 30.0, ..Default::default() };
        assert_eq!(cfg.x_spacing(), 60.0);
        assert_eq!(cfg.y_spacing(), 60.0);
        let cfg = ViewerConfig { x_spacing: Some(45.0), ..cfg };
        assert_eq!(cfg.x_spacing(), 45.0);
    }

    #[test]
    fn validate_rejects_bad_values() {
        assert!(ViewerConfig::default().validate().is_ok());
        assert!(ViewerConfig { zoom_step: 1.0, ..Default::default() }.validate().is_err());
        assert!(ViewerConfig { node_diameter: 0.0, ..Default::default() }.validate().is_err());
        assert!(ViewerConfig { y_spacing: Some(-1.0), ..Default::default() }.validate().is_err());
        assert!(ViewerConfig { node_diameter: f32::NAN, ..Default::default() }.validate().is_err());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: ViewerConfig = serde_json::from_str(r#"{ "node_diameter": 20.0 }"#).unwrap();
        assert_eq!(cfg.node_diameter, 20.0);
        assert_eq!(cfg.zoom_step, 1.15);
        assert_eq!(cfg.x_spacing(), 40.0);
        assert_eq!(cfg.arrow_length, 6.0);
    }

    #[test]
    fn settings_live_under_the_app_folder() {
        let base = PathBuf::from("/home/user/.config");
        assert_eq!(ViewerConfig::config_dir_in(Some(base.clone())), base.join("DAG-Viewer"));
        assert_eq!(ViewerConfig::config_dir_in(None), PathBuf::from("DAG-Viewer"));
    }
}
