// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

use crate::error::{ConfigError, ConfigResult};
use crate::palette::Colors;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub static DEFAULT_DISPLAY_CONFIGURATION: Lazy<DisplayConfig> = Lazy::new(DisplayConfig::default);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplayConfig {
    pub view: ViewConfig,
    pub font: String,
    pub title: TitleConfig,
    pub axis: AxisConfig,
    pub legend: LegendConfig,
    pub point: PointConfig,
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewConfig {
    pub width: u32,
    pub height: u32,
    pub stroke_width: f64,
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TitleConfig {
    pub align: String,
    pub anchor: String,
    pub color: String,
    pub font_size: u32,
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AxisConfig {
    pub title_color: String,
    pub title_font_size: u32,
    pub title_padding: u32,
    pub label_color: String,
    pub label_font_size: u32,
    pub label_flush: bool,
    pub label_overlap: bool,
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegendConfig {
    pub title_color: String,
    pub title_font_size: u32,
    pub label_color: String,
    pub label_font_size: u32,
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PointConfig {
    pub size: u32,
}
impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            view: ViewConfig::default(),
            font: "Verdana".to_string(),
            title: TitleConfig::default(),
            axis: AxisConfig::default(),
            legend: LegendConfig::default(),
            point: PointConfig::default(),
        }
    }
}
impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 250,
            stroke_width: 0.0,
        }
    }
}
impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            align: "center".to_string(),
            anchor: "middle".to_string(),
            color: Colors::Purple.hex().to_string(),
            font_size: 15,
        }
    }
}
impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            title_color: Colors::Purple.hex().to_string(),
            title_font_size: 14,
            title_padding: 10,
            label_color: Colors::Blue1.hex().to_string(),
            label_font_size: 12,
            label_flush: true,
            label_overlap: true,
        }
    }
}
impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            title_color: Colors::Purple.hex().to_string(),
            title_font_size: 14,
            label_color: Colors::Blue1.hex().to_string(),
            label_font_size: 12,
        }
    }
}
impl Default for PointConfig {
    fn default() -> Self {
        Self { size: 50 }
    }
}
impl DisplayConfig {
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::ConfigFileError {
                path: path.as_ref().display().to_string(),
                source,
            })?;
        Self::from_yaml_str(&content)
    }
    pub fn from_yaml_str(yaml_content: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(yaml_content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_serialises_to_vega_lite_keys() {
        let value = serde_json::to_value(DisplayConfig::default()).unwrap();
        assert_eq!(value["view"]["width"], 800);
        assert_eq!(value["view"]["strokeWidth"], 0.0);
        assert_eq!(value["axis"]["titleFontSize"], 14);
        assert_eq!(value["axis"]["labelColor"], "#1B2A4D");
        assert_eq!(value["font"], "Verdana");
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let config = DisplayConfig::from_yaml_str("view:\n  width: 640\nfont: Helvetica\n").unwrap();
        assert_eq!(config.view.width, 640);
        assert_eq!(config.view.height, 250);
        assert_eq!(config.font, "Helvetica");
        assert_eq!(config.axis, AxisConfig::default());
    }

    #[test]
    fn test_invalid_yaml_is_parse_error() {
        let err = DisplayConfig::from_yaml_str("view: [1, 2").unwrap_err();
        assert!(matches!(err, ConfigError::YamlParseError { .. }));
    }
}
