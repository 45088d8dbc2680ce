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

use thiserror::Error;
#[derive(Error, Debug)]
pub enum EaselError {
    #[error("Parameter '{parameter}' is missing field '{field}'")]
    MissingField { parameter: String, field: String },
    #[error("Data frame error: {0}")]
    Polars(#[from] polars::error::PolarsError),
    #[error("Display error: {0}")]
    Display(#[from] DisplayError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("JSON serialisation failed: {0}")]
    Serialisation(#[from] serde_json::Error),
}
#[derive(Error, Debug)]
pub enum DisplayError {
    #[error("No notebook display surface is available: {reason}")]
    SurfaceUnavailable { reason: String },
    #[error("Failed to write chart output '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("I/O error while rendering: {0}")]
    Io(#[from] std::io::Error),
}
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file '{path}': {source}")]
    ConfigFileError {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse YAML configuration: {source}")]
    YamlParseError {
        #[from]
        source: serde_yaml::Error,
    },
}
pub type Result<T> = std::result::Result<T, EaselError>;
pub type DisplayResult<T> = std::result::Result<T, DisplayError>;
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
impl EaselError {
    pub fn missing_field(parameter: &str, field: &str) -> Self {
        EaselError::MissingField {
            parameter: parameter.to_string(),
            field: field.to_string(),
        }
    }
    pub fn is_column_not_found(&self) -> bool {
        matches!(
            self,
            EaselError::Polars(polars::error::PolarsError::ColumnNotFound(_))
        )
    }
    pub fn category(&self) -> &'static str {
        match self {
            EaselError::MissingField { .. } => "Metrics",
            EaselError::Polars(_) => "Data",
            EaselError::Display(_) => "Display",
            EaselError::Config(_) => "Configuration",
            EaselError::Serialisation(_) => "Serialisation",
        }
    }
}
