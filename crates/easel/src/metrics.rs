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

use crate::error::{EaselError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

pub const FULLY_QUALIFIED_PARAMETER_NAME_VALUE_KEY: &str = "value";
pub const FULLY_QUALIFIED_PARAMETER_NAME_ATTRIBUTED_VALUE_KEY: &str = "attributed_value";
pub const FULLY_QUALIFIED_PARAMETER_NAME_METADATA_KEY: &str = "details";
const METRIC_CONFIGURATION_KEY: &str = "metric_configuration";
const METRIC_NAME_KEY: &str = "metric_name";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Domain(String);
impl Domain {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
impl From<&str> for Domain {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}
impl From<String> for Domain {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterNode(Map<String, Value>);
impl ParameterNode {
    pub fn new(metric_name: &str, value: Value, attributed_value: Value) -> Self {
        let mut metric_configuration = Map::new();
        metric_configuration.insert(
            METRIC_NAME_KEY.to_string(),
            Value::String(metric_name.to_string()),
        );
        let mut details = Map::new();
        details.insert(
            METRIC_CONFIGURATION_KEY.to_string(),
            Value::Object(metric_configuration),
        );
        let mut node = Map::new();
        node.insert(FULLY_QUALIFIED_PARAMETER_NAME_VALUE_KEY.to_string(), value);
        node.insert(
            FULLY_QUALIFIED_PARAMETER_NAME_ATTRIBUTED_VALUE_KEY.to_string(),
            attributed_value,
        );
        node.insert(
            FULLY_QUALIFIED_PARAMETER_NAME_METADATA_KEY.to_string(),
            Value::Object(details),
        );
        Self(node)
    }
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
    pub fn value(&self) -> Option<&Value> {
        self.get(FULLY_QUALIFIED_PARAMETER_NAME_VALUE_KEY)
    }
    pub fn details(&self) -> Option<&Value> {
        self.get(FULLY_QUALIFIED_PARAMETER_NAME_METADATA_KEY)
    }
    pub fn attributed_value(&self) -> Option<&Value> {
        self.get(FULLY_QUALIFIED_PARAMETER_NAME_ATTRIBUTED_VALUE_KEY)
    }
    pub fn metric_name(&self) -> Option<&str> {
        self.details()?
            .get(METRIC_CONFIGURATION_KEY)?
            .get(METRIC_NAME_KEY)?
            .as_str()
    }
}

pub type ParametersByName = IndexMap<String, ParameterNode>;
pub type MetricsByDomain = IndexMap<Domain, ParametersByName>;
pub type AttributedMetrics = IndexMap<String, Value>;
pub type AttributedMetricsByDomain = IndexMap<Domain, AttributedMetrics>;

pub fn get_attributed_metrics_by_domain(
    metrics_by_domain: &MetricsByDomain,
) -> Result<AttributedMetricsByDomain> {
    metrics_by_domain
        .iter()
        .map(|(domain, parameters)| {
            attributed_metrics(domain, parameters).map(|metrics| (domain.clone(), metrics))
        })
        .collect()
}

fn attributed_metrics(domain: &Domain, parameters: &ParametersByName) -> Result<AttributedMetrics> {
    let mut metrics = AttributedMetrics::with_capacity(parameters.len());
    for (fully_qualified_parameter_name, parameter_node) in parameters {
        let metric_name = metric_name_of(fully_qualified_parameter_name, parameter_node)?;
        let attributed_value = parameter_node.attributed_value().ok_or_else(|| {
            EaselError::missing_field(
                fully_qualified_parameter_name,
                FULLY_QUALIFIED_PARAMETER_NAME_ATTRIBUTED_VALUE_KEY,
            )
        })?;
        if metrics
            .insert(metric_name.to_string(), attributed_value.clone())
            .is_some()
        {
            tracing::warn!(
                domain = %domain,
                metric = metric_name,
                parameter = %fully_qualified_parameter_name,
                "metric name collision; keeping the later parameter value"
            );
        }
    }
    Ok(metrics)
}

fn metric_name_of<'a>(parameter: &str, node: &'a ParameterNode) -> Result<&'a str> {
    let details = node.details().ok_or_else(|| {
        EaselError::missing_field(parameter, FULLY_QUALIFIED_PARAMETER_NAME_METADATA_KEY)
    })?;
    let metric_configuration = details
        .get(METRIC_CONFIGURATION_KEY)
        .ok_or_else(|| EaselError::missing_field(parameter, METRIC_CONFIGURATION_KEY))?;
    metric_configuration
        .get(METRIC_NAME_KEY)
        .and_then(Value::as_str)
        .ok_or_else(|| EaselError::missing_field(parameter, METRIC_NAME_KEY))
}
