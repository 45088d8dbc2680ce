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

use crate::expr::Expr;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Nominal,
    Ordinal,
    Quantitative,
    Temporal,
}
impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Nominal => "nominal",
            FieldType::Ordinal => "ordinal",
            FieldType::Quantitative => "quantitative",
            FieldType::Temporal => "temporal",
        }
    }
}
impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown field type '{0}'")]
pub struct UnknownFieldType(pub String);
impl FromStr for FieldType {
    type Err = UnknownFieldType;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nominal" | "n" | "categorical" => Ok(FieldType::Nominal),
            "ordinal" | "o" => Ok(FieldType::Ordinal),
            "quantitative" | "q" | "numeric" => Ok(FieldType::Quantitative),
            "temporal" | "t" => Ok(FieldType::Temporal),
            _ => Err(UnknownFieldType(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionDef {
    pub field: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}
impl PositionDef {
    pub fn new(field: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            field: field.into(),
            field_type,
            title: None,
        }
    }
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecondaryPositionDef {
    pub field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}
impl SecondaryPositionDef {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            title: None,
        }
    }
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub field: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}
impl Tooltip {
    pub fn new(field: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            field: field.into(),
            field_type,
            format: None,
        }
    }
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColorCondition {
    pub test: Expr,
    pub if_true: String,
    pub if_false: String,
}
impl ColorCondition {
    pub fn new(test: Expr, if_true: impl Into<String>, if_false: impl Into<String>) -> Self {
        Self {
            test,
            if_true: if_true.into(),
            if_false: if_false.into(),
        }
    }
}
impl Serialize for ColorCondition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Branch<'a> {
            test: &'a Expr,
            value: &'a str,
        }
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(
            "condition",
            &Branch {
                test: &self.test,
                value: &self.if_true,
            },
        )?;
        map.serialize_entry("value", &self.if_false)?;
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Encoding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<PositionDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<PositionDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y2: Option<SecondaryPositionDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<ColorCondition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<ColorCondition>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tooltip: Vec<Tooltip>,
}
impl Encoding {
    pub fn x(mut self, x: PositionDef) -> Self {
        self.x = Some(x);
        self
    }
    pub fn y(mut self, y: PositionDef) -> Self {
        self.y = Some(y);
        self
    }
    pub fn y2(mut self, y2: SecondaryPositionDef) -> Self {
        self.y2 = Some(y2);
        self
    }
    pub fn stroke(mut self, condition: ColorCondition) -> Self {
        self.stroke = Some(condition);
        self
    }
    pub fn fill(mut self, condition: ColorCondition) -> Self {
        self.fill = Some(condition);
        self
    }
    pub fn tooltip(mut self, tooltip: Vec<Tooltip>) -> Self {
        self.tooltip = tooltip;
        self
    }

    pub fn fields(&self) -> Vec<&str> {
        let mut out = Vec::new();
        for position in [self.x.as_ref(), self.y.as_ref()].into_iter().flatten() {
            push_unique(&mut out, &position.field);
        }
        if let Some(y2) = &self.y2 {
            push_unique(&mut out, &y2.field);
        }
        for condition in [self.stroke.as_ref(), self.fill.as_ref()].into_iter().flatten() {
            for field in condition.test.fields() {
                push_unique(&mut out, field);
            }
        }
        for tooltip in &self.tooltip {
            push_unique(&mut out, &tooltip.field);
        }
        out
    }
}

fn push_unique<'a>(out: &mut Vec<&'a str>, field: &'a str) {
    if !out.contains(&field) {
        out.push(field);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::datum;
    use serde_json::json;

    #[test]
    fn test_field_type_parses_aliases() {
        assert_eq!("categorical".parse::<FieldType>(), Ok(FieldType::Nominal));
        assert_eq!("Q".parse::<FieldType>(), Ok(FieldType::Quantitative));
        assert_eq!("temporal".parse::<FieldType>(), Ok(FieldType::Temporal));
        assert!("bogus".parse::<FieldType>().is_err());
    }

    #[test]
    fn test_condition_serialises_as_vega_lite_condition() {
        let condition = ColorCondition::new(datum("a").gt(datum("b")), "#f00", "#0f0");
        assert_eq!(
            serde_json::to_value(&condition).unwrap(),
            json!({"condition": {"test": "(datum.a > datum.b)", "value": "#f00"}, "value": "#0f0"})
        );
    }

    #[test]
    fn test_fields_cover_every_channel_once() {
        let encoding = Encoding::default()
            .x(PositionDef::new("batch_date", FieldType::Temporal))
            .y(PositionDef::new("m", FieldType::Quantitative))
            .fill(ColorCondition::new(datum("m").gt(datum("limit")), "a", "b"))
            .tooltip(vec![
                Tooltip::new("batch_id", FieldType::Nominal),
                Tooltip::new("m", FieldType::Quantitative),
            ]);
        assert_eq!(encoding.fields(), vec!["batch_date", "m", "limit", "batch_id"]);
    }
}
