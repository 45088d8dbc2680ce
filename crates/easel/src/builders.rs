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

use crate::chart::{Chart, LayerChart, MarkDef};
use crate::encoding::{
    ColorCondition, Encoding, FieldType, PositionDef, SecondaryPositionDef, Tooltip,
};
use crate::error::Result;
use crate::expr::{datum, Expr};
use crate::palette::{Colors, HEATMAP};
use polars::prelude::DataFrame;
use std::sync::Arc;

pub const BATCH_ID: &str = "batch_id";
pub const MIN_VALUE: &str = "min_value";
pub const MAX_VALUE: &str = "max_value";
pub const TABLE_ROW_COUNT: &str = "table_row_count";
const BATCH_ID_TYPE: FieldType = FieldType::Nominal;
const BOUND_TYPE: FieldType = FieldType::Quantitative;
const NUMBER_FORMAT: &str = ",";
const BAND_OPACITY: f64 = 0.9;
const POINT_OPACITY: f64 = 1.0;

#[derive(Debug, Clone)]
pub struct LineChartOptions {
    pub line_color: String,
    pub point_color: String,
    pub point_color_condition: Option<ColorCondition>,
    pub tooltip: Option<Vec<Tooltip>>,
}
impl Default for LineChartOptions {
    fn default() -> Self {
        Self {
            line_color: Colors::Blue2.hex().to_string(),
            point_color: Colors::Green.hex().to_string(),
            point_color_condition: None,
            tooltip: None,
        }
    }
}
impl LineChartOptions {
    pub fn with_line_color(mut self, color: impl Into<String>) -> Self {
        self.line_color = color.into();
        self
    }
    pub fn with_point_color(mut self, color: impl Into<String>) -> Self {
        self.point_color = color.into();
        self
    }
    pub fn with_point_color_condition(mut self, condition: ColorCondition) -> Self {
        self.point_color_condition = Some(condition);
        self
    }
    pub fn with_tooltip(mut self, tooltip: Vec<Tooltip>) -> Self {
        self.tooltip = Some(tooltip);
        self
    }
}

pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_word = false;
    for c in name.chars() {
        let c = if c == '_' { ' ' } else { c };
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

pub fn chart_title(metric: &str, x_axis_name: &str) -> String {
    format!("{} by {}", title_case(metric), title_case(x_axis_name))
}

pub fn default_tooltip(metric: &str, metric_type: FieldType) -> Vec<Tooltip> {
    vec![
        Tooltip::new(BATCH_ID, BATCH_ID_TYPE),
        Tooltip::new(metric, metric_type).with_format(NUMBER_FORMAT),
    ]
}

fn band_tooltip(metric: &str, metric_type: FieldType) -> Vec<Tooltip> {
    let mut tooltip = default_tooltip(metric, metric_type);
    tooltip.push(Tooltip::new(MIN_VALUE, BOUND_TYPE).with_format(NUMBER_FORMAT));
    tooltip.push(Tooltip::new(MAX_VALUE, BOUND_TYPE).with_format(NUMBER_FORMAT));
    tooltip
}

fn x_position(x_axis_name: &str, x_axis_type: FieldType) -> PositionDef {
    PositionDef::new(x_axis_name, x_axis_type).with_title(title_case(x_axis_name))
}

pub fn out_of_range_predicate() -> Expr {
    (datum(MIN_VALUE).gt(datum(TABLE_ROW_COUNT)) & datum(MAX_VALUE).gt(datum(TABLE_ROW_COUNT)))
        | (datum(MIN_VALUE).lt(datum(TABLE_ROW_COUNT))
            & datum(MAX_VALUE).lt(datum(TABLE_ROW_COUNT)))
}

pub fn anomaly_color_condition() -> ColorCondition {
    ColorCondition::new(
        out_of_range_predicate(),
        Colors::Pink.hex(),
        Colors::Green.hex(),
    )
}

pub fn flag_out_of_range(df: &DataFrame) -> Result<Vec<bool>> {
    let mask = out_of_range_predicate().evaluate(df)?;
    Ok((&mask).into_iter().map(|v| v.unwrap_or(false)).collect())
}

pub fn build_line_chart(
    df: impl Into<Arc<DataFrame>>,
    metric: &str,
    metric_type: FieldType,
    x_axis_name: &str,
    x_axis_type: FieldType,
    options: LineChartOptions,
) -> Result<LayerChart> {
    let df = df.into();
    let metric_title = title_case(metric);
    let title = chart_title(metric, x_axis_name);
    let tooltip = options
        .tooltip
        .unwrap_or_else(|| default_tooltip(metric, metric_type));
    let base = Encoding::default()
        .x(x_position(x_axis_name, x_axis_type))
        .y(PositionDef::new(metric, metric_type).with_title(metric_title))
        .tooltip(tooltip);

    let line = Chart::new(Arc::clone(&df), MarkDef::line().with_color(options.line_color))
        .with_title(title.clone())
        .encode(base.clone())?;

    let points = match options.point_color_condition {
        Some(condition) => Chart::new(df, MarkDef::point().with_opacity(POINT_OPACITY))
            .with_title(title)
            .encode(base.stroke(condition.clone()).fill(condition))?,
        None => Chart::new(
            df,
            MarkDef::point()
                .with_stroke(options.point_color.clone())
                .with_fill(options.point_color)
                .with_opacity(POINT_OPACITY),
        )
        .with_title(title)
        .encode(base)?,
    };

    tracing::debug!(metric, x_axis = x_axis_name, "built line chart");
    Ok(line + points)
}

pub fn build_band_chart(
    df: impl Into<Arc<DataFrame>>,
    metric: &str,
    metric_type: FieldType,
    x_axis_name: &str,
    x_axis_type: FieldType,
) -> Result<LayerChart> {
    let df = df.into();
    let line_color = HEATMAP[4];
    let fill_color = HEATMAP[5];
    let metric_title = title_case(metric);
    let tooltip = band_tooltip(metric, metric_type);

    let limit = |bound: &str| -> Result<Chart> {
        Chart::new(
            Arc::clone(&df),
            MarkDef::line()
                .with_color(line_color)
                .with_opacity(BAND_OPACITY),
        )
        .encode(
            Encoding::default()
                .x(x_position(x_axis_name, x_axis_type))
                .y(PositionDef::new(bound, metric_type).with_title(metric_title.clone()))
                .tooltip(tooltip.clone()),
        )
    };
    let lower_limit = limit(MIN_VALUE)?;
    let upper_limit = limit(MAX_VALUE)?;

    let band = Chart::new(
        Arc::clone(&df),
        MarkDef::area()
            .with_fill(fill_color)
            .with_fill_opacity(BAND_OPACITY),
    )
    .encode(
        Encoding::default()
            .x(x_position(x_axis_name, x_axis_type))
            .y(PositionDef::new(MIN_VALUE, metric_type).with_title(metric_title.clone()))
            .y2(SecondaryPositionDef::new(MAX_VALUE).with_title(metric_title.clone())),
    )?;

    let anomaly_coded_line = build_line_chart(
        Arc::clone(&df),
        metric,
        metric_type,
        x_axis_name,
        x_axis_type,
        LineChartOptions::default()
            .with_point_color_condition(anomaly_color_condition())
            .with_tooltip(tooltip.clone()),
    )?;

    tracing::debug!(metric, x_axis = x_axis_name, "built band chart");
    Ok(band + lower_limit + upper_limit + anomaly_coded_line)
}
