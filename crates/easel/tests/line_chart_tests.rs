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

use easel::{
    anomaly_color_condition, build_line_chart, FieldType, LineChartOptions, Tooltip, VegaLite,
};
use polars::prelude::*;
use serde_json::json;
use std::sync::Arc;

fn row_counts() -> DataFrame {
    df!(
        "batch_id" => ["b1", "b2", "b3"],
        "batch_date" => ["2024-01-01", "2024-01-02", "2024-01-03"],
        "table_row_count" => [100_i64, 120, 90],
        "min_value" => [80_i64, 80, 95],
        "max_value" => [110_i64, 110, 130],
    )
    .unwrap()
}

fn line_chart(options: LineChartOptions) -> easel::LayerChart {
    build_line_chart(
        row_counts(),
        "table_row_count",
        FieldType::Quantitative,
        "batch_date",
        FieldType::Temporal,
        options,
    )
    .unwrap()
}

#[test]
fn test_line_chart_has_line_then_points() {
    let chart = line_chart(LineChartOptions::default());
    let spec = chart.to_vega_lite().unwrap();

    assert_eq!(chart.len(), 2);
    assert_eq!(spec["layer"][0]["mark"]["type"], "line");
    assert_eq!(spec["layer"][0]["mark"]["color"], "#384B74");
    assert_eq!(spec["layer"][1]["mark"]["type"], "point");
    assert_eq!(spec["layer"][0]["title"], "Table Row Count by Batch Date");
    assert_eq!(spec["layer"][1]["title"], "Table Row Count by Batch Date");
}

#[test]
fn test_title_from_metric_and_axis_names() {
    let frame = df!(
        "batch_id" => ["b1"],
        "batch_date" => ["2024-01-01"],
        "row_count" => [3_i64],
    )
    .unwrap();
    let chart = build_line_chart(
        frame,
        "row_count",
        FieldType::Quantitative,
        "batch_date",
        FieldType::Temporal,
        LineChartOptions::default(),
    )
    .unwrap();
    let spec = chart.to_vega_lite().unwrap();

    assert_eq!(spec["layer"][0]["title"], "Row Count by Batch Date");
    assert_eq!(spec["layer"][0]["encoding"]["y"]["title"], "Row Count");
    assert_eq!(spec["layer"][0]["encoding"]["x"]["title"], "Batch Date");
}

#[test]
fn test_default_tooltip_has_batch_and_metric() {
    let spec = line_chart(LineChartOptions::default()).to_vega_lite().unwrap();

    let tooltip = &spec["layer"][1]["encoding"]["tooltip"];
    assert_eq!(
        tooltip,
        &json!([
            {"field": "batch_id", "type": "nominal"},
            {"field": "table_row_count", "type": "quantitative", "format": ","}
        ])
    );
}

#[test]
fn test_custom_tooltip_replaces_default() {
    let tooltip = vec![Tooltip::new("batch_date", FieldType::Temporal)];
    let spec = line_chart(LineChartOptions::default().with_tooltip(tooltip))
        .to_vega_lite()
        .unwrap();

    assert_eq!(
        spec["layer"][0]["encoding"]["tooltip"],
        json!([{"field": "batch_date", "type": "temporal"}])
    );
}

#[test]
fn test_fixed_point_colour_goes_on_mark() {
    let spec = line_chart(LineChartOptions::default().with_point_color("#123456"))
        .to_vega_lite()
        .unwrap();

    let points = &spec["layer"][1];
    assert_eq!(points["mark"]["fill"], "#123456");
    assert_eq!(points["mark"]["stroke"], "#123456");
    assert!(points["encoding"].get("fill").is_none());
    assert!(points["encoding"].get("stroke").is_none());
}

#[test]
fn test_colour_condition_goes_on_encoding() {
    let options = LineChartOptions::default().with_point_color_condition(anomaly_color_condition());
    let spec = line_chart(options).to_vega_lite().unwrap();

    let points = &spec["layer"][1];
    assert!(points["mark"].get("fill").is_none());
    assert_eq!(points["encoding"]["fill"]["condition"]["value"], "#FD5383");
    assert_eq!(points["encoding"]["fill"]["value"], "#00C2A4");
    assert_eq!(points["encoding"]["stroke"], points["encoding"]["fill"]);
}

#[test]
fn test_layers_share_one_dataset() {
    let spec = line_chart(LineChartOptions::default()).to_vega_lite().unwrap();

    let datasets = spec["datasets"].as_object().unwrap();
    assert_eq!(datasets.len(), 1);
    let (name, rows) = datasets.iter().next().unwrap();
    assert_eq!(spec["layer"][0]["data"]["name"], json!(name));
    assert_eq!(rows.as_array().unwrap().len(), 3);
    assert_eq!(rows[1]["table_row_count"], 120);
    assert_eq!(spec["$schema"], "https://vega.github.io/schema/vega-lite/v5.json");
}

#[test]
fn test_shared_frame_accepted_by_arc() {
    let frame = Arc::new(row_counts());
    let chart = build_line_chart(
        Arc::clone(&frame),
        "table_row_count",
        FieldType::Quantitative,
        "batch_id",
        FieldType::Nominal,
        LineChartOptions::default(),
    )
    .unwrap();

    assert!(chart.charts().iter().all(|c| Arc::ptr_eq(c.data(), &frame)));
}

#[test]
fn test_missing_metric_column_fails() {
    let err = build_line_chart(
        row_counts(),
        "no_such_metric",
        FieldType::Quantitative,
        "batch_date",
        FieldType::Temporal,
        LineChartOptions::default(),
    )
    .unwrap_err();

    assert!(err.is_column_not_found());
    assert_eq!(err.category(), "Data");
}

#[test]
fn test_missing_x_axis_column_fails() {
    let err = build_line_chart(
        row_counts(),
        "table_row_count",
        FieldType::Quantitative,
        "run_time",
        FieldType::Temporal,
        LineChartOptions::default(),
    )
    .unwrap_err();

    assert!(err.is_column_not_found());
}
