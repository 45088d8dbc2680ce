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

use easel::error::DisplayResult;
use easel::{
    build_line_chart, display, display_with, DisplayConfig, DisplayError, DisplaySurface,
    EaselError, FieldType, HtmlSurface, LayerChart, LineChartOptions, NotebookSurface, VegaLite,
    DEFAULT_DISPLAY_CONFIGURATION,
};
use polars::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

#[derive(Default)]
struct RecordingSurface {
    rendered: Vec<Value>,
    fail_after: Option<usize>,
}
impl DisplaySurface for RecordingSurface {
    fn render(&mut self, spec: &Value) -> DisplayResult<()> {
        if self.fail_after == Some(self.rendered.len()) {
            return Err(DisplayError::SurfaceUnavailable {
                reason: "closed".to_string(),
            });
        }
        self.rendered.push(spec.clone());
        Ok(())
    }
}

fn chart(metric: &str) -> LayerChart {
    let frame = df!(
        "batch_id" => ["b1", "b2"],
        metric => [1_i64, 2],
    )
    .unwrap();
    build_line_chart(
        frame,
        metric,
        FieldType::Quantitative,
        "batch_id",
        FieldType::Nominal,
        LineChartOptions::default(),
    )
    .unwrap()
}

#[test]
fn test_display_of_no_charts_renders_nothing() {
    assert!(display::<LayerChart>(&[]).is_ok());

    let mut surface = RecordingSurface::default();
    display_with(&mut surface, &DEFAULT_DISPLAY_CONFIGURATION, &[] as &[LayerChart]).unwrap();
    assert!(surface.rendered.is_empty());
}

#[test]
fn test_charts_render_in_order_with_config() {
    let charts = [chart("alpha"), chart("beta")];
    let mut surface = RecordingSurface::default();

    display_with(&mut surface, &DEFAULT_DISPLAY_CONFIGURATION, &charts).unwrap();

    assert_eq!(surface.rendered.len(), 2);
    assert_eq!(surface.rendered[0]["layer"][0]["encoding"]["y"]["field"], "alpha");
    assert_eq!(surface.rendered[1]["layer"][0]["encoding"]["y"]["field"], "beta");
    for spec in &surface.rendered {
        assert_eq!(spec["config"]["view"]["width"], 800);
        assert_eq!(spec["config"]["view"]["height"], 250);
        assert_eq!(spec["config"]["font"], "Verdana");
    }
}

#[test]
fn test_unconfigured_spec_has_no_config_block() {
    let spec = chart("alpha").to_vega_lite().unwrap();
    assert!(spec.get("config").is_none());
}

#[test]
fn test_display_stops_at_first_failure() {
    let charts = [chart("a"), chart("b"), chart("c")];
    let mut surface = RecordingSurface {
        fail_after: Some(1),
        ..Default::default()
    };

    let err = display_with(&mut surface, &DEFAULT_DISPLAY_CONFIGURATION, &charts).unwrap_err();

    assert!(matches!(err, EaselError::Display(DisplayError::SurfaceUnavailable { .. })));
    assert_eq!(surface.rendered.len(), 1);
}

#[test]
fn test_notebook_surface_needs_evcxr_runtime() {
    if std::env::var_os(easel::display::EVCXR_RUNTIME_ENV).is_some() {
        return;
    }
    let err = display(&[chart("alpha")]).unwrap_err();
    assert!(matches!(err, EaselError::Display(DisplayError::SurfaceUnavailable { .. })));
}

#[test]
fn test_notebook_writer_emits_one_block_per_chart() {
    let mut surface = NotebookSurface::with_writer(Vec::new());
    display_with(
        &mut surface,
        &DEFAULT_DISPLAY_CONFIGURATION,
        &[chart("a"), chart("b")],
    )
    .unwrap();

    let out = String::from_utf8(surface.into_inner()).unwrap();
    assert_eq!(
        out.matches("EVCXR_BEGIN_CONTENT application/vnd.vegalite.v5+json").count(),
        2
    );
    assert_eq!(out.matches("EVCXR_END_CONTENT").count(), 2);
}

#[test]
fn test_html_surface_writes_one_page_per_chart() {
    let dir = TempDir::new().unwrap();
    let mut surface = HtmlSurface::new(dir.path().join("charts"));

    display_with(
        &mut surface,
        &DEFAULT_DISPLAY_CONFIGURATION,
        &[chart("a"), chart("b")],
    )
    .unwrap();

    assert_eq!(surface.written().len(), 2);
    assert!(surface.written()[0].ends_with("chart-000.html"));
    assert!(surface.written()[1].ends_with("chart-001.html"));
    let page = fs::read_to_string(&surface.written()[1]).unwrap();
    assert!(page.contains("vegaEmbed(\"#vis\""));
    assert!(page.contains("\"field\":\"b\""));
}

#[test]
fn test_config_loaded_from_yaml_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("display.yaml");
    fs::write(&path, "view:\n  width: 400\ntitle:\n  fontSize: 20\n").unwrap();

    let config = DisplayConfig::from_yaml_file(&path).unwrap();
    let mut surface = RecordingSurface::default();
    display_with(&mut surface, &config, &[chart("a")]).unwrap();

    let rendered = &surface.rendered[0]["config"];
    assert_eq!(rendered["view"]["width"], 400);
    assert_eq!(rendered["view"]["height"], 250);
    assert_eq!(rendered["title"]["fontSize"], 20);
}

#[test]
fn test_missing_config_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let err = DisplayConfig::from_yaml_file(dir.path().join("absent.yaml")).unwrap_err();
    assert!(err.to_string().contains("absent.yaml"));
}
