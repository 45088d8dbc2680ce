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

use crate::config::DisplayConfig;
use crate::encoding::Encoding;
use crate::error::Result;
use indexmap::IndexMap;
use polars::prelude::*;
use serde::Serialize;
use serde_json::{Map, Number, Value};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::ops::Add;
use std::sync::Arc;

pub const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkKind {
    Line,
    Point,
    Area,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkDef {
    #[serde(rename = "type")]
    pub kind: MarkKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
}
impl MarkDef {
    pub fn new(kind: MarkKind) -> Self {
        Self {
            kind,
            color: None,
            opacity: None,
            fill: None,
            fill_opacity: None,
            stroke: None,
        }
    }
    pub fn line() -> Self {
        Self::new(MarkKind::Line)
    }
    pub fn point() -> Self {
        Self::new(MarkKind::Point)
    }
    pub fn area() -> Self {
        Self::new(MarkKind::Area)
    }
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }
    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = Some(fill.into());
        self
    }
    pub fn with_fill_opacity(mut self, fill_opacity: f64) -> Self {
        self.fill_opacity = Some(fill_opacity);
        self
    }
    pub fn with_stroke(mut self, stroke: impl Into<String>) -> Self {
        self.stroke = Some(stroke.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct Chart {
    data: Arc<DataFrame>,
    title: Option<String>,
    mark: MarkDef,
    encoding: Encoding,
}
impl Chart {
    pub fn new(data: impl Into<Arc<DataFrame>>, mark: MarkDef) -> Self {
        Self {
            data: data.into(),
            title: None,
            mark,
            encoding: Encoding::default(),
        }
    }
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn encode(mut self, encoding: Encoding) -> Result<Self> {
        let fields = encoding.fields();
        for field in &fields {
            self.data.column(field)?;
        }
        tracing::debug!(mark = ?self.mark.kind, ?fields, "encoded chart");
        self.encoding = encoding;
        Ok(self)
    }
    pub fn data(&self) -> &Arc<DataFrame> {
        &self.data
    }
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
    pub fn mark(&self) -> &MarkDef {
        &self.mark
    }
    pub fn encoding(&self) -> &Encoding {
        &self.encoding
    }
}

#[derive(Debug, Clone)]
pub enum Layer {
    Chart(Chart),
    Layer(LayerChart),
}

#[derive(Debug, Clone, Default)]
pub struct LayerChart {
    layers: Vec<Layer>,
}
impl LayerChart {
    pub fn new(layers: Vec<Layer>) -> Self {
        Self { layers }
    }
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }
    pub fn len(&self) -> usize {
        self.layers.len()
    }
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn charts(&self) -> Vec<&Chart> {
        let mut out = Vec::new();
        for layer in &self.layers {
            match layer {
                Layer::Chart(chart) => out.push(chart),
                Layer::Layer(nested) => out.extend(nested.charts()),
            }
        }
        out
    }
}
impl Add for Chart {
    type Output = LayerChart;
    fn add(self, rhs: Chart) -> LayerChart {
        LayerChart::new(vec![Layer::Chart(self), Layer::Chart(rhs)])
    }
}
impl Add<LayerChart> for Chart {
    type Output = LayerChart;
    fn add(self, rhs: LayerChart) -> LayerChart {
        LayerChart::new(vec![Layer::Chart(self), Layer::Layer(rhs)])
    }
}
impl Add<Chart> for LayerChart {
    type Output = LayerChart;
    fn add(mut self, rhs: Chart) -> LayerChart {
        self.layers.push(Layer::Chart(rhs));
        self
    }
}
// The right-hand layer chart is kept whole as a single nested layer.
impl Add for LayerChart {
    type Output = LayerChart;
    fn add(mut self, rhs: LayerChart) -> LayerChart {
        self.layers.push(Layer::Layer(rhs));
        self
    }
}

#[derive(Debug, Default)]
pub struct Datasets {
    by_frame: HashMap<usize, String>,
    values: IndexMap<String, Value>,
}
impl Datasets {
    pub fn register(&mut self, frame: &Arc<DataFrame>) -> Result<String> {
        let key = Arc::as_ptr(frame) as usize;
        if let Some(name) = self.by_frame.get(&key) {
            return Ok(name.clone());
        }
        let rows = frame_to_values(frame)?;
        let encoded = serde_json::to_vec(&rows)?;
        let digest = hex::encode(Sha256::digest(&encoded));
        let name = format!("data-{}", &digest[..32]);
        self.values.entry(name.clone()).or_insert(rows);
        self.by_frame.insert(key, name.clone());
        Ok(name)
    }
    pub fn len(&self) -> usize {
        self.values.len()
    }
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
    fn into_value(self) -> Value {
        Value::Object(self.values.into_iter().collect())
    }
}

pub trait VegaLite {
    fn view_spec(&self, datasets: &mut Datasets) -> Result<Value>;

    fn to_vega_lite(&self) -> Result<Value> {
        let mut datasets = Datasets::default();
        let view = self.view_spec(&mut datasets)?;
        Ok(top_level(view, datasets, None))
    }

    fn configure(&self, config: &DisplayConfig) -> Result<Value> {
        let mut datasets = Datasets::default();
        let view = self.view_spec(&mut datasets)?;
        Ok(top_level(view, datasets, Some(serde_json::to_value(config)?)))
    }

    fn to_vega_lite_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_vega_lite()?)?)
    }
}

fn top_level(view: Value, datasets: Datasets, config: Option<Value>) -> Value {
    let mut spec = Map::new();
    spec.insert(
        "$schema".to_string(),
        Value::String(VEGA_LITE_SCHEMA.to_string()),
    );
    if let Some(config) = config {
        spec.insert("config".to_string(), config);
    }
    if let Value::Object(view) = view {
        spec.extend(view);
    }
    spec.insert("datasets".to_string(), datasets.into_value());
    Value::Object(spec)
}

impl VegaLite for Chart {
    fn view_spec(&self, datasets: &mut Datasets) -> Result<Value> {
        let name = datasets.register(&self.data)?;
        let mut view = Map::new();
        let mut data = Map::new();
        data.insert("name".to_string(), Value::String(name));
        view.insert("data".to_string(), Value::Object(data));
        if let Some(title) = &self.title {
            view.insert("title".to_string(), Value::String(title.clone()));
        }
        view.insert("mark".to_string(), serde_json::to_value(&self.mark)?);
        view.insert("encoding".to_string(), serde_json::to_value(&self.encoding)?);
        Ok(Value::Object(view))
    }
}
impl VegaLite for LayerChart {
    fn view_spec(&self, datasets: &mut Datasets) -> Result<Value> {
        let layers = self
            .layers
            .iter()
            .map(|layer| match layer {
                Layer::Chart(chart) => chart.view_spec(datasets),
                Layer::Layer(nested) => nested.view_spec(datasets),
            })
            .collect::<Result<Vec<_>>>()?;
        let mut view = Map::new();
        view.insert("layer".to_string(), Value::Array(layers));
        Ok(Value::Object(view))
    }
}
impl<T: VegaLite + ?Sized> VegaLite for &T {
    fn view_spec(&self, datasets: &mut Datasets) -> Result<Value> {
        (**self).view_spec(datasets)
    }
}

pub fn frame_to_values(df: &DataFrame) -> PolarsResult<Value> {
    let names = df.get_column_names();
    let columns = df
        .get_columns()
        .iter()
        .map(|column| column_values(column.as_materialized_series()))
        .collect::<PolarsResult<Vec<_>>>()?;
    let rows = (0..df.height())
        .map(|row| {
            let object: Map<String, Value> = names
                .iter()
                .zip(&columns)
                .map(|(name, values)| (name.to_string(), values[row].clone()))
                .collect();
            Value::Object(object)
        })
        .collect();
    Ok(Value::Array(rows))
}

fn column_values(series: &Series) -> PolarsResult<Vec<Value>> {
    let dtype = series.dtype();
    if dtype.is_bool() {
        return Ok(series
            .bool()?
            .into_iter()
            .map(|v| v.map_or(Value::Null, Value::Bool))
            .collect());
    }
    if dtype.is_integer() {
        let cast = series.cast(&DataType::Int64)?;
        return Ok(cast
            .i64()?
            .into_iter()
            .map(|v| v.map_or(Value::Null, Value::from))
            .collect());
    }
    if dtype.is_float() {
        let cast = series.cast(&DataType::Float64)?;
        return Ok(cast
            .f64()?
            .into_iter()
            .map(|v| v.and_then(Number::from_f64).map_or(Value::Null, Value::Number))
            .collect());
    }
    let cast = series.cast(&DataType::String)?;
    Ok(cast
        .str()?
        .into_iter()
        .map(|v| v.map_or(Value::Null, |s| Value::String(s.to_string())))
        .collect())
}
