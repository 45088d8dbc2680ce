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

pub mod builders;
pub mod chart;
pub mod config;
pub mod display;
pub mod encoding;
pub mod error;
pub mod expr;
pub mod metrics;
pub mod palette;

pub use builders::{
    anomaly_color_condition, build_band_chart, build_line_chart, chart_title, flag_out_of_range,
    out_of_range_predicate, title_case, LineChartOptions,
};
pub use chart::{Chart, Layer, LayerChart, MarkDef, MarkKind, VegaLite};
pub use config::{DisplayConfig, DEFAULT_DISPLAY_CONFIGURATION};
pub use display::{display, display_with, DisplaySurface, HtmlSurface, NotebookSurface};
pub use encoding::{ColorCondition, Encoding, FieldType, PositionDef, Tooltip};
pub use error::{ConfigError, DisplayError, EaselError, Result};
pub use expr::{datum, Expr};
pub use metrics::{
    get_attributed_metrics_by_domain, AttributedMetricsByDomain, Domain, MetricsByDomain,
    ParameterNode,
};
pub use palette::Colors;
