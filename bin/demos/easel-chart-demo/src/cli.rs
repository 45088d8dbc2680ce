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

use clap::{Args, Parser, Subcommand};
use easel::FieldType;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "easel-chart-demo")]
#[command(about = "Builds Vega-Lite metric charts from CSV batches and flattens profiler output")]
#[command(version)]
pub struct Cli {
    #[arg(long, help = "Enable debug-level logging")]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(about = "Line and point chart of one metric column")]
    Line(ChartArgs),
    #[command(about = "Expected-range band with anomaly-coloured observations")]
    Band(ChartArgs),
    #[command(about = "Flatten profiler metrics JSON to domain -> metric -> attributed value")]
    Flatten {
        #[arg(help = "Path to the profiler metrics JSON")]
        input: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct ChartArgs {
    #[arg(help = "CSV file with one row per batch")]
    pub csv: PathBuf,

    #[arg(long, default_value = "table_row_count")]
    pub metric: String,

    #[arg(long, default_value = "quantitative", help = "Vega-Lite type of the metric column")]
    pub metric_type: FieldType,

    #[arg(long, default_value = "batch_id")]
    pub x: String,

    #[arg(long, default_value = "nominal", help = "Vega-Lite type of the x-axis column")]
    pub x_type: FieldType,

    #[arg(long, help = "YAML display configuration overriding the defaults")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Write HTML pages here instead of printing the spec to stdout")]
    pub out_dir: Option<PathBuf>,
}
