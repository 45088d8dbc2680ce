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

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{ChartArgs, Cli, Command};
use easel::{
    build_band_chart, build_line_chart, display_with, get_attributed_metrics_by_domain,
    DisplayConfig, HtmlSurface, LayerChart, LineChartOptions, MetricsByDomain, VegaLite,
};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use tracing::info;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Line(args) => {
            let df = load_csv(&args.csv)?;
            let chart = build_line_chart(
                df,
                &args.metric,
                args.metric_type,
                &args.x,
                args.x_type,
                LineChartOptions::default(),
            )?;
            emit(&chart, &args)
        }
        Command::Band(args) => {
            let df = load_csv(&args.csv)?;
            let chart = build_band_chart(df, &args.metric, args.metric_type, &args.x, args.x_type)?;
            emit(&chart, &args)
        }
        Command::Flatten { input } => {
            let file = File::open(&input)
                .with_context(|| format!("opening metrics file {}", input.display()))?;
            let metrics: MetricsByDomain = serde_json::from_reader(file)
                .with_context(|| format!("parsing metrics file {}", input.display()))?;
            let flattened = get_attributed_metrics_by_domain(&metrics)?;
            info!(domains = flattened.len(), "flattened metrics");
            println!("{}", serde_json::to_string_pretty(&flattened)?);
            Ok(())
        }
    }
}

fn load_csv(path: &Path) -> Result<DataFrame> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let df = CsvReader::new(file).finish()?;
    info!(rows = df.height(), columns = df.width(), "loaded {}", path.display());
    Ok(df)
}

fn emit(chart: &LayerChart, args: &ChartArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => DisplayConfig::from_yaml_file(path)?,
        None => DisplayConfig::default(),
    };
    match &args.out_dir {
        Some(dir) => {
            let mut surface = HtmlSurface::new(dir);
            display_with(&mut surface, &config, std::slice::from_ref(chart))?;
            for path in surface.written() {
                println!("{}", path.display());
            }
        }
        None => println!("{}", serde_json::to_string_pretty(&chart.configure(&config)?)?),
    }
    Ok(())
}
