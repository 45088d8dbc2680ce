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

use crate::chart::VegaLite;
use crate::config::{DisplayConfig, DEFAULT_DISPLAY_CONFIGURATION};
use crate::error::{DisplayError, DisplayResult, Result};
use serde_json::Value;
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub const VEGA_LITE_MIME_TYPE: &str = "application/vnd.vegalite.v5+json";
// Set by the evcxr kernel in the process that runs notebook cells.
pub const EVCXR_RUNTIME_ENV: &str = "EVCXR_IS_RUNTIME";

pub trait DisplaySurface {
    fn render(&mut self, spec: &Value) -> DisplayResult<()>;
}

pub struct NotebookSurface<W = io::Stdout> {
    writer: W,
    require_runtime: bool,
}
impl NotebookSurface<io::Stdout> {
    pub fn stdout() -> Self {
        Self {
            writer: io::stdout(),
            require_runtime: true,
        }
    }
}
impl<W: Write> NotebookSurface<W> {
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            require_runtime: false,
        }
    }
    pub fn into_inner(self) -> W {
        self.writer
    }
}
impl<W: Write> DisplaySurface for NotebookSurface<W> {
    fn render(&mut self, spec: &Value) -> DisplayResult<()> {
        if self.require_runtime && env::var_os(EVCXR_RUNTIME_ENV).is_none() {
            return Err(DisplayError::SurfaceUnavailable {
                reason: format!("{EVCXR_RUNTIME_ENV} is not set; not running inside an evcxr kernel"),
            });
        }
        writeln!(self.writer, "EVCXR_BEGIN_CONTENT {VEGA_LITE_MIME_TYPE}")?;
        serde_json::to_writer(&mut self.writer, spec).map_err(io::Error::from)?;
        writeln!(self.writer, "\nEVCXR_END_CONTENT")?;
        self.writer.flush()?;
        Ok(())
    }
}

#[derive(Debug)]
pub struct HtmlSurface {
    dir: PathBuf,
    written: Vec<PathBuf>,
}
impl HtmlSurface {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }
    pub fn dir(&self) -> &Path {
        &self.dir
    }
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}
impl DisplaySurface for HtmlSurface {
    fn render(&mut self, spec: &Value) -> DisplayResult<()> {
        let path = self
            .dir
            .join(format!("chart-{:03}.html", self.written.len()));
        let write_error = |source| DisplayError::Write {
            path: path.display().to_string(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(write_error)?;
        fs::write(&path, html_page(spec)).map_err(write_error)?;
        tracing::info!(path = %path.display(), "wrote chart");
        self.written.push(path);
        Ok(())
    }
}

pub fn html_page(spec: &Value) -> String {
    let spec = spec.to_string().replace("</", "<\\/");
    format!(
        r##"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <script src="https://cdn.jsdelivr.net/npm/vega@5"></script>
  <script src="https://cdn.jsdelivr.net/npm/vega-lite@5"></script>
  <script src="https://cdn.jsdelivr.net/npm/vega-embed@6"></script>
</head>
<body>
  <div id="vis"></div>
  <script type="text/javascript">
    vegaEmbed("#vis", {spec}).catch(console.error);
  </script>
</body>
</html>
"##
    )
}

pub fn display<C: VegaLite>(charts: &[C]) -> Result<()> {
    display_with(
        &mut NotebookSurface::stdout(),
        &DEFAULT_DISPLAY_CONFIGURATION,
        charts,
    )
}

pub fn display_with<S, C>(surface: &mut S, config: &DisplayConfig, charts: &[C]) -> Result<()>
where
    S: DisplaySurface + ?Sized,
    C: VegaLite,
{
    for (index, chart) in charts.iter().enumerate() {
        let spec = chart.configure(config)?;
        surface.render(&spec)?;
        tracing::debug!(index, "rendered chart");
    }
    Ok(())
}
