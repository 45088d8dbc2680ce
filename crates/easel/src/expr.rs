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

// Row predicates rendered as Vega expressions, and evaluated against a frame with the same
// comparison rules so the Rust verdict matches the rendered chart.

use polars::prelude::*;
use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::{BitAnd, BitOr};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Lt,
    Gt,
}
impl CompareOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Lt => "<",
            CompareOp::Gt => ">",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Datum(String);

pub fn datum(field: impl Into<String>) -> Datum {
    Datum(field.into())
}

impl Datum {
    pub fn field(&self) -> &str {
        &self.0
    }
    pub fn lt(self, rhs: Datum) -> Expr {
        Expr::Compare {
            op: CompareOp::Lt,
            lhs: self,
            rhs,
        }
    }
    pub fn gt(self, rhs: Datum) -> Expr {
        Expr::Compare {
            op: CompareOp::Gt,
            lhs: self,
            rhs,
        }
    }

    // Vega reads a null field as 0 in a numeric comparison. Non-finite floats are written to the
    // chart data as null, so they read as 0 too.
    fn values(&self, df: &DataFrame) -> PolarsResult<Series> {
        let cast = df
            .column(&self.0)?
            .as_materialized_series()
            .cast(&DataType::Float64)?;
        let values: Float64Chunked = cast
            .f64()?
            .into_iter()
            .map(|v| Some(v.filter(|x| x.is_finite()).unwrap_or(0.0)))
            .collect();
        Ok(values.with_name(self.0.as_str().into()).into_series())
    }
}
impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if is_identifier(&self.0) {
            write!(f, "datum.{}", self.0)
        } else {
            write!(f, "datum['{}']", self.0.replace('\'', "\\'"))
        }
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Compare {
        op: CompareOp,
        lhs: Datum,
        rhs: Datum,
    },
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}
impl Expr {
    pub fn to_vega(&self) -> String {
        self.to_string()
    }
    pub fn evaluate(&self, df: &DataFrame) -> PolarsResult<BooleanChunked> {
        match self {
            Expr::Compare { op, lhs, rhs } => {
                let lhs = lhs.values(df)?;
                let rhs = rhs.values(df)?;
                match op {
                    CompareOp::Lt => lhs.lt(&rhs),
                    CompareOp::Gt => lhs.gt(&rhs),
                }
            }
            Expr::And(a, b) => Ok(&a.evaluate(df)? & &b.evaluate(df)?),
            Expr::Or(a, b) => Ok(&a.evaluate(df)? | &b.evaluate(df)?),
        }
    }

    pub fn fields(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_fields(&mut out);
        out
    }
    fn collect_fields<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Expr::Compare { lhs, rhs, .. } => {
                for operand in [lhs, rhs] {
                    if !out.contains(&operand.field()) {
                        out.push(operand.field());
                    }
                }
            }
            Expr::And(a, b) | Expr::Or(a, b) => {
                a.collect_fields(out);
                b.collect_fields(out);
            }
        }
    }
}
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Compare { op, lhs, rhs } => write!(f, "({lhs} {} {rhs})", op.symbol()),
            Expr::And(a, b) => write!(f, "({a} && {b})"),
            Expr::Or(a, b) => write!(f, "({a} || {b})"),
        }
    }
}
impl Serialize for Expr {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
impl BitAnd for Expr {
    type Output = Expr;
    fn bitand(self, rhs: Expr) -> Expr {
        Expr::And(Box::new(self), Box::new(rhs))
    }
}
impl BitOr for Expr {
    type Output = Expr;
    fn bitor(self, rhs: Expr) -> Expr {
        Expr::Or(Box::new(self), Box::new(rhs))
    }
}
