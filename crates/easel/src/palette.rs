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

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Colors {
    Green,
    Pink,
    Purple,
    Blue1,
    Blue2,
    Blue3,
}
impl Colors {
    pub fn hex(&self) -> &'static str {
        match self {
            Colors::Green => "#00C2A4",
            Colors::Pink => "#FD5383",
            Colors::Purple => "#8784FF",
            Colors::Blue1 => "#1B2A4D",
            Colors::Blue2 => "#384B74",
            Colors::Blue3 => "#8699B7",
        }
    }
}
impl fmt::Display for Colors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hex())
    }
}

pub const HEATMAP: [&str; 6] = [
    "#1B2A4D", "#384B74", "#5C6F97", "#8699B7", "#B0BDD3", "#D8DFEA",
];
