/* Copyright © 2024-2025 Adam Train <adam@trainrelay.net>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */
use crate::fetch::rate_fetcher::DEFAULT_API_URL;
use serde::Deserialize;

pub const DEFAULT_BASE: &str = "AUD";
pub const DEFAULT_TARGET: &str = "USD";

/// Roughly 70% of a 960 pixel window by a 500 pixel plot
pub const DEFAULT_WIDTH: u32 = 672;
pub const DEFAULT_HEIGHT: u32 = 500;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
	pub api: Option<Api>,
	pub chart: Option<Chart>,
	pub defaults: Option<Defaults>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Api {
	/// Root of an exchangeratesapi.io compatible service
	pub url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Chart {
	pub width: Option<u32>,
	pub height: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Defaults {
	pub base: Option<String>,
	pub target: Option<String>,

	/// Whether submitting a conversion also redraws the one month chart
	pub redraw_after_convert: Option<bool>,
}

impl Config {
	pub fn api_url(&self) -> String {
		self.api
			.as_ref()
			.and_then(|a| a.url.clone())
			.unwrap_or_else(|| DEFAULT_API_URL.to_string())
	}

	pub fn chart_size(&self) -> (u32, u32) {
		let chart = self.chart.as_ref();
		(
			chart.and_then(|c| c.width).unwrap_or(DEFAULT_WIDTH),
			chart.and_then(|c| c.height).unwrap_or(DEFAULT_HEIGHT),
		)
	}

	pub fn base(&self) -> String {
		self.defaults
			.as_ref()
			.and_then(|d| d.base.clone())
			.unwrap_or_else(|| DEFAULT_BASE.to_string())
	}

	pub fn target(&self) -> String {
		self.defaults
			.as_ref()
			.and_then(|d| d.target.clone())
			.unwrap_or_else(|| DEFAULT_TARGET.to_string())
	}

	pub fn redraw_after_convert(&self) -> bool {
		self.defaults
			.as_ref()
			.and_then(|d| d.redraw_after_convert)
			.unwrap_or(true)
	}
}
