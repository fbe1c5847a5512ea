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
use crate::chart::curve::{cardinal_path, DEFAULT_TENSION};
use crate::chart::scale::{LinearScale, TimeScale};
use crate::rates::series::RateSeries;
use crate::util::date::Date;
use crate::util::format::format_fixed;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Space around the plot area reserved for axes and labels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margin {
	pub top: f64,
	pub right: f64,
	pub bottom: f64,
	pub left: f64,
}

pub const MARGIN: Margin = Margin {
	top: 20.0,
	right: 20.0,
	bottom: 30.0,
	left: 50.0,
};

/// How many ticks each axis aims for
pub const TICK_COUNT: usize = 10;

/// A labelled position along an axis, as an offset into the plot area.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
	pub offset: f64,
	pub label: String,
}

/// Where a series point lands in the plot area.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotPoint {
	pub x: f64,
	pub y: f64,
	pub date: Date,
	pub rate: Decimal,
}

/// All the geometry of a chart, computed without drawing anything.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartLayout {
	pub width: f64,
	pub height: f64,
	pub plot_width: f64,
	pub plot_height: f64,

	/// Absent for an empty series
	pub x_domain: Option<(Date, Date)>,
	pub y_domain: Option<(Decimal, Decimal)>,

	pub x_ticks: Vec<Tick>,
	pub y_ticks: Vec<Tick>,
	pub points: Vec<PlotPoint>,

	/// SVG path data for the curve through all points
	pub path: String,
}

impl ChartLayout {
	pub fn compute(series: &RateSeries, width: f64, height: f64) -> Self {
		let plot_width = (width - MARGIN.left - MARGIN.right).max(0.0);
		let plot_height = (height - MARGIN.top - MARGIN.bottom).max(0.0);

		let mut layout = ChartLayout {
			width,
			height,
			plot_width,
			plot_height,
			x_domain: series.date_extent(),
			y_domain: series.rate_extent(),
			x_ticks: Vec::new(),
			y_ticks: Vec::new(),
			points: Vec::new(),
			path: String::new(),
		};

		let (Some(x_domain), Some((lo, hi))) =
			(layout.x_domain, layout.y_domain)
		else {
			return layout;
		};

		let x = TimeScale::new(x_domain, (0.0, plot_width));
		let y = LinearScale::new((to_f64(lo), to_f64(hi)), (plot_height, 0.0));

		layout.x_ticks = x
			.ticks(TICK_COUNT)
			.iter()
			.map(|d| Tick {
				offset: x.map(d),
				label: d.axis_label(),
			})
			.collect();

		layout.y_ticks = y
			.ticks(TICK_COUNT)
			.into_iter()
			.map(|v| Tick {
				offset: y.map(v),
				label: format_fixed(v, 2),
			})
			.collect();

		layout.points = series
			.points()
			.iter()
			.map(|p| PlotPoint {
				x: x.map(&p.date()),
				y: y.map(to_f64(p.rate())),
				date: p.date(),
				rate: p.rate(),
			})
			.collect();

		let coords: Vec<(f64, f64)> =
			layout.points.iter().map(|p| (p.x, p.y)).collect();
		layout.path = cardinal_path(&coords, DEFAULT_TENSION);

		layout
	}
}

fn to_f64(value: Decimal) -> f64 {
	value.to_f64().unwrap_or(0.0)
}
