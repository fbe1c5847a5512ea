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
use crate::chart::layout::{ChartLayout, PlotPoint, MARGIN};
use crate::rates::series::RateSeries;
use crate::util::format::format_grouped;

/// Radius of the hover target drawn on every point
pub const POINT_RADIUS: f64 = 8.0;

const TOOLTIP_WIDTH: f64 = 80.0;
const TOOLTIP_HEIGHT: f64 = 36.0;
const TOOLTIP_OFFSET: (f64, f64) = (20.0, 10.0);

const STYLE: &str = "\
.line{fill:none;stroke:#ffab00;stroke-width:2}\
.dot{fill:#ffab00;fill-opacity:0.25;stroke:none;cursor:pointer}\
.point .tooltip{display:none;pointer-events:none}\
.point:hover .tooltip{display:inline}\
.point:hover .dot{fill-opacity:1}\
.tooltip rect{fill:#222;opacity:0.9;rx:4}\
.tooltip text{fill:#fff;font:12px sans-serif}\
.axis line{stroke:#ccc}\
.axis text{fill:#ccc;font:10px sans-serif}\
.chart-title{fill:#fff;font:bold 14px sans-serif}\
.empty{fill:#ccc;font:14px sans-serif}";

/// The element a chart is drawn into. Rendering always replaces whatever
/// was drawn before; the caption stays until it is changed.
#[derive(Debug, Default)]
pub struct ChartContainer {
	contents: String,
	caption: Option<String>,
}

impl ChartContainer {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn clear(&mut self) {
		self.contents.clear();
	}

	/// Shown above the plot area from the next render on
	pub fn set_caption(&mut self, caption: &str) {
		self.caption = Some(caption.to_string());
	}

	pub fn contents(&self) -> &str {
		&self.contents
	}

	/// Number of hover targets currently drawn
	pub fn point_count(&self) -> usize {
		self.contents.matches("class=\"dot\"").count()
	}
}

/// Draws the series into the container as a standalone SVG document.
pub fn render(
	series: &RateSeries,
	container: &mut ChartContainer,
	width: f64,
	height: f64,
) {
	container.clear();

	let layout = ChartLayout::compute(series, width, height);
	let title = container.caption.as_deref().map(escape);
	let out = &mut container.contents;

	out.push_str(&format!(
		"<svg xmlns=\"http://www.w3.org/2000/svg\" class=\"chart\" \
		 width=\"{w:.0}\" height=\"{h:.0}\" viewBox=\"0 0 {w:.0} {h:.0}\">\n",
		w = layout.width,
		h = layout.height
	));
	out.push_str(&format!("<style>{}</style>\n", STYLE));

	if let Some(title) = title {
		out.push_str(&format!(
			"<text class=\"chart-title\" x=\"{:.2}\" y=\"{:.2}\">{}</text>\n",
			MARGIN.left,
			MARGIN.top - 6.0,
			title
		));
	}

	out.push_str(&format!(
		"<g transform=\"translate({},{})\">\n",
		MARGIN.left, MARGIN.top
	));

	if layout.points.is_empty() {
		out.push_str(&format!(
			"<text class=\"empty\" x=\"{:.2}\" y=\"{:.2}\" \
			 text-anchor=\"middle\">No rates</text>\n",
			layout.plot_width / 2.0,
			layout.plot_height / 2.0
		));
	} else {
		out.push_str(&format!(
			"<path class=\"line\" d=\"{}\"/>\n",
			layout.path
		));
		for point in &layout.points {
			draw_point(out, point, tooltip_origin(point, &layout));
		}
	}

	draw_x_axis(out, &layout);
	draw_y_axis(out, &layout);

	out.push_str("</g>\n</svg>\n");
}

/// A hit target with a tooltip next to it, shown only while hovered.
fn draw_point(out: &mut String, point: &PlotPoint, tooltip: (f64, f64)) {
	let date = point.date.detail_label();
	let rate = format_grouped(point.rate, 3);

	out.push_str("<g class=\"point\">");
	out.push_str(&format!(
		"<circle class=\"dot\" cx=\"{:.2}\" cy=\"{:.2}\" r=\"{}\">\
		 <title>{}: {}</title></circle>",
		point.x, point.y, POINT_RADIUS, date, rate
	));
	out.push_str(&format!(
		"<g class=\"tooltip\" transform=\"translate({:.2},{:.2})\">\
		 <rect width=\"{}\" height=\"{}\"/>\
		 <text x=\"6\" y=\"15\">{}</text>\
		 <text x=\"6\" y=\"30\">{}</text></g>",
		tooltip.0,
		tooltip.1,
		TOOLTIP_WIDTH,
		TOOLTIP_HEIGHT,
		date,
		rate
	));
	out.push_str("</g>\n");
}

/// Top left corner of a point's tooltip, relative to the plot area. The
/// tooltip sits below and to the right of the point, flipping left and
/// moving up where it would otherwise leave the canvas.
fn tooltip_origin(point: &PlotPoint, layout: &ChartLayout) -> (f64, f64) {
	let (dx, dy) = TOOLTIP_OFFSET;
	let right_edge = layout.width - MARGIN.left;
	let bottom_edge = layout.height - MARGIN.top;

	let mut x = point.x + dx;
	if x + TOOLTIP_WIDTH > right_edge {
		x = point.x - dx - TOOLTIP_WIDTH;
	}
	let y = (point.y + dy).min(bottom_edge - TOOLTIP_HEIGHT);

	(x.max(-MARGIN.left), y.max(-MARGIN.top))
}

fn draw_x_axis(out: &mut String, layout: &ChartLayout) {
	out.push_str(&format!(
		"<g class=\"axis x-axis\" transform=\"translate(0,{:.2})\">\
		 <line x1=\"0\" x2=\"{:.2}\"/>",
		layout.plot_height, layout.plot_width
	));
	for tick in &layout.x_ticks {
		out.push_str(&format!(
			"<g class=\"tick\" transform=\"translate({:.2},0)\">\
			 <line y2=\"6\"/>\
			 <text y=\"9\" dy=\"0.71em\" text-anchor=\"middle\">{}</text></g>",
			tick.offset, tick.label
		));
	}
	out.push_str("</g>\n");
}

fn draw_y_axis(out: &mut String, layout: &ChartLayout) {
	out.push_str(&format!(
		"<g class=\"axis y-axis\"><line y1=\"0\" y2=\"{:.2}\"/>",
		layout.plot_height
	));
	for tick in &layout.y_ticks {
		out.push_str(&format!(
			"<g class=\"tick\" transform=\"translate(0,{:.2})\">\
			 <line x2=\"-6\"/>\
			 <text x=\"-9\" dy=\"0.32em\" text-anchor=\"end\">{}</text></g>",
			tick.offset, tick.label
		));
	}
	out.push_str("</g>\n");
}

fn escape(text: &str) -> String {
	text.replace('&', "&amp;")
		.replace('<', "&lt;")
		.replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::rates::series::{build_series, History};
	use crate::util::date::Date;
	use rust_decimal_macros::dec;
	use std::str::FromStr;

	fn date(s: &str) -> Date {
		Date::from_str(s).unwrap()
	}

	fn sample() -> RateSeries {
		let raw: History = [
			(date("2021-01-04"), dec!(0.7691)),
			(date("2021-01-05"), dec!(0.771)),
			(date("2021-01-06"), dec!(0.7755)),
		]
		.into_iter()
		.collect();
		build_series(&raw)
	}

	#[test]
	fn test_render_draws_everything() {
		let mut container = ChartContainer::new();
		container.set_caption("AUD / USD");
		render(&sample(), &mut container, 600.0, 500.0);

		let svg = container.contents();
		assert!(svg.starts_with("<svg"));
		assert!(svg.trim_end().ends_with("</svg>"));
		assert!(svg.contains("width=\"600\" height=\"500\""));
		assert!(svg.contains("AUD / USD"));
		assert!(svg.contains("class=\"line\" d=\"M0.00,450.00C"));
		assert_eq!(container.point_count(), 3);
		assert!(svg.contains("<title>04 Jan 21: 0.769</title>"));
		assert!(svg.contains(">04 Jan</text>"));
		assert!(svg.contains(">0.77</text>"));
	}

	#[test]
	fn test_render_replaces_previous_chart() {
		let mut container = ChartContainer::new();
		render(&sample(), &mut container, 600.0, 500.0);
		let first = container.contents().to_string();

		render(&sample(), &mut container, 600.0, 500.0);
		assert_eq!(container.contents(), first);
		assert_eq!(container.matches_svg_roots(), 1);
		assert!(!container.contents().contains("class=\"chart-title\""));
	}

	#[test]
	fn test_caption_is_escaped() {
		let mut container = ChartContainer::new();
		container.set_caption("<AUD> & USD");
		render(&sample(), &mut container, 600.0, 500.0);

		assert!(container.contents().contains(">&lt;AUD&gt; &amp; USD</text>"));
	}

	#[test]
	fn test_render_single_point() {
		let raw: History =
			[(date("2021-01-04"), dec!(0.7691))].into_iter().collect();
		let mut container = ChartContainer::new();
		render(&build_series(&raw), &mut container, 600.0, 500.0);

		assert_eq!(container.point_count(), 1);
		assert!(container.contents().contains("cx=\"265.00\" cy=\"225.00\""));
		assert!(!container.contents().contains("NaN"));
	}

	#[test]
	fn test_render_empty_series() {
		let mut container = ChartContainer::new();
		render(&RateSeries::default(), &mut container, 600.0, 500.0);

		assert_eq!(container.point_count(), 0);
		assert!(container.contents().contains("No rates"));
		assert!(container.contents().contains("x-axis"));
	}

	#[test]
	fn test_tooltips_stay_on_canvas() {
		let (width, height) = (600.0, 500.0);
		let layout = ChartLayout::compute(&sample(), width, height);

		for point in &layout.points {
			let (x, y) = tooltip_origin(point, &layout);
			let left = MARGIN.left + x;
			let top = MARGIN.top + y;

			assert!(left >= 0.0 && left + TOOLTIP_WIDTH <= width, "{}", left);
			assert!(top >= 0.0 && top + TOOLTIP_HEIGHT <= height, "{}", top);
		}
	}

	#[test]
	fn test_last_tooltip_flips_left() {
		let layout = ChartLayout::compute(&sample(), 600.0, 500.0);
		let last = &layout.points[layout.points.len() - 1];
		let first = &layout.points[0];

		assert_eq!(tooltip_origin(last, &layout).0, last.x - 100.0);
		assert_eq!(tooltip_origin(first, &layout).0, first.x + 20.0);

		// the lowest rate sits on the bottom of the plot
		assert_eq!(tooltip_origin(first, &layout).1, 500.0 - 20.0 - 36.0);
	}

	#[test]
	fn test_escape() {
		assert_eq!(escape("a<b & c>"), "a&lt;b &amp; c&gt;");
	}

	impl ChartContainer {
		fn matches_svg_roots(&self) -> usize {
			self.contents.matches("<svg").count()
		}
	}
}
