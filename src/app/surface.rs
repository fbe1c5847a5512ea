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
use crate::chart::svg::ChartContainer;
use crate::rates::currency::{CurrencyCode, CurrencyPair};
use crate::rates::error::FxError;
use crate::util::date::Date;
use std::fs;
use std::path::PathBuf;

/// The visible parts of the app: both currency pickers, the date input, the
/// conversion output, and the chart with its title.
pub trait Surface {
	/// Fills both currency pickers
	fn set_currencies(&mut self, currencies: &[CurrencyCode]);

	fn set_date(&mut self, date: &Date);

	fn show_amount(&mut self, formatted: &str);

	fn set_chart_titles(&mut self, pair: &CurrencyPair);

	fn show_chart(&mut self, chart: &ChartContainer) -> Result<(), FxError>;
}

/// A surface for the terminal. Text goes to stdout; charts are written to a
/// file, or to stdout when no file was given.
pub struct TerminalSurface {
	chart_path: Option<PathBuf>,
	verbose: bool,
	title: Option<String>,
}

impl TerminalSurface {
	/// `verbose` also echoes the currency list, date and chart title, which
	/// the interactive shell wants and one-shot commands do not.
	pub fn new(chart_path: Option<PathBuf>, verbose: bool) -> Self {
		Self {
			chart_path,
			verbose,
			title: None,
		}
	}
}

impl Surface for TerminalSurface {
	fn set_currencies(&mut self, currencies: &[CurrencyCode]) {
		if self.verbose {
			let codes: Vec<&str> =
				currencies.iter().map(|c| c.as_str()).collect();
			println!("Currencies: {}", codes.join(" "));
		}
	}

	fn set_date(&mut self, date: &Date) {
		if self.verbose {
			println!("Date: {}", date);
		}
	}

	fn show_amount(&mut self, formatted: &str) {
		println!("{}", formatted);
	}

	fn set_chart_titles(&mut self, pair: &CurrencyPair) {
		self.title = Some(pair.to_string());
	}

	fn show_chart(&mut self, chart: &ChartContainer) -> Result<(), FxError> {
		match &self.chart_path {
			Some(path) => {
				fs::write(path, chart.contents())?;
				if self.verbose {
					println!(
						"{}: {} rates charted to {}",
						self.title.as_deref().unwrap_or("Chart"),
						chart.point_count(),
						path.display()
					);
				}
			},
			None => print!("{}", chart.contents()),
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::chart::svg::render;
	use crate::rates::series::RateSeries;
	use tempfile::tempdir;

	#[test]
	fn test_chart_written_to_file() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("chart.svg");

		let mut container = ChartContainer::new();
		render(&RateSeries::default(), &mut container, 300.0, 200.0);

		let mut surface = TerminalSurface::new(Some(path.clone()), false);
		surface.show_chart(&container).unwrap();

		assert_eq!(fs::read_to_string(path).unwrap(), container.contents());
	}

	#[test]
	fn test_unwritable_chart_path() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("missing").join("chart.svg");

		let mut surface = TerminalSurface::new(Some(path), false);
		assert!(matches!(
			surface.show_chart(&ChartContainer::new()),
			Err(FxError::Io(_))
		));
	}
}
