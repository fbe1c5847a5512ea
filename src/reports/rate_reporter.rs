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
use crate::fetch::rate_fetcher::LatestRates;
use crate::rates::currency::{CurrencyCode, CurrencyPair};
use crate::rates::series::RateSeries;
use crate::reports::table::Table;

/// Text reports of fetched rates, for the non-interactive commands.
pub struct RateReporter;

impl RateReporter {
	/// One code per line, ready for piping
	pub fn currencies(currencies: &[CurrencyCode]) -> String {
		currencies
			.iter()
			.map(|c| format!("{}\n", c))
			.collect::<String>()
	}

	pub fn latest(latest: &LatestRates) -> String {
		let mut table = Table::new(2);

		table.add_header(vec!["Currency", &format!("1 {} =", latest.base)]);
		table.add_separator();
		for (code, rate) in &latest.rates {
			table.add_row(vec![code.as_str(), &rate.to_string()]);
		}
		table.right_align(vec![1]);

		format!("Rates as of {}\n{}", latest.date, table.render())
	}

	pub fn series(pair: &CurrencyPair, series: &RateSeries) -> String {
		if series.is_empty() {
			return format!("No {} rates published in range\n", pair);
		}

		let mut table = Table::new(2);

		table.add_header(vec!["Date", &pair.to_string()]);
		table.add_separator();
		for point in series.points() {
			table.add_row(vec![
				&point.date().to_string(),
				&point.rate().to_string(),
			]);
		}
		table.right_align(vec![1]);

		table.render()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::rates::series::{build_series, History};
	use crate::util::date::Date;
	use pretty_assertions::assert_eq;
	use rust_decimal_macros::dec;

	fn code(s: &str) -> CurrencyCode {
		s.parse().unwrap()
	}

	fn date(s: &str) -> Date {
		s.parse().unwrap()
	}

	#[test]
	fn test_currencies() {
		assert_eq!(
			RateReporter::currencies(&[code("AUD"), code("EUR")]),
			"AUD\nEUR\n"
		);
	}

	#[test]
	fn test_latest() {
		let latest = LatestRates {
			base: code("EUR"),
			date: date("2021-01-08"),
			rates: [(code("AUD"), dec!(1.5744)), (code("USD"), dec!(1.225))]
				.into_iter()
				.collect(),
		};

		assert_eq!(
			RateReporter::latest(&latest),
			"Rates as of 2021-01-08\n\
			 Currency | 1 EUR =\n\
			 ------------------\n\
			 AUD         1.5744\n\
			 USD          1.225\n"
		);
	}

	#[test]
	fn test_series() {
		let pair = CurrencyPair::new(code("AUD"), code("USD"));
		let raw: History = [
			(date("2021-01-05"), dec!(0.771)),
			(date("2021-01-04"), dec!(0.7691)),
		]
		.into_iter()
		.collect();

		let report = RateReporter::series(&pair, &build_series(&raw));
		let lines: Vec<&str> = report.lines().collect();

		assert_eq!(lines.len(), 4);
		assert!(lines[0].contains("AUD / USD"));
		assert_eq!(lines[2], "2021-01-04      0.7691");
		assert_eq!(lines[3], "2021-01-05       0.771");
	}

	#[test]
	fn test_empty_series() {
		let pair = CurrencyPair::new(code("AUD"), code("USD"));
		assert_eq!(
			RateReporter::series(&pair, &RateSeries::default()),
			"No AUD / USD rates published in range\n"
		);
	}
}
