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
use crate::util::date::Date;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Published rates for one currency pair, keyed by date.
pub type History = BTreeMap<Date, Decimal>;

/// A single published rate. A value object with no behavior of its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RatePoint {
	date: Date,
	rate: Decimal,
}

impl RatePoint {
	pub fn new(date: Date, rate: Decimal) -> Self {
		Self { date, rate }
	}

	pub fn date(&self) -> Date {
		self.date
	}

	pub fn rate(&self) -> Decimal {
		self.rate
	}
}

/// Rates for one currency pair over one date range, ascending by date. Built
/// fresh from every fetch and never updated in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RateSeries {
	points: Vec<RatePoint>,
}

impl RateSeries {
	pub fn points(&self) -> &[RatePoint] {
		&self.points
	}

	pub fn len(&self) -> usize {
		self.points.len()
	}

	pub fn is_empty(&self) -> bool {
		self.points.is_empty()
	}

	/// Earliest and latest date in the series
	pub fn date_extent(&self) -> Option<(Date, Date)> {
		match (self.points.first(), self.points.last()) {
			(Some(first), Some(last)) => Some((first.date, last.date)),
			_ => None,
		}
	}

	/// Lowest and highest rate in the series
	pub fn rate_extent(&self) -> Option<(Decimal, Decimal)> {
		let mut rates = self.points.iter().map(|p| p.rate);
		let first = rates.next()?;
		Some(rates.fold((first, first), |(lo, hi), r| (lo.min(r), hi.max(r))))
	}
}

/// Turns a fetched history into an ordered series. Pure; the same history
/// always yields the same series.
pub fn build_series(raw: &History) -> RateSeries {
	// BTreeMap iterates in ascending key order
	RateSeries {
		points: raw
			.iter()
			.map(|(date, rate)| RatePoint::new(*date, *rate))
			.collect(),
	}
}
