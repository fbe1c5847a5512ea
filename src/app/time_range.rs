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
use crate::rates::error::FxError;
use crate::util::date::Date;
use std::fmt;
use std::str::FromStr;

/// How far back a history chart reaches. Each variant corresponds to one of
/// the time range buttons.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimeRange {
	Today,
	#[default]
	OneMonth,
	ThreeMonths,
	SixMonths,
	OneYear,
}

impl TimeRange {
	pub const ALL: [TimeRange; 5] = [
		TimeRange::Today,
		TimeRange::OneMonth,
		TimeRange::ThreeMonths,
		TimeRange::SixMonths,
		TimeRange::OneYear,
	];

	pub fn months(&self) -> u32 {
		match self {
			TimeRange::Today => 0,
			TimeRange::OneMonth => 1,
			TimeRange::ThreeMonths => 3,
			TimeRange::SixMonths => 6,
			TimeRange::OneYear => 12,
		}
	}

	/// The button id this range is selected by
	pub fn id(&self) -> &'static str {
		match self {
			TimeRange::Today => "today",
			TimeRange::OneMonth => "oneMonth",
			TimeRange::ThreeMonths => "threeMonths",
			TimeRange::SixMonths => "sixMonths",
			TimeRange::OneYear => "oneYear",
		}
	}

	/// Inclusive start and end dates of the range, ending on `today`
	pub fn window(&self, today: Date) -> (Date, Date) {
		(today.months_before(self.months()), today)
	}
}

impl FromStr for TimeRange {
	type Err = FxError;

	/// Accepts button ids in any case, plus the short forms 1d, 1m, 3m, 6m
	/// and 1y.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let wanted = s.trim().to_ascii_lowercase();
		let short = match wanted.as_str() {
			"1d" => Some(TimeRange::Today),
			"1m" => Some(TimeRange::OneMonth),
			"3m" => Some(TimeRange::ThreeMonths),
			"6m" => Some(TimeRange::SixMonths),
			"1y" | "12m" => Some(TimeRange::OneYear),
			_ => None,
		};

		short
			.or_else(|| {
				TimeRange::ALL
					.into_iter()
					.find(|r| r.id().to_ascii_lowercase() == wanted)
			})
			.ok_or_else(|| FxError::InvalidRange(s.to_string()))
	}
}

impl fmt::Display for TimeRange {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.id())
	}
}
