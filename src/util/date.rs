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
use chrono::{Datelike, Local, Months, NaiveDate};
use std::fmt;
use std::str::FromStr;

/// A calendar date as the exchange rate service reports it. Always displayed
/// in the fixed-width "YYYY-MM-DD" format, which is also how the service keys
/// its history responses.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Date(NaiveDate);

impl Date {
	/// The local calendar date right now
	pub fn today() -> Date {
		Date(Local::now().date_naive())
	}

	/// The same day of the month, the given number of months earlier. Days
	/// past the end of the earlier month clamp to its last day, so one month
	/// before March 31 is the last day of February.
	pub fn months_before(&self, months: u32) -> Date {
		self.0
			.checked_sub_months(Months::new(months))
			.map(Date)
			.unwrap_or(Date(NaiveDate::MIN))
	}

	/// Days since 0001-01-01; used to place dates on a continuous axis.
	pub fn ordinal(&self) -> i64 {
		self.0.num_days_from_ce() as i64
	}

	pub fn from_ordinal(days: i64) -> Option<Date> {
		i32::try_from(days)
			.ok()
			.and_then(NaiveDate::from_num_days_from_ce_opt)
			.map(Date)
	}

	/// Signed number of days from this date to the other
	pub fn days_until(&self, other: &Date) -> i64 {
		other.ordinal() - self.ordinal()
	}

	/// Short label for chart axes, e.g. "04 Jan"
	pub fn axis_label(&self) -> String {
		self.0.format("%d %b").to_string()
	}

	/// Label with a two-digit year for point details, e.g. "04 Jan 21"
	pub fn detail_label(&self) -> String {
		self.0.format("%d %b %y").to_string()
	}
}

impl FromStr for Date {
	type Err = FxError;

	/// Parses the "YYYY-MM-DD" format; single-digit months and days are
	/// tolerated for typed input.
	fn from_str(date_str: &str) -> Result<Date, FxError> {
		let trimmed = date_str.trim();
		let parts: Vec<&str> = trimmed.split('-').collect();
		if parts.len() != 3 {
			return Err(FxError::InvalidDate(format!(
				"{:?}: date format must be YYYY-MM-DD",
				date_str
			)));
		}

		NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
			.map(Date)
			.map_err(|e| FxError::InvalidDate(format!("{:?}: {}", date_str, e)))
	}
}

impl fmt::Display for Date {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0.format("%Y-%m-%d"))
	}
}
