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
use crate::rates::currency::CurrencyCode;
use crate::util::date::Date;
use thiserror::Error;

/// Everything that can go wrong between the exchange rate service and the
/// screen. None of these are fatal; callers log them and keep whatever was
/// displayed before.
#[derive(Debug, Error)]
pub enum FxError {
	/// Transport failure or a non-2xx response
	#[error("network error: {0}")]
	Network(String),

	/// The body was not JSON of the expected shape, or held invalid values
	#[error("unexpected response: {0}")]
	Parse(String),

	/// Weekends and holidays commonly have no published rate
	#[error("no {base}/{target} rate published for {date}")]
	RateUnavailable {
		date: Date,
		base: CurrencyCode,
		target: CurrencyCode,
	},

	#[error("invalid currency code: {0:?}")]
	InvalidCurrency(String),

	/// Well-formed, but not offered by the service
	#[error("unknown currency: {0}")]
	UnknownCurrency(CurrencyCode),

	#[error("invalid date: {0}")]
	InvalidDate(String),

	#[error("unknown time range: {0:?}")]
	InvalidRange(String),

	#[error("invalid amount: {0}")]
	InvalidAmount(String),

	#[error("unknown command: {0:?}")]
	UnknownCommand(String),

	#[error("i/o error: {0}")]
	Io(#[from] std::io::Error),
}
