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
use crate::rates::currency::CurrencyPair;
use crate::rates::error::FxError;
use crate::rates::series::History;
use crate::util::date::Date;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Decimal places of a converted amount
pub const AMOUNT_PRECISION: u32 = 2;

/// Multiplies an amount by a rate, rounding half away from zero to two
/// decimal places.
pub fn convert(rate: Decimal, amount: Decimal) -> Result<Decimal, FxError> {
	rate.checked_mul(amount)
		.map(|value| {
			value.round_dp_with_strategy(
				AMOUNT_PRECISION,
				RoundingStrategy::MidpointAwayFromZero,
			)
		})
		.ok_or_else(|| {
			FxError::InvalidAmount(format!(
				"{} is too large to convert",
				amount
			))
		})
}

/// Looks up the rate published on exactly the given date. No fallback to
/// earlier dates is attempted.
pub fn rate_on(
	history: &History,
	pair: &CurrencyPair,
	date: &Date,
) -> Result<Decimal, FxError> {
	history
		.get(date)
		.copied()
		.ok_or_else(|| FxError::RateUnavailable {
			date: *date,
			base: pair.base.clone(),
			target: pair.target.clone(),
		})
}

pub fn convert_on(
	history: &History,
	pair: &CurrencyPair,
	date: &Date,
	amount: Decimal,
) -> Result<Decimal, FxError> {
	convert(rate_on(history, pair, date)?, amount)
}

/// Parses a user-entered amount. Grouping commas are ignored; negative
/// amounts are rejected.
pub fn parse_amount(input: &str) -> Result<Decimal, FxError> {
	let cleaned: String =
		input.trim().chars().filter(|c| *c != ',').collect();

	let amount = Decimal::from_str(&cleaned)
		.map_err(|e| FxError::InvalidAmount(format!("{:?}: {}", input, e)))?;

	if amount.is_sign_negative() && !amount.is_zero() {
		return Err(FxError::InvalidAmount(format!(
			"{:?}: must not be negative",
			input
		)));
	}

	Ok(amount)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rust_decimal_macros::dec;

	fn pair() -> CurrencyPair {
		CurrencyPair::new("AUD".parse().unwrap(), "USD".parse().unwrap())
	}

	fn date(s: &str) -> Date {
		Date::from_str(s).unwrap()
	}

	#[test]
	fn test_convert_rounds_to_cents() {
		assert_eq!(convert(dec!(1.3456), dec!(100)).unwrap(), dec!(134.56));
		assert_eq!(convert(dec!(0.7691), dec!(12.5)).unwrap(), dec!(9.61));
		assert_eq!(convert(dec!(1.5), dec!(0.01)).unwrap(), dec!(0.02));
		assert_eq!(convert(dec!(1.2345), dec!(0)).unwrap(), dec!(0));
	}

	#[test]
	fn test_convert_overflow() {
		assert!(matches!(
			convert(Decimal::MAX, dec!(10)),
			Err(FxError::InvalidAmount(_))
		));
	}

	#[test]
	fn test_convert_on_published_date() {
		let history: History =
			[(date("2021-01-04"), dec!(0.7691))].into_iter().collect();

		let value =
			convert_on(&history, &pair(), &date("2021-01-04"), dec!(100));
		assert_eq!(value.unwrap(), dec!(76.91));
	}

	#[test]
	fn test_convert_on_missing_date() {
		let history: History =
			[(date("2021-01-08"), dec!(0.7780))].into_iter().collect();

		match convert_on(&history, &pair(), &date("2021-01-09"), dec!(100)) {
			Err(FxError::RateUnavailable { date: d, base, target }) => {
				assert_eq!(d, date("2021-01-09"));
				assert_eq!(base.as_str(), "AUD");
				assert_eq!(target.as_str(), "USD");
			},
			other => panic!("expected RateUnavailable, got {:?}", other),
		}
	}

	#[test]
	fn test_parse_amount() {
		assert_eq!(parse_amount("100").unwrap(), dec!(100));
		assert_eq!(parse_amount(" 1,250.75 ").unwrap(), dec!(1250.75));
		assert_eq!(parse_amount("0").unwrap(), dec!(0));
		assert!(parse_amount("-5").is_err());
		assert!(parse_amount("ten").is_err());
		assert!(parse_amount("").is_err());
	}
}
