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
use crate::fetch::http::Client;
use crate::fetch::models::{
	HistoryHolder, HistoryParams, LatestHolder, LatestParams,
};
use crate::rates::currency::CurrencyCode;
use crate::rates::error::FxError;
use crate::rates::series::History;
use crate::util::date::Date;
use log::info;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::str::FromStr;

pub const DEFAULT_API_URL: &str = "https://api.exchangeratesapi.io";

/// Anything that can answer the two questions the app asks of an exchange
/// rate service.
pub trait RateSource {
	/// Most recent published rates, relative to the service's default base
	fn fetch_latest(&self) -> Result<LatestRates, FxError>;

	/// Rates of one target currency against a base, for every published
	/// date in the inclusive range
	fn fetch_history(
		&self,
		start: &Date,
		end: &Date,
		base: &CurrencyCode,
		target: &CurrencyCode,
	) -> Result<History, FxError>;
}

/// The most recent set of rates published by the service.
#[derive(Clone, Debug, PartialEq)]
pub struct LatestRates {
	pub base: CurrencyCode,
	pub date: Date,
	pub rates: BTreeMap<CurrencyCode, Decimal>,
}

impl LatestRates {
	/// Every currency the service knows about: the base plus everything it
	/// is quoted against, sorted and without duplicates.
	pub fn currencies(&self) -> Vec<CurrencyCode> {
		let mut out: Vec<CurrencyCode> = self.rates.keys().cloned().collect();
		out.push(self.base.clone());
		out.sort();
		out.dedup();
		out
	}
}

impl TryFrom<LatestHolder> for LatestRates {
	type Error = FxError;

	fn try_from(holder: LatestHolder) -> Result<Self, Self::Error> {
		let base = parse_code(&holder.base)?;
		let date = parse_date(&holder.date)?;

		let mut rates = BTreeMap::new();
		for (code, rate) in holder.rates {
			let code = parse_code(&code)?;
			let rate = parse_rate(rate, &code, &date)?;
			rates.insert(code, rate);
		}

		Ok(LatestRates { base, date, rates })
	}
}

/// Pulls a single target currency out of a history response. A day that
/// does not quote the target means the response is not what we asked for.
pub fn history_from_wire(
	holder: HistoryHolder,
	target: &CurrencyCode,
) -> Result<History, FxError> {
	let mut history = History::new();

	for (day, quotes) in holder.rates {
		let date = parse_date(&day)?;
		let rate = quotes.get(target.as_str()).ok_or_else(|| {
			FxError::Parse(format!("no {} quote on {}", target, date))
		})?;
		history.insert(date, parse_rate(*rate, target, &date)?);
	}

	Ok(history)
}

/// The HTTP implementation of [RateSource]. Read-only; no retries.
pub struct RateFetcher {
	http: Client,
}

impl RateFetcher {
	pub fn new(api_url: &str) -> Self {
		RateFetcher {
			http: Client::new(api_url),
		}
	}

	/// Latest rates, optionally quoted against a specific base
	pub fn fetch_latest_in(
		&self,
		base: Option<&CurrencyCode>,
	) -> Result<LatestRates, FxError> {
		let holder: LatestHolder = self.http.get(
			"latest",
			Some(LatestParams {
				base: base.map(|b| b.to_string()),
			}),
		)?;

		let latest = LatestRates::try_from(holder)?;
		info!(
			"latest rates for {} on {}: {} currencies",
			latest.base,
			latest.date,
			latest.rates.len()
		);
		Ok(latest)
	}
}

impl RateSource for RateFetcher {
	fn fetch_latest(&self) -> Result<LatestRates, FxError> {
		self.fetch_latest_in(None)
	}

	fn fetch_history(
		&self,
		start: &Date,
		end: &Date,
		base: &CurrencyCode,
		target: &CurrencyCode,
	) -> Result<History, FxError> {
		let holder: HistoryHolder = self.http.get(
			"history",
			Some(HistoryParams {
				start_at: start.to_string(),
				end_at: end.to_string(),
				base: base.to_string(),
				symbols: target.to_string(),
			}),
		)?;

		let history = history_from_wire(holder, target)?;
		info!(
			"{} {}/{} rates between {} and {}",
			history.len(),
			base,
			target,
			start,
			end
		);
		Ok(history)
	}
}

fn parse_code(code: &str) -> Result<CurrencyCode, FxError> {
	CurrencyCode::from_str(code)
		.map_err(|_| FxError::Parse(format!("bad currency code {:?}", code)))
}

fn parse_date(date: &str) -> Result<Date, FxError> {
	Date::from_str(date)
		.map_err(|_| FxError::Parse(format!("bad date {:?}", date)))
}

/// Rates arrive as JSON numbers. Going through the shortest decimal
/// rendering of the float keeps e.g. 1.3456 exact.
fn parse_rate(
	rate: f64,
	code: &CurrencyCode,
	date: &Date,
) -> Result<Decimal, FxError> {
	if !rate.is_finite() || rate <= 0.0 {
		return Err(FxError::Parse(format!(
			"non-positive {} rate {} on {}",
			code, rate, date
		)));
	}

	Decimal::from_str(&rate.to_string()).map_err(|e| {
		FxError::Parse(format!("{} rate {} on {}: {}", code, rate, date, e))
	})
}
