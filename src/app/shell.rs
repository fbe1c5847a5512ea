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
use crate::app::controller::{AppController, ConversionForm, Event};
use crate::app::surface::Surface;
use crate::app::time_range::TimeRange;
use crate::fetch::rate_fetcher::RateSource;
use crate::rates::conversion::parse_amount;
use crate::rates::currency::CurrencyCode;
use crate::rates::error::FxError;
use crate::util::date::Date;
use log::error;
use regex::Regex;
use rust_decimal::Decimal;
use std::io::BufRead;
use std::str::FromStr;
use std::sync::LazyLock;

static LINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^\s*([A-Za-z]+)(?:\s+(.+?))?\s*$").expect("valid pattern")
});

pub const HELP: &str = "\
base <code>       pick the currency to convert from
target <code>     pick the currency to convert to
date <YYYY-MM-DD> pick the conversion date
range <range>     chart today, oneMonth, threeMonths, sixMonths or oneYear
convert <amount>  convert on the selected date
help              show this text
quit              leave";

/// One line of shell input.
#[derive(Debug, PartialEq)]
pub enum Command {
	Event(Event),
	Convert(Decimal),
	Help,
	Quit,
}

/// Parses one line; blank lines and `#` comments yield nothing.
pub fn parse_line(line: &str) -> Result<Option<Command>, FxError> {
	let line = line.trim();
	if line.is_empty() || line.starts_with('#') {
		return Ok(None);
	}

	let captures = LINE_PATTERN
		.captures(line)
		.ok_or_else(|| FxError::UnknownCommand(line.to_string()))?;
	let verb = captures[1].to_ascii_lowercase();
	let arg = captures.get(2).map(|m| m.as_str());

	let command = match (verb.as_str(), arg) {
		("base", Some(code)) => {
			Command::Event(Event::SelectBase(CurrencyCode::from_str(code)?))
		},
		("target" | "exchange", Some(code)) => Command::Event(
			Event::SelectExchange(CurrencyCode::from_str(code)?),
		),
		("date", Some(date)) => {
			Command::Event(Event::SelectDate(Date::from_str(date)?))
		},
		("range", Some(range)) => {
			Command::Event(Event::TimeRange(TimeRange::from_str(range)?))
		},
		("convert", Some(amount)) => Command::Convert(parse_amount(amount)?),
		("help", None) => Command::Help,
		("quit" | "exit", None) => Command::Quit,
		_ => return Err(FxError::UnknownCommand(line.to_string())),
	};

	Ok(Some(command))
}

/// Feeds commands from the input to the controller until the input ends or
/// the user quits. Bad commands and failed events are logged and skipped.
pub fn run<R, S, U>(
	input: R,
	app: &mut AppController<S, U>,
) -> Result<(), FxError>
where
	R: BufRead,
	S: RateSource,
	U: Surface,
{
	for line in input.lines() {
		let command = match parse_line(&line?) {
			Ok(Some(command)) => command,
			Ok(None) => continue,
			Err(e) => {
				error!("{}", e);
				continue;
			},
		};

		match command {
			Command::Quit => break,
			Command::Help => println!("{}", HELP),
			// the controller logs its own failures
			Command::Event(event) => {
				let _ = app.handle(event);
			},
			Command::Convert(amount) => {
				match ConversionForm::from_selection(amount, app.selection()) {
					Ok(form) => {
						let _ = app.handle(Event::Submit(form));
					},
					Err(e) => error!("{}", e),
				}
			},
		}
	}

	Ok(())
}
