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
use crate::rates::currency::{CurrencyCode, CurrencyPair};
use crate::util::date::Date;

/// What the user currently has selected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
	pub base: CurrencyCode,
	pub exchange: CurrencyCode,

	/// Unset until the latest rates are loaded or the user picks one
	pub date: Option<Date>,
}

impl Selection {
	pub fn pair(&self) -> CurrencyPair {
		CurrencyPair::new(self.base.clone(), self.exchange.clone())
	}
}

/// The selection plus a version that increases on every change, and a
/// second one that increases only when the currency pair changes.
///
/// Work that outlives a single event (a network fetch) takes a [Ticket]
/// when it starts, and checks it with [SelectionState::is_current] or
/// [SelectionState::is_pair_current] before touching the display, so results
/// for an outdated selection are dropped.
#[derive(Debug)]
pub struct SelectionState {
	current: Selection,
	version: u64,
	pair_version: u64,
}

/// A copy of the selection as it was when some piece of work began.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ticket {
	version: u64,
	pair_version: u64,
	pub selection: Selection,
}

impl SelectionState {
	pub fn new(base: CurrencyCode, exchange: CurrencyCode) -> Self {
		Self {
			current: Selection {
				base,
				exchange,
				date: None,
			},
			version: 0,
			pair_version: 0,
		}
	}

	pub fn current(&self) -> &Selection {
		&self.current
	}

	pub fn set_base(&mut self, base: CurrencyCode) {
		self.current.base = base;
		self.version += 1;
		self.pair_version += 1;
	}

	pub fn set_exchange(&mut self, exchange: CurrencyCode) {
		self.current.exchange = exchange;
		self.version += 1;
		self.pair_version += 1;
	}

	pub fn set_date(&mut self, date: Date) {
		self.current.date = Some(date);
		self.version += 1;
	}

	pub fn snapshot(&self) -> Ticket {
		Ticket {
			version: self.version,
			pair_version: self.pair_version,
			selection: self.current.clone(),
		}
	}

	/// Whether nothing has changed since the ticket was taken
	pub fn is_current(&self, ticket: &Ticket) -> bool {
		ticket.version == self.version
	}

	/// Whether the currency pair is unchanged since the ticket was taken;
	/// enough for work that does not depend on the date
	pub fn is_pair_current(&self, ticket: &Ticket) -> bool {
		ticket.pair_version == self.pair_version
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::str::FromStr;

	fn code(s: &str) -> CurrencyCode {
		CurrencyCode::from_str(s).unwrap()
	}

	#[test]
	fn test_every_change_bumps_version() {
		let mut state = SelectionState::new(code("AUD"), code("USD"));

		let ticket = state.snapshot();
		state.set_base(code("EUR"));
		assert!(!state.is_current(&ticket));

		let ticket = state.snapshot();
		state.set_exchange(code("GBP"));
		assert!(!state.is_current(&ticket));

		let ticket = state.snapshot();
		state.set_date(Date::from_str("2021-01-04").unwrap());
		assert!(!state.is_current(&ticket));

		assert_eq!(state.version, 3);
		assert_eq!(state.current().base, code("EUR"));
		assert_eq!(state.current().pair().to_string(), "EUR / GBP");
	}

	#[test]
	fn test_ticket_goes_stale() {
		let mut state = SelectionState::new(code("AUD"), code("USD"));
		let ticket = state.snapshot();
		assert!(state.is_current(&ticket));

		state.set_exchange(code("JPY"));
		assert!(!state.is_current(&ticket));

		// the ticket still remembers what was asked for
		assert_eq!(ticket.selection.exchange, code("USD"));
	}

	#[test]
	fn test_date_change_keeps_pair_current() {
		let mut state = SelectionState::new(code("AUD"), code("USD"));
		let ticket = state.snapshot();

		state.set_date(Date::from_str("2021-01-04").unwrap());
		assert!(!state.is_current(&ticket));
		assert!(state.is_pair_current(&ticket));

		state.set_base(code("EUR"));
		assert!(!state.is_pair_current(&ticket));
	}
}
