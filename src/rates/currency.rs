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
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static CODE_PATTERN: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[A-Z]{3}$").expect("valid pattern"));

/// An ISO 4217 style currency symbol, always three uppercase letters.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CurrencyCode(String);

impl CurrencyCode {
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl FromStr for CurrencyCode {
	type Err = FxError;

	/// Accepts any case and surrounding whitespace, as typed by a user
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let normalized = s.trim().to_ascii_uppercase();
		if !CODE_PATTERN.is_match(&normalized) {
			return Err(FxError::InvalidCurrency(s.to_string()));
		}
		Ok(CurrencyCode(normalized))
	}
}

impl fmt::Display for CurrencyCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// The currency being converted from and the one being converted to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrencyPair {
	pub base: CurrencyCode,
	pub target: CurrencyCode,
}

impl CurrencyPair {
	pub fn new(base: CurrencyCode, target: CurrencyCode) -> Self {
		Self { base, target }
	}
}

impl fmt::Display for CurrencyPair {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} / {}", self.base, self.target)
	}
}
