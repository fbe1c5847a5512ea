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
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// -------------
// -- SENDING --
// -------------

#[derive(Debug, Serialize)]
pub struct LatestParams {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub base: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HistoryParams {
	pub start_at: String,
	pub end_at: String,
	pub base: String,
	pub symbols: String,
}

// ---------------
// -- RECEIVING --
// ---------------

/// Body of the "latest" endpoint. The base currency itself is not listed
/// among the rates.
#[derive(Debug, Deserialize)]
pub struct LatestHolder {
	pub base: String,
	pub date: String,
	pub rates: BTreeMap<String, f64>,
}

/// Body of the "history" endpoint, keyed by ISO date and then by currency.
/// The endpoint also echoes base, start_at and end_at, which we ignore.
#[derive(Debug, Deserialize)]
pub struct HistoryHolder {
	pub rates: BTreeMap<String, BTreeMap<String, f64>>,
}
