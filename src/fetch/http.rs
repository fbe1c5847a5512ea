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
use log::debug;
use reqwest::Method;
use serde::{Deserialize, Serialize};

pub struct Client {
	client: reqwest::blocking::Client,
	base_url: String,
}

impl Client {
	pub fn new(base_url: &str) -> Self {
		Client {
			client: reqwest::blocking::Client::new(),
			base_url: base_url.trim_end_matches('/').to_string(),
		}
	}

	/// Sends a GET and decodes the JSON body. Transport failures and non-2xx
	/// response codes are network errors; a body that does not decode into
	/// `R` is a parse error.
	pub fn get<Q, R>(
		&self,
		endpoint: &str,
		query_params: Option<Q>,
	) -> Result<R, FxError>
	where
		Q: Serialize,
		R: for<'de> Deserialize<'de>,
	{
		let url = format!("{}/{}", self.base_url, endpoint);

		let mut request = self.client.request(Method::GET, &url);

		if let Some(query_params) = query_params {
			request = request.query(&query_params);
		}

		debug!("Sending GET to {}", url);
		let response = request
			.send()
			.map_err(|e| FxError::Network(format!("{}: {}", url, e)))?;

		// Handle non-2xx response codes
		if !response.status().is_success() {
			return Err(FxError::Network(format!(
				"request to {} failed with status: {}",
				url,
				response.status()
			)));
		}

		let body = response
			.text()
			.map_err(|e| FxError::Network(format!("{}: {}", url, e)))?;

		serde_json::from_str(&body)
			.map_err(|e| FxError::Parse(format!("{}: {}", endpoint, e)))
	}
}
