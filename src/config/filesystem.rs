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
use crate::config::config_file::Config;
use anyhow::{anyhow, Error};
use dirs::home_dir;
use log::debug;
use std::fs;
use std::path::PathBuf;

/// Where the config lives unless told otherwise
pub fn default_config_path() -> Option<PathBuf> {
	home_dir().map(|home| home.join(".config/ratechart/config.toml"))
}

/// Fetches the config from the given path, or the default path if none.
///
/// A missing default file simply means defaults; a custom path that does
/// not exist is an error, since the user asked for it explicitly.
pub fn get_config(
	custom_config_path: Option<&String>,
) -> Result<Config, Error> {
	let config_path = match custom_config_path {
		Some(p) => PathBuf::from(p),
		None => match default_config_path() {
			Some(p) if p.exists() => p,
			_ => {
				debug!("no config file, using defaults");
				return Ok(Config::default());
			},
		},
	};

	let content = fs::read_to_string(&config_path).map_err(|e| {
		anyhow!("failed to read config {}: {}", config_path.display(), e)
	})?;

	debug!("loaded config from {}", config_path.display());
	toml::from_str(&content)
		.map_err(|e| anyhow!("failed to parse config: {}", e))
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;
	use tempfile::NamedTempFile;

	#[test]
	fn test_custom_config() {
		let mut file = NamedTempFile::new().unwrap();
		writeln!(file, "[defaults]\nbase = \"NZD\"").unwrap();

		let path = file.path().to_string_lossy().to_string();
		let config = get_config(Some(&path)).unwrap();
		assert_eq!(config.base(), "NZD");
	}

	#[test]
	fn test_missing_custom_config() {
		let path = "/nonexistent/ratechart/config.toml".to_string();
		assert!(get_config(Some(&path)).is_err());
	}

	#[test]
	fn test_malformed_config() {
		let mut file = NamedTempFile::new().unwrap();
		writeln!(file, "[defaults\nbase = ").unwrap();

		let path = file.path().to_string_lossy().to_string();
		let err = get_config(Some(&path)).unwrap_err();
		assert!(err.to_string().starts_with("failed to parse config"));
	}
}
