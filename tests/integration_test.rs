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
use chrono::{Local, Months};
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::process::{Command, Output, Stdio};
use std::sync::{Arc, Mutex};
use std::thread;
use tempfile::tempdir;

/// A stand-in for the rate service. Answers "latest" and "history" from the
/// files in tests/test_data and remembers every request line it saw.
struct FakeService {
	url: String,
	requests: Arc<Mutex<Vec<String>>>,
}

impl FakeService {
	fn start() -> Self {
		let listener = TcpListener::bind("127.0.0.1:0").unwrap();
		let url = format!("http://{}", listener.local_addr().unwrap());
		let requests = Arc::new(Mutex::new(Vec::new()));

		let seen = Arc::clone(&requests);
		thread::spawn(move || {
			for stream in listener.incoming().flatten() {
				serve(stream, &seen);
			}
		});

		FakeService { url, requests }
	}

	fn requests(&self) -> Vec<String> {
		self.requests.lock().unwrap().clone()
	}
}

fn serve(mut stream: TcpStream, seen: &Mutex<Vec<String>>) {
	let mut reader = BufReader::new(stream.try_clone().unwrap());

	let mut request_line = String::new();
	reader.read_line(&mut request_line).unwrap();
	// drain the headers; these requests never carry a body
	let mut header = String::new();
	while reader.read_line(&mut header).unwrap_or(0) > 2 {
		header.clear();
	}

	let target = request_line
		.split_whitespace()
		.nth(1)
		.unwrap_or_default()
		.to_string();
	seen.lock().unwrap().push(target.clone());

	let (status, body) = respond(&target);
	let response = format!(
		"HTTP/1.1 {}\r\nContent-Type: application/json\r\n\
		 Content-Length: {}\r\nConnection: close\r\n\r\n{}",
		status,
		body.len(),
		body
	);
	let _ = stream.write_all(response.as_bytes());
}

fn respond(target: &str) -> (&'static str, String) {
	let (path, query) = target.split_once('?').unwrap_or((target, ""));

	match path {
		"/latest" => ("200 OK", read_data("latest.json")),
		"/history" => {
			let start = query_param(query, "start_at");
			let end = query_param(query, "end_at");

			// a single day comes back on its own, or with no rates at all
			// when nothing was published that day
			if start.is_some() && start == end {
				let day = start.unwrap_or_default();
				let mut body: Value =
					serde_json::from_str(&read_data("history.json")).unwrap();
				let rates = body["rates"].get(&day).cloned();
				body["rates"] = match rates {
					Some(quotes) => serde_json::json!({ day: quotes }),
					None => serde_json::json!({}),
				};
				("200 OK", body.to_string())
			} else {
				("200 OK", read_data("history.json"))
			}
		},
		_ => ("404 Not Found", "{\"error\":\"not found\"}".to_string()),
	}
}

fn query_param(query: &str, name: &str) -> Option<String> {
	query
		.split('&')
		.filter_map(|pair| pair.split_once('='))
		.find(|(key, _)| *key == name)
		.map(|(_, value)| value.to_string())
}

fn read_data(file: &str) -> String {
	fs::read_to_string(format!("tests/test_data/{}", file)).unwrap()
}

fn ratechart(url: &str, args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_ratechart"))
		.args(args)
		.args(["--api-url", url])
		.env("RUST_LOG", "off")
		.output()
		.expect("Failed to execute command")
}

fn stdout_of(output: &Output) -> String {
	String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr_of(output: &Output) -> String {
	String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_currencies() {
	let service = FakeService::start();
	let output = ratechart(&service.url, &["currencies"]);

	assert!(output.status.success(), "{}", stderr_of(&output));
	assert_eq!(stdout_of(&output).trim(), "AUD\nEUR\nGBP\nUSD");
}

#[test]
fn test_latest_lists_rates() {
	let service = FakeService::start();
	let output = ratechart(&service.url, &["latest", "-b", "EUR"]);

	assert!(output.status.success(), "{}", stderr_of(&output));
	let stdout = stdout_of(&output);
	assert!(stdout.contains("2021-01-08"));
	assert!(stdout.contains("1.5744"));
	assert!(service.requests().iter().any(|r| r == "/latest?base=EUR"));
}

#[test]
fn test_convert() {
	let service = FakeService::start();
	let output = ratechart(
		&service.url,
		&["convert", "100", "-b", "AUD", "-t", "USD", "-d", "2021-01-04"],
	);

	assert!(output.status.success(), "{}", stderr_of(&output));
	assert_eq!(stdout_of(&output).trim(), "76.91");

	let requests = service.requests();
	assert!(requests.iter().any(|r| {
		r.starts_with("/history?")
			&& r.contains("start_at=2021-01-04")
			&& r.contains("end_at=2021-01-04")
			&& r.contains("base=AUD")
			&& r.contains("symbols=USD")
	}));
}

#[test]
fn test_convert_with_grouping() {
	let service = FakeService::start();
	let output = ratechart(
		&service.url,
		&["convert", "1,000,000", "-b", "AUD", "-t", "USD", "-d", "2021-01-08"],
	);

	assert!(output.status.success(), "{}", stderr_of(&output));
	assert_eq!(stdout_of(&output).trim(), "778,000");
}

#[test]
fn test_convert_on_unpublished_day() {
	let service = FakeService::start();
	let output = ratechart(
		&service.url,
		&["convert", "100", "-b", "AUD", "-t", "USD", "-d", "2021-01-09"],
	);

	assert!(!output.status.success());
	assert!(stdout_of(&output).is_empty());
	assert!(stderr_of(&output).contains("no AUD/USD rate published"));
}

#[test]
fn test_convert_requires_amount() {
	let service = FakeService::start();
	let output = ratechart(&service.url, &["convert"]);

	assert!(!output.status.success());
	assert!(stderr_of(&output).contains("No amount specified"));
	assert!(service.requests().is_empty());
}

#[test]
fn test_unknown_currency() {
	let service = FakeService::start();
	let output = ratechart(&service.url, &["chart", "-t", "JPY"]);

	assert!(!output.status.success());
	assert!(stderr_of(&output).contains("JPY"));
}

#[test]
fn test_bad_default_currency_only_breaks_pair_commands() {
	let service = FakeService::start();
	let dir = tempdir().unwrap();
	let config = dir.path().join("config.toml");
	fs::write(&config, "[defaults]\nbase = \"not a code\"\n").unwrap();
	let config = config.to_str().unwrap();

	let output = ratechart(&service.url, &["currencies", "--config", config]);
	assert!(output.status.success(), "{}", stderr_of(&output));
	assert_eq!(stdout_of(&output).trim(), "AUD\nEUR\nGBP\nUSD");

	let output = ratechart(&service.url, &["chart", "--config", config]);
	assert!(!output.status.success());
	assert!(stderr_of(&output).contains("invalid currency code"));

	// a flag overrides the broken default
	let output = ratechart(
		&service.url,
		&["history", "-b", "AUD", "--config", config],
	);
	assert!(output.status.success(), "{}", stderr_of(&output));
}

#[test]
fn test_chart_to_file() {
	let service = FakeService::start();
	let dir = tempdir().unwrap();
	let path = dir.path().join("chart.svg");

	let output = ratechart(
		&service.url,
		&["chart", "-r", "oneMonth", "-o", path.to_str().unwrap()],
	);
	assert!(output.status.success(), "{}", stderr_of(&output));

	let svg = fs::read_to_string(&path).unwrap();
	assert!(svg.starts_with("<svg"));
	assert_eq!(svg.matches("class=\"dot\"").count(), 5);
	assert!(svg.contains("AUD / USD"));

	let today = Local::now().date_naive();
	let start = today.checked_sub_months(Months::new(1)).unwrap();
	let wanted = format!(
		"start_at={}&end_at={}",
		start.format("%Y-%m-%d"),
		today.format("%Y-%m-%d")
	);
	assert!(service.requests().iter().any(|r| r.contains(&wanted)));
}

#[test]
fn test_history_table() {
	let service = FakeService::start();
	let output = ratechart(&service.url, &["history", "-r", "3m"]);

	assert!(output.status.success(), "{}", stderr_of(&output));
	let stdout = stdout_of(&output);
	assert!(stdout.contains("2021-01-04"));
	assert!(stdout.contains("0.7755"));
}

#[test]
fn test_service_unreachable() {
	// bind then drop, leaving a port nothing listens on
	let url = {
		let listener = TcpListener::bind("127.0.0.1:0").unwrap();
		format!("http://{}", listener.local_addr().unwrap())
	};

	let output = ratechart(&url, &["currencies"]);
	assert!(!output.status.success());
	assert!(stdout_of(&output).is_empty());
}

#[test]
fn test_shell_session() {
	let service = FakeService::start();
	let dir = tempdir().unwrap();
	let path = dir.path().join("session.svg");

	let mut child = Command::new(env!("CARGO_BIN_EXE_ratechart"))
		.args(["shell", "--api-url", &service.url])
		.args(["-o", path.to_str().unwrap()])
		.env("RUST_LOG", "off")
		.stdin(Stdio::piped())
		.stdout(Stdio::piped())
		.stderr(Stdio::piped())
		.spawn()
		.expect("Failed to execute command");

	child
		.stdin
		.take()
		.unwrap()
		.write_all(
			b"# pick a day with a rate\n\
			  date 2021-01-05\n\
			  convert 10\n\
			  bogus\n\
			  range 6m\n\
			  quit\n\
			  convert 20\n",
		)
		.unwrap();

	let output = child.wait_with_output().unwrap();
	assert!(output.status.success(), "{}", stderr_of(&output));

	let stdout = stdout_of(&output);
	assert!(stdout.contains("Currencies: AUD EUR GBP USD"));
	assert!(stdout.contains("7.71"));
	// nothing after quit runs
	assert!(!stdout.contains("15.42"));
	assert!(fs::read_to_string(&path).unwrap().contains("class=\"dot\""));
}
