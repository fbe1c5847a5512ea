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
use crate::app::controller::{
	AppController, ControllerOptions, ConversionForm, Event,
};
use crate::app::shell;
use crate::app::surface::TerminalSurface;
use crate::app::time_range::TimeRange;
use crate::config::config_file::Config;
use crate::config::filesystem::get_config;
use crate::fetch::rate_fetcher::{RateFetcher, RateSource};
use crate::rates::conversion::parse_amount;
use crate::rates::currency::{CurrencyCode, CurrencyPair};
use crate::rates::series::build_series;
use crate::reports::rate_reporter::RateReporter;
use crate::util::date::Date;
use anyhow::{bail, Error};
use clap::{Parser, ValueEnum};
use env_logger::Env;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;

mod app;
mod chart;
mod config;
mod fetch;
mod rates;
mod reports;
mod util;

#[derive(Parser)]
#[command(
	name = "ratechart",
	version,
	about = "Exchange rate charts and currency conversion"
)]
struct Cli {
	// ----------------
	// -- POSITIONAL --
	// ----------------
	/// The command to execute
	command: Directive,

	/// The amount for the Convert command
	#[arg(required = false)]
	amount: Option<String>,

	// -----------
	// -- FLAGS --
	// -----------
	/// Currency to convert from (default: AUD)
	#[arg(short, long)]
	base: Option<String>,

	/// Currency to convert to (default: USD)
	#[arg(short, long)]
	target: Option<String>,

	/// Conversion date, YYYY-MM-DD (default: latest published date)
	#[arg(short, long)]
	date: Option<String>,

	/// Chart range: today, oneMonth, threeMonths, sixMonths or oneYear
	#[arg(short, long)]
	range: Option<String>,

	/// Write charts to this file instead of stdout
	#[arg(short, long)]
	output: Option<String>,

	/// Root of the exchange rate service
	#[arg(long)]
	api_url: Option<String>,

	/// Custom config file location (default: ~/.config/ratechart/config.toml)
	#[arg(long)]
	config: Option<String>,

	/// Chart width in pixels
	#[arg(long)]
	width: Option<u32>,

	/// Chart height in pixels
	#[arg(long)]
	height: Option<u32>,
}

impl Cli {
	/// Below this the axis margins leave no room to plot anything
	const MIN_CHART_SIZE: u32 = 100;
	const MAX_CHART_SIZE: u32 = 10_000;

	/// Extra validations on top of what clap does
	fn validate(&self) -> Result<(), Error> {
		for (name, size) in [("width", self.width), ("height", self.height)] {
			if let Some(size) = size {
				if !(Cli::MIN_CHART_SIZE..=Cli::MAX_CHART_SIZE).contains(&size)
				{
					bail!(
						"Chart {} must be between {} and {}",
						name,
						Cli::MIN_CHART_SIZE,
						Cli::MAX_CHART_SIZE
					);
				}
			}
		}

		if self.command == Directive::Convert && self.amount.is_none() {
			bail!("No amount specified");
		}

		Ok(())
	}
}

#[derive(ValueEnum, Clone, PartialEq)]
enum Directive {
	Currencies, // every currency the service offers
	Latest,     // most recent rates against the base

	History, // table of rates over a range
	Chart,   // chart of rates over a range

	Convert, // convert an amount on a date

	Shell, // interactive session
}

fn main() -> Result<(), Error> {
	env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
		.init();

	let args = Cli::parse();
	args.validate()?;

	let config = get_config(args.config.as_ref())?;
	let api_url = args.api_url.clone().unwrap_or_else(|| config.api_url());
	let fetcher = RateFetcher::new(&api_url);

	let range = match &args.range {
		Some(r) => TimeRange::from_str(r)?,
		None => TimeRange::default(),
	};

	match args.command {
		Directive::Currencies => {
			let latest = fetcher.fetch_latest()?;
			print!("{}", RateReporter::currencies(&latest.currencies()));
		},
		Directive::Latest => {
			let base = selected_base(&args, &config)?;
			let latest = fetcher.fetch_latest_in(Some(&base))?;
			print!("{}", RateReporter::latest(&latest));
		},
		Directive::History => {
			let pair = selected_pair(&args, &config)?;
			let (start, end) = range.window(Date::today());
			let history =
				fetcher.fetch_history(&start, &end, &pair.base, &pair.target)?;
			print!("{}", RateReporter::series(&pair, &build_series(&history)));
		},
		Directive::Chart => {
			let pair = selected_pair(&args, &config)?;
			let surface = TerminalSurface::new(chart_path(&args), false);
			let mut app =
				start_app(fetcher, surface, &args, &config, pair, false)?;
			app.handle(Event::TimeRange(range))?;
		},
		Directive::Convert => {
			let pair = selected_pair(&args, &config)?;
			let amount =
				parse_amount(args.amount.as_deref().unwrap_or_default())?;

			// a redraw only makes sense when the chart has somewhere to go
			let redraw = args.output.is_some() && config.redraw_after_convert();
			let surface = TerminalSurface::new(chart_path(&args), false);
			let mut app =
				start_app(fetcher, surface, &args, &config, pair, redraw)?;

			if let Some(date) = &args.date {
				app.handle(Event::SelectDate(Date::from_str(date)?))?;
			}
			let form = ConversionForm::from_selection(amount, app.selection())?;
			app.handle(Event::Submit(form))?;
		},
		Directive::Shell => {
			let pair = selected_pair(&args, &config)?;
			let path =
				chart_path(&args).unwrap_or(PathBuf::from("chart.svg"));
			let surface = TerminalSurface::new(Some(path), true);
			let redraw = config.redraw_after_convert();
			let mut app =
				start_app(fetcher, surface, &args, &config, pair, redraw)?;

			shell::run(io::stdin().lock(), &mut app)?;
		},
	}

	Ok(())
}

/// Builds the controller, loads the currency list and selects the pair,
/// which also checks that the service knows both currencies.
fn start_app(
	fetcher: RateFetcher,
	surface: TerminalSurface,
	args: &Cli,
	config: &Config,
	pair: CurrencyPair,
	redraw_after_convert: bool,
) -> Result<AppController<RateFetcher, TerminalSurface>, Error> {
	let (width, height) = config.chart_size();

	let mut app = AppController::new(
		fetcher,
		surface,
		ControllerOptions {
			today: Date::today(),
			base: pair.base.clone(),
			exchange: pair.target.clone(),
			width: args.width.unwrap_or(width) as f64,
			height: args.height.unwrap_or(height) as f64,
			redraw_after_convert,
		},
	);

	app.load()?;
	app.handle(Event::SelectBase(pair.base))?;
	app.handle(Event::SelectExchange(pair.target))?;

	Ok(app)
}

/// The base from the flags, falling back to the config
fn selected_base(args: &Cli, config: &Config) -> Result<CurrencyCode, Error> {
	let base = args.base.clone().unwrap_or_else(|| config.base());
	Ok(CurrencyCode::from_str(&base)?)
}

fn selected_pair(args: &Cli, config: &Config) -> Result<CurrencyPair, Error> {
	let target = args.target.clone().unwrap_or_else(|| config.target());
	Ok(CurrencyPair::new(
		selected_base(args, config)?,
		CurrencyCode::from_str(&target)?,
	))
}

fn chart_path(args: &Cli) -> Option<PathBuf> {
	args.output.as_ref().map(PathBuf::from)
}
