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
use crate::app::selection::{Selection, SelectionState, Ticket};
use crate::app::surface::Surface;
use crate::app::time_range::TimeRange;
use crate::chart::svg::{render, ChartContainer};
use crate::fetch::rate_fetcher::RateSource;
use crate::rates::conversion::convert_on;
use crate::rates::currency::CurrencyCode;
use crate::rates::error::FxError;
use crate::rates::series::{build_series, History};
use crate::util::date::Date;
use crate::util::format::format_grouped;
use log::{error, info};
use rust_decimal::Decimal;

/// Something the user did.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
	SelectBase(CurrencyCode),
	SelectExchange(CurrencyCode),
	SelectDate(Date),
	TimeRange(TimeRange),
	Submit(ConversionForm),
}

/// The values of the conversion form at the moment it is submitted.
#[derive(Clone, Debug, PartialEq)]
pub struct ConversionForm {
	pub amount: Decimal,
	pub base: CurrencyCode,
	pub target: CurrencyCode,
	pub date: Date,
}

impl ConversionForm {
	/// A form pre-filled from the current selection
	pub fn from_selection(
		amount: Decimal,
		selection: &Selection,
	) -> Result<Self, FxError> {
		let date = selection.date.ok_or_else(|| {
			FxError::InvalidDate("no date selected".to_string())
		})?;

		Ok(Self {
			amount,
			base: selection.base.clone(),
			target: selection.exchange.clone(),
			date,
		})
	}
}

pub struct ControllerOptions {
	/// Time ranges end here; fixed for the lifetime of the controller
	pub today: Date,
	pub base: CurrencyCode,
	pub exchange: CurrencyCode,
	pub width: f64,
	pub height: f64,

	/// Draw the default one month chart after every conversion
	pub redraw_after_convert: bool,
}

/// A history fetch that has been started but not yet applied.
#[derive(Debug)]
pub struct PendingHistory {
	ticket: Ticket,
	start: Date,
	end: Date,
}

/// A conversion waiting on the rate for its date.
#[derive(Debug)]
pub struct PendingConversion {
	ticket: Ticket,
	amount: Decimal,
}

/// Owns the selection and turns user events into fetches, charts and
/// converted amounts on a [Surface].
///
/// Every fetch is split into a begin step that records the selection and a
/// complete step that applies the result only if the selection has not
/// changed in between. A failed step leaves the surface as it was.
pub struct AppController<S: RateSource, U: Surface> {
	source: S,
	surface: U,
	selection: SelectionState,
	currencies: Vec<CurrencyCode>,
	container: ChartContainer,
	today: Date,
	width: f64,
	height: f64,
	redraw_after_convert: bool,
}

impl<S: RateSource, U: Surface> AppController<S, U> {
	pub fn new(source: S, surface: U, options: ControllerOptions) -> Self {
		Self {
			source,
			surface,
			selection: SelectionState::new(options.base, options.exchange),
			currencies: Vec::new(),
			container: ChartContainer::new(),
			today: options.today,
			width: options.width,
			height: options.height,
			redraw_after_convert: options.redraw_after_convert,
		}
	}

	pub fn selection(&self) -> &Selection {
		self.selection.current()
	}

	/// Fetches the latest rates once to fill the currency pickers and
	/// default the date to the most recent published one.
	pub fn load(&mut self) -> Result<(), FxError> {
		let latest = self.source.fetch_latest().inspect_err(|e| {
			error!("failed to load currencies: {}", e);
		})?;

		self.currencies = latest.currencies();
		self.surface.set_currencies(&self.currencies);

		self.selection.set_date(latest.date);
		self.surface.set_date(&latest.date);

		Ok(())
	}

	/// Applies one event. Errors are logged here and then handed back; the
	/// surface keeps whatever it showed before.
	pub fn handle(&mut self, event: Event) -> Result<(), FxError> {
		let result = match event {
			Event::SelectBase(code) => self.check_known(&code).map(|_| {
				self.selection.set_base(code);
			}),
			Event::SelectExchange(code) => self.check_known(&code).map(|_| {
				self.selection.set_exchange(code);
			}),
			Event::SelectDate(date) => {
				self.selection.set_date(date);
				Ok(())
			},
			Event::TimeRange(range) => self.show_range(range),
			Event::Submit(form) => self.submit(form),
		};

		if let Err(e) = &result {
			error!("{}", e);
		}
		result
	}

	/// Before the currency list is loaded, any well-formed code is accepted
	fn check_known(&self, code: &CurrencyCode) -> Result<(), FxError> {
		if self.currencies.is_empty() || self.currencies.contains(code) {
			Ok(())
		} else {
			Err(FxError::UnknownCurrency(code.clone()))
		}
	}

	pub fn begin_history(&self, range: TimeRange) -> PendingHistory {
		let (start, end) = range.window(self.today);
		PendingHistory {
			ticket: self.selection.snapshot(),
			start,
			end,
		}
	}

	pub fn fetch_history(
		&self,
		pending: &PendingHistory,
	) -> Result<History, FxError> {
		let selection = &pending.ticket.selection;
		self.source.fetch_history(
			&pending.start,
			&pending.end,
			&selection.base,
			&selection.exchange,
		)
	}

	/// Charts the fetched history. Returns false, leaving the chart alone,
	/// if the currency pair changed after the fetch began.
	pub fn complete_history(
		&mut self,
		pending: PendingHistory,
		history: &History,
	) -> Result<bool, FxError> {
		if !self.selection.is_pair_current(&pending.ticket) {
			info!(
				"discarding {} history from {}, selection changed",
				pending.ticket.selection.pair(),
				pending.start
			);
			return Ok(false);
		}

		let pair = pending.ticket.selection.pair();
		let series = build_series(history);

		self.container.set_caption(&pair.to_string());
		render(&series, &mut self.container, self.width, self.height);
		self.surface.set_chart_titles(&pair);
		self.surface.show_chart(&self.container)?;

		Ok(true)
	}

	fn show_range(&mut self, range: TimeRange) -> Result<(), FxError> {
		let pending = self.begin_history(range);
		let history = self.fetch_history(&pending)?;
		self.complete_history(pending, &history)?;
		Ok(())
	}

	/// Writes the form's values into the selection and starts a
	/// conversion for them.
	pub fn begin_conversion(
		&mut self,
		form: ConversionForm,
	) -> Result<PendingConversion, FxError> {
		self.check_known(&form.base)?;
		self.check_known(&form.target)?;

		self.selection.set_base(form.base);
		self.selection.set_exchange(form.target);
		self.selection.set_date(form.date);

		Ok(PendingConversion {
			ticket: self.selection.snapshot(),
			amount: form.amount,
		})
	}

	/// Fetches just the day the conversion is for
	pub fn fetch_conversion_rate(
		&self,
		pending: &PendingConversion,
	) -> Result<History, FxError> {
		let selection = &pending.ticket.selection;
		let date = selection.date.ok_or_else(|| {
			FxError::InvalidDate("no date selected".to_string())
		})?;

		self.source.fetch_history(
			&date,
			&date,
			&selection.base,
			&selection.exchange,
		)
	}

	/// Shows the converted amount, then redraws the default chart if so
	/// configured. Returns None if the selection changed in the meantime.
	pub fn complete_conversion(
		&mut self,
		pending: PendingConversion,
		history: &History,
	) -> Result<Option<Decimal>, FxError> {
		if !self.selection.is_current(&pending.ticket) {
			info!("discarding conversion, selection changed");
			return Ok(None);
		}

		let selection = &pending.ticket.selection;
		let date = selection.date.ok_or_else(|| {
			FxError::InvalidDate("no date selected".to_string())
		})?;

		let value =
			convert_on(history, &selection.pair(), &date, pending.amount)?;
		self.surface.show_amount(&format_grouped(value, 3));

		if self.redraw_after_convert {
			self.show_range(TimeRange::default())?;
		}

		Ok(Some(value))
	}

	fn submit(&mut self, form: ConversionForm) -> Result<(), FxError> {
		let pending = self.begin_conversion(form)?;
		let history = self.fetch_conversion_rate(&pending)?;
		self.complete_conversion(pending, &history)?;
		Ok(())
	}
}
