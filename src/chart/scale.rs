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
use crate::util::date::Date;

/// Maps a continuous domain linearly onto a range of pixel offsets.
///
/// A domain with no extent (min == max) maps every value to the middle of
/// the range instead of dividing by zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
	domain: (f64, f64),
	range: (f64, f64),
}

impl LinearScale {
	pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
		Self { domain, range }
	}

	pub fn map(&self, value: f64) -> f64 {
		let (d0, d1) = self.domain;
		let (r0, r1) = self.range;
		let span = d1 - d0;

		if span == 0.0 || !span.is_finite() {
			return (r0 + r1) / 2.0;
		}

		r0 + (value - d0) / span * (r1 - r0)
	}

	/// Round values spaced 1, 2 or 5 times a power of ten apart, covering
	/// the domain with roughly `count` ticks.
	pub fn ticks(&self, count: usize) -> Vec<f64> {
		let (lo, hi) = ordered(self.domain);

		if !lo.is_finite() || !hi.is_finite() || count == 0 {
			return Vec::new();
		}
		if lo == hi {
			return vec![lo];
		}

		let (factor, power) = nice_step((hi - lo) / count as f64);

		// Fractional steps are handled through their reciprocal so that
		// ticks land on exact decimals rather than accumulating error.
		if power < 0 {
			let inverse = 10f64.powi(-power) / factor;
			let mut first = (lo * inverse).round();
			let mut last = (hi * inverse).round();
			if first / inverse < lo {
				first += 1.0;
			}
			if last / inverse > hi {
				last -= 1.0;
			}
			steps(first, last).map(|i| i / inverse).collect()
		} else {
			let step = factor * 10f64.powi(power);
			let mut first = (lo / step).round();
			let mut last = (hi / step).round();
			if first * step < lo {
				first += 1.0;
			}
			if last * step > hi {
				last -= 1.0;
			}
			steps(first, last).map(|i| i * step).collect()
		}
	}
}

/// A linear scale over calendar days.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeScale {
	domain: (Date, Date),
	inner: LinearScale,
}

impl TimeScale {
	pub fn new(domain: (Date, Date), range: (f64, f64)) -> Self {
		Self {
			domain,
			inner: LinearScale::new(
				(domain.0.ordinal() as f64, domain.1.ordinal() as f64),
				range,
			),
		}
	}

	pub fn map(&self, date: &Date) -> f64 {
		self.inner.map(date.ordinal() as f64)
	}

	/// Whole days from the start of the domain, evenly spaced so that there
	/// are at most `count` of them.
	pub fn ticks(&self, count: usize) -> Vec<Date> {
		let (start, end) = self.domain;
		let span = start.days_until(&end);

		if count == 0 || span < 0 {
			return Vec::new();
		}
		if span == 0 {
			return vec![start];
		}

		let step = (span as f64 / count as f64).ceil().max(1.0) as i64;
		(0..=span / step)
			.filter_map(|i| Date::from_ordinal(start.ordinal() + i * step))
			.collect()
	}
}

fn ordered((a, b): (f64, f64)) -> (f64, f64) {
	if a <= b {
		(a, b)
	} else {
		(b, a)
	}
}

/// Splits a raw step into a factor of 1, 2, 5 or 10 and a power of ten.
fn nice_step(raw: f64) -> (f64, i32) {
	let power = raw.log10().floor() as i32;
	let error = raw / 10f64.powi(power);

	let factor = if error >= 50f64.sqrt() {
		10.0
	} else if error >= 10f64.sqrt() {
		5.0
	} else if error >= 2f64.sqrt() {
		2.0
	} else {
		1.0
	};

	(factor, power)
}

fn steps(first: f64, last: f64) -> impl Iterator<Item = f64> {
	let count = if last >= first {
		(last - first) as i64 + 1
	} else {
		0
	};
	(0..count).map(move |i| first + i as f64)
}
