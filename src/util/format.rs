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
use rust_decimal::{Decimal, RoundingStrategy};

/// Renders a decimal the way an English locale displays numbers: thousands
/// grouped with commas, at most `max_fraction_digits` decimal places, and no
/// trailing zeros.
pub fn format_grouped(value: Decimal, max_fraction_digits: u32) -> String {
	let rounded = value
		.round_dp_with_strategy(
			max_fraction_digits,
			RoundingStrategy::MidpointAwayFromZero,
		)
		.normalize();

	group_digits(&rounded.to_string())
}

/// Renders a float with a fixed number of decimal places and grouped
/// thousands, e.g. for axis labels.
pub fn format_fixed(value: f64, decimals: usize) -> String {
	// avoid printing "-0.00"
	let value = if value == 0.0 { 0.0 } else { value };
	group_digits(&format!("{:.*}", decimals, value))
}

fn group_digits(plain: &str) -> String {
	let (sign, unsigned) = match plain.strip_prefix('-') {
		Some(rest) => ("-", rest),
		None => ("", plain),
	};
	let (int_part, frac_part) = match unsigned.split_once('.') {
		Some((int_part, frac_part)) => (int_part, Some(frac_part)),
		None => (unsigned, None),
	};

	let mut grouped =
		String::with_capacity(int_part.len() + int_part.len() / 3);
	for (i, ch) in int_part.chars().enumerate() {
		if i > 0 && (int_part.len() - i) % 3 == 0 {
			grouped.push(',');
		}
		grouped.push(ch);
	}

	match frac_part {
		Some(frac) => format!("{}{}.{}", sign, grouped, frac),
		None => format!("{}{}", sign, grouped),
	}
}
