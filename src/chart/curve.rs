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
/// Zero tension passes a smooth curve through every point without
/// overshooting far beyond neighbours.
pub const DEFAULT_TENSION: f64 = 0.0;

/// Builds SVG path data for a cardinal spline through the points, as cubic
/// Bézier segments. End points act as their own outer neighbours.
///
/// Two points are joined by a straight line, a single point is a bare move,
/// and no points produce empty path data.
pub fn cardinal_path(points: &[(f64, f64)], tension: f64) -> String {
	let k = (1.0 - tension) / 6.0;

	match points {
		[] => String::new(),
		[p] => format!("M{}", coord(*p)),
		[a, b] => format!("M{}L{}", coord(*a), coord(*b)),
		_ => {
			let last = points.len() - 1;
			let mut d = format!("M{}", coord(points[0]));

			for i in 0..last {
				let p0 = points[i.saturating_sub(1)];
				let p1 = points[i];
				let p2 = points[i + 1];
				let p3 = points[(i + 2).min(last)];

				let c1 = (p1.0 + k * (p2.0 - p0.0), p1.1 + k * (p2.1 - p0.1));
				let c2 = (p2.0 - k * (p3.0 - p1.0), p2.1 - k * (p3.1 - p1.1));

				d.push_str(&format!(
					"C{},{},{}",
					coord(c1),
					coord(c2),
					coord(p2)
				));
			}

			d
		},
	}
}

fn coord((x, y): (f64, f64)) -> String {
	format!("{:.2},{:.2}", x, y)
}
