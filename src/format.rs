//! Byte-size, count, and timestamp formatting for metadata views.

use chrono::{DateTime, Utc};

const UNITS: [&str; 6] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB"];

/// Render a byte count with binary units, one decimal place past KiB.
pub fn bytes_fmt(bytes: u64) -> String {
	if bytes < 1024 {
		return format!("{bytes} B");
	}

	let mut size = bytes as f64;
	let mut unit = 0;
	while size >= 1024.0 && unit < UNITS.len() - 1 {
		size /= 1024.0;
		unit += 1;
	}
	format!("{size:.1} {}", UNITS[unit])
}

/// Render a count with thousands separators.
pub fn num_fmt(num: u64) -> String {
	let digits = num.to_string();
	let mut out = String::with_capacity(digits.len() + digits.len() / 3);
	for (i, ch) in digits.chars().enumerate() {
		if i > 0 && (digits.len() - i) % 3 == 0 {
			out.push(',');
		}
		out.push(ch);
	}
	out
}

/// Render a timestamp the way every view displays them.
pub fn time_fmt(ts: DateTime<Utc>) -> String {
	ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Optional-timestamp variant; empty string when absent.
pub fn opt_time_fmt(ts: Option<DateTime<Utc>>) -> String {
	ts.map(time_fmt).unwrap_or_default()
}
