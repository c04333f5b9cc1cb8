//! Color scheme for the metadata window.

use ratatui::style::{Color, Modifier, Style};

#[derive(Clone, Debug)]
pub struct Theme {
	/// Outer panel border at rest.
	pub border: Style,
	/// Outer panel border while a flash pulse is active.
	pub flash: Style,
	/// Metadata field names.
	pub key: Style,
	/// The ` = ` separator and other secondary text.
	pub darker: Style,
	/// Field values.
	pub value: Style,
	/// Frame timestamp in the panel title.
	pub time: Style,
	/// Selected entry in the side list.
	pub selected: Style,
	/// Error notices.
	pub error: Style,
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			border: Style::new().fg(Color::Rgb(64, 64, 64)),
			flash: Style::new().fg(Color::Rgb(205, 173, 0)),
			key: Style::new().fg(Color::Rgb(0, 135, 0)),
			darker: Style::new().fg(Color::Rgb(118, 118, 118)),
			value: Style::new(),
			time: Style::new().fg(Color::Yellow),
			selected: Style::new().add_modifier(Modifier::BOLD),
			error: Style::new().fg(Color::Red),
		}
	}
}
