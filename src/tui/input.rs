//! Blocking keystroke source for the window loop.

use std::time::Instant;

use anyhow::Result;
use ratatui::crossterm::event::{self, Event, KeyEvent, KeyEventKind};

/// Delivers key presses one at a time, in arrival order.
pub trait KeySource {
	/// Block until the next key press. With a deadline, return `None` once
	/// it passes so the loop can repaint (flash expiry) without consuming a
	/// keystroke.
	fn next_key(&mut self, deadline: Option<Instant>) -> Result<Option<KeyEvent>>;
}

/// Reads from the terminal via crossterm.
pub struct TerminalKeys;

impl KeySource for TerminalKeys {
	fn next_key(&mut self, deadline: Option<Instant>) -> Result<Option<KeyEvent>> {
		loop {
			if let Some(deadline) = deadline {
				let now = Instant::now();
				if now >= deadline {
					return Ok(None);
				}
				if !event::poll(deadline - now)? {
					return Ok(None);
				}
			}

			if let Event::Key(key) = event::read()?
				&& key.kind == KeyEventKind::Press
			{
				return Ok(Some(key));
			}
		}
	}
}
