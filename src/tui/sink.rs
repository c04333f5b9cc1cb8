//! Frame output contract and its terminal implementation.
//!
//! The window hands a fully assembled [`FrameModel`] to a [`FrameSink`] once
//! per loop iteration. Suspending releases the terminal to an external
//! collaborator (the picker); resuming reclaims it with the same layout.

use anyhow::{Result, bail};
use ratatui::DefaultTerminal;

use super::content::ContentBlock;
use super::render;
use super::theme::Theme;

/// Side list shown next to the content in list views.
#[derive(Clone, Debug, PartialEq)]
pub struct SideList {
	pub title: String,
	pub items: Vec<String>,
	pub selected: Option<usize>,
}

/// Everything needed to paint one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameModel {
	/// Refresh timestamp shown in the top-right panel title.
	pub title: String,
	/// Header key/value pairs (project, account).
	pub header: Vec<(String, String)>,
	pub content: ContentBlock,
	pub side: Option<SideList>,
	/// Key hints for the current view, shown in the bottom border.
	pub hint: String,
	pub notice: Option<String>,
	/// Paint the border with the flash style.
	pub flash: bool,
}

/// Output device for assembled frames.
pub trait FrameSink {
	fn paint(&mut self, model: &FrameModel) -> Result<()>;
	/// Release the terminal so an external program can use it.
	fn suspend(&mut self) -> Result<()>;
	/// Reclaim the terminal after a suspend.
	fn resume(&mut self) -> Result<()>;
	/// Final teardown; called exactly once when the loop exits.
	fn stop(&mut self) -> Result<()>;
}

/// Production sink painting to the alternate screen via ratatui.
pub struct TerminalSink {
	terminal: Option<DefaultTerminal>,
	theme: Theme,
}

impl TerminalSink {
	/// Take over the terminal. Failure here is the only fatal condition.
	pub fn new(theme: Theme) -> Result<Self> {
		let terminal = ratatui::try_init()?;
		Ok(Self {
			terminal: Some(terminal),
			theme,
		})
	}
}

impl FrameSink for TerminalSink {
	fn paint(&mut self, model: &FrameModel) -> Result<()> {
		let Some(terminal) = self.terminal.as_mut() else {
			bail!("frame sink is suspended");
		};
		terminal.draw(|frame| render::draw(frame, model, &self.theme))?;
		Ok(())
	}

	fn suspend(&mut self) -> Result<()> {
		if self.terminal.take().is_some() {
			ratatui::restore();
		}
		Ok(())
	}

	fn resume(&mut self) -> Result<()> {
		if self.terminal.is_none() {
			let mut terminal = ratatui::try_init()?;
			terminal.clear()?;
			self.terminal = Some(terminal);
		}
		Ok(())
	}

	fn stop(&mut self) -> Result<()> {
		self.suspend()
	}
}
