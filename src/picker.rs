//! Inline fuzzy picker.
//!
//! Presents a list of strings for interactive narrowing and returns the
//! chosen one, or `None` when the user cancels or the input is empty. The
//! production implementation owns the terminal for the duration of the pick;
//! callers bracket the call with `FrameSink::suspend`/`resume`.

use anyhow::Result;
use frizbee::{Config, match_list};
use ratatui::Frame;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

/// Interactive selection over a list of choices.
pub trait Picker {
	fn pick(&mut self, title: &str, choices: &[String]) -> Result<Option<String>>;
}

/// Fuzzy matching options tuned to the query length, after the search
/// pipeline the matcher crate was built for.
fn config_for_query(query: &str, dataset_len: usize) -> Config {
	let mut config = Config {
		sort: false,
		..Config::default()
	};

	let length = query.chars().count();
	let mut allowed_typos: u16 = match length {
		0..=1 => 0,
		2..=4 => 1,
		5..=7 => 2,
		8..=12 => 3,
		_ => 4,
	};
	if let Ok(max_reasonable) = u16::try_from(length.saturating_sub(1)) {
		allowed_typos = allowed_typos.min(max_reasonable);
	}

	if dataset_len >= 1_000 {
		config.max_typos = Some(allowed_typos);
	}

	config
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Ranked {
	index: usize,
	score: u16,
}

/// Pure narrowing state, separated from the terminal loop for testability.
struct PickerState<'a> {
	choices: &'a [String],
	query: String,
	ranked: Vec<Ranked>,
	selected: usize,
}

impl<'a> PickerState<'a> {
	fn new(choices: &'a [String]) -> Self {
		let mut state = Self {
			choices,
			query: String::new(),
			ranked: Vec::new(),
			selected: 0,
		};
		state.refilter();
		state
	}

	/// Re-rank choices against the current query. An empty query keeps the
	/// caller's ordering.
	fn refilter(&mut self) {
		let trimmed = self.query.trim();
		if trimmed.is_empty() {
			self.ranked = (0..self.choices.len())
				.map(|index| Ranked { index, score: 0 })
				.collect();
		} else {
			let haystacks: Vec<&str> = self.choices.iter().map(String::as_str).collect();
			let config = config_for_query(trimmed, haystacks.len());
			let mut ranked: Vec<Ranked> = match_list(trimmed, &haystacks, &config)
				.into_iter()
				.filter(|entry| entry.score > 0)
				.map(|entry| Ranked {
					index: entry.index as usize,
					score: entry.score,
				})
				.collect();
			ranked.sort_unstable_by(|a, b| b.score.cmp(&a.score).then(a.index.cmp(&b.index)));
			self.ranked = ranked;
		}

		if self.ranked.is_empty() {
			self.selected = 0;
		} else {
			self.selected = self.selected.min(self.ranked.len() - 1);
		}
	}

	fn push(&mut self, ch: char) {
		self.query.push(ch);
		self.refilter();
	}

	fn pop(&mut self) {
		self.query.pop();
		self.refilter();
	}

	fn move_up(&mut self) {
		self.selected = self.selected.saturating_sub(1);
	}

	fn move_down(&mut self) {
		if !self.ranked.is_empty() {
			self.selected = (self.selected + 1).min(self.ranked.len() - 1);
		}
	}

	fn current(&self) -> Option<&'a String> {
		let ranked = self.ranked.get(self.selected)?;
		self.choices.get(ranked.index)
	}
}

/// Full-screen picker backed by frizbee matching.
#[derive(Default)]
pub struct FuzzyPicker;

impl FuzzyPicker {
	pub fn new() -> Self {
		Self
	}

	fn event_loop(
		terminal: &mut ratatui::DefaultTerminal,
		title: &str,
		choices: &[String],
	) -> Result<Option<String>> {
		let mut state = PickerState::new(choices);
		let mut list_state = ListState::default();

		loop {
			list_state.select(if state.ranked.is_empty() {
				None
			} else {
				Some(state.selected)
			});
			terminal.draw(|frame| draw(frame, title, &state, &mut list_state))?;

			let Event::Key(key) = event::read()? else {
				continue;
			};
			if key.kind != KeyEventKind::Press {
				continue;
			}

			match key.code {
				KeyCode::Esc => return Ok(None),
				KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
					return Ok(None);
				}
				KeyCode::Enter => return Ok(state.current().cloned()),
				KeyCode::Up => state.move_up(),
				KeyCode::Down => state.move_down(),
				KeyCode::Backspace => state.pop(),
				KeyCode::Char(ch) => state.push(ch),
				_ => {}
			}
		}
	}
}

impl Picker for FuzzyPicker {
	fn pick(&mut self, title: &str, choices: &[String]) -> Result<Option<String>> {
		if choices.is_empty() {
			return Ok(None);
		}

		let mut terminal = ratatui::try_init()?;
		let result = Self::event_loop(&mut terminal, title, choices);
		ratatui::restore();
		result
	}
}

const HIGHLIGHT_SYMBOL: &str = "▶ ";

fn draw(frame: &mut Frame, title: &str, state: &PickerState<'_>, list_state: &mut ListState) {
	let layout = Layout::default()
		.direction(Direction::Vertical)
		.constraints([Constraint::Length(1), Constraint::Min(1)])
		.split(frame.area());

	let prompt = Line::from(vec![
		Span::styled(format!("{title} "), Style::default().fg(Color::DarkGray)),
		Span::styled("› ", Style::default().fg(Color::LightCyan)),
		Span::raw(state.query.clone()),
	]);
	frame.render_widget(Paragraph::new(prompt), layout[0]);

	let items: Vec<ListItem> = state
		.ranked
		.iter()
		.filter_map(|ranked| state.choices.get(ranked.index))
		.map(|choice| ListItem::new(choice.clone()))
		.collect();
	let count_title = format!("{}/{}", state.ranked.len(), state.choices.len());
	let list = List::new(items)
		.block(
			Block::default()
				.borders(Borders::ALL)
				.border_set(ratatui::symbols::border::ROUNDED)
				.title(count_title),
		)
		.highlight_symbol(HIGHLIGHT_SYMBOL)
		.highlight_style(Style::default().add_modifier(Modifier::BOLD));
	frame.render_stateful_widget(list, layout[1], list_state);
}
