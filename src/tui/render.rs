//! Paints a [`FrameModel`] onto a ratatui frame.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use unicode_width::UnicodeWidthStr;

use super::content::{ContentBlock, SchemaLine, Section};
use super::sink::{FrameModel, SideList};
use super::theme::Theme;

const HIGHLIGHT_SYMBOL: &str = "▶ ";
const SIDE_LIST_MIN_WIDTH: u16 = 20;
const SIDE_LIST_MAX_WIDTH: u16 = 40;

pub fn draw(frame: &mut Frame, model: &FrameModel, theme: &Theme) {
	let border_style = if model.flash { theme.flash } else { theme.border };
	let panel = Block::default()
		.borders(Borders::ALL)
		.border_set(ratatui::symbols::border::ROUNDED)
		.border_style(border_style)
		.title_top(Line::styled(model.title.clone(), theme.time).right_aligned())
		.title_bottom(Line::styled(model.hint.clone(), theme.darker).centered());

	let inner = panel.inner(frame.area());
	frame.render_widget(panel, frame.area());

	let notice_height = u16::from(model.notice.is_some());
	let layout = Layout::default()
		.direction(Direction::Vertical)
		.constraints([
			Constraint::Length(model.header.len() as u16 + 1),
			Constraint::Length(notice_height),
			Constraint::Min(1),
		])
		.split(inner);

	render_header(frame, layout[0], model, theme);
	if let Some(notice) = &model.notice {
		frame.render_widget(
			Paragraph::new(Line::styled(notice.clone(), theme.error)),
			layout[1],
		);
	}

	let content_area = match &model.side {
		Some(side) => {
			let width = side_list_width(side);
			let split = Layout::default()
				.direction(Direction::Horizontal)
				.constraints([Constraint::Min(20), Constraint::Length(width)])
				.split(layout[2]);
			render_side_list(frame, split[1], side, theme);
			split[0]
		}
		None => layout[2],
	};

	render_content(frame, content_area, &model.content, theme);
}

fn render_header(frame: &mut Frame, area: Rect, model: &FrameModel, theme: &Theme) {
	let lines: Vec<Line> = model
		.header
		.iter()
		.map(|(key, value)| key_value_line(key, value, theme))
		.collect();
	frame.render_widget(Paragraph::new(lines), area);
}

fn key_value_line<'a>(key: &'a str, value: &'a str, theme: &Theme) -> Line<'a> {
	Line::from(vec![
		Span::styled(key, theme.key),
		Span::styled(" = ", theme.darker),
		Span::styled(value, theme.value),
	])
}

fn side_list_width(side: &SideList) -> u16 {
	let widest = side
		.items
		.iter()
		.map(|item| item.width())
		.max()
		.unwrap_or(0) as u16;
	// item + marker + borders
	(widest + 6).clamp(SIDE_LIST_MIN_WIDTH, SIDE_LIST_MAX_WIDTH)
}

fn render_side_list(frame: &mut Frame, area: Rect, side: &SideList, theme: &Theme) {
	let items: Vec<ListItem> = side
		.items
		.iter()
		.map(|item| ListItem::new(item.clone()))
		.collect();
	let list = List::new(items)
		.block(
			Block::default()
				.borders(Borders::ALL)
				.border_set(ratatui::symbols::border::ROUNDED)
				.border_style(theme.border)
				.title(side.title.clone()),
		)
		.highlight_symbol(HIGHLIGHT_SYMBOL)
		.highlight_style(theme.selected);

	let mut state = ListState::default();
	state.select(side.selected);
	frame.render_stateful_widget(list, area, &mut state);
}

fn render_content(frame: &mut Frame, area: Rect, content: &ContentBlock, theme: &Theme) {
	match content {
		ContentBlock::Empty => {
			let empty = Paragraph::new(Line::styled("No table open", theme.darker))
				.alignment(Alignment::Center);
			frame.render_widget(empty, area);
		}
		ContentBlock::Text(text) => {
			frame.render_widget(Paragraph::new(text.clone()), area);
		}
		ContentBlock::Sections(sections) => {
			frame.render_widget(
				Paragraph::new(section_lines(sections, area.width, theme)),
				area,
			);
		}
		ContentBlock::Schema(schema) => {
			frame.render_widget(Paragraph::new(schema_lines(schema, theme)), area);
		}
	}
}

fn section_lines<'a>(sections: &'a [Section], width: u16, theme: &Theme) -> Vec<Line<'a>> {
	let rule = "─".repeat(width as usize);
	let mut lines = Vec::new();
	for (i, section) in sections.iter().enumerate() {
		if i > 0 {
			lines.push(Line::styled(rule.clone(), theme.border));
		}
		for (key, value) in &section.0 {
			lines.push(key_value_line(key, value, theme));
		}
	}
	lines
}

fn schema_lines<'a>(schema: &'a [SchemaLine], theme: &Theme) -> Vec<Line<'a>> {
	let name_width = schema
		.iter()
		.map(|line| line.depth * 2 + line.name.width())
		.max()
		.unwrap_or(0);
	let type_width = schema
		.iter()
		.map(|line| line.field_type.width())
		.max()
		.unwrap_or(0);

	schema
		.iter()
		.map(|line| {
			let indented = format!("{}{}", "  ".repeat(line.depth), line.name);
			let padding = name_width.saturating_sub(indented.width()) + 2;
			Line::from(vec![
				Span::styled(indented, theme.value),
				Span::raw(" ".repeat(padding)),
				Span::styled(format!("{:<type_width$}", line.field_type), theme.key),
				Span::raw("  "),
				Span::styled(line.mode.clone(), theme.darker),
			])
		})
		.collect()
}
