use ratatui::{
    buffer::Buffer,
    layout::{Flex, HorizontalAlignment, Layout, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Widget},
};

/// Key bindings and what they do, in the order shown
static COMMANDS: &[(&str, &str)] = &[
    ("n, PAGE DOWN", "Next month or week"),
    ("p, PAGE UP", "Previous month or week"),
    ("0, HOME", "Go to today"),
    ("t", "Switch between month and week"),
    ("g", "Go to a month or week number"),
    ("ARROWS, hjkl", "Move the cursor"),
    ("ENTER", "Select the day under the cursor"),
    ("TAB, SHIFT-TAB", "Cycle through the day's events"),
    ("o", "Open the selected event"),
    ("d", "Pick up or drop the selected event"),
    ("?", "Show this help"),
    ("q, ESC", "Quit"),
];

const KEY_GUTTER: usize = 4;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help(pub(crate) Style);

impl Help {
    fn text() -> Text<'static> {
        let key_width = COMMANDS
            .iter()
            .map(|(keys, _)| keys.len())
            .max()
            .unwrap_or_default()
            + KEY_GUTTER;
        let mut lines = COMMANDS
            .iter()
            .map(|(keys, about)| Line::raw(format!("{keys:key_width$}{about}")))
            .collect::<Vec<_>>();
        lines.push(Line::raw(""));
        lines.push(Line::raw("Press the Any Key to dismiss."));
        Text::from(lines)
    }
}

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Help::text();
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .min(area.height)
            .saturating_add(2);
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .min(area.width)
            .saturating_add(2);
        let [help_area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [help_area] = Layout::vertical([height])
            .flex(Flex::Center)
            .areas(help_area);
        // Leave a blank column on either side of the border
        let outer_area = Rect {
            x: help_area.x.saturating_sub(1),
            width: help_area.width.saturating_add(2),
            ..help_area
        };
        Clear.render(outer_area, buf);
        Block::new().style(self.0).render(outer_area, buf);
        Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Commands ")
                    .title_alignment(HorizontalAlignment::Center),
            )
            .style(self.0)
            .render(help_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_aligns_descriptions() {
        let text = Help::text();
        let first = text.lines[0].to_string();
        let last_command = text.lines[COMMANDS.len() - 1].to_string();
        assert_eq!(first, "n, PAGE DOWN      Next month or week");
        assert_eq!(last_command, "q, ESC            Quit");
        assert_eq!(text.height(), COMMANDS.len() + 2);
    }

    #[test]
    fn test_render_centered() {
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        Help(Style::new()).render(area, &mut buffer);
        let row = |y: u16| {
            (0..80)
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
        };
        assert!(row(4).contains(" Commands "));
        assert!(row(5).contains("│n, PAGE DOWN      Next month or week"));
        assert!(row(19).contains("└"));
    }
}
