use crate::theme::{
    goto::{READY_ENTER_STYLE, UNFILLED_CELL_STYLE},
    BASE_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Flex, HorizontalAlignment, Layout, Margin, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Clear, StatefulWidget, Widget},
};
use weekgrid::Unit;

const OUTER_WIDTH: u16 = 19;
const OUTER_HEIGHT: u16 = 8;
const YEAR_DIGITS: usize = 4;
const NUMBER_DIGITS: usize = 2;
const ENTER_POS: usize = YEAR_DIGITS + NUMBER_DIGITS;

/// Dialog for entering a year together with a month or a week number
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct GoTo;

impl StatefulWidget for GoTo {
    type State = GoToState;

    /*
     * ...................
     * .┌─ Go To Week ──┐.
     * .│               │.
     * .│   YYYY-Www    │.
     * .│               │.
     * .│    [ENTER]    │.
     * .└───────────────┘.
     * ...................
     */

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [outer_area] = Layout::horizontal([OUTER_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let [outer_area] = Layout::vertical([OUTER_HEIGHT])
            .flex(Flex::Center)
            .areas(outer_area);
        Clear.render(outer_area, buf);
        Block::new().style(BASE_STYLE).render(outer_area, buf);
        let block_area = outer_area.inner(Margin::new(1, 1));
        Block::bordered()
            .title(state.title())
            .title_alignment(HorizontalAlignment::Center)
            .render(block_area, buf);
        let text_area = block_area.inner(Margin::new(1, 1));
        state.to_text().render(text_area, buf);
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct GoToState {
    unit: Unit,
    year: [Option<u8>; YEAR_DIGITS],
    number: [Option<u8>; NUMBER_DIGITS],
    pos: usize,
}

impl GoToState {
    /// Start an empty dialog asking for a month or, for [`Unit::Week`], a
    /// week number
    pub(crate) fn new(unit: Unit) -> GoToState {
        GoToState {
            unit,
            year: [None; YEAR_DIGITS],
            number: [None; NUMBER_DIGITS],
            pos: 0,
        }
    }

    fn title(&self) -> &'static str {
        match self.unit {
            Unit::Month => " Go To Month ",
            Unit::Week => " Go To Week ",
        }
    }

    fn to_text(self) -> Text<'static> {
        Text::from_iter([
            Line::styled("", BASE_STYLE),
            self.to_line(),
            Line::styled("", BASE_STYLE),
            // Only the "[ENTER]" text and not its centering padding should be
            // underlined, so style a span rather than the line.
            Line::from(Span::styled(
                "[ENTER]",
                if self.pos == ENTER_POS {
                    READY_ENTER_STYLE
                } else {
                    BASE_STYLE
                },
            )),
        ])
        .centered()
    }

    fn to_line(self) -> Line<'static> {
        let (separator, fallback) = match self.unit {
            Unit::Month => ("-", "M"),
            Unit::Week => ("-W", "w"),
        };
        let digit = |dg: Option<u8>, fallback: &'static str| match dg {
            Some(d) => Span::styled(d.to_string(), BASE_STYLE),
            None => Span::styled(fallback, UNFILLED_CELL_STYLE),
        };
        let mut spans = self
            .year
            .iter()
            .map(|&dg| digit(dg, "Y"))
            .collect::<Vec<_>>();
        spans.push(Span::styled(separator, BASE_STYLE));
        spans.extend(self.number.iter().map(|&dg| digit(dg, fallback)));
        Line::from(spans)
    }

    fn set_digit(&mut self, pos: usize, value: Option<u8>) {
        if let Some(slot) = self.year.iter_mut().chain(&mut self.number).nth(pos) {
            *slot = value;
        }
    }

    pub(crate) fn handle_input(&mut self, input: GoToInput) -> GoToOutput {
        match (input, self.pos) {
            (GoToInput::Digit(d), 0..ENTER_POS) if d < 10 => {
                self.set_digit(self.pos, Some(d));
                self.pos += 1;
                GoToOutput::Ok
            }
            (GoToInput::Backspace, 1..) => {
                self.pos -= 1;
                self.set_digit(self.pos, None);
                GoToOutput::Ok
            }
            (GoToInput::Enter, ENTER_POS) => {
                let year = digits_value(&self.year).and_then(|y| i32::try_from(y).ok());
                let number = digits_value(&self.number).and_then(|n| u8::try_from(n).ok());
                match (year, number, self.unit) {
                    (Some(year), Some(month), Unit::Month) => GoToOutput::Month { year, month },
                    (Some(year), Some(week), Unit::Week) => GoToOutput::Week { year, week },
                    _ => GoToOutput::Invalid,
                }
            }
            _ => GoToOutput::Invalid,
        }
    }
}

fn digits_value(digits: &[Option<u8>]) -> Option<u32> {
    digits
        .iter()
        .try_fold(0u32, |acc, &d| Some(acc * 10 + u32::from(d?)))
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GoToInput {
    Digit(u8),
    Backspace,
    Enter,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GoToOutput {
    Ok,
    Invalid,
    Month { year: i32, month: u8 },
    Week { year: i32, week: u8 },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enter_digits(state: &mut GoToState, digits: &str) {
        for c in digits.chars() {
            let d = c.to_digit(10).and_then(|d| u8::try_from(d).ok()).unwrap();
            assert_eq!(state.handle_input(GoToInput::Digit(d)), GoToOutput::Ok);
        }
    }

    #[test]
    fn test_month() {
        let mut state = GoToState::new(Unit::Month);
        enter_digits(&mut state, "19991");
        assert_eq!(state.handle_input(GoToInput::Enter), GoToOutput::Invalid);
        enter_digits(&mut state, "2");
        assert_eq!(
            state.handle_input(GoToInput::Digit(5)),
            GoToOutput::Invalid
        );
        assert_eq!(
            state.handle_input(GoToInput::Enter),
            GoToOutput::Month {
                year: 1999,
                month: 12
            }
        );
    }

    #[test]
    fn test_week_with_backspace() {
        let mut state = GoToState::new(Unit::Week);
        assert_eq!(
            state.handle_input(GoToInput::Backspace),
            GoToOutput::Invalid
        );
        enter_digits(&mut state, "202053");
        assert_eq!(state.handle_input(GoToInput::Backspace), GoToOutput::Ok);
        enter_digits(&mut state, "2");
        assert_eq!(
            state.handle_input(GoToInput::Enter),
            GoToOutput::Week {
                year: 2020,
                week: 52
            }
        );
    }

    #[test]
    fn test_line() {
        let mut state = GoToState::new(Unit::Week);
        enter_digits(&mut state, "20");
        assert_eq!(state.to_line().to_string(), "20YY-Www");
        let mut state = GoToState::new(Unit::Month);
        enter_digits(&mut state, "20240");
        assert_eq!(state.to_line().to_string(), "2024-0M");
    }

    #[test]
    fn test_render() {
        let area = Rect::new(0, 0, 19, 8);
        let mut buffer = Buffer::empty(area);
        let mut state = GoToState::new(Unit::Month);
        enter_digits(&mut state, "202402");
        GoTo.render(area, &mut buffer, &mut state);
        let expected = Buffer::with_lines([
            "                   ",
            " ┌─ Go To Month ─┐ ",
            " │               │ ",
            " │    2024-02    │ ",
            " │               │ ",
            " │    [ENTER]    │ ",
            " └───────────────┘ ",
            "                   ",
        ]);
        let symbols = |b: &Buffer| {
            b.content
                .iter()
                .map(|c| c.symbol().to_owned())
                .collect::<Vec<_>>()
        };
        assert_eq!(symbols(&buffer), symbols(&expected));
    }
}
