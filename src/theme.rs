use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

/// Days shown only to fill out the first and last weeks
pub(crate) const PADDING_DAY_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub(crate) const CURSOR_MODIFIER: Modifier = Modifier::REVERSED;

pub(crate) const EVENT_MARK_STYLE: Style = BASE_STYLE.fg(Color::LightBlue);

pub(crate) const AGENDA_DAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const SELECTED_EVENT_STYLE: Style = BASE_STYLE.add_modifier(Modifier::REVERSED);

pub(crate) const MOVING_EVENT_STYLE: Style = Style::new()
    .fg(Color::LightYellow)
    .bg(Color::Black)
    .add_modifier(Modifier::BOLD);

pub(crate) const ERROR_STYLE: Style = BASE_STYLE.fg(Color::LightRed);

pub(crate) mod goto {
    use super::*;

    pub(crate) const UNFILLED_CELL_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

    pub(crate) const READY_ENTER_STYLE: Style = BASE_STYLE.add_modifier(Modifier::UNDERLINED);
}
