//! Title screen with difficulty selection.

use super::common::{
    create_game_layout, render_info_panel_frame, render_status_bar, render_too_small,
};
use lunar_lander::lander::Difficulty;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const MIN_WIDTH: u16 = 40;
const MIN_HEIGHT: u16 = 14;

const BANNER: [&str; 3] = [
    r" _    _   _ _  _   _   ___   _      _   _  _ ___  ___ ___ ",
    r"| |__| |_| | \| | /_\ | _ \ | |__  /_\ | \| |   \| __| _ \",
    r"|____|\___/|_|\_|/_/ \_\_|_\ |____/_/ \_\_|\_|___/|___|_|_\",
];

pub fn render_title_scene(frame: &mut Frame, area: Rect) {
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        render_too_small(frame, area, MIN_WIDTH, MIN_HEIGHT);
        return;
    }

    let layout = create_game_layout(frame, area, " Lunar Lander ", Color::LightBlue, 10, 24);

    let mut lines: Vec<Line> = Vec::new();
    if layout.content.width as usize > BANNER[0].len() {
        for row in BANNER {
            lines.push(Line::from(Span::styled(
                row,
                Style::default().fg(Color::LightBlue),
            )));
        }
    } else {
        lines.push(Line::from(Span::styled(
            "LUNAR LANDER",
            Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Select difficulty",
        Style::default().fg(Color::White),
    )));
    lines.push(Line::from(""));

    for (i, difficulty) in Difficulty::ALL.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("[{}] ", i + 1), Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{:<7}", difficulty.name()),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" {}", difficulty.description()),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }

    let content_height = lines.len() as u16;
    let y = layout.content.y + layout.content.height.saturating_sub(content_height) / 2;
    let text = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(
        text,
        Rect::new(
            layout.content.x,
            y,
            layout.content.width,
            content_height.min(layout.content.height),
        ),
    );

    render_status_bar(
        frame,
        layout.status_bar,
        "Touch down gently on a pad",
        Color::LightBlue,
        &[("[1-3]", "Start"), ("[Q]", "Quit")],
    );

    render_info_panel(frame, layout.info_panel);
}

fn render_info_panel(frame: &mut Frame, area: Rect) {
    if area.width < 2 {
        return;
    }
    let inner = render_info_panel_frame(frame, area);
    let key = Style::default().fg(Color::White);
    let label = Style::default().fg(Color::DarkGray);

    let lines = vec![
        Line::from(Span::styled(
            "Controls:",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(" ←/A →/D ", key),
            Span::styled("Rotate", label),
        ]),
        Line::from(vec![
            Span::styled(" Space/↑ ", key),
            Span::styled("Thrust", label),
        ]),
        Line::from(vec![Span::styled(" Q/Esc   ", key), Span::styled("Abort", label)]),
        Line::from(vec![Span::styled(" Ctrl-C  ", key), Span::styled("Exit", label)]),
        Line::from(""),
        Line::from(Span::styled(
            "Score:",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(" fuel x difficulty", label)),
        Line::from(Span::styled(" minus tilt penalty", label)),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}
