//! In-flight rendering.
//!
//! Renders terrain, pads, the craft sprite with rotation, thrust flame and
//! HUD instruments into a cell buffer scaled from the 800x600 playfield.

use super::common::{
    create_game_layout, limit_color, render_info_panel_frame, render_status_bar,
    render_too_small,
};
use lunar_lander::lander::types::{MAX_LANDING_VX, MAX_LANDING_VY};
use lunar_lander::lander::{SpriteAngle, FIELD_HEIGHT, FIELD_WIDTH};
use lunar_lander::Session;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const MIN_WIDTH: u16 = 40;
const MIN_HEIGHT: u16 = 14;

pub fn render_play_scene(frame: &mut Frame, area: Rect, session: &Session) {
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        render_too_small(frame, area, MIN_WIDTH, MIN_HEIGHT);
        return;
    }

    let layout = create_game_layout(frame, area, " Lunar Lander ", Color::LightBlue, 10, 22);

    render_play_field(frame, layout.content, session);
    render_status_bar_content(frame, layout.status_bar, session);
    render_info_panel(frame, layout.info_panel, session);
}

#[derive(Clone, Copy)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

impl Cell {
    fn fg(ch: char, fg: Color) -> Self {
        Self {
            ch,
            fg,
            bg: Color::Reset,
        }
    }
}

/// Screen-cell buffer with playfield-to-cell scaling.
struct FieldBuffer {
    cells: Vec<Vec<Cell>>,
    width: usize,
    height: usize,
    x_scale: f64,
    y_scale: f64,
}

impl FieldBuffer {
    fn new(width: u16, height: u16) -> Self {
        Self {
            cells: vec![vec![Cell::default(); width as usize]; height as usize],
            width: width as usize,
            height: height as usize,
            x_scale: f64::from(width) / FIELD_WIDTH,
            y_scale: f64::from(height) / FIELD_HEIGHT,
        }
    }

    fn field_x(&self, col: usize) -> f64 {
        (col as f64 + 0.5) / self.x_scale
    }

    fn col(&self, x: f64) -> i32 {
        (x * self.x_scale).floor() as i32
    }

    fn row(&self, y: f64) -> i32 {
        (y * self.y_scale).floor() as i32
    }

    fn put(&mut self, col: i32, row: i32, cell: Cell) {
        if col >= 0 && row >= 0 && (col as usize) < self.width && (row as usize) < self.height {
            self.cells[row as usize][col as usize] = cell;
        }
    }

    /// Write text at a row, clipped to the buffer.
    fn text(&mut self, col: usize, row: usize, text: &str, fg: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.put((col + i) as i32, row as i32, Cell::fg(ch, fg));
        }
    }

    /// Right-aligned text with a one-cell margin.
    fn text_right(&mut self, row: usize, text: &str, fg: Color) {
        let start = self.width.saturating_sub(text.chars().count() + 1);
        self.text(start, row, text, fg);
    }
}

fn render_play_field(frame: &mut Frame, area: Rect, session: &Session) {
    if area.height < 2 || area.width < 10 {
        return;
    }

    let mut buffer = FieldBuffer::new(area.width, area.height);

    draw_stars(&mut buffer);
    draw_terrain(&mut buffer, session);
    draw_craft(&mut buffer, session);
    draw_hud(&mut buffer, session);

    for (row_idx, row_data) in buffer.cells.iter().enumerate() {
        let mut spans: Vec<Span> = Vec::new();
        let mut current_fg = Color::Reset;
        let mut current_bg = Color::Reset;
        let mut current_text = String::new();

        for &cell in row_data.iter() {
            if (cell.fg != current_fg || cell.bg != current_bg) && !current_text.is_empty() {
                spans.push(Span::styled(
                    std::mem::take(&mut current_text),
                    Style::default().fg(current_fg).bg(current_bg),
                ));
            }
            current_fg = cell.fg;
            current_bg = cell.bg;
            current_text.push(cell.ch);
        }
        if !current_text.is_empty() {
            spans.push(Span::styled(
                current_text,
                Style::default().fg(current_fg).bg(current_bg),
            ));
        }

        let row_area = Rect::new(area.x, area.y + row_idx as u16, area.width, 1);
        frame.render_widget(Paragraph::new(Line::from(spans)), row_area);
    }
}

fn draw_stars(buffer: &mut FieldBuffer) {
    // Fixed pseudo-random positions so the sky doesn't flicker
    for row in 0..buffer.height.saturating_sub(4) {
        for col in 0..buffer.width {
            match (row * 137 + col * 251 + 97) % 200 {
                0 => buffer.cells[row][col] = Cell::fg('.', Color::DarkGray),
                1 => buffer.cells[row][col] = Cell::fg('*', Color::Rgb(80, 80, 100)),
                _ => {}
            }
        }
    }
}

fn draw_terrain(buffer: &mut FieldBuffer, session: &Session) {
    let terrain = &session.terrain;
    for col in 0..buffer.width {
        let x = buffer.field_x(col);
        let Some(surface) = terrain.height_at(x) else {
            continue;
        };
        let surface_row = buffer.row(surface).max(0) as usize;
        let on_pad = terrain.pad_at(x).is_some();

        for row in surface_row..buffer.height {
            let cell = if row == surface_row {
                if on_pad {
                    Cell::fg('=', Color::Green)
                } else {
                    Cell::fg('^', Color::Rgb(140, 120, 100))
                }
            } else {
                Cell {
                    ch: if (row + col) % 3 == 0 { '.' } else { ' ' },
                    fg: Color::Rgb(60, 50, 40),
                    bg: Color::Rgb(30, 25, 20),
                }
            };
            buffer.cells[row][col] = cell;
        }
    }

    // Edge markers one row above each pad
    for pad in terrain.pads() {
        let row = buffer.row(pad.y) - 1;
        let left = buffer.col(pad.start_x);
        let right = buffer.col(pad.end_x()).min(buffer.width as i32 - 1);
        buffer.put(left, row, Cell::fg('[', Color::Green));
        buffer.put(right, row, Cell::fg(']', Color::Green));
    }
}

fn draw_craft(buffer: &mut FieldBuffer, session: &Session) {
    let craft = &session.craft;
    let cx = buffer.col(craft.x);
    let cy = buffer.row(craft.y);
    let angle = SpriteAngle::from_radians(craft.angle);

    if craft.thrusting {
        let flicker = session.tick_count;
        let color = if flicker % 2 == 0 {
            Color::Yellow
        } else {
            Color::LightRed
        };
        for (ch, (dx, dy)) in flame_sprite(angle, flicker) {
            buffer.put(cx + dx, cy + dy, Cell::fg(ch, color));
        }
    }

    for (ch, (dx, dy)) in lander_sprite(angle) {
        buffer.put(cx + dx, cy + dy, Cell::fg(ch, Color::White));
    }
}

fn draw_hud(buffer: &mut FieldBuffer, session: &Session) {
    let craft = &session.craft;

    // Fuel readout (top-left): integer count plus bar
    let fraction = session.fuel_fraction().clamp(0.0, 1.0);
    let fuel_color = if fraction < 0.2 {
        Color::Red
    } else if fraction < 0.5 {
        Color::Yellow
    } else {
        Color::Green
    };
    let label = format!("FUEL {:>4} ", craft.fuel);
    buffer.text(0, 0, &label, Color::White);
    let bar_width = 10usize;
    let filled = (fraction * bar_width as f64).round() as usize;
    let bar: String = (0..bar_width)
        .map(|i| if i < filled { '|' } else { ' ' })
        .collect();
    let bar_start = label.chars().count();
    buffer.text(bar_start, 0, "[", Color::DarkGray);
    buffer.text(bar_start + 1, 0, &bar, fuel_color);
    buffer.text(bar_start + 1 + bar_width, 0, "]", Color::DarkGray);

    // Altitude and velocities (top-right)
    let alt_text = match session.altitude() {
        Some(alt) => format!("ALT:{:.1}", alt),
        None => "ALT:---".to_string(),
    };
    let alt_color = if session.over_pad() {
        Color::Green
    } else {
        Color::White
    };
    buffer.text_right(0, &alt_text, alt_color);

    if buffer.height > 1 {
        let vy_text = format!("VY:{:+.2}", craft.vy);
        buffer.text_right(1, &vy_text, limit_color(craft.vy, MAX_LANDING_VY));
    }
    if buffer.height > 2 {
        let vx_text = format!("VX:{:+.2}", craft.vx);
        buffer.text_right(2, &vx_text, limit_color(craft.vx, MAX_LANDING_VX));
    }
}

/// Sprite cells as (char, (dx, dy)) offsets from the craft center.
fn lander_sprite(angle: SpriteAngle) -> [(char, (i32, i32)); 4] {
    match angle {
        SpriteAngle::Straight => [
            ('^', (0, -1)),
            ('|', (0, 0)),
            ('/', (-1, 1)),
            ('\\', (1, 1)),
        ],
        SpriteAngle::Left => [
            ('/', (-1, -1)),
            ('|', (0, 0)),
            ('/', (-1, 1)),
            ('_', (1, 1)),
        ],
        SpriteAngle::HardLeft => [
            ('/', (-1, -1)),
            ('-', (0, 0)),
            ('/', (-1, 1)),
            ('_', (1, 1)),
        ],
        SpriteAngle::Right => [
            ('\\', (1, -1)),
            ('|', (0, 0)),
            ('_', (-1, 1)),
            ('\\', (1, 1)),
        ],
        SpriteAngle::HardRight => [
            ('\\', (1, -1)),
            ('-', (0, 0)),
            ('_', (-1, 1)),
            ('\\', (1, 1)),
        ],
    }
}

/// Flame cells opposite the nose; length flickers with the tick counter.
fn flame_sprite(angle: SpriteAngle, tick: u64) -> Vec<(char, (i32, i32))> {
    let dx = match angle {
        SpriteAngle::Straight => 0,
        SpriteAngle::Left | SpriteAngle::HardLeft => 1,
        SpriteAngle::Right | SpriteAngle::HardRight => -1,
    };
    let mut cells = vec![('*', (dx, 2))];
    if tick % 3 != 0 {
        cells.push(('.', (dx * 2, 3)));
    }
    cells
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, session: &Session) {
    let (status, color) = if session.craft.fuel == 0 {
        ("NO FUEL", Color::Red)
    } else if session.over_pad() {
        ("Over pad", Color::Green)
    } else {
        ("Descending", Color::LightBlue)
    };

    render_status_bar(
        frame,
        area,
        status,
        color,
        &[
            ("[←/→]", "Rotate"),
            ("[Space/↑]", "Thrust"),
            ("[Q/Esc]", "Abort"),
        ],
    );
}

fn render_info_panel(frame: &mut Frame, area: Rect, session: &Session) {
    if area.width < 2 {
        return;
    }

    let inner = render_info_panel_frame(frame, area);
    let craft = &session.craft;
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White);

    let tilt_color = if craft.angle.abs() < session.angle_tolerance {
        Color::Green
    } else {
        Color::Red
    };
    let altitude = session
        .altitude()
        .map(|a| format!("{:.1}", a))
        .unwrap_or_else(|| "---".to_string());

    let lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled("Difficulty: ", label),
            Span::styled(session.difficulty.name(), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Fuel:  ", label),
            Span::styled(
                format!("{}", craft.fuel),
                value.add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Alt:   ", label),
            Span::styled(altitude, value),
        ]),
        Line::from(vec![
            Span::styled("VelX:  ", label),
            Span::styled(
                format!("{:+.3}", craft.vx),
                Style::default().fg(limit_color(craft.vx, MAX_LANDING_VX)),
            ),
        ]),
        Line::from(vec![
            Span::styled("VelY:  ", label),
            Span::styled(
                format!("{:+.3}", craft.vy),
                Style::default().fg(limit_color(craft.vy, MAX_LANDING_VY)),
            ),
        ]),
        Line::from(vec![
            Span::styled("Angle: ", label),
            Span::styled(
                format!("{:+.0}deg", craft.angle.to_degrees()),
                Style::default().fg(tilt_color),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Safe landing:",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(" VX  ", label),
            Span::styled(
                format!("<{}", MAX_LANDING_VX),
                Style::default().fg(Color::Green),
            ),
        ]),
        Line::from(vec![
            Span::styled(" VY  ", label),
            Span::styled(
                format!("<{}", MAX_LANDING_VY),
                Style::default().fg(Color::Green),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Tilt", label),
            Span::styled(
                format!(" <{:.1}deg", session.angle_tolerance.to_degrees()),
                Style::default().fg(Color::Green),
            ),
        ]),
        Line::from(vec![
            Span::styled(" On a ", label),
            Span::styled("[==]", Style::default().fg(Color::Green)),
            Span::styled(" pad", label),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}
