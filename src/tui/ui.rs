//! UI rendering for the stepper.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, List, ListItem},
    style::{Color, Style, Modifier},
};
use crate::binary::FlagSet;
use crate::cpu::RunState;
use super::app::StepperApp;

/// Main draw function.
pub fn draw(frame: &mut Frame, app: &StepperApp) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(55),
            Constraint::Percentage(45),
        ])
        .split(frame.area());

    // Left side: program, registers and status
    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),
            Constraint::Length(7),
            Constraint::Length(3),
        ])
        .split(chunks[0]);

    draw_program(frame, left_chunks[0], app);
    draw_registers(frame, left_chunks[1], app);
    draw_status(frame, left_chunks[2], app);

    // Right side: memory, trace and help
    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),
            Constraint::Length(10),
            Constraint::Length(4),
        ])
        .split(chunks[1]);

    draw_memory(frame, right_chunks[0], app);
    draw_trace(frame, right_chunks[1], app);
    draw_help(frame, right_chunks[2]);
}

/// Program listing with the next statement highlighted.
fn draw_program(frame: &mut Frame, area: Rect, app: &StepperApp) {
    let items: Vec<ListItem> = app
        .get_listing()
        .into_iter()
        .map(|line| {
            let prefix = if line.is_next { "▶ " } else { "  " };
            let text = format!("{}{:02}: {}", prefix, line.index, line.text);

            let style = if line.is_next {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else if line.is_unknown {
                Style::default().fg(Color::Red)
            } else {
                Style::default()
            };

            ListItem::new(text).style(style)
        })
        .collect();

    let title = match app.datapath.preset_name() {
        Some(name) => format!(" Program: {} ", name),
        None => " Program ".to_string(),
    };

    let list = List::new(items)
        .block(Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)));

    frame.render_widget(list, area);
}

/// Registers, buses and both flag sets.
fn draw_registers(frame: &mut Frame, area: Rect, app: &StepperApp) {
    let state = app.datapath.state();
    let regs = &state.registers;
    let value = Style::default().fg(Color::White);

    let general: Vec<Span> = regs
        .general
        .iter()
        .enumerate()
        .flat_map(|(i, v)| {
            [
                Span::raw(format!("R{}:", i)),
                Span::styled(format!("{:<4}", v), value),
            ]
        })
        .collect();

    let mut flags_line = vec![Span::raw("FLAGS: ")];
    flags_line.extend(flag_spans(state.flags));
    flags_line.push(Span::raw("   ALU.flags: "));
    flags_line.extend(flag_spans(state.alu_flags));

    let content = vec![
        Line::from(vec![
            Span::raw("PC: "),
            Span::styled(format!("{:<4}", regs.pc), Style::default().fg(Color::Yellow)),
            Span::raw("IR: "),
            Span::styled(format!("{:<4}", regs.ir), value),
            Span::raw("MAR: "),
            Span::styled(format!("{:<4}", regs.mar), value),
            Span::raw("MDR: "),
            Span::styled(format!("{:<4}", regs.mdr), value),
        ]),
        Line::from(general),
        Line::from(vec![
            Span::raw("A: "),
            Span::styled(format!("{:<4}", state.bus_a), value),
            Span::raw("B: "),
            Span::styled(format!("{:<4}", state.bus_b), value),
            Span::raw("ALU: "),
            Span::styled(format!("{:<4}", state.alu_result), Style::default().fg(Color::Cyan)),
            Span::raw("State: "),
            Span::styled(format!("{:?}", state.status), status_style(state.status)),
        ]),
        Line::from(flags_line),
    ];

    let paragraph = Paragraph::new(content)
        .block(Block::default()
            .title(" Registers ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)));

    frame.render_widget(paragraph, area);
}

/// Memory as rows of eight cells.
fn draw_memory(frame: &mut Frame, area: Rect, app: &StepperApp) {
    let memory = app.datapath.memory();
    let mar = app.datapath.registers().mar as usize;
    let visible_rows = (area.height as usize).saturating_sub(2);
    let cells = memory.as_slice();

    let items: Vec<ListItem> = cells
        .chunks(8)
        .enumerate()
        .skip(app.mem_scroll)
        .take(visible_rows)
        .map(|(row, chunk)| {
            let base = row * 8;
            let mut spans = vec![Span::styled(format!("{:02X}: ", base), Style::default().fg(Color::DarkGray))];
            for (i, v) in chunk.iter().enumerate() {
                let style = if base + i == mar {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else if *v != 0 {
                    Style::default().fg(Color::White)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                spans.push(Span::styled(format!("{:02X} ", v), style));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default()
            .title(" Memory ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta)));

    frame.render_widget(list, area);
}

/// Most recent trace entries, newest last.
fn draw_trace(frame: &mut Frame, area: Rect, app: &StepperApp) {
    let trace = app.datapath.trace();
    let visible = (area.height as usize).saturating_sub(2);
    let skip = trace.len().saturating_sub(visible);

    let items: Vec<ListItem> = trace[skip..]
        .iter()
        .map(|e| ListItem::new(format!("{:02}  {:<18} {}", e.step, e.operation, e.result)))
        .collect();

    let list = List::new(items)
        .block(Block::default()
            .title(format!(" Trace ({}) ", trace.len()))
            .borders(Borders::ALL));

    frame.render_widget(list, area);
}

/// Draw status bar.
fn draw_status(frame: &mut Frame, area: Rect, app: &StepperApp) {
    let status = Paragraph::new(app.status.clone())
        .style(Style::default().fg(Color::White))
        .block(Block::default()
            .title(" Status ")
            .borders(Borders::ALL));

    frame.render_widget(status, area);
}

/// Draw help panel.
fn draw_help(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new(vec![
        Line::from("s: Step  r: Run  p: Pause  space: Run/Pause"),
        Line::from("x: Reset  ↑↓: Scroll memory  q: Quit"),
    ])
    .style(Style::default().fg(Color::DarkGray))
    .block(Block::default()
        .title(" Help ")
        .borders(Borders::ALL));

    frame.render_widget(help, area);
}

fn flag_spans(flags: FlagSet) -> Vec<Span<'static>> {
    [("Z", flags.zero), ("N", flags.negative), ("C", flags.carry), ("V", flags.overflow)]
        .into_iter()
        .map(|(name, set)| {
            let style = if set {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Span::styled(format!("{} ", name), style)
        })
        .collect()
}

fn status_style(status: RunState) -> Style {
    match status {
        RunState::Running => Style::default().fg(Color::Green),
        RunState::Paused => Style::default().fg(Color::Yellow),
        RunState::Completed => Style::default().fg(Color::Cyan),
        RunState::Idle => Style::default().fg(Color::Gray),
    }
}
