// TUI module for rendering the terminal interface
pub mod colors;
pub mod helpers;
pub mod input;

// Re-exports
pub use colors::*;
pub use helpers::{calculate_progress, columns_to_displacement, displacement_to_columns};
pub use input::{handle_key_event, handle_mouse_event, KeyAction, PointerAction, NUDGE_STEP};

use crate::domain::{Decision, DecisionQueue, DecisionSink, DecisionStatistics, ExitMotion, Job};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Gauge, Paragraph, Wrap},
    Frame,
};

const MAX_VISIBLE_SKILLS: usize = 6;
const CARD_MARGIN: u16 = 8;

/// UI view state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// Main swipe view
    Browsing,
    /// Help overlay visible
    Help,
    /// Summary screen at end
    Summary,
    /// Welcome screen shown on first launch
    Welcome,
}

/// Short-lived message shown in the footer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Toast {
    Success(String),
    Error(String),
}

/// Screen regions of the swipe view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MainLayout {
    pub header: Rect,
    pub card: Rect,
    pub next: Rect,
    pub footer: Rect,
}

pub fn main_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header with progress
            Constraint::Min(0),    // Current card
            Constraint::Length(3), // Next card
            Constraint::Length(3), // Footer
        ])
        .split(area);

    MainLayout {
        header: chunks[0],
        card: chunks[1],
        next: chunks[2],
        footer: chunks[3],
    }
}

/// Whether a terminal cell lies inside `rect`
pub fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

/// Width of the card drawn inside the card region
pub fn card_width(area: Rect) -> u16 {
    area.width.saturating_sub(CARD_MARGIN * 2).max(1)
}

/// Renders the swipe view
pub fn render<S>(
    frame: &mut Frame,
    queue: &DecisionQueue<Job, S>,
    filter_label: &str,
    toast: Option<&Toast>,
) where
    S: DecisionSink<String>,
{
    let layout = main_layout(frame.area());

    render_header(frame, layout.header, queue, filter_label);
    match queue.current() {
        Some(job) => render_card(frame, layout.card, job, queue),
        None => frame.render_widget(render_exhausted_widget(), layout.card),
    }
    if let Some(exit) = queue.last_exit() {
        render_exit_trail(frame, layout.card, exit);
    }
    render_next(frame, layout.next, queue.peek_next());
    render_footer(frame, layout.footer, toast);
}

fn render_header<S>(
    frame: &mut Frame,
    area: Rect,
    queue: &DecisionQueue<Job, S>,
    filter_label: &str,
) where
    S: DecisionSink<String>,
{
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let title_text = if queue.current().is_some() {
        format!(" Job {}/{} ", queue.cursor() + 1, queue.len())
    } else {
        " jswp ".to_string()
    };

    let title_line = Line::from(vec![
        Span::styled(
            title_text,
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" Filter: {}", filter_label),
            Style::default().fg(TEXT_SECONDARY),
        ),
    ]);

    let header = Paragraph::new(title_line)
        .block(
            Block::default()
                .borders(Borders::TOP | Borders::LEFT | Borders::RIGHT)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR)),
        )
        .alignment(Alignment::Left);

    frame.render_widget(header, chunks[0]);

    let total = queue.len();
    let position = queue.cursor();
    let progress = calculate_progress(position, total);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::BOTTOM | Borders::LEFT | Borders::RIGHT)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR)),
        )
        .gauge_style(Style::default().fg(ACCENT_SECONDARY).bg(BG_DARK))
        .ratio(progress)
        .label(format!("{}/{} jobs", position, total));

    frame.render_widget(gauge, chunks[1]);
}

/// Lines describing a job, as shown on its card
pub fn job_card_lines(job: &Job) -> Vec<Line<'_>> {
    let mut lines = vec![
        Line::from(Span::styled(
            job.title.as_str(),
            Style::default()
                .fg(TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            job.company_name(),
            Style::default().fg(TEXT_SECONDARY),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Location:   ", Style::default().fg(TEXT_SECONDARY)),
            Span::raw(job.location_or_remote()),
        ]),
        Line::from(vec![
            Span::styled("  Type:       ", Style::default().fg(TEXT_SECONDARY)),
            Span::raw(job.job_type.label()),
        ]),
        Line::from(vec![
            Span::styled("  Experience: ", Style::default().fg(TEXT_SECONDARY)),
            Span::raw(format!("{}+ years", job.experience_required)),
        ]),
    ];

    if let Some(salary) = &job.salary_range {
        lines.push(Line::from(vec![
            Span::styled("  Salary:     ", Style::default().fg(TEXT_SECONDARY)),
            Span::styled(
                salary.as_str(),
                Style::default()
                    .fg(ACCENT_HIGHLIGHT)
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
    }

    lines.push(Line::from(""));

    let (shown, hidden) = helpers::visible_skills(&job.skills_required, MAX_VISIBLE_SKILLS);
    if !shown.is_empty() {
        let mut spans = vec![Span::styled("  Skills: ", Style::default().fg(TEXT_SECONDARY))];
        for skill in shown {
            spans.push(Span::styled(
                format!("[{}] ", skill),
                Style::default().fg(ACCENT_SECONDARY),
            ));
        }
        if hidden > 0 {
            spans.push(Span::styled(
                format!("+{} more", hidden),
                Style::default().fg(TEXT_SECONDARY),
            ));
        }
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::raw(job.description.as_str())));
    lines
}

fn render_card<S>(frame: &mut Frame, area: Rect, job: &Job, queue: &DecisionQueue<Job, S>)
where
    S: DecisionSink<String>,
{
    let gesture = queue.gesture();
    let width = card_width(area);
    let slack = area.width.saturating_sub(width) / 2;
    let shift = displacement_to_columns(gesture.displacement, width, slack);
    let x = (area.x as i32 + slack as i32 + shift).max(area.x as i32) as u16;

    let card_area = Rect {
        x,
        y: area.y,
        width,
        height: area.height,
    }
    .intersection(area);

    let mut style = Style::default().fg(TEXT_PRIMARY);
    if gesture.opacity() < 1.0 {
        style = style.add_modifier(Modifier::DIM);
    }

    let tilt = if gesture.rotation() > 5.0 {
        " ↗"
    } else if gesture.rotation() < -5.0 {
        " ↖"
    } else {
        ""
    };

    let border_color = match gesture.leaning() {
        Some(Decision::Accept) if gesture.crosses(queue.threshold()) => ACCENT_SECONDARY,
        Some(Decision::Reject) if gesture.crosses(queue.threshold()) => ACCENT_PRIMARY,
        _ => BORDER_COLOR,
    };

    let card = Paragraph::new(job_card_lines(job))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(border_color))
                .title(format!(" {}{} ", job.company_name(), tilt)),
        )
        .style(style)
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, card_area);
    frame.render_widget(card, card_area);

    render_indicator(frame, area, queue);
}

/// Renders the APPLY or PASS stamp while a card is being dragged
fn render_indicator<S>(frame: &mut Frame, area: Rect, queue: &DecisionQueue<Job, S>)
where
    S: DecisionSink<String>,
{
    let gesture = queue.gesture();
    let Some(decision) = gesture.leaning() else {
        return;
    };

    let strength = gesture.indicator_strength(queue.threshold());
    let color = match decision {
        Decision::Accept => ACCENT_SECONDARY,
        Decision::Reject => ACCENT_PRIMARY,
    };
    let mut style = Style::default().fg(color);
    style = if strength >= 1.0 {
        style.add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        style.add_modifier(Modifier::DIM)
    };

    let label = format!(" {} ", decision.label());
    let label_width = label.chars().count() as u16;
    if area.width < label_width + 2 || area.height < 2 {
        return;
    }

    let x = match decision {
        Decision::Accept => area.x + area.width - label_width - 1,
        Decision::Reject => area.x + 1,
    };
    let stamp_area = Rect {
        x,
        y: area.y + 1,
        width: label_width,
        height: 1,
    };

    frame.render_widget(Paragraph::new(Span::styled(label, style)), stamp_area);
}

/// Marks the side the last committed card left through
fn render_exit_trail(frame: &mut Frame, area: Rect, exit: ExitMotion) {
    let (label, color) = match exit.decision {
        Decision::Accept => ("APPLIED →", ACCENT_SECONDARY),
        Decision::Reject => ("← PASSED", ACCENT_PRIMARY),
    };
    let label_width = label.chars().count() as u16;
    if area.width < label_width + 2 || area.height < 3 {
        return;
    }

    let x = if exit.offset > 0.0 {
        area.x + area.width - label_width - 1
    } else {
        area.x + 1
    };
    let trail_area = Rect {
        x,
        y: area.y + area.height - 2,
        width: label_width,
        height: 1,
    };

    let style = Style::default().fg(color).add_modifier(Modifier::DIM);
    frame.render_widget(Paragraph::new(Span::styled(label, style)), trail_area);
}

fn render_next(frame: &mut Frame, area: Rect, next: Option<&Job>) {
    let line = match next {
        Some(job) => Line::from(vec![
            Span::styled(" Up next: ", Style::default().fg(TEXT_SECONDARY)),
            Span::styled(job.title.as_str(), Style::default().fg(TEXT_PRIMARY)),
            Span::styled(
                format!(" at {}", job.company_name()),
                Style::default().fg(TEXT_SECONDARY),
            ),
        ]),
        None => Line::from(Span::styled(
            " Last job in the deck",
            Style::default().fg(TEXT_SECONDARY),
        )),
    };

    let widget = Paragraph::new(line)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR)),
        )
        .style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(widget, area);
}

/// Creates the widget shown once every job has been swiped
fn render_exhausted_widget() -> Paragraph<'static> {
    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "No more jobs!",
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Check back later for new opportunities",
            Style::default().fg(TEXT_SECONDARY),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press f to change the filter or u to go back",
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];

    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR)),
        )
        .alignment(Alignment::Center)
}

fn render_footer(frame: &mut Frame, area: Rect, toast: Option<&Toast>) {
    let line = match toast {
        Some(Toast::Success(message)) => Line::from(Span::styled(
            message.as_str(),
            Style::default()
                .fg(ACCENT_SECONDARY)
                .add_modifier(Modifier::BOLD),
        )),
        Some(Toast::Error(message)) => Line::from(Span::styled(
            format!("[!] {}", message),
            Style::default()
                .fg(ACCENT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
        None => Line::from(vec![
            Span::styled(
                " ← ",
                Style::default()
                    .fg(ACCENT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("Pass", Style::default().fg(TEXT_SECONDARY)),
            Span::raw("  │  "),
            Span::styled(
                "→ ",
                Style::default()
                    .fg(ACCENT_SECONDARY)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("Apply", Style::default().fg(TEXT_SECONDARY)),
            Span::raw("  │  "),
            Span::styled("h/l ", Style::default().fg(TEXT_SECONDARY)),
            Span::styled("Drag", Style::default().fg(TEXT_SECONDARY)),
            Span::raw("  │  "),
            Span::styled("u ", Style::default().fg(ACCENT_HIGHLIGHT)),
            Span::styled("Undo", Style::default().fg(TEXT_SECONDARY)),
            Span::raw("  │  "),
            Span::styled("? ", Style::default().fg(TEXT_SECONDARY)),
            Span::styled("Help", Style::default().fg(TEXT_SECONDARY)),
            Span::raw("  │  "),
            Span::styled("q ", Style::default().fg(TEXT_SECONDARY)),
            Span::styled("Quit", Style::default().fg(TEXT_SECONDARY)),
        ]),
    };

    let footer = Paragraph::new(line)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR)),
        )
        .alignment(Alignment::Center);

    frame.render_widget(footer, area);
}

/// Renders the summary screen at the end
pub fn render_summary(frame: &mut Frame, stats: &DecisionStatistics) {
    let summary_area = centered_rect(60, 50, frame.area());

    frame.render_widget(Clear, summary_area);

    let block = Block::default()
        .title(" Session Complete ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT_HIGHLIGHT))
        .style(Style::default().bg(BG_DARK));

    let inner = block.inner(summary_area);
    frame.render_widget(block, summary_area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Summary",
            Style::default()
                .fg(TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("   Total jobs:  "),
            Span::styled(
                format!("{}", stats.total_candidates),
                Style::default()
                    .fg(ACCENT_HIGHLIGHT)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("   ✓ ", Style::default().fg(ACCENT_SECONDARY)),
            Span::raw("Applied:  "),
            Span::styled(
                format!("{}", stats.applied),
                Style::default()
                    .fg(ACCENT_SECONDARY)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("   ✗ ", Style::default().fg(ACCENT_PRIMARY)),
            Span::raw("Passed:   "),
            Span::styled(
                format!("{}", stats.passed),
                Style::default()
                    .fg(ACCENT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("   ○ ", Style::default().fg(TEXT_SECONDARY)),
            Span::raw("Skipped:  "),
            Span::styled(
                format!("{}", stats.remaining()),
                Style::default().fg(TEXT_SECONDARY),
            ),
        ]),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "Press u to go back, any other key to exit",
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().fg(TEXT_PRIMARY));

    frame.render_widget(paragraph, inner);
}

/// Renders the help overlay
pub fn render_help_overlay(frame: &mut Frame) {
    let help_area = centered_rect(50, 80, frame.area());

    frame.render_widget(Clear, help_area);

    let block = Block::default()
        .title(" Help ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT_HIGHLIGHT))
        .style(Style::default().bg(BG_DARK));

    let inner = block.inner(help_area);
    frame.render_widget(block, help_area);

    let key_line = |keys: &'static str, what: &'static str, color| {
        Line::from(vec![
            Span::styled(format!("  {:<12}", keys), Style::default().fg(color)),
            Span::raw(what),
        ])
    };

    let help_lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        key_line("→ or a", "Apply", ACCENT_SECONDARY),
        key_line("← or p", "Pass", ACCENT_PRIMARY),
        key_line("h / l", "Drag card", TEXT_SECONDARY),
        key_line("Enter", "Release card", TEXT_SECONDARY),
        key_line("u / Ctrl+Z", "Undo", ACCENT_HIGHLIGHT),
        key_line("f", "Cycle job type", TEXT_SECONDARY),
        key_line("o", "Open company site", TEXT_SECONDARY),
        key_line("q / Esc", "Quit", TEXT_SECONDARY),
        key_line("?", "Toggle help", TEXT_SECONDARY),
        Line::from(""),
        Line::from(Span::styled(
            "Mouse: drag the card past the line to decide",
            Style::default().fg(TEXT_SECONDARY),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press ? or Esc to close",
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];

    let paragraph = Paragraph::new(help_lines)
        .alignment(Alignment::Left)
        .style(Style::default().fg(TEXT_PRIMARY));

    frame.render_widget(paragraph, inner);
}

/// Renders the welcome dialog overlay
pub fn render_welcome_overlay(frame: &mut Frame) {
    let area = centered_rect(85, 85, frame.area());

    frame.render_widget(Clear, area);

    let welcome_lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Discover your next opportunity",
            Style::default()
                .fg(TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("Swipe "),
            Span::styled("right", Style::default().fg(ACCENT_SECONDARY)),
            Span::raw(" to apply, "),
            Span::styled("left", Style::default().fg(ACCENT_PRIMARY)),
            Span::raw(" to pass."),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  •  ", Style::default().fg(ACCENT_SECONDARY)),
            Span::raw("Use the arrow keys, or drag the card with the mouse or h/l"),
        ]),
        Line::from(vec![
            Span::styled("  •  ", Style::default().fg(ACCENT_SECONDARY)),
            Span::styled("'u'", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" goes back one job; applications already sent stay sent"),
        ]),
        Line::from(vec![
            Span::styled("  •  ", Style::default().fg(ACCENT_SECONDARY)),
            Span::raw("Run with "),
            Span::styled("--dry-run", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" to try it without saving swipes"),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to start swiping...",
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )),
    ];

    let welcome_text = Paragraph::new(welcome_lines)
        .block(
            Block::default()
                .title(Span::styled(
                    " Welcome to jswp ",
                    Style::default()
                        .fg(ACCENT_HIGHLIGHT)
                        .add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(ACCENT_HIGHLIGHT))
                .style(Style::default().bg(BG_DARK)),
        )
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });

    frame.render_widget(welcome_text, area);
}

/// Helper to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
