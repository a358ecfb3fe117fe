use crate::app::App;
use crate::clipboard::Clipboard;
use crate::storage::PreferenceStore;
use crate::system::SystemScheme;
use crate::theme::Theme;
use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

struct Palette {
    bg: Color,
    fg: Color,
    accent: Color,
    muted: Color,
    flash: Color,
}

fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Dark => Palette {
            bg: Color::Black,
            fg: Color::White,
            accent: Color::Cyan,
            muted: Color::DarkGray,
            flash: Color::Green,
        },
        Theme::Light => Palette {
            bg: Color::White,
            fg: Color::Black,
            accent: Color::Blue,
            muted: Color::Gray,
            flash: Color::Magenta,
        },
    }
}

pub fn run_tui<S, C, Y>(app: &mut App<S, C>, system: &Y, scheme_poll: Duration) -> Result<()>
where
    S: PreferenceStore,
    C: Clipboard,
    Y: SystemScheme,
{
    // setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_loop(&mut terminal, app, system, scheme_poll);

    // restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_loop<S, C, Y>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<S, C>,
    system: &Y,
    scheme_poll: Duration,
) -> Result<()>
where
    S: PreferenceStore,
    C: Clipboard,
    Y: SystemScheme,
{
    let mut last_poll = Instant::now();

    loop {
        terminal.draw(|f| draw(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if let Err(e) = app.handle_key(key, Instant::now()) {
                    tracing::warn!(error = %e, "key handler failed");
                }
            }
        }
        if app.should_quit {
            return Ok(());
        }

        let now = Instant::now();
        if now.duration_since(last_poll) >= scheme_poll {
            last_poll = now;
            if let Err(e) = app.on_system_scheme_change(system.prefers_dark()) {
                tracing::warn!(error = %e, "system scheme update failed");
            }
        }
        app.tick(now);
    }
}

pub fn draw<S, C>(frame: &mut Frame, app: &App<S, C>)
where
    S: PreferenceStore,
    C: Clipboard,
{
    let colors = palette(app.theme);
    frame.render_widget(
        Block::default().style(Style::default().bg(colors.bg).fg(colors.fg)),
        frame.size(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Input
            Constraint::Length(3), // Output
            Constraint::Min(0),
            Constraint::Length(3), // Footer
        ])
        .split(frame.size());

    draw_header(frame, chunks[0], app, &colors);
    draw_input(frame, chunks[1], app, &colors);
    draw_output(frame, chunks[2], app, &colors);
    draw_footer(frame, chunks[4], app, &colors);
}

fn draw_header<S, C>(frame: &mut Frame, area: Rect, app: &App<S, C>, colors: &Palette)
where
    S: PreferenceStore,
    C: Clipboard,
{
    let theme_label = match app.theme {
        Theme::Dark => "Dark (Ctrl+T for light)",
        Theme::Light => "Light (Ctrl+T for dark)",
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " Uptime Formatter ",
            Style::default()
                .fg(colors.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | Theme: "),
        Span::styled(theme_label, Style::default().fg(colors.muted)),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn draw_input<S, C>(frame: &mut Frame, area: Rect, app: &App<S, C>, colors: &Palette)
where
    S: PreferenceStore,
    C: Clipboard,
{
    let block = Block::default()
        .title(" Seconds ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.accent));
    let input = Paragraph::new(app.input.as_str()).block(block);
    frame.render_widget(input, area);

    // The field always holds focus; keep the caret at the end of the text.
    let typed = u16::try_from(app.input.chars().count()).unwrap_or(u16::MAX);
    let caret_x = area.x.saturating_add(1).saturating_add(typed);
    frame.set_cursor(caret_x.min(area.right().saturating_sub(2)), area.y + 1);
}

fn draw_output<S, C>(frame: &mut Frame, area: Rect, app: &App<S, C>, colors: &Palette)
where
    S: PreferenceStore,
    C: Clipboard,
{
    let border = if app.is_flashing() {
        colors.flash
    } else {
        colors.muted
    };
    let block = Block::default()
        .title(" Result ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let output = Paragraph::new(Span::styled(
        app.result.as_str(),
        Style::default().add_modifier(Modifier::BOLD),
    ))
    .block(block);
    frame.render_widget(output, area);
}

fn draw_footer<S, C>(frame: &mut Frame, area: Rect, app: &App<S, C>, colors: &Palette)
where
    S: PreferenceStore,
    C: Clipboard,
{
    let help = Paragraph::new(Line::from(vec![
        Span::raw("Enter: Calculate | "),
        Span::styled(
            format!("Ctrl+Y: {}", app.copy_label()),
            Style::default().fg(colors.accent),
        ),
        Span::raw(" | Ctrl+T: Theme | Esc: Quit"),
    ]))
    .block(Block::default().borders(Borders::ALL))
    .alignment(Alignment::Center);
    frame.render_widget(help, area);
}
