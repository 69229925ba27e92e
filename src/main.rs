use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use tracing_subscriber::EnvFilter;

use h2h_terminal::config::{self, AppConfig};
use h2h_terminal::feed;
use h2h_terminal::render;
use h2h_terminal::state::{AppState, Delta, Field, SearchCommand, apply_delta};

struct App {
    state: AppState,
    source_label: String,
    should_quit: bool,
    cmd_tx: Option<mpsc::Sender<SearchCommand>>,
}

impl App {
    fn new(cfg: &AppConfig, cmd_tx: Option<mpsc::Sender<SearchCommand>>) -> Self {
        Self {
            state: AppState::new(cfg),
            source_label: cfg.source.to_string(),
            should_quit: false,
            cmd_tx,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.help_overlay {
            self.state.help_overlay = false;
            return;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('s') if ctrl => self.state.swap_teams(),
            KeyCode::F(1) => self.state.help_overlay = true,
            KeyCode::F(2) => self.state.cycle_league(),
            KeyCode::F(3) => self.state.cycle_limit(),
            KeyCode::Tab | KeyCode::BackTab => self.state.toggle_focus(),
            KeyCode::Enter => self.request_search(),
            KeyCode::Backspace => self.state.backspace(),
            KeyCode::Down | KeyCode::PageDown => self.state.scroll_down(),
            KeyCode::Up | KeyCode::PageUp => self.state.scroll_up(),
            KeyCode::Char(ch) if !ctrl => self.state.input_char(ch),
            _ => {}
        }
    }

    fn request_search(&mut self) {
        let Some(tx) = &self.cmd_tx else {
            self.state.push_log("[INFO] Search worker unavailable");
            return;
        };
        let Ok(cmd) = self.state.begin_search() else {
            return;
        };
        if tx.send(cmd).is_err() {
            self.state.loading = false;
            self.state.push_log("[WARN] Search request failed");
        } else {
            self.state.push_log(format!(
                "[INFO] Searching {} vs {} ({})",
                self.state.team_a.trim(),
                self.state.team_b.trim(),
                self.state.league
            ));
        }
    }
}

fn main() -> io::Result<()> {
    config::load_dotenv();
    init_file_logging();
    let cfg = AppConfig::from_env();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    feed::spawn_search_worker(cfg.clone(), tx, cmd_rx);

    let mut app = App::new(&cfg, Some(cmd_tx));
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

/// Tracing output would corrupt the alternate screen, so it only goes to a
/// file, and only when `H2H_LOG_FILE` names one.
fn init_file_logging() {
    let Ok(path) = std::env::var("H2H_LOG_FILE") else {
        return;
    };
    let Ok(file) = OpenOptions::new().create(true).append(true).open(path.trim()) else {
        return;
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(app)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    render_form(frame, chunks[1], &app.state);
    render_results(frame, chunks[2], &app.state);

    let footer = Paragraph::new(footer_text(&app.state))
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(app: &App) -> String {
    format!(
        "H2H TERMINAL | {} | Last: {} | Source: {}",
        app.state.league, app.state.limit, app.source_label
    )
}

fn footer_text(state: &AppState) -> String {
    let status = state.logs.back().cloned().unwrap_or_default();
    format!(
        "Tab Switch | Enter Search | F2 League | F3 Count | ↑/↓ Scroll | F1 Help | Esc Quit   {status}"
    )
}

fn render_form(frame: &mut Frame, area: Rect, state: &AppState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_input(frame, cols[0], "Team 1", &state.team_a, state.focus == Field::TeamA);
    render_input(frame, cols[1], "Team 2", &state.team_b, state.focus == Field::TeamB);
}

fn render_input(frame: &mut Frame, area: Rect, title: &str, value: &str, focused: bool) {
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let text = if focused {
        format!("{value}_")
    } else {
        value.to_string()
    };
    let input = Paragraph::new(text).block(
        Block::default()
            .title(title.to_string())
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(input, area);
}

fn render_results(frame: &mut Frame, area: Rect, state: &AppState) {
    if state.loading {
        let loading = Paragraph::new("Loading...").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(loading, area);
        return;
    }
    if let Some(err) = state.error.as_deref() {
        let msg = Paragraph::new(format!("x {err}"))
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true });
        frame.render_widget(msg, area);
        return;
    }
    let Some(outcome) = state.outcome.as_ref() else {
        let empty = Paragraph::new("Enter two teams and press Enter")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    };

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(36), Constraint::Min(1)])
        .split(area);

    let stat_lines: Vec<Line> = render::stats_lines(&outcome.result)
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(
                    format!("{value:>4} "),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(label),
            ])
        })
        .collect();
    let stats = Paragraph::new(stat_lines).block(
        Block::default()
            .title(format!("Statistics ({})", outcome.result.total_matches()))
            .borders(Borders::ALL),
    );
    frame.render_widget(stats, cols[0]);

    let mut lines: Vec<Line> = Vec::new();
    for m in &outcome.result.matches {
        lines.push(Line::from(vec![
            Span::styled(
                render::format_date(&m.date),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw("  "),
            Span::styled(m.score_label(), Style::default().add_modifier(Modifier::BOLD)),
        ]));
        lines.push(Line::from(format!("H {}  vs  A {}", m.home_team, m.away_team)));
        lines.push(Line::from(Span::styled(
            format!("Competition: {}", m.competition),
            Style::default().fg(Color::DarkGray),
        )));

        let cards = outcome.annotations.cards_for(m);
        if !cards.is_empty() {
            let spans: Vec<Span> = render::card_labels(&cards)
                .into_iter()
                .map(|label| {
                    let color = if label.starts_with("[R]") {
                        Color::Red
                    } else {
                        Color::Yellow
                    };
                    Span::styled(format!("{label}  "), Style::default().fg(color))
                })
                .collect();
            lines.push(Line::from(spans));
        }
        for injury in outcome.annotations.injuries_for(m) {
            lines.push(Line::from(Span::styled(
                format!("+ {}", render::injury_label(injury)),
                Style::default().fg(Color::Magenta),
            )));
        }
        lines.push(Line::from(""));
    }

    let list = Paragraph::new(lines)
        .scroll((state.scroll, 0))
        .block(Block::default().title("Matches").borders(Borders::ALL));
    frame.render_widget(list, cols[1]);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "H2H Terminal - Help",
        "",
        "  Tab          Switch team field",
        "  Enter        Search",
        "  Ctrl+S       Swap teams",
        "  F2           Cycle league",
        "  F3           Cycle match count",
        "  ↑/↓          Scroll matches",
        "  F1           Toggle help",
        "  Esc          Quit",
        "",
        "Team names match case-insensitively on any part of the name.",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
