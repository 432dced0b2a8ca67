//! Full-screen menu of common commands.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::{Frame, Terminal};
use tokio::io::{AsyncBufReadExt, BufReader};
use zabbix_dna_core::config::OutputFormat;

use crate::context::Globals;
use crate::error::CliError;
use crate::output::get_formatter;

use super::run_line;

/// (label, command line)
const MENU_ITEMS: &[(&str, &str)] = &[
    ("List hosts", "host list"),
    ("List host groups", "hostgroup list"),
    ("List templates", "template list"),
    ("List proxies", "proxy list"),
    ("Active problems", "problem list"),
    ("Unacknowledged alarms", "problem alarms --unack"),
    ("Maintenance periods", "maintenance list"),
    ("List users", "user list"),
    ("Test API connection", "test-api"),
    ("Version", "version"),
];

type Backend = CrosstermBackend<io::Stdout>;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Restores the terminal when dropped, also on panic.
struct TerminalGuard {
    terminal: Terminal<Backend>,
}

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

#[derive(Debug, Default)]
struct MenuState {
    selected: usize,
}

impl MenuState {
    fn next(&mut self) {
        self.selected = (self.selected + 1) % MENU_ITEMS.len();
    }

    fn prev(&mut self) {
        self.selected = self.selected.checked_sub(1).unwrap_or(MENU_ITEMS.len() - 1);
    }

    fn command(&self) -> &'static str {
        MENU_ITEMS[self.selected].1
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Action {
    Run(&'static str),
    Quit,
}

/// Run menu until `q` or Esc
pub async fn run_menu(globals: &Globals) -> Result<(), CliError> {
    let mut state = MenuState::default();

    loop {
        let action = {
            let mut guard = TerminalGuard::enter()?;
            select(&mut guard.terminal, &mut state).await?
        };

        match action {
            Action::Quit => return Ok(()),
            Action::Run(line) => {
                println!("$ zabbix-dna {}\n", line);
                if let Err(e) = run_line(line, globals).await {
                    let format = globals.format.map(OutputFormat::from).unwrap_or_default();
                    eprintln!("{}", get_formatter(format).format_error(&e.to_string()));
                }
                wait_for_enter().await?;
            }
        }
    }
}

async fn select(terminal: &mut Terminal<Backend>, state: &mut MenuState) -> io::Result<Action> {
    loop {
        terminal.draw(|f| draw(f, state))?;

        // never block a runtime thread on terminal input
        while !event::poll(Duration::ZERO)? {
            tokio::time::sleep(POLL_INTERVAL).await;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(action) = handle_key(state, key.code) {
                return Ok(action);
            }
        }
    }
}

fn handle_key(state: &mut MenuState, code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Down | KeyCode::Char('j') => {
            state.next();
            None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.prev();
            None
        }
        KeyCode::Enter => Some(Action::Run(state.command())),
        _ => None,
    }
}

fn draw(f: &mut Frame<'_>, state: &MenuState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(1)])
        .split(f.area());

    let title = Paragraph::new(Line::from(vec![
        Span::styled("zabbix-dna ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::styled(env!("CARGO_PKG_VERSION"), Style::default().fg(Color::Green)),
    ]))
    .block(Block::default().borders(Borders::ALL))
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let items: Vec<ListItem> = MENU_ITEMS
        .iter()
        .map(|(label, command)| {
            ListItem::new(Line::from(vec![
                Span::raw(format!("{:<28}", label)),
                Span::styled(*command, Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Commands "))
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    let mut list_state = ListState::default().with_selected(Some(state.selected));
    f.render_stateful_widget(list, chunks[1], &mut list_state);

    let help = Paragraph::new("Up/Down select  Enter run  q quit").style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[2]);
}

async fn wait_for_enter() -> Result<(), CliError> {
    println!("\nPress Enter to return to the menu...");
    let mut line = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_wraps() {
        let mut state = MenuState::default();
        state.prev();
        assert_eq!(state.selected, MENU_ITEMS.len() - 1);
        state.next();
        assert_eq!(state.selected, 0);
        assert_eq!(state.command(), "host list");
    }

    #[test]
    fn test_key_handling() {
        let mut state = MenuState::default();
        assert_eq!(handle_key(&mut state, KeyCode::Down), None);
        assert_eq!(handle_key(&mut state, KeyCode::Char('j')), None);
        assert_eq!(handle_key(&mut state, KeyCode::Char('k')), None);
        assert_eq!(
            handle_key(&mut state, KeyCode::Enter),
            Some(Action::Run("hostgroup list"))
        );
        assert_eq!(handle_key(&mut state, KeyCode::Char('x')), None);
        assert_eq!(handle_key(&mut state, KeyCode::Esc), Some(Action::Quit));
    }

    #[test]
    fn test_menu_commands_parse() {
        for (_, line) in MENU_ITEMS {
            assert!(super::super::parse_line(line).unwrap().is_some(), "{}", line);
        }
    }
}
