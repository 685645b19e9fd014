use super::{runner::RunnerEvent, Process, ProcessKind, ProcessStatus, Snapshot};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use std::{
    io::{self, Stdout},
    sync::mpsc::{self, Receiver},
    thread,
    time::{Duration, Instant},
};
use tracing::{debug, error};
use tui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{
        Block, BorderType, Borders, Cell, Clear, Gauge, List, ListItem, Paragraph, Row, Table,
        Wrap,
    },
    Terminal,
};

pub enum DisplayEvent {
    Input(KeyEvent),
    Tick,
}

const TICK_RATE: Duration = Duration::from_millis(100);

const CPU_COLOR: Color = Color::Rgb(245, 158, 11);
const IO_COLOR: Color = Color::Rgb(59, 130, 246);
const WAITING_COLOR: Color = Color::Rgb(16, 185, 129);

const KEY_HINTS: &str =
    "space start/pause | s step | a add | x remove | f finished | ? help | q quit";

const HELP_SECTIONS: [(&str, &str); 4] = [
    (
        "Create process",
        "Press 'a' and type the priority (1 to 4), the type (cpu or io) and the burst time in \
         seconds, e.g. \"2 cpu 5\". The process joins the queue matching its priority.",
    ),
    (
        "Priority queues",
        "There are 4 queues, numbered from 1 (highest) to 4 (lowest). They group the waiting \
         processes by priority. Which process runs next is decided by the active scheduler, \
         shown in the status bar.",
    ),
    (
        "Running and waiting",
        "A running process is being processed by the CPU for one second. A waiting process sits \
         in its queue until it is selected. Each executed second lowers the remaining time until \
         the process finishes or is removed.",
    ),
    (
        "Process table",
        "Lists the processes in the system with their PID, priority, arrival, burst and \
         remaining time, progress, state and accumulated wait. Finished processes are hidden \
         unless toggled with 'f'.",
    ),
];

enum Prompt {
    Create(String),
    Remove(String),
}

impl Prompt {
    fn label(&self) -> &'static str {
        match self {
            Prompt::Create(_) => "New process (priority type burst)",
            Prompt::Remove(_) => "Remove process (PID)",
        }
    }

    fn buffer(&self) -> &str {
        match self {
            Prompt::Create(buffer) | Prompt::Remove(buffer) => buffer,
        }
    }

    fn buffer_mut(&mut self) -> &mut String {
        match self {
            Prompt::Create(buffer) | Prompt::Remove(buffer) => buffer,
        }
    }

    fn submit(self) -> RunnerEvent {
        match self {
            Prompt::Create(buffer) => RunnerEvent::Create(buffer),
            Prompt::Remove(buffer) => RunnerEvent::Remove(buffer),
        }
    }
}

fn kind_color(kind: ProcessKind) -> Color {
    match kind {
        ProcessKind::CpuBound => CPU_COLOR,
        ProcessKind::IoBound => IO_COLOR,
    }
}

fn status_color(status: ProcessStatus) -> Color {
    match status {
        ProcessStatus::Waiting => WAITING_COLOR,
        ProcessStatus::Running => Color::LightBlue,
        ProcessStatus::Finished => Color::DarkGray,
    }
}

fn queue_color(priority: u8) -> Color {
    if priority <= 2 {
        CPU_COLOR
    } else {
        IO_COLOR
    }
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

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

fn process_row(process: &Process) -> Row<'static> {
    let status = process.status();
    Row::new(vec![
        Cell::from(process.id().to_string()).style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from(process.priority().to_string()),
        Cell::from(process.kind().label()).style(Style::default().fg(kind_color(process.kind()))),
        Cell::from(format!("{}s", process.arrival_time())),
        Cell::from(format!("{}s", process.burst_time())),
        Cell::from(format!("{}s", process.remaining_time())),
        Cell::from(process.progress_percentage()),
        Cell::from(status.to_string()).style(Style::default().fg(status_color(status))),
        Cell::from(format!("{}s", process.wait_time())),
    ])
}

pub struct DisplayTerminal {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    input_rx: Receiver<DisplayEvent>,
    prompt: Option<Prompt>,
    show_finished: bool,
    show_help: bool,
}

impl DisplayTerminal {
    pub fn new() -> Result<Self, io::Error> {
        crossterm::terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)?;

        // Set up the input handling thread
        let (input_tx, input_rx) = mpsc::channel();
        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = TICK_RATE
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::ZERO);

                match event::poll(timeout) {
                    Ok(true) => match event::read() {
                        Ok(Event::Key(key)) => {
                            if input_tx.send(DisplayEvent::Input(key)).is_err() {
                                break;
                            }
                        }
                        Ok(_) => {}
                        Err(e) => {
                            error!(error = %e, "Failed to read terminal events");
                            break;
                        }
                    },
                    Ok(false) => {}
                    Err(e) => {
                        error!(error = %e, "Failed to poll terminal events");
                        break;
                    }
                }

                if last_tick.elapsed() >= TICK_RATE {
                    if input_tx.send(DisplayEvent::Tick).is_err() {
                        break;
                    }
                    last_tick = Instant::now();
                }
            }
            debug!("Input thread stopped");
        });

        // Set up the terminal-user-interface
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            input_rx,
            prompt: None,
            show_finished: false,
            show_help: false,
        })
    }

    pub fn draw(
        &mut self,
        snapshot: &Snapshot,
        message: Option<&str>,
        tick_interval: Duration,
    ) -> Result<(), io::Error> {
        let show_finished = self.show_finished;
        let show_help = self.show_help;
        let prompt_line = match &self.prompt {
            Some(prompt) => Spans::from(vec![
                Span::styled(
                    format!("{}: ", prompt.label()),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("{}_", prompt.buffer())),
            ]),
            None => Spans::from(Span::styled(
                message.unwrap_or(KEY_HINTS).to_owned(),
                Style::default().fg(Color::Gray),
            )),
        };

        self.terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .margin(1)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Length(3),
                    Constraint::Length(9),
                    Constraint::Min(8),
                ])
                .split(f.size());

            let (state, state_color) = if snapshot.running {
                ("RUNNING", Color::LightGreen)
            } else {
                ("PAUSED", Color::LightRed)
            };
            let status = Paragraph::new(Spans::from(vec![
                Span::styled(
                    state,
                    Style::default()
                        .fg(state_color)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(
                    " | {} | tick {}ms | {} processes, {} waiting, {} finished | avg wait {:.1}s",
                    snapshot.scheduler,
                    tick_interval.as_millis(),
                    snapshot.stats.total,
                    snapshot.stats.waiting,
                    snapshot.stats.finished,
                    snapshot.stats.average_wait,
                )),
            ]))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("MLQ Scheduler")
                    .border_type(BorderType::Rounded),
            );
            f.render_widget(status, chunks[0]);

            let command = Paragraph::new(prompt_line)
                .block(Block::default().borders(Borders::ALL).title("Command"));
            f.render_widget(command, chunks[1]);

            // One column per priority level
            let queue_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Ratio(1, 4); 4])
                .split(chunks[2]);
            for (priority, bucket) in snapshot.queues.levels() {
                let items: Vec<ListItem> = bucket
                    .iter()
                    .map(|process| {
                        ListItem::new(format!(
                            "{} {} {}s",
                            process.id(),
                            process.kind().label(),
                            process.remaining_time()
                        ))
                        .style(Style::default().fg(kind_color(process.kind())))
                    })
                    .collect();
                let queue = List::new(items).block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(queue_color(priority)))
                        .title(format!("Queue {} ({})", priority, bucket.len())),
                );
                f.render_widget(queue, queue_chunks[priority as usize - 1]);
            }

            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
                .split(chunks[3]);

            let rows = snapshot
                .processes
                .iter()
                .filter(|process| show_finished || process.status() != ProcessStatus::Finished)
                .map(process_row);
            let table = Table::new(rows)
                .header(
                    Row::new(vec![
                        "PID", "Prio", "Type", "Arr", "Burst", "Rest", "%", "State", "Wait",
                    ])
                    .style(Style::default().add_modifier(Modifier::BOLD)),
                )
                .widths(&[
                    Constraint::Length(5),
                    Constraint::Length(4),
                    Constraint::Length(9),
                    Constraint::Length(4),
                    Constraint::Length(5),
                    Constraint::Length(5),
                    Constraint::Length(5),
                    Constraint::Length(8),
                    Constraint::Length(5),
                ])
                .block(Block::default().title("Processes").borders(Borders::ALL))
                .column_spacing(1);
            f.render_widget(table, body[0]);

            let side = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Percentage(35),
                    Constraint::Min(4),
                ])
                .split(body[1]);

            let running_block = Block::default()
                .borders(Borders::ALL)
                .title("Running")
                .border_type(BorderType::Rounded);
            match snapshot.current_process() {
                Some(process) => {
                    let gauge = Gauge::default()
                        .block(running_block)
                        .gauge_style(Style::default().fg(kind_color(process.kind())))
                        .percent(process.progress().round().clamp(0.0, 100.0) as u16)
                        .label(format!(
                            "{} | {} | {}s left",
                            process.id(),
                            process.kind().label(),
                            process.remaining_time()
                        ));
                    f.render_widget(gauge, side[0]);
                }
                None => {
                    let idle = Paragraph::new("No process is currently running.")
                        .style(Style::default().fg(Color::Gray))
                        .block(running_block);
                    f.render_widget(idle, side[0]);
                }
            }

            let waiting: Vec<ListItem> = snapshot
                .waiting_processes()
                .map(|process| {
                    ListItem::new(format!(
                        "{} | prio {} | {}s left | waited {}s",
                        process.id(),
                        process.priority(),
                        process.remaining_time(),
                        process.wait_time()
                    ))
                    .style(Style::default().fg(WAITING_COLOR))
                })
                .collect();
            let waiting = List::new(waiting).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Waiting ({})", snapshot.stats.waiting))
                    .border_type(BorderType::Rounded),
            );
            f.render_widget(waiting, side[1]);

            let history = Table::new(snapshot.log.iter().map(|entry| {
                Row::new(vec![
                    Cell::from(entry.pid.to_string()),
                    Cell::from(entry.action.to_string()),
                    Cell::from(entry.time_of_day()),
                ])
            }))
            .header(
                Row::new(vec!["PID", "Event", "Time"])
                    .style(Style::default().add_modifier(Modifier::BOLD)),
            )
            .widths(&[
                Constraint::Length(5),
                Constraint::Length(18),
                Constraint::Length(8),
            ])
            .block(Block::default().title("History").borders(Borders::ALL))
            .column_spacing(1);
            f.render_widget(history, side[2]);

            if show_help {
                let area = centered_rect(70, 70, f.size());
                let mut text = Vec::new();
                for (title, body) in HELP_SECTIONS {
                    text.push(Spans::from(Span::styled(
                        title,
                        Style::default().add_modifier(Modifier::BOLD),
                    )));
                    text.push(Spans::from(body));
                    text.push(Spans::from(""));
                }
                text.push(Spans::from(KEY_HINTS));

                let help = Paragraph::new(text)
                    .wrap(Wrap { trim: true })
                    .alignment(Alignment::Left)
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .title("Help (esc to close)")
                            .border_type(BorderType::Rounded),
                    );
                f.render_widget(Clear, area);
                f.render_widget(help, area);
            }
        })?;
        Ok(())
    }

    pub fn get_input(&mut self) -> RunnerEvent {
        // A closed channel means the input thread is gone
        let key = match self.input_rx.recv() {
            Ok(DisplayEvent::Input(key)) => key,
            Ok(DisplayEvent::Tick) => return RunnerEvent::None,
            Err(_) => return RunnerEvent::Quit,
        };

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return RunnerEvent::Quit;
        }
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return RunnerEvent::None;
        }

        if self.prompt.is_some() {
            match key.code {
                KeyCode::Enter => {
                    if let Some(prompt) = self.prompt.take() {
                        return prompt.submit();
                    }
                }
                KeyCode::Esc => self.prompt = None,
                KeyCode::Char(c) => {
                    if let Some(prompt) = self.prompt.as_mut() {
                        prompt.buffer_mut().push(c);
                    }
                }
                KeyCode::Backspace => {
                    if let Some(prompt) = self.prompt.as_mut() {
                        prompt.buffer_mut().pop();
                    }
                }
                _ => {}
            }
            return RunnerEvent::None;
        }

        match key.code {
            KeyCode::Char('q') => return RunnerEvent::Quit,
            KeyCode::Char(' ') => return RunnerEvent::Toggle,
            KeyCode::Char('r') => return RunnerEvent::Start,
            KeyCode::Char('p') => return RunnerEvent::Pause,
            KeyCode::Char('s') => return RunnerEvent::Step,
            KeyCode::Char('a') => self.prompt = Some(Prompt::Create(String::new())),
            KeyCode::Char('x') => self.prompt = Some(Prompt::Remove(String::new())),
            KeyCode::Char('f') => self.show_finished = !self.show_finished,
            KeyCode::Char('?') => self.show_help = !self.show_help,
            KeyCode::Esc => self.show_help = false,
            _ => {}
        }
        RunnerEvent::None
    }
}

impl Drop for DisplayTerminal {
    fn drop(&mut self) {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
    }
}
