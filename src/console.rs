use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{self, Stylize},
    terminal,
};
use lifeduel::{Color, Decision, Game, Leaderboard, Paint, PlayerId, Signals};
use std::io::{self, Write};

pub enum ConsoleCommand {
    Exit,
    Move(PlayerId, Decision),
    Handled,
}

/// Each lattice cell takes two columns so it comes out roughly square
const CELL: &str = "██";
const CELL_COLUMNS: u16 = 2;

fn paint_color(paint: Paint) -> style::Color {
    match paint {
        Paint::Player(id) => player_color(id.color()),
        Paint::Alert => style::Color::DarkRed,
        Paint::Alive => style::Color::Grey,
        Paint::Dead => style::Color::DarkGrey,
    }
}

fn player_color(color: Color) -> style::Color {
    match color {
        Color::Blue => style::Color::Blue,
        Color::Orange => style::Color::Rgb {
            r: 255,
            g: 165,
            b: 0,
        },
    }
}

fn key_command(key: KeyEvent) -> Option<ConsoleCommand> {
    let command = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => ConsoleCommand::Exit,
        KeyCode::Esc => ConsoleCommand::Exit,
        KeyCode::Char('w') => ConsoleCommand::Move(PlayerId::One, Decision::Up),
        KeyCode::Char('s') => ConsoleCommand::Move(PlayerId::One, Decision::Down),
        KeyCode::Char('a') => ConsoleCommand::Move(PlayerId::One, Decision::Left),
        KeyCode::Char('d') => ConsoleCommand::Move(PlayerId::One, Decision::Right),
        KeyCode::Up => ConsoleCommand::Move(PlayerId::Two, Decision::Up),
        KeyCode::Down => ConsoleCommand::Move(PlayerId::Two, Decision::Down),
        KeyCode::Left => ConsoleCommand::Move(PlayerId::Two, Decision::Left),
        KeyCode::Right => ConsoleCommand::Move(PlayerId::Two, Decision::Right),
        _ => return None,
    };
    Some(command)
}

pub struct ConsoleRender {
    report: String,
    bell: bool,
}
impl ConsoleRender {
    pub fn new(bell: bool) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(Self {
            report: String::new(),
            bell,
        })
    }

    pub fn render(&self, game: &Game, leaderboard: &Leaderboard) -> io::Result<()> {
        let mut stdout = io::stdout();
        queue!(stdout, terminal::Clear(terminal::ClearType::All))?;
        for (pos, paint) in game.frame() {
            queue!(
                stdout,
                cursor::MoveTo(pos.x as u16 * CELL_COLUMNS, pos.y as u16),
                style::PrintStyledContent(CELL.with(paint_color(paint)))
            )?;
        }

        // score panel to the right of the field
        let panel_x = game.cells().width() as u16 * CELL_COLUMNS + 2;
        for (i, player) in game.players().iter().enumerate() {
            let top = i as u16 * 5;
            let color = player_color(player.color());
            let lines = [
                format!("{} (player {})", player.color(), player.id),
                format!("Score {}", player.score),
                format!("Lives {}", player.lives),
                format!("Wins  {}", leaderboard.wins(player.color())),
            ];
            for (row, line) in lines.into_iter().enumerate() {
                queue!(
                    stdout,
                    cursor::MoveTo(panel_x, top + row as u16),
                    style::PrintStyledContent(line.with(color))
                )?;
            }
        }

        let tick_y = game.players().len() as u16 * 5;
        queue!(
            stdout,
            cursor::MoveTo(panel_x, tick_y),
            style::Print(format!("Tick {}", game.tick_count()))
        )?;

        // write footer
        let footer_y = game.cells().height() as u16;
        queue!(
            stdout,
            cursor::MoveTo(0, footer_y),
            style::Print(&self.report)
        )?;

        stdout.flush()
    }

    /// Rings the terminal bell for damage or points, never waits on it
    pub fn signal(&self, signals: Signals) -> io::Result<()> {
        if self.bell && (signals.damage || signals.scored) {
            let mut stdout = io::stdout();
            queue!(stdout, style::Print('\x07'))?;
            stdout.flush()?;
        }
        Ok(())
    }

    pub fn poll_events(&mut self) -> io::Result<Option<ConsoleCommand>> {
        // make sure event is preset for us to take
        if !event::poll(std::time::Duration::from_secs(0))? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                Ok(Some(key_command(key).unwrap_or(ConsoleCommand::Handled)))
            }
            _ => Ok(Some(ConsoleCommand::Handled)),
        }
    }

    /// Shows the end-of-game message and blocks until a key is pressed
    pub fn announce(&mut self, game: &Game, message: &str) -> io::Result<ConsoleCommand> {
        let mut stdout = io::stdout();
        let panel_x = game.cells().width() as u16 * CELL_COLUMNS + 2;
        let top = game.players().len() as u16 * 5 + 1;
        let lines = ["Game Over!"]
            .into_iter()
            .chain(message.lines())
            .chain(["", "any key: next game", "esc: quit"]);
        for (row, line) in lines.enumerate() {
            queue!(
                stdout,
                cursor::MoveTo(panel_x, top + row as u16),
                style::PrintStyledContent(line.bold())
            )?;
        }
        stdout.flush()?;

        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                return Ok(match key_command(key) {
                    Some(ConsoleCommand::Exit) => ConsoleCommand::Exit,
                    _ => ConsoleCommand::Handled,
                });
            }
        }
    }

    pub fn set_report(&mut self, report: String) {
        self.report = report;
    }
}
impl Drop for ConsoleRender {
    fn drop(&mut self) {
        // if we can enable it, we should be able to disable it
        terminal::disable_raw_mode().expect("disable raw mode");
        execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen)
            .expect("restore terminal");
    }
}
