//! pathviz — a terminal pathfinding visualiser built on gridpath.
//!
//! Keys: `1`-`4` pick the algorithm, `s` cycles speed, `m` scatters walls,
//! `c` clears the path, `r` resets, arrows move the cursor, `w` toggles a
//! wall, `S`/`E` move Start/End to the cursor, space runs, `x` cancels and
//! `q` quits.

use std::time::Duration;

use gridpath_core::{Coord, Grid, diff};
use gridpath_playback::{Playback, Session, SessionConfig, SessionError, Step};
use gridpath_search::Algorithm;
use gridpath_term::{Key, TermDriver};

/// Input poll interval while idle.
const IDLE_POLL: Duration = Duration::from_millis(50);

struct App {
    session: Session,
    playback: Option<Playback>,
    /// Grid version last shown on screen.
    shown: Grid,
    cursor: Coord,
    note: String,
}

enum Flow {
    Continue,
    Quit,
}

impl App {
    fn new() -> Result<Self, SessionError> {
        let session = Session::new(SessionConfig::default())?;
        let shown = session.grid().clone();
        let cursor = session.grid().start();
        Ok(Self {
            session,
            playback: None,
            shown,
            cursor,
            note: String::new(),
        })
    }

    fn status(&self) -> String {
        let mut line = format!(
            "[{}] speed {}",
            self.session.algorithm(),
            self.session.speed()
        );
        if let Some(stats) = self.session.stats() {
            line.push_str(&format!(
                " | visited {} path {} search {:.3} ms",
                stats.visited_count,
                stats.path_length,
                stats.elapsed.as_secs_f64() * 1e3
            ));
        }
        if !self.note.is_empty() {
            line.push_str(" | ");
            line.push_str(&self.note);
        }
        line
    }

    fn redraw(&mut self, term: &mut TermDriver) -> std::io::Result<()> {
        term.set_cursor(Some(self.cursor));
        self.shown = self.session.grid().clone();
        term.draw(&self.shown, &self.status())
    }

    /// Advance the playback by one step and show what changed.
    ///
    /// Returns how long to wait for input before the next step.
    fn tick(&mut self, term: &mut TermDriver) -> std::io::Result<Duration> {
        let Some(pb) = self.playback.as_mut() else {
            return Ok(IDLE_POLL);
        };
        match self.session.step(pb) {
            Step::Applied { delay, .. } => {
                let frame = diff(&self.shown, self.session.grid());
                term.flush(&frame)?;
                self.shown = self.session.grid().clone();
                Ok(delay)
            }
            Step::Finished(_) => {
                self.playback = None;
                self.note.clear();
                self.redraw(term)?;
                Ok(IDLE_POLL)
            }
            Step::Cancelled => {
                self.playback = None;
                self.note = "cancelled".into();
                self.redraw(term)?;
                Ok(IDLE_POLL)
            }
        }
    }

    fn on_key(&mut self, key: Key) -> Flow {
        let edit = match key {
            Key::Char('q') | Key::Escape => return Flow::Quit,
            Key::Char(c @ '1'..='4') => {
                let idx = c as usize - '1' as usize;
                self.session.set_algorithm(Algorithm::ALL[idx]);
                Ok(())
            }
            Key::Char('s') => {
                self.session.set_speed(self.session.speed().next());
                Ok(())
            }
            Key::Up | Key::Down | Key::Left | Key::Right => {
                let (dr, dc) = match key {
                    Key::Up => (-1, 0),
                    Key::Down => (1, 0),
                    Key::Left => (0, -1),
                    _ => (0, 1),
                };
                let next = self.cursor.shift(dr, dc);
                if self.session.grid().contains(next) {
                    self.cursor = next;
                }
                Ok(())
            }
            Key::Char('w') => self.session.toggle_wall(self.cursor),
            Key::Char('S') => self.session.relocate_start(self.cursor),
            Key::Char('E') => self.session.relocate_end(self.cursor),
            Key::Char('m') => self.session.scatter_walls(&mut rand::rng()),
            Key::Char('c') => self.session.clear_path(),
            Key::Char('r') => self.session.reset(),
            Key::Char('x') => {
                self.session.cancel();
                Ok(())
            }
            Key::Char(' ') => self.session.run().map(|pb| {
                self.playback = Some(pb);
            }),
            _ => Ok(()),
        };
        self.note = match edit {
            Ok(()) => String::new(),
            Err(e) => e.to_string(),
        };
        Flow::Continue
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new()?;
    let mut term = TermDriver::new();
    term.init()?;
    app.redraw(&mut term)?;

    loop {
        let wait = app.tick(&mut term)?;
        let Some(key) = term.poll_key(wait)? else {
            continue;
        };
        if let Flow::Quit = app.on_key(key) {
            break;
        }
        if app.playback.is_some() {
            // Keep the running frame; only the status line changes.
            term.status(&app.status())?;
        } else {
            app.redraw(&mut term)?;
        }
    }

    app.session.cancel();
    term.close();
    Ok(())
}
