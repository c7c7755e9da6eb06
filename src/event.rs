use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};

pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    Tick,
}

impl Event {
    /// Terminal events worth forwarding; drags, scrolls, releases and focus
    /// changes are dropped here.
    fn from_terminal(event: crossterm::event::Event) -> Option<Self> {
        match event {
            crossterm::event::Event::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
            crossterm::event::Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(_) | MouseEventKind::Moved => Some(Event::Mouse(mouse)),
                _ => None,
            },
            crossterm::event::Event::Resize(w, h) => Some(Event::Resize(w, h)),
            _ => None,
        }
    }

    /// The same event in crossterm's terms, for handing to a menu.
    pub fn as_terminal(&self) -> Option<crossterm::event::Event> {
        match self {
            Event::Key(key) => Some(crossterm::event::Event::Key(*key)),
            Event::Mouse(mouse) => Some(crossterm::event::Event::Mouse(*mouse)),
            Event::Resize(w, h) => Some(crossterm::event::Event::Resize(*w, *h)),
            Event::Tick => None,
        }
    }
}

const MAX_READ_FAILURES: u32 = 8;

/// Consecutive `event::read` failures. Each one waits a little longer
/// before the next poll; after `MAX_READ_FAILURES` in a row the pump stops.
#[derive(Debug, Default)]
struct ReadFailures {
    count: u32,
}

impl ReadFailures {
    /// How long to wait before polling again, or `None` to give up.
    fn failed(&mut self) -> Option<Duration> {
        self.count += 1;
        if self.count >= MAX_READ_FAILURES {
            return None;
        }
        Some(Duration::from_millis(10 << self.count.min(6)))
    }

    fn reset(&mut self) {
        self.count = 0;
    }
}

pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::channel();
        let tick_rate = Duration::from_millis(tick_rate_ms);

        thread::spawn(move || {
            let mut failures = ReadFailures::default();
            loop {
                if event::poll(tick_rate).unwrap_or(false) {
                    match event::read() {
                        Ok(raw) => {
                            failures.reset();
                            if let Some(ev) = Event::from_terminal(raw) {
                                if tx.send(ev).is_err() {
                                    return;
                                }
                            }
                        }
                        Err(e) => match failures.failed() {
                            Some(wait) => {
                                log::warn!("Failed to read terminal event: {}", e);
                                thread::sleep(wait);
                            }
                            None => {
                                // Dropping tx makes next() fail and ends the main loop
                                log::error!("Giving up on terminal input after {} failed reads: {}", MAX_READ_FAILURES, e);
                                return;
                            }
                        },
                    }
                } else if tx.send(Event::Tick).is_err() {
                    return;
                }
            }
        });

        Self { rx }
    }

    pub fn next(&self) -> io::Result<Event> {
        self.rx.recv().map_err(io::Error::other)
    }
}
