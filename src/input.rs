/// Buffered keyboard input.
///
/// A dedicated thread blocks on crossterm's event stream and stores the
/// latest commands in an `InputBuffer`; the round loop consumes them at its
/// own pace. Every consume atomically reads and clears its flag, so a key
/// press is acted on exactly once.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;
use std::thread;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::entities::Direction;
use crate::game::InputSource;

const DIR_NONE: u8 = 0;
const DIR_UP: u8 = 1;
const DIR_DOWN: u8 = 2;
const DIR_LEFT: u8 = 3;
const DIR_RIGHT: u8 = 4;

fn encode(direction: Direction) -> u8 {
    match direction {
        Direction::None => DIR_NONE,
        Direction::Up => DIR_UP,
        Direction::Down => DIR_DOWN,
        Direction::Left => DIR_LEFT,
        Direction::Right => DIR_RIGHT,
    }
}

fn decode(raw: u8) -> Direction {
    match raw {
        DIR_UP => Direction::Up,
        DIR_DOWN => Direction::Down,
        DIR_LEFT => Direction::Left,
        DIR_RIGHT => Direction::Right,
        _ => Direction::None,
    }
}

#[derive(Debug, Default)]
pub struct InputBuffer {
    shot: AtomicBool,
    breakout: AtomicBool,
    direction: AtomicU8,
}

impl InputBuffer {
    pub fn new() -> InputBuffer {
        InputBuffer::default()
    }

    pub fn press_shot(&self) {
        self.shot.store(true, Ordering::Release);
    }

    pub fn press_breakout(&self) {
        self.breakout.store(true, Ordering::Release);
    }

    /// Only the most recent direction is kept; an unconsumed older command
    /// is overwritten.
    pub fn press_direction(&self, direction: Direction) {
        self.direction.store(encode(direction), Ordering::Release);
    }

    pub fn take_shot(&self) -> bool {
        self.shot.swap(false, Ordering::AcqRel)
    }

    pub fn take_breakout(&self) -> bool {
        self.breakout.swap(false, Ordering::AcqRel)
    }

    pub fn take_direction(&self) -> Direction {
        decode(self.direction.swap(DIR_NONE, Ordering::AcqRel))
    }
}

impl InputSource for Arc<InputBuffer> {
    fn consume_shot(&mut self) -> bool {
        self.take_shot()
    }

    fn consume_direction(&mut self) -> Direction {
        self.take_direction()
    }

    fn consume_breakout(&mut self) -> bool {
        self.take_breakout()
    }
}

/// Spawn the blocking event-read thread. It lives for the rest of the
/// process; it ends on its own when the terminal's event stream errors out
/// at shutdown.
pub fn spawn_input_thread(buffer: Arc<InputBuffer>) -> thread::JoinHandle<()> {
    thread::spawn(move || loop {
        let ev = match event::read() {
            Ok(ev) => ev,
            Err(_) => break,
        };
        let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
            continue;
        };
        if kind == KeyEventKind::Release {
            continue;
        }
        match code {
            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
                buffer.press_direction(Direction::Up)
            }
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
                buffer.press_direction(Direction::Down)
            }
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                buffer.press_direction(Direction::Left)
            }
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                buffer.press_direction(Direction::Right)
            }
            KeyCode::Char(' ') => buffer.press_shot(),
            KeyCode::Esc | KeyCode::Char('p') | KeyCode::Char('P') => buffer.press_breakout(),
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                buffer.press_breakout()
            }
            _ => {}
        }
    })
}
