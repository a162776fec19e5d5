use std::io;
use std::sync::mpsc::{self, Receiver, RecvError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use unsegen::input::Input;

use crate::config::Config;

pub enum Event {
    Input(Input),
    /// Animation clock, stamped when the tick was sent.
    Tick(Instant),
}

/// Serializes stdin input and animation ticks into one channel.
pub struct Dispatcher {
    rx: Receiver<Event>,
    _input_handle: JoinHandle<()>,
    _tick_handle: JoinHandle<()>,
}

impl Dispatcher {
    pub fn from_config(config: &Config) -> Dispatcher {
        let (tx, rx) = mpsc::channel();

        Dispatcher {
            _input_handle: spawn_input(tx.clone()),
            _tick_handle: spawn_ticker(tx, config.tick_rate),
            rx,
        }
    }

    pub fn next(&self) -> Result<Event, RecvError> {
        self.rx.recv()
    }
}

fn spawn_input(tx: Sender<Event>) -> JoinHandle<()> {
    thread::spawn(move || {
        let stdin = io::stdin();
        for input in Input::read_all(stdin.lock()) {
            match input {
                Ok(input) => {
                    if tx.send(Event::Input(input)).is_err() {
                        return;
                    }
                }
                Err(err) => log::warn!("Error reading input: {}", err),
            }
        }
        log::debug!("Input stream closed");
    })
}

/// Sends a tick every `tick_rate` until the receiving side hangs up.
fn spawn_ticker(tx: Sender<Event>, tick_rate: Duration) -> JoinHandle<()> {
    thread::spawn(move || {
        while tx.send(Event::Tick(Instant::now())).is_ok() {
            thread::sleep(tick_rate);
        }
    })
}
