use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};

#[derive(Clone, Debug)]
pub enum Event {
    Key(KeyEvent),
    Tick,
    Resize,
    /// Stop requested from outside (SIGINT / Ctrl+C on a cooked terminal).
    Interrupt,
}

pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    _task: tokio::task::JoinHandle<()>,
}

impl EventHandler {
    /// `read_input` enables terminal key/resize events; leave it off when the
    /// terminal is not in raw mode.
    pub fn new(tick_rate: Duration, read_input: bool) -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<Event>();

        let task = tokio::spawn(async move {
            let mut reader = read_input.then(event::EventStream::new);
            // The first tick lands one full period after startup.
            let mut tick_interval =
                tokio::time::interval_at(Instant::now() + tick_rate, tick_rate);
            tick_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let interrupt = tokio::signal::ctrl_c();
            tokio::pin!(interrupt);
            let mut interrupt_armed = true;

            loop {
                tokio::select! {
                    maybe_event = next_terminal_event(&mut reader) => {
                        match maybe_event {
                            Some(Ok(evt)) => {
                                let mapped = match evt {
                                    CrosstermEvent::Key(key) => Some(Event::Key(key)),
                                    CrosstermEvent::Resize(_, _) => Some(Event::Resize),
                                    _ => None,
                                };
                                if let Some(e) = mapped
                                    && tx.send(e).is_err()
                                {
                                    break;
                                }
                            }
                            Some(Err(_)) => break,
                            None => break,
                        }
                    }
                    _ = tick_interval.tick() => {
                        if tx.send(Event::Tick).is_err() {
                            break;
                        }
                    }
                    result = &mut interrupt, if interrupt_armed => {
                        match result {
                            Ok(()) => {
                                let _ = tx.send(Event::Interrupt);
                                break;
                            }
                            Err(err) => {
                                tracing::warn!("cannot listen for interrupts: {err}");
                                interrupt_armed = false;
                            }
                        }
                    }
                }
            }
        });

        Self { rx, _task: task }
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

async fn next_terminal_event(
    reader: &mut Option<event::EventStream>,
) -> Option<std::io::Result<CrosstermEvent>> {
    match reader {
        Some(stream) => stream.next().await,
        None => std::future::pending().await,
    }
}
