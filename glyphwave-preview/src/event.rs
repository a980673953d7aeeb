use std::{
    sync::mpsc,
    thread,
    time::{Duration, Instant},
};

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};

#[derive(Debug, Clone)]
pub enum PreviewEvent {
    Input(KeyEvent),
    Resize(u16, u16),
    Tick,
}

/// Polls terminal input on a background thread and emits a tick every
/// `tick_rate`.
#[derive(Debug)]
pub struct EventHandler {
    receiver: mpsc::Receiver<PreviewEvent>,
    _handler: thread::JoinHandle<()>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (sender, receiver) = mpsc::channel();

        let handler = thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = tick_rate
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::ZERO);

                let polled = match event::poll(timeout) {
                    Ok(ready) => ready,
                    Err(e) => {
                        tracing::error!(error = %e, "unable to poll for terminal events");
                        break;
                    },
                };

                if polled && Self::forward_event(&sender).is_err() {
                    break;
                }

                if last_tick.elapsed() >= tick_rate {
                    if sender.send(PreviewEvent::Tick).is_err() {
                        break;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        Self { receiver, _handler: handler }
    }

    pub fn next(&self) -> Result<PreviewEvent, mpsc::RecvError> {
        self.receiver.recv()
    }

    pub fn try_next(&self) -> Option<PreviewEvent> {
        self.receiver.try_recv().ok()
    }

    /// Reads one terminal event; errors once the receiving side is gone.
    fn forward_event(sender: &mpsc::Sender<PreviewEvent>) -> Result<(), ()> {
        let event = match event::read() {
            Ok(CrosstermEvent::Key(e)) if e.kind == KeyEventKind::Press => PreviewEvent::Input(e),
            Ok(CrosstermEvent::Resize(w, h)) => PreviewEvent::Resize(w, h),
            Ok(_) => return Ok(()),
            Err(e) => {
                tracing::warn!(error = %e, "unable to read terminal event");
                return Ok(());
            },
        };

        sender.send(event).map_err(|_| ())
    }
}
