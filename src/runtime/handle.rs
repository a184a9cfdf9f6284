use chrono::{Local, NaiveDateTime};
use tokio::sync::{broadcast, mpsc, oneshot};

use crate::{
    booking::BookingOutcome,
    engine::BookingEngine,
    entity::{Club, Competition},
};

use super::events::BookingEvent;

/// Failures of the runtime plumbing itself, as opposed to booking
/// outcomes.
#[derive(Debug)]
pub enum RuntimeError {
    /// The writer task is gone; no further commands can be served.
    ChannelClosed,
}

/// Tuning knobs for the single-writer loop.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Bound of the command queue feeding the writer task.
    pub cmd_queue_bound: usize,
    /// Capacity of the broadcast event channel.
    pub event_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            cmd_queue_bound: 256,
            event_capacity: 1024,
        }
    }
}

/// Cloneable handle to the single-writer booking task.
pub struct BookingHandle {
    cmd_tx: mpsc::Sender<Command>,
    events_tx: broadcast::Sender<BookingEvent>,
}

impl Clone for BookingHandle {
    fn clone(&self) -> Self {
        Self {
            cmd_tx: self.cmd_tx.clone(),
            events_tx: self.events_tx.clone(),
        }
    }
}

enum Command {
    ResolveClub {
        email: String,
        resp: oneshot::Sender<Option<Club>>,
    },
    ResolveContext {
        competition: String,
        club: String,
        resp: oneshot::Sender<Option<(Club, Competition)>>,
    },
    AttemptBooking {
        competition: String,
        club: String,
        places: String,
        now: Option<NaiveDateTime>,
        resp: oneshot::Sender<BookingOutcome>,
    },
    Clubs {
        resp: oneshot::Sender<Vec<Club>>,
    },
    Competitions {
        resp: oneshot::Sender<Vec<Competition>>,
    },
    Shutdown {
        resp: oneshot::Sender<()>,
    },
}

/// Moves `engine` into a dedicated writer task and returns a handle.
///
/// Every command is served to completion before the next is taken, so
/// concurrent callers are serialized by construction; this is the
/// "one booking at a time" discipline the synchronous engine requires.
pub fn spawn_booking(engine: BookingEngine, config: RuntimeConfig) -> BookingHandle {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(config.cmd_queue_bound);
    let (events_tx, _) = broadcast::channel::<BookingEvent>(config.event_capacity);

    let events_tx_loop = events_tx.clone();
    tokio::spawn(async move {
        let mut engine = engine;
        while let Some(cmd) = cmd_rx.recv().await {
            if handle_command(cmd, &mut engine, &events_tx_loop) {
                break;
            }
        }
    });

    BookingHandle { cmd_tx, events_tx }
}

impl BookingHandle {
    /// Subscribes to the booking event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<BookingEvent> {
        self.events_tx.subscribe()
    }

    /// Resolves a club by exact email.
    pub async fn resolve_club(&self, email: impl Into<String>) -> Result<Option<Club>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::ResolveClub {
                email: email.into(),
                resp: tx,
            })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Resolves the club/competition pair a booking form needs.
    pub async fn resolve_booking_context(
        &self,
        competition: impl Into<String>,
        club: impl Into<String>,
    ) -> Result<Option<(Club, Competition)>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::ResolveContext {
                competition: competition.into(),
                club: club.into(),
                resp: tx,
            })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Runs one booking transaction against the wall clock.
    pub async fn attempt_booking(
        &self,
        competition: impl Into<String>,
        club: impl Into<String>,
        places: impl Into<String>,
    ) -> Result<BookingOutcome, RuntimeError> {
        self.send_booking(competition.into(), club.into(), places.into(), None)
            .await
    }

    /// Runs one booking transaction against an injected instant, for
    /// deterministic callers and tests.
    pub async fn attempt_booking_at(
        &self,
        competition: impl Into<String>,
        club: impl Into<String>,
        places: impl Into<String>,
        now: NaiveDateTime,
    ) -> Result<BookingOutcome, RuntimeError> {
        self.send_booking(competition.into(), club.into(), places.into(), Some(now))
            .await
    }

    /// All clubs in storage order.
    pub async fn clubs(&self) -> Result<Vec<Club>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Clubs { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// All competitions in storage order.
    pub async fn competitions(&self) -> Result<Vec<Competition>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Competitions { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Stops the writer task after the commands already queued.
    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Shutdown { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    async fn send_booking(
        &self,
        competition: String,
        club: String,
        places: String,
        now: Option<NaiveDateTime>,
    ) -> Result<BookingOutcome, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::AttemptBooking {
                competition,
                club,
                places,
                now,
                resp: tx,
            })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }
}

fn handle_command(
    cmd: Command,
    engine: &mut BookingEngine,
    events_tx: &broadcast::Sender<BookingEvent>,
) -> bool {
    match cmd {
        Command::ResolveClub { email, resp } => {
            let _ = resp.send(engine.resolve_club(&email));
        }
        Command::ResolveContext {
            competition,
            club,
            resp,
        } => {
            let _ = resp.send(engine.resolve_booking_context(&competition, &club));
        }
        Command::AttemptBooking {
            competition,
            club,
            places,
            now,
            resp,
        } => {
            let now = now.unwrap_or_else(|| Local::now().naive_local());
            let outcome = engine.attempt_booking(&competition, &club, &places, now);
            match &outcome {
                BookingOutcome::Committed {
                    club,
                    competition,
                    places,
                } => {
                    let _ = events_tx.send(BookingEvent::Committed {
                        club: club.name.clone(),
                        competition: competition.name.clone(),
                        places: *places,
                    });
                }
                BookingOutcome::PersistenceFailure => {
                    let _ = events_tx.send(BookingEvent::SaveFailed {
                        club: club.clone(),
                        competition: competition.clone(),
                    });
                }
                _ => {}
            }
            let _ = resp.send(outcome);
        }
        Command::Clubs { resp } => {
            let _ = resp.send(engine.clubs().to_vec());
        }
        Command::Competitions { resp } => {
            let _ = resp.send(engine.competitions().to_vec());
        }
        Command::Shutdown { resp } => {
            let _ = resp.send(());
            return true;
        }
    }

    false
}
