//! Wall-clock driver for [`AgentScheduler`].
//!
//! One dedicated thread owns the scheduler exclusively (moved in via
//! `thread::spawn`) and with it every agent timer.  No locks on the hot
//! path: registration commands arrive on a crossbeam channel and replies go
//! back on per-command channels.  Between commands the thread sleeps with
//! `recv_deadline` until the next due agent tick.

use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use gn_agent::{Agent, GoalSelector};
use gn_core::{AgentId, Cadence, Cell, Tick};
use gn_grid::Pathfinder;
use gn_net::Broadcaster;
use tracing::info;

use crate::{AgentScheduler, SchedulerObserver, SimError, SimResult};

enum Command {
    Register {
        position: Cell,
        cadence:  Option<Cadence>,
        reply:    Sender<SimResult<AgentId>>,
    },
    Deregister {
        id:    AgentId,
        reply: Sender<SimResult<Agent>>,
    },
    Shutdown,
}

/// Handle to a scheduler running on its own thread.
///
/// Scheduler tick `t` fires at `started + (t - start_tick)` ms of wall time,
/// where `start_tick` is the scheduler's [`now`][AgentScheduler::now] at
/// spawn.  Dropping the handle stops and joins the thread; use
/// [`shutdown`][Self::shutdown] to get the scheduler and observer back.
pub struct RealtimeScheduler<P, G, B, O>
where
    P: Pathfinder + 'static,
    G: GoalSelector + 'static,
    B: Broadcaster + 'static,
    O: SchedulerObserver + Send + 'static,
{
    commands: Sender<Command>,
    handle:   Option<JoinHandle<(AgentScheduler<P, G, B>, O)>>,
}

impl<P, G, B, O> RealtimeScheduler<P, G, B, O>
where
    P: Pathfinder + 'static,
    G: GoalSelector + 'static,
    B: Broadcaster + 'static,
    O: SchedulerObserver + Send + 'static,
{
    /// Move `scheduler` onto a new thread and start ticking in real time.
    pub fn spawn(scheduler: AgentScheduler<P, G, B>, observer: O) -> SimResult<Self> {
        let (commands, rx) = crossbeam_channel::unbounded();
        let handle = thread::Builder::new()
            .name("gn-scheduler".into())
            .spawn(move || DriverState::new(scheduler, observer, rx).run())?;
        Ok(Self { commands, handle: Some(handle) })
    }

    /// Register an agent with the configured cadence.  Its first tick is
    /// measured from the moment the driver applies the command.
    pub fn register(&self, position: Cell) -> SimResult<AgentId> {
        self.request(|reply| Command::Register { position, cadence: None, reply })
    }

    pub fn register_with(&self, position: Cell, cadence: Cadence) -> SimResult<AgentId> {
        self.request(|reply| Command::Register { position, cadence: Some(cadence), reply })
    }

    /// Remove an agent and cancel its pending tick.
    pub fn deregister(&self, id: AgentId) -> SimResult<Agent> {
        self.request(|reply| Command::Deregister { id, reply })
    }

    /// Stop the thread and return the scheduler and observer.
    pub fn shutdown(mut self) -> SimResult<(AgentScheduler<P, G, B>, O)> {
        // A send error means the thread already exited; join still applies.
        let _ = self.commands.send(Command::Shutdown);
        let handle = self.handle.take().ok_or(SimError::Stopped)?;
        handle.join().map_err(|_| SimError::ThreadPanicked)
    }

    fn request<T>(&self, make: impl FnOnce(Sender<SimResult<T>>) -> Command) -> SimResult<T> {
        let (reply, response) = crossbeam_channel::bounded(1);
        self.commands.send(make(reply)).map_err(|_| SimError::Stopped)?;
        response.recv().map_err(|_| SimError::Stopped)?
    }
}

impl<P, G, B, O> Drop for RealtimeScheduler<P, G, B, O>
where
    P: Pathfinder + 'static,
    G: GoalSelector + 'static,
    B: Broadcaster + 'static,
    O: SchedulerObserver + Send + 'static,
{
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = self.commands.send(Command::Shutdown);
            let _ = handle.join();
        }
    }
}

// ── Driver thread ─────────────────────────────────────────────────────────────

struct DriverState<P: Pathfinder, G: GoalSelector, B: Broadcaster, O: SchedulerObserver> {
    scheduler:  AgentScheduler<P, G, B>,
    observer:   O,
    commands:   Receiver<Command>,
    started:    Instant,
    start_tick: Tick,
}

impl<P: Pathfinder, G: GoalSelector, B: Broadcaster, O: SchedulerObserver> DriverState<P, G, B, O> {
    fn new(scheduler: AgentScheduler<P, G, B>, observer: O, commands: Receiver<Command>) -> Self {
        let start_tick = scheduler.now();
        Self { scheduler, observer, commands, started: Instant::now(), start_tick }
    }

    /// Main loop.  Runs until a shutdown command arrives or every handle is
    /// gone, then returns the scheduler and observer to the joiner.
    fn run(mut self) -> (AgentScheduler<P, G, B>, O) {
        info!(agents = self.scheduler.agent_count(), start = %self.start_tick, "realtime scheduler started");

        loop {
            // 1. Run everything that is due.
            self.catch_up();

            // 2. Sleep until the next due tick or the next command.
            let message = match self.scheduler.next_due().and_then(|due| self.deadline(due)) {
                Some(deadline) => self.commands.recv_deadline(deadline),
                None => self.commands.recv().map_err(|_| RecvTimeoutError::Disconnected),
            };

            // 3. Apply the command against an up-to-date clock.
            match message {
                Ok(Command::Register { position, cadence, reply }) => {
                    self.catch_up();
                    let cadence = cadence.unwrap_or_else(|| self.scheduler.config().cadence());
                    let result = self.scheduler.register_with(position, cadence);
                    if let Ok(id) = &result {
                        self.observer.on_registered(*id, position);
                    }
                    let _ = reply.send(result);
                }
                Ok(Command::Deregister { id, reply }) => {
                    self.catch_up();
                    let result = self.scheduler.deregister(id);
                    if result.is_ok() {
                        self.observer.on_deregistered(id);
                    }
                    let _ = reply.send(result);
                }
                Ok(Command::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => {}
            }
        }

        info!(agents = self.scheduler.agent_count(), now = %self.scheduler.now(), "realtime scheduler stopped");
        (self.scheduler, self.observer)
    }

    fn catch_up(&mut self) {
        let now = self.start_tick + Tick::from_duration(self.started.elapsed()).0;
        self.scheduler.advance_to(now, &mut self.observer);
    }

    /// Wall-clock instant of `due`, or `None` if it is too far out to
    /// represent.
    fn deadline(&self, due: Tick) -> Option<Instant> {
        self.started.checked_add(Duration::from_millis(due.since(self.start_tick)))
    }
}
