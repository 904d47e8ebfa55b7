use alloc::vec::Vec;
use core::time::Duration;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq)]
enum TimerEvent {
    Tick(Generation),
    Task(DelayedTask),
}

#[derive(Copy, Clone, Debug)]
struct Timer {
    due: Duration,
    seq: u64,
    event: TimerEvent,
}

/// Deterministic host for a [`Session`] running on virtual time.
///
/// Commands are executed right after each session call. Timers fire in `(due, scheduling order)` order during
/// [`ManualDriver::advance`]. Delayed tasks are never cancelled, tasks from an earlier game still fire and
/// the session treats them as stale.
#[derive(Clone, Debug)]
pub struct ManualDriver {
    session: Session,
    now: Duration,
    seq: u64,
    ticker: Option<(Generation, Duration)>,
    timers: Vec<Timer>,
}

impl ManualDriver {
    pub fn new(session: Session) -> Self {
        let mut driver = Self {
            session,
            now: Duration::ZERO,
            seq: 0,
            ticker: None,
            timers: Vec::new(),
        };
        driver.pump();
        driver
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_session(self) -> Session {
        self.session
    }

    /// Virtual time since the driver was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn pending_tasks(&self) -> usize {
        self.timers
            .iter()
            .filter(|timer| matches!(timer.event, TimerEvent::Task(_)))
            .count()
    }

    pub fn flip(&mut self, coords: Coord2) -> Result<FlipOutcome> {
        let outcome = self.session.flip(coords)?;
        self.pump();
        Ok(outcome)
    }

    pub fn start(&mut self) -> Result<StartOutcome> {
        let outcome = self.session.start()?;
        self.pump();
        Ok(outcome)
    }

    pub fn reset(&mut self) -> Result<()> {
        self.session.reset()?;
        self.pump();
        Ok(())
    }

    /// Moves the clock forward, firing every timer that comes due, and returns the delayed task outcomes in order.
    pub fn advance(&mut self, by: Duration) -> Vec<TaskOutcome> {
        let target = self.now.saturating_add(by);
        let mut outcomes = Vec::new();

        while let Some(index) = self.next_due(target) {
            let timer = self.timers.swap_remove(index);
            self.now = timer.due;

            match timer.event {
                TimerEvent::Tick(generation) => {
                    self.session.tick(generation);
                    if let Some((current, period)) = self.ticker {
                        if current == generation {
                            self.push(timer.due.saturating_add(period), timer.event);
                        }
                    }
                }
                TimerEvent::Task(task) => {
                    let outcome = self.session.run(task);
                    log::trace!("{:?} at {:?}: {:?}", task.action, self.now, outcome);
                    outcomes.push(outcome);
                }
            }
            self.pump();
        }

        self.now = target;
        outcomes
    }

    fn next_due(&self, target: Duration) -> Option<usize> {
        self.timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due <= target)
            .min_by_key(|(_, timer)| (timer.due, timer.seq))
            .map(|(index, _)| index)
    }

    fn push(&mut self, due: Duration, event: TimerEvent) {
        self.seq += 1;
        self.timers.push(Timer {
            due,
            seq: self.seq,
            event,
        });
    }

    fn stop_ticker(&mut self) {
        self.ticker = None;
        self.timers
            .retain(|timer| !matches!(timer.event, TimerEvent::Tick(_)));
    }

    fn pump(&mut self) {
        for command in self.session.take_commands() {
            log::trace!("command at {:?}: {:?}", self.now, command);
            match command {
                Command::StartTicker { generation, period } => {
                    self.stop_ticker();
                    self.ticker = Some((generation, period));
                    self.push(self.now.saturating_add(period), TimerEvent::Tick(generation));
                }
                Command::StopTicker => self.stop_ticker(),
                Command::Schedule(task) => {
                    self.push(self.now.saturating_add(task.delay), TimerEvent::Task(task));
                }
            }
        }
    }
}
