use alloc::vec::Vec;
use smallvec::SmallVec;

use crate::*;

/// How long a highlighted or error-flagged cell stays lit, in milliseconds.
pub const HOLD_MILLIS: u32 = 200;

/// The two per-cell visual flags the board exposes to the engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellFlag {
    Highlight,
    Error,
}

/// One imperative operation for the board to carry out.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BoardOp {
    Set(Coord2, CellFlag),
    Clear(Coord2, CellFlag),
}

/// Board operations produced by a single transition; at most two in the
/// common case.
pub type BoardOps = SmallVec<[BoardOp; 2]>;

/// How a finished level resolves.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LevelOutcome {
    Advance,
    Retry,
}

/// What the driver must arrange after a transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlaybackPhase {
    /// Wait [`HOLD_MILLIS`], then feed back [`Playback::on_hold_elapsed`].
    Hold,
    /// Arm the click gate, then feed back [`Playback::on_click`].
    AwaitClick,
    /// Terminal. `None` only for an empty sequence, which resolves neither way.
    Finished(Option<LevelOutcome>),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum PlaybackState {
    Ready,
    Showing(usize),
    AwaitingInput { expected: Coord2 },
    Resolving { outcome: LevelOutcome, cell: Coord2 },
    Done,
}

/// Plays one level's coordinate sequence: every coordinate but the last is
/// flashed in strict order, the last one is never shown and instead waits for
/// the player's confirming click.
#[derive(Clone, Debug, PartialEq)]
pub struct Playback {
    steps: Vec<Coord2>,
    state: PlaybackState,
}

impl Playback {
    pub fn new(steps: Vec<Coord2>) -> Self {
        Self {
            steps,
            state: PlaybackState::Ready,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self.state, PlaybackState::Done)
    }

    pub fn start(&mut self) -> Result<(BoardOps, PlaybackPhase)> {
        if !matches!(self.state, PlaybackState::Ready) {
            return Err(GameError::AlreadyStarted);
        }

        if self.steps.is_empty() {
            self.state = PlaybackState::Done;
            return Ok((BoardOps::new(), PlaybackPhase::Finished(None)));
        }

        let mut ops = BoardOps::new();
        let phase = self.enter_step(0, &mut ops);
        Ok((ops, phase))
    }

    pub fn on_hold_elapsed(&mut self) -> Result<(BoardOps, PlaybackPhase)> {
        let mut ops = BoardOps::new();

        match self.state {
            PlaybackState::Showing(index) => {
                ops.push(BoardOp::Clear(self.steps[index], CellFlag::Highlight));
                let phase = self.enter_step(index + 1, &mut ops);
                Ok((ops, phase))
            }
            PlaybackState::Resolving { outcome, cell } => {
                ops.push(BoardOp::Clear(cell, flag_for(outcome)));
                self.state = PlaybackState::Done;
                Ok((ops, PlaybackPhase::Finished(Some(outcome))))
            }
            _ => Err(GameError::NoPendingHold),
        }
    }

    pub fn on_click(&mut self, cell: Coord2) -> Result<(BoardOps, PlaybackPhase)> {
        let PlaybackState::AwaitingInput { expected } = self.state else {
            return Err(GameError::NoPendingClick);
        };

        let outcome = if cell == expected {
            LevelOutcome::Advance
        } else {
            LevelOutcome::Retry
        };
        log::debug!("click at {cell:?}, expected {expected:?}: {outcome:?}");

        let mut ops = BoardOps::new();
        ops.push(BoardOp::Set(cell, flag_for(outcome)));
        self.state = PlaybackState::Resolving { outcome, cell };
        Ok((ops, PlaybackPhase::Hold))
    }

    /// Moves to step `index`: the last step is never shown and awaits the
    /// player instead, every other step is lit for one hold.
    fn enter_step(&mut self, index: usize, ops: &mut BoardOps) -> PlaybackPhase {
        if index + 1 == self.steps.len() {
            self.state = PlaybackState::AwaitingInput {
                expected: self.steps[index],
            };
            PlaybackPhase::AwaitClick
        } else {
            ops.push(BoardOp::Set(self.steps[index], CellFlag::Highlight));
            self.state = PlaybackState::Showing(index);
            PlaybackPhase::Hold
        }
    }
}

const fn flag_for(outcome: LevelOutcome) -> CellFlag {
    match outcome {
        LevelOutcome::Advance => CellFlag::Highlight,
        LevelOutcome::Retry => CellFlag::Error,
    }
}
