use crate::*;

/// What the driver must arrange next at the whole-game level.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GamePhase {
    /// Wait [`HOLD_MILLIS`], then feed back [`LevelRunner::on_hold_elapsed`].
    Hold,
    /// Arm the click gate, then feed back [`LevelRunner::on_click`].
    AwaitClick,
    /// Every level was cleared; nothing further will be accepted.
    Completed,
}

/// Drives level progression: advances through the catalog on confirmed
/// levels, replays the current level on a wrong click, and reports
/// completion once the catalog is exhausted.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelRunner {
    catalog: LevelCatalog,
    level: usize,
    playback: Option<Playback>,
}

impl LevelRunner {
    pub fn new(catalog: LevelCatalog) -> Self {
        Self {
            catalog,
            level: 0,
            playback: None,
        }
    }

    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    /// Index of the level currently being played.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Begins the game at the first level.
    pub fn start(&mut self) -> Result<(BoardOps, GamePhase)> {
        self.start_at(0)
    }

    /// Begins the game at `index`; an index past the catalog end completes
    /// immediately, like finishing the last level would.
    pub fn start_at(&mut self, index: usize) -> Result<(BoardOps, GamePhase)> {
        let mut ops = BoardOps::new();
        let phase = self.enter_level(index, &mut ops)?;
        Ok((ops, phase))
    }

    pub fn on_hold_elapsed(&mut self) -> Result<(BoardOps, GamePhase)> {
        let playback = self.playback.as_mut().ok_or(GameError::NoPendingHold)?;
        let (mut ops, phase) = playback.on_hold_elapsed()?;
        let game_phase = self.resolve(phase, &mut ops)?;
        Ok((ops, game_phase))
    }

    pub fn on_click(&mut self, cell: Coord2) -> Result<(BoardOps, GamePhase)> {
        let playback = self.playback.as_mut().ok_or(GameError::NoPendingClick)?;
        let (mut ops, phase) = playback.on_click(cell)?;
        let game_phase = self.resolve(phase, &mut ops)?;
        Ok((ops, game_phase))
    }

    /// Consumes a playback phase, chaining straight into the next (or same)
    /// level when the current one finished.
    fn resolve(&mut self, phase: PlaybackPhase, ops: &mut BoardOps) -> Result<GamePhase> {
        match phase {
            PlaybackPhase::Hold => Ok(GamePhase::Hold),
            PlaybackPhase::AwaitClick => Ok(GamePhase::AwaitClick),
            PlaybackPhase::Finished(Some(LevelOutcome::Advance)) => {
                self.enter_level(self.level + 1, ops)
            }
            PlaybackPhase::Finished(Some(LevelOutcome::Retry)) => {
                self.enter_level(self.level, ops)
            }
            // Validated catalogs carry no empty programs.
            PlaybackPhase::Finished(None) => Err(GameError::EmptyProgram),
        }
    }

    fn enter_level(&mut self, index: usize, ops: &mut BoardOps) -> Result<GamePhase> {
        let Some(program) = self.catalog.program(index) else {
            log::info!("level catalog exhausted after level {index}");
            self.playback = None;
            return Ok(GamePhase::Completed);
        };

        log::debug!("entering level {index}");
        self.level = index;

        let mut playback = Playback::new(program.expand());
        let (start_ops, phase) = playback.start()?;
        ops.extend(start_ops);
        self.playback = Some(playback);

        self.resolve(phase, ops)
    }
}
