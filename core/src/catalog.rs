use alloc::vec;
use alloc::vec::Vec;

use crate::*;

/// Ordered, load-time-validated collection of level programs.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelCatalog {
    programs: Vec<Program>,
    bounds: Coord2,
}

impl LevelCatalog {
    /// Validates every program against `bounds` before accepting the catalog.
    pub fn new(programs: Vec<Program>, bounds: Coord2) -> Result<Self> {
        for program in &programs {
            program.validate(bounds)?;
        }

        Ok(Self { programs, bounds })
    }

    /// The levels shipped with the game, validated against the logo artwork.
    pub fn builtin() -> Result<Self> {
        Self::new(builtin_programs(), PixelGrid::logo().size())
    }

    /// Parses the authoring format: a JSON array of programs, each an array of
    /// `{"start": [row, col], "len": n, "step": [dr, dc]}` segments.
    pub fn from_json(json: &str, bounds: Coord2) -> Result<Self> {
        let programs: Vec<Program> = serde_json::from_str(json).map_err(|err| {
            log::error!("could not parse level data: {err}");
            GameError::MalformedLevelData
        })?;

        Self::new(programs, bounds)
    }

    pub fn program(&self, index: usize) -> Option<&Program> {
        self.programs.get(index)
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    pub fn bounds(&self) -> Coord2 {
        self.bounds
    }
}

#[rustfmt::skip]
fn builtin_programs() -> Vec<Program> {
    vec![
        // A straight run along the top row.
        Program::new(vec![
            Segment { start: (0, 0), len: 6, step: (0, 1) },
        ]),
        // Same row, skipping every other cell.
        Program::new(vec![
            Segment { start: (0, 0), len: 5, step: (0, 2) },
        ]),
        // Single hops with growing gaps.
        Program::new(vec![
            Segment { start: (0, 0), len: 1, step: (0, 1) },
            Segment { start: (0, 1), len: 1, step: (0, 2) },
            Segment { start: (0, 3), len: 1, step: (0, 2) },
            Segment { start: (0, 6), len: 1, step: (0, 2) },
            Segment { start: (0, 10), len: 1, step: (0, 2) },
        ]),
        // Straight down the first column.
        Program::new(vec![
            Segment { start: (0, 0), len: 6, step: (1, 0) },
        ]),
        // Wraps from the end of one row into the next.
        Program::new(vec![
            Segment { start: (0, 7), len: 5, step: (0, 1) },
            Segment { start: (1, 0), len: 12, step: (0, 1) },
            Segment { start: (2, 0), len: 1, step: (0, 1) },
        ]),
        // A staircase through the logo's eye.
        Program::new(vec![
            Segment { start: (2, 2), len: 2, step: (0, 1) },
            Segment { start: (3, 3), len: 2, step: (1, 0) },
            Segment { start: (4, 3), len: 3, step: (0, 1) },
            Segment { start: (5, 5), len: 1, step: (1, 0) },
        ]),
        // Alternating edge cells down both sides.
        Program::new(vec![
            Segment { start: (1, 0), len: 1, step: (0, 1) },
            Segment { start: (1, 11), len: 1, step: (0, 1) },
            Segment { start: (2, 0), len: 1, step: (0, 1) },
            Segment { start: (2, 11), len: 1, step: (0, 1) },
            Segment { start: (3, 0), len: 1, step: (0, 1) },
            Segment { start: (3, 11), len: 1, step: (0, 1) },
            Segment { start: (4, 0), len: 1, step: (0, 1) },
            Segment { start: (4, 11), len: 1, step: (0, 1) },
        ]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_validates_against_logo_bounds() {
        let catalog = LevelCatalog::builtin().unwrap();

        assert_eq!(catalog.len(), 7);
        assert_eq!(catalog.bounds(), (15, 12));
        assert!(!catalog.is_empty());
    }

    #[test]
    fn program_lookup_ends_one_past_the_last_level() {
        let catalog = LevelCatalog::builtin().unwrap();

        assert!(catalog.program(0).is_some());
        assert!(catalog.program(6).is_some());
        assert!(catalog.program(7).is_none());
    }

    #[test]
    fn catalog_rejects_out_of_bounds_level_data() {
        let programs = vec![Program::new(vec![Segment {
            start: (0, 10),
            len: 3,
            step: (0, 1),
        }])];

        assert_eq!(
            LevelCatalog::new(programs, (15, 12)),
            Err(GameError::OutOfBounds)
        );
    }

    #[test]
    fn catalog_rejects_empty_programs() {
        let programs = vec![Program::new(vec![])];

        assert_eq!(
            LevelCatalog::new(programs, (15, 12)),
            Err(GameError::EmptyProgram)
        );
    }

    #[test]
    fn from_json_parses_the_authoring_format() {
        let json = r#"[
            [{"start": [0, 0], "len": 3, "step": [0, 1]}],
            [{"start": [1, 1], "len": 2, "step": [1, 0]}]
        ]"#;

        let catalog = LevelCatalog::from_json(json, (15, 12)).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.program(0).unwrap().expand(),
            vec![(0, 0), (0, 1), (0, 2)]
        );
    }

    #[test]
    fn from_json_rejects_garbage() {
        assert_eq!(
            LevelCatalog::from_json("not json", (15, 12)),
            Err(GameError::MalformedLevelData)
        );
    }
}
