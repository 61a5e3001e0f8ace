use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// `len` coordinates starting at `start`, each subsequent one offset by `step`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Coord2,
    pub len: u8,
    pub step: Step,
}

impl Segment {
    /// Iterates the coordinates this segment covers, first one being `start`.
    pub fn coords(&self) -> SegmentCoords {
        SegmentCoords {
            current: Some(self.start),
            remaining: self.len,
            step: self.step,
        }
    }

    /// Checks that the segment is non-empty and never leaves `bounds`.
    pub fn validate(&self, bounds: Coord2) -> Result<()> {
        if self.len == 0 {
            return Err(GameError::EmptySegment);
        }

        if self.start.0 >= bounds.0 || self.start.1 >= bounds.1 {
            return Err(GameError::OutOfBounds);
        }

        let mut cell = self.start;
        for _ in 1..self.len {
            cell = apply_step(cell, self.step, bounds).ok_or(GameError::OutOfBounds)?;
        }

        Ok(())
    }
}

/// Yields each coordinate of a segment in playback order.
///
/// Ends early if a step would leave the representable range; validated
/// segments never hit that case.
#[derive(Debug)]
pub struct SegmentCoords {
    current: Option<Coord2>,
    remaining: u8,
    step: Step,
}

impl Iterator for SegmentCoords {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let current = self.current?;
        self.remaining -= 1;
        self.current = crate::types::advance(current, self.step);

        Some(current)
    }
}

/// Authored data describing one level's cell sequence via compact segments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Program {
    segments: Vec<Segment>,
}

impl Program {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Total number of coordinates the program expands to.
    pub fn step_count(&self) -> usize {
        self.segments
            .iter()
            .map(|segment| usize::from(segment.len))
            .sum()
    }

    /// Flattens the program into its full coordinate sequence, in segment
    /// order then intra-segment order.
    pub fn expand(&self) -> Vec<Coord2> {
        self.segments
            .iter()
            .flat_map(Segment::coords)
            .collect()
    }

    pub fn validate(&self, bounds: Coord2) -> Result<()> {
        if self.segments.is_empty() {
            return Err(GameError::EmptyProgram);
        }

        for segment in &self.segments {
            segment.validate(bounds)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn segment_emits_start_then_steps() {
        let segment = Segment {
            start: (2, 3),
            len: 4,
            step: (1, 0),
        };

        let coords: Vec<_> = segment.coords().collect();

        assert_eq!(coords, vec![(2, 3), (3, 3), (4, 3), (5, 3)]);
    }

    #[test]
    fn segment_supports_negative_steps() {
        let segment = Segment {
            start: (5, 5),
            len: 3,
            step: (-1, -1),
        };

        let coords: Vec<_> = segment.coords().collect();

        assert_eq!(coords, vec![(5, 5), (4, 4), (3, 3)]);
        assert!(segment.validate((15, 12)).is_ok());
    }

    #[test]
    fn single_row_program_expands_in_order() {
        let program = Program::new(vec![Segment {
            start: (0, 0),
            len: 3,
            step: (0, 1),
        }]);

        assert_eq!(program.expand(), vec![(0, 0), (0, 1), (0, 2)]);
    }

    #[test]
    fn multi_segment_program_preserves_segment_order() {
        let program = Program::new(vec![
            Segment {
                start: (0, 0),
                len: 1,
                step: (0, 1),
            },
            Segment {
                start: (1, 1),
                len: 2,
                step: (1, 0),
            },
        ]);

        assert_eq!(program.expand(), vec![(0, 0), (1, 1), (2, 1)]);
        assert_eq!(program.step_count(), 3);
    }

    #[test]
    fn empty_program_expands_to_nothing_but_fails_validation() {
        let program = Program::new(vec![]);

        assert!(program.expand().is_empty());
        assert_eq!(program.validate((15, 12)), Err(GameError::EmptyProgram));
    }

    #[test]
    fn validate_rejects_zero_length_segments() {
        let segment = Segment {
            start: (0, 0),
            len: 0,
            step: (0, 1),
        };

        assert_eq!(segment.validate((15, 12)), Err(GameError::EmptySegment));
    }

    #[test]
    fn validate_rejects_walks_leaving_the_grid() {
        let underflow = Segment {
            start: (0, 0),
            len: 2,
            step: (0, -1),
        };
        let overflow = Segment {
            start: (0, 10),
            len: 3,
            step: (0, 1),
        };

        assert_eq!(underflow.validate((15, 12)), Err(GameError::OutOfBounds));
        assert_eq!(overflow.validate((15, 12)), Err(GameError::OutOfBounds));
    }

    #[test]
    fn validate_rejects_start_outside_the_grid() {
        let segment = Segment {
            start: (15, 0),
            len: 1,
            step: (0, 0),
        };

        assert_eq!(segment.validate((15, 12)), Err(GameError::OutOfBounds));
    }
}
