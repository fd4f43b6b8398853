//! Outward spiral walk over chunk coordinates.

use kiln_core::ChunkPos;

/// Cursor over the classic outward square spiral, starting at `(0, 0)`:
/// east, south, west, north, with the leg length incremented after
/// every two legs.
///
/// The first advances visit `(1,0) (1,1) (0,1) (-1,1) (-1,0) (-1,-1)
/// (0,-1) (1,-1) (2,-1) …`, tracing concentric rectangles around the
/// origin.
#[derive(Clone, Debug)]
pub struct SpiralCursor {
    x: i32,
    z: i32,
    dir: u8,
    leg_len: u32,
    steps_on_leg: u32,
    legs_at_len: u32,
}

impl Default for SpiralCursor {
    fn default() -> Self {
        Self {
            x: 0,
            z: 0,
            dir: 0,
            leg_len: 1,
            steps_on_leg: 0,
            legs_at_len: 0,
        }
    }
}

impl SpiralCursor {
    /// A cursor positioned at the origin; the first
    /// [`next`](SpiralCursor::next) returns `(1, 0)`.
    pub fn new() -> Self {
        Self::default()
    }

    /// The position most recently returned (the origin initially).
    pub fn current(&self) -> ChunkPos {
        ChunkPos::new(self.x, self.z)
    }

    /// Advance one step along the spiral and return the new position.
    pub fn next(&mut self) -> ChunkPos {
        match self.dir {
            0 => self.x += 1, // east
            1 => self.z += 1, // south
            2 => self.x -= 1, // west
            _ => self.z -= 1, // north
        }
        self.steps_on_leg += 1;
        if self.steps_on_leg >= self.leg_len {
            self.steps_on_leg = 0;
            self.dir = (self.dir + 1) & 3;
            self.legs_at_len += 1;
            if self.legs_at_len == 2 {
                self.legs_at_len = 0;
                self.leg_len += 1;
            }
        }
        ChunkPos::new(self.x, self.z)
    }
}
