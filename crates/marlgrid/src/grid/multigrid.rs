//! Cell storage.

use super::objects::WorldObj;

/// Rectangular grid holding at most one static object per cell
#[derive(Clone, Debug, PartialEq)]
pub struct MultiGrid {
    width: usize,
    height: usize,
    cells: Vec<Option<WorldObj>>,
}

impl MultiGrid {
    /// Create an empty grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Object at `(x, y)`; out-of-bounds cells read as empty
    pub fn get(&self, x: usize, y: usize) -> Option<WorldObj> {
        if self.in_bounds(x, y) {
            self.cells[y * self.width + x]
        } else {
            None
        }
    }

    /// Overwrite the cell at `(x, y)`. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: usize, y: usize, obj: Option<WorldObj>) {
        if self.in_bounds(x, y) {
            self.cells[y * self.width + x] = obj;
        }
    }

    pub fn horz_wall(&mut self, x: usize, y: usize, length: usize) {
        for i in x..x + length {
            self.set(i, y, Some(WorldObj::Wall));
        }
    }

    pub fn vert_wall(&mut self, x: usize, y: usize, length: usize) {
        for j in y..y + length {
            self.set(x, j, Some(WorldObj::Wall));
        }
    }

    /// Wall off the border of the `w x h` rectangle whose top-left is `(x, y)`
    pub fn wall_rect(&mut self, x: usize, y: usize, w: usize, h: usize) {
        if w == 0 || h == 0 {
            return;
        }
        self.horz_wall(x, y, w);
        self.horz_wall(x, y + h - 1, w);
        self.vert_wall(x, y, h);
        self.vert_wall(x + w - 1, y, h);
    }

    /// Count cells holding `obj`
    pub fn count(&self, obj: WorldObj) -> usize {
        self.cells.iter().filter(|c| **c == Some(obj)).count()
    }

    /// Positions of every cell holding `obj`, row by row
    pub fn positions_of(&self, obj: WorldObj) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == Some(obj))
            .map(|(i, _)| (i % self.width, i / self.width))
            .collect()
    }
}
