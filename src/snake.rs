use std::collections::VecDeque;

use tracing::warn;

use crate::TermInt;
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

/// A grid cell. Both coordinates are always inside the board once wrapped.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: TermInt,
    pub y: TermInt,
}

/// Ordered snake body, head at the front, tail at the back. Never empty.
#[derive(Clone, Debug)]
pub struct SnakeBody {
    cells: VecDeque<Cell>,
}

impl Direction {
    pub fn unit(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    /// Heading after applying `intent`. A direct reversal is ignored.
    pub fn turn(self, intent: Direction) -> Direction {
        if intent == self.opposite() { self } else { intent }
    }
}

impl Cell {
    pub fn new(x: TermInt, y: TermInt) -> Self {
        Cell { x, y }
    }

    /// Neighbouring cell in `direction` on a `width` x `height` torus.
    pub fn step(self, direction: Direction, width: TermInt, height: TermInt) -> Cell {
        let (dx, dy) = direction.unit();
        let (w, h) = (width as i32, height as i32);
        let x = (self.x as i32 + dx + w) % w;
        let y = (self.y as i32 + dy + h) % h;
        Cell { x: x as TermInt, y: y as TermInt }
    }
}

impl SnakeBody {
    pub fn new(start: Cell) -> Self {
        let mut cells = VecDeque::new();
        cells.push_front(start);
        SnakeBody { cells }
    }

    /// Builds a body from cells listed head first.
    #[cfg(test)]
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Option<Self> {
        let cells: VecDeque<Cell> = cells.into_iter().collect();
        if cells.is_empty() {
            None
        } else {
            Some(SnakeBody { cells })
        }
    }

    pub fn grow_head(&mut self, cell: Cell) {
        self.cells.push_front(cell);
    }

    /// Removes and returns the tail. Refuses to empty the body.
    pub fn shrink_tail(&mut self) -> Option<Cell> {
        if self.cells.len() <= 1 {
            warn!(len = self.cells.len(), "shrink_tail called on a single-cell body");
            return None;
        }
        self.cells.pop_back()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    pub fn head(&self) -> Cell {
        self.cells[0]
    }

    pub fn tail(&self) -> Cell {
        self.cells[self.cells.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: TermInt = 35;
    const H: TermInt = 25;

    #[test]
    fn step_wraps_every_edge() {
        assert_eq!(Cell::new(34, 12).step(Right, W, H), Cell::new(0, 12));
        assert_eq!(Cell::new(0, 12).step(Left, W, H), Cell::new(34, 12));
        assert_eq!(Cell::new(7, 0).step(Up, W, H), Cell::new(7, 24));
        assert_eq!(Cell::new(7, 24).step(Down, W, H), Cell::new(7, 0));
    }

    #[test]
    fn step_wraps_corners() {
        let corners = [(0, 0), (W - 1, 0), (0, H - 1), (W - 1, H - 1)];
        for &(x, y) in corners.iter() {
            for &dir in [Up, Down, Left, Right].iter() {
                let next = Cell::new(x, y).step(dir, W, H);
                assert!(next.x < W && next.y < H, "{:?} from ({}, {}) left the grid", dir, x, y);
            }
        }
        assert_eq!(Cell::new(W - 1, H - 1).step(Right, W, H), Cell::new(0, H - 1));
        assert_eq!(Cell::new(W - 1, H - 1).step(Down, W, H), Cell::new(W - 1, 0));
        assert_eq!(Cell::new(0, 0).step(Up, W, H), Cell::new(0, H - 1));
        assert_eq!(Cell::new(0, 0).step(Left, W, H), Cell::new(W - 1, 0));
    }

    #[test]
    fn step_inside_grid_is_a_unit_move() {
        let c = Cell::new(12, 12);
        assert_eq!(c.step(Up, W, H), Cell::new(12, 11));
        assert_eq!(c.step(Down, W, H), Cell::new(12, 13));
        assert_eq!(c.step(Left, W, H), Cell::new(11, 12));
        assert_eq!(c.step(Right, W, H), Cell::new(13, 12));
    }

    #[test]
    fn turn_rejects_reversal_only() {
        assert_eq!(Up.turn(Down), Up);
        assert_eq!(Up.turn(Left), Left);
        assert_eq!(Up.turn(Right), Right);
        assert_eq!(Up.turn(Up), Up);
        assert_eq!(Left.turn(Right), Left);
        assert_eq!(Right.turn(Left), Right);
        assert_eq!(Down.turn(Up), Down);
    }

    #[test]
    fn grow_then_shrink_moves_the_body() {
        let mut body = SnakeBody::new(Cell::new(3, 3));
        body.grow_head(Cell::new(3, 2));
        assert_eq!(body.len(), 2);
        assert_eq!(body.head(), Cell::new(3, 2));
        assert_eq!(body.tail(), Cell::new(3, 3));

        assert_eq!(body.shrink_tail(), Some(Cell::new(3, 3)));
        assert_eq!(body.len(), 1);
        assert_eq!(body.head(), Cell::new(3, 2));
        assert!(!body.contains(Cell::new(3, 3)));
    }

    #[test]
    fn shrink_never_empties_the_body() {
        let mut body = SnakeBody::new(Cell::new(1, 1));
        assert_eq!(body.shrink_tail(), None);
        assert_eq!(body.len(), 1);
        assert_eq!(body.head(), Cell::new(1, 1));
    }

    #[test]
    fn from_cells_keeps_head_first() {
        assert!(SnakeBody::from_cells(Vec::new()).is_none());

        let body = SnakeBody::from_cells(vec![Cell::new(5, 5), Cell::new(5, 6), Cell::new(5, 7)]).unwrap();
        assert_eq!(body.head(), Cell::new(5, 5));
        assert_eq!(body.tail(), Cell::new(5, 7));
        assert!(body.contains(Cell::new(5, 6)));
        assert!(!body.contains(Cell::new(6, 6)));
        assert_eq!(body.iter().copied().collect::<Vec<_>>()[1], Cell::new(5, 6));
    }
}
