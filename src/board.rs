use crate::error::TermError;
use crate::snake::{Cell, SnakeBody};
use crate::TermInt;

pub const EMPTY_CHAR: char = ' ';
pub const SNAKE_CHAR: char = '#';
pub const FOOD_CHAR: char = 'O';
/// Printed after every cell glyph so cells are roughly square.
pub const CELL_PAD: char = ' ';

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Marker {
    Empty,
    Snake,
    Food,
}

/// Occupancy grid derived from the snake and food each tick. Row major.
#[derive(Clone, Debug)]
pub struct Board {
    width: TermInt,
    height: TermInt,
    cells: Vec<Marker>,
}

/// Display sink a finished board is handed to once per tick.
pub trait Renderer {
    fn render(&mut self, board: &Board) -> Result<(), TermError>;
}

impl Marker {
    pub fn glyph(self) -> char {
        match self {
            Marker::Empty => EMPTY_CHAR,
            Marker::Snake => SNAKE_CHAR,
            Marker::Food => FOOD_CHAR,
        }
    }
}

impl Board {
    pub fn empty(width: TermInt, height: TermInt) -> Self {
        Board { width, height, cells: vec![Marker::Empty; width as usize * height as usize] }
    }

    /// Rebuilds the grid from scratch. Food goes down first, then every body
    /// cell head to tail; the flag is set if a body cell lands on one already
    /// marked as snake.
    pub fn build(width: TermInt, height: TermInt, body: &SnakeBody, food: Cell) -> (Self, bool) {
        let mut board = Board::empty(width, height);
        board.set(food, Marker::Food);

        let mut collided = false;
        for &cell in body.iter() {
            if board.get(cell) == Marker::Snake {
                collided = true;
            }
            board.set(cell, Marker::Snake);
        }

        (board, collided)
    }

    pub fn get(&self, cell: Cell) -> Marker {
        self.cells[self.index(cell)]
    }

    pub fn width(&self) -> TermInt {
        self.width
    }

    pub fn height(&self) -> TermInt {
        self.height
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Marker]> {
        self.cells.chunks(self.width as usize)
    }

    /// Plain-text frame: the grid inside a one-cell `+--+` / `|` border,
    /// each cell printed as its glyph followed by a space.
    pub fn frame_lines(&self) -> Vec<String> {
        let edge = self.edge_line();
        let mut lines = Vec::with_capacity(self.height as usize + 2);

        lines.push(edge.clone());
        for row in self.rows() {
            let mut line = String::with_capacity(self.width as usize * 2 + 2);
            line.push('|');
            for marker in row {
                line.push(marker.glyph());
                line.push(CELL_PAD);
            }
            line.push('|');
            lines.push(line);
        }
        lines.push(edge);

        lines
    }

    /// Top and bottom border, two columns per cell.
    pub fn edge_line(&self) -> String {
        format!("+{}+", "--".repeat(self.width as usize))
    }

    ///////////////////////////////////////////////////////////////////////////

    fn set(&mut self, cell: Cell, marker: Marker) {
        let idx = self.index(cell);
        self.cells[idx] = marker;
    }

    fn index(&self, cell: Cell) -> usize {
        self.width as usize * cell.y as usize + cell.x as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(cells: &[(TermInt, TermInt)]) -> SnakeBody {
        SnakeBody::from_cells(cells.iter().map(|&(x, y)| Cell::new(x, y))).unwrap()
    }

    #[test]
    fn build_marks_food_and_snake() {
        let (board, collided) = Board::build(5, 4, &body(&[(1, 1), (1, 2)]), Cell::new(3, 0));
        assert!(!collided);
        assert_eq!(board.get(Cell::new(3, 0)), Marker::Food);
        assert_eq!(board.get(Cell::new(1, 1)), Marker::Snake);
        assert_eq!(board.get(Cell::new(1, 2)), Marker::Snake);
        assert_eq!(board.get(Cell::new(0, 0)), Marker::Empty);

        let snakes = board.rows().flatten().filter(|m| **m == Marker::Snake).count();
        assert_eq!(snakes, 2);
    }

    #[test]
    fn snake_overwrites_food_without_colliding() {
        let (board, collided) = Board::build(5, 4, &body(&[(2, 2)]), Cell::new(2, 2));
        assert!(!collided);
        assert_eq!(board.get(Cell::new(2, 2)), Marker::Snake);
        assert!(board.rows().flatten().all(|m| *m != Marker::Food));
    }

    #[test]
    fn duplicate_body_cell_is_a_collision() {
        let (board, collided) = Board::build(5, 4, &body(&[(1, 1), (2, 1), (2, 2), (1, 2), (1, 1)]), Cell::new(4, 3));
        assert!(collided);
        assert_eq!(board.get(Cell::new(1, 1)), Marker::Snake);
    }

    #[test]
    fn frame_has_border_and_fixed_size() {
        let (board, _) = Board::build(3, 2, &body(&[(0, 0)]), Cell::new(2, 1));
        let lines = board.frame_lines();
        assert_eq!(lines, vec![
            "+------+".to_string(),
            "|#     |".to_string(),
            "|    O |".to_string(),
            "+------+".to_string(),
        ]);
    }
}
