use std::{thread::sleep, time::Duration};

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info, instrument, trace};

use crate::TermInt;
use crate::board::{Board, Renderer};
use crate::error::TermError;
use crate::input::{Input, InputSource};
use crate::snake::{Cell, SnakeBody, Direction::{self, *}};

pub const WIDTH: TermInt = 35;
pub const HEIGHT: TermInt = 25;
pub const TICK_INTERVAL_MS: u64 = 100;
pub const START: Cell = Cell { x: 12, y: 12 };

#[derive(Copy, Clone, Debug)]
pub struct Settings {
    pub width: TermInt,
    pub height: TermInt,
    pub tick: Duration,
    pub start: Cell,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Moved,
    Ate,
    Crashed,
}

/// How a finished game ended, with the snake's final length.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Crashed { length: usize },
    Quit { length: usize },
}

pub struct GameState {
    settings: Settings,
    body: SnakeBody,
    direction: Direction,
    food: Cell,
    alive: bool,
    board: Board,
    rng: StdRng,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            width: WIDTH,
            height: HEIGHT,
            tick: Duration::from_millis(TICK_INTERVAL_MS),
            start: START,
        }
    }
}

impl GameState {
    pub fn new(settings: Settings) -> Self {
        Self::with_rng(settings, StdRng::from_entropy())
    }

    #[cfg(test)]
    pub fn with_seed(settings: Settings, seed: u64) -> Self {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }

    /// A game already in progress, used to set up specific positions.
    #[cfg(test)]
    pub fn from_parts(settings: Settings, body: SnakeBody, direction: Direction, food: Cell, seed: u64) -> Self {
        let (board, _) = Board::build(settings.width, settings.height, &body, food);
        GameState {
            settings,
            body,
            direction,
            food,
            alive: true,
            board,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Applies one steering intent and moves the snake one cell. Does
    /// nothing once the snake is dead.
    pub fn advance(&mut self, intent: Option<Direction>) -> TickOutcome {
        if !self.alive {
            return TickOutcome::Crashed;
        }

        if let Some(dir) = intent {
            self.direction = self.direction.turn(dir);
        }

        let next = self.body.head().step(self.direction, self.settings.width, self.settings.height);
        self.body.grow_head(next);

        let ate = next == self.food;
        if ate {
            self.food = self.random_cell();
            debug!(head = ?next, food = ?self.food, len = self.body.len(), "food eaten");
            if self.body.contains(self.food) {
                debug!(food = ?self.food, "food spawned under the snake");
            }
        } else {
            self.body.shrink_tail();
        }

        // Built from the post-shrink body: the cell the tail just left is free.
        let (board, collided) = Board::build(self.settings.width, self.settings.height, &self.body, self.food);
        self.board = board;

        if collided {
            self.alive = false;
            info!(head = ?next, len = self.body.len(), "snake bit itself");
            TickOutcome::Crashed
        } else if ate {
            TickOutcome::Ate
        } else {
            TickOutcome::Moved
        }
    }

    /// One full tick: poll input, advance, render. `None` means the player quit.
    pub fn tick(&mut self, input: &mut impl InputSource, renderer: &mut impl Renderer) -> Result<Option<TickOutcome>, TermError> {
        let intent = match input.poll()? {
            Some(Input::Quit) => return Ok(None),
            Some(Input::Steer(dir)) => Some(dir),
            None => None,
        };

        let outcome = self.advance(intent);
        trace!(?intent, ?outcome, direction = ?self.direction, head = ?self.body.head(), tail = ?self.body.tail(), "tick");

        renderer.render(&self.board)?;
        Ok(Some(outcome))
    }

    pub fn body(&self) -> &SnakeBody {
        &self.body
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn score(&self) -> usize {
        self.body.len() - 1
    }

    pub fn place_food(&mut self, cell: Cell) {
        self.food = cell;
        let (board, _) = Board::build(self.settings.width, self.settings.height, &self.body, self.food);
        self.board = board;
    }

    ///////////////////////////////////////////////////////////////////////////

    fn with_rng(settings: Settings, rng: StdRng) -> Self {
        let body = SnakeBody::new(settings.start);
        let board = Board::empty(settings.width, settings.height);
        let mut state = GameState { settings, body, direction: Up, food: settings.start, alive: true, board, rng };

        let food = state.random_cell();
        state.place_food(food);
        state
    }

    // Uniform over the whole grid; the snake's own cells are not excluded.
    fn random_cell(&mut self) -> Cell {
        let x = self.rng.gen_range(0..self.settings.width);
        let y = self.rng.gen_range(0..self.settings.height);
        Cell::new(x, y)
    }
}

/// Runs ticks at the configured pace until the snake dies or the player quits.
#[instrument(skip_all)]
pub fn run(state: &mut GameState, input: &mut impl InputSource, renderer: &mut impl Renderer) -> Result<Outcome, TermError> {
    let settings = *state.settings();
    info!(width = settings.width, height = settings.height, food = ?state.food(), "game started");
    renderer.render(state.board())?;

    loop {
        match state.tick(input, renderer)? {
            None => {
                info!(len = state.body().len(), "player quit");
                return Ok(Outcome::Quit { length: state.body().len() });
            }
            Some(_) if !state.is_alive() => {
                info!(len = state.body().len(), score = state.score(), direction = ?state.direction(), "game over");
                return Ok(Outcome::Crashed { length: state.body().len() });
            }
            Some(_) => sleep(settings.tick),
        }
    }
}
