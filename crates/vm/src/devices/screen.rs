//! Tile screen.
//!
//! The machine draws by emitting triples `(x, y, tile)`. The pseudo
//! coordinate `(-1, 0)` is the score display: its third value is a score,
//! not a tile id.

use std::collections::HashMap;
use std::fmt;

use crossbeam_channel::Receiver;
use tracing::trace;

use crate::common::DeviceError;

/// Coordinate of the score display.
const SCORE_POS: (i64, i64) = (-1, 0);

/// What occupies a screen cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tile {
    /// Nothing.
    Empty,
    /// Indestructible wall.
    Wall,
    /// Breakable block.
    Block,
    /// Horizontal paddle.
    Paddle,
    /// The ball.
    Ball,
}

impl Tile {
    /// Maps a tile id (`0..=4`) to a tile.
    pub const fn from_id(id: i64) -> Option<Self> {
        match id {
            0 => Some(Self::Empty),
            1 => Some(Self::Wall),
            2 => Some(Self::Block),
            3 => Some(Self::Paddle),
            4 => Some(Self::Ball),
            _ => None,
        }
    }

    /// The tile's id.
    pub const fn id(self) -> i64 {
        match self {
            Self::Empty => 0,
            Self::Wall => 1,
            Self::Block => 2,
            Self::Paddle => 3,
            Self::Ball => 4,
        }
    }

    /// Character used by `Screen::render`.
    pub const fn glyph(self) -> char {
        match self {
            Self::Empty => ' ',
            Self::Wall => '@',
            Self::Block => 'X',
            Self::Paddle => '-',
            Self::Ball => 'o',
        }
    }
}

/// A screen painted by machine output.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Screen {
    tiles: HashMap<(i64, i64), Tile>,
    score: Option<i64>,
    partial: Vec<i64>,
}

impl Screen {
    /// Creates a blank screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one draw command.
    pub fn apply(&mut self, x: i64, y: i64, value: i64) -> Result<(), DeviceError> {
        if (x, y) == SCORE_POS {
            trace!(score = value, "score updated");
            self.score = Some(value);
            return Ok(());
        }
        let tile = Tile::from_id(value).ok_or(DeviceError::UnknownTile { id: value, x, y })?;
        let _previous = self.tiles.insert((x, y), tile);
        Ok(())
    }

    /// Feeds one output value; every third value completes a draw command.
    pub fn push(&mut self, value: i64) -> Result<(), DeviceError> {
        self.partial.push(value);
        if let [x, y, z] = self.partial[..] {
            self.partial.clear();
            self.apply(x, y, z)?;
        }
        Ok(())
    }

    /// Feeds a batch of output values.
    pub fn update(&mut self, values: &[i64]) -> Result<(), DeviceError> {
        values.iter().try_for_each(|&value| self.push(value))
    }

    /// Consumes `rx` until the machine closes it.
    ///
    /// Returns the number of values consumed.
    pub fn drain(&mut self, rx: &Receiver<i64>) -> Result<usize, DeviceError> {
        let mut consumed = 0;
        for value in rx {
            self.push(value)?;
            consumed += 1;
        }
        Ok(consumed)
    }

    /// Tile at `(x, y)`; cells never drawn are empty.
    pub fn tile(&self, x: i64, y: i64) -> Tile {
        self.tiles.get(&(x, y)).copied().unwrap_or(Tile::Empty)
    }

    /// Number of cells currently showing `tile`.
    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.values().filter(|&&t| t == tile).count()
    }

    /// Last score shown, if any.
    pub const fn score(&self) -> Option<i64> {
        self.score
    }

    /// Position of some cell showing `tile`.
    pub fn find(&self, tile: Tile) -> Option<(i64, i64)> {
        self.tiles
            .iter()
            .find_map(|(&pos, &t)| (t == tile).then_some(pos))
    }

    /// Renders the drawn area as text, one row per line.
    pub fn render(&self) -> String {
        self.to_string()
    }

    fn bounds(&self) -> Option<((i64, i64), (i64, i64))> {
        let xs = self.tiles.keys().map(|&(x, _)| x);
        let ys = self.tiles.keys().map(|&(_, y)| y);
        Some((
            (xs.clone().min()?, xs.max()?),
            (ys.clone().min()?, ys.max()?),
        ))
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(((x0, x1), (y0, y1))) = self.bounds() else {
            return Ok(());
        };
        for y in y0..=y1 {
            let row: String = (x0..=x1).map(|x| self.tile(x, y).glyph()).collect();
            writeln!(f, "{}", row.trim_end())?;
        }
        Ok(())
    }
}
