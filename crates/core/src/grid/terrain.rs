//! Bounded terrain grid owned by the host.
//!
//! Text format, as read by [`Terrain::parse`]:
//!
//! ```text
//! 5
//! 3
//! #   #
//!   ό
//! #   #
//! ```
//!
//! First line is the width, second the height, then one line per row. Short
//! rows and missing trailing rows are padded with empty cells.

use crate::core_types::{Cell, Position};
use crate::detonation::BlastUpdate;
use crate::error::BlastError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

const BORDER_HORIZONTAL: char = '═';
const BORDER_VERTICAL: char = '║';
const BORDER_DOWN_AND_RIGHT: char = '╔';
const BORDER_DOWN_AND_LEFT: char = '╗';
const BORDER_UP_AND_RIGHT: char = '╚';
const BORDER_UP_AND_LEFT: char = '╝';

/// Largest width, height or cell count a terrain may have. Keeps every cell
/// addressable by an `i32` [`Position`].
pub const MAX_TERRAIN_CELLS: usize = i32::MAX as usize;

/// Rectangular grid of cells, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTerrain")]
pub struct Terrain {
    width: usize,
    height: usize,
    /// Cell data (row-major order: `[y * width + x]`)
    cells: Vec<Cell>,
}

/// Unchecked serialized form, validated into a [`Terrain`].
#[derive(Deserialize)]
struct RawTerrain {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl TryFrom<RawTerrain> for Terrain {
    type Error = BlastError;

    fn try_from(raw: RawTerrain) -> Result<Self, Self::Error> {
        let expected = cell_count(raw.width, raw.height)?;
        if raw.cells.len() != expected {
            return Err(BlastError::CellCountMismatch {
                expected,
                found: raw.cells.len(),
            });
        }
        Ok(Self {
            width: raw.width,
            height: raw.height,
            cells: raw.cells,
        })
    }
}

impl Terrain {
    /// Create an all-empty terrain.
    ///
    /// For sizes that come from outside the program use [`Terrain::try_new`].
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    /// Create an all-empty terrain, rejecting sizes that cannot be addressed.
    ///
    /// # Errors
    ///
    /// Returns [`BlastError::InvalidDimension`] if either dimension or the
    /// cell count exceeds [`MAX_TERRAIN_CELLS`].
    pub fn try_new(width: usize, height: usize) -> Result<Self, BlastError> {
        let count = cell_count(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![Cell::Empty; count],
        })
    }

    /// Parse the terrain text format.
    ///
    /// # Errors
    ///
    /// Returns a header error if the width or height line is missing, not a
    /// number, or too large, [`BlastError::UnknownGlyph`] for a glyph that
    /// maps to no cell, and [`BlastError::RowTooLong`] /
    /// [`BlastError::TooManyRows`] when the body does not fit the declared
    /// dimensions.
    pub fn parse(text: &str) -> Result<Self, BlastError> {
        let mut lines = text.lines();
        let width = parse_dimension(lines.next(), "width")?;
        let height = parse_dimension(lines.next(), "height")?;
        let mut terrain = Self::try_new(width, height)?;

        for (y, line) in lines.enumerate() {
            if y >= height {
                if line.trim().is_empty() {
                    continue;
                }
                return Err(BlastError::TooManyRows { height });
            }

            let len = line.chars().count();
            if len > width {
                return Err(BlastError::RowTooLong { row: y, len, width });
            }

            for (x, glyph) in line.chars().enumerate() {
                let position = Position::new(x as i32, y as i32);
                let cell =
                    Cell::from_glyph(glyph).ok_or(BlastError::UnknownGlyph { glyph, position })?;
                terrain.cells[y * width + x] = cell;
            }
        }

        Ok(terrain)
    }

    /// Read and parse a terrain file.
    ///
    /// # Errors
    ///
    /// Returns [`BlastError::Io`] if the file cannot be read, otherwise any
    /// error from [`Terrain::parse`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BlastError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let terrain = Self::parse(&text)?;
        debug!(
            path = %path.display(),
            width = terrain.width,
            height = terrain.height,
            "Loaded terrain"
        );
        Ok(terrain)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether `position` lies on the grid.
    #[inline]
    pub fn contains(&self, position: Position) -> bool {
        self.index(position).is_some()
    }

    #[inline]
    fn index(&self, position: Position) -> Option<usize> {
        let x = usize::try_from(position.x).ok()?;
        let y = usize::try_from(position.y).ok()?;
        (x < self.width && y < self.height).then_some(y * self.width + x)
    }

    fn out_of_bounds(&self, position: Position) -> BlastError {
        BlastError::OutOfBounds {
            position,
            width: self.width,
            height: self.height,
        }
    }

    /// Cell at `position`, or `None` off the grid.
    #[inline]
    pub fn get(&self, position: Position) -> Option<Cell> {
        self.index(position).map(|i| self.cells[i])
    }

    /// Overwrite one cell.
    ///
    /// # Errors
    ///
    /// Returns [`BlastError::OutOfBounds`] if `position` is off the grid.
    pub fn set(&mut self, position: Position, cell: Cell) -> Result<(), BlastError> {
        let index = self
            .index(position)
            .ok_or_else(|| self.out_of_bounds(position))?;
        self.cells[index] = cell;
        Ok(())
    }

    /// Write every change of `update` into the grid.
    ///
    /// Nothing is written unless every position is on the grid.
    ///
    /// # Errors
    ///
    /// Returns [`BlastError::OutOfBounds`] for the first off-grid position.
    pub fn apply(&mut self, update: &BlastUpdate) -> Result<(), BlastError> {
        let mut writes = Vec::with_capacity(update.len());
        for (position, cell) in update.iter() {
            let index = self
                .index(position)
                .ok_or_else(|| self.out_of_bounds(position))?;
            writes.push((index, cell));
        }
        for (index, cell) in writes {
            self.cells[index] = cell;
        }
        Ok(())
    }

    /// Reset every flame cell to empty, returning how many were cleared.
    pub fn clear_flames(&mut self) -> usize {
        let mut cleared = 0;
        for cell in &mut self.cells {
            if cell.is_flame() {
                *cell = Cell::Empty;
                cleared += 1;
            }
        }
        cleared
    }

    /// All cells with their positions, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        let width = self.width;
        self.cells.iter().enumerate().map(move |(i, &cell)| {
            let position = Position::new((i % width) as i32, (i / width) as i32);
            (position, cell)
        })
    }

    /// Positions of every bomb, row by row.
    pub fn bombs(&self) -> impl Iterator<Item = Position> + '_ {
        self.iter()
            .filter(|(_, cell)| cell.is_bomb())
            .map(|(position, _)| position)
    }

    /// Render with `update` overlaid, leaving the terrain untouched.
    pub fn render_with(&self, update: &BlastUpdate) -> String {
        Overlay {
            terrain: self,
            update,
        }
        .to_string()
    }

    fn write_bordered<W, F>(&self, out: &mut W, cell_at: F) -> fmt::Result
    where
        W: fmt::Write,
        F: Fn(Position, Cell) -> Cell,
    {
        let rule = BORDER_HORIZONTAL.to_string().repeat(self.width);

        writeln!(out, "{BORDER_DOWN_AND_RIGHT}{rule}{BORDER_DOWN_AND_LEFT}")?;
        for y in 0..self.height {
            out.write_char(BORDER_VERTICAL)?;
            for x in 0..self.width {
                let position = Position::new(x as i32, y as i32);
                out.write_char(cell_at(position, self.cells[y * self.width + x]).glyph())?;
            }
            out.write_char(BORDER_VERTICAL)?;
            out.write_char('\n')?;
        }
        writeln!(out, "{BORDER_UP_AND_RIGHT}{rule}{BORDER_UP_AND_LEFT}")
    }
}

/// Terrain drawn with a pending update on top.
struct Overlay<'a> {
    terrain: &'a Terrain,
    update: &'a BlastUpdate,
}

impl fmt::Display for Overlay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.terrain
            .write_bordered(f, |position, cell| self.update.get(position).unwrap_or(cell))
    }
}

fn cell_count(width: usize, height: usize) -> Result<usize, BlastError> {
    let too_large = |name: &'static str, value: String| BlastError::InvalidDimension { name, value };
    if width > MAX_TERRAIN_CELLS {
        return Err(too_large("width", width.to_string()));
    }
    if height > MAX_TERRAIN_CELLS {
        return Err(too_large("height", height.to_string()));
    }
    width
        .checked_mul(height)
        .filter(|&count| count <= MAX_TERRAIN_CELLS)
        .ok_or_else(|| too_large("size", format!("{width}x{height}")))
}

fn parse_dimension(line: Option<&str>, name: &'static str) -> Result<usize, BlastError> {
    let line = line.ok_or(BlastError::MissingHeader(name))?;
    line.trim()
        .parse()
        .map_err(|_| BlastError::InvalidDimension {
            name,
            value: line.to_string(),
        })
}

impl FromStr for Terrain {
    type Err = BlastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_bordered(f, |_, cell| cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::{FlameMask, BOMB_GLYPH};

    #[test]
    fn test_parse_pads_short_rows() {
        let text = format!("4\n3\n#\n {BOMB_GLYPH}\n");
        let terrain = Terrain::parse(&text).unwrap();

        assert_eq!(terrain.width(), 4);
        assert_eq!(terrain.height(), 3);
        assert_eq!(terrain.get(Position::new(0, 0)), Some(Cell::Wall));
        assert_eq!(terrain.get(Position::new(3, 0)), Some(Cell::Empty));
        assert_eq!(terrain.get(Position::new(1, 1)), Some(Cell::Bomb));
        assert_eq!(terrain.get(Position::new(0, 2)), Some(Cell::Empty));
        assert_eq!(terrain.bombs().collect::<Vec<_>>(), vec![Position::new(1, 1)]);
    }

    #[test]
    fn test_parse_reads_flame_glyphs() {
        let terrain: Terrain = "3\n1\n╶┼╴".parse().unwrap();
        assert_eq!(
            terrain.get(Position::new(1, 0)),
            Some(Cell::Flame(FlameMask::FULL))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Terrain::parse(""),
            Err(BlastError::MissingHeader("width"))
        ));
        assert!(matches!(
            Terrain::parse("3\n"),
            Err(BlastError::MissingHeader("height"))
        ));
        assert!(matches!(
            Terrain::parse("three\n2\n"),
            Err(BlastError::InvalidDimension { name: "width", .. })
        ));
        assert!(matches!(
            Terrain::parse("2\n1\n# #\n"),
            Err(BlastError::RowTooLong { row: 0, len: 3, width: 2 })
        ));
        assert!(matches!(
            Terrain::parse("2\n1\n##\n##\n"),
            Err(BlastError::TooManyRows { height: 1 })
        ));
        let err = Terrain::parse("2\n2\n\n @\n").unwrap_err();
        assert!(matches!(
            err,
            BlastError::UnknownGlyph { glyph: '@', position } if position == Position::new(1, 1)
        ));
    }

    #[test]
    fn test_oversized_dimensions_rejected() {
        assert!(matches!(
            Terrain::parse("18446744073709551615\n2\n"),
            Err(BlastError::InvalidDimension { name: "width", .. })
        ));
        assert!(matches!(
            Terrain::parse("2\n2147483648\n"),
            Err(BlastError::InvalidDimension { name: "height", .. })
        ));
        assert!(matches!(
            Terrain::parse("100000\n100000\n"),
            Err(BlastError::InvalidDimension { name: "size", .. })
        ));
        assert!(matches!(
            Terrain::try_new(usize::MAX, usize::MAX),
            Err(BlastError::InvalidDimension { name: "width", .. })
        ));
        assert_eq!(Terrain::try_new(3, 2).unwrap(), Terrain::new(3, 2));
    }

    #[test]
    fn test_serde_round_trip_validates_cells() {
        let mut terrain = Terrain::new(2, 2);
        terrain.set(Position::new(1, 0), Cell::Bomb).unwrap();
        let json = serde_json::to_string(&terrain).unwrap();
        assert_eq!(serde_json::from_str::<Terrain>(&json).unwrap(), terrain);

        let err = serde_json::from_str::<Terrain>(r#"{"width":5,"height":5,"cells":[]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("terrain needs 25 cells but 0 were given"));

        let err = serde_json::from_str::<Terrain>(
            r#"{"width":18446744073709551615,"height":2,"cells":[]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("invalid terrain width"));
    }

    #[test]
    fn test_trailing_blank_lines_ignored() {
        let terrain = Terrain::parse("1\n1\n#\n\n\n").unwrap();
        assert_eq!(terrain.get(Position::new(0, 0)), Some(Cell::Wall));
    }

    #[test]
    fn test_bounds() {
        let terrain = Terrain::new(3, 2);
        assert!(terrain.contains(Position::new(2, 1)));
        assert!(!terrain.contains(Position::new(3, 1)));
        assert!(!terrain.contains(Position::new(0, 2)));
        assert!(!terrain.contains(Position::new(-1, 0)));
        assert_eq!(terrain.get(Position::new(0, -1)), None);
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut terrain = Terrain::new(2, 2);
        assert!(matches!(
            terrain.set(Position::new(2, 0), Cell::Wall),
            Err(BlastError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_clear_flames_keeps_other_cells() {
        let mut terrain: Terrain = format!("3\n1\n#{BOMB_GLYPH}─").parse().unwrap();
        assert_eq!(terrain.clear_flames(), 1);
        assert_eq!(terrain.get(Position::new(0, 0)), Some(Cell::Wall));
        assert_eq!(terrain.get(Position::new(1, 0)), Some(Cell::Bomb));
        assert_eq!(terrain.get(Position::new(2, 0)), Some(Cell::Empty));
    }

    #[test]
    fn test_display_draws_border() {
        let mut terrain = Terrain::new(2, 1);
        terrain.set(Position::new(1, 0), Cell::Wall).unwrap();
        assert_eq!(terrain.to_string(), "╔══╗\n║ #║\n╚══╝\n");
    }

    #[test]
    fn test_iter_is_row_major() {
        let terrain = Terrain::new(2, 2);
        let positions: Vec<Position> = terrain.iter().map(|(p, _)| p).collect();
        assert_eq!(
            positions,
            vec![
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(0, 1),
                Position::new(1, 1),
            ]
        );
    }
}
