//! Pixel-font rendering of a score
//!
//! Each digit is a 3x5 stencil. Digits sit left to right with one blank column
//! between them, so `n` digits take `4n - 1` columns. Row 0 is the top row.

use serde::{Deserialize, Serialize};

pub const GLYPH_WIDTH: usize = 3;
pub const GLYPH_HEIGHT: usize = 5;

/// Stencils for 0-9, one string per row, `#` = lit
const GLYPHS: [[&str; GLYPH_HEIGHT]; 10] = [
    ["###", "#.#", "#.#", "#.#", "###"],
    ["..#", "..#", "..#", "..#", "..#"],
    ["###", "..#", "###", "#..", "###"],
    ["###", "..#", "###", "..#", "###"],
    ["#.#", "#.#", "###", "..#", "..#"],
    ["###", "#..", "###", "..#", "###"],
    ["###", "#..", "###", "#.#", "###"],
    ["###", "..#", "..#", "..#", "..#"],
    ["###", "#.#", "###", "#.#", "###"],
    ["###", "#.#", "###", "..#", "###"],
];

/// Grid of lit cells, stored column by column
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreBitmap {
    columns: Vec<[bool; GLYPH_HEIGHT]>,
}

impl ScoreBitmap {
    /// Bitmap for a point count
    pub fn from_points(points: u32) -> Self {
        Self::from_digits(points.to_string().bytes().map(|b| b - b'0'))
    }

    /// Bitmap for a single digit (0-9)
    pub fn digit(digit: u8) -> Self {
        Self::from_digits([digit])
    }

    fn from_digits(digits: impl IntoIterator<Item = u8>) -> Self {
        let mut columns: Vec<[bool; GLYPH_HEIGHT]> = Vec::new();

        for digit in digits {
            if !columns.is_empty() {
                columns.push([false; GLYPH_HEIGHT]);
            }
            let glyph = &GLYPHS[usize::from(digit % 10)];
            for x in 0..GLYPH_WIDTH {
                let mut column = [false; GLYPH_HEIGHT];
                for (y, row) in glyph.iter().enumerate() {
                    column[y] = row.as_bytes()[x] == b'#';
                }
                columns.push(column);
            }
        }

        Self { columns }
    }

    /// Number of columns
    #[inline]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows
    #[inline]
    pub fn height(&self) -> usize {
        GLYPH_HEIGHT
    }

    /// Whether the cell at column `x`, row `y` is lit (out of range is unlit)
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.columns
            .get(x)
            .and_then(|column| column.get(y))
            .copied()
            .unwrap_or(false)
    }

    /// Count of lit cells, used to size a draw batch
    pub fn lit_count(&self) -> usize {
        self.columns
            .iter()
            .map(|column| column.iter().filter(|lit| **lit).count())
            .sum()
    }

    /// Lit cells as (column, row), column-major
    pub fn lit_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.columns.iter().enumerate().flat_map(|(x, column)| {
            column
                .iter()
                .enumerate()
                .filter(|(_, lit)| **lit)
                .map(move |(y, _)| (x, y))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn render(bitmap: &ScoreBitmap) -> Vec<String> {
        (0..bitmap.height())
            .map(|y| {
                (0..bitmap.width())
                    .map(|x| if bitmap.get(x, y) { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_zero() {
        let bitmap = ScoreBitmap::from_points(0);
        assert_eq!(bitmap.width(), 3);
        assert_eq!(render(&bitmap), vec!["###", "#.#", "#.#", "#.#", "###"]);
        assert_eq!(bitmap.lit_count(), 12);
    }

    #[test]
    fn test_seven_matches_digit_glyph() {
        let bitmap = ScoreBitmap::from_points(7);
        assert_eq!(bitmap, ScoreBitmap::digit(7));
        assert_eq!(render(&bitmap), vec!["###", "..#", "..#", "..#", "..#"]);
        assert_eq!(bitmap.lit_count(), 7);
    }

    #[test]
    fn test_two_digits_have_spacer_column() {
        let bitmap = ScoreBitmap::from_points(10);
        assert_eq!(bitmap.width(), 7);
        assert_eq!(
            render(&bitmap),
            vec!["..#.###", "..#.#.#", "..#.#.#", "..#.#.#", "..#.###"]
        );
        assert_eq!(bitmap.lit_count(), 5 + 12);
    }

    #[test]
    fn test_lit_counts_per_digit() {
        let expected = [12, 5, 11, 11, 9, 11, 12, 7, 13, 12];
        for (digit, count) in expected.iter().enumerate() {
            assert_eq!(ScoreBitmap::digit(digit as u8).lit_count(), *count, "digit {digit}");
        }
    }

    #[test]
    fn test_lit_cells_matches_get() {
        let bitmap = ScoreBitmap::from_points(42);
        let cells: Vec<_> = bitmap.lit_cells().collect();
        assert_eq!(cells.len(), bitmap.lit_count());
        assert!(cells.iter().all(|(x, y)| bitmap.get(*x, *y)));
        assert!(!bitmap.get(99, 0));
    }

    proptest! {
        #[test]
        fn prop_bitmap_is_pure_function_of_points(points in 0u32..100_000) {
            let a = ScoreBitmap::from_points(points);
            let b = ScoreBitmap::from_points(points);
            prop_assert_eq!(&a, &b);

            let digits = points.to_string().len();
            prop_assert_eq!(a.width(), digits * 4 - 1);
        }
    }
}
