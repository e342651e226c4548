//! Piece catalog: every shape the generator can deal
//!
//! Shapes are written as row strings, `#` for a filled cell and `.` for an
//! empty one. Row 0 is the top of the piece.

use serde::{Deserialize, Serialize};

/// Block colors. Purely a label; no rule depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockColor {
    Gold,
    Red,
    Blue,
    Green,
    Purple,
    Orange,
    LightBlue,
}

impl BlockColor {
    /// All colors, in the order the generator draws from
    pub fn all() -> [BlockColor; 7] {
        [
            BlockColor::Gold,
            BlockColor::Red,
            BlockColor::Blue,
            BlockColor::Green,
            BlockColor::Purple,
            BlockColor::Orange,
            BlockColor::LightBlue,
        ]
    }
}

/// How the generator treats a shape as difficulty rises
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Complexity {
    /// Dealt less often at higher difficulty
    Simple,
    Standard,
    /// Dealt more often at higher difficulty
    Complex,
}

/// Identity of a catalog shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeId {
    Single,
    Line2h,
    Line3h,
    Line4h,
    Line5h,
    Line2v,
    Line3v,
    Line4v,
    Line5v,
    Square,
    Square3x3,
    LSmall,
    LMedium,
    LLarge,
    LSmallFlipped,
    LMediumFlipped,
    LLargeFlipped,
    TSmall,
    TMedium,
    TLarge,
    ZSmall,
    ZMedium,
    ZSmallFlipped,
    ZMediumFlipped,
    PlusSmall,
    PlusLarge,
    MiscCorner,
    MiscCornerFlipped,
    MiscStep,
    MiscStepFlipped,
}

/// Number of shapes in the catalog
pub const SHAPE_COUNT: usize = 30;

impl ShapeId {
    pub fn all() -> [ShapeId; SHAPE_COUNT] {
        use ShapeId::*;
        [
            Single,
            Line2h,
            Line3h,
            Line4h,
            Line5h,
            Line2v,
            Line3v,
            Line4v,
            Line5v,
            Square,
            Square3x3,
            LSmall,
            LMedium,
            LLarge,
            LSmallFlipped,
            LMediumFlipped,
            LLargeFlipped,
            TSmall,
            TMedium,
            TLarge,
            ZSmall,
            ZMedium,
            ZSmallFlipped,
            ZMediumFlipped,
            PlusSmall,
            PlusLarge,
            MiscCorner,
            MiscCornerFlipped,
            MiscStep,
            MiscStepFlipped,
        ]
    }

    /// Shape mask, one string per row
    pub fn rows(&self) -> &'static [&'static str] {
        use ShapeId::*;
        match self {
            Single => &["#"],
            Line2h => &["##"],
            Line3h => &["###"],
            Line4h => &["####"],
            Line5h => &["#####"],
            Line2v => &["#", "#"],
            Line3v => &["#", "#", "#"],
            Line4v => &["#", "#", "#", "#"],
            Line5v => &["#", "#", "#", "#", "#"],
            Square => &["##", "##"],
            Square3x3 => &["###", "###", "###"],
            LSmall => &["#.", "##"],
            LMedium => &["#..", "###"],
            LLarge => &["#...", "####"],
            LSmallFlipped => &[".#", "##"],
            LMediumFlipped => &["..#", "###"],
            LLargeFlipped => &["...#", "####"],
            TSmall => &["###", ".#."],
            TMedium => &["####", ".#.."],
            TLarge => &["#####", "..#.."],
            ZSmall => &["##.", ".##"],
            ZMedium => &["##..", ".###"],
            ZSmallFlipped => &[".##", "##."],
            ZMediumFlipped => &["..##", "###."],
            PlusSmall => &[".#.", "###", ".#."],
            PlusLarge => &["..#..", "#####", "..#.."],
            MiscCorner => &["###", "#.."],
            MiscCornerFlipped => &["###", "..#"],
            MiscStep => &["##", "#.", "#."],
            MiscStepFlipped => &["##", ".#", ".#"],
        }
    }

    /// Filled cells as (row, col) offsets from the top-left of the mask
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows().iter().enumerate().flat_map(|(row, line)| {
            line.bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'#')
                .map(move |(col, _)| (row, col))
        })
    }

    /// Number of filled cells
    pub fn cell_count(&self) -> usize {
        self.cells().count()
    }

    /// Bounding box as (width, height)
    pub fn size(&self) -> (usize, usize) {
        let rows = self.rows();
        (rows[0].len(), rows.len())
    }

    /// Base selection weight, before difficulty scaling
    pub fn weight(&self) -> u32 {
        use ShapeId::*;
        match self {
            Single => 4,
            Line2h | Line2v | Square => 3,
            Line3h | Line3v => 2,
            LSmall | LSmallFlipped | TSmall | ZSmall | ZSmallFlipped => 2,
            _ => 1,
        }
    }

    pub fn complexity(&self) -> Complexity {
        use ShapeId::*;
        match self {
            Single | Line2h | Line2v => Complexity::Simple,
            Square3x3 | LLarge | LLargeFlipped | TMedium | TLarge | ZMedium | ZMediumFlipped
            | PlusSmall | PlusLarge => Complexity::Complex,
            _ => Complexity::Standard,
        }
    }

    /// Nominal color; the generator overrides it when dealing
    pub fn default_color(&self) -> BlockColor {
        use BlockColor::*;
        use ShapeId::*;
        match self {
            Square3x3 => Gold,
            Line2h | Square | LLargeFlipped | ZSmallFlipped | MiscStep => Red,
            Single | Line4h | LSmall | TSmall | ZMediumFlipped | MiscStepFlipped => Blue,
            Line3h | LMedium | TMedium | PlusSmall => Green,
            Line5h | LLarge | TLarge | PlusLarge => Purple,
            Line2v | Line4v | LSmallFlipped | ZSmall | MiscCorner => Orange,
            Line3v | Line5v | LMediumFlipped | ZMedium | MiscCornerFlipped => LightBlue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_is_distinct() {
        let all = ShapeId::all();
        let unique: HashSet<_> = all.iter().collect();
        assert_eq!(unique.len(), SHAPE_COUNT);

        let masks: HashSet<_> = all.iter().map(|s| s.rows()).collect();
        assert_eq!(masks.len(), SHAPE_COUNT);
    }

    #[test]
    fn test_masks_are_rectangular_and_non_empty() {
        for shape in ShapeId::all() {
            let (width, _) = shape.size();
            assert!(shape.rows().iter().all(|r| r.len() == width), "{shape:?}");
            assert!(shape.cell_count() > 0, "{shape:?}");
        }
    }

    #[test]
    fn test_cell_offsets() {
        let cells: Vec<_> = ShapeId::LSmall.cells().collect();
        assert_eq!(cells, vec![(0, 0), (1, 0), (1, 1)]);
        assert_eq!(ShapeId::Square3x3.cell_count(), 9);
        assert_eq!(ShapeId::PlusLarge.cell_count(), 7);
        assert_eq!(ShapeId::Line5v.size(), (1, 5));
    }

    #[test]
    fn test_simple_pieces_outweigh_complex() {
        assert!(ShapeId::Single.weight() > ShapeId::Square3x3.weight());
        assert!(ShapeId::Line2h.weight() > ShapeId::TLarge.weight());
        assert_eq!(ShapeId::Single.complexity(), Complexity::Simple);
        assert_eq!(ShapeId::Square3x3.complexity(), Complexity::Complex);
        assert_eq!(ShapeId::Square.complexity(), Complexity::Standard);
    }

    #[test]
    fn test_default_colors() {
        assert_eq!(ShapeId::Square3x3.default_color(), BlockColor::Gold);
        assert_eq!(ShapeId::Line3v.default_color(), BlockColor::LightBlue);
        let used: HashSet<_> = ShapeId::all().iter().map(|s| s.default_color()).collect();
        assert_eq!(used.len(), BlockColor::all().len());
    }

    #[test]
    fn test_serialized_names() {
        assert_eq!(serde_json::to_string(&ShapeId::LSmallFlipped).unwrap(), "\"l_small_flipped\"");
        assert_eq!(serde_json::to_string(&ShapeId::Line2h).unwrap(), "\"line2h\"");
        assert_eq!(serde_json::to_string(&BlockColor::LightBlue).unwrap(), "\"lightblue\"");
    }
}
