//! The table of symbol sizes and their capacities.
//!
//! Sizes are addressed in two ways. The [SymbolSize] variants are named after
//! the printed symbol, e.g. [Square10](SymbolSize::Square10) is 10 modules
//! wide and tall. The [SizeDescriptor] and the `(rows, columns)` pairs accepted
//! by [encode()](crate::encode) describe the _data area_ instead, which is
//! the symbol without its finder and timing borders. A 10x10 symbol has
//! an 8x8 data area.
use flagset::{flags, FlagSet};

use crate::error::EncodeError;

#[cfg(test)]
use enum_iterator::Sequence;

#[cfg(test)]
use pretty_assertions::assert_eq;

/// Largest number of unpadded data codewords the encoder accepts.
///
/// Bigger symbols exist in the table and can be requested explicitly,
/// but their capacity is only used for padding.
pub const MAX_DATA_CODEWORDS: usize = 174;

flags! {
    /// Symbol shapes the automatic size selection may pick from.
    pub enum Shape: u8 {
        Square    = 0b01,
        Rectangle = 0b10,
    }
}

/// Number of regions a symbol is split into.
///
/// `rows` counts regions stacked on top of each other, `columns` the regions
/// placed side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionLayout {
    pub rows: usize,
    pub columns: usize,
}

impl RegionLayout {
    pub fn count(&self) -> usize {
        self.rows * self.columns
    }
}

/// Capacity and geometry of one symbol size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeDescriptor {
    /// Height of the data area (no borders)
    pub rows: usize,
    /// Width of the data area (no borders)
    pub columns: usize,
    /// Number of data codewords, including padding
    pub data_codewords: usize,
    /// Number of error correction codewords
    pub error_codewords: usize,
    /// How the data area is split into regions
    pub regions: RegionLayout,
    /// Number of interleaved Reed-Solomon blocks
    pub ecc_blocks: usize,
}

impl SizeDescriptor {
    const fn new(
        rows: usize,
        columns: usize,
        data_codewords: usize,
        error_codewords: usize,
        regions: (usize, usize),
        ecc_blocks: usize,
    ) -> Self {
        Self {
            rows,
            columns,
            data_codewords,
            error_codewords,
            regions: RegionLayout {
                rows: regions.0,
                columns: regions.1,
            },
            ecc_blocks,
        }
    }

    /// Number of codewords placed into the symbol (data and error).
    pub fn total_codewords(&self) -> usize {
        self.data_codewords + self.error_codewords
    }

    /// Number of modules in the data area.
    pub fn area(&self) -> usize {
        self.rows * self.columns
    }

    /// Height of a single region without borders.
    pub fn region_rows(&self) -> usize {
        self.rows / self.regions.rows
    }

    /// Width of a single region without borders.
    pub fn region_columns(&self) -> usize {
        self.columns / self.regions.columns
    }

    /// Height of the printed symbol, quiet zone not included.
    pub fn symbol_height(&self) -> usize {
        self.rows + 2 * self.regions.rows
    }

    /// Width of the printed symbol, quiet zone not included.
    pub fn symbol_width(&self) -> usize {
        self.columns + 2 * self.regions.columns
    }

    /// Some sizes have four modules left after all codewords are placed.
    pub(crate) fn has_padding_modules(&self) -> bool {
        self.area() != self.total_codewords() * 8
    }
}

/// The symbol sizes supported by the encoder.
///
/// The numbers in a variant's name are the modules (the tiny black squares)
/// the printed symbol is tall and wide.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(Sequence))]
pub enum SymbolSize {
    Square10,
    Square12,
    Square14,
    Square16,
    Square18,
    Square20,
    Square22,
    Square24,
    Square26,
    Square32,
    Square36,
    Square40,
    Square44,
    Square48,
    Square52,
    Square64,
    Square72,
    Square80,
    Square88,
    Square96,
    Square104,
    Square120,
    Square132,
    Square144,
    Rect8x18,
    Rect8x32,
    Rect12x26,
    Rect12x36,
    Rect16x36,
    Rect16x48,
}

/// All sizes in table order. Ties in the size selection go to the earlier entry.
#[rustfmt::skip]
pub(crate) const SYMBOL_SIZES: &[SymbolSize] = &[
    SymbolSize::Square10, SymbolSize::Square12, SymbolSize::Square14, SymbolSize::Square16,
    SymbolSize::Square18, SymbolSize::Square20, SymbolSize::Square22, SymbolSize::Square24,
    SymbolSize::Square26, SymbolSize::Square32, SymbolSize::Square36, SymbolSize::Square40,
    SymbolSize::Square44, SymbolSize::Square48, SymbolSize::Square52, SymbolSize::Square64,
    SymbolSize::Square72, SymbolSize::Square80, SymbolSize::Square88, SymbolSize::Square96,
    SymbolSize::Square104, SymbolSize::Square120, SymbolSize::Square132, SymbolSize::Square144,
    SymbolSize::Rect8x18, SymbolSize::Rect8x32, SymbolSize::Rect12x26, SymbolSize::Rect12x36,
    SymbolSize::Rect16x36, SymbolSize::Rect16x48,
];

impl SymbolSize {
    /// Look up the capacity and geometry of this size.
    #[rustfmt::skip]
    pub const fn descriptor(&self) -> SizeDescriptor {
        match self {
            //                                        rows  cols  data  error regions blocks
            Self::Square10  => SizeDescriptor::new(   8,    8,    3,    5, (1, 1),  1),
            Self::Square12  => SizeDescriptor::new(  10,   10,    5,    7, (1, 1),  1),
            Self::Square14  => SizeDescriptor::new(  12,   12,    8,   10, (1, 1),  1),
            Self::Square16  => SizeDescriptor::new(  14,   14,   12,   12, (1, 1),  1),
            Self::Square18  => SizeDescriptor::new(  16,   16,   18,   14, (1, 1),  1),
            Self::Square20  => SizeDescriptor::new(  18,   18,   22,   18, (1, 1),  1),
            Self::Square22  => SizeDescriptor::new(  20,   20,   30,   20, (1, 1),  1),
            Self::Square24  => SizeDescriptor::new(  22,   22,   36,   24, (1, 1),  1),
            Self::Square26  => SizeDescriptor::new(  24,   24,   44,   28, (1, 1),  1),
            Self::Square32  => SizeDescriptor::new(  28,   28,   62,   36, (2, 2),  1),
            Self::Square36  => SizeDescriptor::new(  32,   32,   86,   42, (2, 2),  1),
            Self::Square40  => SizeDescriptor::new(  36,   36,  114,   48, (2, 2),  1),
            Self::Square44  => SizeDescriptor::new(  40,   40,  144,   56, (2, 2),  1),
            Self::Square48  => SizeDescriptor::new(  44,   44,  174,   68, (2, 2),  1),
            Self::Square52  => SizeDescriptor::new(  48,   48,  204,   84, (2, 2),  2),
            Self::Square64  => SizeDescriptor::new(  56,   56,  280,  112, (4, 4),  2),
            Self::Square72  => SizeDescriptor::new(  64,   64,  368,  144, (4, 4),  4),
            Self::Square80  => SizeDescriptor::new(  72,   72,  456,  192, (4, 4),  4),
            Self::Square88  => SizeDescriptor::new(  80,   80,  576,  224, (4, 4),  4),
            Self::Square96  => SizeDescriptor::new(  88,   88,  696,  272, (4, 4),  4),
            Self::Square104 => SizeDescriptor::new(  96,   96,  816,  336, (4, 4),  6),
            Self::Square120 => SizeDescriptor::new( 108,  108, 1050,  408, (6, 6),  6),
            Self::Square132 => SizeDescriptor::new( 120,  120, 1304,  496, (6, 6),  8),
            Self::Square144 => SizeDescriptor::new( 132,  132, 1558,  620, (6, 6), 10),
            Self::Rect8x18  => SizeDescriptor::new(   6,   16,    5,    7, (1, 1),  1),
            Self::Rect8x32  => SizeDescriptor::new(   6,   28,   10,   11, (1, 2),  1),
            Self::Rect12x26 => SizeDescriptor::new(  10,   24,   16,   14, (1, 1),  1),
            Self::Rect12x36 => SizeDescriptor::new(  10,   32,   22,   18, (1, 2),  1),
            Self::Rect16x36 => SizeDescriptor::new(  14,   32,   32,   24, (1, 2),  1),
            Self::Rect16x48 => SizeDescriptor::new(  14,   44,   49,   28, (1, 2),  1),
        }
    }

    pub fn is_square(&self) -> bool {
        matches!(
            self,
            Self::Square10
                | Self::Square12
                | Self::Square14
                | Self::Square16
                | Self::Square18
                | Self::Square20
                | Self::Square22
                | Self::Square24
                | Self::Square26
                | Self::Square32
                | Self::Square36
                | Self::Square40
                | Self::Square44
                | Self::Square48
                | Self::Square52
                | Self::Square64
                | Self::Square72
                | Self::Square80
                | Self::Square88
                | Self::Square96
                | Self::Square104
                | Self::Square120
                | Self::Square132
                | Self::Square144
        )
    }

    pub fn shape(&self) -> Shape {
        if self.is_square() {
            Shape::Square
        } else {
            Shape::Rectangle
        }
    }

    /// Iterate over all sizes in table order.
    pub fn all() -> impl Iterator<Item = SymbolSize> {
        SYMBOL_SIZES.iter().copied()
    }

    /// Find the size whose data area is `rows` x `columns` modules.
    pub fn with_data_area(rows: usize, columns: usize) -> Option<SymbolSize> {
        Self::all().find(|s| {
            let d = s.descriptor();
            d.rows == rows && d.columns == columns
        })
    }

    /// Find the size with the smallest data area holding `needed` data codewords.
    ///
    /// Only sizes with a shape in `shapes` are considered.
    pub fn smallest_for(needed: usize, shapes: FlagSet<Shape>) -> Option<SymbolSize> {
        Self::all()
            .filter(|s| shapes.contains(s.shape()))
            .filter(|s| s.descriptor().data_codewords >= needed)
            .min_by_key(|s| s.descriptor().area())
    }

    /// Largest number of unpadded data codewords accepted for the given shapes.
    pub(crate) fn max_data_codewords(shapes: FlagSet<Shape>) -> usize {
        Self::all()
            .filter(|s| shapes.contains(s.shape()))
            .map(|s| s.descriptor().data_codewords)
            .max()
            .unwrap_or(0)
            .min(MAX_DATA_CODEWORDS)
    }
}

impl TryFrom<(usize, usize)> for SymbolSize {
    type Error = EncodeError;

    fn try_from((rows, columns): (usize, usize)) -> Result<Self, Self::Error> {
        Self::with_data_area(rows, columns).ok_or(EncodeError::UnknownSize { rows, columns })
    }
}

#[test]
fn table_lists_every_size_once() {
    let from_enum: Vec<SymbolSize> = enum_iterator::all::<SymbolSize>().collect();
    assert_eq!(SYMBOL_SIZES.len(), from_enum.len());
    for s in from_enum {
        assert_eq!(SYMBOL_SIZES.iter().filter(|t| **t == s).count(), 1, "{:?}", s);
    }
}

#[test]
fn printed_size_matches_name() {
    for s in enum_iterator::all::<SymbolSize>() {
        let d = s.descriptor();
        let name = format!("{:?}", s);
        let expected = if s.is_square() {
            format!("Square{}", d.symbol_width())
        } else {
            format!("Rect{}x{}", d.symbol_height(), d.symbol_width())
        };
        assert_eq!(name, expected);
        assert_eq!(s.is_square(), d.rows == d.columns);
    }
}

#[test]
fn descriptors_are_consistent() {
    for s in enum_iterator::all::<SymbolSize>() {
        let d = s.descriptor();
        // data area is filled by codewords, except for a 2x2 corner
        let placed = d.total_codewords() * 8;
        assert!(placed == d.area() || placed + 4 == d.area(), "{:?}", s);
        assert_eq!(d.region_rows() * d.regions.rows, d.rows);
        assert_eq!(d.region_columns() * d.regions.columns, d.columns);
        assert_eq!(d.region_rows() % 2, 0);
        assert_eq!(d.region_columns() % 2, 0);
        assert_eq!(d.error_codewords % d.ecc_blocks, 0, "{:?}", s);
    }
}

#[test]
fn padding_modules_only_in_some_squares() {
    let padded: Vec<SymbolSize> = SymbolSize::all()
        .filter(|s| s.descriptor().has_padding_modules())
        .collect();
    assert_eq!(
        padded,
        vec![
            SymbolSize::Square12,
            SymbolSize::Square16,
            SymbolSize::Square20,
            SymbolSize::Square24
        ]
    );
}

#[test]
fn lookup_by_data_area() {
    assert_eq!(SymbolSize::with_data_area(8, 8), Some(SymbolSize::Square10));
    assert_eq!(SymbolSize::with_data_area(6, 28), Some(SymbolSize::Rect8x32));
    assert_eq!(SymbolSize::with_data_area(132, 132), Some(SymbolSize::Square144));
    assert_eq!(SymbolSize::with_data_area(28, 6), None);
    assert_eq!(
        SymbolSize::try_from((9, 9)),
        Err(EncodeError::UnknownSize {
            rows: 9,
            columns: 9
        })
    );
    for s in SymbolSize::all() {
        let d = s.descriptor();
        assert_eq!(SymbolSize::try_from((d.rows, d.columns)), Ok(s));
    }
}

#[test]
fn smallest_size_has_minimal_area() {
    for needed in 0..=MAX_DATA_CODEWORDS {
        let picked = SymbolSize::smallest_for(needed, FlagSet::full()).unwrap();
        let d = picked.descriptor();
        assert!(d.data_codewords >= needed);
        for other in SymbolSize::all() {
            let o = other.descriptor();
            if o.data_codewords >= needed {
                assert!(o.area() >= d.area(), "{} {:?} {:?}", needed, picked, other);
            }
        }
    }
}

#[test]
fn smallest_size_prefers_rectangle_with_smaller_area() {
    // 6x16 (area 96) beats 10x10 (area 100), both hold 5 codewords
    assert_eq!(
        SymbolSize::smallest_for(5, FlagSet::full()),
        Some(SymbolSize::Rect8x18)
    );
    assert_eq!(
        SymbolSize::smallest_for(5, Shape::Square.into()),
        Some(SymbolSize::Square12)
    );
    assert_eq!(SymbolSize::smallest_for(50, Shape::Rectangle.into()), None);
}

#[test]
fn max_data_codewords_per_shape() {
    assert_eq!(SymbolSize::max_data_codewords(FlagSet::full()), 174);
    assert_eq!(SymbolSize::max_data_codewords(Shape::Square.into()), 174);
    assert_eq!(SymbolSize::max_data_codewords(Shape::Rectangle.into()), 49);
    assert_eq!(SymbolSize::max_data_codewords(FlagSet::default()), 0);
}
