//! Arrangement of codeword bits in a Data Matrix symbol.
//!
//! The bits of the codewords are placed into the data area, the symbol
//! without its borders, following a fixed diagonal path. Most codewords
//! form a "utah" shape (a 3x3 square missing its top right corner), four
//! special shapes wrap around the corners of the data area. [Layout] computes
//! this path, [place()] writes the codewords along it into a [ModuleMatrix].
//!
//! The [ModuleMatrix] is then split into regions which each get a border
//! of finder and timing patterns. The result is a [Bitmap], the printed
//! symbol, which is the input for all renderers.
use log::debug;

use crate::error::EncodeError;
use crate::symbol_size::{RegionLayout, SymbolSize};

/// Indices into the data area of the eight modules of one codeword.
///
/// The first entry holds the most significant bit.
pub type Slot = [usize; 8];

/// The special shapes used when the path hits a corner of the data area.
#[derive(Debug, Clone, Copy)]
enum Corner {
    First,
    Second,
    Third,
    Fourth,
}

impl Corner {
    /// Module positions `(row, column)` for a data area of size `h` x `w`.
    fn positions(self, h: isize, w: isize) -> [(isize, isize); 8] {
        match self {
            Self::First => [
                (h - 1, 0),
                (h - 1, 1),
                (h - 1, 2),
                (0, w - 2),
                (0, w - 1),
                (1, w - 1),
                (2, w - 1),
                (3, w - 1),
            ],
            Self::Second => [
                (h - 3, 0),
                (h - 2, 0),
                (h - 1, 0),
                (0, w - 4),
                (0, w - 3),
                (0, w - 2),
                (0, w - 1),
                (1, w - 1),
            ],
            Self::Third => [
                (h - 3, 0),
                (h - 2, 0),
                (h - 1, 0),
                (0, w - 2),
                (0, w - 1),
                (1, w - 1),
                (2, w - 1),
                (3, w - 1),
            ],
            Self::Fourth => [
                (h - 1, 0),
                (h - 1, w - 1),
                (0, w - 3),
                (0, w - 2),
                (0, w - 1),
                (1, w - 3),
                (1, w - 2),
                (1, w - 1),
            ],
        }
    }
}

/// Offsets of the utah shape relative to its bottom right module.
const UTAH: [(isize, isize); 8] = [
    (-2, -2),
    (-2, -1),
    (-1, -2),
    (-1, -1),
    (-1, 0),
    (0, -2),
    (0, -1),
    (0, 0),
];

/// Module positions of every codeword in a symbol, in codeword order.
#[derive(Debug, Clone)]
pub struct Layout {
    rows: usize,
    columns: usize,
    slots: Vec<Slot>,
}

impl Layout {
    /// Compute the placement path for a symbol size.
    pub fn new(size: SymbolSize) -> Self {
        let setup = size.descriptor();
        let mut walk = Walk {
            rows: setup.rows as isize,
            columns: setup.columns as isize,
            visited: vec![false; setup.area()],
            slots: Vec::with_capacity(setup.total_codewords()),
        };
        walk.run();
        debug_assert_eq!(walk.slots.len(), setup.total_codewords());
        Self {
            rows: setup.rows,
            columns: setup.columns,
            slots: walk.slots,
        }
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }
}

/// State of the path while walking over the data area.
struct Walk {
    rows: isize,
    columns: isize,
    visited: Vec<bool>,
    slots: Vec<Slot>,
}

impl Walk {
    fn run(&mut self) {
        let nrow = self.rows;
        let ncol = self.columns;

        // the first codeword's top left module is at row 4, column 0
        let mut i = 4;
        let mut j = 0;

        loop {
            // check for the corner cases first
            if i == nrow && j == 0 {
                self.corner(Corner::First);
            }
            if i == nrow - 2 && j == 0 && ncol % 4 != 0 {
                self.corner(Corner::Second);
            }
            if i == nrow - 2 && j == 0 && ncol % 8 == 4 {
                self.corner(Corner::Third);
            }
            if i == nrow + 4 && j == 2 && ncol % 8 == 0 {
                self.corner(Corner::Fourth);
            }

            // sweep up and right
            loop {
                if i < nrow && j >= 0 && !self.visited[(i * ncol + j) as usize] {
                    self.utah(i, j);
                }
                i -= 2;
                j += 2;
                if !(i >= 0 && j < ncol) {
                    break;
                }
            }
            i += 1;
            j += 3;

            // sweep down and left
            loop {
                if i >= 0 && j < ncol && !self.visited[(i * ncol + j) as usize] {
                    self.utah(i, j);
                }
                i += 2;
                j -= 2;
                if !(i < nrow && j >= 0) {
                    break;
                }
            }
            i += 3;
            j += 1;

            if !(i < nrow || j < ncol) {
                break;
            }
        }
    }

    /// Index of a module, positions outside the area wrap to the other side.
    fn idx(&self, mut i: isize, mut j: isize) -> usize {
        let h = self.rows;
        let w = self.columns;
        if i < 0 {
            i += h;
            j += 4 - ((h + 4) % 8);
        }
        if j < 0 {
            j += w;
            i += 4 - ((w + 4) % 8);
        }
        (i * w + j) as usize
    }

    fn push(&mut self, positions: [(isize, isize); 8]) {
        let mut slot = [0; 8];
        for (s, (i, j)) in slot.iter_mut().zip(positions) {
            *s = self.idx(i, j);
            self.visited[*s] = true;
        }
        self.slots.push(slot);
    }

    fn utah(&mut self, i: isize, j: isize) {
        self.push(UTAH.map(|(di, dj)| (i + di, j + dj)));
    }

    fn corner(&mut self, corner: Corner) {
        self.push(corner.positions(self.rows, self.columns));
    }
}

/// Place codewords into the data area of a symbol.
///
/// The number of codewords must be exactly the number of data and error
/// codewords of `size`.
pub fn place(codewords: &[u8], size: SymbolSize) -> Result<ModuleMatrix, EncodeError> {
    let setup = size.descriptor();
    if codewords.len() != setup.total_codewords() {
        return Err(EncodeError::PlacementSizeMismatch {
            expected: setup.total_codewords(),
            actual: codewords.len(),
        });
    }

    let layout = Layout::new(size);
    let mut modules = vec![false; setup.area()];
    for (codeword, slot) in codewords.iter().zip(layout.slots()) {
        for (bit, idx) in slot.iter().enumerate() {
            modules[*idx] = (codeword >> (7 - bit)) & 1 == 1;
        }
    }

    // fixed pattern in the unused 2x2 corner
    if setup.has_padding_modules() {
        let w = setup.columns;
        let h = setup.rows;
        modules[(h - 2) * w + (w - 2)] = true;
        modules[(h - 1) * w + (w - 1)] = true;
    }
    debug!(target: "datamatrix", "Placed {} codewords into {}x{} modules", codewords.len(), setup.rows, setup.columns);

    Ok(ModuleMatrix { size, modules })
}

/// The data area of a symbol, without finder and timing patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMatrix {
    size: SymbolSize,
    modules: Vec<bool>,
}

impl ModuleMatrix {
    pub fn symbol_size(&self) -> SymbolSize {
        self.size
    }

    pub fn rows(&self) -> usize {
        self.size.descriptor().rows
    }

    pub fn columns(&self) -> usize {
        self.size.descriptor().columns
    }

    pub fn regions(&self) -> RegionLayout {
        self.size.descriptor().regions
    }

    /// Is the module at `row`, `column` set (dark)?
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the matrix.
    pub fn get(&self, row: usize, column: usize) -> bool {
        assert!(row < self.rows() && column < self.columns());
        self.modules[row * self.columns() + column]
    }

    /// All modules, row by row.
    pub fn modules(&self) -> &[bool] {
        &self.modules
    }

    /// Split into regions, add borders, and get the printed symbol.
    ///
    /// Each region gets a solid line on its left and bottom side and
    /// alternating modules on its top and right side. The regions are
    /// then put next to each other without any gap.
    pub fn bitmap(&self) -> Bitmap {
        let setup = self.size.descriptor();
        let reg_h = setup.region_rows();
        let reg_w = setup.region_columns();
        let width = setup.symbol_width();
        let height = setup.symbol_height();
        let mut bits = vec![false; width * height];

        for reg_i in 0..setup.regions.rows {
            for reg_j in 0..setup.regions.columns {
                let top = reg_i * (reg_h + 2);
                let left = reg_j * (reg_w + 2);
                for i in 0..reg_h + 2 {
                    for j in 0..reg_w + 2 {
                        let bit = if j == 0 || i == reg_h + 1 {
                            true
                        } else if i == 0 {
                            j % 2 == 0
                        } else if j == reg_w + 1 {
                            i % 2 == 1
                        } else {
                            self.get(reg_i * reg_h + i - 1, reg_j * reg_w + j - 1)
                        };
                        bits[(top + i) * width + left + j] = bit;
                    }
                }
            }
        }

        Bitmap { width, bits }
    }
}

/// The printed symbol, quiet zone not included.
///
/// Renderers for text, vector and image output are implemented on this type,
/// see [text()](Self::text), [rectangles()](Self::rectangles) and
/// [pixels()](Self::pixels).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: usize,
    bits: Vec<bool>,
}

impl Bitmap {
    /// Return the width of the bitmap (no quiet zone included).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Return the height of the bitmap (no quiet zone included).
    pub fn height(&self) -> usize {
        self.bits.len() / self.width
    }

    /// Is the module at `(x, y)` dark? Out of range positions are light.
    pub fn is_set(&self, x: usize, y: usize) -> bool {
        x < self.width && self.bits.get(y * self.width + x).copied().unwrap_or(false)
    }

    /// Get an iterator over the dark modules' coordinates `(x, y)`.
    ///
    /// The origin is the top left corner, x grows to the right and y
    /// downwards. Coordinates are returned row by row.
    ///
    /// A quiet zone of at least one module must be added around the symbol
    /// when rendering it.
    ///
    /// # Example
    ///
    /// ```rust
    /// let code = datamatrix_text::encode("Foo", None).unwrap();
    /// for (x, y) in code.bitmap().pixels() {
    ///     // draw a square at (x, y)
    /// }
    /// ```
    pub fn pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let w = self.width;
        self.bits
            .iter()
            .enumerate()
            .filter(|(_i, b)| **b)
            .map(move |(i, _b)| (i % w, i / w))
    }
}
