//! Data Matrix (ECC 200) encoder for text.
//!
//! Text is compacted with the ASCII encodation (digit pairs share one
//! codeword), padded to the capacity of the smallest fitting symbol,
//! protected by Reed-Solomon error codes, and placed into the symbol.
//!
//! ```rust
//! let code = datamatrix_text::encode("Hello, World!", None).unwrap();
//! print!("{}", code.bitmap().ascii());
//! ```
//!
//! The steps are available separately in [encodation], [errorcode] and
//! [placement] for lower level work. Diagnostic output goes through the
//! [log] crate with target `datamatrix`.
pub mod encodation;
mod error;
pub mod errorcode;
pub mod placement;
pub mod render;
mod symbol_size;

pub use encodation::{encode_codewords, EncodedText, SizeRequest};
pub use error::EncodeError;
pub use flagset::FlagSet;
pub use placement::{Bitmap, ModuleMatrix};
pub use symbol_size::{RegionLayout, Shape, SizeDescriptor, SymbolSize, MAX_DATA_CODEWORDS};

/// An encoded Data Matrix symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataMatrix {
    codewords: Vec<u8>,
    matrix: ModuleMatrix,
}

impl DataMatrix {
    /// All codewords of the symbol: data, padding and error correction.
    pub fn codewords(&self) -> &[u8] {
        &self.codewords
    }

    /// The data codewords including padding.
    pub fn data_codewords(&self) -> &[u8] {
        &self.codewords[..self.symbol_size().descriptor().data_codewords]
    }

    pub fn symbol_size(&self) -> SymbolSize {
        self.matrix.symbol_size()
    }

    pub fn regions(&self) -> RegionLayout {
        self.matrix.regions()
    }

    /// The data area, without finder and timing patterns.
    pub fn matrix(&self) -> &ModuleMatrix {
        &self.matrix
    }

    /// The printed symbol, ready for rendering.
    pub fn bitmap(&self) -> Bitmap {
        self.matrix.bitmap()
    }
}

/// Builder to configure the symbol size used for encoding.
///
/// By default the size with the smallest data area is picked among all
/// square and rectangular sizes.
///
/// ```rust
/// use datamatrix_text::{Encoder, Shape, SymbolSize};
///
/// let square = Encoder::new().shapes(Shape::Square).encode("A1B2").unwrap();
/// assert!(square.symbol_size().is_square());
///
/// let fixed = Encoder::new().size(SymbolSize::Square22).encode("A1B2").unwrap();
/// assert_eq!(fixed.symbol_size(), SymbolSize::Square22);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Encoder {
    request: SizeRequest,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only pick sizes with one of the given shapes.
    pub fn shapes(mut self, shapes: impl Into<FlagSet<Shape>>) -> Self {
        self.request = SizeRequest::Smallest(shapes.into());
        self
    }

    /// Always use this size.
    pub fn size(mut self, size: SymbolSize) -> Self {
        self.request = SizeRequest::Fixed(size);
        self
    }

    /// Always use the size whose data area is `rows` x `columns`.
    pub fn data_area(self, rows: usize, columns: usize) -> Result<Self, EncodeError> {
        Ok(self.size(SymbolSize::try_from((rows, columns))?))
    }

    /// Encode `text` and place it into a symbol.
    pub fn encode(&self, text: &str) -> Result<DataMatrix, EncodeError> {
        let EncodedText {
            codewords,
            symbol_size,
        } = encodation::encode_with(text, self.request)?;
        let matrix = placement::place(&codewords, symbol_size)?;
        Ok(DataMatrix { codewords, matrix })
    }
}

/// Encode text as a Data Matrix.
///
/// `size` optionally fixes the `(rows, columns)` of the data area, see
/// [SymbolSize::with_data_area]. Without it the smallest fitting size
/// is used.
pub fn encode(text: &str, size: Option<(usize, usize)>) -> Result<DataMatrix, EncodeError> {
    let encoder = match size {
        Some((rows, columns)) => Encoder::new().data_area(rows, columns)?,
        None => Encoder::new(),
    };
    encoder.encode(text)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn trimmed_ascii(code: &DataMatrix) -> Vec<String> {
        code.bitmap()
            .ascii()
            .lines()
            .map(|l| l.trim_end().to_string())
            .collect()
    }

    #[test]
    fn hudora() {
        let code = encode("HuDoRa", None).unwrap();
        assert_eq!(code.symbol_size(), SymbolSize::Square14);
        assert_eq!(code.data_codewords(), &[73, 118, 69, 112, 83, 98, 129, 56]);
        #[rustfmt::skip]
        let should = [
            "XX  XX  XX  XX  XX  XX  XX",
            "XX  XXXX  XXXXXX      XXXXXX",
            "XXXXXX    XX          XX",
            "XXXXXX    XX        XXXX  XX",
            "XXXX  XX  XXXXXX",
            "XXXXXX    XXXXXXXX    XXXXXX",
            "XX    XX  XXXXXXXX  XXXX",
            "XX    XX      XXXX      XXXX",
            "XX  XXXXXXXXXX    XXXX",
            "XX  XXXX    XX            XX",
            "XX  XXXXXX  XXXXXX      XX",
            "XXXXXX  XX  XX  XX  XX    XX",
            "XX    XX              XX",
            "XXXXXXXXXXXXXXXXXXXXXXXXXXXX",
        ];
        assert_eq!(trimmed_ascii(&code), should);
    }

    #[test]
    fn wikipedia_two_regions() {
        let code = encode("wikipedia", None).unwrap();
        assert_eq!(code.symbol_size(), SymbolSize::Rect8x32);
        assert_eq!(code.regions(), RegionLayout { rows: 1, columns: 2 });
        #[rustfmt::skip]
        let should = [
            "XX  XX  XX  XX  XX  XX  XX  XX  XX  XX  XX  XX  XX  XX  XX  XX",
            "XX  XXXX    XX  XX  XX  XX    XXXX      XX    XXXX  XX  XXXXXXXX",
            "XXXX  XX  XX  XX  XX  XXXXXX    XX  XX      XXXX  XXXX",
            "XX  XX  XXXX    XX  XX      XXXXXX  XXXXXXXX  XX  XX          XX",
            "XX    XX    XXXX    XXXX        XXXXXX  XX  XXXX    XXXXXX",
            "XXXXXX      XXXX  XX  XX    XXXXXXXX      XX  XXXX    XXXX    XX",
            "XXXXXXXX  XX  XX  XXXXXXXXXX    XX  XX  XXXXXX  XX  XXXXXX  XX",
            "XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX",
        ];
        assert_eq!(trimmed_ascii(&code), should);
    }

    #[test]
    fn explicit_size() {
        let code = encode("123456", Some((12, 12))).unwrap();
        assert_eq!(code.symbol_size(), SymbolSize::Square14);
        assert_eq!(code.codewords().len(), 18);
        assert_eq!(code.matrix().rows(), 12);
        assert_eq!(code.bitmap().width(), 14);
    }

    #[test]
    fn explicit_size_errors() {
        assert_eq!(
            encode("abc", Some((7, 7))),
            Err(EncodeError::UnknownSize {
                rows: 7,
                columns: 7
            })
        );
        assert_eq!(
            encode("abcd", Some((8, 8))),
            Err(EncodeError::PlacementSizeMismatch {
                expected: 8,
                actual: 9
            })
        );
    }

    #[test]
    fn too_long() {
        let text = "x".repeat(MAX_DATA_CODEWORDS + 1);
        assert_eq!(
            encode(&text, None),
            Err(EncodeError::CapacityExceeded {
                needed: 175,
                max: 174
            })
        );
    }

    #[test]
    fn builder_shapes() {
        let rect = Encoder::new()
            .shapes(Shape::Rectangle)
            .encode("HuDoRa")
            .unwrap();
        assert_eq!(rect.symbol_size(), SymbolSize::Rect8x32);
        let any = Encoder::new()
            .shapes(Shape::Square | Shape::Rectangle)
            .encode("HuDoRa")
            .unwrap();
        assert_eq!(any, encode("HuDoRa", None).unwrap());
    }

    #[test]
    fn every_size_roundtrips_through_placement() {
        for size in SymbolSize::all() {
            let code = Encoder::new().size(size).encode("12345").unwrap();
            let d = size.descriptor();
            assert_eq!(code.codewords().len(), d.total_codewords());
            assert_eq!(code.matrix().modules().len(), d.rows * d.columns);
            let bitmap = code.bitmap();
            assert_eq!(
                (bitmap.width(), bitmap.height()),
                (d.symbol_width(), d.symbol_height())
            );
        }
    }

    #[test]
    fn repeated_encodes_are_identical() {
        let a = encode("same input 42", None).unwrap();
        let b = encode("same input 42", None).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.bitmap(), b.bitmap());
    }

    #[test]
    fn parallel_encodes() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DataMatrix>();

        let texts: Vec<String> = (0..8)
            .map(|i| format!("thread {} {}", i, "9".repeat(i * 5)))
            .collect();
        let serial: Vec<DataMatrix> = texts.iter().map(|t| encode(t, None).unwrap()).collect();
        let parallel: Vec<DataMatrix> = std::thread::scope(|s| {
            let handles: Vec<_> = texts
                .iter()
                .map(|t| s.spawn(move || encode(t, None).unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(serial, parallel);
    }
}
