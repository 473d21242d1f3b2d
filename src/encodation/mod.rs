//! Conversion of text into the codewords stored in a symbol.
//!
//! Only the ASCII encodation is used, with digit pairs packed into a single
//! codeword. The steps are: encode the text, choose a symbol size, pad the
//! data to the size's capacity and append the error codewords. The state
//! is carried from step to step in a local [Pipeline] value.
pub(crate) mod ascii;

#[cfg(test)]
mod tests;

use flagset::FlagSet;
use log::{debug, log_enabled, Level};

use crate::error::EncodeError;
use crate::errorcode;
use crate::symbol_size::{Shape, SymbolSize, MAX_DATA_CODEWORDS};

/// First pad codeword, also the base of the pseudo random pad sequence.
pub(crate) const PAD: u8 = 129;

/// How the symbol size is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeRequest {
    /// Smallest data area with enough capacity among the given shapes.
    Smallest(FlagSet<Shape>),
    /// Exactly this size.
    Fixed(SymbolSize),
}

impl Default for SizeRequest {
    fn default() -> Self {
        Self::Smallest(FlagSet::full())
    }
}

impl From<SymbolSize> for SizeRequest {
    fn from(size: SymbolSize) -> Self {
        Self::Fixed(size)
    }
}

/// All codewords of a symbol (data, padding, error correction).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedText {
    pub codewords: Vec<u8>,
    pub symbol_size: SymbolSize,
}

/// Encode text to the complete codeword sequence of a symbol.
///
/// If `size` is given it is the `(rows, columns)` of the data area, see
/// [SymbolSize::with_data_area]. Otherwise the size with the smallest
/// data area which can hold the text is picked.
pub fn encode_codewords(
    text: &str,
    size: Option<(usize, usize)>,
) -> Result<EncodedText, EncodeError> {
    let request = match size {
        Some(dims) => SizeRequest::Fixed(SymbolSize::try_from(dims)?),
        None => SizeRequest::default(),
    };
    encode_with(text, request)
}

pub(crate) fn encode_with(text: &str, request: SizeRequest) -> Result<EncodedText, EncodeError> {
    let encoded = Pipeline::new(text)?
        .select_size(request)?
        .pad()
        .append_error_codes();

    if log_enabled!(target: "datamatrix", Level::Debug) {
        let list: Vec<String> = encoded.codewords.iter().map(|c| c.to_string()).collect();
        debug!(target: "datamatrix", "Codewords: {}", list.join(" "));
    }
    Ok(encoded)
}

/// Unpadded data codewords, before a size is known.
struct Pipeline {
    codewords: Vec<u8>,
}

/// Data codewords together with the size they are stored in.
struct SizedPipeline {
    codewords: Vec<u8>,
    unpadded_len: usize,
    symbol_size: SymbolSize,
}

impl Pipeline {
    fn new(text: &str) -> Result<Self, EncodeError> {
        let codewords = ascii::encode(text)?;
        debug!(target: "datamatrix", "Unpadded data size: {} bytes", codewords.len());
        Ok(Self { codewords })
    }

    fn select_size(self, request: SizeRequest) -> Result<SizedPipeline, EncodeError> {
        let needed = self.codewords.len();
        if needed > MAX_DATA_CODEWORDS {
            return Err(EncodeError::CapacityExceeded {
                needed,
                max: MAX_DATA_CODEWORDS,
            });
        }

        let symbol_size = match request {
            SizeRequest::Fixed(size) => {
                let setup = size.descriptor();
                if needed > setup.data_codewords {
                    return Err(EncodeError::PlacementSizeMismatch {
                        expected: setup.total_codewords(),
                        actual: needed + setup.error_codewords,
                    });
                }
                size
            }
            SizeRequest::Smallest(shapes) => {
                let exceeded = EncodeError::CapacityExceeded {
                    needed,
                    max: SymbolSize::max_data_codewords(shapes),
                };
                SymbolSize::smallest_for(needed, shapes).ok_or(exceeded)?
            }
        };
        let setup = symbol_size.descriptor();
        debug!(
            target: "datamatrix",
            "Matrix size will be {}x{} ({:?})", setup.rows, setup.columns, symbol_size
        );

        Ok(SizedPipeline {
            codewords: self.codewords,
            unpadded_len: needed,
            symbol_size,
        })
    }
}

impl SizedPipeline {
    /// Fill up the data codewords to the capacity of the symbol.
    fn pad(mut self) -> Self {
        let capacity = self.symbol_size.descriptor().data_codewords;
        let pad_size = capacity - self.unpadded_len;
        debug!(target: "datamatrix", "Pad size: {} bytes", pad_size);

        self.codewords.reserve(pad_size);
        if pad_size > 0 {
            self.codewords.push(PAD);
        }
        for i in 1..pad_size {
            self.codewords.push(pad_codeword(self.unpadded_len + i + 1));
        }
        self
    }

    fn append_error_codes(mut self) -> EncodedText {
        let ecc = errorcode::encode_error(&self.codewords, self.symbol_size);
        self.codewords.extend_from_slice(&ecc);
        EncodedText {
            codewords: self.codewords,
            symbol_size: self.symbol_size,
        }
    }
}

/// Pad codeword at the 1-based `position` in the codeword sequence.
///
/// This is the "253-state" randomization. A sum of exactly 254 wraps to 0.
pub(crate) fn pad_codeword(position: usize) -> u8 {
    let pseudo_random = (149 * position) % 253 + 1;
    ((PAD as usize + pseudo_random) % 254) as u8
}
