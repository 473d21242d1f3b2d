//! Reed-Solomon error correction codes.
//!
//! By putting some redundancy into the symbol a reader can recover from
//! damaged or misread modules. Data Matrix uses a Reed-Solomon code over
//! GF(256) for this. The error codewords are the remainder of a polynomial
//! division: the data codewords are the coefficients of a polynomial d(x),
//! highest power first, and for k error codewords
//!
//! > d(x) * x^k = q(x) g(x) + r(x)
//!
//! with the generator polynomial g(x) = (x - a)(x - a^2)...(x - a^k),
//! where a = 2 is the primitive element of the field. The coefficients
//! of r(x) are the error codewords.
mod galois;

use log::debug;

use crate::symbol_size::SymbolSize;
use galois::GF;

#[cfg(test)]
use pretty_assertions::assert_eq;

/// Coefficients of the generator polynomial for `n` error codewords.
///
/// The leading coefficient (always 1) comes first.
fn generator(n: usize) -> Vec<u8> {
    let mut g = vec![GF(1)];
    for i in 1..=n {
        // multiply g by (x + a^i)
        let root = GF::primitive_power(i);
        let mut next = vec![GF(0); g.len() + 1];
        for (k, c) in g.iter().enumerate() {
            next[k] += *c;
            next[k + 1] += *c * root;
        }
        g = next;
    }
    g.into_iter().map(u8::from).collect()
}

/// Compute `n` Reed-Solomon parity codewords for `message`.
pub fn parity(message: &[u8], n: usize) -> Vec<u8> {
    let g = generator(n);
    let mut ecc = vec![0; n + 1];
    ecc_block(message.iter().copied(), &g, &mut ecc);
    ecc.truncate(n);
    ecc
}

/// Compute the error codewords of a symbol.
///
/// Bigger symbols split their data into interleaved blocks: block `b` takes
/// the data codewords `b`, `b + k`, `b + 2k`, ... for `k` blocks. The error
/// codewords of each block are interleaved the same way in the result.
/// Symbols with a single block just get [parity()] of all data.
pub fn encode_error(data: &[u8], size: SymbolSize) -> Vec<u8> {
    let setup = size.descriptor();
    let stride = setup.ecc_blocks;
    let per_block = setup.error_codewords / stride;
    debug!(target: "datamatrix", "Error word length: {} bytes in {} block(s)", setup.error_codewords, stride);

    let g = generator(per_block);
    let mut ecc = vec![0; per_block + 1];
    let mut full_ecc = vec![0; per_block * stride];
    for block in 0..stride {
        for item in &mut ecc {
            *item = 0;
        }
        let strided_data = data.iter().skip(block).step_by(stride).copied();
        ecc_block(strided_data, &g, &mut ecc);

        for (result, ecc_i) in full_ecc
            .iter_mut()
            .skip(block)
            .step_by(stride)
            .zip(&ecc[..per_block])
        {
            *result = *ecc_i;
        }
    }
    full_ecc
}

/// Polynomial division with remainder, the remainder ends up in `ecc`.
///
/// `ecc` needs one more entry than there are error codewords and must be
/// zero initially. The quotient is never stored.
fn ecc_block<T: Iterator<Item = u8>>(data: T, g: &[u8], ecc: &mut [u8]) {
    let ecc_len = g.len() - 1;
    for a in data {
        let k = GF(ecc[0]) + GF(a);
        for j in 0..ecc_len {
            ecc[j] = (GF(ecc[j + 1]) + k * GF(g[j + 1])).into();
        }
    }
}

#[test]
fn generator_matches_standard() {
    assert_eq!(generator(5), vec![1, 62, 111, 15, 48, 228]);
    assert_eq!(generator(7), vec![1, 254, 92, 240, 134, 144, 68, 23]);
    assert_eq!(
        generator(10),
        vec![1, 61, 110, 255, 116, 248, 223, 166, 185, 24, 28]
    );
    assert_eq!(
        generator(11),
        vec![1, 120, 97, 60, 245, 39, 168, 194, 12, 205, 138, 175]
    );
    assert_eq!(
        generator(18),
        vec![1, 188, 90, 48, 225, 254, 94, 129, 109, 213, 241, 61, 66, 75, 188, 39, 100, 195, 83]
    );
}

#[test]
fn parity_of_digit_pairs() {
    // "123456" as digit pairs in a 10x10 symbol
    assert_eq!(parity(&[142, 164, 186], 5), vec![114, 25, 5, 88, 102]);
}

#[test]
fn parity_small_message() {
    assert_eq!(parity(&[23, 40, 11], 5), vec![255, 207, 37, 244, 81]);
}

#[test]
fn parity_edge_cases() {
    assert_eq!(parity(&[1, 2, 3], 0), Vec::<u8>::new());
    assert_eq!(parity(&[], 4), vec![0, 0, 0, 0]);
    assert_eq!(parity(&[0, 0, 0], 5), vec![0, 0, 0, 0, 0]);
}

#[test]
fn single_block_is_plain_parity() {
    let data = [73, 118, 69, 112, 83, 98, 129, 56];
    assert_eq!(
        encode_error(&data, SymbolSize::Square14),
        vec![94, 188, 249, 38, 11, 30, 163, 167, 168, 2]
    );
    assert_eq!(encode_error(&data, SymbolSize::Square14), parity(&data, 10));
}

#[test]
fn interleaved_blocks() {
    let size = SymbolSize::Square52;
    let d = size.descriptor();
    let data: Vec<u8> = (0..d.data_codewords).map(|i| (i * 7 % 256) as u8).collect();
    let ecc = encode_error(&data, size);
    assert_eq!(ecc.len(), d.error_codewords);

    let even: Vec<u8> = data.iter().step_by(2).copied().collect();
    let odd: Vec<u8> = data.iter().skip(1).step_by(2).copied().collect();
    let even_ecc = parity(&even, 42);
    let odd_ecc = parity(&odd, 42);
    for i in 0..42 {
        assert_eq!(ecc[2 * i], even_ecc[i]);
        assert_eq!(ecc[2 * i + 1], odd_ecc[i]);
    }
}

#[test]
fn interleaved_blocks_of_unequal_length() {
    // 1558 data codewords in 10 blocks, the last two blocks are one shorter
    let size = SymbolSize::Square144;
    let d = size.descriptor();
    let data: Vec<u8> = (0..d.data_codewords).map(|i| (i % 251) as u8).collect();
    let ecc = encode_error(&data, size);
    assert_eq!(ecc.len(), 620);

    let last: Vec<u8> = data.iter().skip(9).step_by(10).copied().collect();
    assert_eq!(last.len(), 155);
    let last_ecc = parity(&last, 62);
    let got: Vec<u8> = ecc.iter().skip(9).step_by(10).copied().collect();
    assert_eq!(got, last_ecc);
}
