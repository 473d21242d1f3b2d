use flagset::FlagSet;
use pretty_assertions::assert_eq;

use super::{encode_codewords, encode_with, pad_codeword, SizeRequest, PAD};
use crate::error::EncodeError;
use crate::symbol_size::{Shape, SymbolSize};

fn data_part(text: &str, size: Option<(usize, usize)>) -> (Vec<u8>, SymbolSize) {
    let enc = encode_codewords(text, size).unwrap();
    let data_len = enc.symbol_size.descriptor().data_codewords;
    (enc.codewords[..data_len].to_vec(), enc.symbol_size)
}

#[test]
fn hudora() {
    let enc = encode_codewords("HuDoRa", None).unwrap();
    assert_eq!(enc.symbol_size, SymbolSize::Square14);
    assert_eq!(
        enc.codewords,
        vec![
            73, 118, 69, 112, 83, 98, 129, 56, // data and padding
            94, 188, 249, 38, 11, 30, 163, 167, 168, 2, // error codes
        ]
    );
}

#[test]
fn digits_fill_smallest_symbol() {
    let enc = encode_codewords("123456", None).unwrap();
    assert_eq!(enc.symbol_size, SymbolSize::Square10);
    assert_eq!(enc.codewords, vec![142, 164, 186, 114, 25, 5, 88, 102]);
}

#[test]
fn single_digit_pair() {
    let (data, size) = data_part("12", None);
    assert_eq!(size, SymbolSize::Square10);
    assert_eq!(data[0], 142);
    assert_eq!(data[1], PAD);
}

#[test]
fn padding_formula() {
    // three codewords in a symbol with capacity five
    let (data, size) = data_part("abc", Some((10, 10)));
    assert_eq!(size, SymbolSize::Square12);
    let second_pad = ((129 + ((149 * (3 + 1 + 1)) % 253 + 1)) % 254) as u8;
    assert_eq!(data, vec![98, 99, 100, 129, second_pad]);
    assert_eq!(second_pad, 115);
}

#[test]
fn padding_wraps_to_zero() {
    // position 28 gives 129 + 125 = 254
    assert_eq!(pad_codeword(28), 0);
    let (data, _) = data_part("A", Some((24, 24)));
    assert_eq!(data.len(), 44);
    assert_eq!(data[27], 0);
    assert_eq!(&data[..4], &[66, 129, 70, 220]);
}

#[test]
fn padding_sequence() {
    let expected: Vec<u8> = vec![
        25, 175, 70, 220, 115, 11, 161, 56, 206, 101, 251, 147, 42, 192, 87, 237,
    ];
    let got: Vec<u8> = (1..=16).map(pad_codeword).collect();
    assert_eq!(got, expected);
}

#[test]
fn no_padding_when_full() {
    let (data, size) = data_part("abc", None);
    assert_eq!(size, SymbolSize::Square10);
    assert_eq!(data, vec![98, 99, 100]);
}

#[test]
fn empty_text() {
    let (data, size) = data_part("", None);
    assert_eq!(size, SymbolSize::Square10);
    assert_eq!(data, vec![129, 175, 70]);
}

#[test]
fn rectangle_with_smaller_area_wins() {
    let enc = encode_codewords("Hello, World!", None).unwrap();
    assert_eq!(enc.symbol_size, SymbolSize::Rect12x26);
    assert_eq!(
        enc.codewords,
        vec![
            73, 102, 109, 109, 112, 45, 33, 88, 112, 115, 109, 101, 34, 129, 87, 237, 17, 18,
            234, 101, 255, 33, 228, 96, 41, 137, 193, 66, 5, 106
        ]
    );
}

#[test]
fn shape_restriction() {
    let squares = encode_with("Hello, World!", SizeRequest::Smallest(Shape::Square.into())).unwrap();
    assert_eq!(squares.symbol_size, SymbolSize::Square18);
    let rects = encode_with("abcdefgh", SizeRequest::Smallest(Shape::Rectangle.into())).unwrap();
    assert_eq!(rects.symbol_size, SymbolSize::Rect8x32);
    assert_eq!(
        encode_with(&"x".repeat(50), SizeRequest::Smallest(Shape::Rectangle.into())),
        Err(EncodeError::CapacityExceeded {
            needed: 50,
            max: 49
        })
    );
}

#[test]
fn fixed_size_request() {
    let enc = encode_with("abc", SymbolSize::Rect8x18.into()).unwrap();
    assert_eq!(enc.symbol_size, SymbolSize::Rect8x18);
    assert_eq!(enc.codewords.len(), 12);
}

#[test]
fn length_matches_symbol() {
    for n in 0..=174 {
        let text = "a".repeat(n);
        let enc = encode_codewords(&text, None).unwrap();
        let d = enc.symbol_size.descriptor();
        assert_eq!(enc.codewords.len(), d.data_codewords + d.error_codewords);
        assert_eq!(
            Some(enc.symbol_size),
            SymbolSize::smallest_for(n, FlagSet::full())
        );
    }
}

#[test]
fn capacity_exceeded() {
    assert_eq!(
        encode_codewords(&"a".repeat(175), None),
        Err(EncodeError::CapacityExceeded {
            needed: 175,
            max: 174
        })
    );
    // 175 digit pairs
    assert_eq!(
        encode_codewords(&"1".repeat(350), None),
        Err(EncodeError::CapacityExceeded {
            needed: 175,
            max: 174
        })
    );
    // also applies to explicit sizes with more room
    assert_eq!(
        encode_codewords(&"a".repeat(200), Some((48, 48))),
        Err(EncodeError::CapacityExceeded {
            needed: 200,
            max: 174
        })
    );
}

#[test]
fn maximum_capacity() {
    let enc = encode_codewords(&"1".repeat(348), None).unwrap();
    assert_eq!(enc.symbol_size, SymbolSize::Square48);
    assert_eq!(enc.codewords.len(), 174 + 68);
    assert!(enc.codewords[..174].iter().all(|c| *c == 141));
}

#[test]
fn explicit_bigger_sizes_are_padded() {
    let enc = encode_codewords("multi block", Some((48, 48))).unwrap();
    assert_eq!(enc.symbol_size, SymbolSize::Square52);
    assert_eq!(enc.codewords.len(), 204 + 84);
}

#[test]
fn unknown_size() {
    assert_eq!(
        encode_codewords("abc", Some((9, 9))),
        Err(EncodeError::UnknownSize {
            rows: 9,
            columns: 9
        })
    );
    // printed size is not a data area
    assert_eq!(
        encode_codewords("abc", Some((10, 10))).map(|e| e.symbol_size),
        Ok(SymbolSize::Square12)
    );
    assert_eq!(
        encode_codewords("abc", Some((12, 26))),
        Err(EncodeError::UnknownSize {
            rows: 12,
            columns: 26
        })
    );
}

#[test]
fn explicit_size_too_small() {
    assert_eq!(
        encode_codewords("abcdef", Some((8, 8))),
        Err(EncodeError::PlacementSizeMismatch {
            expected: 8,
            actual: 11
        })
    );
}

#[test]
fn unsupported_character_is_reported() {
    assert_eq!(
        encode_codewords("price: 5€", None),
        Err(EncodeError::UnsupportedCharacter('€'))
    );
}

#[test]
fn deterministic() {
    let a = encode_codewords("repeat 1234 me", None).unwrap();
    let b = encode_codewords("repeat 1234 me", None).unwrap();
    assert_eq!(a, b);
}
