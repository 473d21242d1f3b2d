use arrayvec::ArrayVec;
use log::trace;

use crate::error::EncodeError;

/// Two digits `ab` are written as `DIGIT_PAIR + 10 * a + b`.
pub(super) const DIGIT_PAIR: u8 = 130;

/// Codeword for a single character, its code point plus one.
fn ascii_codeword(ch: char) -> Result<u8, EncodeError> {
    u8::try_from(u32::from(ch) + 1).map_err(|_| EncodeError::UnsupportedCharacter(ch))
}

fn push_ascii(codewords: &mut Vec<u8>, ch: char) -> Result<(), EncodeError> {
    let cw = ascii_codeword(ch)?;
    trace!(target: "datamatrix", "ascii:   {:?} ==> {}", ch, cw);
    codewords.push(cw);
    Ok(())
}

/// Encode text into unpadded data codewords.
///
/// Consecutive ASCII digits are packed in pairs into one codeword, every
/// other character (and a digit without partner) takes one codeword.
/// A digit is only paired with the digit directly following it, so "1a2"
/// never combines the 1 and the 2.
pub(super) fn encode(text: &str) -> Result<Vec<u8>, EncodeError> {
    let mut codewords = Vec::with_capacity(text.len());
    let mut digits = ArrayVec::<char, 2>::new();

    for ch in text.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
            if digits.is_full() {
                let value = digits
                    .drain(..)
                    .fold(0, |acc, d| acc * 10 + (d as u8 - b'0'));
                trace!(target: "datamatrix", "digits:  {:02} ==> {}", value, DIGIT_PAIR + value);
                codewords.push(DIGIT_PAIR + value);
            }
        } else {
            if let Some(digit) = digits.pop() {
                push_ascii(&mut codewords, digit)?;
            }
            push_ascii(&mut codewords, ch)?;
        }
    }

    // a single digit might be left at the end
    if let Some(digit) = digits.pop() {
        push_ascii(&mut codewords, digit)?;
    }
    Ok(codewords)
}
