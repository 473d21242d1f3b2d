//! GF(256) arithmetic for the Data Matrix Reed-Solomon code.
//!
//! An element is stored as a `u8` whose bits are the coefficients of a
//! polynomial of degree at most 7, least significant bit first:
//!
//! > 45 = 0b00101101 = x^5 + x^3 + x^2 + 1.
//!
//! Addition is coefficient-wise, so it is a XOR. Multiplication is done
//! modulo the polynomial 301 (0x12D, x^8 + x^5 + x^3 + x^2 + 1). With this
//! choice x = 2 generates all non-zero elements: x^0, x^1, ..., x^254 are
//! pairwise different and x^255 = 1. A product a * b is computed as
//! x^(log a + log b) using two lookup tables, LOG and ANTI_LOG.
use core::fmt;
use core::ops::{Add, AddAssign, Mul, MulAssign};

/// Compute the power and logarithm tables at compile time.
const fn compute_alog_log() -> ([u8; 255], [u8; 256]) {
    let mut alog = [0u8; 255];
    let mut log = [0u8; 256];
    let mut p: u16 = 1;
    let mut i: usize = 0;
    while i < 255 {
        alog[i] = p as u8;
        log[p as usize] = i as u8;

        // multiply by x and reduce
        p <<= 1;
        if p >= 256 {
            p ^= 0x12D;
        }
        i += 1;
    }
    (alog, log)
}

/// `ANTI_LOG[i]` is x^i.
const ANTI_LOG: [u8; 255] = compute_alog_log().0;

/// `LOG[a]` is the i with x^i = a, `LOG[0]` is unused.
const LOG: [u8; 256] = compute_alog_log().1;

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct GF(pub u8);

impl GF {
    /// Return x^i, the exponent is taken modulo 255.
    pub fn primitive_power(i: usize) -> Self {
        GF(ANTI_LOG[i % 255])
    }
}

impl fmt::Debug for GF {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}₂₅₆", self.0)
    }
}

impl Add<GF> for GF {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        GF(self.0 ^ rhs.0)
    }
}

impl AddAssign<GF> for GF {
    fn add_assign(&mut self, rhs: GF) {
        *self = *self + rhs;
    }
}

impl Mul<GF> for GF {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        if self.0 == 0 || rhs.0 == 0 {
            return GF(0);
        }
        let ia = LOG[self.0 as usize] as usize;
        let ib = LOG[rhs.0 as usize] as usize;
        GF(ANTI_LOG[(ia + ib) % 255])
    }
}

impl MulAssign<GF> for GF {
    fn mul_assign(&mut self, rhs: GF) {
        *self = *self * rhs;
    }
}

impl From<GF> for u8 {
    fn from(a: GF) -> u8 {
        a.0
    }
}

impl From<u8> for GF {
    fn from(i: u8) -> Self {
        GF(i)
    }
}

#[test]
fn tables_are_inverse() {
    use std::collections::HashSet;

    let powers: HashSet<u8> = ANTI_LOG.iter().cloned().collect();
    assert_eq!(powers.len(), 255);
    assert!(!powers.contains(&0));

    for i in 0..255 {
        assert_eq!(i, LOG[ANTI_LOG[i] as usize] as usize);
        assert_eq!(i + 1, ANTI_LOG[LOG[i + 1] as usize] as usize);
    }
}

#[test]
fn reduction_by_301() {
    // x^8 = x^5 + x^3 + x^2 + 1
    assert_eq!(GF::primitive_power(8), GF(45));
    assert_eq!(GF::primitive_power(15), GF(228));
    assert_eq!(GF::primitive_power(255), GF(1));
}

#[test]
fn mul() {
    assert_eq!(GF(123) * GF(1), GF(123));
    assert_eq!(GF(234) * GF(0), GF(0));
    assert_eq!(GF(0) * GF(23), GF(0));
    assert_eq!(GF(2) * GF(4) * GF(8) * GF(16) * GF(32), GF(228));
    let mut a = GF(1);
    for i in 0..600 {
        assert_eq!(GF::primitive_power(i), a);
        a *= GF(2);
    }
}

#[test]
fn add_is_xor() {
    assert_eq!(GF(0b1010) + GF(0b0110), GF(0b1100));
    for a in 0..=255 {
        let mut x = GF(a);
        x += GF(a);
        assert_eq!(x, GF(0));
    }
}
