//! Narrow integer testing

use crate::maths::{Fail, NarrowError, NarrowInt, OverflowPolicy, ParseNarrowError, Saturate, Wrap, U3, U5};
use num_traits::{Bounded, CheckedAdd, CheckedShl, CheckedSub, Num, One, SaturatingSub, WrappingAdd, WrappingMul, Zero};
use proptest::prelude::*;
use std::convert::TryFrom;

type W5 = NarrowInt<5, Wrap>;
type S5 = NarrowInt<5, Saturate>;
type F5 = NarrowInt<5, Fail>;

#[test]
fn width5_bitwise_and_division() {
    let a = W5::new(0b00100);
    let b = W5::new(0b00011);

    assert_eq!(a & b, W5::new(0));
    assert_eq!(a | b, W5::new(7));
    assert_eq!(a ^ b, W5::new(7));
    assert_eq!(!a, W5::new(0b11011));
    assert_eq!(a << 1u32, W5::new(8));
    assert_eq!(a / b, W5::new(1));
    assert_eq!(a % b, W5::new(1));
}

#[test]
fn width5_overflow_per_policy() {
    assert_eq!(W5::new(31) + W5::new(1), W5::new(0));
    assert_eq!(S5::new(31) + S5::new(1), S5::new(31));
    assert_eq!(
        F5::new(31).try_add(F5::new(1)),
        Err(NarrowError::Overflow { bits: 5 })
    );
}

#[test]
#[should_panic(expected = "arithmetic overflow")]
fn fail_operator_panics_on_overflow() {
    let _ = F5::new(31) + F5::new(1);
}

#[test]
#[should_panic(expected = "arithmetic underflow")]
fn fail_operator_panics_on_underflow() {
    let mut v = F5::new(0);
    v -= 1u8;
}

#[test]
#[should_panic(expected = "division by zero")]
fn wrap_operator_panics_on_division_by_zero() {
    let _ = W5::new(3) / W5::new(0);
}

#[test]
#[should_panic(expected = "division by zero")]
fn saturate_operator_panics_on_remainder_by_zero() {
    let _ = S5::new(3) % 0u32;
}

#[test]
fn construction_per_policy() {
    assert_eq!(W5::new(33).value(), 1);
    assert_eq!(S5::new(100).value(), 31);
    assert_eq!(
        F5::try_new(32),
        Err(NarrowError::OutOfRange { value: 32, bits: 5 })
    );
    assert_eq!(F5::try_new(31).map(|v| v.value()), Ok(31));

    assert_eq!(F5::try_from(300u16), Err(NarrowError::OutOfRange { value: 300, bits: 5 }));
    assert_eq!(W5::try_from(u128::MAX).map(|v| v.value()), Ok(31));
    assert_eq!(S5::try_from(64usize).map(|v| v.value()), Ok(31));
}

#[test]
#[should_panic(expected = "does not fit in 5 bits")]
fn fail_new_panics_out_of_range() {
    let _ = F5::new(32);
}

#[test]
fn failed_assignment_leaves_receiver() {
    let mut v = F5::new(17);

    assert!(v.try_set(40).is_err());
    assert_eq!(v.value(), 17);

    assert!(v.try_mul_assign(F5::new(2)).is_err());
    assert_eq!(v.value(), 17);

    assert_eq!(v.try_div_assign(F5::new(0)), Err(NarrowError::DivisionByZero));
    assert_eq!(v.value(), 17);

    v.set(3);
    assert_eq!(v.value(), 3);
}

#[test]
fn negation() {
    assert_eq!(-W5::new(3), W5::new(29));
    assert_eq!(-W5::new(0), W5::new(0));
    assert_eq!(-S5::new(3), S5::new(0));
    assert_eq!(F5::new(3).try_neg(), Err(NarrowError::Underflow { bits: 5 }));
    assert_eq!(-F5::new(0), F5::new(0));
}

#[test]
fn increment_and_decrement_boundaries() {
    let mut w = W5::new(31);
    w.increment();
    assert_eq!(w.value(), 0);
    w.decrement();
    assert_eq!(w.value(), 31);

    let mut s = S5::new(0);
    s.decrement();
    assert_eq!(s.value(), 0);

    let mut f = F5::new(31);
    assert_eq!(f.try_increment(), Err(NarrowError::Overflow { bits: 5 }));
    assert_eq!(f.value(), 31);

    let mut f = F5::new(0);
    assert_eq!(f.try_decrement(), Err(NarrowError::Underflow { bits: 5 }));
    assert_eq!(f.value(), 0);
}

#[test]
fn mixed_primitive_operands() {
    assert_eq!(W5::new(1) + 40u8, W5::new(9));
    assert_eq!(40u8 + W5::new(1), W5::new(9));
    assert_eq!(S5::new(1) + 40u8, S5::new(31));
    assert_eq!(3u32 - S5::new(4), S5::new(0));
    assert_eq!(100u64 / W5::new(2), W5::new(18));
    assert_eq!(W5::new(7) * 5usize, W5::new(3));
    assert_eq!(F5::new(20).try_sub(F5::new(5)).map(|v| v.value()), Ok(15));

    let mut v = W5::new(30);
    v += 3u16;
    assert_eq!(v.value(), 1);

    assert_eq!(W5::new(0b10101) & 0xFFu32, W5::new(0b10101));
    assert_eq!(0xFFu8 | W5::new(0), W5::new(31));
    assert_eq!(0b11u128 ^ W5::new(0b01), W5::new(0b10));
}

#[test]
fn mixed_primitive_comparisons() {
    let four = W5::new(4);

    assert!(four < 5u32);
    assert!(5u32 > four);
    assert!(four == 4u64);
    assert!(4u8 == four);
    assert!(four != 36u64);
    assert!(four <= 4usize);
    assert!(300u16 >= four);
    assert!(W5::new(3) < four);
}

#[test]
fn shifts_truncate() {
    assert_eq!(W5::new(4) << 3u32, W5::new(0));
    assert_eq!(W5::new(31) >> 64u32, W5::new(0));
    assert_eq!(W5::new(4) << 70u8, W5::new(0));
    assert_eq!(W5::new(1) << U3::new(4), W5::new(16));
    assert_eq!(F5::new(31) << 1u32, F5::new(30));

    let mut v = W5::new(0b10110);
    v >>= 2usize;
    assert_eq!(v.value(), 0b101);
}

#[test]
fn compound_shifts_mixed_operands() {
    let mut f = F5::new(3);
    f <<= 1u8;
    assert_eq!(f, F5::new(6));
    f >>= U3::new(1);
    assert_eq!(f, F5::new(3));
    f <<= 4u32;
    assert_eq!(f, F5::new(16));
    f >>= 70u64;
    assert_eq!(f, F5::ZERO);

    let mut s = S5::new(31);
    s <<= W5::new(2);
    assert_eq!(s, S5::new(28));
    s >>= 2usize;
    assert_eq!(s, S5::new(7));
}

#[test]
fn copy_without_policy_bounds() {
    struct Tag;

    let mut a = NarrowInt::<5, Tag>::from_masked(0b10011);
    let b = a;
    a <<= 1u8;
    a >>= 2u16;

    assert_eq!(a.value(), 0b00001);
    assert_eq!(b.value(), 0b10011);
    assert_eq!(b.clone().value(), 0b10011);
}

#[test]
fn sixty_four_bit_edges() {
    type W64 = NarrowInt<64, Wrap>;
    type S64 = NarrowInt<64, Saturate>;
    type F64 = NarrowInt<64, Fail>;

    assert_eq!(W64::MAX, u64::MAX);
    assert_eq!(W64::new(u64::MAX) + W64::new(1), W64::new(0));
    assert_eq!(W64::new(u64::MAX) * W64::new(u64::MAX), W64::new(1));
    assert_eq!(S64::new(u64::MAX) + 1u8, S64::new(u64::MAX));
    assert_eq!(F64::new(u64::MAX).try_mul(F64::new(2)), Err(NarrowError::Overflow { bits: 64 }));
    assert_eq!(!W64::new(0), W64::new(u64::MAX));
    assert_eq!(W64::new(1).rotate_right(1), W64::new(1 << 63));
}

#[test]
fn bit_helpers() {
    let v = U5::new(0b00100);

    assert!(v.bit(2));
    assert!(!v.bit(3));
    assert!(!v.bit(40));
    assert_eq!(v.with_bit(4, true), U5::new(0b10100));
    assert_eq!(v.with_bit(2, false), U5::new(0));
    assert_eq!(v.with_bit(5, true), v);

    assert_eq!(v.count_ones(), 1);
    assert_eq!(v.count_zeros(), 4);
    assert_eq!(v.leading_zeros(), 2);

    assert_eq!(U5::new(1).rotate_right(1), U5::new(0b10000));
    assert_eq!(U5::new(0b10000).rotate_left(1), U5::new(1));
    assert_eq!(U5::new(0b10011).rotate_left(5), U5::new(0b10011));

    assert_eq!(U5::new(31).zero_extend::<7>().value(), 31);
    assert_eq!(U5::new(31).truncate::<3>().value(), 7);
    assert_eq!(F5::new(9).into_policy::<Wrap>(), W5::new(9));
}

#[test]
fn parse_and_format() {
    assert_eq!("0x1F".parse::<U5>(), Ok(U5::new(31)));
    assert_eq!("0b101".parse::<U5>(), Ok(U5::new(5)));
    assert_eq!("0o17".parse::<U5>(), Ok(U5::new(15)));
    assert_eq!("33".parse::<U5>(), Ok(U5::new(1)));
    assert_eq!(
        "32".parse::<F5>(),
        Err(ParseNarrowError::Range(NarrowError::OutOfRange { value: 32, bits: 5 }))
    );
    assert!(matches!("abc".parse::<F5>(), Err(ParseNarrowError::Int(_))));

    assert_eq!(W5::from_str_radix("v", 36), Ok(W5::new(31)));
    assert_eq!(W5::from_str_radix("1", 40), Err(ParseNarrowError::Radix(40)));
    assert_eq!(W5::from_str_radix("0", 1), Err(ParseNarrowError::Radix(1)));

    assert_eq!(format!("{}", U5::new(27)), "27");
    assert_eq!(format!("{:#x}", U5::new(27)), "0x1b");
    assert_eq!(format!("{:X}", U5::new(27)), "1B");
    assert_eq!(format!("{:05b}", U5::new(4)), "00100");
    assert_eq!(format!("{:?}", U5::new(4)), "4u5");
}

#[test]
fn num_traits_integration() {
    assert_eq!(W5::new(31).checked_add(&W5::new(1)), None);
    assert_eq!(S5::new(3).checked_sub(&S5::new(4)), None);
    assert_eq!(F5::new(3).checked_add(&F5::new(4)), Some(F5::new(7)));
    assert_eq!(F5::new(31).wrapping_add(&F5::new(1)), F5::new(0));
    assert_eq!(F5::new(8).wrapping_mul(&F5::new(5)), F5::new(8));
    assert_eq!(W5::new(3).saturating_sub(&W5::new(4)), W5::new(0));
    assert_eq!(W5::new(1).checked_shl(5), None);
    assert_eq!(W5::new(1).checked_shl(4), Some(W5::new(16)));

    assert!(W5::zero().is_zero());
    assert_eq!(W5::one().value(), 1);
    assert_eq!(<W5 as Bounded>::max_value().value(), 31);
    assert_eq!(<F5 as Bounded>::min_value(), F5::ZERO);
    assert_eq!(W5::default(), W5::ZERO);
}

#[test]
fn conversions_out() {
    type W12 = NarrowInt<12>;

    assert_eq!(u64::from(U5::new(3)), 3);
    assert_eq!(u128::from(U5::new(3)), 3);
    assert_eq!(u8::try_from(W12::new(255)), Ok(255));
    assert!(u8::try_from(W12::new(300)).is_err());
    assert_eq!(u32::try_from(U5::new(17)), Ok(17));
}

#[test]
fn policy_introspection() {
    assert_eq!(W5::policy(), OverflowPolicy::Wrap);
    assert_eq!(S5::policy(), OverflowPolicy::Saturate);
    assert_eq!(F5::policy(), OverflowPolicy::Fail);
    assert_eq!(F5::BITS, 5);
    assert_eq!(F5::MAX, 31);
}

#[test]
fn serde_as_bare_integer() {
    assert_eq!(serde_json::to_string(&U5::new(27)).unwrap(), "27");
    assert_eq!(serde_json::from_str::<U5>("33").unwrap(), U5::new(1));
    assert_eq!(serde_json::from_str::<S5>("33").unwrap(), S5::new(31));
    assert!(serde_json::from_str::<F5>("32").is_err());
}

/// Generates the arithmetic laws for a single width.
macro_rules! width_laws {
    ($modname:ident, $n:literal) => {
        mod $modname {
            use crate::maths::{Fail, NarrowError, NarrowInt, Saturate, Wrap};
            use proptest::prelude::*;

            type W = NarrowInt<$n, Wrap>;
            type S = NarrowInt<$n, Saturate>;
            type F = NarrowInt<$n, Fail>;

            const MAX: u64 = W::MAX;
            const MODULUS: u128 = 1 << $n;

            proptest! {
                #[test]
                fn roundtrip(v in 0..=MAX) {
                    prop_assert_eq!(W::new(v).value(), v);
                    prop_assert_eq!(S::new(v).value(), v);
                    prop_assert_eq!(F::try_new(v).map(|f| f.value()), Ok(v));
                }

                #[test]
                fn wrap_is_modular(a in 0..=MAX, b in 0..=MAX) {
                    let (wa, wb) = (W::new(a), W::new(b));
                    let (a, b) = (a as u128, b as u128);

                    prop_assert_eq!((wa + wb).value() as u128, (a + b) % MODULUS);
                    prop_assert_eq!((wa - wb).value() as u128, (a + MODULUS - b) % MODULUS);
                    prop_assert_eq!((wa * wb).value() as u128, (a * b) % MODULUS);
                }

                #[test]
                fn saturate_clamps(a in 0..=MAX, b in 0..=MAX) {
                    let (sa, sb) = (S::new(a), S::new(b));
                    let (wide_a, wide_b) = (a as u128, b as u128);

                    prop_assert_eq!((sa + sb).value() as u128, (wide_a + wide_b).min(MAX as u128));
                    prop_assert_eq!((sa - sb).value(), a.saturating_sub(b));
                    prop_assert_eq!((sa * sb).value() as u128, (wide_a * wide_b).min(MAX as u128));
                }

                #[test]
                fn fail_preserves_receiver(a in 0..=MAX, b in 0..=MAX) {
                    let mut sum = F::new(a);
                    let result = sum.try_add_assign(F::new(b));
                    if a as u128 + b as u128 > MAX as u128 {
                        prop_assert_eq!(result, Err(NarrowError::Overflow { bits: $n }));
                        prop_assert_eq!(sum.value(), a);
                    } else {
                        prop_assert_eq!(result, Ok(()));
                        prop_assert_eq!(sum.value(), a + b);
                    }

                    let mut difference = F::new(a);
                    let result = difference.try_sub_assign(F::new(b));
                    if b > a {
                        prop_assert_eq!(result, Err(NarrowError::Underflow { bits: $n }));
                        prop_assert_eq!(difference.value(), a);
                    } else {
                        prop_assert_eq!(result, Ok(()));
                        prop_assert_eq!(difference.value(), a - b);
                    }

                    let mut product = F::new(a);
                    let result = product.try_mul_assign(F::new(b));
                    if a as u128 * b as u128 > MAX as u128 {
                        prop_assert_eq!(result, Err(NarrowError::Overflow { bits: $n }));
                        prop_assert_eq!(product.value(), a);
                    } else {
                        prop_assert_eq!(result, Ok(()));
                    }
                }

                #[test]
                fn division_by_zero_under_every_policy(a in 0..=MAX) {
                    prop_assert_eq!(W::new(a).try_div(W::ZERO), Err(NarrowError::DivisionByZero));
                    prop_assert_eq!(W::new(a).try_rem(W::ZERO), Err(NarrowError::DivisionByZero));
                    prop_assert_eq!(S::new(a).try_div(S::ZERO), Err(NarrowError::DivisionByZero));
                    prop_assert_eq!(S::new(a).try_rem(S::ZERO), Err(NarrowError::DivisionByZero));
                    prop_assert_eq!(F::new(a).try_div(F::ZERO), Err(NarrowError::DivisionByZero));
                    prop_assert_eq!(F::new(a).try_rem(F::ZERO), Err(NarrowError::DivisionByZero));
                }

                #[test]
                fn bitwise_identities(a in 0..=MAX) {
                    let v = W::new(a);

                    prop_assert_eq!(v & v, v);
                    prop_assert_eq!(v | v, v);
                    prop_assert_eq!((v ^ v).value(), 0);
                    prop_assert_eq!(!!v, v);
                    prop_assert!((!v).value() <= MAX);
                }
            }
        }
    };
}

width_laws!(width_1, 1);
width_laws!(width_3, 3);
width_laws!(width_5, 5);
width_laws!(width_6, 6);
width_laws!(width_7, 7);
width_laws!(width_12, 12);
width_laws!(width_32, 32);
width_laws!(width_63, 63);
width_laws!(width_64, 64);

proptest! {
    #[test]
    fn mixed_operands_match_widened_maths(a in 0..=31u64, b: u32) {
        let expected = (a as u128 + b as u128) % 32;

        prop_assert_eq!((W5::new(a) + b).value() as u128, expected);
        prop_assert_eq!((b + W5::new(a)).value() as u128, expected);
        prop_assert_eq!(W5::new(a) < b, (a as u128) < b as u128);
    }
}
