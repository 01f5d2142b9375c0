use crate::{decimal::ParseError, util::scratch, BigIInt, BigUInt, SigNum, Sign, Thresholds};

/// checks every operand form and the assign form of `$op` for both limb types
macro_rules! test_op {
    ($ty:ident, $lhs:expr, $op:tt, $assign_op:tt, $rhs:expr, $result:expr) => {
        test_op!(@limb $ty, u32, $lhs, $op, $assign_op, $rhs, $result);
        test_op!(@limb $ty, u64, $lhs, $op, $assign_op, $rhs, $result);
    };
    (@limb $ty:ident, $limb:ty, $lhs:expr, $op:tt, $assign_op:tt, $rhs:expr, $result:expr) => {{
        let lhs = $ty::<$limb>::from($lhs);
        let rhs = $ty::<$limb>::from($rhs);
        let result = $ty::<$limb>::from($result);
        let msg = format!("{lhs} {} {rhs}", stringify!($op));
        assert_eq!(lhs.clone() $op rhs.clone(), result, "owned, owned with {msg}");
        assert_eq!(lhs.clone() $op &rhs, result, "owned, & with {msg}");
        assert_eq!(&lhs $op rhs.clone(), result, "&, owned with {msg}");
        assert_eq!(&lhs $op &rhs, result, "&, & with {msg}");

        let mut assigned = lhs.clone();
        assigned $assign_op &rhs;
        assert_eq!(assigned, result, "assigned & with {msg}");
        let mut assigned = lhs.clone();
        assigned $assign_op rhs.clone();
        assert_eq!(assigned, result, "assigned owned with {msg}");
    }};
}
macro_rules! test_op_commute {
    ($ty:ident, $lhs:expr, $op:tt, $assign_op:tt, $rhs:expr, $result:expr) => {
        test_op!($ty, $lhs, $op, $assign_op, $rhs, $result);
        test_op!($ty, $rhs, $op, $assign_op, $lhs, $result);
    };
}

mod create {
    use super::*;

    #[test]
    fn cast_signum() {
        for i in i8::MIN..=i8::MAX {
            assert_eq!(
                SigNum::from_i8(i) == SigNum::Negative,
                i < 0,
                "{i} failed to be/not be Negative"
            );
            assert_eq!(
                SigNum::from_i8(i) == SigNum::Zero,
                i == 0,
                "{i} failed to be/not be Zero"
            );
            assert_eq!(
                SigNum::from_i8(i) == SigNum::Positive,
                i > 0,
                "{i} failed to be/not be Positive"
            );
            assert_eq!(i8::from(SigNum::from_i8(i)), i.signum());
        }
    }
    #[test]
    fn from_u32s() {
        assert_eq!(
            BigUInt::<u32>::from_iter([0x3322_1100u32, 0x7766_5544, 0x9988]).limbs(),
            &[0x3322_1100, 0x7766_5544, 0x0000_9988]
        );
        assert_eq!(
            BigUInt::<u64>::from_iter([0x3322_1100u32, 0x7766_5544, 0x9988]).limbs(),
            &[0x7766_5544_3322_1100, 0x0000_9988]
        );
    }
    #[test]
    fn from_i128() {
        let number = BigIInt::<u32>::from(-0x9988_7766_5544_3322_1100i128);
        assert_eq!(number.signum(), SigNum::Negative);
        assert_eq!(number.abs().limbs(), &[0x3322_1100, 0x7766_5544, 0x0000_9988]);
        assert_eq!(BigIInt::<u64>::from(i128::MIN).abs().limbs(), &[0, 1 << 63]);
    }
    #[test]
    fn trimmed() {
        assert_eq!(BigUInt::from_vec(vec![1u32, 0, 0]).limbs(), &[1]);
        assert!(BigUInt::from_vec(vec![0u64, 0]).is_zero());
        assert!(BigUInt::<u32>::from(0u8).limbs().is_empty());
        assert!(BigUInt::<u32>::from(1u8).is_one());
    }
    #[test]
    fn zero_has_no_sign() {
        assert_eq!(BigIInt::<u32>::from(0).signum(), SigNum::Zero);
        assert_eq!(BigIInt::new(Sign::Negative, BigUInt::<u32>::ZERO), BigIInt::ZERO);
        assert_eq!(-BigIInt::<u32>::ZERO, BigIInt::ZERO);
        assert_eq!(BigIInt::<u64>::from(5) - BigIInt::from(5), BigIInt::ZERO);
        assert_eq!((BigIInt::<u64>::from(-5) + BigIInt::from(5)).signum(), SigNum::Zero);
        assert_eq!(BigIInt::<u64>::from(-5) * BigIInt::ZERO, BigIInt::ZERO);
        assert_eq!("-0".parse::<BigIInt<u32>>(), Ok(BigIInt::ZERO));
        assert_eq!(BigIInt::<u32>::from(-3).div_rem(&BigIInt::from(5)).1.signum(), SigNum::Negative);
        assert_eq!(BigIInt::<u32>::from(-10).div_rem(&BigIInt::from(5)).1, BigIInt::ZERO);
    }
    #[test]
    #[should_panic(expected = "SigNum::Zero")]
    fn signed_zero_parts() {
        let _ = BigIInt::from_parts(SigNum::Positive, BigUInt::<u32>::ZERO);
    }
    #[test]
    fn random() {
        let (seed, mut rng) = crate::util::rng::seeded_rng();
        for _ in 0..100 {
            let number = BigUInt::<u32>::new_random(2..=3, &mut rng);
            assert!((2..=3).contains(&number.limbs().len()), "with seed {seed:?}");
        }
    }
}

mod output {
    use super::*;

    #[test]
    fn lower_hex() {
        assert_eq!(
            format!("{:x}", BigUInt::<u32>::from(0x9988_7766_5544_3322_1100u128)),
            "99887766554433221100"
        );
        assert_eq!(
            format!("{:x}", BigUInt::<u64>::from(0x9988_7766_5544_3322_1100u128)),
            "99887766554433221100"
        );
        assert_eq!(
            format!("{:#x}", BigIInt::<u32>::from(0x9988_7766_5544_3322_1100u128)),
            "0x99887766554433221100"
        );
        assert_eq!(
            format!("{:x}", BigIInt::<u32>::from(-0x9988_7766_5544_3322_1100i128)),
            "-99887766554433221100"
        );
        assert_eq!(
            format!("{:#x}", BigIInt::<u64>::from(-0x9988_7766_5544_3322_1100i128)),
            "-0x99887766554433221100"
        );
        assert_eq!(
            format!("{:0>32x}", BigUInt::<u32>::from(0x9988_7766_5544_3322_1100u128)),
            "00000000000099887766554433221100"
        );
        assert_eq!(
            format!("{:#032x}", BigUInt::<u32>::from(0x9988_7766_5544_3322_1100u128)),
            "0x000000000099887766554433221100"
        );
        assert_eq!(
            format!(
                "{:#032x}",
                BigUInt::<u64>::from(0xeedd_ccbb_aa99_8877_6655_4433_2211_00u128)
            ),
            "0xeeddccbbaa99887766554433221100"
        );
        assert_eq!(format!("{:x}", BigUInt::<u32>::ZERO), "0");
        assert_eq!(format!("{:x}", BigUInt::<u32>::from(0x1_0000_0000u64)), "100000000");
    }

    #[test]
    fn display() {
        assert_eq!(BigUInt::<u32>::from(u128::MAX).to_string(), u128::MAX.to_string());
        assert_eq!(BigIInt::<u64>::from(i128::MIN).to_string(), i128::MIN.to_string());
        assert_eq!(BigIInt::<u32>::ZERO.to_string(), "0");
        assert_eq!(format!("{:>6}", BigUInt::<u32>::from(42u8)), "    42");
        assert_eq!(format!("{:<6}|", BigIInt::<u32>::from(-42)), "-42   |");
        assert_eq!(format!("{:06}", BigIInt::<u32>::from(-42)), "-00042");
        assert_eq!(format!("{:+}", BigIInt::<u64>::from(42)), "+42");
        assert_eq!(BigIInt::<u32>::from(-42).to_decimal(5), "-00042");
        assert_eq!(BigUInt::<u64>::ZERO.to_decimal(3), "000");
    }

    #[test]
    fn debug() {
        assert_eq!(
            format!("{:?}", BigUInt::<u32>::from(0x1_0000_0002u64)),
            "Number { 0x[00000001, 00000002]}"
        );
        assert_eq!(
            format!("{:?}", BigIInt::<u32>::from(-2)),
            "Number { - 0x[00000002]}"
        );
    }
}

mod parse {
    use super::*;

    const LHS: &str = "80155472849772888577790197284454297796629236898049773790508585955171049425217700701800211448710579988579350150139628536656730944970057618121371373222965611244997142685929439088545113705852";
    const RHS: &str = "86756939578627670999157778958351992404786706338471502703518388930261373702154245571728570684873572813182887698317492106338001452977729165158555131110122463043405561449682507597964414391615";
    const SUM: &str = "166912412428400559576947976242806290201415943236521276494026974885432423127371946273528782133584152801762237848457120642994732397947786783279926504333088074288402704135611946686509528097467";

    #[test]
    fn golden_addition() {
        assert_eq!(LHS.len(), 188);
        assert_eq!(RHS.len(), 188);
        let lhs = LHS.parse::<BigUInt<u32>>().expect("valid number");
        let rhs = RHS.parse::<BigUInt<u32>>().expect("valid number");
        assert_eq!((&lhs + &rhs).to_string(), SUM);
        assert_eq!(&(&lhs + &rhs) - &rhs, lhs);

        let lhs = LHS.parse::<BigIInt<u64>>().expect("valid number");
        let rhs = RHS.parse::<BigIInt<u64>>().expect("valid number");
        assert_eq!((&lhs + &rhs).to_string(), SUM);
        assert_eq!((-&lhs - &rhs).to_string(), format!("-{SUM}"));
    }

    #[test]
    fn errors() {
        assert_eq!(
            "-5".parse::<BigUInt<u32>>(),
            Err(ParseError::InvalidDigit { digit: '-', position: 0 })
        );
        assert_eq!(
            "  -5".parse::<BigUInt<u32>>(),
            Err(ParseError::InvalidDigit { digit: '-', position: 2 })
        );
        assert_eq!("-0".parse::<BigUInt<u32>>(), Ok(BigUInt::ZERO));
        assert_eq!("".parse::<BigIInt<u32>>(), Err(ParseError::Empty));
        assert_eq!(
            "1x".parse::<BigIInt<u32>>(),
            Err(ParseError::InvalidDigit { digit: 'x', position: 1 })
        );
        assert_eq!("-1.5e1".parse::<BigIInt<u32>>(), Ok(BigIInt::from(-15)));
    }
}

mod order {
    use std::cmp::Ordering;

    use super::*;

    #[test]
    fn same() {
        assert_eq!(
            BigIInt::<u32>::from(0x9988_7766_5544_3322_1100u128)
                .cmp(&BigIInt::from(0x9988_7766_5544_3322_1100u128)),
            Ordering::Equal
        );
        assert_eq!(
            BigIInt::<u32>::from(-0x9988_7766_5544_3322_1100i128)
                .cmp(&BigIInt::from(-0x9988_7766_5544_3322_1100i128)),
            Ordering::Equal
        );
    }
    #[test]
    fn negated() {
        assert_eq!(
            BigIInt::<u32>::from(0x9988_7766_5544_3322_1100u128)
                .cmp(&BigIInt::from(-0x9988_7766_5544_3322_1100i128)),
            Ordering::Greater
        );
        assert_eq!(
            BigIInt::<u32>::from(-0x9988_7766_5544_3322_1100i128)
                .cmp(&BigIInt::from(0x9988_7766_5544_3322_1100i128)),
            Ordering::Less
        );
        assert!(BigIInt::<u64>::from(-5) < BigIInt::from(-3));
        assert!(BigIInt::<u64>::from(-5) < BigIInt::ZERO);
    }
    #[test]
    fn middle_diff() {
        assert_eq!(
            BigUInt::<u32>::from(0x9988_8866_5544_3322_1100u128)
                .cmp(&BigUInt::from(0x9988_7766_5544_3322_1100u128)),
            Ordering::Greater
        );
        assert_eq!(
            BigUInt::<u32>::from(0x9988_7766_5544_3322_1100u128)
                .cmp(&BigUInt::from(0x9988_8866_5544_3322_1100u128)),
            Ordering::Less
        );
    }
    #[test]
    fn size_diff() {
        assert_eq!(
            BigUInt::<u32>::from(0xfff_ffff_ffff_ffff_ffffu128)
                .cmp(&BigUInt::from(0x9988_7766_5544_3322_1100u128)),
            Ordering::Less
        );
    }
}

mod big_math {
    use super::*;

    #[test]
    fn add_overflow() {
        test_op_commute!(BigUInt, 0xffff_ffff_ffff_ffffu64, +, +=, 1u8, 0x1_0000_0000_0000_0000u128);
    }
    #[test]
    fn add_middle_overflow() {
        test_op_commute!(
            BigUInt,
            0x1000_0000_ffff_ffff_ffff_ffffu128,
            +,
            +=,
            1u8,
            0x1000_0001_0000_0000_0000_0000u128
        );
    }
    #[test]
    fn add_two_negative() {
        test_op_commute!(
            BigIInt,
            -0x1122_3344_5566_7788i128,
            +,
            +=,
            -0x8877_6655_4433_2211i128,
            -0x9999_9999_9999_9999i128
        );
    }
    #[test]
    fn add() {
        test_op!(
            BigIInt,
            0x1122_3344_5566_7788i128,
            -,
            -=,
            -0x8877_6655_4433_2211i128,
            0x9999_9999_9999_9999i128
        );
        test_op_commute!(
            BigIInt,
            0x1122_3344_5566_7788i128,
            +,
            +=,
            0x8877_6655_4433_2211i128,
            0x9999_9999_9999_9999i128
        );
    }
    #[test]
    fn sub_big() {
        test_op!(
            BigUInt,
            0x9999_9999_9999_9999u128,
            -,
            -=,
            0x8877_6655_4433_2211u128,
            0x1122_3344_5566_7788u128
        );
        test_op_commute!(
            BigIInt,
            0x9999_9999_9999_9999i128,
            +,
            +=,
            -0x8877_6655_4433_2211i128,
            0x1122_3344_5566_7788i128
        );
    }
    #[test]
    fn sub_sign() {
        test_op!(BigIInt, 1, -, -=, 2, -1);
        test_op!(BigIInt, -1, -, -=, -2, 1);
        test_op!(BigIInt, -1, -, -=, 2, -3);
    }
    #[test]
    fn sub_overflow() {
        test_op!(
            BigIInt,
            0x1_0000_0000_0000_0000_0000_0000_0000i128,
            -,
            -=,
            1,
            0xffff_ffff_ffff_ffff_ffff_ffff_ffffi128
        );
    }
    #[test]
    #[should_panic(expected = "result would be negative")]
    fn sub_unsigned_negative() {
        let _ = BigUInt::<u32>::from(1u8) - BigUInt::from(2u8);
    }

    #[test]
    fn mul() {
        test_op_commute!(BigIInt, 7, *, *=, 6, 42);
        test_op_commute!(BigUInt, 30_000_000_700_000u128, *, *=, 60u8, 1_800_000_042_000_000u128);
        test_op_commute!(BigUInt, 0u8, *, *=, u128::MAX, 0u8);
    }
    #[test]
    fn mul_one_big() {
        test_op_commute!(
            BigUInt,
            0x0fee_ddcc_bbaa_9988_7766_5544_3322_1100u128,
            *,
            *=,
            2u8,
            0x1fdd_bb99_7755_3310_eecc_aa88_6644_2200u128
        );
    }
    #[test]
    fn mul_sign() {
        test_op_commute!(BigIInt, 3, *, *=, 3, 9);
        test_op_commute!(BigIInt, -3, *, *=, 3, -9);
        test_op_commute!(BigIInt, 3, *, *=, -3, -9);
        test_op_commute!(BigIInt, -3, *, *=, -3, 9);
    }
    #[test]
    fn mul_both_big() {
        let number = BigUInt::<u32>::from(0xffee_ddcc_bbaa_9988_7766_5544_3322_1100u128);
        let expected = BigUInt::<u32>::from_iter([
            0x3343_2fd7_16cc_d713_5f99_9f4e_8521_0000u128,
            0xffdd_bcbf_06b5_eed3_8628_ddc7_06bf_1222u128,
        ]);
        assert_eq!(&number * &number, expected);
        assert_eq!(number.square(), expected);
        assert_eq!(number.pow(2), expected);
    }

    #[test]
    fn div_rem() {
        test_op!(BigIInt, 7, /, /=, 2, 3);
        test_op!(BigIInt, -7, /, /=, 2, -3);
        test_op!(BigIInt, 7, /, /=, -2, -3);
        test_op!(BigIInt, -7, /, /=, -2, 3);
        test_op!(BigIInt, 7, %, %=, 2, 1);
        test_op!(BigIInt, -7, %, %=, 2, -1);
        test_op!(BigIInt, 7, %, %=, -2, 1);
        test_op!(BigIInt, -7, %, %=, -2, -1);
        test_op!(BigUInt, 3u8, /, /=, 5u8, 0u8);
        test_op!(BigUInt, 3u8, %, %=, 5u8, 3u8);
        test_op!(
            BigUInt,
            0xffee_ddcc_bbaa_9988_7766_5544_3322_1100u128,
            /,
            /=,
            0x8877_6655_4433_2211u64,
            0x1_e01c_1fa3_980b_0c6du128
        );
        test_op!(
            BigUInt,
            0xffee_ddcc_bbaa_9988_7766_5544_3322_1100u128,
            %,
            %=,
            0x8877_6655_4433_2211u64,
            0x8610_b984_3508_c3c3u64
        );
    }
    #[test]
    #[should_panic(expected = "can't divide by zero")]
    fn div_by_zero() {
        let _ = BigIInt::<u64>::from(7) / BigIInt::ZERO;
    }

    #[test]
    fn pow() {
        assert_eq!(
            BigUInt::<u32>::from(3u8).pow(100).to_string(),
            "515377520732011331036461129765621272702107522001"
        );
        assert_eq!(BigIInt::<u64>::from(-3).pow(5), BigIInt::from(-243));
        assert_eq!(BigIInt::<u64>::from(-3).pow(0), BigIInt::from(1));
        assert_eq!(BigUInt::<u64>::ZERO.pow(0), BigUInt::one());
        assert_eq!(
            BigUInt::<u64>::from(2u8).pow(200).to_string(),
            "1606938044258990275541962092341162602522202993782792835301376"
        );
        assert_eq!(BigIInt::<u32>::from(-4).square(), BigIInt::from(16));
    }

    #[test]
    fn custom_thresholds_agree() {
        let small = Thresholds::forced_small();
        let (seed, mut rng) = crate::util::rng::seeded_rng();
        for _ in 0..20 {
            let a = BigUInt::<u32>::new_random(1..=80, &mut rng);
            let b = BigUInt::<u32>::new_random(1..=40, &mut rng);
            assert_eq!(a.mul_with(&b, &small), &a * &b, "with seed {seed:?}");
            assert_eq!(a.square_with(&small), a.square(), "with seed {seed:?}");
            assert_eq!(a.div_rem_with(&b, &small), a.div_rem(&b), "with seed {seed:?}");
        }
        assert_eq!(scratch::outstanding::<u32>(), 0);
    }
}

mod identities {
    use proptest::prelude::*;

    use super::*;

    fn number() -> impl Strategy<Value = BigUInt<u32>> {
        proptest::collection::vec(any::<u32>(), 0..40).prop_map(BigUInt::from_vec)
    }
    fn signed() -> impl Strategy<Value = BigIInt<u32>> {
        (number(), any::<bool>()).prop_map(|(number, negative)| {
            number.with_sign(if negative { Sign::Negative } else { Sign::Positive })
        })
    }

    proptest! {
        #[test]
        fn add_commutes(a in signed(), b in signed()) {
            prop_assert_eq!(&a + &b, &b + &a);
        }

        #[test]
        fn add_associates(a in signed(), b in signed(), c in signed()) {
            prop_assert_eq!(&(&a + &b) + &c, &a + &(&b + &c));
        }

        #[test]
        fn sub_undoes_add(a in signed(), b in signed()) {
            prop_assert_eq!(&(&a + &b) - &b, a);
        }

        #[test]
        fn mul_distributes(a in signed(), b in signed(), c in signed()) {
            prop_assert_eq!(&a * &(&b + &c), &(&a * &b) + &(&a * &c));
        }

        #[test]
        fn square_is_mul(a in number()) {
            prop_assert_eq!(a.square(), a.mul_with(&a.clone(), &Thresholds::DEFAULT));
        }

        #[test]
        fn div_reconstructs(a in number(), b in number()) {
            prop_assume!(!b.is_zero());
            let (q, r) = a.div_rem(&b);
            prop_assert!(r < b);
            prop_assert_eq!(&(&q * &b) + &r, a);
        }

        #[test]
        fn signed_div_reconstructs(a in signed(), b in signed()) {
            prop_assume!(!b.is_zero());
            let (q, r) = a.div_rem(&b);
            prop_assert!(r.abs() < b.abs());
            prop_assert!(r.is_zero() || r.signum() == a.signum());
            prop_assert_eq!(&(&q * &b) + &r, a);
        }

        #[test]
        fn text_round_trip(a in signed()) {
            prop_assert_eq!(a.to_string().parse::<BigIInt<u32>>(), Ok(a));
        }
    }
}
