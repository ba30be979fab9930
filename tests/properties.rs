//! Algebraic laws of the ALU, the serial adder and the datapath ALU stage.

use proptest::prelude::*;
use bytelab::adder::{add_binary, from_binary, to_binary, twos_complement};
use bytelab::{evaluate, AdderOp, AluOp, Bits8, Datapath, Mode, MicroOp, SerialAdder};

fn any_op() -> impl Strategy<Value = AluOp> {
    prop::sample::select(AluOp::ALL.to_vec())
}

fn any_mode() -> impl Strategy<Value = Mode> {
    prop_oneof![Just(Mode::Unsigned), Just(Mode::TwosComplement)]
}

proptest! {
    #[test]
    fn alu_add_sub_are_mod_256(a: u8, b: u8) {
        prop_assert_eq!(evaluate(AluOp::Add, a, b).result, a.wrapping_add(b));
        prop_assert_eq!(evaluate(AluOp::Sub, a, b).result, a.wrapping_sub(b));
    }

    #[test]
    fn alu_zero_flag_tracks_result(op in any_op(), a: u8, b: u8) {
        let out = evaluate(op, a, b);
        prop_assert_eq!(out.flags.zero, out.result == 0);
        prop_assert_eq!(out.flags.negative, out.result & 0x80 != 0);
    }

    #[test]
    fn alu_add_carry_is_unsigned_overflow(a: u8, b: u8) {
        let out = evaluate(AluOp::Add, a, b);
        prop_assert_eq!(out.flags.carry, a.checked_add(b).is_none());
        prop_assert_eq!(out.flags.overflow, (a as i8).checked_add(b as i8).is_none());
    }

    #[test]
    fn alu_sub_carry_is_unsigned_borrow(a: u8, b: u8) {
        let out = evaluate(AluOp::Sub, a, b);
        prop_assert_eq!(out.flags.carry, a < b);
        prop_assert_eq!(out.flags.overflow, (a as i8).checked_sub(b as i8).is_none());
    }

    #[test]
    fn alu_logic_matches_native(a: u8, b: u8) {
        prop_assert_eq!(evaluate(AluOp::And, a, b).result, a & b);
        prop_assert_eq!(evaluate(AluOp::Or, a, b).result, a | b);
        prop_assert_eq!(evaluate(AluOp::Xor, a, b).result, a ^ b);
        prop_assert_eq!(evaluate(AluOp::Not, a, b).result, !a);
    }

    #[test]
    fn binary_roundtrip_over_mode_range(mode in any_mode(), seed: i32) {
        let v = mode.clamp(seed % 300);
        prop_assert_eq!(from_binary(to_binary(v, mode), mode), v);
    }

    #[test]
    fn twos_complement_is_an_involution(byte: u8) {
        let bits = Bits8::from(byte);
        prop_assert_eq!(twos_complement(twos_complement(bits)), bits);
        prop_assert_eq!(twos_complement(bits).to_byte(), byte.wrapping_neg());
    }

    #[test]
    fn ripple_sum_matches_native(a: u8, b: u8) {
        let sum = add_binary(Bits8::from(a), Bits8::from(b));
        prop_assert_eq!(sum.bits.to_byte(), a.wrapping_add(b));
        prop_assert_eq!(sum.carry.is_set(), a.checked_add(b).is_none());
        prop_assert_eq!(sum.steps.len(), 8);
    }

    #[test]
    fn unsigned_adder_matches_wrapping_arithmetic(a in 0..=255i32, b in 0..=255i32) {
        let adder = SerialAdder::new(Mode::Unsigned);
        prop_assert_eq!(adder.calculate(a, b, AdderOp::Add).result_decimal, (a + b) & 0xFF);
        prop_assert_eq!(adder.calculate(a, b, AdderOp::Sub).result_decimal, (a - b) & 0xFF);
    }

    #[test]
    fn signed_adder_matches_i8_arithmetic(a in -128..=127i32, b in -128..=127i32) {
        let adder = SerialAdder::new(Mode::TwosComplement);
        let (x, y) = (a as i8, b as i8);

        let add = adder.calculate(a, b, AdderOp::Add);
        prop_assert_eq!(add.result_decimal, x.wrapping_add(y) as i32);
        prop_assert_eq!(add.flags.overflow, x.checked_add(y).is_none());
        prop_assert_eq!(add.flags.zero, add.result_decimal == 0);

        let sub = adder.calculate(a, b, AdderOp::Sub);
        prop_assert_eq!(sub.result_decimal, x.wrapping_sub(y) as i32);
        prop_assert_eq!(sub.flags.overflow, x.checked_sub(y).is_none());
    }

    #[test]
    fn register_transfers_decode_from_display(n in 0usize..1000) {
        for op in [MicroOp::BusAFromRegister(n), MicroOp::BusBFromRegister(n), MicroOp::RegisterFromAlu(n)] {
            prop_assert_eq!(MicroOp::parse(&op.to_string()), op.clone());
            prop_assert_eq!(MicroOp::parse(&op.to_string().to_lowercase().replace('←', "<-")), op);
        }
    }

    #[test]
    fn datapath_alu_stage_uses_its_own_flags(a: u8, b: u8) {
        let mut dp = Datapath::new();
        dp.set_register(0, a);
        dp.set_register(1, b);
        dp.load_preset("alu-operations").unwrap();
        dp.run_to_completion(100);

        let regs = dp.registers();
        prop_assert_eq!(regs.read(2), a.wrapping_add(b));
        prop_assert_eq!(regs.read(3), a.wrapping_sub(b));
        prop_assert_eq!(regs.read(4), a & b);

        // last latch is the AND
        let flags = dp.flags();
        prop_assert_eq!(flags.zero, a & b == 0);
        prop_assert!(!flags.carry);
        prop_assert!(!flags.overflow);
    }
}
