//! Decode conformance for the sample program words and arbitrary words.

use a64_core as _;
use proptest as _;
use rstest as _;
#[cfg(feature = "serde")]
use serde as _;
use thiserror as _;
use tracing as _;
use tracing_subscriber as _;

use a64_core::{
    classify_group, classify_mnemonic, sample_program, DecodeFaultCause, DecodeGroup,
    DecodeLevel, Decoder, FaultClass, InstructionClass, Mnemonic, DECODE_GROUP_TABLE,
    SAMPLE_PROGRAM_COUNT,
};
use proptest::prelude::*;
use rstest::rstest;

#[rstest]
#[case(0xD100_43FF, InstructionClass::AddSubtractImmediate, Mnemonic::SubImmX)]
#[case(0x5280_00A0, InstructionClass::MoveWideImmediate, Mnemonic::MovzW)]
#[case(0xB900_0FE0, InstructionClass::LoadStoreUnsignedImmediate, Mnemonic::StrW)]
#[case(0xB940_0FE0, InstructionClass::LoadStoreUnsignedImmediate, Mnemonic::LdrW)]
#[case(0x7100_0C1F, InstructionClass::AddSubtractImmediate, Mnemonic::SubsImmW)]
#[case(0x5400_0061, InstructionClass::ConditionalBranch, Mnemonic::BCond)]
#[case(0x1400_0007, InstructionClass::UnconditionalBranchImmediate, Mnemonic::B)]
#[case(0x9100_43FF, InstructionClass::AddSubtractImmediate, Mnemonic::AddImmX)]
#[case(0xD65F_03C0, InstructionClass::UnconditionalBranchRegister, Mnemonic::Ret)]
#[case(0x0B01_0000, InstructionClass::AddSubtractShiftedRegister, Mnemonic::AddW)]
#[case(0xD503_201F, InstructionClass::Hints, Mnemonic::Nop)]
fn known_words_decode_to_their_mnemonic(
    #[case] word: u32,
    #[case] class: InstructionClass,
    #[case] mnemonic: Mnemonic,
) {
    let decoded = Decoder::decode(word)
        .instruction()
        .unwrap_or_else(|| panic!("{word:#010x} should decode"));
    assert_eq!(decoded.class, class);
    assert_eq!(decoded.mnemonic, mnemonic);
    assert_eq!(decoded.group, class.group());
}

#[test]
fn every_dsb_option_decodes_to_dsb() {
    for crm in 1..=15u32 {
        let word = 0xD503_309F | (crm << 8);
        let decoded = Decoder::decode(word)
            .instruction()
            .unwrap_or_else(|| panic!("DSB {word:#010x} should decode"));
        assert_eq!(decoded.class, InstructionClass::Barriers);
        assert_eq!(decoded.mnemonic, Mnemonic::Dsb, "CRm {crm}");
    }
}

#[test]
fn dsb_with_a_zero_option_is_ssbb() {
    let decoded = Decoder::decode(0xD503_309F).instruction().expect("SSBB");
    assert_eq!(decoded.mnemonic, Mnemonic::Ssbb);
}

#[test]
fn every_sample_word_decodes() {
    for index in 0..SAMPLE_PROGRAM_COUNT {
        let program = sample_program(index).expect("bundled sample");
        for word in program.words() {
            assert!(
                Decoder::decode(*word).instruction().is_some(),
                "sample {index}: {word:#010x} failed to decode"
            );
        }
    }
}

#[rstest]
#[case(0b0001 << 25, DecodeLevel::Group, DecodeFaultCause::Undefined)]
#[case(0x0420_0000, DecodeLevel::Class, DecodeFaultCause::Unsupported)]
#[case(0x4EA2_8420, DecodeLevel::Mnemonic, DecodeFaultCause::Unsupported)]
#[case(0x3280_0000, DecodeLevel::Mnemonic, DecodeFaultCause::Undefined)]
fn rejected_words_report_level_and_cause(
    #[case] word: u32,
    #[case] level: DecodeLevel,
    #[case] cause: DecodeFaultCause,
) {
    let fault = Decoder::decode(word).fault().expect("word is rejected");
    assert_eq!(fault.level, level);
    assert_eq!(fault.cause, cause);
    assert_eq!(fault.code().class(), FaultClass::Decode);
}

proptest! {
    #[test]
    fn decode_is_total_and_consistent(word in any::<u32>()) {
        match Decoder::decode(word).instruction() {
            Some(decoded) => {
                prop_assert_eq!(decoded.word, word);
                prop_assert_eq!(Some(decoded.group), classify_group(word));
                prop_assert_eq!(decoded.class.group(), decoded.group);
                prop_assert_ne!(decoded.group, DecodeGroup::Sve);
            }
            None => {
                let fault = Decoder::decode(word).fault().expect("fault when not decoded");
                prop_assert_eq!(fault.word, word);
                prop_assert_eq!(fault.code().class(), FaultClass::Decode);
                if let Some(class) = fault.class {
                    prop_assert_eq!(Some(class.group()), fault.group);
                }
            }
        }
    }

    #[test]
    fn decode_is_deterministic(word in any::<u32>()) {
        prop_assert_eq!(Decoder::decode(word), Decoder::decode(word));
    }

    #[test]
    fn tables_pick_the_first_matching_entry(word in any::<u32>()) {
        let scanned = DECODE_GROUP_TABLE
            .entries()
            .iter()
            .find(|entry| word & entry.mask == entry.expected)
            .map(|entry| entry.label);
        prop_assert_eq!(classify_group(word), scanned);

        if let Some(decoded) = Decoder::decode(word).instruction() {
            let table = decoded.class.mnemonic_table().expect("decoded class has a table");
            let first = table
                .entries()
                .iter()
                .find(|entry| entry.matches(word))
                .map(|entry| entry.label);
            prop_assert_eq!(first, Some(decoded.mnemonic));
            prop_assert_eq!(classify_mnemonic(decoded.class, word), Some(decoded.mnemonic));
        }
    }
}
