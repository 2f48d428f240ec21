//! Priority-ordered mask/expected tables for the A64 encoding map.
//!
//! Decoding is three lookups: the top-level group (bits 28..25), the
//! encoding class inside that group, then the mnemonic inside that class.
//! Each table is scanned in authored order and the first entry whose
//! `word & mask == expected` wins.

mod branch_system;
mod data_immediate;
mod data_register;
mod load_store;
mod mnemonic;
mod simd_fp;

pub use mnemonic::Mnemonic;

macro_rules! decode_labels {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident => $text:literal,)*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
        #[allow(missing_docs)]
        $vis enum $name {
            $($variant,)*
        }

        impl $name {
            /// Every label in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)*];

            /// Human-readable name of the label.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)*
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub(crate) use decode_labels;

/// One row of a decode table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeEntry<L> {
    /// Bits that take part in the comparison.
    pub mask: u32,
    /// Required value of the masked bits.
    pub expected: u32,
    /// Label produced on match.
    pub label: L,
}

impl<L: Copy> DecodeEntry<L> {
    /// Creates a table row.
    #[must_use]
    pub const fn new(mask: u32, expected: u32, label: L) -> Self {
        Self {
            mask,
            expected,
            label,
        }
    }

    /// Returns whether `word` satisfies this row.
    #[must_use]
    pub const fn matches(&self, word: u32) -> bool {
        word & self.mask == self.expected
    }
}

/// An ordered, immutable decode table. First match wins.
#[derive(Debug, Clone, Copy)]
pub struct DecodeTable<L: 'static> {
    entries: &'static [DecodeEntry<L>],
}

impl<L: Copy> DecodeTable<L> {
    /// Wraps a static row slice.
    #[must_use]
    pub const fn new(entries: &'static [DecodeEntry<L>]) -> Self {
        Self { entries }
    }

    /// Returns the label of the first matching row.
    #[must_use]
    pub fn lookup(&self, word: u32) -> Option<L> {
        self.entries
            .iter()
            .find_map(|entry| entry.matches(word).then_some(entry.label))
    }

    /// Returns the rows in priority order.
    #[must_use]
    pub const fn entries(&self) -> &'static [DecodeEntry<L>] {
        self.entries
    }
}

decode_labels! {
    /// Top-level A64 encoding groups selected by bits 28..25.
    pub enum DecodeGroup {
        Reserved => "reserved",
        Sve => "SVE",
        DataProcessingImmediate => "data processing (immediate)",
        BranchExceptionSystem => "branches, exception generation and system",
        DataProcessingRegister => "data processing (register)",
        SimdFp => "scalar floating-point and advanced SIMD",
        LoadStore => "loads and stores",
    }
}

decode_labels! {
    /// Encoding classes inside a top-level group.
    pub enum InstructionClass {
        Udf => "permanently undefined",

        PcRelativeAddressing => "PC-relative addressing",
        AddSubtractImmediate => "add/subtract (immediate)",
        AddSubtractImmediateWithTags => "add/subtract (immediate, with tags)",
        LogicalImmediate => "logical (immediate)",
        MoveWideImmediate => "move wide (immediate)",
        Bitfield => "bitfield",
        Extract => "extract",

        ConditionalBranch => "conditional branch (immediate)",
        ExceptionGeneration => "exception generation",
        Hints => "hints",
        Barriers => "barriers",
        PState => "PSTATE",
        SystemInstructions => "system instructions",
        SystemRegisterMove => "system register move",
        UnconditionalBranchRegister => "unconditional branch (register)",
        UnconditionalBranchImmediate => "unconditional branch (immediate)",
        CompareAndBranch => "compare and branch (immediate)",
        TestAndBranch => "test and branch (immediate)",

        DataProcessingTwoSource => "data processing (2 source)",
        DataProcessingOneSource => "data processing (1 source)",
        LogicalShiftedRegister => "logical (shifted register)",
        AddSubtractShiftedRegister => "add/subtract (shifted register)",
        AddSubtractExtendedRegister => "add/subtract (extended register)",
        AddSubtractWithCarry => "add/subtract (with carry)",
        RotateRightIntoFlags => "rotate right into flags",
        EvaluateIntoFlags => "evaluate into flags",
        ConditionalCompareRegister => "conditional compare (register)",
        ConditionalCompareImmediate => "conditional compare (immediate)",
        ConditionalSelect => "conditional select",
        DataProcessingThreeSource => "data processing (3 source)",

        SimdLoadStoreMultiple => "advanced SIMD load/store multiple structures",
        SimdLoadStoreMultiplePostIndexed => "advanced SIMD load/store multiple structures (post-indexed)",
        SimdLoadStoreSingle => "advanced SIMD load/store single structure",
        SimdLoadStoreSinglePostIndexed => "advanced SIMD load/store single structure (post-indexed)",
        LoadStoreMemoryTags => "load/store memory tags",
        LoadStoreExclusive => "load/store exclusive",
        LdaprStlrUnscaledImmediate => "LDAPR/STLR (unscaled immediate)",
        LoadRegisterLiteral => "load register (literal)",
        LoadStoreNoAllocatePairOffset => "load/store no-allocate pair (offset)",
        LoadStorePairPostIndexed => "load/store register pair (post-indexed)",
        LoadStorePairOffset => "load/store register pair (offset)",
        LoadStorePairPreIndexed => "load/store register pair (pre-indexed)",
        LoadStoreUnscaledImmediate => "load/store register (unscaled immediate)",
        LoadStoreImmediatePostIndexed => "load/store register (immediate post-indexed)",
        LoadStoreUnprivileged => "load/store register (unprivileged)",
        LoadStoreImmediatePreIndexed => "load/store register (immediate pre-indexed)",
        AtomicMemoryOperations => "atomic memory operations",
        LoadStoreRegisterOffset => "load/store register (register offset)",
        LoadStorePac => "load/store register (pac)",
        LoadStoreUnsignedImmediate => "load/store register (unsigned immediate)",

        CryptographicAes => "cryptographic AES",
        FloatingPointIntegerConversion => "conversion between floating-point and integer",
        FloatingPointOneSource => "floating-point data processing (1 source)",
        FloatingPointCompare => "floating-point compare",
        FloatingPointImmediate => "floating-point immediate",
        FloatingPointConditionalCompare => "floating-point conditional compare",
        FloatingPointTwoSource => "floating-point data processing (2 source)",
        FloatingPointConditionalSelect => "floating-point conditional select",
        FloatingPointThreeSource => "floating-point data processing (3 source)",
        SimdModifiedImmediate => "advanced SIMD modified immediate",
        SimdCopy => "advanced SIMD copy",
        SimdAcrossLanes => "advanced SIMD across lanes",
        SimdTwoRegisterMisc => "advanced SIMD two-register miscellaneous",
        SimdThreeSame => "advanced SIMD three same",
        SimdOther => "advanced SIMD",
    }
}

/// Top-level group table. Masks cover bits 28..25 only.
pub const DECODE_GROUP_TABLE: DecodeTable<DecodeGroup> = DecodeTable::new(&[
    DecodeEntry::new(0b1111 << 25, 0b0000 << 25, DecodeGroup::Reserved),
    DecodeEntry::new(0b1111 << 25, 0b0010 << 25, DecodeGroup::Sve),
    DecodeEntry::new(0b1110 << 25, 0b1000 << 25, DecodeGroup::DataProcessingImmediate),
    DecodeEntry::new(0b1110 << 25, 0b1010 << 25, DecodeGroup::BranchExceptionSystem),
    DecodeEntry::new(0b0111 << 25, 0b0101 << 25, DecodeGroup::DataProcessingRegister),
    DecodeEntry::new(0b0111 << 25, 0b0111 << 25, DecodeGroup::SimdFp),
    DecodeEntry::new(0b0101 << 25, 0b0100 << 25, DecodeGroup::LoadStore),
]);

const RESERVED_CLASS_TABLE: DecodeTable<InstructionClass> =
    DecodeTable::new(&[DecodeEntry::new(0xFFFF_0000, 0x0000_0000, InstructionClass::Udf)]);

const UDF_TABLE: DecodeTable<Mnemonic> =
    DecodeTable::new(&[DecodeEntry::new(0xFFFF_0000, 0x0000_0000, Mnemonic::Udf)]);

const EMPTY_CLASS_TABLE: DecodeTable<InstructionClass> = DecodeTable::new(&[]);

impl DecodeGroup {
    /// Returns the class table scanned for words in this group.
    ///
    /// SVE has no class table; words in that group are recognised but not
    /// implemented.
    #[must_use]
    pub const fn class_table(self) -> DecodeTable<InstructionClass> {
        match self {
            Self::Reserved => RESERVED_CLASS_TABLE,
            Self::Sve => EMPTY_CLASS_TABLE,
            Self::DataProcessingImmediate => data_immediate::CLASS_TABLE,
            Self::BranchExceptionSystem => branch_system::CLASS_TABLE,
            Self::DataProcessingRegister => data_register::CLASS_TABLE,
            Self::SimdFp => simd_fp::CLASS_TABLE,
            Self::LoadStore => load_store::CLASS_TABLE,
        }
    }

    /// Returns whether words in this group carry any implemented decode tables.
    #[must_use]
    pub const fn is_supported(self) -> bool {
        !matches!(self, Self::Sve)
    }
}

impl InstructionClass {
    /// Returns the top-level group that owns this class.
    #[must_use]
    pub const fn group(self) -> DecodeGroup {
        use InstructionClass as C;
        match self {
            C::Udf => DecodeGroup::Reserved,
            C::PcRelativeAddressing
            | C::AddSubtractImmediate
            | C::AddSubtractImmediateWithTags
            | C::LogicalImmediate
            | C::MoveWideImmediate
            | C::Bitfield
            | C::Extract => DecodeGroup::DataProcessingImmediate,
            C::ConditionalBranch
            | C::ExceptionGeneration
            | C::Hints
            | C::Barriers
            | C::PState
            | C::SystemInstructions
            | C::SystemRegisterMove
            | C::UnconditionalBranchRegister
            | C::UnconditionalBranchImmediate
            | C::CompareAndBranch
            | C::TestAndBranch => DecodeGroup::BranchExceptionSystem,
            C::DataProcessingTwoSource
            | C::DataProcessingOneSource
            | C::LogicalShiftedRegister
            | C::AddSubtractShiftedRegister
            | C::AddSubtractExtendedRegister
            | C::AddSubtractWithCarry
            | C::RotateRightIntoFlags
            | C::EvaluateIntoFlags
            | C::ConditionalCompareRegister
            | C::ConditionalCompareImmediate
            | C::ConditionalSelect
            | C::DataProcessingThreeSource => DecodeGroup::DataProcessingRegister,
            C::SimdLoadStoreMultiple
            | C::SimdLoadStoreMultiplePostIndexed
            | C::SimdLoadStoreSingle
            | C::SimdLoadStoreSinglePostIndexed
            | C::LoadStoreMemoryTags
            | C::LoadStoreExclusive
            | C::LdaprStlrUnscaledImmediate
            | C::LoadRegisterLiteral
            | C::LoadStoreNoAllocatePairOffset
            | C::LoadStorePairPostIndexed
            | C::LoadStorePairOffset
            | C::LoadStorePairPreIndexed
            | C::LoadStoreUnscaledImmediate
            | C::LoadStoreImmediatePostIndexed
            | C::LoadStoreUnprivileged
            | C::LoadStoreImmediatePreIndexed
            | C::AtomicMemoryOperations
            | C::LoadStoreRegisterOffset
            | C::LoadStorePac
            | C::LoadStoreUnsignedImmediate => DecodeGroup::LoadStore,
            C::CryptographicAes
            | C::FloatingPointIntegerConversion
            | C::FloatingPointOneSource
            | C::FloatingPointCompare
            | C::FloatingPointImmediate
            | C::FloatingPointConditionalCompare
            | C::FloatingPointTwoSource
            | C::FloatingPointConditionalSelect
            | C::FloatingPointThreeSource
            | C::SimdModifiedImmediate
            | C::SimdCopy
            | C::SimdAcrossLanes
            | C::SimdTwoRegisterMisc
            | C::SimdThreeSame
            | C::SimdOther => DecodeGroup::SimdFp,
        }
    }

    /// Returns the mnemonic table for this class, if one is authored.
    ///
    /// Classes without a table are recognised but not implemented.
    #[must_use]
    pub const fn mnemonic_table(self) -> Option<DecodeTable<Mnemonic>> {
        use InstructionClass as C;
        Some(match self {
            C::Udf => UDF_TABLE,
            C::PcRelativeAddressing => data_immediate::PC_RELATIVE_TABLE,
            C::AddSubtractImmediate => data_immediate::ADD_SUB_IMMEDIATE_TABLE,
            C::AddSubtractImmediateWithTags => data_immediate::ADD_SUB_TAGS_TABLE,
            C::LogicalImmediate => data_immediate::LOGICAL_IMMEDIATE_TABLE,
            C::MoveWideImmediate => data_immediate::MOVE_WIDE_TABLE,
            C::Bitfield => data_immediate::BITFIELD_TABLE,
            C::Extract => data_immediate::EXTRACT_TABLE,
            C::ConditionalBranch => branch_system::CONDITIONAL_BRANCH_TABLE,
            C::ExceptionGeneration => branch_system::EXCEPTION_TABLE,
            C::Hints => branch_system::HINTS_TABLE,
            C::Barriers => branch_system::BARRIERS_TABLE,
            C::PState => branch_system::PSTATE_TABLE,
            C::SystemInstructions => branch_system::SYSTEM_INSTRUCTIONS_TABLE,
            C::SystemRegisterMove => branch_system::SYSTEM_REGISTER_MOVE_TABLE,
            C::UnconditionalBranchRegister => branch_system::BRANCH_REGISTER_TABLE,
            C::UnconditionalBranchImmediate => branch_system::BRANCH_IMMEDIATE_TABLE,
            C::CompareAndBranch => branch_system::COMPARE_AND_BRANCH_TABLE,
            C::TestAndBranch => branch_system::TEST_AND_BRANCH_TABLE,
            C::DataProcessingTwoSource => data_register::TWO_SOURCE_TABLE,
            C::DataProcessingOneSource => data_register::ONE_SOURCE_TABLE,
            C::LogicalShiftedRegister => data_register::LOGICAL_SHIFTED_TABLE,
            C::AddSubtractShiftedRegister => data_register::ADD_SUB_SHIFTED_TABLE,
            C::AddSubtractExtendedRegister => data_register::ADD_SUB_EXTENDED_TABLE,
            C::AddSubtractWithCarry => data_register::ADD_SUB_CARRY_TABLE,
            C::RotateRightIntoFlags => data_register::ROTATE_INTO_FLAGS_TABLE,
            C::EvaluateIntoFlags => data_register::EVALUATE_INTO_FLAGS_TABLE,
            C::ConditionalCompareRegister => data_register::CONDITIONAL_COMPARE_REGISTER_TABLE,
            C::ConditionalCompareImmediate => data_register::CONDITIONAL_COMPARE_IMMEDIATE_TABLE,
            C::ConditionalSelect => data_register::CONDITIONAL_SELECT_TABLE,
            C::DataProcessingThreeSource => data_register::THREE_SOURCE_TABLE,
            C::LoadRegisterLiteral => load_store::LITERAL_TABLE,
            C::LoadStorePairPostIndexed | C::LoadStorePairOffset | C::LoadStorePairPreIndexed => {
                load_store::PAIR_TABLE
            }
            C::LoadStoreImmediatePostIndexed
            | C::LoadStoreImmediatePreIndexed
            | C::LoadStoreRegisterOffset
            | C::LoadStoreUnsignedImmediate => load_store::REGISTER_TABLE,
            C::FloatingPointIntegerConversion => simd_fp::CONVERSION_TABLE,
            C::FloatingPointOneSource => simd_fp::ONE_SOURCE_TABLE,
            C::FloatingPointCompare => simd_fp::COMPARE_TABLE,
            C::FloatingPointImmediate => simd_fp::IMMEDIATE_TABLE,
            C::FloatingPointConditionalCompare => simd_fp::CONDITIONAL_COMPARE_TABLE,
            C::FloatingPointTwoSource => simd_fp::TWO_SOURCE_TABLE,
            C::FloatingPointConditionalSelect => simd_fp::CONDITIONAL_SELECT_TABLE,
            C::FloatingPointThreeSource => simd_fp::THREE_SOURCE_TABLE,
            C::SimdLoadStoreMultiple
            | C::SimdLoadStoreMultiplePostIndexed
            | C::SimdLoadStoreSingle
            | C::SimdLoadStoreSinglePostIndexed
            | C::LoadStoreMemoryTags
            | C::LoadStoreExclusive
            | C::LdaprStlrUnscaledImmediate
            | C::LoadStoreNoAllocatePairOffset
            | C::LoadStoreUnscaledImmediate
            | C::LoadStoreUnprivileged
            | C::AtomicMemoryOperations
            | C::LoadStorePac
            | C::CryptographicAes
            | C::SimdModifiedImmediate
            | C::SimdCopy
            | C::SimdAcrossLanes
            | C::SimdTwoRegisterMisc
            | C::SimdThreeSame
            | C::SimdOther => return None,
        })
    }
}

/// Looks up the top-level group of `word`.
#[must_use]
pub fn classify_group(word: u32) -> Option<DecodeGroup> {
    DECODE_GROUP_TABLE.lookup(word)
}

/// Looks up the encoding class of `word` inside `group`.
#[must_use]
pub fn classify_class(group: DecodeGroup, word: u32) -> Option<InstructionClass> {
    group.class_table().lookup(word)
}

/// Looks up the mnemonic of `word` inside `class`.
///
/// Returns `None` both when the class has no table and when no row matches;
/// use [`InstructionClass::mnemonic_table`] to tell the two apart.
#[must_use]
pub fn classify_mnemonic(class: InstructionClass, word: u32) -> Option<Mnemonic> {
    class.mnemonic_table().and_then(|table| table.lookup(word))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{
        classify_class, classify_group, classify_mnemonic, DecodeEntry, DecodeGroup,
        InstructionClass, Mnemonic, DECODE_GROUP_TABLE,
    };

    fn every_class_table() -> Vec<(DecodeGroup, &'static [DecodeEntry<InstructionClass>])> {
        DecodeGroup::ALL
            .iter()
            .map(|group| (*group, group.class_table().entries()))
            .collect()
    }

    fn shadows<L>(earlier: &DecodeEntry<L>, later: &DecodeEntry<L>) -> bool {
        earlier.mask & !later.mask == 0 && later.expected & earlier.mask == earlier.expected
    }

    #[test]
    fn group_table_partitions_bits_28_to_25() {
        let mut seen = HashSet::new();
        for op0 in 0u32..16 {
            let word = op0 << 25;
            if let Some(group) = classify_group(word) {
                seen.insert(group);
            }
        }
        assert_eq!(seen.len(), DECODE_GROUP_TABLE.entries().len());
        assert_eq!(classify_group(0b0001 << 25), None);
        assert_eq!(classify_group(0b0011 << 25), None);
    }

    #[test]
    fn class_tables_only_produce_classes_of_their_group() {
        for (group, entries) in every_class_table() {
            for entry in entries {
                assert_eq!(entry.label.group(), group, "{}", entry.label);
                assert_eq!(
                    entry.expected & !entry.mask,
                    0,
                    "{} expects bits outside its mask",
                    entry.label
                );
            }
        }
    }

    #[test]
    fn class_rows_match_their_own_group() {
        for (group, entries) in every_class_table() {
            for entry in entries {
                if entry.mask == 0 {
                    continue;
                }
                let group_entry = DECODE_GROUP_TABLE
                    .entries()
                    .iter()
                    .find(|row| row.label == group)
                    .expect("group row");
                let probe = entry.expected | (group_entry.expected & !entry.mask);
                assert_eq!(classify_group(probe), Some(group), "{}", entry.label);
                assert_eq!(classify_class(group, probe), Some(entry.label));
            }
        }
    }

    #[test]
    fn no_class_row_is_unreachable() {
        for (_, entries) in every_class_table() {
            for (index, later) in entries.iter().enumerate() {
                for earlier in &entries[..index] {
                    assert!(
                        !shadows(earlier, later),
                        "{} is shadowed by {}",
                        later.label,
                        earlier.label
                    );
                }
            }
        }
    }

    #[test]
    fn only_pssbb_is_shadowed_among_mnemonic_rows() {
        let mut shadowed = Vec::new();
        for class in InstructionClass::ALL {
            let Some(table) = class.mnemonic_table() else {
                continue;
            };
            let entries = table.entries();
            for (index, later) in entries.iter().enumerate() {
                if entries[..index].iter().any(|earlier| shadows(earlier, later)) {
                    shadowed.push(later.label);
                }
            }
        }
        assert_eq!(shadowed, vec![Mnemonic::Pssbb]);
    }

    #[test]
    fn unsupported_groups_and_classes_are_reported_as_missing_tables() {
        assert!(!DecodeGroup::Sve.is_supported());
        assert!(DecodeGroup::Sve.class_table().entries().is_empty());
        assert!(InstructionClass::SimdThreeSame.mnemonic_table().is_none());
        assert!(InstructionClass::AddSubtractImmediate
            .mnemonic_table()
            .is_some());
    }

    #[test]
    fn sample_words_classify_through_every_level() {
        let cases = [
            (0xD100_43FF, InstructionClass::AddSubtractImmediate, Mnemonic::SubImmX),
            (0x5280_00A0, InstructionClass::MoveWideImmediate, Mnemonic::MovzW),
            (0xB900_0FE0, InstructionClass::LoadStoreUnsignedImmediate, Mnemonic::StrW),
            (0xB940_0FE0, InstructionClass::LoadStoreUnsignedImmediate, Mnemonic::LdrW),
            (0x7100_0C1F, InstructionClass::AddSubtractImmediate, Mnemonic::SubsImmW),
            (0x5400_0061, InstructionClass::ConditionalBranch, Mnemonic::BCond),
            (0x1400_0007, InstructionClass::UnconditionalBranchImmediate, Mnemonic::B),
            (0x9100_43FF, InstructionClass::AddSubtractImmediate, Mnemonic::AddImmX),
            (0xD65F_03C0, InstructionClass::UnconditionalBranchRegister, Mnemonic::Ret),
        ];
        for (word, class, mnemonic) in cases {
            let group = classify_group(word).expect("group");
            assert_eq!(classify_class(group, word), Some(class), "{word:#010x}");
            assert_eq!(classify_mnemonic(class, word), Some(mnemonic), "{word:#010x}");
        }
    }

    #[test]
    fn labels_render_readable_names() {
        assert_eq!(DecodeGroup::LoadStore.to_string(), "loads and stores");
        assert_eq!(InstructionClass::Bitfield.to_string(), "bitfield");
        assert_eq!(Mnemonic::Ret.to_string(), "RET");
    }
}
