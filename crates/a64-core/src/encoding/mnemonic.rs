use super::decode_labels;

decode_labels! {
    /// Instruction mnemonics produced by the per-class decode tables.
    ///
    /// `W` and `X` suffixes separate the 32-bit and 64-bit register forms.
    pub enum Mnemonic {
        Udf => "UDF",

        Adr => "ADR",
        Adrp => "ADRP",
        AddImmW => "ADD",
        AddsImmW => "ADDS",
        SubImmW => "SUB",
        SubsImmW => "SUBS",
        AddImmX => "ADD",
        AddsImmX => "ADDS",
        SubImmX => "SUB",
        SubsImmX => "SUBS",
        Addg => "ADDG",
        Subg => "SUBG",
        AndImmW => "AND",
        OrrImmW => "ORR",
        EorImmW => "EOR",
        AndsImmW => "ANDS",
        AndImmX => "AND",
        OrrImmX => "ORR",
        EorImmX => "EOR",
        AndsImmX => "ANDS",
        MovnW => "MOVN",
        MovzW => "MOVZ",
        MovkW => "MOVK",
        MovnX => "MOVN",
        MovzX => "MOVZ",
        MovkX => "MOVK",
        SbfmW => "SBFM",
        BfmW => "BFM",
        UbfmW => "UBFM",
        SbfmX => "SBFM",
        BfmX => "BFM",
        UbfmX => "UBFM",
        ExtrW => "EXTR",
        ExtrX => "EXTR",

        BCond => "B.cond",
        Svc => "SVC",
        Hvc => "HVC",
        Smc => "SMC",
        Brk => "BRK",
        Hlt => "HLT",
        Dcps1 => "DCPS1",
        Dcps2 => "DCPS2",
        Dcps3 => "DCPS3",
        Nop => "NOP",
        Yield => "YIELD",
        Wfe => "WFE",
        Wfi => "WFI",
        Sev => "SEV",
        Sevl => "SEVL",
        Dgh => "DGH",
        Xpaclri => "XPACLRI",
        Pacia1716 => "PACIA1716",
        Pacib1716 => "PACIB1716",
        Autia1716 => "AUTIA1716",
        Autib1716 => "AUTIB1716",
        Esb => "ESB",
        PsbCsync => "PSB_CSYNC",
        TsbCsync => "TSB_CSYNC",
        Csdb => "CSDB",
        Paciaz => "PACIAZ",
        Paciasp => "PACIASP",
        Pacibz => "PACIBZ",
        Pacibsp => "PACIBSP",
        Autiaz => "AUTIAZ",
        Autiasp => "AUTIASP",
        Autibz => "AUTIBZ",
        Autibsp => "AUTIBSP",
        Bti => "BTI",
        Hint => "HINT",
        Clrex => "CLREX",
        Dmb => "DMB",
        Isb => "ISB",
        Sb => "SB",
        Dsb => "DSB",
        Ssbb => "SSBB",
        Pssbb => "PSSBB",
        Cfinv => "CFINV",
        Xaflag => "XAFLAG",
        Axflag => "AXFLAG",
        MsrImmediate => "MSR",
        Sys => "SYS",
        Sysl => "SYSL",
        Msr => "MSR",
        Mrs => "MRS",
        Br => "BR",
        Braaz => "BRAAZ",
        Brabz => "BRABZ",
        Blr => "BLR",
        Blraaz => "BLRAAZ",
        Blrabz => "BLRABZ",
        Ret => "RET",
        Retaa => "RETAA",
        Retab => "RETAB",
        Eret => "ERET",
        Eretaa => "ERETAA",
        Eretab => "ERETAB",
        Drps => "DRPS",
        Braa => "BRAA",
        Brab => "BRAB",
        Blraa => "BLRAA",
        Blrab => "BLRAB",
        B => "B",
        Bl => "BL",
        CbzW => "CBZ",
        CbnzW => "CBNZ",
        CbzX => "CBZ",
        CbnzX => "CBNZ",
        Tbz => "TBZ",
        Tbnz => "TBNZ",

        UdivW => "UDIV",
        SdivW => "SDIV",
        LslvW => "LSLV",
        LsrvW => "LSRV",
        AsrvW => "ASRV",
        RorvW => "RORV",
        Crc32b => "CRC32B",
        Crc32h => "CRC32H",
        Crc32w => "CRC32W",
        Crc32cb => "CRC32CB",
        Crc32ch => "CRC32CH",
        Crc32cw => "CRC32CW",
        Subp => "SUBP",
        UdivX => "UDIV",
        SdivX => "SDIV",
        Irg => "IRG",
        Gmi => "GMI",
        LslvX => "LSLV",
        LsrvX => "LSRV",
        AsrvX => "ASRV",
        RorvX => "RORV",
        Pacga => "PACGA",
        Crc32x => "CRC32X",
        Crc32cx => "CRC32CX",
        Subps => "SUBPS",
        RbitW => "RBIT",
        Rev16W => "REV16",
        RevW => "REV",
        ClzW => "CLZ",
        ClsW => "CLS",
        RbitX => "RBIT",
        Rev16X => "REV16",
        Rev32 => "REV32",
        RevX => "REV",
        ClzX => "CLZ",
        ClsX => "CLS",
        Pacia => "PACIA",
        Pacib => "PACIB",
        Pacda => "PACDA",
        Pacdb => "PACDB",
        Autia => "AUTIA",
        Autib => "AUTIB",
        Autda => "AUTDA",
        Autdb => "AUTDB",
        Paciza => "PACIZA",
        Pacizb => "PACIZB",
        Pacdza => "PACDZA",
        Pacdzb => "PACDZB",
        Autiza => "AUTIZA",
        Autizb => "AUTIZB",
        Autdza => "AUTDZA",
        Autdzb => "AUTDZB",
        Xpaci => "XPACI",
        Xpacd => "XPACD",
        AndW => "AND",
        BicW => "BIC",
        OrrW => "ORR",
        OrnW => "ORN",
        EorW => "EOR",
        EonW => "EON",
        AndsW => "ANDS",
        BicsW => "BICS",
        AndX => "AND",
        BicX => "BIC",
        OrrX => "ORR",
        OrnX => "ORN",
        EorX => "EOR",
        EonX => "EON",
        AndsX => "ANDS",
        BicsX => "BICS",
        AddW => "ADD",
        AddsW => "ADDS",
        SubW => "SUB",
        SubsW => "SUBS",
        AddX => "ADD",
        AddsX => "ADDS",
        SubX => "SUB",
        SubsX => "SUBS",
        AddExtW => "ADD",
        AddsExtW => "ADDS",
        SubExtW => "SUB",
        SubsExtW => "SUBS",
        AddExtX => "ADD",
        AddsExtX => "ADDS",
        SubExtX => "SUB",
        SubsExtX => "SUBS",
        AdcW => "ADC",
        AdcsW => "ADCS",
        SbcW => "SBC",
        SbcsW => "SBCS",
        AdcX => "ADC",
        AdcsX => "ADCS",
        SbcX => "SBC",
        SbcsX => "SBCS",
        Rmif => "RMIF",
        Setf8 => "SETF8",
        Setf16 => "SETF16",
        CcmnRegW => "CCMN",
        CcmpRegW => "CCMP",
        CcmnRegX => "CCMN",
        CcmpRegX => "CCMP",
        CcmnImmW => "CCMN",
        CcmpImmW => "CCMP",
        CcmnImmX => "CCMN",
        CcmpImmX => "CCMP",
        CselW => "CSEL",
        CsincW => "CSINC",
        CsinvW => "CSINV",
        CsnegW => "CSNEG",
        CselX => "CSEL",
        CsincX => "CSINC",
        CsinvX => "CSINV",
        CsnegX => "CSNEG",
        MaddW => "MADD",
        MsubW => "MSUB",
        MaddX => "MADD",
        MsubX => "MSUB",
        Smaddl => "SMADDL",
        Smsubl => "SMSUBL",
        Smulh => "SMULH",
        Umaddl => "UMADDL",
        Umsubl => "UMSUBL",
        Umulh => "UMULH",

        Strb => "STRB",
        Ldrb => "LDRB",
        LdrsbX => "LDRSB",
        LdrsbW => "LDRSB",
        Strh => "STRH",
        Ldrh => "LDRH",
        LdrshX => "LDRSH",
        LdrshW => "LDRSH",
        StrW => "STR",
        LdrW => "LDR",
        Ldrsw => "LDRSW",
        StrX => "STR",
        LdrX => "LDR",
        Prfm => "PRFM",
        StrSimd => "STR",
        LdrSimd => "LDR",
        StpW => "STP",
        LdpW => "LDP",
        Stgp => "STGP",
        Ldpsw => "LDPSW",
        StpX => "STP",
        LdpX => "LDP",
        StpSimd => "STP",
        LdpSimd => "LDP",

        FmovToGeneral => "FMOV",
        FmovFromGeneral => "FMOV",
        Scvtf => "SCVTF",
        Ucvtf => "UCVTF",
        Fcvtzs => "FCVTZS",
        Fcvtzu => "FCVTZU",
        FmovRegister => "FMOV",
        Fabs => "FABS",
        Fneg => "FNEG",
        Fsqrt => "FSQRT",
        Fcmp => "FCMP",
        Fcmpe => "FCMPE",
        FmovImmediate => "FMOV",
        Fccmp => "FCCMP",
        Fccmpe => "FCCMPE",
        Fmul => "FMUL",
        Fdiv => "FDIV",
        Fadd => "FADD",
        Fsub => "FSUB",
        Fmax => "FMAX",
        Fmin => "FMIN",
        Fmaxnm => "FMAXNM",
        Fminnm => "FMINNM",
        Fnmul => "FNMUL",
        Fcsel => "FCSEL",
        Fmadd => "FMADD",
        Fmsub => "FMSUB",
        Fnmadd => "FNMADD",
        Fnmsub => "FNMSUB",
    }
}
