#![no_main]

use a64_core::{
    null_sink, step_one, CacheConfig, CacheMemory, Decoder, Ram, RegisterFile, SharedMemory,
    StepOutcome, UnitMemory, LINK_REGISTER, PROGRAM_EXIT_ADDRESS,
};
use libfuzzer_sys::fuzz_target;

const MAX_STEPS: usize = 256;

fuzz_target!(|data: &[u8]| {
    let words: Vec<u32> = data
        .chunks_exact(4)
        .take(64)
        .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();
    if words.is_empty() {
        return;
    }
    for word in &words {
        let _ = Decoder::decode(*word);
    }

    let ram = SharedMemory::new(Box::new(Ram::new("RAM", 1024, null_sink())));
    let l1 = CacheMemory::new("L1", CacheConfig::default(), Box::new(ram), 256, null_sink());
    let mut memory = UnitMemory::new(l1, Ram::new("STACK", 64, null_sink()));
    memory.load_image(&words);

    let mut regs = RegisterFile::default();
    regs.set_sp(memory.map().stack_top());
    regs.set_gpr(LINK_REGISTER, PROGRAM_EXIT_ADDRESS);
    let end = words.len() as u64 * 4;
    for _ in 0..MAX_STEPS {
        if regs.pc() == PROGRAM_EXIT_ADDRESS || regs.pc() >= end {
            break;
        }
        if let StepOutcome::Fault { .. } = step_one(&mut regs, &mut memory) {
            break;
        }
    }
});
