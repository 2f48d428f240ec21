//! Steps the bundled branch-ladder sample on a two-core CPU and prints each
//! frame, then the per-level cache statistics.
//!
//! Set `RUST_LOG=a64_core=debug` to see retired instructions through the
//! tracing sink.

use a64_core::{
    sample_program, tracing_sink, AccessKind, AccessStats, Cpu, CpuConfig, ResultState,
};
use proptest as _;
use rstest as _;
#[cfg(feature = "serde")]
use serde as _;
use thiserror as _;
use tracing as _;
use tracing_subscriber::EnvFilter;

fn print_stats(name: &str, stats: AccessStats) {
    println!(
        "{name:>6}: {:>5} reads {:>5} writes {:>5} block fills  hit ratio {:.2}",
        stats.reads(),
        stats.writes(),
        stats.count(AccessKind::UpstreamReadBlock),
        stats.hit_ratio()
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cpu = Cpu::new(CpuConfig::default(), tracing_sink())?;
    let program = sample_program(0).ok_or("missing sample program")?;
    let result = cpu.step_in(program);

    while let Ok(frame) = result.step_in() {
        println!(
            "#{:<3} pc={:#018x} sp={:#x} x0={} nzcv={:04b}",
            frame.retired,
            frame.pc,
            frame.sp,
            frame.gprs[0],
            frame.nzcv.bits()
        );
    }

    let frame = result.result_frame();
    println!(
        "state={:?} x0={} retired={}",
        result.state(),
        frame.gprs[0],
        frame.retired
    );
    if result.state() != ResultState::Ready {
        return Err(format!("program ended with {:?}", result.fault()).into());
    }

    if let Some(stats) = cpu.l1_stats(0) {
        print_stats("L1[0]", stats);
    }
    if let Some(stats) = cpu.l2_stats(0) {
        print_stats("L2[0]", stats);
    }
    print_stats("L3", cpu.l3_stats());
    print_stats("RAM", cpu.ram_stats());
    Ok(())
}
