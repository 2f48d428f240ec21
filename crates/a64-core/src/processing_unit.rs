//! A64 processing unit: one hardware thread with its own worker.
//!
//! Programs arrive over a channel and run one at a time in submission
//! order. Stop requests are observed only between instructions.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use crate::api::{SharedSink, TraceEvent};
use crate::diag::UnitDiagnostics;
use crate::execute::{step_one, StepOutcome};
use crate::fault::FaultCode;
use crate::memory::{AccessStats, Memory, UnitMemory, PROGRAM_EXIT_ADDRESS, STACK_BASE};
use crate::program::Program;
use crate::result::{
    ControlledResult, Frame, ProcessMemoryView, ResultCell, RunResult, StepGrant,
};
use crate::state::{RegisterFile, UnitStatus, LINK_REGISTER};

struct Job {
    program: Program,
    cell: Arc<ResultCell>,
}

/// State shared between the unit handle and its worker.
struct UnitShared {
    stop: AtomicBool,
    status: Mutex<UnitStatus>,
    current: Mutex<Option<Arc<ResultCell>>>,
    diagnostics: Mutex<UnitDiagnostics>,
    memory: Mutex<UnitMemory>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One hardware thread: an L1, a private stack and a worker thread.
pub struct ProcessingUnit {
    index: usize,
    name: String,
    shared: Arc<UnitShared>,
    sender: Option<Sender<Job>>,
    worker: Option<JoinHandle<()>>,
    sink: SharedSink,
}

impl ProcessingUnit {
    /// Starts the worker for unit `index` over `memory`.
    ///
    /// # Panics
    ///
    /// Panics when the operating system refuses to spawn the worker thread.
    #[must_use]
    pub fn new(index: usize, memory: UnitMemory, sink: SharedSink) -> Self {
        let name = format!("PU[{index}]");
        let shared = Arc::new(UnitShared {
            stop: AtomicBool::new(false),
            status: Mutex::new(UnitStatus::Idle),
            current: Mutex::new(None),
            diagnostics: Mutex::new(UnitDiagnostics::new()),
            memory: Mutex::new(memory),
        });
        let (sender, receiver) = mpsc::channel();
        let worker = Worker {
            index,
            shared: Arc::clone(&shared),
            sink: Arc::clone(&sink),
        };
        let worker = thread::Builder::new()
            .name(name.clone())
            .spawn(move || worker.serve(&receiver))
            .unwrap_or_else(|err| panic!("{name}: cannot spawn worker: {err}"));
        sink.on_event(TraceEvent::Construction {
            component: &name,
            detail: "worker started",
        });
        Self {
            index,
            name,
            shared,
            sender: Some(sender),
            worker: Some(worker),
            sink,
        }
    }

    /// Global unit index.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Component name, `PU[index]`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Queues `program` to run to completion.
    #[must_use]
    pub fn run(&self, program: Program) -> RunResult {
        let cell = ResultCell::new(false);
        self.submit(program, Arc::clone(&cell));
        RunResult::new(cell)
    }

    /// Queues `program` for single-instruction stepping.
    #[must_use]
    pub fn step_in(&self, program: Program) -> ControlledResult {
        let cell = ResultCell::new(true);
        self.submit(program, Arc::clone(&cell));
        ControlledResult::new(cell)
    }

    fn submit(&self, program: Program, cell: Arc<ResultCell>) {
        let job = Job {
            program,
            cell: Arc::clone(&cell),
        };
        let delivered = self.status().accepts_programs()
            && self
                .sender
                .as_ref()
                .is_some_and(|sender| sender.send(job).is_ok());
        if !delivered {
            cell.finish(Frame::default(), None, true);
        }
    }

    /// Requests a stop at the next instruction boundary. The current program
    /// and every queued one end as interrupted.
    pub fn stop(&self) {
        self.shared.stop.store(true, Ordering::SeqCst);
        if let Some(cell) = lock(&self.shared.current).as_ref() {
            cell.wake();
        }
    }

    /// Current worker status.
    #[must_use]
    pub fn status(&self) -> UnitStatus {
        *lock(&self.shared.status)
    }

    /// Counters accumulated over the unit's lifetime.
    #[must_use]
    pub fn diagnostics(&self) -> UnitDiagnostics {
        *lock(&self.shared.diagnostics)
    }

    /// Access statistics of the unit's L1.
    #[must_use]
    pub fn l1_stats(&self) -> AccessStats {
        lock(&self.shared.memory).l1().stats()
    }

    /// Access statistics of the unit's private stack.
    #[must_use]
    pub fn stack_stats(&self) -> AccessStats {
        lock(&self.shared.memory).stack().stats()
    }
}

impl Drop for ProcessingUnit {
    fn drop(&mut self) {
        self.stop();
        self.sender.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                self.sink
                    .on_event(TraceEvent::WorkerPanicked { unit: self.index });
            }
        }
    }
}

/// How a program left the run loop.
enum Exit {
    Finished,
    Stopped,
    Faulted(FaultCode),
}

struct Worker {
    index: usize,
    shared: Arc<UnitShared>,
    sink: SharedSink,
}

impl Worker {
    fn serve(&self, receiver: &Receiver<Job>) {
        while let Ok(job) = receiver.recv() {
            if self.shared.stop.load(Ordering::SeqCst) {
                lock(&self.shared.diagnostics).record_program(true);
                job.cell.finish(Frame::default(), None, true);
                continue;
            }
            *lock(&self.shared.status) = UnitStatus::Running;
            *lock(&self.shared.current) = Some(Arc::clone(&job.cell));
            self.run_program(&job);
        }
    }

    fn frame(&self, regs: &RegisterFile, retired: u64) -> Frame {
        let memory = lock(&self.shared.memory);
        let view = ProcessMemoryView::new(STACK_BASE, memory.stack().words().to_vec());
        Frame::capture(regs, retired, view)
    }

    fn start(&self, program: &Program) -> Result<RegisterFile, FaultCode> {
        let mut memory = lock(&self.shared.memory);
        if program.len() > memory.l1().size() {
            return Err(FaultCode::DataAbort);
        }
        memory.reset_stack();
        memory.load_image(program.words());

        let mut regs = RegisterFile::default();
        regs.set_pc(program.entry() * 4);
        regs.set_sp(memory.map().stack_top());
        regs.set_gpr(LINK_REGISTER, PROGRAM_EXIT_ADDRESS);
        Ok(regs)
    }

    fn run_program(&self, job: &Job) {
        let Job { program, cell } = job;
        let unit = self.index;
        self.sink.on_event(TraceEvent::ProgramStarted {
            unit,
            entry: program.entry(),
        });

        let mut retired = 0;
        let (regs, exit) = match self.start(program) {
            Ok(mut regs) => {
                cell.begin(self.frame(&regs, 0));
                let exit = self.execute(program, cell, &mut regs, &mut retired);
                (regs, exit)
            }
            Err(cause) => {
                let regs = RegisterFile::default();
                self.record_fault(cause, program.entry() * 4);
                (regs, Exit::Faulted(cause))
            }
        };

        let (fault, interrupted) = match exit {
            Exit::Finished => (None, false),
            Exit::Stopped => (None, true),
            Exit::Faulted(cause) => (Some(cause), true),
        };
        lock(&self.shared.current).take();
        lock(&self.shared.diagnostics).record_program(interrupted);
        *lock(&self.shared.status) = if self.shared.stop.load(Ordering::SeqCst) {
            UnitStatus::Interrupted
        } else {
            UnitStatus::Idle
        };
        self.sink
            .on_event(TraceEvent::ProgramFinished { unit, interrupted });
        cell.finish(self.frame(&regs, retired), fault, interrupted);
    }

    fn execute(
        &self,
        program: &Program,
        cell: &ResultCell,
        regs: &mut RegisterFile,
        retired: &mut u64,
    ) -> Exit {
        let unit = self.index;
        let end = program.end_address();
        loop {
            if self.shared.stop.load(Ordering::SeqCst) {
                return Exit::Stopped;
            }
            if regs.pc() == PROGRAM_EXIT_ADDRESS || regs.pc() >= end {
                return Exit::Finished;
            }
            if cell.step_mode() {
                match cell.await_step(self.frame(regs, *retired), &self.shared.stop) {
                    StepGrant::Granted => {}
                    StepGrant::Stopped | StepGrant::Abandoned => return Exit::Stopped,
                }
            }

            let outcome = step_one(regs, &mut *lock(&self.shared.memory));
            match outcome {
                StepOutcome::Retired {
                    pc,
                    word,
                    group,
                    mnemonic,
                } => {
                    self.sink.on_event(TraceEvent::Fetch { unit, pc, word });
                    self.sink.on_event(TraceEvent::Retire { unit, pc, mnemonic });
                    *retired += 1;
                    lock(&self.shared.diagnostics).record_retired(group);
                }
                StepOutcome::Fault { pc, word, cause } => {
                    if let Some(word) = word {
                        self.sink.on_event(TraceEvent::Fetch { unit, pc, word });
                    }
                    self.record_fault(cause, pc);
                    return Exit::Faulted(cause);
                }
            }
        }
    }

    fn record_fault(&self, cause: FaultCode, pc: u64) {
        self.sink.on_event(TraceEvent::Fault {
            unit: self.index,
            pc,
            cause,
        });
        lock(&self.shared.diagnostics).record_fault(cause, pc);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::thread;
    use std::time::Duration;

    use super::ProcessingUnit;
    use crate::api::{null_sink, LogSink, SharedSink, TraceEvent};
    use crate::fault::FaultCode;
    use crate::memory::{CacheConfig, CacheMemory, Ram, SharedMemory, UnitMemory, PROGRAM_EXIT_ADDRESS};
    use crate::program::{sample_program, Program};
    use crate::result::{ResultState, StepError};
    use crate::state::UnitStatus;

    fn unit() -> ProcessingUnit {
        let ram = SharedMemory::new(Box::new(Ram::new("RAM", 1024, null_sink())));
        let l1 = CacheMemory::new("L1[0]", CacheConfig::default(), Box::new(ram), 256, null_sink());
        let memory = UnitMemory::new(l1, Ram::new("STACK[0]", 64, null_sink()));
        ProcessingUnit::new(0, memory, null_sink())
    }

    #[test]
    fn runs_the_sample_to_completion() {
        let unit = unit();
        let result = unit.run(sample_program(0).expect("sample"));
        assert!(result.wait_ready_timeout(Duration::from_secs(5)));
        assert_eq!(result.state(), ResultState::Ready);
        let frame = result.frame();
        assert_eq!(frame.gprs[0], 5);
        assert_eq!(frame.pc, PROGRAM_EXIT_ADDRESS);
        assert_eq!(frame.retired, 13);
        assert_eq!(frame.memory.read(frame.sp - 4), Some(5));

        let diag = unit.diagnostics();
        assert_eq!(diag.programs_handled, 1);
        assert_eq!(diag.instructions_retired, 13);
        assert!(unit.l1_stats().accesses() > 0);
    }

    #[test]
    fn programs_run_in_submission_order() {
        let unit = unit();
        let first = unit.run(sample_program(1).expect("sample"));
        let second = unit.run(sample_program(0).expect("sample"));
        second.wait_ready();
        assert!(first.is_ready());
        assert_eq!(first.frame().gprs[0], 55);
        assert_eq!(second.frame().gprs[0], 5);
    }

    #[test]
    fn faults_interrupt_only_the_program() {
        let unit = unit();
        let bad = unit.run(Program::from_words(vec![0xD503_201F, 0], 0).expect("program"));
        bad.wait_ready();
        assert_eq!(bad.state(), ResultState::Interrupted);
        assert_eq!(bad.fault(), Some(FaultCode::UndefinedInstruction));
        assert_eq!(bad.frame().pc, 4);

        let good = unit.run(sample_program(0).expect("sample"));
        good.wait_ready();
        assert_eq!(good.state(), ResultState::Ready);
        assert_eq!(unit.diagnostics().programs_interrupted, 1);
        assert_eq!(unit.status(), UnitStatus::Idle);
    }

    #[test]
    fn oversized_images_fault_before_running() {
        let unit = unit();
        let result = unit.run(Program::from_words(vec![0xD503_201F; 2048], 0).expect("program"));
        result.wait_ready();
        assert_eq!(result.fault(), Some(FaultCode::DataAbort));
        assert_eq!(result.frame().retired, 0);
    }

    #[test]
    fn stop_interrupts_a_stepping_program() {
        let unit = unit();
        let handle = unit.step_in(sample_program(0).expect("sample"));
        assert!(handle.step_in().is_ok());
        unit.stop();
        handle.wait_ready();
        assert_eq!(handle.state(), ResultState::Interrupted);
        assert_eq!(handle.retired(), 1);
        assert_eq!(handle.step_in(), Err(StepError::Stopped));
        assert_eq!(unit.status(), UnitStatus::Interrupted);

        let late = unit.run(sample_program(0).expect("sample"));
        late.wait_ready();
        assert_eq!(late.state(), ResultState::Interrupted);
    }

    #[derive(Default)]
    struct PanicRecorder {
        panicked: Mutex<Vec<usize>>,
    }

    impl LogSink for PanicRecorder {
        fn on_event(&self, event: TraceEvent<'_>) {
            if let TraceEvent::WorkerPanicked { unit } = event {
                self.panicked.lock().expect("lock").push(unit);
            }
        }
    }

    #[test]
    fn a_panicked_worker_is_reported_through_the_sink() {
        let recorder = Arc::new(PanicRecorder::default());
        let ram = SharedMemory::new(Box::new(Ram::new("RAM", 1024, null_sink())));
        let l1 = CacheMemory::new("L1[3]", CacheConfig::default(), Box::new(ram), 256, null_sink());
        let memory = UnitMemory::new(l1, Ram::new("STACK[3]", 64, null_sink()));
        let mut unit = ProcessingUnit::new(3, memory, Arc::clone(&recorder) as SharedSink);

        let failing = thread::spawn(|| panic!("worker failure"));
        drop(unit.worker.replace(failing));
        drop(unit);

        assert_eq!(*recorder.panicked.lock().expect("lock"), vec![3]);
    }
}
