//! Result handles returned by [`crate::Cpu::run`] and [`crate::Cpu::step_in`].
//!
//! A handle and the worker thread of the unit running its program share one
//! [`ResultCell`]. The worker publishes a [`Frame`] and a [`ResultState`];
//! in step mode it parks before every instruction until the handle grants
//! exactly one step.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use thiserror::Error;

use crate::fault::FaultCode;
use crate::memory::{DataUnit, DATA_UNIT_BYTES};
use crate::state::{Nzcv, RegisterFile, GENERAL_REGISTER_COUNT};

/// Lifecycle of a submitted program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum ResultState {
    /// Queued, or set up and not yet stepped.
    #[default]
    Waiting,
    /// Running to completion.
    Running,
    /// Finished normally.
    Ready,
    /// Ended by a stop request or an execution fault.
    Interrupted,
    /// Parked between instructions, waiting for a step.
    StepInMode,
}

impl ResultState {
    /// `true` for [`Self::Ready`] and [`Self::Interrupted`].
    #[must_use]
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Ready | Self::Interrupted)
    }
}

/// Rejection reasons for [`ControlledResult::step_in`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StepError {
    /// The program already finished.
    #[error("program has already finished")]
    Finished,
    /// The CPU was stopped before the step retired.
    #[error("cpu was stopped")]
    Stopped,
    /// The stepped instruction raised a fault and ended the program.
    #[error("step raised {0}")]
    Faulted(FaultCode),
}

/// Copy of a unit's private stack.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ProcessMemoryView {
    base: u64,
    words: Vec<DataUnit>,
}

impl ProcessMemoryView {
    /// Wraps stack words mapped at byte address `base`.
    #[must_use]
    pub fn new(base: u64, words: Vec<DataUnit>) -> Self {
        Self { base, words }
    }

    /// Byte address of the first stack word.
    #[must_use]
    pub const fn stack_base(&self) -> u64 {
        self.base
    }

    /// Number of words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// `true` when the view holds no words.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Reads the aligned word at byte address `addr`, if it is in the view.
    #[must_use]
    pub fn read(&self, addr: u64) -> Option<DataUnit> {
        if addr % DATA_UNIT_BYTES != 0 {
            return None;
        }
        let index = addr.checked_sub(self.base)? / DATA_UNIT_BYTES;
        self.words.get(usize::try_from(index).ok()?).copied()
    }

    /// Every word, lowest address first.
    #[must_use]
    pub fn words(&self) -> &[DataUnit] {
        &self.words
    }
}

/// Immutable snapshot of one unit's visible state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Frame {
    /// X0 to X30.
    pub gprs: [u64; GENERAL_REGISTER_COUNT],
    /// Current stack pointer.
    pub sp: u64,
    /// Byte address of the next instruction.
    pub pc: u64,
    /// Condition flags.
    pub nzcv: Nzcv,
    /// Instructions retired by this program so far.
    pub retired: u64,
    /// Private stack contents.
    pub memory: ProcessMemoryView,
}

impl Frame {
    /// Captures `regs` together with a stack view.
    #[must_use]
    pub fn capture(regs: &RegisterFile, retired: u64, memory: ProcessMemoryView) -> Self {
        Self {
            gprs: regs.gprs(),
            sp: regs.sp(),
            pc: regs.pc(),
            nzcv: regs.nzcv(),
            retired,
            memory,
        }
    }
}

/// Outcome of a parked worker waiting for a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StepGrant {
    Granted,
    Stopped,
    Abandoned,
}

#[derive(Debug, Default)]
struct ResultInner {
    state: ResultState,
    frame: Frame,
    fault: Option<FaultCode>,
    pending_steps: u64,
    parked: bool,
    abandoned: bool,
}

/// State shared by a result handle and the worker running its program.
#[derive(Debug)]
pub(crate) struct ResultCell {
    step_mode: bool,
    inner: Mutex<ResultInner>,
    changed: Condvar,
}

impl ResultCell {
    pub(crate) fn new(step_mode: bool) -> Arc<Self> {
        Arc::new(Self {
            step_mode,
            inner: Mutex::new(ResultInner::default()),
            changed: Condvar::new(),
        })
    }

    pub(crate) const fn step_mode(&self) -> bool {
        self.step_mode
    }

    fn lock(&self) -> MutexGuard<'_, ResultInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn wait_while<'a>(
        &self,
        guard: MutexGuard<'a, ResultInner>,
        condition: impl FnMut(&mut ResultInner) -> bool,
    ) -> MutexGuard<'a, ResultInner> {
        self.changed
            .wait_while(guard, condition)
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn begin(&self, frame: Frame) {
        let mut inner = self.lock();
        inner.state = if self.step_mode {
            ResultState::Waiting
        } else {
            ResultState::Running
        };
        inner.frame = frame;
        drop(inner);
        self.changed.notify_all();
    }

    /// Publishes `frame` and parks until a step is granted, `stop` is raised
    /// or the handle is dropped.
    pub(crate) fn await_step(&self, frame: Frame, stop: &AtomicBool) -> StepGrant {
        let mut inner = self.lock();
        inner.frame = frame;
        inner.state = ResultState::StepInMode;
        inner.parked = true;
        self.changed.notify_all();
        inner = self.wait_while(inner, |inner| {
            inner.pending_steps == 0 && !inner.abandoned && !stop.load(Ordering::SeqCst)
        });
        inner.parked = false;
        if stop.load(Ordering::SeqCst) {
            StepGrant::Stopped
        } else if inner.abandoned {
            StepGrant::Abandoned
        } else {
            inner.pending_steps -= 1;
            StepGrant::Granted
        }
    }

    pub(crate) fn finish(&self, frame: Frame, fault: Option<FaultCode>, interrupted: bool) {
        let mut inner = self.lock();
        inner.frame = frame;
        inner.fault = fault;
        inner.parked = false;
        inner.pending_steps = 0;
        inner.state = if interrupted {
            ResultState::Interrupted
        } else {
            ResultState::Ready
        };
        drop(inner);
        self.changed.notify_all();
    }

    /// Wakes a parked worker so it can observe a stop request.
    pub(crate) fn wake(&self) {
        let _inner = self.lock();
        self.changed.notify_all();
    }

    fn abandon(&self) {
        self.lock().abandoned = true;
        self.changed.notify_all();
    }

    fn state(&self) -> ResultState {
        self.lock().state
    }

    fn frame(&self) -> Frame {
        self.lock().frame.clone()
    }

    fn fault(&self) -> Option<FaultCode> {
        self.lock().fault
    }

    fn wait_ready(&self) {
        let inner = self.lock();
        drop(self.wait_while(inner, |inner| !inner.state.is_finished()));
    }

    fn wait_ready_timeout(&self, timeout: Duration) -> bool {
        let inner = self.lock();
        let (inner, _) = self
            .changed
            .wait_timeout_while(inner, timeout, |inner| !inner.state.is_finished())
            .unwrap_or_else(PoisonError::into_inner);
        inner.state.is_finished()
    }

    fn wait_for_state(&self, state: ResultState) -> bool {
        let inner = self.lock();
        let inner = self.wait_while(inner, |inner| {
            inner.state != state && !inner.state.is_finished()
        });
        inner.state == state
    }

    fn can_step_in(&self) -> bool {
        let inner = self.lock();
        self.step_mode
            && inner.state == ResultState::StepInMode
            && inner.parked
            && inner.pending_steps == 0
    }

    fn finished_error(inner: &ResultInner) -> StepError {
        match (inner.state, inner.fault) {
            (ResultState::Interrupted, Some(code)) => StepError::Faulted(code),
            (ResultState::Interrupted, None) => StepError::Stopped,
            _ => StepError::Finished,
        }
    }

    fn step_in(&self) -> Result<Frame, StepError> {
        let inner = self.lock();
        let mut inner = self.wait_while(inner, |inner| {
            !inner.state.is_finished() && !(inner.parked && inner.pending_steps == 0)
        });
        if inner.state.is_finished() {
            return Err(Self::finished_error(&inner));
        }
        inner.pending_steps += 1;
        self.changed.notify_all();
        let inner = self.wait_while(inner, |inner| {
            !inner.state.is_finished() && !(inner.parked && inner.pending_steps == 0)
        });
        if inner.state == ResultState::Interrupted {
            return Err(Self::finished_error(&inner));
        }
        Ok(inner.frame.clone())
    }
}

/// Handle to a program running to completion.
#[derive(Debug)]
pub struct RunResult {
    cell: Arc<ResultCell>,
}

impl RunResult {
    pub(crate) const fn new(cell: Arc<ResultCell>) -> Self {
        Self { cell }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> ResultState {
        self.cell.state()
    }

    /// `true` once the program finished or was interrupted.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.state().is_finished()
    }

    /// Blocks until the program finished or was interrupted.
    pub fn wait_ready(&self) {
        self.cell.wait_ready();
    }

    /// Blocks up to `timeout`; returns whether the program finished.
    #[must_use]
    pub fn wait_ready_timeout(&self, timeout: Duration) -> bool {
        self.cell.wait_ready_timeout(timeout)
    }

    /// Blocks until `state` is reached or the program ends in another state;
    /// returns whether `state` was reached.
    pub fn wait_for_state(&self, state: ResultState) -> bool {
        self.cell.wait_for_state(state)
    }

    /// Latest published frame.
    #[must_use]
    pub fn frame(&self) -> Frame {
        self.cell.frame()
    }

    /// Fault that ended the program, if any.
    #[must_use]
    pub fn fault(&self) -> Option<FaultCode> {
        self.cell.fault()
    }

    /// Run handles never step.
    #[must_use]
    pub const fn can_step_in(&self) -> bool {
        false
    }
}

/// Handle to a program executed one instruction per [`Self::step_in`].
#[derive(Debug)]
pub struct ControlledResult {
    cell: Arc<ResultCell>,
}

impl ControlledResult {
    pub(crate) const fn new(cell: Arc<ResultCell>) -> Self {
        Self { cell }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> ResultState {
        self.cell.state()
    }

    /// `true` once the program finished or was interrupted.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.state().is_finished()
    }

    /// Blocks until the program finished or was interrupted.
    pub fn wait_ready(&self) {
        self.cell.wait_ready();
    }

    /// Blocks up to `timeout`; returns whether the program finished.
    #[must_use]
    pub fn wait_ready_timeout(&self, timeout: Duration) -> bool {
        self.cell.wait_ready_timeout(timeout)
    }

    /// Blocks until `state` is reached or the program ends in another state;
    /// returns whether `state` was reached.
    pub fn wait_for_state(&self, state: ResultState) -> bool {
        self.cell.wait_for_state(state)
    }

    /// `true` while the unit is parked and one more instruction may retire.
    /// Never blocks on instruction execution.
    #[must_use]
    pub fn can_step_in(&self) -> bool {
        self.cell.can_step_in()
    }

    /// Retires exactly one instruction and returns the refreshed frame.
    ///
    /// Blocks until the unit is parked, then until the instruction retired
    /// or ended the program.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::Finished`] when the program already ended,
    /// [`StepError::Stopped`] when the CPU was stopped and
    /// [`StepError::Faulted`] when the program ended on a fault.
    pub fn step_in(&self) -> Result<Frame, StepError> {
        self.cell.step_in()
    }

    /// Latest published frame.
    #[must_use]
    pub fn frame(&self) -> Frame {
        self.cell.frame()
    }

    /// Alias of [`Self::frame`].
    #[must_use]
    pub fn result_frame(&self) -> Frame {
        self.frame()
    }

    /// Instructions retired so far.
    #[must_use]
    pub fn retired(&self) -> u64 {
        self.cell.frame().retired
    }

    /// Fault that ended the program, if any.
    #[must_use]
    pub fn fault(&self) -> Option<FaultCode> {
        self.cell.fault()
    }
}

impl Drop for ControlledResult {
    fn drop(&mut self) {
        self.cell.abandon();
    }
}
