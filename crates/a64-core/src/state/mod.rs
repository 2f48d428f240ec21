//! Architectural register state and unit status.

/// Register file, banked stack pointers and condition flags.
pub mod registers;
/// Processing-unit status machine.
pub mod run_state;

pub use registers::{
    ExceptionLevel, Nzcv, RegisterFile, GENERAL_REGISTER_COUNT, LINK_REGISTER, ZERO_OR_SP,
};
pub use run_state::UnitStatus;
