//! Architecture-specific implementations.
//!
//! x86 in 32-bit protected mode is the only supported target. The module
//! tree compiles everywhere; instruction-emitting items inside it are
//! gated on the target so the pure parts stay testable on the host.

pub mod x86;
