//! RunkoOS Kernel
//!
//! Bare-metal bring-up for 32-bit protected mode: a flat segment
//! descriptor table, a VGA text terminal, a polled PS/2 keyboard, and a
//! small line-oriented command shell on top.
//!
//! # Architecture
//!
//! The kernel is structured into the following modules:
//! - `arch`: platform code (port I/O, VGA surface, GDT, serial)
//! - `terminal`: terminal engine, shell, and command dispatch
//! - `keyboard`: polled scancode pipeline
//! - `boot`: boot logging and banner
//! - `testutil`: simulated hardware backing the test suite
//!
//! # Safety
//!
//! This is a `#![no_std]` kernel. All unsafe code is documented with safety
//! invariants explaining why the usage is correct.

#![no_std]
#![warn(missing_docs)]

pub mod arch;
pub mod boot;
pub mod keyboard;
pub mod terminal;
pub mod testutil;

#[cfg(target_arch = "x86")]
pub mod logger;

/// Initializes core kernel subsystems.
///
/// Called early in the boot process to set up essential services:
/// the serial debug port and the logger on top of it.
pub fn init() {
    #[cfg(target_arch = "x86")]
    {
        arch::x86::serial::init();
        logger::init(log::LevelFilter::Info);
    }
}
