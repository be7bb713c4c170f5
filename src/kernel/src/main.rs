//! RunkoOS kernel entry point.
//!
//! The boot stub hands control here in 32-bit protected mode with a valid
//! stack; everything after that (GDT, terminal, keyboard, shell) happens
//! in `kernel_main`.

#![cfg_attr(target_arch = "x86", no_std)]
#![cfg_attr(target_arch = "x86", no_main)]

#[cfg(target_arch = "x86")]
use core::fmt::Write as _;
#[cfg(target_arch = "x86")]
use runko_kernel::arch::x86::{self, gdt, vga::Color, vga::VgaGrid, IoPorts};
#[cfg(target_arch = "x86")]
use runko_kernel::boot::{self, Status};
#[cfg(target_arch = "x86")]
use runko_kernel::keyboard::Keyboard;
#[cfg(target_arch = "x86")]
use runko_kernel::serial_println;
#[cfg(target_arch = "x86")]
use runko_kernel::terminal::{shell, Writer};

/// Kernel entry point.
///
/// Called by the boot stub once protected mode and the stack are set up.
#[cfg(target_arch = "x86")]
#[no_mangle]
pub extern "C" fn kernel_main() -> ! {
    // ========================================================================
    // Phase 1: Core services (serial + logger), no display yet
    // ========================================================================
    runko_kernel::init();
    serial_println!("RunkoOS starting");

    // ========================================================================
    // Phase 2: Display bring-up
    // ========================================================================
    let mut term = Writer::new(VgaGrid::new());
    term.initialize();

    // ========================================================================
    // Phase 3: Segment descriptor table
    // ========================================================================
    // Every memory access after this call is governed by the new table.
    gdt::init();

    // ========================================================================
    // Phase 4: Terminal again, banner, boot report
    // ========================================================================
    term.initialize();
    boot::banner::print_banner(&mut term);

    boot::log(&mut term, Status::Ok, "GDT loaded, segment registers reloaded");
    let _ = writeln!(
        term,
        "       kernel stack pointer (ESP): {:#010x}",
        x86::stack_pointer()
    );

    // ========================================================================
    // Phase 5: Keyboard
    // ========================================================================
    let mut keyboard = Keyboard::new(IoPorts);
    let discarded = keyboard.drain_pending();
    if discarded > 0 {
        boot::log(&mut term, Status::Warn, "keyboard buffer held stale bytes");
    }
    boot::log(&mut term, Status::Ok, "Keyboard controller ready");

    term.put_char(b'\n');
    term.set_color(Color::Cyan, Color::Black);
    term.write("Type 'help' for available commands.\n\n");
    term.set_color(Color::White, Color::Black);

    // ========================================================================
    // Phase 6: Shell. `exit` is the only way back out
    // ========================================================================
    shell::run(&mut term, &mut keyboard);

    boot::log(&mut term, Status::Info, "Shell exited, halting");
    serial_println!("shell exited, parking CPU");
    x86::halt_loop()
}

/// Panic handler.
///
/// Reports over serial first, then the display, and parks the CPU.
#[cfg(target_arch = "x86")]
#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    serial_println!("KERNEL PANIC: {}", info);

    // Fresh handle: the panicking context may still hold the live terminal.
    let mut term = Writer::new(VgaGrid::new());
    term.set_color(Color::LightRed, Color::Black);
    term.write("\n\n!!! KERNEL PANIC !!!\n");
    term.set_color(Color::White, Color::Black);
    let _ = writeln!(term, "{}", info);

    x86::halt_loop()
}

/// Host-build stub; the kernel only runs through `kernel_main` on x86.
#[cfg(not(target_arch = "x86"))]
fn main() {}
