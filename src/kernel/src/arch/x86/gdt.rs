//! Global Descriptor Table for 32-bit protected mode.
//!
//! Builds the seven flat descriptors (null, kernel code/data/stack, user
//! code/data/stack), registers them with `lgdt`, and performs the
//! mandatory segment register reload. A malformed descriptor cannot be
//! detected at run time (it faults at the next memory access), so the
//! encoding is pinned down by unit tests instead.

use bitflags::bitflags;
use core::mem::size_of;

/// Number of descriptors in the table, the mandatory null entry included.
pub const GDT_SIZE: usize = 7;

bitflags! {
    /// Access byte of a segment descriptor.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Access: u8 {
        /// Segment is present in memory.
        const PRESENT = 1 << 7;
        /// Descriptor privilege level 3 (user).
        const RING3 = 3 << 5;
        /// Code or data segment, not a system descriptor.
        const SEGMENT = 1 << 4;
        /// Executable (code) segment.
        const EXECUTABLE = 1 << 3;
        /// Code: readable. Data: writable.
        const READ_WRITE = 1 << 1;
    }
}

impl Access {
    /// Kernel code segment: present, ring 0, executable, readable.
    pub const KERNEL_CODE: Access = Access::PRESENT
        .union(Access::SEGMENT)
        .union(Access::EXECUTABLE)
        .union(Access::READ_WRITE);

    /// Kernel data segment: present, ring 0, writable. The kernel stack
    /// segment uses the same encoding.
    pub const KERNEL_DATA: Access = Access::PRESENT
        .union(Access::SEGMENT)
        .union(Access::READ_WRITE);

    /// User code segment: kernel code at ring 3.
    pub const USER_CODE: Access = Access::KERNEL_CODE.union(Access::RING3);

    /// User data segment: kernel data at ring 3. The user stack segment
    /// uses the same encoding.
    pub const USER_DATA: Access = Access::KERNEL_DATA.union(Access::RING3);
}

/// Granularity byte high nibble: 4 KiB granularity, 32-bit operands.
/// The low nibble carries limit bits 16-19 and is filled per entry.
const FLAGS_4K_32BIT: u8 = 0xC0;

/// One 8-byte segment descriptor in CPU layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C, packed)]
pub struct GdtEntry {
    limit_low: u16,
    base_low: u16,
    base_middle: u8,
    access: u8,
    granularity: u8,
    base_high: u8,
}

impl GdtEntry {
    /// The mandatory all-zero descriptor at index 0.
    pub const fn null() -> GdtEntry {
        GdtEntry {
            limit_low: 0,
            base_low: 0,
            base_middle: 0,
            access: 0,
            granularity: 0,
            base_high: 0,
        }
    }

    /// Encodes a descriptor from base address, byte limit, access byte and
    /// flags nibble.
    pub const fn new(base: u32, limit: u32, access: Access, flags: u8) -> GdtEntry {
        GdtEntry {
            limit_low: (limit & 0xFFFF) as u16,
            base_low: (base & 0xFFFF) as u16,
            base_middle: ((base >> 16) & 0xFF) as u8,
            access: access.bits(),
            granularity: ((limit >> 16) & 0x0F) as u8 | (flags & 0xF0),
            base_high: ((base >> 24) & 0xFF) as u8,
        }
    }

    /// Base address reassembled from the three base fields.
    pub const fn base(&self) -> u32 {
        self.base_low as u32 | (self.base_middle as u32) << 16 | (self.base_high as u32) << 24
    }

    /// Byte limit this descriptor grants, granularity applied.
    pub const fn limit(&self) -> u32 {
        let raw = self.limit_low as u32 | ((self.granularity & 0x0F) as u32) << 16;
        if self.granularity & 0x80 != 0 {
            (raw << 12) | 0xFFF
        } else {
            raw
        }
    }
}

/// Handle registered with `lgdt`: table byte size minus one, plus the
/// table address.
#[repr(C, packed)]
pub struct DescriptorPointer {
    limit: u16,
    base: u32,
}

impl DescriptorPointer {
    /// Builds the handle for a descriptor table.
    pub fn for_table(table: &[GdtEntry; GDT_SIZE]) -> DescriptorPointer {
        DescriptorPointer {
            limit: (size_of::<[GdtEntry; GDT_SIZE]>() - 1) as u16,
            base: table.as_ptr() as usize as u32,
        }
    }

    /// Table byte size minus one.
    pub fn limit(&self) -> u16 {
        self.limit
    }
}

/// Selector for a descriptor index, requested privilege level 0.
pub const fn selector(index: u16) -> u16 {
    index << 3
}

/// Kernel code segment selector (descriptor 1).
pub const KERNEL_CODE_SELECTOR: u16 = selector(1);

/// Kernel data segment selector (descriptor 2).
pub const KERNEL_DATA_SELECTOR: u16 = selector(2);

/// Builds the seven descriptors in their fixed table order.
///
/// All six non-null segments are flat 4 GiB overlays; the privilege level
/// in the access byte is the only thing separating kernel from user.
pub const fn build_entries() -> [GdtEntry; GDT_SIZE] {
    [
        GdtEntry::null(),
        GdtEntry::new(0, 0xFFFF_FFFF, Access::KERNEL_CODE, FLAGS_4K_32BIT),
        GdtEntry::new(0, 0xFFFF_FFFF, Access::KERNEL_DATA, FLAGS_4K_32BIT),
        GdtEntry::new(0, 0xFFFF_FFFF, Access::KERNEL_DATA, FLAGS_4K_32BIT),
        GdtEntry::new(0, 0xFFFF_FFFF, Access::USER_CODE, FLAGS_4K_32BIT),
        GdtEntry::new(0, 0xFFFF_FFFF, Access::USER_DATA, FLAGS_4K_32BIT),
        GdtEntry::new(0, 0xFFFF_FFFF, Access::USER_DATA, FLAGS_4K_32BIT),
    ]
}

/// The live table. Written once by [`init`] before the load.
#[cfg(target_arch = "x86")]
#[link_section = ".gdt"]
static mut GDT_ENTRIES: [GdtEntry; GDT_SIZE] = [GdtEntry::null(); GDT_SIZE];

/// Builds the table, registers it with the CPU, and reloads every segment
/// register.
///
/// Must run exactly once, before anything depends on the new segments.
/// There is no failure path: a bad descriptor faults on the next memory
/// access instead of reporting an error here.
#[cfg(target_arch = "x86")]
pub fn init() {
    // SAFETY: single-threaded boot path; nothing else touches the static,
    // and the load sequence below completes before init returns.
    unsafe {
        GDT_ENTRIES = build_entries();
        let table = &*(&raw const GDT_ENTRIES);
        let pointer = DescriptorPointer::for_table(table);
        load(&pointer);
        reload_segments();
    }
    log::info!("GDT loaded: {GDT_SIZE} descriptors");
}

/// Registers the table handle with the CPU.
///
/// # Safety
///
/// `pointer` must describe a fully written descriptor table; every
/// segment register reload after this call is resolved against it.
#[cfg(target_arch = "x86")]
unsafe fn load(pointer: &DescriptorPointer) {
    core::arch::asm!(
        "lgdt [{0}]",
        in(reg) pointer as *const DescriptorPointer,
        options(readonly, nostack, preserves_flags),
    );
}

/// Reloads DS/ES/FS/GS/SS with the kernel data selector, then far-jumps
/// to reload CS. The jump also discards anything prefetched under the old
/// code segment.
///
/// # Safety
///
/// The new table must already be registered and its kernel code/data
/// descriptors must cover the executing code and stack.
#[cfg(target_arch = "x86")]
unsafe fn reload_segments() {
    core::arch::asm!(
        "mov ds, ax",
        "mov es, ax",
        "mov fs, ax",
        "mov gs, ax",
        "mov ss, ax",
        in("ax") KERNEL_DATA_SELECTOR,
        options(nostack, preserves_flags),
    );
    core::arch::asm!(
        "ljmp ${sel}, $2f",
        "2:",
        sel = const KERNEL_CODE_SELECTOR,
        options(att_syntax),
    );
}
