//! Experimental WebAssembly emitter.
//!
//! Produces a fixed module exporting `add: (i32, i32) -> i32`. The parsed
//! program is accepted but not consulted yet; code generation from real
//! programs is out of scope for the front-end, so this stays a placeholder
//! for wiring up the binary pipeline end to end.

use sunaba_syntax::Program;

/// Emit a WebAssembly module for the given program.
///
/// The output is currently independent of `program`: a module with a single
/// exported function `add` that returns the sum of its two i32 arguments.
pub fn emit_module(_program: &Program) -> Vec<u8> {
    let mut module = Vec::new();
    // Preamble: magic number and version.
    module.extend_from_slice(b"\0asm");
    module.extend_from_slice(&[0x01, 0x00, 0x00, 0x00]);
    // Type section: one function type, (i32, i32) -> i32.
    module.extend_from_slice(&[0x01, 0x07, 0x01, 0x60, 0x02, 0x7f, 0x7f, 0x01, 0x7f]);
    // Function section: one function using type 0.
    module.extend_from_slice(&[0x03, 0x02, 0x01, 0x00]);
    // Export section: "add" -> function 0.
    module.extend_from_slice(&[0x07, 0x07, 0x01, 0x03, b'a', b'd', b'd', 0x00, 0x00]);
    // Code section: local.get 0; local.get 1; i32.add; end.
    module.extend_from_slice(&[0x0a, 0x09, 0x01, 0x07, 0x00, 0x20, 0x00, 0x20, 0x01, 0x6a, 0x0b]);
    module
}
