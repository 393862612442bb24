#![no_main]

use libfuzzer_sys::fuzz_target;
use sunaba_syntax::{parser, tokeniser};

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // Fuzz the tokeniser
        if let Ok(lines) = tokeniser::tokenise(s) {
            // If tokenising succeeds, fuzz the parser
            let _ = parser::parse(&lines);
        }
    }
});
