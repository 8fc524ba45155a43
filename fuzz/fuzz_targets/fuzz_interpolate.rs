#![no_main]

use libfuzzer_sys::fuzz_target;
use stack_rotate::infrastructure::compose::interpolate;
use stack_rotate::Environment;

fuzz_target!(|data: &[u8]| {
    if let Ok(template) = std::str::from_utf8(data) {
        let env: Environment = [("STACK", "demo"), ("EMPTY", "")].into_iter().collect();
        // Interpolation should never panic
        let _ = interpolate(template, &env);
    }
});
