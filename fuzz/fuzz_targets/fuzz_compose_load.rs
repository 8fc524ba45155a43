#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;
use stack_rotate::{rewrite, ComposeDocument, ComposeLoader, ConfigPrefix, Environment};

fuzz_target!(|data: &[u8]| {
    let env: Environment = [("TAG", "1.25"), ("EMPTY", "")].into_iter().collect();

    // Loading arbitrary bytes must never panic
    let Ok(doc) = ComposeLoader::new(&env).load_bytes(data, Path::new("fuzz.yml")) else {
        return;
    };

    // A document that loads must survive a rewrite and a render round trip
    if let Ok(out) = rewrite(&doc, &ConfigPrefix::new("fuzz_1_")) {
        let rendered = out.to_yaml().expect("rewritten document renders");
        let value = serde_yaml_ng::from_str(&rendered).expect("rendered YAML parses");
        let reparsed = ComposeDocument::from_value(value).expect("rendered document loads");
        assert_eq!(reparsed.configs().len(), doc.configs().len());
    }
});
