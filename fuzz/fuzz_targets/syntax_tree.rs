#![no_main]
use engine::{analyze, RuleConfiguration};
use ir::{SyntaxTree, TypeTable};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(tree) = SyntaxTree::from_json(s) {
            let _ = analyze(&tree, &TypeTable::new(), &RuleConfiguration::default());
        }
    }
});
