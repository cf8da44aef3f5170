#![no_main]

use libfuzzer_sys::fuzz_target;
use lineage_core::graph;

// Arbitrary text must yield a document or an error, never a panic, and
// traversals over whatever parses must terminate.
fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let Ok(doc) = lineage_core::parse_str(&text) else {
        return;
    };
    for (id, _) in doc.iter_individuals() {
        let _ = graph::descendants(&doc, id, 0);
        let _ = graph::ancestors(&doc, id, 0);
    }
});
