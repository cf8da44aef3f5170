#![no_main]

use libfuzzer_sys::fuzz_target;
use lineage_core::writer::to_gedcom_string;

// Anything that parses must write, and the written form must parse back to
// the same number of people and families.
fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let Ok(doc) = lineage_core::parse_str(&text) else {
        return;
    };
    let written = to_gedcom_string(&doc).expect("parsed documents always write");
    let back = lineage_core::parse_str(&written).expect("written documents always parse");
    assert_eq!(back.individuals().len(), doc.individuals().len());
    assert_eq!(back.families().len(), doc.families().len());
});
