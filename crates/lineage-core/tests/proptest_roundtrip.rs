use proptest::prelude::*;

use lineage_core::graph::descendants;
use lineage_core::writer::{to_gedcom_string, write_document_with};
use lineage_core::{ErrorKind, config::ParserConfig, parse_str, parse_str_with};

use generators::*;

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(512))]

    #[test]
    fn generated_trees_parse_and_validate(tree in arb_tree()) {
        let doc = parse_str(&tree.render()).expect("generated tree parses");
        prop_assert_eq!(doc.individuals().len(), tree.people.len());
        prop_assert_eq!(doc.families().len(), tree.families.len());
        prop_assert!(doc.validate().is_ok());
    }

    #[test]
    fn write_then_parse_round_trips(tree in arb_tree()) {
        let doc = parse_str(&tree.render()).expect("generated tree parses");
        let back = parse_str(&to_gedcom_string(&doc).expect("write")).expect("reparse");

        prop_assert_eq!(&back.header().source, &doc.header().source);
        prop_assert!((back.header().version - doc.header().version).abs() < f64::EPSILON);
        prop_assert_eq!(back.header().encoding, doc.header().encoding);
        prop_assert_eq!(back.submitter(), doc.submitter());
        prop_assert_eq!(back.individuals(), doc.individuals());
        prop_assert_eq!(back.families(), doc.families());
    }

    #[test]
    fn narrow_writer_round_trips(tree in arb_tree(), width in 24usize..80) {
        let doc = parse_str(&tree.render()).expect("generated tree parses");
        let mut out = Vec::new();
        write_document_with(&doc, &mut out, width).expect("write");
        let text = String::from_utf8(out).expect("utf8");
        prop_assert!(text.lines().all(|l| l.chars().count() <= width));

        let config = ParserConfig { max_line_length: width, ..ParserConfig::default() };
        let back = parse_str_with(&text, &config).expect("reparse");
        prop_assert_eq!(back.submitter(), doc.submitter());
        prop_assert_eq!(back.families(), doc.families());
    }

    #[test]
    fn first_generation_is_exactly_the_children(tree in arb_tree()) {
        let doc = parse_str(&tree.render()).expect("generated tree parses");
        for (id, _) in doc.iter_individuals() {
            let mut expected: Vec<_> = doc
                .iter_families()
                .filter(|(_, f)| f.is_spouse(id))
                .flat_map(|(_, f)| f.children().to_vec())
                .filter(|&child| child != id)
                .collect();
            expected.sort_unstable();
            expected.dedup();

            let generations = descendants(&doc, id, 1);
            prop_assert!(generations.len() <= 1);
            let got = generations.first().map_or(0, Vec::len);
            prop_assert_eq!(got, expected.len());
            if let Some(bucket) = generations.first() {
                prop_assert!(bucket.windows(2).all(|w| w[0].cmp_by_name(&w[1]).is_le()));
            }
        }
    }

    #[test]
    fn queries_are_pure(tree in arb_tree()) {
        let doc = parse_str(&tree.render()).expect("generated tree parses");
        let before = doc.clone();
        for (id, _) in doc.iter_individuals() {
            prop_assert_eq!(descendants(&doc, id, 0), descendants(&doc, id, 0));
            prop_assert_eq!(
                lineage_core::graph::ancestors(&doc, id, 0),
                lineage_core::graph::ancestors(&doc, id, 0)
            );
        }
        prop_assert_eq!(doc, before);
    }

    #[test]
    fn arbitrary_text_never_panics(text in "(?s).{0,400}") {
        let _ = parse_str(&text);
    }

    #[test]
    fn arbitrary_lines_never_panic(lines in prop::collection::vec("[0-3] (@[A-Z0-9]{1,3}@ )?[A-Z]{1,5}( [ -~]{0,20})?", 0..30)) {
        let mut text = String::from("0 HEAD\n1 SOUR x\n1 GEDC\n2 VERS 5.5\n1 CHAR ASCII\n1 SUBM @U@\n");
        for line in &lines {
            text.push_str(line);
            text.push('\n');
        }
        let _ = parse_str(&text);
    }

    #[test]
    fn wrong_first_line_is_header_or_document_error(
        first in "([1-9] HEAD|0 [A-GI-Z][A-Z]{0,3}|0 @X@ HEAD)",
        rest in "(?s).{0,100}",
    ) {
        let err = parse_str(&format!("{first}\n{rest}")).expect_err("must fail");
        prop_assert!(matches!(err.kind(), ErrorKind::InvalidHeader | ErrorKind::InvalidDocument));
    }
}
