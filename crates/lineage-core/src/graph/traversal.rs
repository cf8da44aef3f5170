//! Generation-bounded ancestor and descendant search.
//!
//! Results come back as [`Generations`]: one bucket per generation, closest
//! first. Each bucket is sorted by surname, then given name, and holds
//! cloned [`Individual`]s, so results can be kept or changed without
//! touching the source document.
//!
//! # Walk
//!
//! - **Descendants**: every family in which a frontier person is husband or
//!   wife contributes its children to the next generation.
//! - **Ancestors**: every family in which a frontier person is a child (and
//!   not also a spouse) contributes its husband and wife.
//!
//! The walk is breadth-first, so a person reachable along several lines
//! appears once, in the closest generation. Each family is entered at most
//! once per query, which also stops the walk on malformed cyclic input.
//!
//! Under pedigree collapse (cousins or an uncle and niece marrying) a
//! relative is therefore not listed again at the farther distance, and the
//! families above or below them are not walked a second time.
//!
//! # Bound
//!
//! `max_generations == 0` means unbounded; otherwise at most that many
//! buckets are produced and families beyond the bound are never visited.

#![allow(clippy::must_use_candidate)]

use std::collections::HashSet;

use crate::model::{Document, Family, FamilyId, Individual, IndividualId};

/// Generation buckets, closest generation first. Empty buckets never occur.
pub type Generations = Vec<Vec<Individual>>;

/// Which way a traversal walks the family graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Descendants,
    Ancestors,
}

impl Direction {
    /// Whether `person` leads into `family` in this direction.
    fn enters(self, family: &Family, person: IndividualId) -> bool {
        match self {
            Self::Descendants => family.is_spouse(person),
            Self::Ancestors => family.has_child(person) && !family.is_spouse(person),
        }
    }

    /// The people `family` contributes to the next generation.
    fn relatives(self, family: &Family) -> Vec<IndividualId> {
        match self {
            Self::Descendants => family.children().to_vec(),
            Self::Ancestors => family.spouses().collect(),
        }
    }
}

/// Descendants of `start`, bucketed by generation.
pub fn descendants(doc: &Document, start: IndividualId, max_generations: usize) -> Generations {
    generations(doc, start, max_generations, Direction::Descendants)
}

/// Ancestors of `start`, bucketed by generation.
pub fn ancestors(doc: &Document, start: IndividualId, max_generations: usize) -> Generations {
    generations(doc, start, max_generations, Direction::Ancestors)
}

/// Every descendant of `start` as one flat list, closest generation first.
pub fn all_descendants(doc: &Document, start: IndividualId) -> Vec<Individual> {
    descendants(doc, start, 0).into_iter().flatten().collect()
}

/// Walk from `start` in `direction`.
///
/// An unknown `start` handle yields no generations.
pub fn generations(
    doc: &Document,
    start: IndividualId,
    max_generations: usize,
    direction: Direction,
) -> Generations {
    let mut result = Generations::new();
    let mut visited: HashSet<FamilyId> = HashSet::new();
    let mut placed: HashSet<IndividualId> = HashSet::new();
    let mut frontier = vec![start];

    while !frontier.is_empty() && (max_generations == 0 || result.len() < max_generations) {
        let mut next = Vec::new();

        for &person_id in &frontier {
            let Some(person) = doc.individual(person_id) else {
                continue;
            };
            for &family_id in person.families() {
                let Some(family) = doc.family(family_id) else {
                    continue;
                };
                if !direction.enters(family, person_id) || !visited.insert(family_id) {
                    continue;
                }
                for relative in direction.relatives(family) {
                    if relative != start && placed.insert(relative) {
                        next.push(relative);
                    }
                }
            }
        }

        if next.is_empty() {
            break;
        }

        let mut bucket: Vec<Individual> = next
            .iter()
            .filter_map(|&id| doc.individual(id))
            .cloned()
            .collect();
        bucket.sort_by(Individual::cmp_by_name);
        result.push(bucket);
        frontier = next;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_str;

    fn names(generations: &Generations) -> Vec<Vec<String>> {
        generations
            .iter()
            .map(|bucket| bucket.iter().map(Individual::full_name).collect())
            .collect()
    }

    /// Three generations:
    ///
    /// ```text
    /// Walter Smith + Edith Brown
    ///        |
    /// John Smith + Jane Doe          Carl Doe + Rita Roe
    ///        |                           |
    ///   Bob, Amy Smith              (Jane Doe)
    ///        |
    /// Bob Smith + Zoe Adams
    ///        |
    ///   Cal Smith
    /// ```
    const TREE: &str = "\
0 HEAD
1 SOUR test
1 GEDC
2 VERS 5.5
1 CHAR ASCII
1 SUBM @U@
0 @U@ SUBM
1 NAME tester
0 @I1@ INDI
1 NAME John /Smith/
0 @I2@ INDI
1 NAME Jane /Doe/
0 @I3@ INDI
1 NAME Bob /Smith/
0 @I4@ INDI
1 NAME Amy /Smith/
0 @I5@ INDI
1 NAME Walter /Smith/
0 @I6@ INDI
1 NAME Edith /Brown/
0 @I7@ INDI
1 NAME Zoe /Adams/
0 @I8@ INDI
1 NAME Cal /Smith/
0 @I9@ INDI
1 NAME Carl /Doe/
0 @I10@ INDI
1 NAME Rita /Roe/
0 @F1@ FAM
1 HUSB @I1@
1 WIFE @I2@
1 CHIL @I3@
1 CHIL @I4@
0 @F2@ FAM
1 HUSB @I5@
1 WIFE @I6@
1 CHIL @I1@
0 @F3@ FAM
1 HUSB @I3@
1 WIFE @I7@
1 CHIL @I8@
0 @F4@ FAM
1 HUSB @I9@
1 WIFE @I10@
1 CHIL @I2@
0 TRLR
";

    fn tree() -> Document {
        parse_str(TREE).expect("tree parses")
    }

    fn id(doc: &Document, given: &str, surname: &str) -> IndividualId {
        doc.find_by_name(given, surname).expect("person exists")
    }

    #[test]
    fn direct_children_sorted() {
        let doc = tree();
        let result = descendants(&doc, id(&doc, "John", "Smith"), 1);
        assert_eq!(names(&result), vec![vec!["Amy Smith", "Bob Smith"]]);
    }

    #[test]
    fn unbounded_descendants() {
        let doc = tree();
        let result = descendants(&doc, id(&doc, "Walter", "Smith"), 0);
        assert_eq!(
            names(&result),
            vec![
                vec!["John Smith"],
                vec!["Amy Smith", "Bob Smith"],
                vec!["Cal Smith"],
            ]
        );
    }

    #[test]
    fn bound_limits_generations() {
        let doc = tree();
        let result = descendants(&doc, id(&doc, "Walter", "Smith"), 2);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn spouse_sees_same_children() {
        let doc = tree();
        let via_john = descendants(&doc, id(&doc, "John", "Smith"), 0);
        let via_jane = descendants(&doc, id(&doc, "Jane", "Doe"), 0);
        assert_eq!(via_john, via_jane);
    }

    #[test]
    fn ancestors_by_generation() {
        let doc = tree();
        let result = ancestors(&doc, id(&doc, "Cal", "Smith"), 0);
        assert_eq!(
            names(&result),
            vec![
                vec!["Zoe Adams", "Bob Smith"],
                vec!["Jane Doe", "John Smith"],
                vec!["Edith Brown", "Carl Doe", "Rita Roe", "Walter Smith"],
            ]
        );
    }

    #[test]
    fn ancestors_bounded() {
        let doc = tree();
        let result = ancestors(&doc, id(&doc, "Cal", "Smith"), 1);
        assert_eq!(names(&result), vec![vec!["Zoe Adams", "Bob Smith"]]);
    }

    #[test]
    fn person_without_family_yields_nothing() {
        let doc = tree().with_individual(Individual::new("Lone", "Wolf"));
        let lone = id(&doc, "Lone", "Wolf");
        assert!(descendants(&doc, lone, 0).is_empty());
        assert!(ancestors(&doc, lone, 0).is_empty());
    }

    #[test]
    fn leaf_has_no_descendants_and_root_no_ancestors() {
        let doc = tree();
        assert!(descendants(&doc, id(&doc, "Cal", "Smith"), 0).is_empty());
        assert!(ancestors(&doc, id(&doc, "Walter", "Smith"), 0).is_empty());
    }

    #[test]
    fn unknown_start_yields_nothing() {
        let doc = tree();
        assert!(descendants(&doc, IndividualId(999), 0).is_empty());
    }

    #[test]
    fn results_are_independent_copies() {
        let doc = tree();
        let before = doc.clone();
        let start = id(&doc, "Walter", "Smith");
        let mut first = descendants(&doc, start, 0);
        first[0].clear();
        let second = descendants(&doc, start, 0);
        assert_eq!(second[0].len(), 1);
        assert_eq!(doc, before);
    }

    #[test]
    fn flat_descendants() {
        let doc = tree();
        let flat: Vec<String> = all_descendants(&doc, id(&doc, "Walter", "Smith"))
            .iter()
            .map(Individual::full_name)
            .collect();
        assert_eq!(flat, ["John Smith", "Amy Smith", "Bob Smith", "Cal Smith"]);
    }

    #[test]
    fn cyclic_input_terminates() {
        // A is a child in the family where B is husband, and B is a child in
        // the family where A is husband.
        let source = "\
0 HEAD
1 SOUR t
1 GEDC
2 VERS 5.5
1 CHAR ASCII
1 SUBM @U@
0 @U@ SUBM
1 NAME t
0 @A@ INDI
1 NAME A /A/
0 @B@ INDI
1 NAME B /B/
0 @F1@ FAM
1 HUSB @A@
1 CHIL @B@
0 @F2@ FAM
1 HUSB @B@
1 CHIL @A@
0 TRLR
";
        let doc = parse_str(source).expect("parses");
        let a = id(&doc, "A", "A");
        assert_eq!(names(&descendants(&doc, a, 0)), vec![vec!["B B"]]);
        assert_eq!(names(&ancestors(&doc, a, 0)), vec![vec!["B B"]]);
    }

    #[test]
    fn collapsed_pedigree_lists_each_relative_once_at_the_closest_distance() {
        // Paul marries his niece Nell, so Kit is both Gus's grandchild and
        // his great-grandchild.
        let source = "\
0 HEAD
1 SOUR t
1 GEDC
2 VERS 5.5
1 CHAR ASCII
1 SUBM @U@
0 @U@ SUBM
1 NAME t
0 @G@ INDI
1 NAME Gus /Hale/
0 @W@ INDI
1 NAME Wyn /Hale/
0 @P1@ INDI
1 NAME Paul /Hale/
0 @P2@ INDI
1 NAME Pia /Hale/
0 @Y@ INDI
1 NAME Yul /Kerr/
0 @N@ INDI
1 NAME Nell /Kerr/
0 @K@ INDI
1 NAME Kit /Hale/
0 @F1@ FAM
1 HUSB @G@
1 WIFE @W@
1 CHIL @P1@
1 CHIL @P2@
0 @F2@ FAM
1 HUSB @Y@
1 WIFE @P2@
1 CHIL @N@
0 @F3@ FAM
1 HUSB @P1@
1 WIFE @N@
1 CHIL @K@
0 TRLR
";
        let doc = parse_str(source).expect("parses");

        let gus = id(&doc, "Gus", "Hale");
        assert_eq!(
            names(&descendants(&doc, gus, 0)),
            vec![vec!["Paul Hale", "Pia Hale"], vec!["Kit Hale", "Nell Kerr"]]
        );

        let kit = id(&doc, "Kit", "Hale");
        assert_eq!(
            names(&ancestors(&doc, kit, 0)),
            vec![
                vec!["Paul Hale", "Nell Kerr"],
                vec!["Gus Hale", "Pia Hale", "Wyn Hale", "Yul Kerr"],
            ]
        );
    }

    #[test]
    fn person_in_own_family_as_spouse_and_child_is_not_their_own_ancestor() {
        let source = "\
0 HEAD
1 SOUR t
1 GEDC
2 VERS 5.5
1 CHAR ASCII
1 SUBM @U@
0 @U@ SUBM
1 NAME t
0 @A@ INDI
1 NAME A /A/
0 @F1@ FAM
1 HUSB @A@
1 CHIL @A@
0 TRLR
";
        let doc = parse_str(source).expect("parses");
        let a = id(&doc, "A", "A");
        assert!(ancestors(&doc, a, 0).is_empty());
        assert!(descendants(&doc, a, 0).is_empty());
    }
}
