use std::fmt::Write as _;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use lineage_core::graph::{ancestors, descendants};
use lineage_core::writer::to_gedcom_string;
use lineage_core::parse_str;

/// Sizes (number of couples) for the synthetic pedigree.
const TIERS: &[(&str, usize)] = &[("small", 50), ("medium", 500), ("large", 5_000)];

/// A chain of couples, each couple's first child marrying into the next
/// couple. Every family also has two extra children and a marriage event.
fn synthetic_pedigree(couples: usize) -> String {
    let mut out = String::from(
        "0 HEAD\n1 SOUR bench\n1 GEDC\n2 VERS 5.5\n1 CHAR UTF-8\n1 SUBM @U@\n0 @U@ SUBM\n1 NAME bench\n",
    );
    for idx in 0..couples {
        let _ = write!(
            out,
            "0 @H{idx}@ INDI\n1 NAME Husband{idx} /Line{}/\n1 BIRT\n2 DATE 1 JAN 1900\n\
             0 @W{idx}@ INDI\n1 NAME Wife{idx} /Other{idx}/\n\
             0 @A{idx}@ INDI\n1 NAME Extra{idx} /Line{}/\n\
             0 @B{idx}@ INDI\n1 NAME Spare{idx} /Line{}/\n1 NOTE a long note that\n2 CONC  keeps going\n2 CONT on a new line\n",
            idx % 7,
            idx % 7,
            idx % 7,
        );
    }
    for idx in 0..couples {
        let _ = write!(
            out,
            "0 @F{idx}@ FAM\n1 HUSB @H{idx}@\n1 WIFE @W{idx}@\n1 MARR\n2 DATE 12 JUN 1920\n2 PLAC Leeds\n"
        );
        if idx + 1 < couples {
            let _ = writeln!(out, "1 CHIL @H{}@", idx + 1);
        }
        let _ = write!(out, "1 CHIL @A{idx}@\n1 CHIL @B{idx}@\n");
    }
    out.push_str("0 TRLR\n");
    out
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for &(name, couples) in TIERS {
        let source = synthetic_pedigree(couples);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::new("parse_str", name), &source, |b, source| {
            b.iter(|| black_box(parse_str(source)));
        });
    }
    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("traversal");
    for &(name, couples) in TIERS {
        let doc = parse_str(&synthetic_pedigree(couples)).expect("synthetic pedigree parses");
        let root = doc.find_by_name("Husband0", "Line0").expect("root exists");
        let leaf = doc
            .find_by_name(&format!("Extra{}", couples - 1), &format!("Line{}", (couples - 1) % 7))
            .expect("leaf exists");

        group.bench_with_input(BenchmarkId::new("descendants", name), &doc, |b, doc| {
            b.iter(|| black_box(descendants(doc, root, 0)));
        });
        group.bench_with_input(BenchmarkId::new("ancestors", name), &doc, |b, doc| {
            b.iter(|| black_box(ancestors(doc, leaf, 0)));
        });
        group.bench_with_input(BenchmarkId::new("write", name), &doc, |b, doc| {
            b.iter(|| black_box(to_gedcom_string(doc)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_queries);
criterion_main!(benches);
