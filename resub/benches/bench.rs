use criterion::{black_box, criterion_group, criterion_main, Criterion};
use resub::{Regex, RuleSet};

fn bench_compile(c: &mut Criterion) {
    c.bench_function("compile_address_pattern", |b| {
        b.iter(|| Regex::new(black_box("^([^!]+)@([^!@]+)$")).unwrap())
    });
}

fn bench_exec(c: &mut Criterion) {
    let re = Regex::new("^([^!]+)@([^!@]+)$").unwrap();
    let input = "some.rather.long.user.name@an.example.host";

    c.bench_function("exec_address", |b| {
        b.iter(|| black_box(re.exec(black_box(input))))
    });
}

fn bench_exec_unanchored_scan(c: &mut Criterion) {
    let re = Regex::new("net!(coma|research|pipe)").unwrap();
    let input = "x".repeat(256) + "net!research";

    c.bench_function("exec_scan", |b| {
        b.iter(|| black_box(re.exec(black_box(&input))))
    });
}

fn bench_rule_table(c: &mut Criterion) {
    let rules = RuleSet::from_pairs([
        ("^[^!@]+$", "/bin/upas/aliasmail '&'"),
        ("^local!(.*)$", r"/mail/box/\1/mbox"),
        ("^([^!]+)@([^!@]+)$", r"\2!\1"),
        ("^.*$", "inet!&"),
    ])
    .unwrap();

    c.bench_function("rewrite_first_match", |b| {
        b.iter(|| black_box(rules.rewrite(black_box("joe@example"))))
    });
}

fn bench_pathological(c: &mut Criterion) {
    let re = Regex::new("a?a?a?a?a?a?a?a?a?a?aaaaaaaaaa").unwrap();
    let input = "aaaaaaaaa"; // one 'a' short, worst case

    c.bench_function("pathological_no_match", |b| {
        b.iter(|| black_box(re.exec(black_box(input))))
    });
}

criterion_group!(
    benches,
    bench_compile,
    bench_exec,
    bench_exec_unanchored_scan,
    bench_rule_table,
    bench_pathological,
);
criterion_main!(benches);
