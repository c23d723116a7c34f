//! Full validation benchmarks
//!
//! Benchmarks the complete pipeline per language: parse -> model -> rules

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use motif_core::{JavaValidator, PatternService, ScriptValidator, VueValidator};

const TYPESCRIPT_SAMPLE: &str = r#"
class reportBuilder {
    constructor(source) { this.source = source; }

    Build_report(a, b, c, d, e, f) {
        const rows = this.source.fetch();
        const total_count = rows.length;
        return { rows, total_count };
    }
}

const unused_helper = 1;
function render(report) { return JSON.stringify(report); }
render(new reportBuilder([]).Build_report(1, 2, 3, 4, 5, 6));
"#;

const JAVA_SAMPLE: &str = r#"
public class SessionManager {
    private static final SessionManager INSTANCE = new SessionManager();

    private SessionManager() {}

    public static SessionManager getInstance() {
        return INSTANCE;
    }
}

public class SessionDao {
    public void insertSession(Session session) {}
    public Session getSession(String id) { return null; }
    public void updateSession(Session session) {}
    public void deleteSession(String id) {}
}
"#;

const VUE_SAMPLE: &str = r#"
<template>
  <div>
    <p v-for="entry in entries">{{ entry.label }}</p>
    <slot name="footer"></slot>
  </div>
</template>
<script>
export default {
  mixins: [trackingMixin],
  data() {
    return { entries: [], expanded: false }
  },
  methods: {
    toggle() { this.expanded = !this.expanded },
    track(entry) { this.$parent.record(entry) }
  },
  watch: {
    entries() { this.expanded = false }
  },
  beforeDestroy() {
    this.entries = []
  }
}
</script>
"#;

fn bench_validate_typescript(c: &mut Criterion) {
    let mut validator = ScriptValidator::default();

    c.bench_function("validate_typescript", |b| {
        b.iter(|| validator.validate(black_box(TYPESCRIPT_SAMPLE), black_box("report.ts")))
    });
}

fn bench_validate_java(c: &mut Criterion) {
    let mut validator = JavaValidator::default();

    c.bench_function("validate_java", |b| {
        b.iter(|| validator.validate(black_box(JAVA_SAMPLE), black_box("Sessions.java")))
    });
}

fn bench_validate_vue(c: &mut Criterion) {
    let validator = VueValidator::default();

    c.bench_function("validate_vue", |b| {
        b.iter(|| validator.validate(black_box(VUE_SAMPLE), black_box("EntryList.vue")))
    });
}

fn bench_dispatch_languages(c: &mut Criterion) {
    let mut service = PatternService::new();

    let samples = vec![
        ("typescript", TYPESCRIPT_SAMPLE),
        ("java", JAVA_SAMPLE),
        ("vue", VUE_SAMPLE),
    ];

    let mut group = c.benchmark_group("validate_code");

    for (language, source) in samples {
        group.bench_with_input(
            BenchmarkId::new("dispatch", language),
            &source,
            |b, source| b.iter(|| service.validate_code(black_box(language), black_box(source), None)),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_validate_typescript,
    bench_validate_java,
    bench_validate_vue,
    bench_dispatch_languages,
);

criterion_main!(benches);
