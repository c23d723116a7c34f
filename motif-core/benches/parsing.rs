//! Extraction benchmarks
//!
//! Run with: cargo bench --package motif-core

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use motif_core::vue::{extract_component, split};
use motif_core::{JavaExtractor, ScriptParser};

const TYPESCRIPT_SAMPLE: &str = r#"
import { OrderService } from '../services/order.service';
import { formatCurrency } from '../utils/format';

export class OrderSummary {
  constructor(private orders: OrderService) {}

  totalFor(customerId) {
    const orders = this.orders.listFor(customerId);
    let total = 0;
    for (const order of orders) {
      total += order.amount;
    }
    return formatCurrency(total);
  }

  recentFor(customerId, limit) {
    const orders = this.orders.listFor(customerId);
    return orders.slice(0, limit).map((order) => order.reference);
  }
}

function buildSummary(service) {
  return new OrderSummary(service);
}

buildSummary(new OrderService());
"#;

const JAVA_SAMPLE: &str = r#"
public class InvoiceRepository {
    private final DataSource dataSource;

    public InvoiceRepository(DataSource dataSource) {
        this.dataSource = dataSource;
    }

    public Invoice findById(long id) {
        return queryOne("SELECT * FROM invoices WHERE id = ?", id);
    }

    public List<Invoice> findOverdue() {
        return queryMany("SELECT * FROM invoices WHERE due < now()");
    }

    public void insertInvoice(Invoice invoice) {
        execute("INSERT INTO invoices VALUES (?)", invoice);
    }

    public void updateInvoice(Invoice invoice) {
        execute("UPDATE invoices SET total = ? WHERE id = ?", invoice);
    }

    public void deleteInvoice(long id) {
        execute("DELETE FROM invoices WHERE id = ?", id);
    }
}
"#;

const VUE_SAMPLE: &str = r#"
<template>
  <ul>
    <li v-for="invoice in invoices" :key="invoice.id">
      {{ invoice.reference }}
    </li>
  </ul>
</template>
<script>
export default {
  mixins: [currencyMixin],
  data() {
    return {
      invoices: [],
      loading: false
    }
  },
  methods: {
    refresh() { this.loading = true },
    select(invoice) { this.$emit('select', invoice.id) }
  },
  computed: {
    overdue() { return this.invoices.filter(i => i.overdue) }
  },
  beforeDestroy() {
    this.invoices = []
  }
}
</script>
"#;

fn bench_parse_typescript(c: &mut Criterion) {
    let mut parser = ScriptParser::new().unwrap();

    c.bench_function("parse_typescript_class", |b| {
        b.iter(|| parser.parse(black_box(TYPESCRIPT_SAMPLE)))
    });
}

fn bench_extract_java(c: &mut Criterion) {
    let mut extractor = JavaExtractor::default();

    c.bench_function("extract_java_classes", |b| {
        b.iter(|| extractor.extract(black_box(JAVA_SAMPLE)))
    });
}

fn bench_extract_vue(c: &mut Criterion) {
    c.bench_function("extract_vue_component", |b| {
        b.iter(|| {
            let blocks = split(black_box(VUE_SAMPLE)).unwrap();
            extract_component(blocks, black_box("InvoiceList.vue"))
        })
    });
}

criterion_group!(
    benches,
    bench_parse_typescript,
    bench_extract_java,
    bench_extract_vue,
);

criterion_main!(benches);
