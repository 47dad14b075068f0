use std::sync::Arc;

use chunkstore::catalog;
use chunkstore::operator::{GetTable, Operator, ScanType, TableScan};
use chunkstore::types::{ChunkId, ColumnId, DataType};
use chunkstore::{AllTypeVariant, Table};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

fn build_table(name: &str, rows: usize, compressed: bool) -> Arc<Table> {
    let _ = catalog::drop_table(name);
    let mut table = Table::new(rows.max(1));
    table.add_column("n", DataType::Int32, false).unwrap();
    for i in 0..rows {
        table
            .append(&[AllTypeVariant::Int32((i % 1000) as i32)])
            .unwrap();
    }
    if compressed {
        table.compress_chunk(ChunkId(0)).unwrap();
    }
    catalog::add_table(name, table).unwrap()
}

fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_scan_eq");
    for &rows in &[10_000usize, 100_000] {
        for compressed in [false, true] {
            let name = format!("bench_scan_{rows}_{compressed}");
            build_table(&name, rows, compressed);
            let label = if compressed { "dictionary" } else { "value" };
            group.bench_with_input(
                BenchmarkId::new(label, rows),
                &name,
                |b, name| {
                    b.iter(|| {
                        let get = Arc::new(GetTable::new(name.clone()));
                        get.execute().unwrap();
                        let scan =
                            TableScan::new(get, ColumnId(0), ScanType::Eq, AllTypeVariant::Int32(500));
                        scan.execute().unwrap();
                        scan.get_output().unwrap()
                    });
                },
            );
            catalog::drop_table(&name).unwrap();
        }
    }
    group.finish();
}

criterion_group!(benches, bench_scan);
criterion_main!(benches);
