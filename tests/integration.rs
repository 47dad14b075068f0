use std::sync::Arc;

use chunkstore::catalog;
use chunkstore::operator::{GetTable, Operator, ScanType, TableScan};
use chunkstore::segment::{DictionarySegment, ValueSegment};
use chunkstore::types::{ChunkId, ColumnId, DataType};
use chunkstore::{AllTypeVariant, Table};

fn int_column_table(name: &str, target_chunk_size: usize, values: &[i32]) -> Arc<Table> {
    let mut table = Table::new(target_chunk_size);
    table.add_column("n", DataType::Int32, false).unwrap();
    for v in values {
        table.append(&[AllTypeVariant::Int32(*v)]).unwrap();
    }
    catalog::add_table(name, table).unwrap()
}

#[test]
fn append_rolls_chunks_at_the_target_size() {
    let table = int_column_table("it_rolls_chunks", 3, &[1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(table.chunk_count(), 3);
    assert_eq!(table.row_count(), 7);
    catalog::drop_table("it_rolls_chunks").unwrap();
}

#[test]
fn compress_chunk_keeps_every_row_readable_and_deduplicates_the_dictionary() {
    let table = int_column_table("it_compress", 100, &[5, 1, 5, 3, 1, 5]);
    catalog::drop_table("it_compress").unwrap();
    let mut owned = Arc::try_unwrap(table).unwrap();
    owned.compress_chunk(ChunkId(0)).unwrap();

    let chunk = owned.get_chunk(ChunkId(0)).unwrap();
    let segment = chunk.get_segment(ColumnId(0));
    let expected = [5, 1, 5, 3, 1, 5];
    for (i, v) in expected.iter().enumerate() {
        assert_eq!(segment.index(i), AllTypeVariant::Int32(*v));
    }
}

#[test]
fn table_scan_equality_returns_only_matching_rows() {
    let table_name = "it_scan_eq";
    int_column_table(table_name, 100, &[10, 20, 30, 20, 10]);

    let get = Arc::new(GetTable::new(table_name));
    get.execute().unwrap();
    let scan = TableScan::new(get, ColumnId(0), ScanType::Eq, AllTypeVariant::Int32(20));
    scan.execute().unwrap();

    let output = scan.get_output().unwrap();
    assert_eq!(output.row_count(), 2);
    catalog::drop_table(table_name).unwrap();
}

#[test]
fn table_scan_composes_into_scan_of_scan() {
    let table_name = "it_scan_chain";
    int_column_table(table_name, 100, &[1, 5, 10, 15, 20, 25, 30]);

    let get = Arc::new(GetTable::new(table_name));
    get.execute().unwrap();
    let above_five = Arc::new(TableScan::new(
        get,
        ColumnId(0),
        ScanType::Gt,
        AllTypeVariant::Int32(5),
    ));
    above_five.execute().unwrap();
    let below_twenty_five = TableScan::new(
        above_five,
        ColumnId(0),
        ScanType::Lt,
        AllTypeVariant::Int32(25),
    );
    below_twenty_five.execute().unwrap();

    // 10, 15, 20 satisfy 5 < n < 25.
    assert_eq!(below_twenty_five.get_output().unwrap().row_count(), 3);
    catalog::drop_table(table_name).unwrap();
}

#[test]
fn get_output_before_execute_is_rejected() {
    let get = GetTable::new("it_never_registered");
    assert!(get.get_output().is_err());
}

#[test]
fn catalog_rejects_duplicate_table_names() {
    let table_name = "it_duplicate";
    catalog::add_table(table_name, Table::new(8)).unwrap();
    assert!(catalog::add_table(table_name, Table::new(8)).is_err());
    catalog::drop_table(table_name).unwrap();
}

#[test]
fn dictionary_roundtrip_on_a_nullable_string_column() {
    let names = ["Bill", "Steve", "Alexander", "Steve", "Hasso", "Bill"];
    let mut seg: ValueSegment<String> = ValueSegment::new(true);
    for n in names {
        seg.append(Some(n.to_string())).unwrap();
    }
    seg.append(None).unwrap();

    let dict = DictionarySegment::encode(&seg).unwrap();
    assert_eq!(dict.len(), 7);
    assert_eq!(dict.unique_values_count(), 4);
    assert_eq!(
        dict.dictionary(),
        &["Alexander", "Bill", "Hasso", "Steve"].map(str::to_string)
    );
    assert_eq!(dict.value_id_of(6) as usize, dict.unique_values_count());
    assert_eq!(dict.get_typed_value(6), AllTypeVariant::Null);
    assert!(dict.get(6).is_err());
}

#[test]
fn table_rolls_chunks_at_the_configured_target_size() {
    let table_name = "it_chunking_scenario";
    let mut table = Table::new(2);
    table.add_column("n", DataType::Int32, false).unwrap();
    table.add_column("s", DataType::String, false).unwrap();
    table
        .append(&[AllTypeVariant::Int32(4), AllTypeVariant::String("Hello,".into())])
        .unwrap();
    table
        .append(&[AllTypeVariant::Int32(6), AllTypeVariant::String("world".into())])
        .unwrap();
    table
        .append(&[AllTypeVariant::Int32(3), AllTypeVariant::String("!".into())])
        .unwrap();

    assert_eq!(table.chunk_count(), 2);
    assert_eq!(table.get_chunk(ChunkId(0)).unwrap().size(), 2);
    assert_eq!(table.get_chunk(ChunkId(1)).unwrap().size(), 1);
    assert_eq!(table.row_count(), 3);
    catalog::add_table(table_name, table).unwrap();
    catalog::drop_table(table_name).unwrap();
}
