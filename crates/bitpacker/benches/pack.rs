use std::collections::BTreeMap;

use bitpacker::{
    BitPack, DynamicRecord, FieldDescriptor, Layout, PackMode, PrimType, Schema, Value, bitpack,
};
use criterion::{Criterion, criterion_group, criterion_main};

bitpack! {
    #[derive(Debug, Default, Clone, PartialEq)]
    struct Telemetry: CompactBools {
        timestamp: u64,
        sequence: u32,
        altitude: f32,
        heading: i16,
        channel: u8,
        armed: bool,
        gps_lock: bool,
        low_battery: bool,
    }
}

fn gen_fields(field_count: usize) -> Vec<FieldDescriptor> {
    (0..field_count)
        .map(|i| {
            // Every fourth field is a flag.
            let ty = if i % 4 == 3 { PrimType::Bool } else { PrimType::U16 };
            FieldDescriptor::new(format!("f{}", i), ty)
        })
        .collect()
}

fn gen_record(fields: &[FieldDescriptor]) -> DynamicRecord {
    fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let value = if field.ty.is_bool() {
                Value::Bool(i % 3 == 0)
            } else {
                // Deterministic but non-trivial pattern
                Value::U16((i * 31 % 65536) as u16)
            };
            (field.name.clone(), value)
        })
        .collect::<BTreeMap<_, _>>()
}

fn bench_compile(c: &mut Criterion) {
    for &field_count in &[1usize, 10, 50, 100] {
        let fields = gen_fields(field_count);

        c.bench_function(&format!("compile_{}_fields", field_count), |b| {
            b.iter(|| {
                let _ = Layout::compile(&fields, PackMode::CompactBools).unwrap();
            })
        });
    }
}

fn bench_schema(c: &mut Criterion) {
    for &field_count in &[1usize, 10, 50, 100] {
        let fields = gen_fields(field_count);
        let schema = Schema::compile(&fields, PackMode::CompactBools).unwrap();
        let record = gen_record(&fields);
        let packet = schema.encode(&record).unwrap();

        c.bench_function(&format!("encode_{}_fields", field_count), |b| {
            b.iter(|| {
                let _ = schema.encode(&record).unwrap();
            })
        });

        c.bench_function(&format!("parse_{}_fields", field_count), |b| {
            b.iter(|| {
                let _ = schema.parse(&packet, 0).unwrap();
            })
        });
    }
}

fn bench_typed(c: &mut Criterion) {
    let record = Telemetry {
        timestamp: 1_700_000_000_000,
        sequence: 42,
        altitude: 1234.5,
        heading: -90,
        channel: 7,
        armed: true,
        gps_lock: true,
        low_battery: false,
    };
    let size = Telemetry::total_bytes().unwrap();
    let mut buffer = vec![0u8; size * 64];

    c.bench_function("typed_write_to_byte_array", |b| {
        b.iter(|| {
            for slot in buffer.chunks_exact_mut(size) {
                slot.fill(0);
                record.write_to_byte_array(slot, 0).unwrap();
            }
        })
    });

    c.bench_function("typed_from_bytes", |b| {
        b.iter(|| {
            for offset in (0..buffer.len()).step_by(size) {
                let _ = Telemetry::from_bytes(&buffer, offset).unwrap();
            }
        })
    });
}

criterion_group!(benches, bench_compile, bench_schema, bench_typed);
criterion_main!(benches);
