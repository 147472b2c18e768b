use std::{ptr, sync::Barrier, thread};

use bitpacker::{BitPack, FieldDescriptor, Layout, PackMode, PrimType, bitpack};
use proptest::{prelude::*, sample::subsequence};

const PRIMS: [PrimType; 12] = [
    PrimType::Bool,
    PrimType::I8,
    PrimType::U8,
    PrimType::I16,
    PrimType::U16,
    PrimType::I32,
    PrimType::U32,
    PrimType::I64,
    PrimType::U64,
    PrimType::F32,
    PrimType::F64,
    PrimType::Char16,
];

fn arb_mode() -> impl Strategy<Value = PackMode> {
    prop_oneof![Just(PackMode::NoCompaction), Just(PackMode::CompactBools)]
}

/// Uniquely named fields of random primitive types.
fn arb_fields() -> impl Strategy<Value = Vec<FieldDescriptor>> {
    let names: Vec<String> = (0..40).map(|i| format!("field_{i}")).collect();
    subsequence(names, 0..40).prop_flat_map(|names| {
        let count = names.len();
        proptest::collection::vec(proptest::sample::select(PRIMS.to_vec()), count).prop_map(
            move |types| {
                names
                    .iter()
                    .zip(types)
                    .map(|(name, ty)| FieldDescriptor::new(name.clone(), ty))
                    .collect::<Vec<_>>()
            },
        )
    })
}

proptest! {
    #[test]
    fn layout_is_independent_of_declaration_order(
        (fields, shuffled) in arb_fields().prop_flat_map(|fields| {
            let shuffled = Just(fields.clone()).prop_shuffle();
            (Just(fields), shuffled)
        }),
        mode in arb_mode(),
    ) {
        let first = Layout::compile(&fields, mode).unwrap();
        let second = Layout::compile(&shuffled, mode).unwrap();

        prop_assert_eq!(first.total_size(), second.total_size());
        for placement in first.placements() {
            let other = second.get(&placement.name).unwrap();
            prop_assert_eq!(placement.offset, other.offset);
            prop_assert_eq!(placement.bit, other.bit);
            prop_assert_eq!(placement.size, other.size);
        }
    }

    #[test]
    fn total_size_matches_field_sizes(fields in arb_fields(), mode in arb_mode()) {
        let layout = Layout::compile(&fields, mode).unwrap();

        let bools = fields.iter().filter(|f| f.ty.is_bool()).count();
        let scalars: usize = fields
            .iter()
            .filter(|f| !f.ty.is_bool())
            .map(|f| f.backing_type().unwrap().size())
            .sum();
        let bool_bytes = match mode {
            PackMode::NoCompaction => bools,
            PackMode::CompactBools => bools.div_ceil(8),
        };

        prop_assert_eq!(layout.total_size(), scalars + bool_bytes);
    }

    #[test]
    fn placements_never_overlap(fields in arb_fields(), mode in arb_mode()) {
        let layout = Layout::compile(&fields, mode).unwrap();

        let mut last_end = 0;
        let mut last_slot = None;
        for placement in layout.placements() {
            prop_assert!(placement.offset + placement.size <= layout.total_size());
            if placement.is_bool() && mode == PackMode::CompactBools {
                let slot = (placement.offset, placement.bit);
                prop_assert!(last_slot < Some(slot));
                prop_assert!(placement.offset + 1 >= last_end);
                last_slot = Some(slot);
            } else {
                prop_assert!(placement.offset >= last_end);
            }
            last_end = last_end.max(placement.offset + placement.size);
        }
    }
}

bitpack! {
    #[derive(Debug, Default, Clone, PartialEq)]
    struct Contended: CompactBools {
        a: u64,
        b: bool,
        c: bool,
    }
}

#[test]
fn test_concurrent_first_use_compiles_once() {
    const THREADS: usize = 8;
    let barrier = Barrier::new(THREADS);

    let addresses: Vec<usize> = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|i| {
                let barrier = &barrier;
                scope.spawn(move || {
                    barrier.wait();
                    let record = Contended {
                        a: i as u64,
                        b: i % 2 == 0,
                        c: true,
                    };
                    let bytes = record.to_bytes().unwrap();
                    assert_eq!(Contended::from_bytes(&bytes, 0).unwrap(), record);
                    Contended::packer().unwrap() as *const _ as usize
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(addresses.windows(2).all(|pair| pair[0] == pair[1]));
    assert!(ptr::eq(
        Contended::packer().unwrap(),
        Contended::packer().unwrap()
    ));
}
