/// ホットパスのベンチマーク：ビットマスク分解とエクステント照合

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use kbdrev::reverse::symbols::vk_flag_symbols;
use kbdrev::reverse::{Extent, ExtentList, MemoryImage, ValueFormatter};

fn bench_bit_mask(c: &mut Criterion) {
    let fmt = ValueFormatter::new(false);
    let table = vk_flag_symbols();
    c.bench_function("bit_mask mixed flags", |b| {
        b.iter(|| {
            for value in 0u64..0x100 {
                black_box(fmt.bit_mask(table, black_box(value << 8), 4));
            }
        })
    });
}

fn bench_reconcile(c: &mut Criterion) {
    let image = MemoryImage::from_parts(0, vec![0u8; 0x10000], 8);
    c.bench_function("reconcile 512 extents", |b| {
        b.iter(|| {
            let mut list = ExtentList::new();
            for i in 0..512u64 {
                // 同名ペアとゼロ隙間が混ざる並び
                let name = if i % 3 == 0 { "Strings in key_names" } else { "table" };
                list.push(Extent::new(name, i * 0x40, 0x20));
            }
            list.reconcile(black_box(&image));
            black_box(list.len())
        })
    });
}

criterion_group!(benches, bench_bit_mask, bench_reconcile);
criterion_main!(benches);
