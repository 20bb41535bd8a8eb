//! Benchmarks for the register arithmetic and the two engines.
//!
//! Measures:
//! - Bitwise primitives and the ripple-carry adder on 4- and 16-bit registers
//! - Complement and subtraction through the adder
//! - Full Booth and division runs, including record allocation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use regtrace::arith::{self, BitPrimitives, RegisterOps, RippleCarryAdder, ScalarPrimitives};
use regtrace::{BoothEngine, DivisionEngine, Register};

// =============================================================================
// Primitive Operations
// =============================================================================

fn bench_primitives(c: &mut Criterion) {
    let mut group = c.benchmark_group("primitives");
    group.throughput(Throughput::Elements(1));

    let p = ScalarPrimitives;
    let a = Register::new(0b1010, 4);
    let b = Register::new(0b0110, 4);

    group.bench_function("bnot", |bench| {
        bench.iter(|| black_box(p.bnot(black_box(a))));
    });

    group.bench_function("xor", |bench| {
        bench.iter(|| black_box(p.xor(black_box(a), black_box(b))));
    });

    group.bench_function("and", |bench| {
        bench.iter(|| black_box(p.and(black_box(a), black_box(b))));
    });

    group.bench_function("or", |bench| {
        bench.iter(|| black_box(p.or(black_box(a), black_box(b))));
    });

    group.finish();
}

// =============================================================================
// Adder
// =============================================================================

fn bench_adder(c: &mut Criterion) {
    let mut group = c.benchmark_group("ripple_carry_adder");
    group.throughput(Throughput::Elements(1));

    let p = ScalarPrimitives;

    for width in [4u8, 8, 16] {
        let a = Register::new(0xA5A5, width);
        let b = Register::new(0x5A5B, width);

        group.bench_with_input(BenchmarkId::new("add", width), &(a, b), |bench, &(a, b)| {
            bench.iter(|| black_box(RippleCarryAdder::add(&p, black_box(a), black_box(b), false)));
        });

        group.bench_with_input(BenchmarkId::new("sub", width), &(a, b), |bench, &(a, b)| {
            bench.iter(|| black_box(p.sub_with_overflow(black_box(a), black_box(b))));
        });

        group.bench_with_input(BenchmarkId::new("complement", width), &a, |bench, &a| {
            bench.iter(|| black_box(arith::complement(black_box(a))));
        });
    }

    // Native wrapping_add for comparison
    group.bench_function("native_add", |bench| {
        bench.iter(|| black_box(black_box(0xA5A5u16).wrapping_add(black_box(0x5A5B))));
    });

    group.finish();
}

// =============================================================================
// Engines
// =============================================================================

fn bench_booth(c: &mut Criterion) {
    let mut group = c.benchmark_group("booth");
    let engine = BoothEngine::new();

    for (m, q) in [("1101", "0111"), ("0011", "0011"), ("0101", "1010")] {
        let id = format!("{m}x{q}");
        let operands = (m.parse::<Register>(), q.parse::<Register>());
        let (Ok(m), Ok(q)) = operands else {
            continue;
        };
        group.bench_with_input(BenchmarkId::new("run", id), &(m, q), |bench, &(m, q)| {
            bench.iter(|| black_box(engine.run(black_box(m), black_box(q))));
        });
    }

    // Whole operand domain per iteration
    group.throughput(Throughput::Elements(256));
    group.bench_function("all_operands", |bench| {
        bench.iter(|| {
            for m in 0..16 {
                for q in 0..16 {
                    let _ = black_box(engine.run(Register::new(m, 4), Register::new(q, 4)));
                }
            }
        });
    });

    group.finish();
}

fn bench_division(c: &mut Criterion) {
    let mut group = c.benchmark_group("division");
    let engine = DivisionEngine::new();

    for (x, y) in [("1011", "0011"), ("0110", "0011"), ("0101", "0000")] {
        let id = format!("{x}/{y}");
        let operands = (x.parse::<Register>(), y.parse::<Register>());
        let (Ok(x), Ok(y)) = operands else {
            continue;
        };
        group.bench_with_input(BenchmarkId::new("run", &id), &(x, y), |bench, &(x, y)| {
            bench.iter(|| black_box(engine.run(black_box(x), black_box(y))));
        });
        group.bench_with_input(BenchmarkId::new("run_signed", &id), &(x, y), |bench, &(x, y)| {
            bench.iter(|| black_box(engine.run_signed(black_box(x), black_box(y))));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_primitives,
    bench_adder,
    bench_booth,
    bench_division
);
criterion_main!(benches);
