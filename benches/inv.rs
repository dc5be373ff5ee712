use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use bikinv::{PadR, ParameterSet, gf2x_mod_inv, gf2x_mod_mul};
use bikinv::{level1, level3, level10, level11, level12, level13, level14, level18};

// ============================================================================
// Inputs
// ============================================================================

/// Deterministic dense unit: odd weight, not all-ones
fn bench_unit<P: ParameterSet>() -> PadR<P> {
    let mut bytes = vec![0u8; P::R_BYTES];
    for (i, byte) in bytes.iter_mut().enumerate() {
        *byte = (i as u8).wrapping_mul(0x9d) ^ 0x5a;
    }
    bytes[P::R_BYTES - 1] &= P::LAST_R_BYTE_MASK;

    let a = PadR::<P>::from_le_bytes(&bytes).expect("padding cleared");
    if a.weight() % 2 == 0 {
        a.add(&PadR::one())
    } else {
        a
    }
}

// ============================================================================
// Benchmarks
// ============================================================================

/// Benchmark gf2x_mod_inv for a specific parameter set
fn bench_inv<P: ParameterSet>(c: &mut Criterion, name: &str) {
    let a = bench_unit::<P>();

    c.bench_with_input(BenchmarkId::new("inv", name), &a, |b, a| {
        b.iter(|| {
            let _inv: PadR<P> = gf2x_mod_inv(a);
        });
    });
}

/// Benchmark gf2x_mod_mul for a specific parameter set
fn bench_mul<P: ParameterSet>(c: &mut Criterion, name: &str) {
    let a = bench_unit::<P>();
    let b = gf2x_mod_inv(&a);

    c.bench_with_input(BenchmarkId::new("mul", name), &(&a, &b), |bench, (a, b)| {
        bench.iter(|| {
            let _c: PadR<P> = gf2x_mod_mul(a, b);
        });
    });
}

// ============================================================================
// Benchmark Groups
// ============================================================================

fn inv_benchmarks(c: &mut Criterion) {
    // BIKE level 1 (128-bit security)
    bench_inv::<level1::Level1Params>(c, "level1");
    bench_mul::<level1::Level1Params>(c, "level1");

    // BIKE level 3 (192-bit security)
    bench_inv::<level3::Level3Params>(c, "level3");
    bench_mul::<level3::Level3Params>(c, "level3");

    // Reduced levels, increasing r
    bench_inv::<level11::Level11Params>(c, "level11");
    bench_inv::<level12::Level12Params>(c, "level12");
    bench_inv::<level13::Level13Params>(c, "level13");
    bench_inv::<level14::Level14Params>(c, "level14");
    bench_inv::<level18::Level18Params>(c, "level18");
    bench_inv::<level10::Level10Params>(c, "level10");
}

criterion_group!(benches, inv_benchmarks);
criterion_main!(benches);
