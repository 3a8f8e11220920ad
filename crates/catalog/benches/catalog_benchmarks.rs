use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use storefront_catalog::{Axis, AxisValue, CatalogConfig, PackOption, ProductFamily, generate, validate};
use storefront_core::{Multiplier, PackQuantity, UsdCents};
use storefront_shipping::{PriceByBand, ShippingBand, compute_shipping};

/// Config with `families` families, each 4 sizes x 3 grades x 4 packs.
fn config(families: usize) -> CatalogConfig {
    let value = |code: &str, bp: i64| AxisValue {
        code: code.to_owned(),
        label: code.to_uppercase(),
        multiplier: Multiplier::from_basis_points(bp),
    };
    let families = (0..families)
        .map(|i| ProductFamily {
            id: format!("family-{i}").parse().expect("valid family id"),
            name: format!("Family {i}"),
            jis_standard: Some("JIS T 9115".to_owned()),
            base_price_usd_cents: UsdCents(1000 + i as u64),
            image_url: None,
            alternate_family: None,
            axes: vec![
                Axis {
                    name: "size".to_owned(),
                    values: vec![value("s", 10_000), value("m", 10_000), value("l", 11_000), value("xl", 11_500)],
                },
                Axis {
                    name: "grade".to_owned(),
                    values: vec![value("std", 10_000), value("pro", 12_500), value("med", 13_333)],
                },
            ],
            packs: [(10, 10_000), (20, 19_000), (50, 45_000), (100, 85_000)]
                .into_iter()
                .map(|(q, bp)| PackOption {
                    quantity: PackQuantity(q),
                    multiplier: Multiplier::from_basis_points(bp),
                })
                .collect(),
        })
        .collect();
    CatalogConfig {
        families,
        exchange_rate: None,
    }
}

fn bench_generate_and_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog_pipeline");
    for families in [10usize, 100, 1000] {
        let config = config(families);
        let variants = generate(&config).expect("bench config generates");
        group.throughput(Throughput::Elements(variants.len() as u64));

        group.bench_with_input(BenchmarkId::new("generate", families), &config, |b, config| {
            b.iter(|| generate(black_box(config)).expect("generate"))
        });
        group.bench_with_input(BenchmarkId::new("validate", families), &variants, |b, variants| {
            b.iter(|| validate(black_box(variants)).expect("validate"))
        });
    }
    group.finish();
}

fn bench_compute_shipping(c: &mut Criterion) {
    let prices: PriceByBand = [
        (ShippingBand::A10Pcs, UsdCents(1800)),
        (ShippingBand::B20Pcs, UsdCents(2800)),
        (ShippingBand::C50Pcs, UsdCents(3600)),
        (ShippingBand::D100Pcs, UsdCents(5200)),
    ]
    .into_iter()
    .collect();
    let cart: Vec<ShippingBand> = (0..64)
        .map(|i| [ShippingBand::A10Pcs, ShippingBand::B20Pcs, ShippingBand::C50Pcs, ShippingBand::D100Pcs][i % 4])
        .collect();

    c.bench_function("compute_shipping_64_lines", |b| {
        b.iter(|| compute_shipping(black_box(cart.iter().copied()), black_box(&prices)).expect("quote"))
    });
}

criterion_group!(benches, bench_generate_and_validate, bench_compute_shipping);
criterion_main!(benches);
