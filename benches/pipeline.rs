//! Benchmarks for the traitmix pipeline.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{Rgba, RgbaImage};

use traitmix::{
    composite_over, flatten, make_rng, Combination, Generator, LayerRenderer, LayerSet, TraitDef,
};

fn duck_traits() -> Vec<TraitDef> {
    let eyes: Vec<String> = (0..25).map(|i| format!("Eye {}", i)).collect();
    let hats: Vec<String> = (0..24).map(|i| format!("Hat {}", i)).collect();
    let cloth: Vec<String> = (0..21).map(|i| format!("Cloth {}", i)).collect();

    vec![
        TraitDef::new(
            "Background",
            vec!["Green", "Orange", "Purple", "Red", "White", "Yellow"],
            vec![20, 20, 20, 20, 10, 10],
        ),
        TraitDef::new(
            "Base",
            vec!["Blue Body", "Green Body", "White Body", "Yellow Body"],
            vec![25, 25, 10, 40],
        ),
        TraitDef::new("Eye", eyes, vec![4; 25]),
        TraitDef::new("Hat", hats, vec![4; 24]),
        TraitDef::new("Cloth", cloth, vec![5; 21]),
    ]
}

// -- Generation benchmarks --

fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation");
    let traits = duck_traits();
    let generator = Generator::new(&traits).unwrap();

    group.bench_function("draw_single", |b| {
        let mut rng = make_rng(Some(1));
        b.iter(|| generator.draw(black_box(&mut rng)))
    });

    group.bench_function("generate_997", |b| {
        b.iter(|| {
            let mut rng = make_rng(Some(1));
            generator.generate(black_box(997), &mut rng).unwrap()
        })
    });

    let tight = vec![
        TraitDef::uniform("Background", vec!["A", "B", "C", "D"]),
        TraitDef::uniform("Shape", vec!["W", "X", "Y", "Z"]),
    ];
    let tight_gen = Generator::new(&tight).unwrap();
    group.bench_function("generate_full_space_16", |b| {
        b.iter(|| {
            let mut rng = make_rng(Some(1));
            tight_gen.generate(black_box(16), &mut rng).unwrap()
        })
    });

    group.finish();
}

// -- Compositing benchmarks --

fn bench_compositing(c: &mut Criterion) {
    let mut group = c.benchmark_group("compositing");

    let base = RgbaImage::from_pixel(512, 512, Rgba([200, 30, 30, 255]));
    let overlay = RgbaImage::from_fn(512, 512, |x, _| Rgba([0, 0, 255, (x % 256) as u8]));

    group.bench_function("over_512", |b| {
        b.iter(|| {
            let mut canvas = base.clone();
            composite_over(&mut canvas, black_box(&overlay));
            canvas
        })
    });

    group.bench_function("flatten_512", |b| b.iter(|| flatten(black_box(&overlay), None)));

    let mut layers = LayerSet::new();
    layers.insert("Red", base.clone());
    layers.insert("Fade", overlay.clone());
    let renderer = LayerRenderer::new(&layers);
    let combo: Combination = [("Background", "Red"), ("Shape", "Fade")].into_iter().collect();

    group.bench_function("render_two_layers_512", |b| {
        b.iter(|| renderer.render(black_box(&combo)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_generation, bench_compositing);
criterion_main!(benches);
