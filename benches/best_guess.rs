use criterion::{black_box, criterion_group, criterion_main, Criterion};
use puzzle_engine::partition::ITEM_COUNT;
use puzzle_engine::solver::best_guess;
use puzzle_engine::{PartitionSearch, SimilarityMatrix, WordTable};

/// Deterministic pseudo-word list: consonant/vowel shapes like "bakor".
fn word_table(n: usize) -> WordTable {
    const CONSONANTS: &[u8] = b"bcdfghklmnprstvw";
    const VOWELS: &[u8] = b"aeiou";
    let words = (0..n).map(|i| {
        let c = |k: usize| CONSONANTS[(i / k) % CONSONANTS.len()] as char;
        let v = |k: usize| VOWELS[(i / k) % VOWELS.len()] as char;
        [c(1), v(3), c(7), v(11), c(13)].iter().collect::<String>()
    });
    WordTable::new(words)
}

fn bench_best_guess(c: &mut Criterion) {
    c.bench_function("guess_500", |b| {
        let table = word_table(500);
        let all = table.all_indices();
        b.iter(|| best_guess(black_box(&table), &all, &all));
    });
}

fn bench_partition(c: &mut Criterion) {
    let values = (0..ITEM_COUNT * ITEM_COUNT)
        .map(|k| {
            let (i, j) = (k / ITEM_COUNT, k % ITEM_COUNT);
            if i == j {
                1.0
            } else {
                ((i * 7 + j * 7) % 11) as f64 / 11.0
            }
        })
        .collect();
    let matrix = SimilarityMatrix::from_values(ITEM_COUNT, values).unwrap();
    let search = PartitionSearch::new(&matrix).unwrap();

    let mut group = c.benchmark_group("partition");
    group.sample_size(10);
    group.bench_function("sequential", |b| b.iter(|| black_box(&search).solve()));
    group.bench_function("parallel", |b| b.iter(|| black_box(&search).solve_parallel()));
    group.finish();
}

criterion_group!(benches, bench_best_guess, bench_partition);
criterion_main!(benches);
