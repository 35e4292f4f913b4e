//! Dictionary-style lookups: a sorted word list searched linearly versus trees built from the
//! same words in alphabetical order, in scrambled order, and after rebalancing.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use linked_bst::linked::LinkedBst;

/// How many words are in the dictionary.
const NUM_WORDS: usize = 5_000;

/// How many words are looked up per iteration.
const NUM_LOOKUPS: usize = 1_000;

/// Builds `count` distinct lowercase words in alphabetical order.
fn sorted_words(count: usize) -> Vec<String> {
    (0..count)
        .map(|mut n| {
            let mut word = [b'a'; 4];
            for letter in word.iter_mut().rev() {
                *letter = b'a' + (n % 26) as u8;
                n /= 26;
            }
            String::from_utf8_lossy(&word).into_owned()
        })
        .collect()
}

/// Scrambles the words by ordering them by their hash.
fn scrambled(words: &[String]) -> Vec<String> {
    let mut words = words.to_vec();
    words.sort_by_key(|word| {
        let mut hasher = DefaultHasher::new();
        word.hash(&mut hasher);
        hasher.finish()
    });
    words
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let sorted = sorted_words(NUM_WORDS);
    let lookups = scrambled(&sorted);
    let lookups = &lookups[..NUM_LOOKUPS];

    let chain: LinkedBst<String> = sorted.iter().cloned().collect();
    let random: LinkedBst<String> = scrambled(&sorted).into_iter().collect();
    let rebalanced = {
        let mut tree = random.clone();
        tree.rebalance();
        tree
    };

    let mut group = c.benchmark_group("dictionary");

    group.bench_function("sorted-list", |b| {
        b.iter(|| {
            for word in lookups {
                black_box(sorted.iter().position(|w| w == word));
            }
        })
    });

    let trees = [
        ("chain", &chain),
        ("random", &random),
        ("rebalanced", &rebalanced),
    ];
    for (name, tree) in trees {
        group.bench_function(name, |b| {
            b.iter(|| {
                for word in lookups {
                    black_box(tree.find(word));
                }
            })
        });
    }

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
