#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    corpus: Vec<u8>,
    pattern: Vec<u8>,
    limit: Option<u8>,
}

fuzz_target!(|input: Input| {
    // Lookups must agree with a brute-force scan
    let index = fxsa::Index::new(input.corpus.clone());
    let mut hits = index.lookup(&input.pattern, input.limit.map(usize::from));
    hits.sort_unstable();

    let p = &input.pattern;
    let expected: Vec<usize> = if p.is_empty() || p.len() > input.corpus.len() {
        Vec::new()
    } else {
        (0..=input.corpus.len() - p.len())
            .filter(|&i| input.corpus[i..].starts_with(p))
            .collect()
    };

    match input.limit {
        None => assert_eq!(hits, expected),
        Some(limit) => {
            assert_eq!(hits.len(), expected.len().min(limit as usize));
            assert!(hits.iter().all(|h| expected.contains(h)));
        }
    }
});
