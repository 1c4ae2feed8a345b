use rb_ordered_map::{Map, SyncMap};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

/// Orders strings by length first, then lexically.
fn by_len(a: &String, b: &String) -> std::cmp::Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn main() {
    let _ = TermLogger::init(
        LevelFilter::Debug,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );

    let words: Map<String, usize, _> = Map::with_comparator(by_len);
    for w in ["pear", "fig", "banana", "kiwi", "apple"] {
        words.insert(w.to_string(), w.len());
    }
    assert_eq!(words.first(), Some(("fig".to_string(), 3)));
    assert_eq!(
        words.lower_bound(&"zzzz".to_string()),
        Some(("apple".to_string(), 5))
    );
    println!("{words:?}");

    let scores: SyncMap<u32, &str> = SyncMap::default();
    std::thread::scope(|s| {
        s.spawn(|| scores.insert(90, "alice"));
        s.spawn(|| scores.insert(75, "bob"));
    });
    scores.traverse(|k, v| {
        println!("{k}: {v}");
        true
    });
}
