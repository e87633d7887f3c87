// Run with: cargo run --example debug_discover
// Lists every catalog target found on this machine with its paths and safety verdicts.

use crumbs_core::{
    Catalog, DiscoveryOptions, PathResolver, SafetyValidator, Verdict, discover, format_size,
};
use std::time::Instant;

fn main() {
    let catalog = Catalog::for_host();
    let resolver = PathResolver::for_host();
    let validator = SafetyValidator::for_host();

    println!(
        "Platform: {} ({} catalog entries)",
        catalog.platform().label(),
        catalog.len()
    );
    match resolver.home() {
        Some(home) => println!("Home: {}", home.display()),
        None => println!("Home: unknown, ~ patterns will not resolve"),
    }

    let start = Instant::now();
    let found = discover(&catalog, &resolver, &DiscoveryOptions::default());
    println!(
        "\nFound {} of {} targets in {:.2?}\n",
        found.len(),
        catalog.len(),
        start.elapsed()
    );

    for entry in &found {
        let size = entry
            .size_bytes
            .map(format_size)
            .unwrap_or_else(|| "?".to_string());
        println!("{:<40} {:>10}", entry.name(), size);
        for path in resolver.resolve_entry(&entry.entry) {
            let verdict = match validator.check(&path) {
                Verdict::Safe => "safe".to_string(),
                Verdict::Protected(protection) => format!("protected: {}", protection),
            };
            println!("    {} [{}]", path.display(), verdict);
        }
    }
}
