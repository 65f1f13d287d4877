//! Performance smoke tests for generation.

use hexgen::{GenerationConfig, HexMapGenerator, HexgenResult, MapAnalyzer};
use std::time::Instant;

#[test]
fn test_radius_ten_generation_performance() -> HexgenResult<()> {
    let generator = HexMapGenerator::new();
    let iterations: u32 = 20;

    let start = Instant::now();
    for seed in 1..=iterations {
        let config = GenerationConfig {
            radius: 10,
            ..GenerationConfig::combat(seed as u64)
        };
        let generated = generator.generate_map(&config)?;
        assert_eq!(generated.map.len(), 331);
    }
    let elapsed = start.elapsed();
    let average = elapsed / iterations;

    println!("Average radius-10 generation time: {:?}", average);

    // Debug builds included; a frame budget is ~16ms.
    assert!(
        average.as_millis() < 100,
        "Generation too slow: {:?}",
        average
    );

    Ok(())
}

#[test]
fn test_analysis_performance() -> HexgenResult<()> {
    let config = GenerationConfig {
        radius: 10,
        ..GenerationConfig::balanced(99)
    };
    let map = HexMapGenerator::new().generate_map(&config)?.map;
    let analyzer = MapAnalyzer::new();

    let start = Instant::now();
    for _ in 0..100 {
        let report = analyzer.analyze(&map);
        assert_eq!(report.total_tiles, 331);
    }
    let elapsed = start.elapsed();

    println!("100 analyses took {:?}", elapsed);
    assert!(elapsed.as_millis() < 1000, "Analysis too slow: {:?}", elapsed);

    Ok(())
}
