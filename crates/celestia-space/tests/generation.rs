//! End-to-end generation: reproducibility, spacing, and simulated time.

use celestia_body::{BodyKind, OrbitParent};
use celestia_config::GeneratorConfig;
use celestia_space::{SolarSystem, SystemGenerator, WordList};
use celestia_terrain::NoiseSeed;

fn generator() -> SystemGenerator {
    let config = GeneratorConfig {
        max_resolution: 6,
        ..Default::default()
    };
    SystemGenerator::new(config).unwrap()
}

/// How far from its centre a planet's surface or any of its moons can reach.
fn reach(system: &SolarSystem, planet: &celestia_body::CelestialBody) -> f64 {
    planet
        .orbits()
        .iter()
        .map(|o| o.distance_to_center + system.body(o.body).unwrap().max_radius())
        .fold(planet.max_radius(), f64::max)
}

#[test]
fn test_same_seed_same_system() {
    let seed = NoiseSeed::from("reproducible");
    let a = generator().plan(&seed).unwrap();
    let b = generator().plan(&seed).unwrap();

    assert_eq!(a.len(), b.len());
    for (x, y) in a.bodies().iter().zip(b.bodies()) {
        assert_eq!(x.name(), y.name());
        assert_eq!(x.kind(), y.kind());
        assert_eq!(x.settings(), y.settings());
        assert_eq!(x.position(), y.position());
        assert_eq!(x.orbits(), y.orbits());
    }
    assert_eq!(a.system_orbits(), b.system_orbits());
}

#[test]
fn test_different_seeds_differ() {
    let a = generator().plan(&NoiseSeed::from(1)).unwrap();
    let b = generator().plan(&NoiseSeed::from(2)).unwrap();
    let sizes = |s: &SolarSystem| -> Vec<f64> {
        s.bodies().iter().map(|b| b.settings().size.minimal_centre).collect()
    };
    assert_ne!(sizes(&a), sizes(&b));
}

#[test]
fn test_generated_bodies_never_overlap() {
    for n in 0..20u64 {
        let mut system = generator().plan(&NoiseSeed::from(n)).unwrap();
        system.generate_all().unwrap();

        let sun_radius = system.bodies()[0].max_radius();
        let mut planets: Vec<(f64, f64)> = system
            .system_orbits()
            .iter()
            .map(|o| {
                let planet = system.body(o.body).unwrap();
                (o.distance_to_center, reach(&system, planet))
            })
            .collect();
        planets.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut edge = sun_radius;
        for (distance, reach) in planets {
            assert!(
                distance - reach > edge,
                "seed {n}: planet at {distance} with reach {reach} overlaps edge {edge}"
            );
            edge = distance + reach;
        }

        for planet in system.bodies().iter().filter(|b| b.kind() == BodyKind::Planet) {
            let mut edge = planet.max_radius();
            for orbit in planet.orbits() {
                let moon_radius = system.body(orbit.body).unwrap().max_radius();
                assert!(
                    orbit.distance_to_center - moon_radius > edge,
                    "seed {n}: moon of '{}' overlaps",
                    planet.name()
                );
                edge = orbit.distance_to_center + moon_radius;
            }
        }
    }
}

#[test]
fn test_generate_builds_every_surface() {
    let system = generator().generate(&NoiseSeed::from("full")).unwrap();
    for body in system.bodies() {
        let surface = body.surface().unwrap();
        assert!(surface.mesh.vertex_count() > 0);
        assert_eq!(surface.mesh.open_edge_count(), 0, "'{}' is not closed", body.name());
        assert_eq!(surface.ramp.is_some(), body.kind() != BodyKind::Sun);
        let extrema = body.extrema();
        assert!(extrema.min_radius <= extrema.max_radius);
        assert!(extrema.min_radius >= body.settings().size.minimal_centre - 1e-9);
    }
}

#[test]
fn test_orbits_close_after_one_period() {
    let mut system = generator().plan(&NoiseSeed::from("closure")).unwrap();
    let moon = system
        .iter()
        .find(|(_, b)| b.kind() == BodyKind::Moon)
        .map(|(id, _)| id);
    let planet = system.system_orbits()[0].body;
    let period = system.system_orbits()[0].period_seconds;

    system.update_at(5.0);
    let before = system.body(planet).unwrap().position();
    system.update_at(5.0 + period);
    let after = system.body(planet).unwrap().position();
    assert!(before.distance(after) < 1e-6, "planet did not return: {before} vs {after}");

    if let Some(moon) = moon {
        let handle = system.body(moon).unwrap().own_orbit().unwrap();
        let OrbitParent::Body(host) = handle.parent else {
            panic!("moon should orbit a planet");
        };
        let period = system.orbit(handle).unwrap().period_seconds;
        system.update_at(0.0);
        let offset = system.body(moon).unwrap().position() - system.body(host).unwrap().position();
        system.update_at(period);
        let later = system.body(moon).unwrap().position() - system.body(host).unwrap().position();
        assert!(offset.distance(later) < 1e-6);
    }
}

#[test]
fn test_advance_moves_planets() {
    let mut system = generator().plan(&NoiseSeed::from("motion")).unwrap();
    let planet = system.system_orbits()[0].body;
    let start = system.body(planet).unwrap().position();
    system.set_speed_multiplier(10.0);
    for _ in 0..60 {
        system.advance(1.0 / 60.0);
    }
    assert!((system.clock().elapsed() - 10.0).abs() < 1e-9);
    let end = system.body(planet).unwrap().position();
    assert!((start.length() - end.length()).abs() < 1e-9, "planets keep their distance");
    assert!(start.distance(end) > 0.0);
}

#[test]
fn test_reserved_words_never_name_bodies() {
    let seed = NoiseSeed::from("words");
    let open = generator().plan(&seed).unwrap();
    let taken: Vec<String> = open.bodies().iter().map(|b| b.name().to_string()).collect();
    // Reserve every gibberish word the open generator produced.
    let words: Vec<String> = taken
        .iter()
        .flat_map(|name| name.split(['-', ' ']).map(str::to_string).collect::<Vec<_>>())
        .collect();

    let reserved = WordList::new(&words);
    let system = generator().with_word_list(reserved.clone()).plan(&seed).unwrap();
    for body in system.bodies().iter().filter(|b| b.kind() != BodyKind::Moon) {
        let word = body
            .name()
            .split('-')
            .find(|part| {
                part.parse::<u32>().is_err()
                    && !celestia_space::GREEK_PREFIXES.contains(part)
            });
        if let Some(word) = word {
            assert!(!reserved.contains(word), "'{}' uses a reserved word", body.name());
        }
    }
}
