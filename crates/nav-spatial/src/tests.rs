//! Unit tests for nav-spatial.
//!
//! All tests use hand-crafted maps so they run without any map file.

#[cfg(test)]
mod helpers {
    use nav_core::GeoCoord;

    use crate::{StreetMap, StreetMapBuilder};

    pub fn c(lat: f64, lon: f64) -> GeoCoord {
        GeoCoord::from_degrees(lat, lon)
    }

    /// Build a small map for testing.
    ///
    /// Coordinates (lat, lon):
    ///   n0:(0,0)  n1:(0,1)  n2:(0,2)
    ///   n3:(5,0)            n4:(1,2)
    ///
    /// Streets: "A" n0-n1-n2, "B" n2-n4, "C" n0-n3, "D" n3-n4
    ///
    /// n0→n4 via n1,n2 is 3 segments and ~3° long; via n3 it is 2 segments
    /// but ~9.5° long.
    pub fn grid_map() -> (StreetMap, [GeoCoord; 5]) {
        let n = [c(0.0, 0.0), c(0.0, 1.0), c(0.0, 2.0), c(5.0, 0.0), c(1.0, 2.0)];
        let mut b = StreetMapBuilder::new();
        b.add_segment(n[0].clone(), n[1].clone(), "A");
        b.add_segment(n[1].clone(), n[2].clone(), "A");
        b.add_segment(n[2].clone(), n[4].clone(), "B");
        b.add_segment(n[0].clone(), n[3].clone(), "C");
        b.add_segment(n[3].clone(), n[4].clone(), "D");
        (b.build(), n)
    }
}

// ── ExpandableMap ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod index {
    use std::hash::{BuildHasherDefault, Hasher};

    use crate::ExpandableMap;
    use crate::index::{DEFAULT_MAX_LOAD_FACTOR, INITIAL_BUCKETS};

    /// Sends every key to bucket 0.
    #[derive(Default)]
    struct ZeroHasher;

    impl Hasher for ZeroHasher {
        fn finish(&self) -> u64 {
            0
        }
        fn write(&mut self, _bytes: &[u8]) {}
    }

    #[test]
    fn associate_and_find() {
        let mut m: ExpandableMap<String, u32> = ExpandableMap::new();
        assert!(m.is_empty());
        assert_eq!(m.associate("a".into(), 1), None);
        assert_eq!(m.associate("b".into(), 2), None);
        assert_eq!(m.find(&"a".to_string()), Some(&1));
        assert_eq!(m.find(&"b".to_string()), Some(&2));
        assert_eq!(m.find(&"c".to_string()), None);
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn equal_key_overwrites() {
        let mut m: ExpandableMap<u32, &str> = ExpandableMap::new();
        m.associate(7, "old");
        assert_eq!(m.associate(7, "new"), Some("old"));
        assert_eq!(m.find(&7), Some(&"new"));
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn doubles_past_max_load_factor() {
        let mut m: ExpandableMap<u32, u32> = ExpandableMap::new();
        assert_eq!(m.bucket_count(), INITIAL_BUCKETS);
        for k in 0..4 {
            m.associate(k, k);
        }
        // 4 / 8 = 0.5 is not above the maximum.
        assert_eq!(m.bucket_count(), 8);
        m.associate(4, 4);
        assert_eq!(m.bucket_count(), 16);
        for k in 5..9 {
            m.associate(k, k);
        }
        assert_eq!(m.bucket_count(), 32);
    }

    #[test]
    fn overwrite_never_grows() {
        let mut m: ExpandableMap<u32, u32> = ExpandableMap::new();
        for k in 0..4 {
            m.associate(k, k);
        }
        for _ in 0..10 {
            m.associate(0, 99);
        }
        assert_eq!(m.bucket_count(), 8);
        assert_eq!(m.len(), 4);
    }

    #[test]
    fn rehash_keeps_every_entry_once() {
        let mut m: ExpandableMap<u64, u64> = ExpandableMap::new();
        for k in 0..1_000 {
            m.associate(k, k * 3);
        }
        assert_eq!(m.len(), 1_000);
        assert_eq!(m.iter().count(), 1_000);
        assert!(m.load_factor() <= DEFAULT_MAX_LOAD_FACTOR);
        for k in 0..1_000 {
            assert_eq!(m.find(&k), Some(&(k * 3)));
        }
    }

    #[test]
    fn custom_load_factor() {
        let mut m: ExpandableMap<u32, ()> = ExpandableMap::with_max_load_factor(2.0);
        for k in 0..16 {
            m.associate(k, ());
        }
        assert_eq!(m.bucket_count(), 8);
        m.associate(16, ());
        assert_eq!(m.bucket_count(), 16);
    }

    #[test]
    fn tiny_load_factor_is_still_a_bound() {
        let mut m: ExpandableMap<u32, ()> = ExpandableMap::with_max_load_factor(0.01);
        m.associate(1, ());
        assert!(m.load_factor() <= m.max_load_factor(), "{}", m.load_factor());
        assert_eq!(m.bucket_count(), 128);
        for k in 2..=10 {
            m.associate(k, ());
            assert!(m.load_factor() <= 0.01);
        }
        assert_eq!(m.bucket_count(), 1024);
        assert_eq!(m.len(), 10);
        assert_eq!(m.find(&7), Some(&()));
    }

    #[test]
    fn invalid_load_factor_uses_default() {
        let m: ExpandableMap<u32, ()> = ExpandableMap::with_max_load_factor(0.0);
        assert_eq!(m.max_load_factor(), DEFAULT_MAX_LOAD_FACTOR);
        let m: ExpandableMap<u32, ()> = ExpandableMap::with_max_load_factor(f64::NAN);
        assert_eq!(m.max_load_factor(), DEFAULT_MAX_LOAD_FACTOR);
    }

    #[test]
    fn reset_empties_and_shrinks() {
        let mut m: ExpandableMap<u32, u32> = ExpandableMap::new();
        for k in 0..100 {
            m.associate(k, k);
        }
        m.reset();
        assert!(m.is_empty());
        assert_eq!(m.bucket_count(), INITIAL_BUCKETS);
        assert_eq!(m.find(&5), None);
        m.associate(5, 50);
        assert_eq!(m.find(&5), Some(&50));
    }

    #[test]
    fn get_or_insert_with_appends_across_rehash() {
        let mut m: ExpandableMap<u32, Vec<u32>> = ExpandableMap::new();
        for k in 0..50 {
            m.get_or_insert_with(k % 10, Vec::new).push(k);
        }
        assert_eq!(m.len(), 10);
        for k in 0..10 {
            assert_eq!(m.find(&k).map(Vec::len), Some(5));
        }
        // Inserting the key that triggers growth still hands back its slot.
        let mut m: ExpandableMap<u32, Vec<u32>> = ExpandableMap::new();
        for k in 0..4 {
            m.associate(k, vec![]);
        }
        m.get_or_insert_with(4, Vec::new).push(40);
        assert_eq!(m.bucket_count(), 16);
        assert_eq!(m.find(&4), Some(&vec![40]));
    }

    #[test]
    fn degenerate_hash_is_still_correct() {
        let mut m: ExpandableMap<u32, u32, BuildHasherDefault<ZeroHasher>> =
            ExpandableMap::with_max_load_factor_and_hasher(0.5, BuildHasherDefault::default());
        for k in 0..64 {
            m.associate(k, k + 1);
        }
        m.associate(10, 0);
        assert_eq!(m.len(), 64);
        assert_eq!(m.find(&10), Some(&0));
        assert_eq!(m.find(&63), Some(&64));
        assert_eq!(m.find(&64), None);
    }
}

// ── StreetMap ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod street_map {
    use super::helpers::{c, grid_map};
    use crate::{StreetDef, StreetMap, StreetMapBuilder};

    #[test]
    fn empty_build() {
        let map = StreetMapBuilder::new().build();
        assert!(map.is_empty());
        assert_eq!(map.coord_count(), 0);
        assert_eq!(map.segment_count(), 0);
        assert!(map.nearest_coord(0.0, 0.0).is_none());
    }

    #[test]
    fn unregistered_coord_is_not_found() {
        let (map, _) = grid_map();
        assert!(map.segments_starting_at(&c(9.0, 9.0)).is_none());
        assert!(!map.contains(&c(9.0, 9.0)));
        // Same number, different text: still a different key.
        assert!(map.segments_starting_at(&nav_core::GeoCoord::parse("0.0", "0").unwrap()).is_none());
    }

    #[test]
    fn counts() {
        let (map, _) = grid_map();
        assert_eq!(map.coord_count(), 5);
        assert_eq!(map.segment_count(), 10);
        assert_eq!(map.coords().count(), 5);
    }

    #[test]
    fn segments_accumulate_per_coord() {
        let (map, [n0, n1, n2, n3, n4]) = grid_map();
        let out = map.segments_starting_at(&n1).unwrap();
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|s| s.start == n1 && s.name == "A"));
        assert!(out.iter().any(|s| s.end == n0));
        assert!(out.iter().any(|s| s.end == n2));
        assert_eq!(map.segments_starting_at(&n3).unwrap().len(), 2);
        assert_eq!(map.segments_starting_at(&n4).unwrap().len(), 2);
    }

    #[test]
    fn every_segment_has_its_reverse() {
        let (map, _) = grid_map();
        for coord in map.coords() {
            for seg in map.segments_starting_at(coord).unwrap() {
                let back = map.segments_starting_at(&seg.end).unwrap();
                assert!(back.contains(&seg.reversed()), "missing reverse of {seg}");
            }
        }
    }

    #[test]
    fn load_from_street_defs() {
        let map = StreetMap::load_from(vec![
            StreetDef::new("Main", vec![(c(0.0, 0.0), c(0.0, 1.0)), (c(0.0, 1.0), c(0.0, 2.0))]),
            StreetDef::new("Elm", vec![(c(0.0, 1.0), c(1.0, 1.0))]),
        ]);
        assert_eq!(map.coord_count(), 4);
        assert_eq!(map.segment_count(), 6);
        let junction = map.segments_starting_at(&c(0.0, 1.0)).unwrap();
        assert_eq!(junction.len(), 3);
        assert_eq!(junction.iter().filter(|s| s.name == "Elm").count(), 1);
    }

    #[test]
    fn nearest_coord_snaps() {
        let (map, [n0, n1, ..]) = grid_map();
        assert_eq!(map.nearest_coord(0.0, 0.0), Some(&n0));
        assert_eq!(map.nearest_coord(0.1, 0.4), Some(&n0));
        assert_eq!(map.nearest_coord(-0.1, 0.6), Some(&n1));
    }

    #[test]
    fn snap_keeps_registered_coords() {
        let (map, [_, n1, ..]) = grid_map();
        assert_eq!(map.snap(&n1), Some(&n1));
    }

    #[test]
    fn snap_moves_free_positions_onto_the_map() {
        let (map, [n0, n1, ..]) = grid_map();
        // Same number as n0, spelled differently.
        let typed = nav_core::GeoCoord::parse("0.0", "0.00").unwrap();
        assert!(!map.contains(&typed));
        assert_eq!(map.snap(&typed), Some(&n0));
        assert_eq!(map.snap(&c(-0.1, 0.6)), Some(&n1));
        assert!(StreetMapBuilder::new().build().snap(&n0).is_none());
    }

    #[test]
    fn small_load_factor_still_indexes_everything() {
        let mut b = StreetMapBuilder::with_max_load_factor(0.1);
        for i in 0..20 {
            b.add_segment(c(0.0, i as f64), c(0.0, (i + 1) as f64), "Long Rd");
        }
        assert_eq!(b.coord_count(), 21);
        let map = b.build();
        for i in 0..=20 {
            assert!(map.contains(&c(0.0, i as f64)));
        }
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::{Cursor, Write};

    use nav_core::GeoCoord;

    use crate::{SpatialError, load_map_file, load_map_reader, parse_streets};

    const SAMPLE: &str = "\
10th Helena Drive
1
34.0547000 -118.4794734 34.0544590 -118.4801137
Broxton Avenue
2
34.0628610 -118.4471097 34.0630070 -118.4471700
34.0630070 -118.4471700 34.0631620 -118.4472324
";

    fn parse_err(text: &str) -> (usize, String) {
        match parse_streets(Cursor::new(text)) {
            Err(SpatialError::Parse { line, message }) => (line, message),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn parses_records() {
        let streets = parse_streets(Cursor::new(SAMPLE)).unwrap();
        assert_eq!(streets.len(), 2);
        assert_eq!(streets[0].name, "10th Helena Drive");
        assert_eq!(streets[0].segments.len(), 1);
        assert_eq!(streets[1].name, "Broxton Avenue");
        assert_eq!(streets[1].segments.len(), 2);
        assert_eq!(
            streets[1].segments[0].1,
            GeoCoord::parse("34.0630070", "-118.4471700").unwrap()
        );
    }

    #[test]
    fn builds_map_with_shared_coordinates() {
        let map = load_map_reader(Cursor::new(SAMPLE)).unwrap();
        assert_eq!(map.coord_count(), 5);
        assert_eq!(map.segment_count(), 6);
        let middle = GeoCoord::parse("34.0630070", "-118.4471700").unwrap();
        assert_eq!(map.segments_starting_at(&middle).unwrap().len(), 2);
    }

    #[test]
    fn blank_lines_between_records() {
        let text = format!("\n{SAMPLE}\n\n");
        assert_eq!(parse_streets(Cursor::new(text)).unwrap().len(), 2);
    }

    #[test]
    fn empty_input_is_empty_map() {
        let map = load_map_reader(Cursor::new("")).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn bad_segment_count() {
        let (line, message) = parse_err("Main St\ntwo\n");
        assert_eq!(line, 2);
        assert!(message.contains("two"), "{message}");
    }

    #[test]
    fn missing_segment_count() {
        let (line, _) = parse_err("Main St\n");
        assert_eq!(line, 2);
    }

    #[test]
    fn truncated_street() {
        let (line, message) = parse_err("Main St\n2\n0 0 0 1\n");
        assert_eq!(line, 4);
        assert!(message.contains("Main St"), "{message}");
    }

    #[test]
    fn wrong_field_count() {
        let (line, message) = parse_err("Main St\n1\n0 0 0\n");
        assert_eq!(line, 3);
        assert!(message.contains("found 3"), "{message}");
    }

    #[test]
    fn non_numeric_coordinate() {
        let (line, message) = parse_err("Main St\n1\n0 0 x 1\n");
        assert_eq!(line, 3);
        assert!(message.contains("\"x\""), "{message}");
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let map = load_map_file(file.path()).unwrap();
        assert_eq!(map.coord_count(), 5);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_map_file(&dir.path().join("nope.txt"));
        assert!(matches!(result, Err(SpatialError::Io(_))));
    }
}

// ── BFS routing ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use std::collections::HashSet;

    use super::helpers::{c, grid_map};
    use crate::{BfsRouter, Router, SpatialError, StreetMapBuilder};

    #[test]
    fn trivial_same_coord() {
        let (map, [n0, ..]) = grid_map();
        let r = BfsRouter.route(&map, &n0, &n0).unwrap();
        assert!(r.is_trivial());
        assert_eq!(r.distance_miles, 0.0);
    }

    #[test]
    fn trivial_even_off_map() {
        let (map, _) = grid_map();
        let off = c(42.0, 42.0);
        let r = BfsRouter.route(&map, &off, &off).unwrap();
        assert!(r.is_trivial());
    }

    #[test]
    fn bad_coord_either_side() {
        let (map, [n0, ..]) = grid_map();
        let off = c(42.0, 42.0);
        assert!(matches!(
            BfsRouter.route(&map, &off, &n0),
            Err(SpatialError::BadCoord(x)) if x == off
        ));
        assert!(matches!(
            BfsRouter.route(&map, &n0, &off),
            Err(SpatialError::BadCoord(x)) if x == off
        ));
        let err = BfsRouter.route(&map, &off, &c(43.0, 43.0)).unwrap_err();
        // The end is checked first.
        assert!(matches!(err, SpatialError::BadCoord(x) if x == c(43.0, 43.0)));
    }

    #[test]
    fn no_route_between_components() {
        let mut b = StreetMapBuilder::new();
        b.add_segment(c(0.0, 0.0), c(0.0, 1.0), "West");
        b.add_segment(c(5.0, 0.0), c(5.0, 1.0), "East");
        let map = b.build();
        let result = BfsRouter.route(&map, &c(0.0, 0.0), &c(5.0, 1.0));
        assert!(matches!(result, Err(SpatialError::NoRoute { .. })));
    }

    #[test_log::test]
    fn prefers_fewer_hops_over_shorter_distance() {
        let (map, [n0, _, _, n3, n4]) = grid_map();
        let route = BfsRouter.route(&map, &n0, &n4).unwrap();
        assert_eq!(route.hop_count(), 2);
        assert_eq!(route.segments[0].start, n0);
        assert_eq!(route.segments[0].end, n3);
        assert_eq!(route.segments[0].name, "C");
        assert_eq!(route.segments[1].end, n4);
        assert_eq!(route.segments[1].name, "D");
    }

    #[test]
    fn route_is_a_simple_connected_walk() {
        let (map, n) = grid_map();
        for a in &n {
            for b in &n {
                let route = BfsRouter.route(&map, a, b).unwrap();
                if a == b {
                    assert!(route.is_trivial());
                    continue;
                }
                assert_eq!(&route.segments.first().unwrap().start, a);
                assert_eq!(&route.segments.last().unwrap().end, b);
                for pair in route.segments.windows(2) {
                    assert_eq!(pair[0].end, pair[1].start);
                }
                let mut seen = HashSet::new();
                seen.insert(a.clone());
                for seg in &route.segments {
                    assert!(seen.insert(seg.end.clone()), "repeated {}", seg.end);
                }
            }
        }
    }

    #[test]
    fn distance_is_sum_of_segments() {
        let (map, [_, n1, _, n3, _]) = grid_map();
        let route = BfsRouter.route(&map, &n1, &n3).unwrap();
        let sum: f64 = route.segments.iter().map(|s| s.length_miles()).sum();
        assert_eq!(route.distance_miles, sum);
        assert!(route.distance_miles > 0.0);
    }

    #[test]
    fn segments_carry_street_names() {
        let (map, [n0, _, n2, ..]) = grid_map();
        let route = BfsRouter.route(&map, &n2, &n0).unwrap();
        assert_eq!(route.hop_count(), 2);
        assert!(route.segments.iter().all(|s| s.name == "A"));
    }
}
