//! Unit tests for ro-ingest.

use serde_json::{json, Value};

/// One-feature collection with the given properties and geometry.
fn collection(props: Value, geometry: Value) -> String {
    json!({
        "type": "FeatureCollection",
        "features": [{ "type": "Feature", "properties": props, "geometry": geometry }],
    })
    .to_string()
}

fn line(coords: Value) -> Value {
    json!({ "type": "LineString", "coordinates": coords })
}

// ── Boolean coercion ──────────────────────────────────────────────────────────

#[cfg(test)]
mod coerce {
    use serde_json::json;

    use crate::{coerce_bool, IngestError};

    #[test]
    fn missing_and_null_use_default() {
        assert!(coerce_bool(None, true).unwrap());
        assert!(!coerce_bool(None, false).unwrap());
        assert!(coerce_bool(Some(&json!(null)), true).unwrap());
    }

    #[test]
    fn accepted_spellings() {
        for v in [json!(true), json!(1), json!(1.0), json!("true"), json!(" T "), json!("Yes"), json!("y"), json!("1")] {
            assert!(coerce_bool(Some(&v), false).unwrap(), "{v}");
        }
        for v in [json!(false), json!(0), json!(0.0), json!("false"), json!("F"), json!("no"), json!("N"), json!("0"), json!("")] {
            assert!(!coerce_bool(Some(&v), true).unwrap(), "{v}");
        }
    }

    #[test]
    fn rejects_everything_else() {
        for v in [json!("maybe"), json!(2), json!(-1), json!(0.5), json!([true]), json!({"v": 1})] {
            assert!(matches!(coerce_bool(Some(&v), false), Err(IngestError::InvalidBoolean(_))), "{v}");
        }
    }
}

// ── GeoJSON segments ──────────────────────────────────────────────────────────

#[cfg(test)]
mod geojson {
    use std::io::Cursor;

    use serde_json::{json, Value};

    use super::{collection, line};
    use crate::{load_segments_geojson, load_segments_reader, IngestError};

    fn load(doc: &str, default_oneway: bool) -> Result<Vec<ro_core::RoadSegment>, IngestError> {
        load_segments_reader(Cursor::new(doc.as_bytes()), default_oneway)
    }

    #[test]
    fn minimal_feature() {
        let doc = collection(
            json!({ "roadway_id": "R1", "total_lanes": 4, "speed_limit": 40, "oneway": false }),
            line(json!([[-82.4163460, 28.0585626], [-82.4163460, 28.0685626]])),
        );
        let segs = load(&doc, false).unwrap();
        assert_eq!(segs.len(), 1);
        let s = &segs[0];
        assert_eq!(s.roadway_id, "R1");
        assert_eq!(s.total_lanes, 4);
        assert_eq!(s.speed_limit_mph, 40.0);
        assert!(!s.oneway);
        // [lon, lat] order in the file.
        assert_eq!(s.start().lat, 28.0585626);
        assert_eq!(s.start().lon, -82.4163460);
        assert_eq!(s.bmp, None);
    }

    #[test]
    fn alternate_keys_and_mile_posts() {
        let doc = collection(
            json!({ "roadway id": 1017, "number_of_lanes": "3", "speed": 35.5, "bmp": 0.25, "emp": "1.5" }),
            line(json!([[0.0, 0.0, 12.0], [0.0, 0.01, 13.0]])),
        );
        let s = &load(&doc, true).unwrap()[0];
        assert_eq!(s.roadway_id, "1017");
        assert_eq!(s.total_lanes, 3);
        assert_eq!(s.speed_limit_mph, 35.5);
        assert!(s.oneway);
        assert_eq!(s.bmp, Some(0.25));
        assert_eq!(s.emp, Some(1.5));
    }

    #[test]
    fn null_key_falls_through_to_next_alias() {
        let doc = collection(
            json!({ "roadway_id": null, "id": "X9", "total_lanes": null, "lanes": 2, "speedlimit": 25 }),
            line(json!([[0, 0], [0, 1]])),
        );
        let s = &load(&doc, false).unwrap()[0];
        assert_eq!(s.roadway_id, "X9");
        assert_eq!(s.total_lanes, 2);
    }

    #[test]
    fn oneway_cases() {
        let with = |v: Value| collection(
            json!({ "roadway_id": "R1", "total_lanes": 2, "speed_limit": 30, "oneway": v }),
            line(json!([[0, 0], [0, 1]])),
        );
        assert!(!load(&with(json!("false")), true).unwrap()[0].oneway);
        assert!(load(&with(json!("true")), false).unwrap()[0].oneway);
        assert!(!load(&with(json!(0)), true).unwrap()[0].oneway);
        assert!(load(&with(json!(null)), true).unwrap()[0].oneway);
        assert!(matches!(
            load(&with(json!("maybe")), false),
            Err(IngestError::InvalidFeature { .. })
        ));
    }

    #[test]
    fn skips_non_feature_entries() {
        let doc = json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Comment", "text": "ignored" },
                {
                    "type": "Feature",
                    "properties": { "roadway_id": "R1", "total_lanes": 1, "speed_limit": 30 },
                    "geometry": { "type": "LineString", "coordinates": [[0, 0], [0, 1]] }
                }
            ]
        })
        .to_string();
        assert_eq!(load(&doc, false).unwrap().len(), 1);
    }

    #[test]
    fn rejects_duplicate_roadway_ids() {
        let feature = json!({
            "type": "Feature",
            "properties": { "roadway_id": "R1", "total_lanes": 2, "speed_limit": 30 },
            "geometry": { "type": "LineString", "coordinates": [[0, 0], [0, 1]] }
        });
        let doc = json!({ "type": "FeatureCollection", "features": [feature.clone(), feature] }).to_string();
        assert!(matches!(load(&doc, false), Err(IngestError::DuplicateRoadway(id)) if id == "R1"));
    }

    #[test]
    fn rejects_non_linestring() {
        let doc = collection(
            json!({ "roadway_id": "R1", "total_lanes": 2, "speed_limit": 40 }),
            json!({ "type": "Point", "coordinates": [-82.4, 28.0] }),
        );
        assert!(matches!(load(&doc, false), Err(IngestError::InvalidFeature { .. })));
    }

    #[test]
    fn rejects_bad_fields() {
        let geom = || line(json!([[0, 0], [0, 1]]));
        let cases = [
            collection(json!({ "total_lanes": 2, "speed_limit": 40 }), geom()),
            collection(json!({ "roadway_id": "", "total_lanes": 2, "speed_limit": 40 }), geom()),
            collection(json!({ "roadway_id": "R1", "speed_limit": 40 }), geom()),
            collection(json!({ "roadway_id": "R1", "total_lanes": -2, "speed_limit": 40 }), geom()),
            collection(json!({ "roadway_id": "R1", "total_lanes": 2 }), geom()),
            collection(json!({ "roadway_id": "R1", "total_lanes": 2, "speed_limit": "fast" }), geom()),
            collection(json!({ "roadway_id": "R1", "total_lanes": 2, "speed_limit": 40 }), line(json!([[0, 0]]))),
            collection(json!({ "roadway_id": "R1", "total_lanes": 2, "speed_limit": 40 }), line(json!([[0, 0], [1]]))),
            collection(json!({ "roadway_id": "R1", "total_lanes": 2, "speed_limit": 40 }), json!(null)),
        ];
        for doc in &cases {
            assert!(matches!(load(doc, false), Err(IngestError::InvalidFeature { .. })), "{doc}");
        }
    }

    #[test]
    fn rejects_wrong_document_shapes() {
        assert!(matches!(
            load(r#"{"type":"Feature","features":[]}"#, false),
            Err(IngestError::NotFeatureCollection(_))
        ));
        assert!(matches!(load(r#"{"type":"FeatureCollection","features":[]}"#, false), Err(IngestError::Empty)));
        assert!(matches!(load("not json", false), Err(IngestError::Json(_))));
    }

    #[test]
    fn deserialized_segments_are_validated() {
        let seg = json!({
            "roadway_id": "R1", "total_lanes": 2, "speed_limit_mph": 30.0, "oneway": false,
            "coords": [{ "lat": 0.0, "lon": 0.0 }, { "lat": 0.0, "lon": 0.01 }],
        });
        let ok: ro_core::RoadSegment = serde_json::from_value(seg.clone()).unwrap();
        assert_eq!(ok.coords().len(), 2);
        assert_eq!(ok.bmp, None);

        let mut short = seg;
        short["coords"] = json!([{ "lat": 0.0, "lon": 0.0 }]);
        assert!(serde_json::from_value::<ro_core::RoadSegment>(short).is_err());
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.geojson");
        let doc = collection(
            json!({ "roadway_id": "R1", "total_lanes": 2, "speed_limit": 30 }),
            line(json!([[0, 0], [0, 1]])),
        );
        std::fs::write(&path, doc).unwrap();
        assert_eq!(load_segments_geojson(&path, false).unwrap().len(), 1);

        let missing = dir.path().join("missing.geojson");
        assert!(matches!(load_segments_geojson(&missing, false), Err(IngestError::Io(_))));
    }
}

// ── Constraints ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod constraints {
    use ro_core::{LoopbackMode, RoutingEngineKind};

    use crate::{
        load_constraints, load_constraints_json, load_constraints_str, load_constraints_yaml_str,
        ConstraintsFormat, IngestError,
    };

    #[test]
    fn depot_only_takes_defaults() {
        let c = load_constraints_str(r#"{ "depot": { "lat": 28.0585, "lon": -82.4163 } }"#).unwrap();
        assert_eq!(c.depot.name, "Depot");
        assert_eq!(c.limits.max_hours_per_night, 4.0);
        assert_eq!(c.limits.max_nights, 200);
        assert_eq!(c.speed.deadhead_speed_mph, 45.0);
        assert_eq!(c.loopback.mode, LoopbackMode::Constant);
        assert_eq!(c.loopback.constant_seconds, 60.0);
        assert_eq!(c.routing_engine, RoutingEngineKind::DirectLine);
        assert_eq!(c.osm_buffer_miles, 2.0);
        assert!(!c.oneway.default);
    }

    #[test]
    fn full_document() {
        let c = load_constraints_str(
            r#"{
                "depot": { "name": "Yard", "lat": 28.0, "lon": -82.0 },
                "limits": { "max_hours_per_night": 6.5 },
                "speed": { "service_factor": 0.8 },
                "oneway": { "default": true },
                "loopback": { "mode": "routing" },
                "routing_engine": "osmnx",
                "osm_buffer_miles": 1.0,
                "osm_source": "tampa.osm.pbf"
            }"#,
        )
        .unwrap();
        assert_eq!(c.depot.name, "Yard");
        assert_eq!(c.limits.max_hours_per_night, 6.5);
        assert_eq!(c.limits.max_nights, 200);
        assert_eq!(c.speed.service_factor, 0.8);
        assert_eq!(c.speed.deadhead_factor, 1.0);
        assert!(c.oneway.default);
        assert_eq!(c.loopback.mode, LoopbackMode::Routing);
        assert_eq!(c.routing_engine, RoutingEngineKind::Network);
        assert_eq!(c.osm_source.as_deref(), Some(std::path::Path::new("tampa.osm.pbf")));
    }

    #[test]
    fn euclidean_alias() {
        let c = load_constraints_str(r#"{ "depot": { "lat": 0, "lon": 0 }, "routing_engine": "euclidean" }"#).unwrap();
        assert_eq!(c.routing_engine, RoutingEngineKind::DirectLine);
    }

    #[test]
    fn missing_depot_is_a_parse_error() {
        assert!(matches!(load_constraints_str("{}"), Err(IngestError::Json(_))));
    }

    #[test]
    fn invalid_values_are_rejected() {
        for doc in [
            r#"{ "depot": { "lat": 95, "lon": 0 } }"#,
            r#"{ "depot": { "lat": 0, "lon": 0 }, "limits": { "max_hours_per_night": 0 } }"#,
            r#"{ "depot": { "lat": 0, "lon": 0 }, "limits": { "max_nights": 0 } }"#,
            r#"{ "depot": { "lat": 0, "lon": 0 }, "speed": { "deadhead_factor": -1 } }"#,
            r#"{ "depot": { "lat": 0, "lon": 0 }, "loopback": { "constant_seconds": -5 } }"#,
        ] {
            assert!(matches!(load_constraints_str(doc), Err(IngestError::Invalid(_))), "{doc}");
        }
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("constraints.json");
        std::fs::write(&path, r#"{ "depot": { "lat": 1.5, "lon": 2.5 } }"#).unwrap();
        let c = load_constraints_json(&path).unwrap();
        assert_eq!(c.depot.lat, 1.5);
        assert_eq!(c.depot.lon, 2.5);
    }

    #[test]
    fn yaml_document_with_defaults() {
        let c = load_constraints_yaml_str(
            "depot:\n  lat: 28.0585\n  lon: -82.4163\nrouting_engine: euclidean\n",
        )
        .unwrap();
        assert_eq!(c.depot.name, "Depot");
        assert_eq!(c.depot.lat, 28.0585);
        assert_eq!(c.routing_engine, RoutingEngineKind::DirectLine);
        assert_eq!(c.limits.max_hours_per_night, 4.0);
        assert_eq!(c.limits.max_nights, 200);
        assert_eq!(c.loopback.mode, LoopbackMode::Constant);
        assert_eq!(c.osm_buffer_miles, 2.0);
    }

    #[test]
    fn yaml_full_document() {
        let c = load_constraints_yaml_str(
            r#"
depot:
  name: Tampa Yard
  lat: 28
  lon: -82
limits:
  max_hours_per_night: 6.5
  max_nights: 30
speed:
  service_factor: 0.8
oneway:
  default: true
loopback:
  mode: routing
routing_engine: osmnx
osm_buffer_miles: 1
osm_source: tampa.osm.pbf
"#,
        )
        .unwrap();
        assert_eq!(c.depot.name, "Tampa Yard");
        assert_eq!(c.depot.lat, 28.0);
        assert_eq!(c.limits.max_hours_per_night, 6.5);
        assert_eq!(c.limits.max_nights, 30);
        assert_eq!(c.speed.service_factor, 0.8);
        assert_eq!(c.speed.deadhead_speed_mph, 45.0);
        assert!(c.oneway.default);
        assert_eq!(c.loopback.mode, LoopbackMode::Routing);
        assert_eq!(c.routing_engine, RoutingEngineKind::Network);
        assert_eq!(c.osm_buffer_miles, 1.0);
        assert_eq!(c.osm_source.as_deref(), Some(std::path::Path::new("tampa.osm.pbf")));
    }

    #[test]
    fn yaml_errors() {
        assert!(matches!(load_constraints_yaml_str("limits: {}\n"), Err(IngestError::Yaml(_))));
        assert!(matches!(
            load_constraints_yaml_str("depot: { lat: 0, lon: 0 }\nlimits: { max_nights: 0 }\n"),
            Err(IngestError::Invalid(_))
        ));
    }

    #[test]
    fn format_follows_extension() {
        use std::path::Path;

        assert_eq!(ConstraintsFormat::from_path(Path::new("c.yaml")), ConstraintsFormat::Yaml);
        assert_eq!(ConstraintsFormat::from_path(Path::new("c.YML")), ConstraintsFormat::Yaml);
        assert_eq!(ConstraintsFormat::from_path(Path::new("c.json")), ConstraintsFormat::Json);
        assert_eq!(ConstraintsFormat::from_path(Path::new("constraints")), ConstraintsFormat::Json);
    }

    #[test]
    fn load_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = dir.path().join("constraints.yaml");
        std::fs::write(&yaml, "depot:\n  lat: 1.5\n  lon: 2.5\nrouting_engine: osm\n").unwrap();
        let c = load_constraints(&yaml).unwrap();
        assert_eq!(c.depot.lat, 1.5);
        assert_eq!(c.routing_engine, RoutingEngineKind::Network);

        let json = dir.path().join("constraints.json");
        std::fs::write(&json, r#"{ "depot": { "lat": 3.5, "lon": 4.5 } }"#).unwrap();
        assert_eq!(load_constraints(&json).unwrap().depot.lat, 3.5);

        // YAML content behind a .json name goes to the JSON parser.
        let misnamed = dir.path().join("yaml.json");
        std::fs::write(&misnamed, "depot:\n  lat: 1.5\n  lon: 2.5\n").unwrap();
        assert!(matches!(load_constraints(&misnamed), Err(IngestError::Json(_))));
    }
}
