use nalgebra::Vector3;
use star_system::{BodyType, SystemPath};
use std::sync::Arc;

use crate::body::{Body, BodyKind};
use crate::config::SpaceConfig;
use crate::error::SpaceError;
use crate::frame::FrameId;
use crate::persistence::{SavedBody, SAVE_VERSION};
use crate::space::Space;
use crate::terrain::SmoothTerrainSource;
use crate::test_fixtures::{generated, sol, sol_space, STAR_MIXES};

fn busy_space() -> Space {
    let mut space = sol_space();
    let mut ship = Body::dynamic("ship", BodyKind::Ship, 1000.0, 10.0, FrameId(0), Vector3::new(1e12, 0.0, 0.0));
    ship.set_velocity(Vector3::new(0.0, 100.0, 0.0));
    space.add_body(ship);
    for _ in 0..5 {
        space.time_step(1.0, &mut Vec::new());
    }
    space
}

fn frame_links(space: &Space) -> Vec<(Option<FrameId>, Vec<FrameId>)> {
    space.frames().iter().map(|f| (f.parent, f.children.clone())).collect()
}

fn body_frames(space: &Space) -> Vec<(u32, Option<FrameId>)> {
    space.bodies().map(|b| (b.id.0, b.frame)).collect()
}

fn load_json(document: &serde_json::Value) -> crate::Result<Space> {
    Space::from_json(document, Arc::new(sol()), SpaceConfig::default(), &SmoothTerrainSource)
}

#[test]
fn test_json_round_trip() {
    let space = busy_space();
    let loaded = load_json(&space.to_json().unwrap()).unwrap();

    assert_eq!(loaded.frames().len(), space.frames().len());
    assert_eq!(frame_links(&loaded), frame_links(&space));
    assert_eq!(body_frames(&loaded), body_frames(&space));
    assert_eq!(loaded.time(), space.time());
}

#[test]
fn test_bincode_round_trip() {
    for mix in STAR_MIXES {
        let system = Arc::new(generated(21, mix));
        let space = Space::new(system.clone(), SpaceConfig::default(), &SmoothTerrainSource, 5e6);

        let mut buffer = Vec::new();
        space.save(&mut buffer).unwrap();
        let loaded = Space::load(&buffer[..], system, SpaceConfig::default(), &SmoothTerrainSource).unwrap();

        assert_eq!(frame_links(&loaded), frame_links(&space));
        assert_eq!(body_frames(&loaded), body_frames(&space));
    }
}

#[test]
fn test_loaded_space_keeps_running() {
    let space = busy_space();
    let mut loaded = load_json(&space.to_json().unwrap()).unwrap();

    let planet = loaded.bodies().find(|b| b.kind == BodyKind::Planet).unwrap().id;
    assert!(loaded.terrain_for(planet).is_some());
    assert_eq!(loaded.placements().placed_on(planet).len(), 1);

    let next = loaded.add_body(Body::new("crate", BodyKind::Cargo, crate::Motion::Fixed, 1.0));
    assert_eq!(next.0, 5);
    loaded.time_step(1.0, &mut Vec::new());
    assert_eq!(loaded.time(), 6.0);
}

#[test]
fn test_transit_bodies_are_placeholders() {
    let mut space = sol_space();
    let mut ship = Body::dynamic("jumping", BodyKind::Ship, 1.0, 1.0, FrameId(0), Vector3::zeros());
    ship.in_transit = true;
    let id = space.add_body(ship);

    let saved = space.to_saved();
    assert_eq!(saved.version, SAVE_VERSION);
    assert_eq!(saved.bodies.last(), Some(&SavedBody::NotInSpace));

    let loaded = load_json(&space.to_json().unwrap()).unwrap();
    assert!(loaded.body(id).is_none());
    assert_eq!(loaded.bodies().count(), 4);
}

#[test]
fn test_missing_or_mistyped_fields_are_corrupt() {
    let document = sol_space().to_json().unwrap();

    for field in ["frames", "bodies"] {
        let mut broken = document.clone();
        broken.as_object_mut().unwrap().remove(field);
        assert!(matches!(load_json(&broken), Err(SpaceError::CorruptSave(_))), "without {field}");

        let mut broken = document.clone();
        broken[field] = serde_json::json!("nonsense");
        assert!(matches!(load_json(&broken), Err(SpaceError::CorruptSave(_))), "mistyped {field}");
    }

    assert!(matches!(load_json(&serde_json::json!([1, 2])), Err(SpaceError::CorruptSave(_))));

    let mut broken = document.clone();
    broken["bodies"][0] = serde_json::json!({ "Normal": { "id": 0 } });
    assert!(matches!(load_json(&broken), Err(SpaceError::CorruptSave(_))));
}

#[test]
fn test_dangling_links_are_corrupt() {
    let document = sol_space().to_json().unwrap();

    let mut broken = document.clone();
    broken["bodies"][1]["Normal"]["frame"] = serde_json::json!(40);
    let err = load_json(&broken).err().unwrap();
    assert!(err.to_string().starts_with("corrupt save"), "{err}");

    let mut broken = document.clone();
    broken["frames"]["frames"][1]["parent"] = serde_json::json!(3);
    assert!(matches!(load_json(&broken), Err(SpaceError::CorruptSave(_))));

    let mut broken = document.clone();
    broken["bodies"][2]["Normal"]["id"] = serde_json::json!(0);
    assert!(matches!(load_json(&broken), Err(SpaceError::CorruptSave(_))));
}

#[test]
fn test_save_for_another_system_is_rejected() {
    let document = sol_space().to_json().unwrap();
    let other = Arc::new(generated(1, &[BodyType::StarG]));
    assert_ne!(other.path, SystemPath::system(0, 0, 0, 0));
    let result = Space::from_json(&document, other, SpaceConfig::default(), &SmoothTerrainSource);
    assert!(matches!(result, Err(SpaceError::CorruptSave(_))));
}

#[test]
fn test_version_mismatch() {
    let mut document = sol_space().to_json().unwrap();
    document["version"] = serde_json::json!(SAVE_VERSION + 1);
    match load_json(&document) {
        Err(SpaceError::VersionMismatch { expected, found }) => {
            assert_eq!(expected, SAVE_VERSION);
            assert_eq!(found, SAVE_VERSION + 1);
        }
        other => panic!("expected version mismatch, got {:?}", other.err()),
    }
}

fn load_bincode(buffer: &[u8]) -> Result<Space, SpaceError> {
    Space::load(buffer, Arc::new(sol()), SpaceConfig::default(), &SmoothTerrainSource)
}

#[test]
fn test_truncated_bincode_is_corrupt() {
    let space = sol_space();
    let mut buffer = Vec::new();
    space.save(&mut buffer).unwrap();
    buffer.truncate(buffer.len() / 2);
    assert!(matches!(load_bincode(&buffer), Err(SpaceError::CorruptSave(_))));
}

#[test]
fn test_garbled_bincode_is_corrupt() {
    let space = sol_space();
    let mut buffer = Vec::new();
    space.save(&mut buffer).unwrap();
    // the leading version field survives; everything after it is noise
    for byte in buffer.iter_mut().skip(4) {
        *byte = 0xff;
    }
    assert!(matches!(load_bincode(&buffer), Err(SpaceError::CorruptSave(_))));
}

#[test]
fn test_failing_reader_is_io() {
    struct Broken;
    impl std::io::Read for Broken {
        fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "no access"))
        }
    }
    let result = Space::load(Broken, Arc::new(sol()), SpaceConfig::default(), &SmoothTerrainSource);
    assert!(matches!(result, Err(SpaceError::Io(_))));
}
