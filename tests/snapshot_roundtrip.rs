//! Integration tests taking snapshot JSON through build, planning, and a
//! save/load round-trip on real files.

use advcopy::prelude::{
    plan_copy_to_shot, Convention, Error, Forest, FrameSpan, Marker, ProjectSnapshot,
};

use tempfile::NamedTempFile;

const PROJECT_JSON: &str = r#"{
  "containers": [
    { "name": "+SC17-FOREST+", "children": ["+VFX-SC17-FOREST+"] },
    { "name": "+VFX-SC17-FOREST+", "children": ["SHOT-VFX-SC17-FOREST"] },
    { "name": "SHOT-VFX-SC17-FOREST", "members": ["HERO"] },
    { "name": "+LOC-FOREST+", "children": ["LOC-FOREST-MODEL"] }
  ],
  "markers": [
    { "name": "CAM-SC17-SH100", "frame": 10, "camera": "CamA" },
    { "name": "CAM-SC17-SH110", "frame": 50, "camera": "CamB" }
  ],
  "frame_start": 1,
  "frame_end": 200,
  "current_frame": 30
}"#;

#[test]
fn test_snapshot_json_drives_a_shot_plan() {
    let snapshot =
        ProjectSnapshot::from_reader(PROJECT_JSON.as_bytes()).expect("Failed to parse JSON");
    let mut forest = snapshot.build().expect("Failed to build forest");

    // Members become objects on the fly, unlisted children become leaves
    let hero = forest.object_by_name("HERO").expect("HERO should exist");
    assert!(forest.container_by_name("LOC-FOREST-MODEL").is_some());

    let conv = Convention::prefix();
    let plan = plan_copy_to_shot(
        &mut forest,
        &conv,
        hero,
        &snapshot.markers,
        snapshot.current_frame,
        snapshot.frame_end,
    )
    .expect("planning should not fail")
    .expect("frame 30 sits in SH100");

    assert_eq!(plan.steps.len(), 1);
    assert_eq!(plan.steps[0].copy_name, "HERO.SC17.SH100");
    let target = forest.container(plan.steps[0].target).expect("target exists");
    assert_eq!(target.name(), "VFX-SC17-SH100");
    assert_eq!(plan.visibility[0].span, FrameSpan::new(10, 49).unwrap());
}

#[test]
fn test_capture_save_load_round_trip() {
    let temp = NamedTempFile::new().expect("Failed to create temp file");
    let path = temp.path();

    let mut forest = Forest::new();
    let root = forest.create_root("+SC17-FOREST+").expect("root");
    let group = forest.get_or_create_child(root, "MODEL-SC17-FOREST").expect("group");
    let hero = forest.add_object("HERO").expect("object");
    forest.link(hero, group).expect("link");

    let markers = vec![Marker::new("CAM-SC17-SH100", 10).with_camera("CamA")];
    let snapshot = ProjectSnapshot::capture(&forest, &markers, 1, 250, 30);
    snapshot.save(path).expect("Failed to save snapshot");

    let loaded = ProjectSnapshot::load(path).expect("Failed to load snapshot");
    assert_eq!(loaded, snapshot);

    let rebuilt = loaded.build().expect("Failed to rebuild forest");
    assert_eq!(rebuilt.container_count(), forest.container_count());
    assert_eq!(rebuilt.object_count(), forest.object_count());

    let group = rebuilt.container_by_name("MODEL-SC17-FOREST").expect("group survives");
    let parent = rebuilt.parent_of(group).expect("still parented");
    let parent_name = rebuilt.container(parent).map(|c| c.name().to_string());
    assert_eq!(parent_name.as_deref(), Some("+SC17-FOREST+"));

    let hero = rebuilt.object_by_name("HERO").expect("object survives");
    let object = rebuilt.object(hero).expect("object record");
    assert_eq!(object.memberships(), [group]);
}

#[test]
fn test_double_parented_child_is_a_structure_error() {
    let json = r#"{
      "containers": [
        { "name": "A", "children": ["C"] },
        { "name": "B", "children": ["C"] },
        { "name": "C" }
      ]
    }"#;
    let snapshot = ProjectSnapshot::from_reader(json.as_bytes()).expect("Failed to parse JSON");
    let err = snapshot.build().expect_err("C cannot have two parents");
    assert!(matches!(err, Error::AlreadyParented { .. }));
}

#[test]
fn test_malformed_json_is_an_error() {
    let err = ProjectSnapshot::from_reader("not json".as_bytes())
        .expect_err("garbage should not parse");
    assert!(matches!(err, Error::Json(_)));

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let err = ProjectSnapshot::load(dir.path().join("missing.json"))
        .expect_err("missing file should not load");
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_frame_defaults_fill_in() {
    let snapshot = ProjectSnapshot::from_reader(r#"{ "containers": [] }"#.as_bytes())
        .expect("Failed to parse JSON");
    assert_eq!(snapshot.frame_start, 1);
    assert_eq!(snapshot.frame_end, 250);
    assert_eq!(snapshot.current_frame, 1);
    assert!(snapshot.build().expect("empty snapshot builds").roots().next().is_none());
}
