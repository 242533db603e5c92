use super::*;
use crate::foundation::core::Output;

const SCENE: &str = r#"{
  "viewport_height": 800,
  "elements": [
    { "id": "title", "directives": "enter 0; duration 120; opacity-ease 0 0 1 1", "height": 200 },
    { "directives": "enter with-exit title" },
    { "id": "pin", "directives": "!absolute; enter 60; leave 200; x 20; y 10 80" }
  ]
}"#;

#[test]
fn parses_json_with_defaults() {
    let scene = Scene::from_reader(SCENE.as_bytes()).unwrap();
    let def = scene.def();
    assert_eq!(def.viewport_height, 800.0);
    assert_eq!(def.elements.len(), 3);
    assert_eq!(def.elements[1].id, None);
    assert_eq!(def.elements[1].height, 0.0);
}

#[test]
fn entries_and_geometry_line_up() {
    let scene = Scene::from_reader(SCENE.as_bytes()).unwrap();
    let entries = scene.entries();
    assert_eq!(entries[2].handle, ElementHandle(2));
    assert_eq!(entries[2].id.as_deref(), Some("pin"));
    let g = scene.geometry();
    use crate::scene::geometry::GeometryProvider as _;
    assert_eq!(g.height_of(entries[0].handle), 200.0);
}

#[test]
fn compiles_end_to_end() {
    let scene = Scene::from_reader(SCENE.as_bytes()).unwrap();
    let report = scene.compile(&CompileOpts::default()).unwrap();
    assert!(report.diagnostics.is_empty());

    let title = report.record("title").unwrap();
    assert_eq!(title.height_vh, 25.0);
    let second = report.record("scroll-1").unwrap();
    assert_eq!(second.enter_at, 120.0);
    assert_eq!(report.total_extent, 120.0);

    let pin = report.record("pin").unwrap().sample(130.0);
    assert_eq!(pin.x, Output::Vw(20.0));
    assert_eq!(pin.y, Output::Vh(45.0));
}

#[test]
fn rejects_bad_json() {
    let err = Scene::from_reader("{ \"elements\": 3 }".as_bytes()).unwrap_err();
    assert!(matches!(err, ScrollcueError::Serde(_)));
}

#[test]
fn validate_rejects_bad_geometry() {
    let mut def: SceneDef = serde_json::from_str(SCENE).unwrap();
    def.viewport_height = 0.0;
    let err = Scene::from_def(def.clone()).compile(&CompileOpts::default()).unwrap_err();
    assert!(matches!(err, ScrollcueError::Validation(_)));

    def.viewport_height = 800.0;
    def.elements[0].height = -1.0;
    let err = Scene::from_def(def).validate().unwrap_err();
    assert!(err.to_string().contains("element 0"));
}

#[test]
fn missing_file_is_reported() {
    let err = Scene::from_path("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("not/here.json"));
}
