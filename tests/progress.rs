//! Integration tests for plan and progress persistence through JSON files

use correlativas::core::library::Upsert;
use correlativas::core::models::{Curriculum, RawCourse, Term};
use correlativas::{CompletedSet, CurriculumError, JsonFileStore, PlanLibrary, Planner, Repository};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const PLAN: &str = "Licenciatura en Ciencias de Datos";

fn stores(dir: &TempDir) -> (PathBuf, PathBuf) {
    (
        dir.path().join("plans.json"),
        dir.path().join("state").join("progress.json"),
    )
}

fn open(plans: &Path, progress: &Path) -> Planner<JsonFileStore, JsonFileStore> {
    Planner::open(JsonFileStore::new(plans), JsonFileStore::new(progress))
        .expect("Failed to open planner")
}

#[test]
fn test_first_run_uses_defaults_without_writing() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let (plans, progress) = stores(&dir);

    let planner = open(&plans, &progress);
    assert_eq!(planner.library().names()[0], PLAN);
    assert!(!plans.exists());
    assert!(!progress.exists());
}

#[test]
fn test_check_persists_and_reloads() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let (plans, progress) = stores(&dir);

    let mut planner = open(&plans, &progress);
    let saved = planner
        .on_course_done_changed(PLAN, "Análisis Matemático A", true)
        .expect("Failed to check course");
    assert_eq!(saved.for_curriculum(PLAN), ["y1-m1".to_string()]);

    let on_disk: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&progress).expect("progress written"))
            .expect("progress is JSON");
    assert_eq!(on_disk, serde_json::json!({ "Licenciatura en Ciencias de Datos": ["y1-m1"] }));

    let reopened = open(&plans, &progress);
    let graph = reopened.graph(PLAN).expect("plan exists");
    assert!(graph.course("y1-m1").expect("course exists").done);
}

#[test]
fn test_completing_a_year_unlocks_courses_requiring_it() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let (plans, progress) = stores(&dir);
    let mut planner = open(&plans, &progress);

    let graph = planner.graph(PLAN).expect("plan exists");
    let analisis = graph.find_course("Análisis I").expect("course exists").id.clone();
    assert!(!graph.course(&analisis).expect("course exists").enabled);

    let cbc: Vec<String> = graph
        .filter_by_year("CBC")
        .into_iter()
        .map(|c| c.id.clone())
        .collect();
    for id in &cbc {
        planner
            .on_course_done_changed(PLAN, id, true)
            .expect("Failed to check course");
    }

    let graph = planner.graph(PLAN).expect("plan exists");
    assert!(graph.course(&analisis).expect("course exists").enabled);
    assert_eq!(planner.completed().for_curriculum(PLAN).len(), cbc.len());

    // unchecking one CBC course locks it again
    planner
        .on_course_done_changed(PLAN, &cbc[0], false)
        .expect("Failed to uncheck course");
    let graph = planner.graph(PLAN).expect("plan exists");
    assert!(!graph.course(&analisis).expect("course exists").enabled);
}

#[test]
fn test_unknown_course_leaves_progress_file_untouched() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let (plans, progress) = stores(&dir);
    let mut planner = open(&plans, &progress);

    let result = planner.on_course_done_changed(PLAN, "Astrología", true);
    assert!(matches!(result, Err(CurriculumError::UnknownCourse(_))));
    assert!(!progress.exists());
}

#[test]
fn test_import_export_round_trip_through_files() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let (plans, progress) = stores(&dir);
    let mut planner = open(&plans, &progress);

    let custom = Curriculum::new("Ingeniería")
        .with_year(
            "Primer año",
            vec![
                RawCourse::new("Física I", Term::FirstHalf),
                RawCourse::new("Física II", Term::SecondHalf).requiring("Física I"),
            ],
        )
        .with_year("Segundo año", vec![RawCourse::new("Proyecto", Term::FullYear).requiring("Primer año")]);

    let outcome = planner
        .import_json(&custom.to_json().expect("serializes"))
        .expect("Failed to import");
    assert_eq!(outcome, Upsert::Added);

    let reopened = open(&plans, &progress);
    let exported = reopened.export_json("Ingeniería").expect("plan exists");
    assert_eq!(Curriculum::from_json(&exported).expect("parses"), custom);

    let graph = reopened.graph("Ingeniería").expect("plan exists");
    assert_eq!(graph.edges().len(), 3);
}

#[test]
fn test_malformed_import_rejected() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let (plans, progress) = stores(&dir);
    let mut planner = open(&plans, &progress);

    let bad_term = r#"{"name":"X","plan":{"Primer año":[{"label":"A","cuatrimestre":7}]}}"#;
    assert!(matches!(
        planner.import_json(bad_term),
        Err(CurriculumError::InvalidImport(_))
    ));
    assert!(matches!(
        planner.import_json("not json"),
        Err(CurriculumError::InvalidImport(_))
    ));
    assert!(!plans.exists());
}

#[test]
fn test_reset_plans_writes_defaults() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let (plans, progress) = stores(&dir);
    let mut planner = open(&plans, &progress);

    planner
        .import_json(&Curriculum::new("Temporal").to_json().expect("serializes"))
        .expect("Failed to import");
    planner.reset_plans().expect("Failed to reset");

    let stored: Option<PlanLibrary> = JsonFileStore::new(&plans).load().expect("readable");
    assert_eq!(stored, Some(PlanLibrary::defaults().expect("defaults parse")));
}

#[test]
fn test_corrupt_progress_file_is_an_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let (plans, progress) = stores(&dir);
    fs::create_dir_all(progress.parent().expect("has parent")).expect("mkdir");
    fs::write(&progress, "{ not json").expect("write");

    let result = Planner::open(JsonFileStore::new(&plans), JsonFileStore::new(&progress));
    assert!(matches!(result, Err(CurriculumError::Json(_))));

    let store = JsonFileStore::new(&progress);
    let loaded: correlativas::Result<Option<CompletedSet>> = store.load();
    assert!(loaded.is_err());
}
