//! Integration smoke tests for `correlativas`

use correlativas::{get_version, CompletedSet, CurriculumGraph, PlanLibrary};

#[test]
fn version_is_not_empty() {
    let v = get_version();
    assert!(!v.trim().is_empty());
}

#[test]
fn bundled_plans_build() {
    let library = PlanLibrary::defaults().expect("bundled plans parse");
    for curriculum in library.plans() {
        let graph = CurriculumGraph::build(curriculum, &CompletedSet::new());
        assert_eq!(graph.courses().len(), curriculum.course_count());
        assert!(!graph.edges().is_empty(), "{} has no edges", curriculum.name);
    }
}
