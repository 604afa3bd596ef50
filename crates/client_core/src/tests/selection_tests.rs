use super::*;

fn controller(edges: &[(&str, &str)]) -> PairSelectionController {
    let catalog = PairCatalog::load(edges.iter().map(|(s, t)| Edge::new(*s, *t)));
    let mut controller = PairSelectionController::new(Arc::new(catalog));
    controller.init(Some(&default_preferred_edge()));
    controller
}

fn ready_state(source: &str, target: Option<&str>) -> SelectionState {
    SelectionState::Ready {
        source: LanguageId::new(source),
        target: target.map(LanguageId::new),
    }
}

#[test]
fn starts_uninitialized() {
    let controller = PairSelectionController::new(Arc::new(PairCatalog::empty()));
    assert_eq!(controller.state(), &SelectionState::Uninitialized);
    assert_eq!(controller.selection(), Selection::default());
}

#[test]
fn init_on_empty_catalog_is_empty_state() {
    let controller = controller(&[]);
    assert_eq!(controller.state(), &SelectionState::Empty);
    assert!(controller.current_edge().is_none());
}

#[test]
fn init_prefers_default_pair_when_present() {
    let controller = controller(&[("c#", "java"), ("c#", "c")]);
    assert_eq!(controller.state(), &ready_state("c#", Some("c")));
}

#[test]
fn init_falls_back_to_first_edge() {
    let controller = controller(&[("py", "cpp")]);
    assert_eq!(controller.state(), &ready_state("py", Some("cpp")));
}

#[test]
fn set_source_then_target_selects_every_edge() {
    let edges = [("c#", "c"), ("c#", "java"), ("c", "java"), ("java", "rust")];
    let mut controller = controller(&edges);
    for (source, target) in edges {
        controller
            .set_source(&LanguageId::new(source))
            .expect("known source");
        controller
            .set_target(&LanguageId::new(target))
            .expect("supported target");
        assert_eq!(controller.state(), &ready_state(source, Some(target)));
    }
}

#[test]
fn set_source_keeps_reachable_target() {
    let mut controller = controller(&[("c#", "java"), ("c", "python"), ("c", "java")]);
    assert_eq!(controller.state(), &ready_state("c#", Some("java")));

    controller.set_source(&LanguageId::new("c")).expect("source");
    assert_eq!(controller.state(), &ready_state("c", Some("java")));
}

#[test]
fn set_source_replaces_unreachable_target_with_first_available() {
    let mut controller = controller(&[("c#", "c"), ("java", "rust"), ("java", "python")]);
    controller.set_source(&LanguageId::new("java")).expect("source");
    assert_eq!(controller.state(), &ready_state("java", Some("rust")));
}

#[test]
fn set_source_rejects_unknown_language_without_change() {
    let mut controller = controller(&[("c#", "c")]);
    let err = controller
        .set_source(&LanguageId::new("cobol"))
        .expect_err("unknown");
    assert_eq!(err.kind(), shared::error::ErrorKind::Validation);
    assert_eq!(controller.state(), &ready_state("c#", Some("c")));
}

#[test]
fn set_target_rejects_unsupported_edge_without_change() {
    let mut controller = controller(&[("c#", "c"), ("c", "java")]);
    let err = controller
        .set_target(&LanguageId::new("java"))
        .expect_err("unsupported");
    assert_eq!(
        err,
        TranslatorError::edge_not_supported(Edge::new("c#", "java"))
    );
    assert_eq!(controller.state(), &ready_state("c#", Some("c")));
}

#[test]
fn swap_reverses_supported_pair_without_advisory() {
    let mut controller = controller(&[("c#", "c"), ("c", "c#")]);
    let advisory = controller.swap().expect("swap");
    assert!(advisory.is_none());
    assert_eq!(controller.state(), &ready_state("c", Some("c#")));

    controller.swap().expect("swap back");
    assert_eq!(controller.state(), &ready_state("c#", Some("c")));
}

#[test]
fn swap_falls_back_to_first_target_of_new_source() {
    let mut controller = controller(&[("c#", "java"), ("java", "rust"), ("java", "python")]);
    let advisory = controller
        .swap()
        .expect("swap")
        .expect("advisory for unsupported direction");

    assert_eq!(controller.state(), &ready_state("java", Some("rust")));
    assert_eq!(advisory.requested, Edge::new("java", "c#"));
    assert_eq!(advisory.substituted, Some(LanguageId::new("rust")));
    let text = advisory.to_string();
    assert!(text.contains("C#"), "{text}");
    assert!(text.contains("JAVA"), "{text}");
    assert!(text.contains("not a supported pair"), "{text}");
}

#[test]
fn swap_to_source_without_targets_leaves_target_empty() {
    let mut controller = controller(&[("c#", "java")]);
    let advisory = controller.swap().expect("swap").expect("advisory");

    assert_eq!(controller.state(), &ready_state("java", None));
    assert_eq!(advisory.substituted, None);
    assert!(advisory
        .to_string()
        .contains("No target language is available for JAVA"));

    let err = controller.swap().expect_err("incomplete selection");
    assert_eq!(err.kind(), shared::error::ErrorKind::Validation);
    assert_eq!(controller.state(), &ready_state("java", None));
}

#[test]
fn swap_is_not_an_involution_without_reverse_edge() {
    let mut controller = controller(&[("c#", "java"), ("java", "rust"), ("rust", "c")]);
    controller.swap().expect("first swap");
    controller.swap().expect("second swap");
    assert_eq!(controller.state(), &ready_state("rust", Some("c")));
}

#[test]
fn available_targets_follow_current_source() {
    let controller = controller(&[("c#", "c"), ("c#", "java"), ("c", "java")]);
    assert_eq!(
        controller.available_targets(),
        vec![LanguageId::new("c"), LanguageId::new("java")]
    );
    assert_eq!(
        controller.available_sources(),
        vec![LanguageId::new("c#"), LanguageId::new("c")]
    );
}

#[test]
fn typed_input_resolves_to_served_spelling() {
    let mut controller = controller(&[("Python", "Java"), ("C#", "c#"), ("c#", "Java")]);
    assert_eq!(controller.state(), &ready_state("Python", Some("Java")));

    let source = controller.resolve_source("python");
    assert_eq!(source.as_str(), "Python");
    controller.set_source(&source).expect("source");

    assert_eq!(controller.resolve_source("c#").as_str(), "c#");
    assert_eq!(controller.resolve_source("C#").as_str(), "C#");
    assert_eq!(controller.resolve_target(" JAVA ").as_str(), "Java");
    assert_eq!(controller.resolve_source("cobol").as_str(), "cobol");
}

#[test]
fn ids_differing_only_in_case_are_distinct_edges() {
    let catalog = PairCatalog::load([Edge::new("C#", "c"), Edge::new("c#", "c")]);
    assert_eq!(catalog.len(), 2);
    assert_eq!(
        catalog.available_sources(),
        vec![LanguageId::new("C#"), LanguageId::new("c#")]
    );
}
