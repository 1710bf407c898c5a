use quizflow_model::{
    import_graph, ImportError, ImportOptions, IntegrityPolicy, NodeKind, QuestionsDocument,
    ResultsDocument, StringsDocument,
};

const QUESTIONS: &str = r#"{
  "questions": {
    "total": 2, "offset": 0, "limit": 2,
    "data": [
      { "questions": "q1", "min-selections": 1, "max-selections": 1 },
      { "questions": "q2", "min-selections": 1, "max-selections": 3 }
    ]
  },
  "q1": {
    "total": 2, "offset": 0, "limit": 2,
    "data": [
      { "options": "o1" },
      { "options": "o2", "next": "q2" }
    ]
  },
  "q2": {
    "total": 1, "offset": 0, "limit": 1,
    "data": [ { "options": "o3", "next": null } ]
  }
}"#;

const STRINGS: &str = r#"{
  "questions": {
    "total": 2, "offset": 0, "limit": 2,
    "data": [
      { "q": "q1", "heading": "What are you making?", "sub-head": "Pick one", "btn": "Next" },
      { "q": "q2", "heading": "Which tools?", "background": "bg.png", "footerFragment": "/fragments/footer" }
    ]
  },
  "o1": { "total": 1, "offset": 0, "limit": 1, "data": [ { "options": "o1", "title": "Photos", "icon": "camera.svg" } ] },
  "o2": { "total": 1, "offset": 0, "limit": 1, "data": [ { "options": "o2", "title": "Video", "text": "Moving pictures" } ] },
  "o3": { "total": 1, "offset": 0, "limit": 1, "data": [ { "options": "o3", "title": "Timeline", "image": "timeline.png" } ] }
}"#;

const RESULTS: &str = r#"{
  "result-video": { "total": 1, "offset": 0, "limit": 1, "data": [ { "title": "Video bundle" } ] }
}"#;

fn documents() -> (QuestionsDocument, StringsDocument, ResultsDocument) {
    (
        QuestionsDocument::parse(QUESTIONS).expect("questions parse failed"),
        StringsDocument::parse(STRINGS).expect("strings parse failed"),
        ResultsDocument::parse(RESULTS).expect("results parse failed"),
    )
}

#[test]
fn imports_questions_options_and_edges() {
    let (questions, strings, results) = documents();
    let graph = import_graph(&questions, &strings, &results, &ImportOptions::default())
        .expect("import failed");

    assert_eq!(graph.questions().count(), 2);
    assert_eq!(graph.options().count(), 3);
    assert_eq!(graph.edges.len(), 3);

    let q1 = graph.node("q1").unwrap().as_question().unwrap();
    assert_eq!(q1.label.as_deref(), Some("What are you making?"));
    assert_eq!(q1.subtitle.as_deref(), Some("Pick one"));
    assert_eq!(q1.button_label.as_deref(), Some("Next"));
    assert_eq!(q1.min_selections, Some(1));
    assert_eq!(q1.max_selections, Some(1));

    let q2 = graph.node("q2").unwrap().as_question().unwrap();
    assert_eq!(q2.background_image.as_deref(), Some("bg.png"));
    assert_eq!(q2.footer_fragment.as_deref(), Some("/fragments/footer"));
    assert_eq!(q2.max_selections, Some(3));

    let o1 = graph.node("o1").unwrap().as_option().unwrap();
    assert_eq!(o1.label.as_deref(), Some("Photos"));
    assert_eq!(o1.icon.as_deref(), Some("camera.svg"));
    assert!(o1.is_terminal());

    let o2 = graph.node("o2").unwrap().as_option().unwrap();
    assert_eq!(o2.next.as_deref(), Some("q2"));

    let o3 = graph.node("o3").unwrap().as_option().unwrap();
    assert!(o3.is_terminal());

    let edge = graph.edges.iter().find(|e| e.target == "o2").unwrap();
    assert_eq!(edge.id, "eq1-o2");
    assert_eq!(edge.source, "q1");
    assert!(edge.source_handle.is_none());
    assert_eq!(graph.parent_of("o3"), Some("q2"));
}

#[test]
fn imported_graph_has_no_dangling_edges() {
    let (questions, strings, results) = documents();
    let graph = import_graph(&questions, &strings, &results, &ImportOptions::default()).unwrap();
    assert!(graph.validate().is_ok());
    for edge in &graph.edges {
        assert_eq!(graph.node(&edge.source).unwrap().kind(), NodeKind::Question);
        assert_eq!(graph.node(&edge.target).unwrap().kind(), NodeKind::Option);
    }
}

#[test]
fn missing_option_strings_abort_import() {
    let (questions, mut strings, results) = documents();
    strings.options.remove("o2");
    let err = import_graph(&questions, &strings, &results, &ImportOptions::default()).unwrap_err();
    assert_eq!(err, ImportError::MissingOptionStrings("o2".into()));
}

#[test]
fn missing_question_strings_abort_import() {
    let (questions, mut strings, results) = documents();
    strings.questions.data.retain(|entry| entry.id != "q2");
    let err = import_graph(&questions, &strings, &results, &ImportOptions::default()).unwrap_err();
    assert_eq!(err, ImportError::MissingQuestionStrings("q2".into()));
}

#[test]
fn options_for_unknown_question_are_rejected() {
    let (mut questions, strings, results) = documents();
    let stray = questions.options.get("q2").cloned().unwrap();
    questions.options.insert("q9".into(), stray);
    let err = import_graph(&questions, &strings, &results, &ImportOptions::default()).unwrap_err();
    assert_eq!(err, ImportError::UnknownQuestion("q9".into()));
}

#[test]
fn dangling_next_is_rejected_by_default() {
    let (mut questions, strings, results) = documents();
    questions.questions.data.retain(|entry| entry.id != "q2");
    questions.options.remove("q2");
    let err = import_graph(&questions, &strings, &results, &ImportOptions::default()).unwrap_err();
    assert_eq!(
        err,
        ImportError::DanglingNext {
            option: "o2".into(),
            next: "q2".into(),
        }
    );
}

#[test]
fn dangling_next_is_kept_when_warning() {
    let (mut questions, strings, results) = documents();
    questions.questions.data.retain(|entry| entry.id != "q2");
    questions.options.remove("q2");
    let options = ImportOptions {
        dangling_next: IntegrityPolicy::Warn,
    };
    let graph = import_graph(&questions, &strings, &results, &options).unwrap();
    assert_eq!(graph.questions().count(), 1);
    assert_eq!(graph.options().count(), 2);
    let o2 = graph.node("o2").unwrap().as_option().unwrap();
    assert_eq!(o2.next.as_deref(), Some("q2"));
}

#[test]
fn next_may_name_a_result() {
    let (mut questions, strings, results) = documents();
    questions.options.get_mut("q1").unwrap().data[0].next = Some("result-video".into());
    let graph = import_graph(&questions, &strings, &results, &ImportOptions::default()).unwrap();
    let o1 = graph.node("o1").unwrap().as_option().unwrap();
    assert_eq!(o1.next.as_deref(), Some("result-video"));
}

#[test]
fn shared_option_is_created_once() {
    let (mut questions, strings, results) = documents();
    let shared = questions.options["q1"].data[0].clone();
    questions.options.get_mut("q2").unwrap().data.push(shared.clone());
    questions.options.get_mut("q2").unwrap().data.push(shared);
    questions.options.get_mut("q2").unwrap().limit = 3;
    let graph = import_graph(&questions, &strings, &results, &ImportOptions::default()).unwrap();

    assert_eq!(graph.nodes.iter().filter(|n| n.id == "o1").count(), 1);
    let into_o1: Vec<_> = graph.edges.iter().filter(|e| e.target == "o1").collect();
    assert_eq!(into_o1.len(), 2);
    assert!(graph.validate().is_ok());
}

#[test]
fn question_and_option_ids_must_not_collide() {
    let (mut questions, strings, results) = documents();
    questions.options.get_mut("q1").unwrap().data[0].id = "q2".into();
    let err = import_graph(&questions, &strings, &results, &ImportOptions::default()).unwrap_err();
    assert_eq!(err, ImportError::IdConflict("q2".into()));
}

#[test]
fn duplicate_questions_are_rejected() {
    let (mut questions, strings, results) = documents();
    let again = questions.questions.data[0].clone();
    questions.questions.data.push(again);
    let err = import_graph(&questions, &strings, &results, &ImportOptions::default()).unwrap_err();
    assert_eq!(err, ImportError::DuplicateQuestion("q1".into()));
}

#[test]
fn malformed_documents_name_the_file() {
    let err = QuestionsDocument::parse("{\"questions\": 3}").unwrap_err();
    assert!(err.to_string().contains("questions.json"));

    let err = StringsDocument::parse(
        r#"{"questions": {"total": 1, "offset": 0, "limit": 0, "data": [{"q": "q1"}]}}"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("strings.json"));
    assert!(err.to_string().contains("limit"));

    let err = ResultsDocument::parse("[]").unwrap_err();
    assert!(err.to_string().contains("results.json"));
}
