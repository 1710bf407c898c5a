mod common;

use std::fs;

use quizflow_editor::{fetch_documents, source_for, DirectorySource, FetchError, LoadError};

#[test]
fn reads_all_three_documents_from_a_directory() {
    let dir = tempfile::tempdir().unwrap();
    common::write_documents(dir.path());

    let documents = fetch_documents(&DirectorySource::new(dir.path())).expect("fetch failed");
    assert_eq!(documents.questions.questions.len(), 2);
    assert_eq!(documents.strings.options.len(), 3);
    assert!(documents.results.contains("bundle"));
}

#[test]
fn missing_document_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    common::write_documents(dir.path());
    fs::remove_file(dir.path().join("strings.json")).unwrap();

    let err = fetch_documents(&DirectorySource::new(dir.path())).unwrap_err();
    assert!(matches!(err, LoadError::Fetch(FetchError::Io { ref name, .. }) if name == "strings.json"));
    assert!(err.to_string().contains("error fetching strings.json"));
}

#[test]
fn malformed_document_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    common::write_documents(dir.path());
    fs::write(dir.path().join("results.json"), "not json").unwrap();

    let err = fetch_documents(&DirectorySource::new(dir.path())).unwrap_err();
    assert!(matches!(err, LoadError::Parse(_)));
    assert!(err.to_string().contains("results.json"));
}

#[test]
fn plain_paths_become_directory_sources() {
    let dir = tempfile::tempdir().unwrap();
    common::write_documents(dir.path());
    let location = dir.path().to_str().unwrap();
    let source = source_for(location).unwrap();
    assert_eq!(source.describe(), location);
    assert!(source.fetch("questions.json").unwrap().contains("q1"));
}

#[cfg(feature = "http")]
mod http {
    use quizflow_editor::{fetch_documents, source_for, FetchError, HttpSource, LoadError};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::common;

    async fn serve(status_for_strings: u16) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/quiz/questions.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(common::QUESTIONS))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/quiz/strings.json"))
            .respond_with(ResponseTemplate::new(status_for_strings).set_body_string(common::STRINGS))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/quiz/results.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(common::RESULTS))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn reads_all_three_documents_over_http() {
        let server = serve(200).await;
        let base = format!("{}/quiz", server.uri());

        let documents = tokio::task::spawn_blocking(move || {
            let source = source_for(&base).unwrap();
            fetch_documents(&*source)
        })
        .await
        .unwrap()
        .expect("fetch failed");
        assert_eq!(documents.questions.questions.len(), 2);
        assert!(documents.results.contains("bundle"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn error_status_aborts_and_names_the_file() {
        let server = serve(404).await;
        let base = format!("{}/quiz/", server.uri());

        let err = tokio::task::spawn_blocking(move || {
            let source = HttpSource::new(base).unwrap();
            fetch_documents(&source)
        })
        .await
        .unwrap()
        .unwrap_err();
        assert!(matches!(
            err,
            LoadError::Fetch(FetchError::Status { ref name, ref status })
                if name == "strings.json" && status.starts_with("404")
        ));
        assert!(err.to_string().contains("error fetching strings.json"));
    }
}
