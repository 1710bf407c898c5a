#![allow(dead_code)]

use std::fs;
use std::path::Path;

pub const QUESTIONS: &str = r#"{
  "questions": { "total": 2, "offset": 0, "limit": 2, "data": [
    { "questions": "q1", "min-selections": 1, "max-selections": 1 },
    { "questions": "q2", "min-selections": 1, "max-selections": 2 }
  ] },
  "q1": { "total": 2, "offset": 0, "limit": 2, "data": [
    { "options": "o1" },
    { "options": "o2", "next": "q2" }
  ] },
  "q2": { "total": 1, "offset": 0, "limit": 1, "data": [ { "options": "node7" } ] }
}"#;

pub const STRINGS: &str = r#"{
  "questions": { "total": 2, "offset": 0, "limit": 2, "data": [
    { "q": "q1", "heading": "First", "btn": "Next" },
    { "q": "q2", "heading": "Second" }
  ] },
  "o1": { "total": 1, "offset": 0, "limit": 1, "data": [ { "options": "o1", "title": "Stop" } ] },
  "o2": { "total": 1, "offset": 0, "limit": 1, "data": [ { "options": "o2", "title": "Continue" } ] },
  "node7": { "total": 1, "offset": 0, "limit": 1, "data": [ { "options": "node7", "title": "Imported" } ] }
}"#;

pub const RESULTS: &str = r#"{
  "bundle": { "total": 1, "offset": 0, "limit": 1, "data": [ { "name": "Starter" } ] }
}"#;

pub fn write_documents(dir: &Path) {
    fs::write(dir.join("questions.json"), QUESTIONS).unwrap();
    fs::write(dir.join("strings.json"), STRINGS).unwrap();
    fs::write(dir.join("results.json"), RESULTS).unwrap();
}
