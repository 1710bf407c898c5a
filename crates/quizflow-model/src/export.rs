use std::collections::BTreeMap;

use tracing::{debug, trace, warn};

use crate::graph::{Graph, Node, NodeData};
use crate::schema::{
    Collection, OptionLink, OptionStrings, QuestionEntry, QuestionStrings, QuestionsDocument,
    StringsDocument,
};
use crate::ExportError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocuments {
    pub questions: QuestionsDocument,
    pub strings: StringsDocument,
}

/// Rebuilds `questions.json` and `strings.json` from the graph. The results
/// document has no graph counterpart and is not produced.
pub fn export_graph(graph: &Graph) -> Result<ExportedDocuments, ExportError> {
    let mut question_entries = Vec::new();
    let mut question_strings = Vec::new();
    let mut option_links = BTreeMap::new();
    let mut option_strings = BTreeMap::new();

    for node in &graph.nodes {
        match &node.data {
            NodeData::Question(data) => {
                question_entries.push(QuestionEntry {
                    id: node.id.clone(),
                    max_selections: data.max_selections,
                    min_selections: data.min_selections,
                });
                question_strings.push(QuestionStrings {
                    id: node.id.clone(),
                    heading: data.label.clone(),
                    sub_head: data.subtitle.clone(),
                    btn: data.button_label.clone(),
                    background: data.background_image.clone(),
                    footer_fragment: data.footer_fragment.clone(),
                });
                option_links.insert(
                    node.id.clone(),
                    Collection::from_entries(links_of(graph, node)?),
                );
            }
            NodeData::Option(data) => {
                option_strings.insert(
                    node.id.clone(),
                    Collection::single(OptionStrings {
                        id: node.id.clone(),
                        title: data.label.clone(),
                        text: data.text.clone(),
                        icon: data.icon.clone(),
                        image: data.image.clone(),
                    }),
                );
            }
        }
    }

    let documents = ExportedDocuments {
        questions: QuestionsDocument {
            questions: Collection::from_entries(question_entries),
            options: option_links,
        },
        strings: StringsDocument {
            questions: Collection::from_entries(question_strings),
            options: option_strings,
        },
    };
    log_documents(&documents);
    Ok(documents)
}

fn links_of(graph: &Graph, question: &Node) -> Result<Vec<OptionLink>, ExportError> {
    let mut links = Vec::new();
    for edge in graph.outgoing(&question.id) {
        let target = graph
            .node(&edge.target)
            .ok_or_else(|| ExportError::MissingTarget {
                edge: edge.id.clone(),
                target: edge.target.clone(),
            })?;
        // Question-to-question edges come from `grey` drags and have no
        // place in an options collection.
        let Some(option) = target.as_option() else {
            warn!(edge = %edge.id, source = %question.id, target = %target.id, "question edge not exported");
            continue;
        };
        links.push(OptionLink {
            id: target.id.clone(),
            next: option.next.clone(),
        });
    }
    trace!(question = %question.id, options = links.len(), "collected option links");
    Ok(links)
}

fn log_documents(documents: &ExportedDocuments) {
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }
    if let Ok(questions) = documents.questions.to_json() {
        debug!("exported questions document:\n{questions}");
    }
    if let Ok(strings) = documents.strings.to_json() {
        debug!("exported strings document:\n{strings}");
    }
}
