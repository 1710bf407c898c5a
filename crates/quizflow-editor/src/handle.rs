use std::fmt;

use quizflow_model::{NodeData, NodeKind, OptionData, QuestionData};

/// Connection points that spawn a node when a drag from them ends on empty canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    NewOption,
    Grey,
}

impl HandleKind {
    pub fn from_handle(handle_id: &str) -> Option<Self> {
        match handle_id {
            "newOption" => Some(HandleKind::NewOption),
            "grey" => Some(HandleKind::Grey),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HandleKind::NewOption => "newOption",
            HandleKind::Grey => "grey",
        }
    }

    pub fn target_kind(&self) -> NodeKind {
        match self {
            HandleKind::NewOption => NodeKind::Option,
            HandleKind::Grey => NodeKind::Question,
        }
    }

    pub fn default_data(&self, id: &str) -> NodeData {
        match self {
            HandleKind::NewOption => NodeData::Option(OptionData {
                label: Some(format!("Option {id}")),
                ..OptionData::default()
            }),
            HandleKind::Grey => NodeData::Question(default_question(id)),
        }
    }
}

impl fmt::Display for HandleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn default_question(id: &str) -> QuestionData {
    QuestionData {
        label: Some(format!("Question {id}")),
        product1: Some(String::new()),
        product2: Some(String::new()),
        ..QuestionData::default()
    }
}
