const PREFIX: &str = "node";

/// Hands out `node<N>` ids for nodes created during an editing session.
/// Ids are never handed out twice, even after the node is deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdGenerator {
    next: u64,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> String {
        let id = format!("{PREFIX}{}", self.next);
        self.next += 1;
        id
    }

    /// Counter value the next call to [`IdGenerator::next_id`] will use.
    pub fn peek(&self) -> u64 {
        self.next
    }

    /// Moves the counter past `id` if it has the generated shape, so ids
    /// coming from an import are never generated again.
    pub fn observe(&mut self, id: &str) {
        let taken = id
            .strip_prefix(PREFIX)
            .and_then(|digits| digits.parse::<u64>().ok());
        if let Some(taken) = taken {
            self.next = self.next.max(taken.saturating_add(1));
        }
    }
}
