use crate::core::NodeId;
use crate::widgets::node::Node;

#[derive(Debug, Clone)]
pub struct FocusTarget {
    pub id: NodeId,
}

#[derive(Debug, Default, Clone)]
pub struct FocusState {
    targets: Vec<FocusTarget>,
    index: Option<usize>,
}

impl FocusState {
    /// Recollects focus targets, keeping the focused id when it is still
    /// present. Otherwise focus stays at the same position, clamped.
    pub fn rebuild<'a>(&mut self, nodes: impl IntoIterator<Item = &'a Node>) {
        let previous_id = self.current_id().map(ToOwned::to_owned);
        let previous_index = self.index;

        self.targets.clear();
        collect_targets(nodes, &mut self.targets);

        if self.targets.is_empty() {
            self.index = None;
            return;
        }
        if let Some(id) = previous_id
            && let Some(position) = self.position_of(&id)
        {
            self.index = Some(position);
            return;
        }
        self.index = Some(previous_index.unwrap_or(0).min(self.targets.len() - 1));
    }

    pub fn clear(&mut self) {
        self.targets.clear();
        self.index = None;
    }

    pub fn current_id(&self) -> Option<&str> {
        self.index
            .and_then(|i| self.targets.get(i))
            .map(|target| target.id.as_str())
    }

    pub fn next(&mut self) {
        let Some(current) = self.index else {
            return;
        };
        if self.targets.is_empty() {
            self.index = None;
            return;
        }
        self.index = Some((current + 1) % self.targets.len());
    }

    pub fn prev(&mut self) {
        let Some(current) = self.index else {
            return;
        };
        if self.targets.is_empty() {
            self.index = None;
            return;
        }
        self.index = Some((current + self.targets.len() - 1) % self.targets.len());
    }

    fn position_of(&self, id: &str) -> Option<usize> {
        self.targets
            .iter()
            .position(|target| target.id.as_str() == id)
    }
}

fn collect_targets<'a>(nodes: impl IntoIterator<Item = &'a Node>, out: &mut Vec<FocusTarget>) {
    out.extend(nodes.into_iter().map(|node| FocusTarget {
        id: node.id().into(),
    }));
}
