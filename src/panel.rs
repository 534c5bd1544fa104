/// Side panel view-model
///
/// Owns the last item snapshot, the type filter, the text query, the
/// selection set, the pending delete and the transient status line. The
/// UI drives it exclusively through `PanelAction`s.
use crate::item::{SavedItem, TypeFilter};
use std::collections::HashSet;
use std::rc::Rc;
use yew::functional::Reducible;

/// A delete waiting on the confirmation modal
#[derive(Debug, Clone, PartialEq)]
pub enum PendingDelete {
    Single { id: String, content: String },
    Bulk { ids: Vec<String> },
}

impl PendingDelete {
    pub fn targets(&self) -> HashSet<String> {
        match self {
            PendingDelete::Single { id, .. } => [id.clone()].into_iter().collect(),
            PendingDelete::Bulk { ids } => ids.iter().cloned().collect(),
        }
    }
}

/// State of the select-all checkbox over the filtered view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectAllState {
    /// Nothing is filtered in
    Disabled,
    None,
    Partial,
    All,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelAction {
    /// A fresh copy of the stored list (initial load or change notification)
    Snapshot(Vec<SavedItem>),
    SetFilter(TypeFilter),
    SetQuery(String),
    ClearQuery,
    ToggleSelect(String),
    SelectAllToggle,
    RequestDelete(String),
    RequestBulkDelete,
    CancelDelete,
    /// The confirmed delete was written
    DeleteCommitted,
    ShowStatus(String),
    /// Clear the status line if it still shows this message
    ClearStatus(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PanelState {
    pub items: Vec<SavedItem>,
    pub loaded: bool,
    pub filter: TypeFilter,
    /// What the user typed, shown back in the input
    pub query_input: String,
    /// Trimmed, lower-cased query used for matching
    pub query: String,
    pub selected: HashSet<String>,
    pub pending_delete: Option<PendingDelete>,
    pub status: Option<String>,
}

impl PanelState {
    pub fn apply(&mut self, action: PanelAction) {
        match action {
            PanelAction::Snapshot(items) => self.refresh_snapshot(items),
            PanelAction::SetFilter(filter) => self.filter = filter,
            PanelAction::SetQuery(text) => self.set_query(text),
            PanelAction::ClearQuery => self.set_query(String::new()),
            PanelAction::ToggleSelect(id) => self.toggle_select(&id),
            PanelAction::SelectAllToggle => self.select_all_toggle(),
            PanelAction::RequestDelete(id) => self.request_delete(&id),
            PanelAction::RequestBulkDelete => self.request_bulk_delete(),
            PanelAction::CancelDelete | PanelAction::DeleteCommitted => self.pending_delete = None,
            PanelAction::ShowStatus(message) => {
                self.status = (!message.is_empty()).then_some(message);
            }
            PanelAction::ClearStatus(message) => {
                if self.status.as_deref() == Some(message.as_str()) {
                    self.status = None;
                }
            }
        }
    }

    /// Replace the snapshot and drop selections whose item is gone
    pub fn refresh_snapshot(&mut self, items: Vec<SavedItem>) {
        let present: HashSet<&str> = items.iter().map(|item| item.id.as_str()).collect();
        self.selected.retain(|id| present.contains(id.as_str()));
        if let Some(PendingDelete::Single { id, .. }) = &self.pending_delete {
            if !present.contains(id.as_str()) {
                self.pending_delete = None;
            }
        }
        self.items = items;
        self.loaded = true;
    }

    pub fn set_query(&mut self, text: String) {
        self.query = text.trim().to_lowercase();
        self.query_input = text;
    }

    pub fn filtered(&self) -> Vec<&SavedItem> {
        self.items
            .iter()
            .filter(|item| item.matches(self.filter, &self.query))
            .collect()
    }

    /// Flip membership of `id`; ids not in the snapshot are never added
    pub fn toggle_select(&mut self, id: &str) {
        if !self.selected.remove(id) && self.items.iter().any(|item| item.id == id) {
            self.selected.insert(id.to_string());
        }
    }

    /// Select every filtered item, or deselect them all if they already are
    pub fn select_all_toggle(&mut self) {
        let ids: Vec<String> = self.filtered().iter().map(|item| item.id.clone()).collect();
        if ids.is_empty() {
            return;
        }
        if ids.iter().all(|id| self.selected.contains(id)) {
            for id in &ids {
                self.selected.remove(id);
            }
        } else {
            self.selected.extend(ids);
        }
    }

    pub fn select_all_state(&self) -> SelectAllState {
        let filtered = self.filtered();
        if filtered.is_empty() {
            return SelectAllState::Disabled;
        }
        let count = filtered
            .iter()
            .filter(|item| self.selected.contains(&item.id))
            .count();
        match count {
            0 => SelectAllState::None,
            n if n == filtered.len() => SelectAllState::All,
            _ => SelectAllState::Partial,
        }
    }

    /// Selected items in list order
    pub fn selected_items(&self) -> Vec<&SavedItem> {
        self.items
            .iter()
            .filter(|item| self.selected.contains(&item.id))
            .collect()
    }

    pub fn request_delete(&mut self, id: &str) {
        if let Some(item) = self.items.iter().find(|item| item.id == id) {
            self.pending_delete = Some(PendingDelete::Single {
                id: item.id.clone(),
                content: item.content.clone(),
            });
        }
    }

    pub fn request_bulk_delete(&mut self) {
        let ids: Vec<String> = self.selected_items().iter().map(|item| item.id.clone()).collect();
        if !ids.is_empty() {
            self.pending_delete = Some(PendingDelete::Bulk { ids });
        }
    }

    /// Ids the confirm button should delete
    pub fn delete_targets(&self) -> Option<HashSet<String>> {
        self.pending_delete.as_ref().map(PendingDelete::targets)
    }

    /// Copy value of one item; `None` if it is gone or has nothing to copy
    pub fn item_copy_text(&self, id: &str) -> Option<String> {
        self.items
            .iter()
            .find(|item| item.id == id)
            .map(SavedItem::copy_value)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    /// Newline-joined copy values of the selection, with the item count
    pub fn selected_copy_text(&self) -> Option<(String, usize)> {
        join_copy_values(&self.selected_items())
    }

    /// Newline-joined copy values of the filtered view, with the item count
    pub fn filtered_copy_text(&self) -> Option<(String, usize)> {
        join_copy_values(&self.filtered())
    }
}

fn join_copy_values(items: &[&SavedItem]) -> Option<(String, usize)> {
    if items.is_empty() {
        return None;
    }
    let text = items
        .iter()
        .map(|item| item.copy_value())
        .filter(|value| !value.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    Some((text, items.len()))
}

impl Reducible for PanelState {
    type Action = PanelAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        Rc::new(next)
    }
}
