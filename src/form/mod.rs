//! Create/edit binding for a single service record.
//!
//! The form holds a draft, applies field updates through one reducer and hands the draft to
//! the [`CatalogStore`] on save. It performs no validation of its own and never closes itself;
//! the host decides what to do with the [`SaveOutcome`].

use crate::db::CatalogStore;
use crate::errors::CatalogError;
use crate::models::{Category, Service, ServiceDraft};

/// Number of empty detail inputs a new service starts with.
pub const BLANK_DETAIL_SLOTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit,
}

/// One edit to the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    SetTitle(String),
    SetDescription(String),
    SetDetails(Vec<String>),
    SetPrice(String),
    SetPopular(bool),
}

impl FieldUpdate {
    /// The updates that turn an empty draft into `draft`.
    pub fn from_draft(draft: ServiceDraft) -> [FieldUpdate; 5] {
        [
            FieldUpdate::SetTitle(draft.title),
            FieldUpdate::SetDescription(draft.description),
            FieldUpdate::SetDetails(draft.details),
            FieldUpdate::SetPrice(draft.price),
            FieldUpdate::SetPopular(draft.popular),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Added(Service),
    Updated(Service),
    /// Edit mode with no record staged, or a staged id the category no longer holds.
    NothingStaged,
}

#[derive(Debug, Clone)]
pub struct ServiceForm {
    mode: FormMode,
    category: Category,
    draft: ServiceDraft,
    editing_id: Option<i64>,
}

impl ServiceForm {
    /// Blank form for a new service in `category`.
    pub fn add(category: Category) -> Self {
        Self {
            mode: FormMode::Add,
            category,
            draft: ServiceDraft {
                details: vec![String::new(); BLANK_DETAIL_SLOTS],
                ..Default::default()
            },
            editing_id: None,
        }
    }

    /// Form pre-filled with an existing record.
    pub fn edit(category: Category, service: Service) -> Self {
        Self {
            mode: FormMode::Edit,
            category,
            editing_id: Some(service.id),
            draft: service.into(),
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn draft(&self) -> &ServiceDraft {
        &self.draft
    }

    /// Change the target category. Only a new service can pick its category.
    pub fn select_category(&mut self, category: Category) -> bool {
        if self.mode == FormMode::Edit {
            return false;
        }
        self.category = category;
        true
    }

    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::SetTitle(title) => self.draft.title = title,
            FieldUpdate::SetDescription(description) => self.draft.description = description,
            FieldUpdate::SetDetails(details) => self.draft.details = details,
            FieldUpdate::SetPrice(price) => self.draft.price = price,
            FieldUpdate::SetPopular(popular) => self.draft.popular = popular,
        }
    }

    /// Overwrite one detail line. Out-of-range indices are ignored.
    pub fn set_detail(&mut self, index: usize, value: impl Into<String>) {
        if index >= self.draft.details.len() {
            return;
        }
        let mut details = self.draft.details.clone();
        details[index] = value.into();
        self.apply(FieldUpdate::SetDetails(details));
    }

    /// Drop the staged record, as when the editor closes without a target.
    pub fn unstage(&mut self) {
        self.editing_id = None;
    }

    pub async fn save(&self, store: &CatalogStore) -> Result<SaveOutcome, CatalogError> {
        match self.mode {
            FormMode::Add => store
                .add_service(self.category, self.draft.clone())
                .await
                .map(SaveOutcome::Added),
            FormMode::Edit => {
                let Some(id) = self.editing_id else {
                    return Ok(SaveOutcome::NothingStaged);
                };
                let updated = store
                    .update_service(self.category, id, self.draft.clone())
                    .await?;
                Ok(updated.map_or(SaveOutcome::NothingStaged, SaveOutcome::Updated))
            }
        }
    }
}
