use anyhow::Error;

use super::api::{CreateMilestoneRequest, Milestone};
use super::util::date_input_to_timestamp;

/// Client-local buffer backing the creation form. Cleared only after the
/// remote create succeeds, so a failed submission keeps the user's input.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DraftForm {
    pub title: String,
    pub description: String,
    pub completion_date: String,
}

impl DraftForm {
    pub fn clear(&mut self) {
        *self = DraftForm::default();
    }

    pub fn to_create_request(&self) -> Result<CreateMilestoneRequest, Error> {
        Ok(CreateMilestoneRequest {
            title: self.title.clone(),
            description: self.description.clone(),
            completion_date: date_input_to_timestamp(&self.completion_date)?,
        })
    }
}

/// Everything the renderer draws from: the last list snapshot returned by the
/// remote service and the creation-form draft.
pub struct ViewState {
    pub milestones: Vec<Milestone>,
    pub draft: DraftForm,
}

impl ViewState {
    pub fn new() -> Self {
        ViewState {
            milestones: vec![],
            draft: DraftForm::default(),
        }
    }

    /// Replaces the list wholesale with the snapshot the remote service
    /// returned. There is deliberately no way to patch a single record.
    pub fn replace_milestones(&mut self, milestones: Vec<Milestone>) {
        self.milestones = milestones;
    }
}
