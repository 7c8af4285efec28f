//! Form controller: turns user actions into store changes and surface updates.
//!
//! The controller owns the household store. A presentation surface (the
//! terminal UI, or a test double) delivers [`Action`]s and receives render
//! requests through [`PresentationSurface`].

use crate::fields::FieldKey;
use crate::formatter::{format_household, list_label, ExportStyle};
use crate::household::HouseholdStore;
use crate::member::{Candidate, MemberId, MemberRecord};
use crate::validation::{ValidationError, Validator};
use tracing::{debug, info};

/// What the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Add a member from the current form values
    AddRequested(Candidate),
    /// Remove the list item with this id
    RemoveRequested(MemberId),
    /// Show the household as text
    SubmitRequested,
}

/// What handling an action did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Added(MemberId),
    Rejected(ValidationError),
    Removed { id: MemberId, existed: bool },
    Exported,
}

/// Rendering side of the form
pub trait PresentationSurface {
    /// Add a list item for a new record; `label` is its caption
    fn render_member(&mut self, record: &MemberRecord, label: &str);
    fn remove_member(&mut self, id: &MemberId);
    fn show_field_error(&mut self, field: FieldKey, message: &str);
    fn clear_errors(&mut self);
    /// Reset every input to empty / unchecked
    fn clear_inputs(&mut self);
    fn show_export(&mut self, text: &str);
}

pub struct Controller {
    store: HouseholdStore,
    validator: Validator,
    export_style: ExportStyle,
}

impl Controller {
    pub fn new(store: HouseholdStore, export_style: ExportStyle) -> Self {
        Controller {
            store,
            validator: Validator::new(),
            export_style,
        }
    }

    pub fn store(&self) -> &HouseholdStore {
        &self.store
    }

    pub fn export_style(&self) -> ExportStyle {
        self.export_style
    }

    pub fn handle(&mut self, action: Action, surface: &mut dyn PresentationSurface) -> Outcome {
        match action {
            Action::AddRequested(candidate) => self.add(&candidate, surface),
            Action::RemoveRequested(id) => self.remove(id, surface),
            Action::SubmitRequested => self.submit(surface),
        }
    }

    fn add(&mut self, candidate: &Candidate, surface: &mut dyn PresentationSurface) -> Outcome {
        surface.clear_errors();

        let member = match self.validator.validate(candidate) {
            Ok(member) => member,
            Err(error) => {
                debug!(field = %error.field(), %error, "member rejected");
                surface.show_field_error(error.field(), &error.to_string());
                return Outcome::Rejected(error);
            }
        };

        let record = self.store.append(member);
        info!(
            id = %record.id,
            relation = %record.relation,
            age = record.age,
            smoker = record.smoker,
            "member added"
        );

        surface.clear_inputs();
        surface.render_member(record, &list_label(record));
        Outcome::Added(record.id.clone())
    }

    fn remove(&mut self, id: MemberId, surface: &mut dyn PresentationSurface) -> Outcome {
        let existed = match self.store.remove_by_id(&id) {
            Some(_) => {
                info!(%id, "member removed");
                surface.remove_member(&id);
                true
            }
            None => {
                debug!(%id, "remove requested for unknown member; ignoring");
                false
            }
        };

        Outcome::Removed { id, existed }
    }

    fn submit(&self, surface: &mut dyn PresentationSurface) -> Outcome {
        let text = format_household(self.store.all(), self.export_style);
        info!(
            members = self.store.len(),
            style = %self.export_style,
            "household exported"
        );

        surface.show_export(&text);
        Outcome::Exported
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(HouseholdStore::new(), ExportStyle::default())
    }
}
