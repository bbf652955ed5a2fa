use log::{error, warn};

use crate::{
    Error,
    core::Result,
};

use super::{
    contact::Contact,
    route::Route,
};

pub const PHONE_CONFLICT_MESSAGE: &str = "Phone number already used";

/// Longest first or last name the edit form accepts, in characters.
pub const EDIT_NAME_MAX_LEN: usize = 15;

/// Submission state shared by the create and edit forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormState {
    #[default]
    Idle,
    Pending,
    ErrorShown,
}

impl FormState {
    /// Inline message the form shows in this state.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            FormState::ErrorShown => Some(PHONE_CONFLICT_MESSAGE),
            _ => None,
        }
    }

    /// Enters `Pending` and hands back the state to restore should the
    /// submission fail silently. A form already in flight refuses.
    pub(crate) fn begin(&mut self) -> Result<FormState> {
        if *self == FormState::Pending {
            return Err(Error::State("A submission from this form is already in flight".into()));
        }
        let previous = *self;
        *self = FormState::Pending;
        Ok(previous)
    }

    pub(crate) fn succeed(&mut self) {
        *self = FormState::Idle;
    }

    /// Settles a failed submission: a phone number conflict shows the inline
    /// message, anything else is only logged.
    pub(crate) fn fail(&mut self, previous: FormState, err: Error) -> Submission {
        if err.is_phone_conflict() {
            warn!("Phone number already used: {err}");
            *self = FormState::ErrorShown;
            return Submission::Conflict;
        }

        error!("Error saving contact: {err}");
        *self = previous;
        Submission::Failed(err)
    }
}

/// How a submission that reached the service ended.
#[derive(Debug)]
pub enum Submission {
    /// Saved; the form hands over to the list view.
    Saved(Contact),
    /// Nothing matched on the service side; the form stays put.
    Unchanged,
    Conflict,
    Failed(Error),
}

impl Submission {
    pub fn next_route(&self) -> Option<Route> {
        match self {
            Submission::Saved(_) => Some(Route::List),
            _ => None,
        }
    }
}

pub(crate) fn check_names(first_name: &str, last_name: &str) -> Result<()> {
    if first_name.is_empty() {
        return Err(Error::Argument("First name is required".into()));
    }
    if last_name.is_empty() {
        return Err(Error::Argument("Last name is required".into()));
    }
    Ok(())
}

pub(crate) fn check_name_lengths(first_name: &str, last_name: &str) -> Result<()> {
    if first_name.chars().count() > EDIT_NAME_MAX_LEN {
        return Err(Error::Argument(format!("First name exceeds {EDIT_NAME_MAX_LEN} characters")));
    }
    if last_name.chars().count() > EDIT_NAME_MAX_LEN {
        return Err(Error::Argument(format!("Last name exceeds {EDIT_NAME_MAX_LEN} characters")));
    }
    Ok(())
}
