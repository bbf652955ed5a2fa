use log::info;

use crate::{
    Error,
    core::Result,
};

use super::{
    form_state::{self, FormState, Submission},
    service::ContactService,
};

/// The add-contact form. Starts with a single blank phone slot.
pub struct ContactForm {
    first_name  : String,
    last_name   : String,
    phones      : Vec<String>,
    state       : FormState,
}

impl ContactForm {
    pub fn new() -> Self {
        Self {
            first_name  : String::new(),
            last_name   : String::new(),
            phones      : vec![String::new()],
            state       : FormState::Idle,
        }
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn set_first_name(&mut self, name: &str) -> &mut Self {
        self.first_name = name.to_string();
        self
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn set_last_name(&mut self, name: &str) -> &mut Self {
        self.last_name = name.to_string();
        self
    }

    pub fn phone_numbers(&self) -> &[String] {
        &self.phones
    }

    pub fn add_phone_number(&mut self) -> &mut Self {
        self.phones.push(String::new());
        self
    }

    pub fn set_phone_number(&mut self, index: usize, number: &str) -> Result<()> {
        let Some(slot) = self.phones.get_mut(index) else {
            return Err(Error::Argument(format!("No phone slot at index {}", index)));
        };
        *slot = number.to_string();
        Ok(())
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn message(&self) -> Option<&'static str> {
        self.state.message()
    }

    /// Leaves a submission that was abandoned mid-flight.
    pub fn reset(&mut self) {
        self.state = FormState::Idle;
    }

    /// Sends the whole form as one create request. The form keeps its
    /// contents whatever the outcome.
    pub async fn submit<S>(&mut self, service: &S) -> Result<Submission>
    where S: ContactService + ?Sized
    {
        form_state::check_names(&self.first_name, &self.last_name)?;
        let previous = self.state.begin()?;

        let result = service.create_contact(
            &self.first_name,
            &self.last_name,
            &self.phones
        ).await;

        match result {
            Ok(contact) => {
                info!("Contact added: {}", contact);
                self.state.succeed();
                Ok(Submission::Saved(contact))
            },
            Err(e) => Ok(self.state.fail(previous, e)),
        }
    }
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}
