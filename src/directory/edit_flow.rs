use log::{debug, info, warn};

use crate::{
    Error,
    core::Result,
};

use super::{
    contact::{Contact, ContactId},
    form_state::{self, FormState, Submission},
    service::ContactService,
};

/// One phone input of the edit form. `key` is the number the row is
/// stored under on the service; `number` is what the user typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneSlot {
    key     : String,
    number  : String,
}

impl PhoneSlot {
    fn new(number: &str) -> Self {
        Self {
            key     : number.to_string(),
            number  : number.to_string(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn is_modified(&self) -> bool {
        self.key != self.number
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneUpdate {
    pub slot    : usize,
    pub key     : String,
    pub number  : String,
}

/// Steps of the last edit submission that the service committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditReport {
    contact_id  : ContactId,
    name_updated: bool,
    phones      : Vec<PhoneUpdate>,
    failed_slot : Option<usize>,
}

impl EditReport {
    fn new(contact_id: ContactId) -> Self {
        Self {
            contact_id,
            name_updated: false,
            phones      : Vec::new(),
            failed_slot : None,
        }
    }

    pub fn contact_id(&self) -> ContactId {
        self.contact_id
    }

    pub fn name_updated(&self) -> bool {
        self.name_updated
    }

    pub fn committed_phones(&self) -> &[PhoneUpdate] {
        &self.phones
    }

    pub fn failed_slot(&self) -> Option<usize> {
        self.failed_slot
    }

    /// Some but not all steps went through.
    pub fn is_partial(&self) -> bool {
        self.failed_slot.is_some() && (self.name_updated || !self.phones.is_empty())
    }
}

/// The edit form, pre-populated from a detail fetch.
pub struct EditForm {
    id          : ContactId,
    first_name  : String,
    last_name   : String,
    slots       : Vec<PhoneSlot>,
    state       : FormState,
    report      : Option<EditReport>,
}

impl EditForm {
    pub fn from_contact(contact: &Contact) -> Self {
        Self {
            id          : contact.id(),
            first_name  : contact.first_name().to_string(),
            last_name   : contact.last_name().to_string(),
            slots       : contact.phones().iter()
                .map(|v| PhoneSlot::new(v.number()))
                .collect(),
            state       : FormState::Idle,
            report      : None,
        }
    }

    pub async fn load<S>(service: &S, id: ContactId) -> Result<Self>
    where S: ContactService + ?Sized
    {
        match service.contact(id).await? {
            Some(contact) => Ok(Self::from_contact(&contact)),
            None => Err(Error::State(format!("No contact found with id {}", id))),
        }
    }

    pub fn id(&self) -> ContactId {
        self.id
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

    pub fn slots(&self) -> &[PhoneSlot] {
        &self.slots
    }

    pub fn set_phone_number(&mut self, index: usize, number: &str) -> Result<()> {
        let Some(slot) = self.slots.get_mut(index) else {
            return Err(Error::Argument(format!("No phone slot at index {}", index)));
        };
        slot.number = number.to_string();
        Ok(())
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn message(&self) -> Option<&'static str> {
        self.state.message()
    }

    pub fn report(&self) -> Option<&EditReport> {
        self.report.as_ref()
    }

    /// Leaves a submission that was abandoned mid-flight.
    pub fn reset(&mut self) {
        self.state = FormState::Idle;
    }

    /// Updates the name, then every phone slot in order, each awaited
    /// before the next. The first failing step stops the sequence; steps
    /// already committed stay committed and are listed in `report()`.
    pub async fn submit<S>(&mut self, service: &S) -> Result<Submission>
    where S: ContactService + ?Sized
    {
        form_state::check_names(&self.first_name, &self.last_name)?;
        form_state::check_name_lengths(&self.first_name, &self.last_name)?;
        let previous = self.state.begin()?;
        let mut report = EditReport::new(self.id);

        let result = service.update_contact(
            self.id,
            &self.first_name,
            &self.last_name
        ).await;

        let updated = match result {
            Ok(v) => v,
            Err(e) => {
                self.report = Some(report);
                return Ok(self.state.fail(previous, e));
            }
        };
        report.name_updated = updated.is_some();

        let mut latest = None;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            debug!("Updating phone slot {} of contact {}", index, self.id);

            match service.update_phone(self.id, &slot.key, &slot.number).await {
                Ok(Some(owner)) => {
                    report.phones.push(PhoneUpdate {
                        slot    : index,
                        key     : slot.key.clone(),
                        number  : slot.number.clone(),
                    });
                    // The row now lives under the new number.
                    slot.key = slot.number.clone();
                    latest = Some(owner);
                },
                Ok(None) => {
                    warn!("No phone {} stored for contact {}", slot.key, self.id);
                },
                Err(e) => {
                    report.failed_slot = Some(index);
                    self.report = Some(report);
                    return Ok(self.state.fail(previous, e));
                }
            }
        }

        self.report = Some(report);
        self.state.succeed();

        match updated {
            Some(contact) => {
                let contact = latest.unwrap_or(contact);
                info!("Contact updated: {}", contact);
                Ok(Submission::Saved(contact))
            },
            None => {
                info!("No contact {} to update", self.id);
                Ok(Submission::Unchanged)
            }
        }
    }
}
