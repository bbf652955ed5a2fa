use serde::{Serialize, Deserialize};
use serde_json::Value;

use crate::{
    Error,
    core::Result,
};

use super::contact::Contact;

pub(crate) const GET_CONTACT_LIST: &str = r#"
query GetContactList(
  $distinct_on: [contact_select_column!]
  $limit: Int
  $offset: Int
  $order_by: [contact_order_by!]
  $where: contact_bool_exp
) {
  contact(
    distinct_on: $distinct_on
    limit: $limit
    offset: $offset
    order_by: $order_by
    where: $where
  ) {
    created_at
    first_name
    id
    last_name
    phones {
      number
    }
  }
}"#;

pub(crate) const GET_CONTACT_DETAIL: &str = r#"
query GetContactDetail($id: Int!) {
  contact_by_pk(id: $id) {
    last_name
    id
    first_name
    created_at
    phones {
      number
    }
  }
}"#;

pub(crate) const ADD_CONTACT_WITH_PHONES: &str = r#"
mutation AddContactWithPhones(
  $first_name: String!
  $last_name: String!
  $phones: [phone_insert_input!]!
) {
  insert_contact(
    objects: {
      first_name: $first_name
      last_name: $last_name
      phones: {
        data: $phones
        on_conflict: {
          constraint: phone_number_key,
          update_columns: [number]
        }
      }
    }
  ) {
    returning {
      first_name
      last_name
      id
      phones {
        number
      }
    }
  }
}"#;

pub(crate) const DELETE_CONTACT: &str = r#"
mutation DeleteContact($id: Int!) {
  delete_contact_by_pk(id: $id) {
    first_name
    last_name
    id
  }
}"#;

pub(crate) const UPDATE_CONTACT: &str = r#"
mutation EditContactById($id: Int!, $_set: contact_set_input) {
  update_contact_by_pk(pk_columns: { id: $id }, _set: $_set) {
    id
    first_name
    last_name
    phones {
      number
    }
  }
}"#;

pub(crate) const EDIT_PHONE_NUMBER: &str = r#"
mutation EditPhoneNumber($pk_columns: phone_pk_columns_input!, $new_phone_number: String!) {
  update_phone_by_pk(pk_columns: $pk_columns, _set: {number: $new_phone_number}) {
    contact {
      id
      last_name
      first_name
      created_at
      phones {
        number
      }
    }
  }
}"#;

#[derive(Serialize)]
#[allow(non_snake_case)]
pub(crate) struct Request<'a> {
    operationName: &'a str,
    query       : &'a str,
    variables   : Value,
}

impl<'a> Request<'a> {
    pub(crate) fn new(operation: &'a str, query: &'a str, variables: Value) -> Self {
        Self {
            operationName: operation,
            query,
            variables,
        }
    }

    pub(crate) fn operation(&self) -> &str {
        self.operationName
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorItem {
    message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Response<T> {
    data    : Option<T>,
    errors  : Option<Vec<ErrorItem>>,
}

impl<T> Response<T> {
    /// Any entry in `errors` fails the whole operation, even if `data`
    /// carries a partial result.
    pub(crate) fn into_result(self) -> Result<T> {
        if let Some(errors) = self.errors.filter(|v| !v.is_empty()) {
            return Err(Error::Service(errors.into_iter()
                .map(|v| v.message)
                .collect::<Vec<_>>()
                .join("; ")
            ));
        }

        self.data.ok_or_else(|| {
            Error::Protocol("GraphQL error: response carries neither data nor errors".into())
        })
    }
}

#[derive(Deserialize)]
pub(crate) struct ContactListData {
    pub(crate) contact: Vec<Contact>,
}

#[derive(Deserialize)]
pub(crate) struct ContactDetailData {
    pub(crate) contact_by_pk: Option<Contact>,
}

#[derive(Deserialize)]
pub(crate) struct Returning {
    pub(crate) returning: Vec<Contact>,
}

#[derive(Deserialize)]
pub(crate) struct InsertContactData {
    pub(crate) insert_contact: Option<Returning>,
}

#[derive(Deserialize)]
pub(crate) struct DeleteContactData {
    pub(crate) delete_contact_by_pk: Option<Contact>,
}

#[derive(Deserialize)]
pub(crate) struct UpdateContactData {
    pub(crate) update_contact_by_pk: Option<Contact>,
}

#[derive(Deserialize)]
pub(crate) struct PhoneOwner {
    pub(crate) contact: Contact,
}

#[derive(Deserialize)]
pub(crate) struct UpdatePhoneData {
    pub(crate) update_phone_by_pk: Option<PhoneOwner>,
}
