use std::time::Duration;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use url::Url;

use crate::{
    Error,
    config::Config,
    core::Result,
};

use super::{
    contact::{Contact, ContactId},
    graphql::{self, Request, Response},
    service::{ContactService, ListQuery},
};

/// `ContactService` over the remote GraphQL endpoint.
pub struct GraphQLClient {
    endpoint    : Url,
    client      : Client,
}

impl GraphQLClient {
    pub fn new(endpoint: &Url, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::State(format!("Http error: building http client error {e}")))?;

        Ok(Self {
            endpoint: endpoint.clone(),
            client,
        })
    }

    pub fn from_config(cfg: &dyn Config) -> Result<Self> {
        Self::new(cfg.endpoint(), cfg.request_timeout())
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn execute<T: DeserializeOwned>(&self, req: Request<'_>) -> Result<T> {
        debug!("Sending {} to {}", req.operation(), self.endpoint);

        let rsp = self.client.post(self.endpoint.clone())
            .json(&req)
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(Error::from)?;

        let status = rsp.status();
        let body = rsp.bytes().await.map_err(|e| {
            Error::Network(format!("Http error: reading http response error {e}"))
        })?;

        if !status.is_success() {
            // GraphQL servers may still describe the failure in the body.
            if let Ok(data) = serde_json::from_slice::<Response<Value>>(&body) {
                if let Err(e @ Error::Service(_)) = data.into_result() {
                    return Err(e);
                }
            }
            return Err(Error::Network(format!("Http error: invalid http response {status}")));
        }

        decode(&body)
    }
}

pub(crate) fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice::<Response<T>>(body).map_err(|e| {
        Error::Protocol(format!("Http error: deserialize json error {e}"))
    })?.into_result()
}

pub(crate) fn list_variables(query: &ListQuery) -> Value {
    let mut vars = Map::new();
    vars.insert("limit".into(), json!(query.window().limit()));
    vars.insert("offset".into(), json!(query.window().offset()));
    if let Some(v) = query.distinct_on() {
        vars.insert("distinct_on".into(), v.clone());
    }
    if let Some(v) = query.order_by() {
        vars.insert("order_by".into(), v.clone());
    }
    if let Some(v) = query.filter() {
        vars.insert("where".into(), v.clone());
    }
    Value::Object(vars)
}

pub(crate) fn create_variables(first_name: &str, last_name: &str, phones: &[String]) -> Value {
    json!({
        "first_name": first_name,
        "last_name": last_name,
        "phones": phones.iter()
            .map(|number| json!({ "number": number }))
            .collect::<Vec<_>>(),
    })
}

pub(crate) fn update_contact_variables(id: ContactId, first_name: &str, last_name: &str) -> Value {
    json!({
        "id": id,
        "_set": {
            "first_name": first_name,
            "last_name": last_name,
        },
    })
}

pub(crate) fn update_phone_variables(id: ContactId, original: &str, number: &str) -> Value {
    json!({
        "pk_columns": {
            "number": original,
            "contact_id": id,
        },
        "new_phone_number": number,
    })
}

#[async_trait]
impl ContactService for GraphQLClient {
    async fn contacts(&self, query: &ListQuery) -> Result<Vec<Contact>> {
        let req = Request::new(
            "GetContactList",
            graphql::GET_CONTACT_LIST,
            list_variables(query)
        );
        self.execute::<graphql::ContactListData>(req).await.map(|v| v.contact)
    }

    async fn contact(&self, id: ContactId) -> Result<Option<Contact>> {
        let req = Request::new(
            "GetContactDetail",
            graphql::GET_CONTACT_DETAIL,
            json!({ "id": id })
        );
        self.execute::<graphql::ContactDetailData>(req).await.map(|v| v.contact_by_pk)
    }

    async fn create_contact(&self,
        first_name: &str,
        last_name: &str,
        phones: &[String]
    ) -> Result<Contact> {
        let req = Request::new(
            "AddContactWithPhones",
            graphql::ADD_CONTACT_WITH_PHONES,
            create_variables(first_name, last_name, phones)
        );

        let data = self.execute::<graphql::InsertContactData>(req).await?;
        data.insert_contact
            .and_then(|v| v.returning.into_iter().next())
            .ok_or_else(|| Error::Protocol("GraphQL error: missing created contact".into()))
    }

    async fn delete_contact(&self, id: ContactId) -> Result<Option<Contact>> {
        let req = Request::new(
            "DeleteContact",
            graphql::DELETE_CONTACT,
            json!({ "id": id })
        );
        self.execute::<graphql::DeleteContactData>(req).await.map(|v| v.delete_contact_by_pk)
    }

    async fn update_contact(&self,
        id: ContactId,
        first_name: &str,
        last_name: &str
    ) -> Result<Option<Contact>> {
        let req = Request::new(
            "EditContactById",
            graphql::UPDATE_CONTACT,
            update_contact_variables(id, first_name, last_name)
        );
        self.execute::<graphql::UpdateContactData>(req).await.map(|v| v.update_contact_by_pk)
    }

    async fn update_phone(&self,
        id: ContactId,
        original: &str,
        number: &str
    ) -> Result<Option<Contact>> {
        let req = Request::new(
            "EditPhoneNumber",
            graphql::EDIT_PHONE_NUMBER,
            update_phone_variables(id, original, number)
        );
        self.execute::<graphql::UpdatePhoneData>(req).await
            .map(|v| v.update_phone_by_pk.map(|owner| owner.contact))
    }
}
