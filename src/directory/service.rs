use async_trait::async_trait;
use serde_json::Value;

use crate::core::Result;
use super::{
    contact::{Contact, ContactId},
    page_window::PageWindow,
};

/// Arguments of a contact list read. Only the page window is mandatory;
/// the remaining clauses are passed through to the service untouched.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    window      : PageWindow,
    distinct_on : Option<Value>,
    order_by    : Option<Value>,
    filter      : Option<Value>,
}

impl ListQuery {
    pub fn new(window: PageWindow) -> Self {
        Self {
            window,
            ..Default::default()
        }
    }

    pub fn with_distinct_on(mut self, columns: Value) -> Self {
        self.distinct_on = Some(columns);
        self
    }

    pub fn with_order_by(mut self, order: Value) -> Self {
        self.order_by = Some(order);
        self
    }

    pub fn with_where(mut self, filter: Value) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn window(&self) -> &PageWindow {
        &self.window
    }

    pub fn distinct_on(&self) -> Option<&Value> {
        self.distinct_on.as_ref()
    }

    pub fn order_by(&self) -> Option<&Value> {
        self.order_by.as_ref()
    }

    pub fn filter(&self) -> Option<&Value> {
        self.filter.as_ref()
    }
}

/// The remote contact directory.
#[async_trait]
pub trait ContactService: Send + Sync {
    async fn contacts(&self, query: &ListQuery) -> Result<Vec<Contact>>;
    async fn contact(&self, id: ContactId) -> Result<Option<Contact>>;

    /// Creates a contact together with its phones. A phone number that
    /// already exists is updated in place by the service instead of failing.
    async fn create_contact(&self,
        first_name: &str,
        last_name: &str,
        phones: &[String]
    ) -> Result<Contact>;

    async fn delete_contact(&self, id: ContactId) -> Result<Option<Contact>>;

    async fn update_contact(&self,
        id: ContactId,
        first_name: &str,
        last_name: &str
    ) -> Result<Option<Contact>>;

    /// Renumbers the phone row keyed by `(id, original)`.
    async fn update_phone(&self,
        id: ContactId,
        original: &str,
        number: &str
    ) -> Result<Option<Contact>>;
}
