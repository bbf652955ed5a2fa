use std::collections::HashSet;
use std::sync::Arc;
use log::{debug, error, info};

use crate::core::Result;
use super::{
    contact::{Contact, ContactId},
    favorites::FavoriteStore,
    page_window::PageWindow,
    service::{ContactService, ListQuery},
};

pub const LOADING_MESSAGE: &str = "Loading...";
pub const LOAD_ERROR_MESSAGE: &str = "Error loading contact list";
pub const EMPTY_MESSAGE: &str = "No contacts found.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Failed(String),
    Ready(Vec<Contact>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListEntry<'a> {
    pub contact : &'a Contact,
    pub favorite: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ListRender<'a> {
    Loading,
    Failed,
    Empty,
    Contacts(Vec<ListEntry<'a>>),
}

impl ListRender<'_> {
    /// Placeholder text shown instead of a list, if any.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            ListRender::Loading => Some(LOADING_MESSAGE),
            ListRender::Failed => Some(LOAD_ERROR_MESSAGE),
            ListRender::Empty => Some(EMPTY_MESSAGE),
            ListRender::Contacts(_) => None,
        }
    }
}

/// Contacts whose first name contains `query`, ignoring case. An empty
/// query keeps everything.
pub fn filter_contacts<'a>(contacts: &'a [Contact], query: &str) -> Vec<&'a Contact> {
    let query = query.to_lowercase();
    contacts.iter()
        .filter(|c| query.is_empty() || c.first_name().to_lowercase().contains(&query))
        .collect()
}

/// Moves favorites ahead of everyone else, keeping input order inside
/// both groups.
pub fn order_by_favorites<'a>(
    contacts: Vec<&'a Contact>,
    favorites: &HashSet<ContactId>
) -> Vec<&'a Contact> {
    let (mut ordered, rest): (Vec<_>, Vec<_>) = contacts.into_iter()
        .partition(|c| favorites.contains(&c.id()));
    ordered.extend(rest);
    ordered
}

/// State behind the list view: the page window, the search text and the
/// most recently fetched page.
pub struct ContactList {
    window      : PageWindow,
    query       : String,
    state       : LoadState,
    favorites   : Arc<dyn FavoriteStore>,
}

impl ContactList {
    pub fn new(favorites: Arc<dyn FavoriteStore>) -> Self {
        Self {
            window  : PageWindow::new(),
            query   : String::new(),
            state   : LoadState::Loading,
            favorites,
        }
    }

    pub fn window(&self) -> &PageWindow {
        &self.window
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn favorites(&self) -> &Arc<dyn FavoriteStore> {
        &self.favorites
    }

    /// Only re-filters the held page; nothing is fetched.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    pub fn toggle_favorite(&self, id: ContactId) -> bool {
        self.favorites.toggle(id)
    }

    pub fn has_previous(&self) -> bool {
        self.window.has_previous()
    }

    pub fn has_next(&self) -> bool {
        match &self.state {
            LoadState::Ready(page) => self.window.has_next(page.len()),
            _ => false,
        }
    }

    pub fn render(&self) -> ListRender<'_> {
        let page = match &self.state {
            LoadState::Loading => return ListRender::Loading,
            LoadState::Failed(_) => return ListRender::Failed,
            LoadState::Ready(page) => page,
        };

        let favorites = self.favorites.snapshot();
        let visible = order_by_favorites(
            filter_contacts(page, &self.query),
            &favorites
        );

        if visible.is_empty() {
            return ListRender::Empty;
        }

        ListRender::Contacts(visible.into_iter()
            .map(|contact| ListEntry {
                contact,
                favorite: favorites.contains(&contact.id()),
            })
            .collect()
        )
    }

    /// Replaces the held page with a fresh fetch of the current window.
    pub async fn refresh<S>(&mut self, service: &S)
    where S: ContactService + ?Sized
    {
        self.state = LoadState::Loading;
        debug!("Fetching contacts at offset {}", self.window.offset());

        self.state = match service.contacts(&ListQuery::new(self.window)).await {
            Ok(page) => LoadState::Ready(page),
            Err(e) => {
                error!("Error loading contact list: {e}");
                LoadState::Failed(e.to_string())
            }
        };
    }

    pub async fn next_page<S>(&mut self, service: &S) -> bool
    where S: ContactService + ?Sized
    {
        let fetched = match &self.state {
            LoadState::Ready(page) => page.len(),
            _ => return false,
        };

        if !self.window.next(fetched) {
            return false;
        }
        self.refresh(service).await;
        true
    }

    pub async fn previous_page<S>(&mut self, service: &S) -> bool
    where S: ContactService + ?Sized
    {
        if !self.window.previous() {
            return false;
        }
        self.refresh(service).await;
        true
    }

    /// Deletes a contact and refetches the current window. Failures are
    /// logged and leave the held page as it was.
    pub async fn delete<S>(&mut self, service: &S, id: ContactId) -> Result<()>
    where S: ContactService + ?Sized
    {
        match service.delete_contact(id).await {
            Ok(deleted) => {
                match deleted {
                    Some(c) => info!("Contact deleted: {}", c.full_name()),
                    None => info!("No contact {} to delete", id),
                }
                self.refresh(service).await;
                Ok(())
            },
            Err(e) => {
                error!("Error deleting contact: {e}");
                Err(e)
            }
        }
    }
}
