pub(crate) mod graphql;

pub mod api_client;
pub mod contact;
pub mod contact_list;
pub mod create_flow;
pub mod edit_flow;
pub mod favorites;
pub mod form_state;
pub mod page_window;
pub mod route;
pub mod service;

pub use self::{
    api_client::GraphQLClient,
    contact::{Contact, ContactBuilder, ContactId, Phone},
    contact_list::{ContactList, ListEntry, ListRender, LoadState},
    create_flow::ContactForm,
    edit_flow::{EditForm, EditReport, PhoneSlot, PhoneUpdate},
    favorites::{FavoriteStore, MemoryFavorites},
    form_state::{FormState, Submission, PHONE_CONFLICT_MESSAGE, EDIT_NAME_MAX_LEN},
    page_window::{PageWindow, PAGE_SIZE},
    route::Route,
    service::{ContactService, ListQuery},
};
