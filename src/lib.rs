pub mod core;
pub mod directory;

pub use crate::core::{
    error::{self, Error},
    config,
    default_configuration as configuration,
    logger,
};

pub use crate::directory::{
    Contact,
    ContactBuilder,
    ContactId,
    Phone,
    ContactService,
    GraphQLClient,
    ContactList,
    ContactForm,
    EditForm,
    FavoriteStore,
    MemoryFavorites,
    PageWindow,
    Route,
    Submission,
};
