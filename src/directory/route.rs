use std::fmt;

use super::contact::ContactId;

/// The three addressable views. Unknown paths land on the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    List,
    Add,
    Edit(ContactId),
}

impl Route {
    pub fn resolve(path: &str) -> Self {
        let segments: Vec<&str> = path.trim()
            .trim_matches('/')
            .split('/')
            .collect();

        match segments.as_slice() {
            ["add"] => Route::Add,
            ["edit", id] => id.parse::<ContactId>()
                .map(Route::Edit)
                .unwrap_or(Route::List),
            _ => Route::List,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::List => write!(f, "/"),
            Route::Add => write!(f, "/add"),
            Route::Edit(id) => write!(f, "/edit/{}", id),
        }
    }
}
