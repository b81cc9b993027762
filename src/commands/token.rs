use anyhow::Result;
use log::debug;

use crate::host::TokenStore;

/// What to do with the stored token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenAction {
    Set(String),
    Show,
    Clear,
}

/// Manage the token under `key` in `store`.
#[tracing::instrument(skip(store, action))]
pub fn token<S: TokenStore + ?Sized>(store: &S, key: &str, action: TokenAction) -> Result<()> {
    match action {
        TokenAction::Set(value) => {
            store.set(key, &value)?;
            println!("Token saved.");
        }
        TokenAction::Show => match store.get(key)? {
            Some(value) => println!("{}", value),
            None => println!("No token stored."),
        },
        TokenAction::Clear => {
            store.remove(key)?;
            debug!("Removed {:?} from storage", key);
            println!("Token cleared.");
        }
    }
    Ok(())
}
