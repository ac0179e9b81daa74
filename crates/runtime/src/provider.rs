//! Player intent providers.
//!
//! The runtime asks its provider once per tick for the player intents it
//! hands to `Realm::step`. Learning agents or scripted drivers implement
//! [`IntentProvider`]; [`IdleProvider`] submits nothing.
use realm_core::{Intents, Realm};

pub trait IntentProvider: Send {
    fn provide(&mut self, realm: &Realm) -> Intents;
}

/// Provider whose players never act.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdleProvider;

impl IntentProvider for IdleProvider {
    fn provide(&mut self, _realm: &Realm) -> Intents {
        Intents::new()
    }
}

impl<F> IntentProvider for F
where
    F: FnMut(&Realm) -> Intents + Send,
{
    fn provide(&mut self, realm: &Realm) -> Intents {
        self(realm)
    }
}
