//! Scoped DOM event listeners.
//!
//! A [`Listener`] removes itself from its target when dropped, so the widget
//! can release every handler it installed on `teardown()`.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget};

use crate::error::{AppError, AppResult};

/// One installed event listener.
pub struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    /// Install `handler` for `kind` events on `target`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Dom`] if the browser refuses the listener.
    pub fn new<F>(target: &EventTarget, kind: &'static str, handler: F) -> AppResult<Self>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target
            .add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
            .map_err(|e| AppError::dom(&e))?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref())
        {
            tracing::warn!("Failed to remove {} listener: {:?}", self.kind, e);
        }
    }
}

/// Listeners released together.
#[derive(Default)]
pub struct ListenerSet {
    listeners: Vec<Listener>,
}

impl ListenerSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a listener and keep it in the set.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Dom`] if the browser refuses the listener.
    pub fn on<F>(&mut self, target: &EventTarget, kind: &'static str, handler: F) -> AppResult<()>
    where
        F: FnMut(Event) + 'static,
    {
        self.listeners.push(Listener::new(target, kind, handler)?);
        Ok(())
    }

    /// Number of installed listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether nothing is installed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Remove every listener.
    pub fn clear(&mut self) {
        tracing::debug!("Removing {} listeners", self.listeners.len());
        self.listeners.clear();
    }
}

impl std::fmt::Debug for ListenerSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerSet")
            .field("len", &self.listeners.len())
            .finish()
    }
}
