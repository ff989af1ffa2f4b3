// Ownership of the single displayed model across variant switches.
//
// Every load request bumps a generation and hands out a [`LoadTicket`]. Only
// the newest ticket may attach a model; anything delivered with an older one
// is released on arrival.

use std::fmt::Display;

/// GPU (or other) resources that must be freed explicitly.
pub trait Release {
    fn release(&mut self);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    variant: String,
}

impl LoadTicket {
    pub fn variant(&self) -> &str {
        &self.variant
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    Attached,
    Superseded,
    Failed,
}

pub struct ModelSlot<M: Release> {
    current: Option<M>,
    selected: Option<String>,
    generation: u64,
}

impl<M: Release> Default for ModelSlot<M> {
    fn default() -> Self {
        Self {
            current: None,
            selected: None,
            generation: 0,
        }
    }
}

impl<M: Release> ModelSlot<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin loading `variant`. The current model is released and detached
    /// before the ticket is issued. Returns `None` when `variant` is already
    /// the selected one.
    pub fn request(&mut self, variant: &str) -> Option<LoadTicket> {
        if self.selected.as_deref() == Some(variant) {
            return None;
        }
        self.release_current();
        self.generation += 1;
        self.selected = Some(variant.to_string());
        log::info!("[model] loading {} (generation {})", variant, self.generation);
        Some(LoadTicket {
            generation: self.generation,
            variant: variant.to_string(),
        })
    }

    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Deliver the result of the load started with `ticket`.
    pub fn complete<E: Display>(&mut self, ticket: &LoadTicket, result: Result<M, E>) -> LoadOutcome {
        if !self.is_current(ticket) {
            if let Ok(mut stale) = result {
                stale.release();
            }
            log::debug!(
                "[model] dropping superseded load of {} (generation {})",
                ticket.variant,
                ticket.generation
            );
            return LoadOutcome::Superseded;
        }
        match result {
            Ok(model) => {
                self.release_current();
                self.current = Some(model);
                log::info!("[model] attached {}", ticket.variant);
                LoadOutcome::Attached
            }
            Err(e) => {
                log::error!("[model] failed to load {}: {}", ticket.variant, e);
                // let the same button try again
                self.selected = None;
                LoadOutcome::Failed
            }
        }
    }

    fn release_current(&mut self) {
        if let Some(mut old) = self.current.take() {
            old.release();
        }
    }

    pub fn current(&self) -> Option<&M> {
        self.current.as_ref()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }
}
