// Host-side tests for model ownership across variant switches.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod slot {
    include!("../src/core/slot.rs");
}

use slot::*;
use std::cell::Cell;
use std::rc::Rc;

/// Stand-in model that counts its releases.
struct FakeModel {
    name: &'static str,
    releases: Rc<Cell<u32>>,
}

impl FakeModel {
    fn new(name: &'static str) -> (Self, Rc<Cell<u32>>) {
        let releases = Rc::new(Cell::new(0));
        (
            Self {
                name,
                releases: releases.clone(),
            },
            releases,
        )
    }
}

impl Release for FakeModel {
    fn release(&mut self) {
        self.releases.set(self.releases.get() + 1);
    }
}

type Slot = ModelSlot<FakeModel>;

#[test]
fn first_load_attaches() {
    let mut slot = Slot::new();
    let ticket = slot.request("a.glb").expect("first request");
    assert_eq!(ticket.variant(), "a.glb");
    let (m, releases) = FakeModel::new("a");
    assert_eq!(slot.complete::<String>(&ticket, Ok(m)), LoadOutcome::Attached);
    assert_eq!(slot.current().map(|m| m.name), Some("a"));
    assert_eq!(slot.selected(), Some("a.glb"));
    assert_eq!(releases.get(), 0);
}

#[test]
fn reselecting_same_variant_is_a_no_op() {
    let mut slot = Slot::new();
    let t = slot.request("a.glb").expect("first request");
    assert!(slot.request("a.glb").is_none());
    assert!(slot.is_current(&t));
}

#[test]
fn switching_releases_previous_model_immediately() {
    let mut slot = Slot::new();
    let t1 = slot.request("a.glb").expect("a");
    let (a, a_releases) = FakeModel::new("a");
    slot.complete::<String>(&t1, Ok(a));

    let t2 = slot.request("b.glb").expect("b");
    assert_eq!(a_releases.get(), 1);
    assert!(slot.current().is_none());

    let (b, b_releases) = FakeModel::new("b");
    assert_eq!(slot.complete::<String>(&t2, Ok(b)), LoadOutcome::Attached);
    assert_eq!(slot.current().map(|m| m.name), Some("b"));
    assert_eq!(a_releases.get(), 1);
    assert_eq!(b_releases.get(), 0);
}

#[test]
fn late_result_of_superseded_load_is_released() {
    let mut slot = Slot::new();
    let t_a = slot.request("a.glb").expect("a");
    let t_b = slot.request("b.glb").expect("b");
    assert!(!slot.is_current(&t_a));
    assert!(t_b.generation() > t_a.generation());

    // b finishes first, then a arrives late
    let (b, b_releases) = FakeModel::new("b");
    assert_eq!(slot.complete::<String>(&t_b, Ok(b)), LoadOutcome::Attached);
    let (a, a_releases) = FakeModel::new("a");
    assert_eq!(slot.complete::<String>(&t_a, Ok(a)), LoadOutcome::Superseded);

    assert_eq!(a_releases.get(), 1);
    assert_eq!(b_releases.get(), 0);
    assert_eq!(slot.current().map(|m| m.name), Some("b"));
}

#[test]
fn superseded_load_arriving_first_never_shows() {
    let mut slot = Slot::new();
    let t_a = slot.request("a.glb").expect("a");
    let t_b = slot.request("b.glb").expect("b");
    let (a, a_releases) = FakeModel::new("a");
    assert_eq!(slot.complete::<String>(&t_a, Ok(a)), LoadOutcome::Superseded);
    assert!(slot.current().is_none());
    assert_eq!(a_releases.get(), 1);

    let (b, _) = FakeModel::new("b");
    assert_eq!(slot.complete::<String>(&t_b, Ok(b)), LoadOutcome::Attached);
    assert_eq!(slot.current().map(|m| m.name), Some("b"));
}

#[test]
fn failed_load_leaves_empty_slot_and_allows_retry() {
    let mut slot = Slot::new();
    let t1 = slot.request("a.glb").expect("a");
    let (a, a_releases) = FakeModel::new("a");
    slot.complete::<String>(&t1, Ok(a));

    let t2 = slot.request("broken.glb").expect("broken");
    assert_eq!(
        slot.complete(&t2, Err::<FakeModel, _>("HTTP 404")),
        LoadOutcome::Failed
    );
    assert!(slot.current().is_none());
    assert_eq!(a_releases.get(), 1);
    assert_eq!(slot.selected(), None);

    // the same button works again
    assert!(slot.request("broken.glb").is_some());
}

#[test]
fn superseded_failure_does_not_clear_selection() {
    let mut slot = Slot::new();
    let t_a = slot.request("a.glb").expect("a");
    let _t_b = slot.request("b.glb").expect("b");
    assert_eq!(
        slot.complete(&t_a, Err::<FakeModel, _>("aborted")),
        LoadOutcome::Superseded
    );
    assert_eq!(slot.selected(), Some("b.glb"));
}

#[test]
fn rapid_switching_keeps_only_last() {
    let mut slot = Slot::new();
    let tickets: Vec<LoadTicket> = ["a.glb", "b.glb", "c.glb", "d.glb"]
        .iter()
        .map(|v| slot.request(v).expect("distinct variants"))
        .collect();
    let mut counters = Vec::new();
    // deliver in reverse order
    for t in tickets.iter().rev() {
        let (m, r) = FakeModel::new("m");
        counters.push(r);
        slot.complete::<String>(t, Ok(m));
    }
    assert_eq!(slot.selected(), Some("d.glb"));
    assert!(slot.current().is_some());
    // the last delivered three were stale
    let released: u32 = counters.iter().map(|c| c.get()).sum();
    assert_eq!(released, 3);
    assert_eq!(counters[0].get(), 0);
}
