use std::sync::mpsc;

use anyhow::anyhow;
use starscape::resources::slot::{AssetSlot, AssetState};

#[test]
fn stays_pending_while_the_loader_runs() {
    let (sender, receiver) = mpsc::channel::<anyhow::Result<u32>>();
    let mut slot = AssetSlot::pending(receiver);
    assert_eq!(slot.state(), AssetState::Pending);
    assert!(slot.poll().is_none());
    assert_eq!(slot.state(), AssetState::Pending);
    drop(sender);
}

#[test]
fn yields_the_payload_exactly_once() {
    let (sender, receiver) = mpsc::channel();
    let mut slot = AssetSlot::pending(receiver);
    sender.send(Ok(7u32)).unwrap();

    assert_eq!(slot.poll(), Some(7));
    assert_eq!(slot.state(), AssetState::Loaded);
    assert!(slot.poll().is_none());
    assert_eq!(slot.state(), AssetState::Loaded);
}

#[test]
fn a_load_error_fails_the_slot_permanently() {
    let (sender, receiver) = mpsc::channel::<anyhow::Result<u32>>();
    let mut slot = AssetSlot::pending(receiver);
    sender.send(Err(anyhow!("missing file"))).unwrap();

    assert!(slot.poll().is_none());
    assert_eq!(slot.state(), AssetState::Failed);
    assert!(slot.poll().is_none());
    assert_eq!(slot.state(), AssetState::Failed);
}

#[test]
fn a_dropped_loader_fails_the_slot() {
    let (sender, receiver) = mpsc::channel::<anyhow::Result<u32>>();
    drop(sender);
    let mut slot = AssetSlot::pending(receiver);

    assert!(slot.poll().is_none());
    assert_eq!(slot.state(), AssetState::Failed);
}
