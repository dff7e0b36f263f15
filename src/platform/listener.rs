//=========================================================================
// Listener Protocol
//
// The notification contract between a window and the object observing
// it. A window holds at most one listener at a time, through a weak
// (non-owning) back-reference.
//
// Two tiers of events:
// - Mandatory: close, focus change, framebuffer resize. Every listener
//   implements these; they are always delivered.
// - Optional: about-to-destroy, file drop. Delivered only when the
//   listener declared interest via its subscription set. The gate is a
//   single bit test on the hot callback path; forgetting to subscribe is
//   a silent no-op, not an error.
//
// Dispatch is isolated: a panicking listener is caught and logged, never
// unwound through the platform callback stack.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::RefCell;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::PathBuf;
use std::rc::Weak;

//=== External Crates =====================================================

use bitflags::bitflags;
use log::error;

//=== Subscriptions =======================================================

bitflags! {
    /// Declared interest in the optional listener events.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Subscriptions: u8 {
        const DESTROYING = 0b01;
        const DROP       = 0b10;
    }
}

//=== Listener ============================================================

/// Receiver of a window's lifecycle notifications.
///
/// The three mandatory hooks fire whenever the corresponding platform
/// event does. The optional hooks have empty default bodies and only
/// fire when [`Listener::subscriptions`] includes the matching bit.
pub trait Listener {
    fn on_close(&mut self);
    fn on_focus_changed(&mut self, focused: bool);
    fn on_framebuffer_size_changed(&mut self, width: u32, height: u32);

    /// Subscription set for the optional events below. Defaults to none.
    fn subscriptions(&self) -> Subscriptions {
        Subscriptions::empty()
    }

    /// The window is about to tear down its native resources.
    fn on_destroying(&mut self) {}

    /// Files were dropped onto the window.
    fn on_drop(&mut self, _paths: &[PathBuf]) {}
}

//=== LifecycleEvent ======================================================

/// A window lifecycle event, after translation from the platform.
///
/// Input events never appear here - they flow into the input cache, not
/// through the listener.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum LifecycleEvent {
    CloseRequested,
    FocusChanged(bool),
    FramebufferResized(u32, u32),
    Destroying,
    FilesDropped(Vec<PathBuf>),
}

//=== ListenerSlot ========================================================

/// The window's 0-or-1 listener registration.
///
/// Holds a weak reference: the listener's owner (the application) outlives
/// its window in normal operation, and a listener that has already been
/// dropped simply stops receiving events.
pub(crate) struct ListenerSlot {
    listener: Option<Weak<RefCell<dyn Listener>>>,
}

impl ListenerSlot {
    pub(crate) fn new() -> Self {
        Self { listener: None }
    }

    /// Replaces the registered listener. The previous listener is not
    /// notified of its replacement.
    pub(crate) fn set(&mut self, listener: Weak<RefCell<dyn Listener>>) {
        self.listener = Some(listener);
    }

    pub(crate) fn reset(&mut self) {
        self.listener = None;
    }

    /// Delivers one lifecycle event, applying the subscription gate for
    /// optional events. No listener, a dead weak reference, or a missing
    /// subscription all degrade to a no-op.
    pub(crate) fn dispatch(&self, event: LifecycleEvent) {
        let Some(listener) = self.listener.as_ref().and_then(Weak::upgrade) else {
            return;
        };

        // Callbacks arrive on the platform's callback stack; a listener
        // panic must not unwind through it.
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            let mut listener = listener.borrow_mut();
            match event {
                LifecycleEvent::CloseRequested => listener.on_close(),
                LifecycleEvent::FocusChanged(focused) => listener.on_focus_changed(focused),
                LifecycleEvent::FramebufferResized(width, height) => {
                    listener.on_framebuffer_size_changed(width, height);
                }
                LifecycleEvent::Destroying => {
                    if listener.subscriptions().contains(Subscriptions::DESTROYING) {
                        listener.on_destroying();
                    }
                }
                LifecycleEvent::FilesDropped(paths) => {
                    if listener.subscriptions().contains(Subscriptions::DROP) {
                        listener.on_drop(&paths);
                    }
                }
            }
        }));

        if outcome.is_err() {
            error!("Listener callback panicked; the event was dropped");
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    //--- Test Helpers -----------------------------------------------------

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Close,
        Focus(bool),
        Resized(u32, u32),
        Destroying,
        Dropped(usize),
    }

    struct RecordingListener {
        subscriptions: Subscriptions,
        calls: Vec<Call>,
    }

    impl RecordingListener {
        fn shared(subscriptions: Subscriptions) -> Rc<RefCell<Self>> {
            Rc::new(RefCell::new(Self { subscriptions, calls: Vec::new() }))
        }
    }

    impl Listener for RecordingListener {
        fn on_close(&mut self) {
            self.calls.push(Call::Close);
        }

        fn on_focus_changed(&mut self, focused: bool) {
            self.calls.push(Call::Focus(focused));
        }

        fn on_framebuffer_size_changed(&mut self, width: u32, height: u32) {
            self.calls.push(Call::Resized(width, height));
        }

        fn subscriptions(&self) -> Subscriptions {
            self.subscriptions
        }

        fn on_destroying(&mut self) {
            self.calls.push(Call::Destroying);
        }

        fn on_drop(&mut self, paths: &[PathBuf]) {
            self.calls.push(Call::Dropped(paths.len()));
        }
    }

    fn slot_with(listener: &Rc<RefCell<RecordingListener>>) -> ListenerSlot {
        let mut slot = ListenerSlot::new();
        let listener_dyn: Rc<RefCell<dyn Listener>> = listener.clone();
        let weak: Weak<RefCell<dyn Listener>> = Rc::downgrade(&listener_dyn);
        slot.set(weak);
        slot
    }

    //=====================================================================
    // Mandatory Events
    //=====================================================================

    #[test]
    fn mandatory_events_are_always_delivered() {
        let listener = RecordingListener::shared(Subscriptions::empty());
        let slot = slot_with(&listener);

        slot.dispatch(LifecycleEvent::CloseRequested);
        slot.dispatch(LifecycleEvent::FocusChanged(true));
        slot.dispatch(LifecycleEvent::FramebufferResized(800, 600));

        assert_eq!(
            listener.borrow().calls,
            vec![Call::Close, Call::Focus(true), Call::Resized(800, 600)]
        );
    }

    //=====================================================================
    // Optional Events & Gating
    //=====================================================================

    #[test]
    fn optional_events_require_subscription() {
        let listener = RecordingListener::shared(Subscriptions::empty());
        let slot = slot_with(&listener);

        slot.dispatch(LifecycleEvent::Destroying);
        slot.dispatch(LifecycleEvent::FilesDropped(vec![PathBuf::from("a.txt")]));

        assert!(listener.borrow().calls.is_empty());
    }

    #[test]
    fn subscribed_optional_events_are_delivered() {
        let listener =
            RecordingListener::shared(Subscriptions::DESTROYING | Subscriptions::DROP);
        let slot = slot_with(&listener);

        slot.dispatch(LifecycleEvent::Destroying);
        slot.dispatch(LifecycleEvent::FilesDropped(vec![
            PathBuf::from("a.txt"),
            PathBuf::from("b.txt"),
        ]));

        assert_eq!(listener.borrow().calls, vec![Call::Destroying, Call::Dropped(2)]);
    }

    #[test]
    fn gate_is_per_listener_not_global() {
        let subscribed = RecordingListener::shared(Subscriptions::DROP);
        let unsubscribed = RecordingListener::shared(Subscriptions::empty());

        slot_with(&subscribed).dispatch(LifecycleEvent::FilesDropped(vec![PathBuf::from("x")]));
        slot_with(&unsubscribed).dispatch(LifecycleEvent::FilesDropped(vec![PathBuf::from("x")]));

        assert_eq!(subscribed.borrow().calls, vec![Call::Dropped(1)]);
        assert!(unsubscribed.borrow().calls.is_empty());
    }

    //=====================================================================
    // Registration
    //=====================================================================

    #[test]
    fn replacing_a_listener_redirects_without_notifying_the_old_one() {
        let first = RecordingListener::shared(Subscriptions::empty());
        let second = RecordingListener::shared(Subscriptions::empty());

        let mut slot = slot_with(&first);
        let second_dyn: Rc<RefCell<dyn Listener>> = second.clone();
        let weak: Weak<RefCell<dyn Listener>> = Rc::downgrade(&second_dyn);
        slot.set(weak);

        slot.dispatch(LifecycleEvent::CloseRequested);

        assert!(first.borrow().calls.is_empty());
        assert_eq!(second.borrow().calls, vec![Call::Close]);
    }

    #[test]
    fn reset_slot_drops_events() {
        let listener = RecordingListener::shared(Subscriptions::empty());
        let mut slot = slot_with(&listener);

        slot.reset();
        slot.dispatch(LifecycleEvent::CloseRequested);

        assert!(listener.borrow().calls.is_empty());
    }

    #[test]
    fn dead_listener_degrades_to_noop() {
        let listener = RecordingListener::shared(Subscriptions::empty());
        let slot = slot_with(&listener);

        drop(listener);

        // Must not panic or deliver anywhere.
        slot.dispatch(LifecycleEvent::CloseRequested);
    }

    #[test]
    fn empty_slot_ignores_dispatch() {
        let slot = ListenerSlot::new();
        slot.dispatch(LifecycleEvent::FocusChanged(false));
    }

    //=====================================================================
    // Panic Isolation
    //=====================================================================

    struct PanickingListener;

    impl Listener for PanickingListener {
        fn on_close(&mut self) {
            panic!("listener bug");
        }
        fn on_focus_changed(&mut self, _: bool) {}
        fn on_framebuffer_size_changed(&mut self, _: u32, _: u32) {}
    }

    #[test]
    fn listener_panic_does_not_escape_dispatch() {
        let listener: Rc<RefCell<dyn Listener>> = Rc::new(RefCell::new(PanickingListener));
        let mut slot = ListenerSlot::new();
        slot.set(Rc::downgrade(&listener));

        slot.dispatch(LifecycleEvent::CloseRequested);

        // Still usable afterwards.
        slot.dispatch(LifecycleEvent::FocusChanged(true));
    }
}
