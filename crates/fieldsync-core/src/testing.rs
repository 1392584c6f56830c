//! In-memory fakes for the platform traits, used by unit tests.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::actions::InputType;
use crate::error::{EngineError, SlotError};
use crate::field::{EditorAttributes, Extension};
use crate::focus::FocusScope;
use crate::platform::{
    EditingEngine, EngineFactory, EngineSpec, HiddenSlots, Prompt, PushSink, TimerHost,
};
use crate::sync::{SlotRole, UpdatePayload};

// === Timers ===

struct Entry {
    id: u64,
    due: u64,
    callback: Box<dyn FnOnce()>,
    cancelled: Rc<Cell<bool>>,
}

#[derive(Default)]
struct TimerQueue {
    now: u64,
    next_id: u64,
    entries: Vec<Entry>,
    ignore_cancel: bool,
}

/// Virtual clock timer host. Time only moves on `advance`.
#[derive(Clone, Default)]
pub struct ManualTimers {
    queue: Rc<RefCell<TimerQueue>>,
}

pub struct ManualHandle {
    cancelled: Rc<Cell<bool>>,
    queue: Weak<RefCell<TimerQueue>>,
}

impl Drop for ManualHandle {
    fn drop(&mut self) {
        let mut ignore = false;
        if let Some(queue) = self.queue.upgrade() {
            if let Ok(queue) = queue.try_borrow() {
                ignore = queue.ignore_cancel;
            }
        }
        if !ignore {
            self.cancelled.set(true);
        }
    }
}

impl ManualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> u64 {
        self.queue.borrow().now
    }

    /// Pretend cancellation arrives too late: dropped handles stop cancelling.
    pub fn set_ignore_cancel(&self, ignore: bool) {
        self.queue.borrow_mut().ignore_cancel = ignore;
    }

    /// Timers scheduled and neither fired nor cancelled.
    pub fn live_count(&self) -> usize {
        self.queue
            .borrow()
            .entries
            .iter()
            .filter(|e| !e.cancelled.get())
            .count()
    }

    /// Move the clock forward, running due callbacks in order.
    pub fn advance(&self, ms: u64) {
        let target = self.now() + ms;
        loop {
            let next = {
                let mut queue = self.queue.borrow_mut();
                queue.entries.retain(|e| !e.cancelled.get());
                let idx = queue
                    .entries
                    .iter()
                    .enumerate()
                    .filter(|(_, e)| e.due <= target)
                    .min_by_key(|(_, e)| (e.due, e.id))
                    .map(|(i, _)| i);
                idx.map(|i| {
                    let entry = queue.entries.remove(i);
                    queue.now = entry.due;
                    entry
                })
            };
            match next {
                Some(entry) => (entry.callback)(),
                None => break,
            }
        }
        self.queue.borrow_mut().now = target;
    }
}

impl TimerHost for ManualTimers {
    type Handle = ManualHandle;

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> ManualHandle {
        let cancelled = Rc::new(Cell::new(false));
        let mut queue = self.queue.borrow_mut();
        let id = queue.next_id;
        queue.next_id += 1;
        let due = queue.now + u64::from(delay_ms);
        queue.entries.push(Entry {
            id,
            due,
            callback,
            cancelled: Rc::clone(&cancelled),
        });
        ManualHandle {
            cancelled,
            queue: Rc::downgrade(&self.queue),
        }
    }
}

// === Engine ===

#[derive(Default)]
pub struct FakeDoc {
    pub paragraphs: Vec<String>,
    pub link: Option<String>,
    pub destroyed: bool,
    pub destroy_calls: usize,
    pub mutations: usize,
    listener: Option<Rc<dyn Fn()>>,
}

/// Engine over a list of paragraphs. Clones share the same document.
#[derive(Clone, Default)]
pub struct FakeEngine {
    doc: Rc<RefCell<FakeDoc>>,
}

impl FakeEngine {
    pub fn with_paragraphs(paragraphs: &[&str]) -> Self {
        let engine = Self::default();
        engine.doc.borrow_mut().paragraphs = paragraphs.iter().map(|p| p.to_string()).collect();
        engine
    }

    pub fn doc(&self) -> &Rc<RefCell<FakeDoc>> {
        &self.doc
    }

    pub fn paragraph_count(&self) -> usize {
        self.doc.borrow().paragraphs.len()
    }

    /// Register the engine's change notification.
    pub fn on_change(&self, f: impl Fn() + 'static) {
        self.doc.borrow_mut().listener = Some(Rc::new(f));
    }

    pub fn set_text(&self, text: &str) {
        self.set_paragraphs(&[text]);
    }

    pub fn set_paragraphs(&self, paragraphs: &[&str]) {
        {
            let mut doc = self.doc.borrow_mut();
            doc.paragraphs = paragraphs.iter().map(|p| p.to_string()).collect();
            doc.mutations += 1;
        }
        self.notify();
    }

    /// Apply an input trigger the way a block editor would.
    pub fn apply_input(&self, input: &InputType) {
        if input.splits_block() {
            {
                let mut doc = self.doc.borrow_mut();
                doc.paragraphs.push(String::new());
                doc.mutations += 1;
            }
            self.notify();
        }
    }

    fn notify(&self) {
        let listener = self.doc.borrow().listener.clone();
        if let Some(listener) = listener {
            listener();
        }
    }

    fn mutate(&self, f: impl FnOnce(&mut FakeDoc)) -> Result<(), EngineError> {
        {
            let mut doc = self.doc.borrow_mut();
            if doc.destroyed {
                return Err(EngineError::Released);
            }
            f(&mut doc);
            doc.mutations += 1;
        }
        self.notify();
        Ok(())
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

impl EditingEngine for FakeEngine {
    fn formatted(&self) -> Result<String, EngineError> {
        let doc = self.doc.borrow();
        if doc.destroyed {
            return Err(EngineError::Released);
        }
        Ok(doc
            .paragraphs
            .iter()
            .map(|p| format!("<p>{}</p>", escape(p)))
            .collect())
    }

    fn link_href(&self) -> Option<String> {
        self.doc.borrow().link.clone()
    }

    fn set_link(&self, href: &str) -> Result<(), EngineError> {
        self.mutate(|doc| doc.link = Some(href.to_string()))
    }

    fn unset_link(&self) -> Result<(), EngineError> {
        self.mutate(|doc| doc.link = None)
    }

    fn destroy(self) {
        let mut doc = self.doc.borrow_mut();
        doc.destroyed = true;
        doc.destroy_calls += 1;
        doc.listener = None;
    }
}

/// Mount target stand-in.
pub struct FakeTarget;

pub struct Constructed {
    pub extensions: Vec<Extension>,
    pub initial_content: String,
    pub attributes: EditorAttributes,
}

#[derive(Default)]
pub struct FakeFactory {
    engine: FakeEngine,
    constructed: RefCell<Vec<Constructed>>,
    fail: bool,
}

impl FakeFactory {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Handle on the engine this factory hands out.
    pub fn engine(&self) -> FakeEngine {
        self.engine.clone()
    }

    pub fn construct_count(&self) -> usize {
        self.constructed.borrow().len()
    }

    pub fn constructed(&self) -> std::cell::Ref<'_, Vec<Constructed>> {
        self.constructed.borrow()
    }
}

impl EngineFactory for FakeFactory {
    type Target = FakeTarget;
    type Engine = FakeEngine;

    fn construct(&self, _target: &FakeTarget, spec: EngineSpec<'_>) -> Result<FakeEngine, EngineError> {
        if self.fail {
            return Err(EngineError::Construct("schema rejected".to_string()));
        }
        self.constructed.borrow_mut().push(Constructed {
            extensions: spec.extensions.to_vec(),
            initial_content: spec.initial_content.to_string(),
            attributes: spec.attributes.clone(),
        });
        self.engine.doc.borrow_mut().paragraphs = vec![spec.initial_content.to_string()];
        Ok(self.engine.clone())
    }
}

// === Sync targets ===

#[derive(Clone, Default)]
pub struct RecordingSink {
    sent: Rc<RefCell<Vec<(String, UpdatePayload)>>>,
    times: Rc<RefCell<Vec<u64>>>,
    clock: Option<ManualTimers>,
}

impl RecordingSink {
    pub fn with_clock(clock: &ManualTimers) -> Self {
        Self {
            clock: Some(clock.clone()),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<(String, UpdatePayload)> {
        self.sent.borrow().clone()
    }

    pub fn times(&self) -> Vec<u64> {
        self.times.borrow().clone()
    }
}

impl PushSink for RecordingSink {
    fn push(&self, event: &str, payload: &UpdatePayload) {
        self.sent
            .borrow_mut()
            .push((event.to_string(), payload.clone()));
        if let Some(clock) = &self.clock {
            self.times.borrow_mut().push(clock.now());
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotEvent {
    Write(SlotRole, String),
    Notify(SlotRole),
}

#[derive(Clone, Default)]
pub struct RecordingSlots {
    events: Rc<RefCell<Vec<SlotEvent>>>,
    missing: Vec<SlotRole>,
}

impl RecordingSlots {
    pub fn with_missing(missing: &[SlotRole]) -> Self {
        Self {
            missing: missing.to_vec(),
            ..Self::default()
        }
    }

    pub fn events(&self) -> Vec<SlotEvent> {
        self.events.borrow().clone()
    }

    pub fn notify_count(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| matches!(e, SlotEvent::Notify(_)))
            .count()
    }

    fn check(&self, role: SlotRole) -> Result<(), SlotError> {
        if self.missing.contains(&role) {
            Err(SlotError::Missing(role.selector()))
        } else {
            Ok(())
        }
    }
}

impl HiddenSlots for RecordingSlots {
    fn write(&self, role: SlotRole, value: &str) -> Result<(), SlotError> {
        self.check(role)?;
        self.events
            .borrow_mut()
            .push(SlotEvent::Write(role, value.to_string()));
        Ok(())
    }

    fn notify_changed(&self, role: SlotRole) -> Result<(), SlotError> {
        self.check(role)?;
        self.events.borrow_mut().push(SlotEvent::Notify(role));
        Ok(())
    }
}

// === Prompt ===

pub struct FixedPrompt {
    answer: Option<String>,
    asked: RefCell<Vec<String>>,
}

impl FixedPrompt {
    pub fn answer(answer: &str) -> Self {
        Self {
            answer: Some(answer.to_string()),
            asked: RefCell::new(Vec::new()),
        }
    }

    pub fn cancel() -> Self {
        Self {
            answer: None,
            asked: RefCell::new(Vec::new()),
        }
    }

    /// Default values the prompt was opened with.
    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }
}

impl Prompt for FixedPrompt {
    fn prompt(&self, _message: &str, default: &str) -> Option<String> {
        self.asked.borrow_mut().push(default.to_string());
        self.answer.clone()
    }
}

// === Focus ===

#[derive(Debug, Clone)]
pub struct FakeElement {
    pub name: &'static str,
    pub visible: bool,
    pub disabled: bool,
}

impl FakeElement {
    pub fn visible(name: &'static str) -> Self {
        Self {
            name,
            visible: true,
            disabled: false,
        }
    }

    pub fn hidden(name: &'static str) -> Self {
        Self {
            name,
            visible: false,
            disabled: false,
        }
    }

    pub fn disabled(name: &'static str) -> Self {
        Self {
            name,
            visible: true,
            disabled: true,
        }
    }
}

/// Container with a fixed element list and a focus pointer.
#[derive(Default)]
pub struct FakeScope {
    pub elements: RefCell<Vec<FakeElement>>,
    pub focused: Cell<Option<&'static str>>,
    pub focus_calls: Cell<usize>,
}

impl FakeScope {
    pub fn new(elements: Vec<FakeElement>) -> Self {
        Self {
            elements: RefCell::new(elements),
            ..Self::default()
        }
    }

    pub fn focus_on(&self, name: &'static str) {
        self.focused.set(Some(name));
    }
}

impl FocusScope for FakeScope {
    type Element = &'static str;

    fn candidates(&self) -> Vec<&'static str> {
        self.elements.borrow().iter().map(|e| e.name).collect()
    }

    fn is_visible(&self, element: &&'static str) -> bool {
        self.elements
            .borrow()
            .iter()
            .any(|e| e.name == *element && e.visible)
    }

    fn is_disabled(&self, element: &&'static str) -> bool {
        self.elements
            .borrow()
            .iter()
            .any(|e| e.name == *element && e.disabled)
    }

    fn focused(&self) -> Option<&'static str> {
        self.focused.get()
    }

    fn focus(&self, element: &&'static str) {
        self.focused.set(Some(*element));
        self.focus_calls.set(self.focus_calls.get() + 1);
    }
}
