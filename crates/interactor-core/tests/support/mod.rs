#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use interactor_core::dom::{DomElement, DomEvent};
use interactor_core::host::{BeaconPayload, BeaconTransport, Host, NavigatorInfo};
use interactor_common::error::TransportError;
use interactor_common::protocol::{ClientSnapshot, PageInfo, Point};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

#[derive(Debug)]
struct NodeData {
    tag: String,
    id: String,
    class: String,
    text: String,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// In-memory element tree. Index 0 is the `HTML` root.
#[derive(Debug)]
pub struct MockDom {
    nodes: RefCell<Vec<NodeData>>,
}

impl MockDom {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            nodes: RefCell::new(vec![NodeData {
                tag: "HTML".into(),
                id: String::new(),
                class: String::new(),
                text: String::new(),
                parent: None,
                children: Vec::new(),
            }]),
        })
    }

    pub fn root(self: &Rc<Self>) -> MockElement {
        MockElement {
            dom: Rc::clone(self),
            index: 0,
        }
    }

    /// A parentless element that is not the document root.
    pub fn detached(self: &Rc<Self>, tag: &str) -> MockElement {
        self.push(None, tag)
    }

    fn push(self: &Rc<Self>, parent: Option<usize>, tag: &str) -> MockElement {
        let mut nodes = self.nodes.borrow_mut();
        let index = nodes.len();
        nodes.push(NodeData {
            tag: tag.into(),
            id: String::new(),
            class: String::new(),
            text: String::new(),
            parent,
            children: Vec::new(),
        });
        if let Some(p) = parent {
            nodes[p].children.push(index);
        }
        MockElement {
            dom: Rc::clone(self),
            index,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MockElement {
    dom: Rc<MockDom>,
    index: usize,
}

impl MockElement {
    pub fn append(&self, tag: &str) -> MockElement {
        self.dom.push(Some(self.index), tag)
    }

    pub fn with_id(self, id: &str) -> Self {
        self.dom.nodes.borrow_mut()[self.index].id = id.into();
        self
    }

    pub fn with_class(self, class: &str) -> Self {
        self.set_class(class);
        self
    }

    pub fn with_text(self, text: &str) -> Self {
        self.dom.nodes.borrow_mut()[self.index].text = text.into();
        self
    }

    pub fn set_class(&self, class: &str) {
        self.dom.nodes.borrow_mut()[self.index].class = class.into();
    }

    fn sibling(&self, offset: isize) -> Option<MockElement> {
        let nodes = self.dom.nodes.borrow();
        let parent = nodes[self.index].parent?;
        let siblings = &nodes[parent].children;
        let pos = siblings.iter().position(|&c| c == self.index)?;
        let target = pos.checked_add_signed(offset)?;
        siblings.get(target).map(|&index| MockElement {
            dom: Rc::clone(&self.dom),
            index,
        })
    }
}

impl DomElement for MockElement {
    fn tag_name(&self) -> String {
        self.dom.nodes.borrow()[self.index].tag.clone()
    }

    fn id(&self) -> String {
        self.dom.nodes.borrow()[self.index].id.clone()
    }

    fn class_name(&self) -> String {
        self.dom.nodes.borrow()[self.index].class.clone()
    }

    fn inner_text(&self) -> String {
        self.dom.nodes.borrow()[self.index].text.clone()
    }

    fn parent_element(&self) -> Option<Self> {
        let parent = self.dom.nodes.borrow()[self.index].parent?;
        Some(MockElement {
            dom: Rc::clone(&self.dom),
            index: parent,
        })
    }

    fn previous_element_sibling(&self) -> Option<Self> {
        self.sibling(-1)
    }

    fn next_element_sibling(&self) -> Option<Self> {
        self.sibling(1)
    }
}

/// A standard page: HTML > BODY > (HEADER, MAIN#content > BUTTON.interaction)
pub struct Page {
    pub dom: Rc<MockDom>,
    pub body: MockElement,
    pub main: MockElement,
    pub button: MockElement,
}

pub fn sample_page() -> Page {
    let dom = MockDom::new();
    let root = dom.root();
    let body = root.append("BODY");
    body.append("HEADER");
    let main = body.append("MAIN").with_id("content");
    let button = main
        .append("BUTTON")
        .with_class("interaction")
        .with_text("Sign up");
    Page {
        dom,
        body,
        main,
        button,
    }
}

pub fn click(target: &MockElement, x: i32, y: i32) -> DomEvent<MockElement> {
    DomEvent::new("mouseup", Some(target.clone())).with_position(Point::new(x, y), Point::new(x, y))
}

/// Host with a clock that advances one second per reading.
pub struct MockHost {
    start: DateTime<Utc>,
    ticks: Cell<i64>,
    pub window: RefCell<ClientSnapshot>,
    pub storage: RefCell<Option<BTreeMap<String, String>>>,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            start: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            ticks: Cell::new(0),
            window: RefCell::new(ClientSnapshot {
                name: "5.0 (X11)".into(),
                inner_width: 1280,
                inner_height: 720,
                outer_width: 1280,
                outer_height: 800,
            }),
            storage: RefCell::new(Some(BTreeMap::from([(
                "cart".to_string(),
                "3".to_string(),
            )]))),
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn resize(&self, inner_width: u32, inner_height: u32) {
        let mut window = self.window.borrow_mut();
        window.inner_width = inner_width;
        window.inner_height = inner_height;
    }
}

impl Host for MockHost {
    fn now(&self) -> DateTime<Utc> {
        let tick = self.ticks.get();
        self.ticks.set(tick + 1);
        self.start + Duration::seconds(tick)
    }

    fn navigator(&self) -> NavigatorInfo {
        NavigatorInfo {
            language: "en-US".into(),
            platform: "Linux x86_64".into(),
        }
    }

    fn client_snapshot(&self) -> ClientSnapshot {
        self.window.borrow().clone()
    }

    fn page(&self) -> PageInfo {
        PageInfo {
            location: "/signup".into(),
            href: "https://example.com:8443/signup".into(),
            origin: "https://example.com:8443".into(),
            port: "8443".into(),
            title: "Sign up".into(),
        }
    }

    fn session_storage(&self) -> Option<BTreeMap<String, String>> {
        self.storage.borrow().clone()
    }
}

/// Captures every beacon. Optionally refuses them.
#[derive(Default)]
pub struct MockTransport {
    pub sent: RefCell<Vec<(String, BeaconPayload)>>,
    pub reject: Cell<bool>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting() -> Self {
        let transport = Self::default();
        transport.reject.set(true);
        transport
    }

    pub fn count(&self) -> usize {
        self.sent.borrow().len()
    }

    /// Body of the single sent beacon, parsed as JSON.
    pub fn only_payload(&self) -> serde_json::Value {
        let sent = self.sent.borrow();
        assert_eq!(sent.len(), 1, "expected exactly one beacon");
        serde_json::from_str(&sent[0].1.body).expect("beacon body is JSON")
    }
}

impl BeaconTransport for MockTransport {
    fn send_beacon(&self, url: &str, payload: BeaconPayload) -> Result<(), TransportError> {
        self.sent.borrow_mut().push((url.to_string(), payload));
        if self.reject.get() {
            return Err(TransportError::Rejected);
        }
        Ok(())
    }
}
