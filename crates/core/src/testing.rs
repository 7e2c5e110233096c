//! Scripted collaborators for module tests.

use crate::{
    error::{BarError, Result},
    launch::Launcher,
    menu::{ActionMenu, Menu, MenuSelection},
    source::PropertySource,
    value::Value,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A call observed by [`MockSource`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Get { interface: String, property: String },
    Set { interface: String, property: String, value: Value },
    Invoke { interface: String, method: String },
}

type Reply = std::result::Result<Value, fn(String) -> BarError>;

#[derive(Debug, Default)]
struct MockState {
    replies: HashMap<(String, String), Reply>,
    calls:   Vec<Call>,
    fail_writes: Option<fn(String) -> BarError>,
}

/// In-memory [`PropertySource`].  Clones share state, so a test can keep a
/// handle after boxing one into a module.
#[derive(Debug, Clone, Default)]
pub struct MockSource {
    state: Arc<Mutex<MockState>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `get(interface, property)` return `value`.
    pub fn reply(&self, interface: &str, property: &str, value: impl Into<Value>) {
        self.lock()
            .replies
            .insert((interface.into(), property.into()), Ok(value.into()));
    }

    /// Make `get(interface, property)` fail with the error built by `make`.
    pub fn fail(&self, interface: &str, property: &str, make: fn(String) -> BarError) {
        self.lock()
            .replies
            .insert((interface.into(), property.into()), Err(make));
    }

    /// Make every `set` and `invoke` fail with the error built by `make`.
    pub fn fail_writes(&self, make: fn(String) -> BarError) {
        self.lock().fail_writes = Some(make);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn sets(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Set { .. }))
            .collect()
    }

    pub fn invocations(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Invoke { method, .. } => Some(method),
                _ => None,
            })
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl PropertySource for MockSource {
    fn address(&self) -> &str {
        "mock"
    }

    fn get(&self, interface: &str, property: &str) -> Result<Value> {
        let mut state = self.lock();
        state.calls.push(Call::Get {
            interface: interface.into(),
            property:  property.into(),
        });
        match state.replies.get(&(interface.to_string(), property.to_string())) {
            Some(Ok(v)) => Ok(v.clone()),
            Some(Err(make)) => Err(make(format!("{interface}.{property}"))),
            None => Err(BarError::Property(format!("no such property {interface}.{property}"))),
        }
    }

    fn set(&self, interface: &str, property: &str, value: Value) -> Result<()> {
        let mut state = self.lock();
        state.calls.push(Call::Set {
            interface: interface.into(),
            property:  property.into(),
            value:     value.clone(),
        });
        if let Some(make) = state.fail_writes {
            return Err(make(format!("{interface}.{property}")));
        }
        state
            .replies
            .insert((interface.into(), property.into()), Ok(value));
        Ok(())
    }

    fn invoke(&self, interface: &str, method: &str, _args: &[Value]) -> Result<()> {
        let mut state = self.lock();
        state.calls.push(Call::Invoke {
            interface: interface.into(),
            method:    method.into(),
        });
        match state.fail_writes {
            Some(make) => Err(make(format!("{interface}.{method}"))),
            None => Ok(()),
        }
    }
}

/// [`ActionMenu`] that returns a fixed selection and records what it was shown.
#[derive(Debug, Clone)]
pub struct ScriptedMenu {
    answer: MenuSelection,
    shown:  Arc<Mutex<Vec<Vec<String>>>>,
}

impl ScriptedMenu {
    pub fn answering(answer: MenuSelection) -> Self {
        Self {
            answer,
            shown: Arc::default(),
        }
    }

    /// Item lists of every menu shown so far.
    pub fn shown(&self) -> Vec<Vec<String>> {
        self.shown.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl ActionMenu for ScriptedMenu {
    fn show(&self, menu: &Menu, _anchor: &str) -> Result<MenuSelection> {
        self.shown
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(menu.items().to_vec());
        Ok(self.answer)
    }
}

/// [`Launcher`] that records commands instead of running them.
#[derive(Debug, Clone, Default)]
pub struct RecordingLauncher {
    commands: Arc<Mutex<Vec<String>>>,
}

impl RecordingLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Launcher for RecordingLauncher {
    fn execute(&self, command: &str) -> Result<()> {
        self.commands
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(command.to_string());
        Ok(())
    }
}
