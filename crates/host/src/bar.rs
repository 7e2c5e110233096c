use crate::protocol::{Block, ClickEvent};
use bar_bus::Buses;
use bar_config::BarConfig;
use bar_core::{Gesture, Module};
use bar_system::{CommandMenu, ProcessLauncher};
use bar_widgets::Context;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, info};

/// The ordered set of loaded modules.
///
/// Never shared: the host moves the whole `Bar` into each blocking step.  A
/// module handling a click is checked out as a [`Dispatch`] and skipped by
/// `update_all` until it is checked back in, so `update` and `dispatch` of
/// one module can never overlap.
#[derive(Debug, Default)]
pub struct Bar {
    slots: Vec<Slot>,
}

#[derive(Debug)]
struct Slot {
    /// `None` while checked out.
    module: Option<Box<dyn Module>>,
    /// Block emitted on the last frame, repeated while checked out.
    last:   Option<Block>,
}

/// A click taken out of the bar so it can run without holding the other
/// modules.
#[derive(Debug)]
pub struct Dispatch {
    slot:    usize,
    gesture: Gesture,
    module:  Box<dyn Module>,
}

impl Dispatch {
    /// Run the module's action for the gesture.  May block on a menu.
    pub fn run(mut self) -> Self {
        debug!(module = self.module.id(), gesture = %self.gesture, "dispatching");
        self.module.dispatch(self.gesture);
        self
    }
}

impl Bar {
    pub fn new(modules: Vec<Box<dyn Module>>) -> Self {
        let slots = modules
            .into_iter()
            .map(|module| Slot { module: Some(module), last: None })
            .collect();
        Self { slots }
    }

    /// Build every configured module.  Modules that fail to load are logged
    /// and left out; the rest of the bar still runs.
    pub fn from_config(config: &BarConfig) -> Self {
        let ctx = Context {
            buses:    Buses::new(),
            launcher: Arc::new(ProcessLauncher::new()),
            menu:     Arc::new(CommandMenu::new(config.global.menu_command.clone())),
        };

        let mut seen = HashSet::new();
        let mut modules = Vec::new();
        for module_config in &config.modules {
            let id = unique_id(&mut seen, module_config.id());
            match bar_widgets::build(&id, module_config, &ctx) {
                Ok(module) => {
                    info!(module = id.as_str(), kind = module.kind(), "Module loaded");
                    modules.push(module);
                }
                Err(e) => {
                    error!(module = id.as_str(), kind = e.kind(), "Module failed to load: {e}");
                }
            }
        }

        Self::new(modules)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Poll every module that is not busy with a click.
    pub fn update_all(&mut self) {
        for module in self.slots.iter_mut().filter_map(|s| s.module.as_mut()) {
            module.update();
        }
    }

    /// Render one frame.  Hidden widgets are left out; checked-out modules
    /// repeat their previous block.
    pub fn blocks(&mut self) -> Vec<Block> {
        self.slots
            .iter_mut()
            .filter_map(|slot| {
                if let Some(m) = slot.module.as_mut() {
                    slot.last = (!m.widget().is_hidden()).then(|| Block {
                        full_text: m.widget_mut().render(),
                        name:      m.kind().to_string(),
                        instance:  m.id().to_string(),
                        state:     m.state(),
                    });
                }
                slot.last.clone()
            })
            .collect()
    }

    /// Take the module a click is aimed at out of the bar.  Returns `None`
    /// if the button has no gesture, no module matches, or the module is
    /// still busy with an earlier click.
    pub fn checkout(&mut self, event: &ClickEvent) -> Option<Dispatch> {
        let Some(gesture) = Gesture::from_button(event.button) else {
            debug!(button = event.button, "ignoring unmapped button");
            return None;
        };

        let position = self.slots.iter().position(|slot| match &slot.module {
            Some(m) => match &event.instance {
                Some(instance) => m.id() == instance.as_str(),
                None => m.kind() == event.name,
            },
            None => false,
        });

        let Some(slot) = position else {
            debug!(name = event.name.as_str(), "click for unknown or busy module");
            return None;
        };
        let module = self.slots[slot].module.take()?;
        Some(Dispatch { slot, gesture, module })
    }

    /// Put a module back after its click has been handled.
    pub fn checkin(&mut self, dispatch: Dispatch) {
        self.slots[dispatch.slot].module = Some(dispatch.module);
    }

    /// Route a click to its module and wait for it.  Returns `false` if no
    /// module took the click.
    pub fn click(&mut self, event: &ClickEvent) -> bool {
        match self.checkout(event) {
            Some(dispatch) => {
                let done = dispatch.run();
                self.checkin(done);
                true
            }
            None => false,
        }
    }
}

/// `base`, or `base#2`, `base#3`, … if already taken.
fn unique_id(seen: &mut HashSet<String>, base: &str) -> String {
    let mut id = base.to_string();
    let mut n = 2;
    while seen.contains(&id) {
        id = format!("{base}#{n}");
        n += 1;
    }
    seen.insert(id.clone());
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use bar_core::{DisplayState, StatusWidget};

    #[derive(Debug)]
    struct Counter {
        id:     String,
        widget: StatusWidget,
        ticks:  u32,
    }

    impl Counter {
        fn boxed(id: &str) -> Box<dyn Module> {
            Box::new(Self {
                id:     id.to_string(),
                widget: StatusWidget::new(),
                ticks:  0,
            })
        }
    }

    impl Module for Counter {
        fn kind(&self) -> &str {
            "counter"
        }

        fn id(&self) -> &str {
            &self.id
        }

        fn update(&mut self) {
            self.ticks += 1;
            let text = if self.id == "hidden" { String::new() } else { self.ticks.to_string() };
            self.widget.show(text, DisplayState::Active);
        }

        fn widget(&self) -> &StatusWidget {
            &self.widget
        }

        fn widget_mut(&mut self) -> &mut StatusWidget {
            &mut self.widget
        }

        fn dispatch(&mut self, gesture: Gesture) {
            self.widget.show(format!("{gesture}"), DisplayState::Inactive);
        }
    }

    fn click(instance: Option<&str>, button: u32) -> ClickEvent {
        ClickEvent {
            name: "counter".into(),
            instance: instance.map(str::to_string),
            button,
        }
    }

    #[test]
    fn hidden_widgets_are_omitted() {
        let mut bar = Bar::new(vec![Counter::boxed("a"), Counter::boxed("hidden")]);
        bar.update_all();
        let blocks = bar.blocks();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].full_text, "1");
        assert_eq!(blocks[0].instance, "a");
        assert_eq!(blocks[0].state, vec!["ON"]);
    }

    #[test]
    fn clicks_route_by_instance() {
        let mut bar = Bar::new(vec![Counter::boxed("a"), Counter::boxed("b")]);
        bar.update_all();
        assert!(bar.click(&click(Some("b"), 3)));
        let blocks = bar.blocks();
        assert_eq!(blocks[0].full_text, "1");
        assert_eq!(blocks[1].full_text, "RIGHT_CLICK");
    }

    #[test]
    fn clicks_without_instance_route_by_kind() {
        let mut bar = Bar::new(vec![Counter::boxed("a")]);
        assert!(bar.click(&click(None, 4)));
        assert_eq!(bar.blocks()[0].full_text, "SCROLL_UP");
    }

    #[test]
    fn unmapped_buttons_and_unknown_modules_are_ignored() {
        let mut bar = Bar::new(vec![Counter::boxed("a")]);
        assert!(!bar.click(&click(Some("a"), 8)));
        assert!(!bar.click(&click(Some("zzz"), 1)));
    }

    #[test]
    fn busy_modules_keep_their_block_and_ignore_clicks() {
        let mut bar = Bar::new(vec![Counter::boxed("a"), Counter::boxed("b")]);
        bar.update_all();
        bar.blocks();

        let pending = bar.checkout(&click(Some("b"), 1)).unwrap();
        bar.update_all();
        let blocks = bar.blocks();
        assert_eq!(blocks[0].full_text, "2");
        assert_eq!(blocks[1].full_text, "1");
        assert!(!bar.click(&click(Some("b"), 3)));

        bar.checkin(pending.run());
        assert_eq!(bar.blocks()[1].full_text, "LEFT_CLICK");
    }

    #[test]
    fn duplicate_ids_get_suffixes() {
        let mut seen = HashSet::new();
        assert_eq!(unique_id(&mut seen, "media"), "media");
        assert_eq!(unique_id(&mut seen, "media"), "media#2");
        assert_eq!(unique_id(&mut seen, "media"), "media#3");
    }

    #[test]
    fn unloadable_modules_are_skipped() {
        let mut config = BarConfig::default();
        config.modules = vec![bar_config::ModuleConfig::new("weather")];
        assert!(Bar::from_config(&config).is_empty());
    }

    #[test]
    fn modules_without_a_service_are_skipped() {
        let mut config = BarConfig::default();
        let mut media = bar_config::ModuleConfig::new("media");
        media.options.insert("player".into(), "bar_absent_player".into());
        config.modules = vec![media];
        assert!(Bar::from_config(&config).is_empty());
    }
}
