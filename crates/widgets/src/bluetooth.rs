use crate::Context;
use bar_bus::{BusKind, DbusSource};
use bar_config::Parameters;
use bar_core::{
    ActionMenu, DisplayState, Gesture, InputBindingTable, Launcher, Menu, MenuSelection, Module,
    PropertySource, Result, StatusWidget, Value,
};
use std::sync::Arc;
use tracing::{debug, warn};

pub const SERVICE: &str = "org.bluez";
pub const ADAPTER_IFACE: &str = "org.bluez.Adapter1";
pub const POWERED: &str = "Powered";

/// Things a click on the bluetooth widget can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BluetoothAction {
    /// Run the configured manager application.
    LaunchManager,
    /// Offer to switch the adapter on or off.
    PowerMenu,
}

/// Parameters of the bluetooth module:
///
/// | key       | default           |
/// |-----------|-------------------|
/// | `device`  | `hci0`            |
/// | `manager` | `blueman-manager` |
/// | `launch`  | `LEFT_CLICK`      |
/// | `menu`    | `RIGHT_CLICK`     |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BluetoothSettings {
    pub device:   String,
    pub manager:  String,
    pub bindings: Vec<(Gesture, BluetoothAction)>,
}

impl BluetoothSettings {
    pub fn from_params(params: &Parameters) -> Result<Self> {
        Ok(Self {
            device:  params.get_or("device", "hci0").to_string(),
            manager: params.get_or("manager", "blueman-manager").to_string(),
            bindings: vec![
                (params.gesture("launch", Gesture::PrimaryClick)?, BluetoothAction::LaunchManager),
                (params.gesture("menu", Gesture::SecondaryClick)?, BluetoothAction::PowerMenu),
            ],
        })
    }

    pub fn object_path(&self) -> String {
        format!("/org/bluez/{}", self.device)
    }
}

/// Shows whether a Bluetooth adapter is powered (`On` / `Off` / `?`).
#[derive(Debug)]
pub struct BluetoothModule {
    id:       String,
    manager:  String,
    source:   Box<dyn PropertySource>,
    widget:   StatusWidget,
    bindings: InputBindingTable<BluetoothAction>,
    launcher: Arc<dyn Launcher>,
    menu:     Arc<dyn ActionMenu>,
}

impl BluetoothModule {
    /// Validate `params`, then attach to the adapter on the system bus.
    pub fn connect(id: &str, params: &Parameters, ctx: &Context) -> Result<Self> {
        let settings = BluetoothSettings::from_params(params)?;
        let source = DbusSource::connect(&ctx.buses, BusKind::System, SERVICE, &settings.object_path())?;
        Ok(Self::with_source(
            id,
            settings,
            Box::new(source),
            Arc::clone(&ctx.launcher),
            Arc::clone(&ctx.menu),
        ))
    }

    pub fn with_source(
        id: &str,
        settings: BluetoothSettings,
        source: Box<dyn PropertySource>,
        launcher: Arc<dyn Launcher>,
        menu: Arc<dyn ActionMenu>,
    ) -> Self {
        let mut bindings = InputBindingTable::new();
        for (gesture, action) in settings.bindings {
            bindings.bind(gesture, action);
        }

        Self {
            id: id.to_string(),
            manager: settings.manager,
            source,
            widget: StatusWidget::new(),
            bindings,
            launcher,
            menu,
        }
    }

    fn poll(&self) -> Result<(String, DisplayState)> {
        let powered = self.source.get(ADAPTER_IFACE, POWERED)?.truthy();
        let text = if powered { "On" } else { "Off" };
        Ok((text.to_string(), DisplayState::from_flag(powered)))
    }

    fn open_power_menu(&mut self) -> Result<()> {
        // Built from the state at popup time, not at click time.
        let state = self.widget.state().clone();
        let Some(menu) = power_menu(&state) else {
            return Ok(());
        };

        match self.menu.show(&menu, &self.id)? {
            MenuSelection::Selected(0) => {
                let powered = state == DisplayState::Active;
                debug!(module = self.id.as_str(), to = !powered, "toggling bluetooth");
                self.source.set(ADAPTER_IFACE, POWERED, Value::Bool(!powered))
            }
            _ => Ok(()),
        }
    }
}

/// The power menu for a given display state; `None` while the state is unknown.
pub fn power_menu(state: &DisplayState) -> Option<Menu> {
    let label = match state {
        DisplayState::Active   => "Disable Bluetooth",
        DisplayState::Inactive => "Enable Bluetooth",
        _ => return None,
    };
    let mut menu = Menu::new();
    menu.add_item(label);
    Some(menu)
}

impl Module for BluetoothModule {
    fn kind(&self) -> &str {
        "bluetooth"
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn update(&mut self) {
        let outcome = self.poll();
        self.widget.refresh(&self.id, outcome);
    }

    fn widget(&self) -> &StatusWidget {
        &self.widget
    }

    fn widget_mut(&mut self) -> &mut StatusWidget {
        &mut self.widget
    }

    fn dispatch(&mut self, gesture: Gesture) {
        let Some(action) = self.bindings.lookup(gesture) else {
            return;
        };

        let result = match action {
            BluetoothAction::LaunchManager => self.launcher.execute(&self.manager),
            BluetoothAction::PowerMenu     => self.open_power_menu(),
        };

        if let Err(e) = result {
            warn!(
                module = self.id.as_str(),
                source = self.source.address(),
                ?action,
                kind = e.kind(),
                "action failed: {e}"
            );
            self.widget.mark_unknown();
        }
    }
}
