use wasm_bindgen::prelude::*;

use crate::config::Profile;
use crate::machine::Machine;
use crate::terminal::Terminal;

#[wasm_bindgen(start)]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    // a logger may already be installed after a hot reload
    let _ = console_log::init_with_level(log::Level::Debug);
}

/// JS handle over a [`Machine`]. Command results cross the boundary as JSON.
#[wasm_bindgen]
pub struct LinuxSim {
    machine: Machine,
}

#[wasm_bindgen]
impl LinuxSim {
    #[wasm_bindgen(constructor)]
    pub fn new(profile_json: Option<String>) -> Result<LinuxSim, JsError> {
        let profile = match profile_json {
            Some(json) => Profile::from_json(&json)?,
            None => Profile::default(),
        };
        Ok(Self {
            machine: Machine::new(profile),
        })
    }

    pub fn open(&mut self, window: &str) -> bool {
        self.machine.open_terminal(window)
    }

    pub fn close(&mut self, window: &str) -> bool {
        self.machine.close_terminal(window)
    }

    pub fn execute(&mut self, window: &str, line: &str) -> Result<String, JsError> {
        Ok(self.machine.run(window, line).to_json()?)
    }

    pub fn complete(&self, window: &str, partial: &str) -> Vec<String> {
        self.machine.complete(window, partial)
    }

    pub fn history(&self, window: &str, prefix: &str) -> Vec<String> {
        self.machine.history_matches(window, prefix)
    }

    pub fn prompt(&self, window: &str) -> Option<String> {
        self.machine.prompt(window)
    }

    pub fn welcome() -> String {
        Terminal::welcome().to_string()
    }

    pub fn save(&self) -> Result<String, JsError> {
        Ok(self.machine.save()?)
    }

    pub fn load(&mut self, json: &str) -> Result<(), JsError> {
        Ok(self.machine.load(json)?)
    }
}
