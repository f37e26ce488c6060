use crate::script::ParsedCommand;
use crate::store::RigStore;
use gantry_core::GantryResult;
use gantry_domain::{Controller, Rig};

/// Rig, controller, and optional backing store for one CLI invocation.
pub struct CliContext {
    pub rig: Rig,
    pub controller: Controller<Rig>,
    store: Option<RigStore>,
}

impl CliContext {
    /// Load rig state from `file`, or start an ephemeral rig when no
    /// file is configured. A missing file means a fresh rig; the file
    /// is created on the first save.
    pub async fn load(file: Option<&str>) -> GantryResult<Self> {
        let (rig, store) = match file {
            Some(path) => {
                let store = RigStore::new(path);
                let rig = if store.exists() {
                    store.load().await?
                } else {
                    tracing::info!("No state at {}, starting fresh", path);
                    Rig::new()
                };
                (rig, Some(store))
            }
            None => (Rig::new(), None),
        };

        Ok(Self {
            rig,
            controller: Controller::new(),
            store,
        })
    }

    pub fn enqueue_parsed(&mut self, commands: Vec<ParsedCommand>) {
        for parsed in commands {
            self.controller.enqueue(parsed.command);
        }
    }

    pub fn execute_all(&mut self) -> GantryResult<()> {
        self.controller.execute_all(&mut self.rig)
    }

    pub fn undo_last(&mut self, count: usize) -> GantryResult<()> {
        self.controller.undo_last(&mut self.rig, count)
    }

    /// Persist the rig when a store is configured; a no-op otherwise.
    pub async fn save(&self) -> GantryResult<()> {
        if let Some(ref store) = self.store {
            store.save(&self.rig).await?;
        }
        Ok(())
    }

    pub fn state_path(&self) -> Option<String> {
        self.store.as_ref().map(|s| s.path().display().to_string())
    }
}
