use crate::output;
use crate::store::RigStore;
use gantry_domain::Rig;

pub async fn handle_status(file: Option<&str>) -> anyhow::Result<()> {
    let Some(path) = file else {
        output::output_error("--file is required for status");
    };

    let store = RigStore::new(path);
    if !store.exists() {
        output::output_error(&format!("No rig state at {}", path));
    }

    let rig = store.load().await?;
    output::output_success(serde_json::json!({
        "rig": rig,
        "state_file": path,
    }));
    Ok(())
}

pub async fn handle_reset(file: Option<&str>) -> anyhow::Result<()> {
    let Some(path) = file else {
        output::output_error("--file is required for reset");
    };

    let store = RigStore::new(path);
    let rig = Rig::new();
    store.save(&rig).await?;
    tracing::info!("Reset rig state at {}", path);

    output::output_success(serde_json::json!({
        "rig": rig,
        "state_file": path,
    }));
    Ok(())
}
