use scout::ScoutApp;

use crate::error::CliError;

pub async fn run_contacted(app: &ScoutApp, clear: bool) -> Result<(), CliError> {
    if clear {
        app.contacted().clear_contacted().await;
        println!("🧹 Contacted list cleared");
        return Ok(());
    }

    let contacted = app.contacted().snapshot();
    if contacted.is_empty() {
        println!("No candidates contacted yet");
    }
    for username in contacted.iter() {
        println!("@{username}");
    }
    Ok(())
}
