use scout::ScoutApp;

use crate::error::CliError;
use crate::render::format_history;

pub async fn run_history(app: &ScoutApp) -> Result<(), CliError> {
    let records = app.history().list().await;
    print!("{}", format_history(&records));
    Ok(())
}
