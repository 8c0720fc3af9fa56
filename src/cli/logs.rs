//! Logs command implementation

use anyhow::Result;

use iris::store::StoreHandle;

/// Show recent SOS history, newest first
pub async fn logs_command(store: StoreHandle) -> Result<()> {
    let logs = store.with(|s| s.sos_logs().to_vec());

    if logs.is_empty() {
        println!("No SOS sent yet.");
        return Ok(());
    }

    println!("SOS history ({}):\n", logs.len());
    for log in logs {
        println!(
            "  {} [{}] at {} -> {}",
            log.timestamp.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M:%S"),
            log.category,
            log.location.display_short(),
            log.contacts_notified.join(", ")
        );
    }

    Ok(())
}
