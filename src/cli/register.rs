//! Register command implementation

use anyhow::Result;

use iris::store::StoreHandle;

/// Register the user of this device
pub async fn register_command(
    store: StoreHandle,
    name: &str,
    phone: &str,
    city: &str,
) -> Result<()> {
    let profile = store.with(|s| s.register(name, phone, city))?;
    println!("Welcome, {}. IRIS is ready.", profile.name);
    Ok(())
}
