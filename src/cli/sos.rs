//! SOS command implementation

use anyhow::{Result, bail};

use iris::SosCategory;
use iris::app::console_dispatcher;
use iris::config::Config;
use iris::store::StoreHandle;

use super::LocationArgs;

/// Trigger an SOS by hand, as the panic button would
pub async fn sos_command(
    config: &Config,
    store: StoreHandle,
    location: LocationArgs,
    police: bool,
) -> Result<()> {
    let category = if police {
        SosCategory::Police
    } else {
        SosCategory::Family
    };

    let dispatcher = console_dispatcher(config, store, location.fix());
    let outcome = dispatcher.trigger_sos(category).await;
    println!("{}", outcome.display);

    if let Some(err) = outcome.error {
        bail!(err);
    }

    let links = dispatcher.emergency().links();
    if !links.is_empty() {
        println!("\nNotify your contacts:");
        for link in links {
            println!("  {} - {}", link.contact_name, link.link);
        }
    }

    Ok(())
}
