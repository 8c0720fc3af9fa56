//! Area command implementation

use anyhow::Result;

use iris::app::console_dispatcher;
use iris::clock::SystemClock;
use iris::config::Config;
use iris::safety::assess_area;
use iris::store::StoreHandle;

use super::LocationArgs;

/// Speak the safety index for the current area
pub async fn area_command(
    config: &Config,
    store: StoreHandle,
    location: LocationArgs,
    crowd: bool,
) -> Result<()> {
    let dispatcher = console_dispatcher(config, store, location.fix());
    let outcome = dispatcher.check_area();
    println!("{}", outcome.display);

    let Some(fix) = location.fix() else {
        return Ok(());
    };
    if !crowd {
        return Ok(());
    }

    let risk = assess_area(fix, &SystemClock, &mut rand::thread_rng());

    println!("\nArea: {}", risk.area);
    println!("  Risk:     {} ({}/100)", risk.level, risk.score);
    println!("  Lighting: {}%", risk.lighting);
    println!("  Crowd:    {}%", risk.crowd);
    println!("  Crime:    {}", risk.crime_score);
    println!("  {}", risk.suggestion);

    Ok(())
}
