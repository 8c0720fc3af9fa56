//! Contacts command implementation

use anyhow::Result;

use iris::store::StoreHandle;

/// List trusted contacts in priority order
pub async fn list_command(store: StoreHandle) -> Result<()> {
    let mut contacts = store.with(|s| s.contacts());
    contacts.sort_by_key(|c| c.priority);

    if contacts.is_empty() {
        println!("No trusted contacts. Add one with `iris contacts add`.");
        return Ok(());
    }

    println!("Trusted contacts ({}):\n", contacts.len());
    for contact in contacts {
        let verified = if contact.is_verified { "verified" } else { "unverified" };
        println!(
            "  #{} {} ({}) {} [{}] id={}",
            contact.priority, contact.name, contact.relation, contact.phone, verified, contact.id
        );
    }

    Ok(())
}

/// Add a trusted contact
pub async fn add_command(
    store: StoreHandle,
    name: &str,
    phone: &str,
    relation: &str,
) -> Result<()> {
    let contact = store.with(|s| s.add_contact(name, phone, relation))?;
    println!("Added {} (priority {}, id {})", contact.name, contact.priority, contact.id);
    Ok(())
}

/// Remove a trusted contact by id
pub async fn remove_command(store: StoreHandle, id: &str) -> Result<()> {
    let contact = store.with(|s| s.remove_contact(id))?;
    println!("Removed {}", contact.name);
    Ok(())
}
