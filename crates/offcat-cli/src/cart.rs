//! Cart commands: load the cart file, apply one operation, save it back.
//!
//! The cart lives in a local JSON file owned by this session; nothing is
//! ever persisted server-side.

use std::path::Path;

use anyhow::bail;

use offcat_client::OffClient;
use offcat_core::CartStore;

pub async fn add(client: &OffClient, cart_path: &Path, code: &str) -> anyhow::Result<()> {
    let Some(product) = client.product_by_barcode(code).await? else {
        bail!("no product found for barcode {code}");
    };

    let mut cart = CartStore::load(cart_path)?;
    cart.add(product);
    cart.save(cart_path)?;
    println!(
        "added {code}; cart now holds {} item(s) across {} line(s)",
        cart.total_item_count(),
        cart.len()
    );
    Ok(())
}

pub fn set(cart_path: &Path, code: &str, quantity: u32) -> anyhow::Result<()> {
    let mut cart = CartStore::load(cart_path)?;
    if cart.get(code).is_none() && quantity > 0 {
        bail!("{code} is not in the cart; use `cart add {code}` first");
    }
    cart.set_quantity(code, quantity);
    cart.save(cart_path)?;
    if quantity == 0 {
        println!("removed {code}");
    } else {
        println!("set {code} to {quantity}");
    }
    Ok(())
}

pub fn remove(cart_path: &Path, code: &str) -> anyhow::Result<()> {
    let mut cart = CartStore::load(cart_path)?;
    cart.remove(code);
    cart.save(cart_path)?;
    println!("removed {code}");
    Ok(())
}

pub fn list(cart_path: &Path) -> anyhow::Result<()> {
    let cart = CartStore::load(cart_path)?;
    if cart.is_empty() {
        println!("cart is empty");
        return Ok(());
    }
    for entry in cart.entries() {
        println!(
            "{:>4} x {:<14} {}",
            entry.quantity,
            entry.product.code,
            entry.product.display_name()
        );
    }
    println!("total: {} item(s)", cart.total_item_count());
    Ok(())
}

pub fn clear(cart_path: &Path) -> anyhow::Result<()> {
    let mut cart = CartStore::load(cart_path)?;
    cart.clear();
    cart.save(cart_path)?;
    println!("cart cleared");
    Ok(())
}
