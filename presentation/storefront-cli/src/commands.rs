use std::fmt::Write;

use business::application::cart::manager::CartManager;
use business::domain::cart::errors::CartError;
use business::domain::cart::model::CartItem;

use crate::cli::Command;

/// Runs one command against the loaded cart and returns the cart as it
/// stands afterwards.
pub async fn execute(manager: &CartManager, command: Command) -> Result<String, CartError> {
    match command {
        Command::Show => {}
        Command::Add(args) => {
            let item = CartItem::new(
                args.product_id,
                args.name,
                args.price,
                args.image,
                args.quantity,
                args.unit,
            )?;
            manager.add_item(item).await?;
        }
        Command::Remove { product_id } => manager.remove_item(&product_id).await?,
        Command::SetQuantity {
            product_id,
            quantity,
        } => manager.update_quantity(&product_id, quantity).await?,
        Command::Clear => manager.clear().await?,
    }

    Ok(render(
        &manager.items().await,
        manager.total_items().await,
        manager.total_price().await,
    ))
}

pub fn render(items: &[CartItem], total_items: u64, total_price: f64) -> String {
    if items.is_empty() {
        return "Your cart is empty\n".to_string();
    }

    let mut out = String::new();
    for item in items {
        let unit = if item.unit.is_empty() {
            String::new()
        } else {
            format!(" ({})", item.unit)
        };
        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            "{:<12} {}{}  {} x {} = {:.2}",
            item.id,
            item.name,
            unit,
            item.quantity,
            item.price,
            item.line_total()
        );
    }
    let _ = writeln!(out, "Items: {}  Total: {:.2}", total_items, total_price);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use logger::{TracingLogger, TracingNotifier};
    use persistence::guest_cart::file_store::JsonFileGuestCartStore;
    use remote::cart_repository::CartRepositoryHttp;
    use remote::client::{RemoteCartConfig, RemoteClient};

    use crate::cli::AddArgs;

    async fn guest_manager(dir: &tempfile::TempDir) -> CartManager {
        let config = RemoteCartConfig::new("http://127.0.0.1:9").unwrap();
        let repository = CartRepositoryHttp::new(RemoteClient::new(&config, "").unwrap());
        let manager = CartManager::new(
            Arc::new(repository),
            Arc::new(JsonFileGuestCartStore::new(dir.path().join("cart.json"))),
            Arc::new(TracingNotifier),
            Arc::new(TracingLogger),
        );
        manager.set_identity(None).await.unwrap();
        manager
    }

    fn add(product_id: &str, price: &str, quantity: u32) -> Command {
        Command::Add(AddArgs {
            product_id: product_id.to_string(),
            name: "Sky Shot".to_string(),
            price: price.to_string(),
            image: String::new(),
            quantity,
            unit: "Box".to_string(),
        })
    }

    #[test]
    fn should_render_empty_cart() {
        assert_eq!(render(&[], 0, 0.0), "Your cart is empty\n");
    }

    #[test]
    fn should_render_lines_and_totals() {
        let item = CartItem::new("p1", "Sky Shot", "₹1,200", "", 2, "Box").unwrap();

        let out = render(&[item], 2, 2400.0);

        assert!(out.contains("Sky Shot (Box)  2 x ₹1,200 = 2400.00"));
        assert!(out.ends_with("Items: 2  Total: 2400.00\n"));
    }

    #[tokio::test]
    async fn should_persist_guest_cart_between_runs() {
        let dir = tempfile::tempdir().unwrap();
        let first = guest_manager(&dir).await;
        execute(&first, add("p1", "₹100", 2)).await.unwrap();
        execute(&first, add("p1", "₹100", 3)).await.unwrap();

        let second = guest_manager(&dir).await;
        let out = execute(&second, Command::Show).await.unwrap();

        assert_eq!(second.total_items().await, 5);
        assert!(out.contains("Total: 500.00"));
    }

    #[tokio::test]
    async fn should_remove_line_when_quantity_set_to_zero() {
        let dir = tempfile::tempdir().unwrap();
        let manager = guest_manager(&dir).await;
        execute(&manager, add("p1", "₹100", 2)).await.unwrap();

        let out = execute(
            &manager,
            Command::SetQuantity {
                product_id: "p1".to_string(),
                quantity: 0,
            },
        )
        .await
        .unwrap();

        assert_eq!(out, "Your cart is empty\n");
    }

    #[tokio::test]
    async fn should_reject_zero_quantity_add() {
        let dir = tempfile::tempdir().unwrap();
        let manager = guest_manager(&dir).await;

        let result = execute(&manager, add("p1", "₹100", 0)).await;

        assert!(matches!(result, Err(CartError::InvalidQuantity)));
    }

    #[tokio::test]
    async fn should_fail_when_remote_cart_unreachable() {
        let dir = tempfile::tempdir().unwrap();
        let manager = guest_manager(&dir).await;

        let result = manager
            .set_identity(Some("shopper-1".into()))
            .await;

        assert!(result.is_err());
        assert_eq!(
            execute(&manager, Command::Show).await.unwrap(),
            "Your cart is empty\n"
        );
    }
}
