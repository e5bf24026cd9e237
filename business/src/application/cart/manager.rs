use std::sync::Arc;

use tokio::sync::{RwLock, watch};
use tokio::task::JoinHandle;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::guest_store::{GuestCartError, GuestCartStore};
use crate::domain::cart::mode::CartMode;
use crate::domain::cart::model::{Cart, CartItem, CartRecord, MAX_QUANTITY, add_quantities};
use crate::domain::cart::repository::CartRepository;
use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::notifier::{Notification, Notifier};
use crate::domain::shared::value_objects::UserId;

#[derive(Debug, Clone, Copy)]
enum CartAction {
    Load,
    Add,
    Remove,
    UpdateQuantity,
    Clear,
}

impl CartAction {
    fn failure_message(self) -> &'static str {
        match self {
            CartAction::Load => "Failed to load cart",
            CartAction::Add => "Failed to add item to cart",
            CartAction::Remove => "Failed to remove item from cart",
            CartAction::UpdateQuantity => "Failed to update item quantity",
            CartAction::Clear => "Failed to clear cart",
        }
    }
}

#[derive(Debug, Default)]
struct CartState {
    mode: CartMode,
    cart: Cart,
    loading: bool,
    /// Bumped on every identity change. Loads and reloads started under an
    /// older generation are discarded instead of adopted.
    generation: u64,
    /// Handed out to each fetch as it starts. A fetch is adopted only if no
    /// later one has landed already.
    last_ticket: u64,
    adopted_ticket: u64,
}

impl CartState {
    fn next_ticket(&mut self) -> u64 {
        self.last_ticket += 1;
        self.last_ticket
    }

    fn accepts(&self, generation: u64, ticket: u64) -> bool {
        self.generation == generation && ticket > self.adopted_ticket
    }

    fn adopt(&mut self, ticket: u64, cart: Cart) {
        self.cart = cart;
        self.adopted_ticket = ticket;
        self.loading = false;
    }
}

/// The shopper's live cart.
///
/// Every operation is routed to the store that is authoritative for the
/// current [`CartMode`]: the local guest slot while signed out, the remote
/// cart table while signed in. The two are never merged; signing in replaces
/// the visible cart with the remote one.
///
/// Remote writes are followed by a full reload so the visible cart always
/// converges on what the table holds. Failures are logged, pushed to the
/// [`Notifier`] and returned; in-memory state is left as it was.
pub struct CartManager {
    repository: Arc<dyn CartRepository>,
    guest_store: Arc<dyn GuestCartStore>,
    notifier: Arc<dyn Notifier>,
    logger: Arc<dyn Logger>,
    state: RwLock<CartState>,
}

impl CartManager {
    /// Starts empty, in guest mode and loading. Call [`CartManager::set_identity`]
    /// (or [`CartManager::follow_identity`]) to perform the initial load.
    pub fn new(
        repository: Arc<dyn CartRepository>,
        guest_store: Arc<dyn GuestCartStore>,
        notifier: Arc<dyn Notifier>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            repository,
            guest_store,
            notifier,
            logger,
            state: RwLock::new(CartState {
                loading: true,
                ..CartState::default()
            }),
        }
    }

    pub async fn mode(&self) -> CartMode {
        self.state.read().await.mode.clone()
    }

    pub async fn items(&self) -> Vec<CartItem> {
        self.state.read().await.cart.items().to_vec()
    }

    pub async fn contains(&self, product_id: &str) -> bool {
        self.state.read().await.cart.get(product_id).is_some()
    }

    /// True until the load started by the latest identity change completes.
    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    pub async fn total_items(&self) -> u64 {
        self.state.read().await.cart.total_items()
    }

    pub async fn total_price(&self) -> f64 {
        self.state.read().await.cart.total_price()
    }

    /// Switches the authoritative store and loads the cart it holds.
    ///
    /// The mode changes immediately and the previous identity's lines are
    /// dropped, so mutations issued while the load is in flight already target
    /// the new store. If another identity change starts, or a newer fetch lands,
    /// before this load finishes, the result of this one is dropped.
    pub async fn set_identity(&self, user_id: Option<UserId>) -> Result<(), CartError> {
        let mode = CartMode::from_identity(user_id);
        let (generation, ticket) = {
            let mut state = self.state.write().await;
            state.generation += 1;
            state.mode = mode.clone();
            state.loading = true;
            state.cart = Cart::new();
            (state.generation, state.next_ticket())
        };
        self.logger.info(&format!("Loading cart in {} mode", mode));

        let loaded = match &mode {
            CartMode::Guest => Ok(self.load_guest_cart().await),
            CartMode::Authenticated(user_id) => self.fetch_remote_cart(user_id).await,
        };

        let mut state = self.state.write().await;
        if !state.accepts(generation, ticket) {
            self.logger
                .debug(&format!("Discarding superseded cart load for {} mode", mode));
            return Ok(());
        }
        match loaded {
            Ok(cart) => {
                self.logger.info(&format!(
                    "Cart loaded in {} mode with {} items",
                    mode,
                    cart.items().len()
                ));
                state.adopt(ticket, cart);
                Ok(())
            }
            Err(err) => {
                state.adopt(ticket, Cart::new());
                drop(state);
                Err(self.report(CartAction::Load, err))
            }
        }
    }

    /// Applies every value published on `identity`, in order, starting with
    /// the current one. The task ends when the sender is dropped.
    pub fn follow_identity(
        self: Arc<Self>,
        mut identity: watch::Receiver<Option<UserId>>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                let user_id = identity.borrow_and_update().clone();
                // Failures were already logged and notified.
                let _ = self.set_identity(user_id).await;
                if identity.changed().await.is_err() {
                    break;
                }
            }
        })
    }

    /// Adds `item`, or raises the quantity of the line already holding the
    /// same product by `item.quantity`.
    pub async fn add_item(&self, item: CartItem) -> Result<(), CartError> {
        item.validate()?;
        let (mode, generation) = self.snapshot().await;
        self.logger
            .info(&format!("Adding {} x{} to {} cart", item.id, item.quantity, mode));

        match mode {
            CartMode::Guest => {
                self.mutate_guest(generation, |cart| cart.add(item)).await;
                Ok(())
            }
            CartMode::Authenticated(user_id) => self
                .add_remote(&user_id, generation, item)
                .await
                .map_err(|err| self.report(CartAction::Add, err)),
        }
    }

    pub async fn remove_item(&self, product_id: &str) -> Result<(), CartError> {
        let (mode, generation) = self.snapshot().await;
        self.logger
            .info(&format!("Removing {} from {} cart", product_id, mode));

        match mode {
            CartMode::Guest => {
                self.mutate_guest(generation, |cart| {
                    cart.remove(product_id);
                })
                .await;
                Ok(())
            }
            CartMode::Authenticated(user_id) => self
                .remove_remote(&user_id, generation, product_id)
                .await
                .map_err(|err| self.report(CartAction::Remove, err)),
        }
    }

    /// Sets the quantity of a line. Zero or less removes the line.
    pub async fn update_quantity(&self, product_id: &str, quantity: i64) -> Result<(), CartError> {
        if quantity <= 0 {
            return self.remove_item(product_id).await;
        }
        let (mode, generation) = self.snapshot().await;
        self.logger.info(&format!(
            "Setting quantity of {} to {} in {} cart",
            product_id, quantity, mode
        ));

        match mode {
            CartMode::Guest => {
                self.mutate_guest(generation, |cart| {
                    cart.update_quantity(product_id, quantity);
                })
                .await;
                Ok(())
            }
            CartMode::Authenticated(user_id) => {
                let quantity = u32::try_from(quantity)
                    .unwrap_or(MAX_QUANTITY)
                    .min(MAX_QUANTITY);
                self.update_remote(&user_id, generation, product_id, quantity)
                    .await
                    .map_err(|err| self.report(CartAction::UpdateQuantity, err))
            }
        }
    }

    /// Empties the cart. The remote case needs no reload: the outcome is known.
    pub async fn clear(&self) -> Result<(), CartError> {
        let (mode, generation) = self.snapshot().await;
        self.logger.info(&format!("Clearing {} cart", mode));

        match mode {
            CartMode::Guest => {
                self.mutate_guest(generation, Cart::clear).await;
                Ok(())
            }
            CartMode::Authenticated(user_id) => match self.repository.delete_all(&user_id).await {
                Ok(count) => {
                    self.logger
                        .info(&format!("Deleted {} remote cart rows for {}", count, user_id));
                    let ticket = self.state.write().await.next_ticket();
                    self.adopt(generation, ticket, Cart::new()).await;
                    Ok(())
                }
                Err(err) => Err(self.report(CartAction::Clear, err)),
            },
        }
    }

    async fn snapshot(&self) -> (CartMode, u64) {
        let state = self.state.read().await;
        (state.mode.clone(), state.generation)
    }

    /// Applies a guest mutation and mirrors the whole list to the guest slot.
    /// The write lock is held across the save so mirrors land in order.
    async fn mutate_guest(&self, generation: u64, apply: impl FnOnce(&mut Cart)) {
        let mut state = self.state.write().await;
        if state.generation != generation || !state.mode.is_guest() {
            self.logger
                .warn("Identity changed before guest cart update, dropping it");
            return;
        }
        if state.loading {
            // Entry load still in flight: edit the slot's lines, not an empty cart.
            let ticket = state.next_ticket();
            let cart = self.load_guest_cart().await;
            state.adopt(ticket, cart);
        }
        apply(&mut state.cart);
        if let Err(err) = self.guest_store.save(state.cart.items()).await {
            self.logger
                .warn(&format!("Could not persist guest cart: {}", err));
        }
    }

    async fn add_remote(
        &self,
        user_id: &UserId,
        generation: u64,
        item: CartItem,
    ) -> Result<(), RepositoryError> {
        match self
            .repository
            .find_by_product_id(&item.id, user_id)
            .await?
        {
            Some(existing) => {
                let quantity = add_quantities(existing.item.quantity, item.quantity);
                self.repository
                    .update_quantity(&item.id, user_id, quantity)
                    .await?;
            }
            None => {
                self.repository
                    .insert(&CartRecord::new(user_id.clone(), item))
                    .await?;
            }
        }
        self.reload(user_id, generation).await
    }

    async fn remove_remote(
        &self,
        user_id: &UserId,
        generation: u64,
        product_id: &str,
    ) -> Result<(), RepositoryError> {
        self.repository.delete(product_id, user_id).await?;
        self.reload(user_id, generation).await
    }

    async fn update_remote(
        &self,
        user_id: &UserId,
        generation: u64,
        product_id: &str,
        quantity: u32,
    ) -> Result<(), RepositoryError> {
        self.repository
            .update_quantity(product_id, user_id, quantity)
            .await?;
        self.reload(user_id, generation).await
    }

    async fn reload(&self, user_id: &UserId, generation: u64) -> Result<(), RepositoryError> {
        let ticket = self.state.write().await.next_ticket();
        let cart = self.fetch_remote_cart(user_id).await?;
        self.adopt(generation, ticket, cart).await;
        Ok(())
    }

    async fn adopt(&self, generation: u64, ticket: u64, cart: Cart) {
        let mut state = self.state.write().await;
        if state.accepts(generation, ticket) {
            state.adopt(ticket, cart);
        } else {
            self.logger.debug("Discarding stale cart fetch");
        }
    }

    async fn fetch_remote_cart(&self, user_id: &UserId) -> Result<Cart, RepositoryError> {
        let records = self.repository.get_all(user_id).await?;
        Ok(Cart::from_items(
            records.into_iter().map(CartRecord::into_item),
        ))
    }

    /// A missing or unreadable slot is an empty cart, never an error.
    async fn load_guest_cart(&self) -> Cart {
        match self.guest_store.load().await {
            Ok(Some(items)) => Cart::from_items(items),
            Ok(None) => Cart::new(),
            Err(GuestCartError::Corrupt) => {
                self.logger
                    .warn("Guest cart slot is not valid JSON, starting empty");
                Cart::new()
            }
            Err(err) => {
                self.logger
                    .warn(&format!("Could not read guest cart: {}", err));
                Cart::new()
            }
        }
    }

    fn report(&self, action: CartAction, err: RepositoryError) -> CartError {
        self.logger
            .error(&format!("{}: {}", action.failure_message(), err));
        self.notifier
            .notify(Notification::failure(action.failure_message()));
        CartError::Repository(err)
    }
}
