use std::sync::Arc;

use logger::TracingLogger;
use persistence::cart::repository::CartRepositoryPostgres;

use business::application::cart::clear::ClearCartUseCaseImpl;
use business::application::cart::create::CreateCartItemUseCaseImpl;
use business::application::cart::delete::DeleteCartItemUseCaseImpl;
use business::application::cart::get_all::GetCartItemsUseCaseImpl;
use business::application::cart::get_by_product_id::GetCartItemUseCaseImpl;
use business::application::cart::update_quantity::UpdateCartItemQuantityUseCaseImpl;

use crate::api::cart::routes::CartApi;
use crate::api::health::routes::Api as HealthApi;

pub struct DependencyContainer {
    pub health_api: HealthApi,
    pub cart_api: CartApi,
}

impl DependencyContainer {
    pub fn new(pool: sqlx::PgPool) -> Self {
        let logger = Arc::new(TracingLogger);
        let health_api = HealthApi::new(pool.clone());

        // Infrastructure adapters
        let cart_repository = Arc::new(CartRepositoryPostgres::new(pool));

        // Cart use cases
        let get_all_use_case = Arc::new(GetCartItemsUseCaseImpl {
            repository: cart_repository.clone(),
            logger: logger.clone(),
        });
        let get_item_use_case = Arc::new(GetCartItemUseCaseImpl {
            repository: cart_repository.clone(),
            logger: logger.clone(),
        });
        let create_use_case = Arc::new(CreateCartItemUseCaseImpl {
            repository: cart_repository.clone(),
            logger: logger.clone(),
        });
        let update_quantity_use_case = Arc::new(UpdateCartItemQuantityUseCaseImpl {
            repository: cart_repository.clone(),
            logger: logger.clone(),
        });
        let delete_use_case = Arc::new(DeleteCartItemUseCaseImpl {
            repository: cart_repository.clone(),
            logger: logger.clone(),
        });
        let clear_use_case = Arc::new(ClearCartUseCaseImpl {
            repository: cart_repository,
            logger,
        });

        let cart_api = CartApi::new(
            get_all_use_case,
            get_item_use_case,
            create_use_case,
            update_quantity_use_case,
            delete_use_case,
            clear_use_case,
        );

        Self {
            health_api,
            cart_api,
        }
    }
}
