pub mod application {
    pub mod cart {
        pub mod clear;
        pub mod create;
        pub mod delete;
        pub mod get_all;
        pub mod get_by_product_id;
        pub mod manager;
        pub mod update_quantity;
    }
}

pub mod domain {
    pub mod errors;
    pub mod logger;
    pub mod notifier;
    pub mod shared {
        pub mod value_objects;
    }
    pub mod cart {
        pub mod errors;
        pub mod guest_store;
        pub mod mode;
        pub mod model;
        pub mod price;
        pub mod repository;
        pub mod use_cases {
            pub mod clear;
            pub mod create;
            pub mod delete;
            pub mod get_all;
            pub mod get_by_product_id;
            pub mod update_quantity;
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support;
