pub mod auth;
pub mod backend;
pub mod checkout;
pub mod cleanup;
pub mod events;
pub mod identity;
pub mod profiles;
pub mod search;
pub mod storage;
