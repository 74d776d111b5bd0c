//! `SeaORM` entity definitions.

pub mod people;
pub mod transactions;
pub mod user_settings;

pub mod prelude {
    //! Entity re-exports.
    pub use super::people::Entity as People;
    pub use super::transactions::Entity as Transactions;
    pub use super::user_settings::Entity as UserSettings;
}
