pub mod contract;
mod dao;
pub mod error;
pub mod event;
pub mod form;
pub mod format;
mod member;
mod store;
mod view;

pub use dao::{Dao, DaoConfig, DaoEventRx};
pub use member::{BlockNumber, Member, MemberIndex, Weight};
pub use store::MemberStore;
pub use view::{MemberFilter, RegistryStats, RegistryView, SortKey, ViewCache, ViewParams};
