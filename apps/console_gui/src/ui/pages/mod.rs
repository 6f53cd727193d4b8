pub mod categories;
pub mod dashboard;
pub mod designing;
pub mod inventory;
pub mod leads;
pub mod orders;
pub mod printing;
pub mod products;
pub mod shipping;
pub mod tasks;
pub mod users;
