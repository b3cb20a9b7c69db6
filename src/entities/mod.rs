//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod device;
pub mod device_category;
pub mod device_log;
pub mod room;
pub mod user;

// Re-export specific types to avoid conflicts
pub use device::{Entity as Device, Model as DeviceModel};
pub use device_category::Entity as DeviceCategory;
pub use device_log::{Entity as DeviceLog, Model as DeviceLogModel};
pub use room::{Entity as Room, Model as RoomModel};
pub use user::{Entity as User, Model as UserModel};
