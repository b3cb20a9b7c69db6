//! Sample data for a fresh database.
//!
//! Seeds three rooms, four categories and three devices so the dashboard has
//! something to show. Runs only when the `rooms` table is empty, and inserts
//! everything in one transaction.

use crate::{
    core::device::DeviceStatus,
    entities::{Room, device, device_category, room},
    errors::Result,
};
use sea_orm::{PaginatorTrait, Set, TransactionTrait, prelude::*};

const ROOMS: [(&str, &str); 3] = [
    ("Living Room", "Main living area"),
    ("Bedroom", "Master bedroom"),
    ("Kitchen", "Kitchen area"),
];

const CATEGORIES: [(&str, &str); 4] = [
    ("Lights", "lightbulb"),
    ("Sensors", "sensor"),
    ("Cameras", "camera"),
    ("Thermostats", "thermostat"),
];

struct SampleDevice {
    name: &'static str,
    device_type: &'static str,
    brand: &'static str,
    model: &'static str,
    ip_address: &'static str,
    status: DeviceStatus,
    room: usize,
    category: usize,
}

const DEVICES: [SampleDevice; 3] = [
    SampleDevice {
        name: "Smart LED Bulb 1",
        device_type: "light",
        brand: "Philips",
        model: "Hue White",
        ip_address: "192.168.1.10",
        status: DeviceStatus::Online,
        room: 0,
        category: 0,
    },
    SampleDevice {
        name: "Motion Sensor",
        device_type: "sensor",
        brand: "Samsung",
        model: "SmartThings",
        ip_address: "192.168.1.11",
        status: DeviceStatus::Online,
        room: 0,
        category: 1,
    },
    SampleDevice {
        name: "Security Camera",
        device_type: "camera",
        brand: "Ring",
        model: "Indoor Cam",
        ip_address: "192.168.1.12",
        status: DeviceStatus::Offline,
        room: 1,
        category: 2,
    },
];

/// Seeds the sample data if no room exists yet.
///
/// Returns `true` when data was inserted, `false` when the database already had rooms.
pub async fn seed_sample_data(db: &DatabaseConnection) -> Result<bool> {
    if Room::find().count(db).await? > 0 {
        tracing::info!("Database already has data, skipping sample seed");
        return Ok(false);
    }

    let txn = db.begin().await?;
    let now = chrono::Utc::now();

    let mut room_ids = Vec::with_capacity(ROOMS.len());
    for (name, description) in ROOMS {
        let room = room::ActiveModel {
            name: Set(name.to_string()),
            description: Set(Some(description.to_string())),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        room_ids.push(room.id);
    }

    let mut category_ids = Vec::with_capacity(CATEGORIES.len());
    for (name, icon) in CATEGORIES {
        let category = device_category::ActiveModel {
            name: Set(name.to_string()),
            icon: Set(Some(icon.to_string())),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        category_ids.push(category.id);
    }

    for sample in &DEVICES {
        device::ActiveModel {
            name: Set(sample.name.to_string()),
            device_type: Set(sample.device_type.to_string()),
            brand: Set(Some(sample.brand.to_string())),
            model: Set(Some(sample.model.to_string())),
            ip_address: Set(Some(sample.ip_address.to_string())),
            mac_address: Set(None),
            status: Set(sample.status.as_str().to_string()),
            is_active: Set(true),
            last_seen: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            room_id: Set(room_ids.get(sample.room).copied()),
            category_id: Set(category_ids.get(sample.category).copied()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;
    tracing::info!(
        rooms = ROOMS.len(),
        categories = CATEGORIES.len(),
        devices = DEVICES.len(),
        "Database initialized with sample data"
    );
    Ok(true)
}
