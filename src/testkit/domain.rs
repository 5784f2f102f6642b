//! Builders for agency inputs used across tests.

use rust_decimal::Decimal;

use crate::domain::{NewMission, NewSpyCat, NewTarget};

/// Breeds known to the test catalog.
pub const KNOWN_BREEDS: [&str; 3] = ["Siamese", "Bengal", "Maine Coon"];

/// A valid cat registration with the given name and breed.
pub fn new_cat(name: &str, breed: &str) -> NewSpyCat {
    NewSpyCat {
        name: name.to_string(),
        years_of_experience: 3,
        breed: breed.to_string(),
        salary: Decimal::new(1000, 0),
    }
}

/// An open mission with one open target per name, all in France.
pub fn new_mission(names: &[&str]) -> NewMission {
    NewMission {
        completed: false,
        targets: names.iter().map(|name| NewTarget::open(*name, "FR")).collect(),
    }
}
