//! Cosmetic trophy shop

use serde::{Deserialize, Serialize};

use crate::economy::Wallet;
use crate::error::ShopError;

/// A purchasable trophy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShopItem {
    pub id: &'static str,
    pub name: &'static str,
    pub price: u64,
    pub icon: &'static str,
}

const fn item(id: &'static str, name: &'static str, price: u64, icon: &'static str) -> ShopItem {
    ShopItem {
        id,
        name,
        price,
        icon,
    }
}

/// Full catalog, cheapest first
pub const CATALOG: [ShopItem; 20] = [
    item("t_wood", "Beginner Cup", 1_000, "🪵"),
    item("t_bronze", "Bronze Chalice", 2_500, "🥉"),
    item("t_iron", "Iron Goblet", 5_000, "🛡️"),
    item("t_silver", "Silver Stein", 10_000, "🥈"),
    item("t_gold", "Golden Graal", 25_000, "🏆"),
    item("t_emerald", "Emerald Relic", 50_000, "❇️"),
    item("t_ruby", "Ruby Gem", 75_000, "♦️"),
    item("t_sapphire", "Sapphire Star", 100_000, "🔷"),
    item("t_amethyst", "Void Crystal", 250_000, "🔮"),
    item("t_diamond", "Diamond Prism", 500_000, "💎"),
    item("t_plasma", "Plasma Globe", 1_000_000, "⚡"),
    item("t_sun", "Solar Essence", 2_500_000, "☀️"),
    item("t_moon", "Lunar Shard", 5_000_000, "🌙"),
    item("t_galaxy", "Nebula Orb", 10_000_000, "🌌"),
    item("t_blackhole", "Singularity", 25_000_000, "⚫"),
    item("t_time", "Chronos Dial", 50_000_000, "⏳"),
    item("t_dragon", "Dragon Soul", 100_000_000, "🐉"),
    item("t_phoenix", "Phoenix Feather", 250_000_000, "🪶"),
    item("t_god", "Divine Halo", 500_000_000, "😇"),
    item("t_creator", "The Source", 1_000_000_000, "⚛️"),
];

/// Look up a catalog item
pub fn find_item(id: &str) -> Option<&'static ShopItem> {
    CATALOG.iter().find(|item| item.id == id)
}

/// Owned item ids, in purchase order (append-only)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    owned: Vec<String>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore persisted ids, dropping duplicates
    pub fn from_ids(ids: Vec<String>) -> Self {
        let mut inventory = Self::new();
        for id in ids {
            inventory.add(id);
        }
        inventory
    }

    pub fn contains(&self, id: &str) -> bool {
        self.owned.iter().any(|owned| owned == id)
    }

    pub fn ids(&self) -> &[String] {
        &self.owned
    }

    pub fn len(&self) -> usize {
        self.owned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owned.is_empty()
    }

    fn add(&mut self, id: String) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.owned.push(id);
        true
    }

    /// Buy a catalog item
    ///
    /// Checks, in order: item exists, not already owned, affordable. On
    /// success the price is debited and ownership recorded.
    pub fn purchase(&mut self, wallet: &mut Wallet, id: &str) -> Result<&'static ShopItem, ShopError> {
        let item = find_item(id).ok_or_else(|| ShopError::UnknownItem(id.to_string()))?;
        if self.contains(item.id) {
            return Err(ShopError::AlreadyOwned(item.id.to_string()));
        }
        if !wallet.can_afford(item.price) {
            return Err(ShopError::InsufficientFunds {
                price: item.price,
                balance: wallet.balance(),
            });
        }

        wallet.debit(item.price);
        self.add(item.id.to_string());
        log::info!("Purchased {} for {}", item.name, item.price);
        Ok(item)
    }
}
