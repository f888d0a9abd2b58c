//! Coin wallet and skin unlocks
//!
//! The wallet survives across runs. Every balance- or unlock-changing action
//! writes the record through the injected [`ProgressStore`]; failures are
//! logged and otherwise ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::persistence::{PersistError, ProgressStore, SaveOutcome};
use crate::sim::VisualMode;

/// ID of the free skin every player owns
pub const DEFAULT_SKIN: &str = "classic";

/// A cosmetic skin
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkinDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Price in coins (0 for the default skin)
    pub cost: u64,
    /// Tint in prototype mode (0xRRGGBB)
    pub proto_color: u32,
    /// Tint in full mode (0xRRGGBB)
    pub full_color: u32,
}

impl SkinDefinition {
    /// Tint for a visual mode
    pub fn color(&self, mode: VisualMode) -> u32 {
        match mode {
            VisualMode::Prototype => self.proto_color,
            VisualMode::Full => self.full_color,
        }
    }
}

/// Static skin catalog
pub static SKINS: [SkinDefinition; 4] = [
    SkinDefinition {
        id: "classic",
        name: "Classic Badger",
        description: "Default runner fur.",
        cost: 0,
        proto_color: 0xb59a7a,
        full_color: 0xffffff,
    },
    SkinDefinition {
        id: "cardinal",
        name: "Cardinal Badger",
        description: "UW-inspired crimson.",
        cost: 150,
        proto_color: 0x8b0000,
        full_color: 0xff4b4b,
    },
    SkinDefinition {
        id: "midnight",
        name: "Midnight Badger",
        description: "Stealth dark runner.",
        cost: 250,
        proto_color: 0x20252f,
        full_color: 0x383f5b,
    },
    SkinDefinition {
        id: "neon",
        name: "Neon Badger",
        description: "Glowing synthwave vibe.",
        cost: 400,
        proto_color: 0x30e3b3,
        full_color: 0x66ffcc,
    },
];

/// Look up a skin by ID
pub fn skin(id: &str) -> Option<&'static SkinDefinition> {
    SKINS.iter().find(|s| s.id == id)
}

fn default_skin() -> &'static SkinDefinition {
    &SKINS[0]
}

/// The persisted record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EconomyRecord {
    pub bank_coins: u64,
    pub owned_skins: Vec<String>,
    pub active_skin_id: String,
}

impl Default for EconomyRecord {
    fn default() -> Self {
        Self {
            bank_coins: 0,
            owned_skins: vec![DEFAULT_SKIN.to_string()],
            active_skin_id: DEFAULT_SKIN.to_string(),
        }
    }
}

impl EconomyRecord {
    /// Lenient parse of stored JSON.
    ///
    /// Fields that are missing or of the wrong type keep their defaults,
    /// unknown skin IDs are dropped, the default skin is always owned, and an
    /// active skin that is not owned falls back to the default.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(json)?;
        let mut record = Self::default();

        if let Some(coins) = value.get("bankCoins").and_then(Value::as_f64) {
            if coins >= 0.0 && coins.is_finite() {
                record.bank_coins = coins.floor() as u64;
            }
        }

        if let Some(owned) = value.get("ownedSkins").and_then(Value::as_array) {
            let mut ids: Vec<String> = Vec::new();
            for id in owned.iter().filter_map(Value::as_str) {
                if skin(id).is_some() && !ids.iter().any(|o| o == id) {
                    ids.push(id.to_string());
                }
            }
            record.owned_skins = ids;
        }
        if !record.owned_skins.iter().any(|id| id == DEFAULT_SKIN) {
            record.owned_skins.insert(0, DEFAULT_SKIN.to_string());
        }

        if let Some(active) = value.get("activeSkinId").and_then(Value::as_str) {
            if record.owned_skins.iter().any(|id| id == active) {
                record.active_skin_id = active.to_string();
            }
        }

        Ok(record)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Wallet and unlock store
pub struct Economy {
    record: EconomyRecord,
    store: Box<dyn ProgressStore>,
}

impl std::fmt::Debug for Economy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Economy").field("record", &self.record).finish()
    }
}

impl Economy {
    /// Read the record once from `store`, falling back to defaults
    pub fn load(store: Box<dyn ProgressStore>) -> Self {
        let record = match read_record(store.as_ref()) {
            Ok(Some(record)) => {
                log::info!(
                    "Loaded progress: {} coins, {} skins",
                    record.bank_coins,
                    record.owned_skins.len()
                );
                record
            }
            Ok(None) => {
                log::info!("No saved progress found, starting fresh");
                EconomyRecord::default()
            }
            Err(e) => {
                log::warn!("Failed to load progress, starting fresh: {}", e);
                EconomyRecord::default()
            }
        };
        Self { record, store }
    }

    pub fn bank_coins(&self) -> u64 {
        self.record.bank_coins
    }

    pub fn owned_skins(&self) -> &[String] {
        &self.record.owned_skins
    }

    pub fn active_skin_id(&self) -> &str {
        &self.record.active_skin_id
    }

    /// Definition of the equipped skin
    pub fn active_skin(&self) -> &'static SkinDefinition {
        skin(&self.record.active_skin_id).unwrap_or_else(default_skin)
    }

    pub fn owns(&self, id: &str) -> bool {
        self.record.owned_skins.iter().any(|o| o == id)
    }

    /// Copy of the current record
    pub fn record(&self) -> &EconomyRecord {
        &self.record
    }

    /// Add collected coins to the wallet and persist
    pub fn credit(&mut self, coins: u64) -> SaveOutcome {
        self.record.bank_coins = self.record.bank_coins.saturating_add(coins);
        self.save()
    }

    /// Buy a skin. Fails without any change if the ID is unknown, free,
    /// already owned, or unaffordable.
    pub fn buy_skin(&mut self, id: &str) -> bool {
        let Some(def) = skin(id) else {
            return false;
        };
        if def.cost == 0 || self.owns(id) || self.record.bank_coins < def.cost {
            return false;
        }
        self.record.bank_coins -= def.cost;
        self.record.owned_skins.push(def.id.to_string());
        self.save();
        log::info!("Bought skin {} for {} coins", def.id, def.cost);
        true
    }

    /// Equip an owned skin. Fails if not owned or already active.
    pub fn equip_skin(&mut self, id: &str) -> bool {
        if !self.owns(id) || self.record.active_skin_id == id {
            return false;
        }
        self.record.active_skin_id = id.to_string();
        self.save();
        log::info!("Equipped skin {}", id);
        true
    }

    /// Write the record, logging instead of failing
    pub fn save(&mut self) -> SaveOutcome {
        let saved = self
            .record
            .to_json()
            .map_err(PersistError::from)
            .and_then(|json| self.store.save(&json));
        match saved {
            Ok(()) => SaveOutcome::Saved,
            Err(e) => {
                log::warn!("Failed to save progress: {}", e);
                SaveOutcome::Failed
            }
        }
    }
}

/// Stored record, if any. Unparseable JSON surfaces as [`PersistError::Json`].
fn read_record(store: &dyn ProgressStore) -> Result<Option<EconomyRecord>, PersistError> {
    store
        .load()?
        .map(|json| EconomyRecord::from_json(&json))
        .transpose()
        .map_err(PersistError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    fn economy_with(json: &str) -> (Economy, MemoryStore) {
        let store = MemoryStore::with_data(json);
        (Economy::load(Box::new(store.clone())), store)
    }

    #[test]
    fn test_missing_record_defaults() {
        let economy = Economy::load(Box::new(MemoryStore::new()));
        assert_eq!(economy.bank_coins(), 0);
        assert_eq!(economy.owned_skins(), ["classic"]);
        assert_eq!(economy.active_skin_id(), "classic");
    }

    #[test]
    fn test_corrupt_record_defaults() {
        let (economy, _) = economy_with("{not json");
        assert_eq!(economy.record(), &EconomyRecord::default());
    }

    #[test]
    fn test_corrupt_record_is_json_error() {
        let store = MemoryStore::with_data("{not json");
        assert!(matches!(read_record(&store), Err(PersistError::Json(_))));
        assert!(matches!(read_record(&MemoryStore::new()), Ok(None)));
    }

    #[test]
    fn test_unavailable_store_defaults() {
        let store = MemoryStore::with_data(r#"{"bankCoins":500}"#);
        store.set_fail_loads(true);
        let economy = Economy::load(Box::new(store));
        assert_eq!(economy.bank_coins(), 0);
    }

    #[test]
    fn test_wrong_types_are_ignored() {
        let (economy, _) =
            economy_with(r#"{"bankCoins":"lots","ownedSkins":"neon","activeSkinId":7}"#);
        assert_eq!(economy.record(), &EconomyRecord::default());

        let (economy, _) = economy_with(r#"{"bankCoins":-5}"#);
        assert_eq!(economy.bank_coins(), 0);
    }

    #[test]
    fn test_unknown_skins_filtered_and_default_forced() {
        let (economy, _) = economy_with(
            r#"{"bankCoins":12,"ownedSkins":["neon","golden",3,"neon"],"activeSkinId":"neon"}"#,
        );
        assert_eq!(economy.bank_coins(), 12);
        assert_eq!(economy.owned_skins(), ["classic", "neon"]);
        assert_eq!(economy.active_skin_id(), "neon");
    }

    #[test]
    fn test_invalidated_active_falls_back() {
        let (economy, _) =
            economy_with(r#"{"bankCoins":1,"ownedSkins":["golden"],"activeSkinId":"golden"}"#);
        assert_eq!(economy.owned_skins(), ["classic"]);
        assert_eq!(economy.active_skin_id(), "classic");
        assert_eq!(economy.active_skin().name, "Classic Badger");
    }

    #[test]
    fn test_round_trip() {
        let (mut economy, store) = economy_with(r#"{"bankCoins":300}"#);
        assert!(economy.buy_skin("midnight"));
        assert!(economy.equip_skin("midnight"));

        let reloaded = Economy::load(Box::new(store.clone()));
        assert_eq!(reloaded.record(), economy.record());
        assert_eq!(reloaded.bank_coins(), 50);
        assert_eq!(reloaded.active_skin_id(), "midnight");
    }

    #[test]
    fn test_buy_insufficient_funds() {
        let (mut economy, store) = economy_with(r#"{"bankCoins":100}"#);
        assert!(!economy.buy_skin("cardinal"));
        assert_eq!(economy.bank_coins(), 100);
        assert!(!economy.owns("cardinal"));
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn test_buy_success_persists() {
        let (mut economy, store) = economy_with(r#"{"bankCoins":300}"#);
        assert!(economy.buy_skin("midnight"));
        assert_eq!(economy.bank_coins(), 50);
        assert_eq!(economy.owned_skins().len(), 2);

        let saved = EconomyRecord::from_json(&store.data().unwrap()).unwrap();
        assert_eq!(saved.bank_coins, 50);
        assert!(saved.owned_skins.contains(&"midnight".to_string()));
    }

    #[test]
    fn test_buy_twice_no_double_charge() {
        let (mut economy, _) = economy_with(r#"{"bankCoins":1000}"#);
        assert!(economy.buy_skin("neon"));
        assert!(!economy.buy_skin("neon"));
        assert_eq!(economy.bank_coins(), 600);
    }

    #[test]
    fn test_buy_rejects_unknown_and_free() {
        let (mut economy, _) = economy_with(r#"{"bankCoins":1000}"#);
        assert!(!economy.buy_skin("golden"));
        assert!(!economy.buy_skin("classic"));
        assert_eq!(economy.bank_coins(), 1000);
    }

    #[test]
    fn test_equip_rules() {
        let (mut economy, store) = economy_with(r#"{"bankCoins":150}"#);
        assert!(!economy.equip_skin("classic"), "already active");
        assert!(!economy.equip_skin("cardinal"), "not owned");
        assert!(economy.buy_skin("cardinal"));
        assert!(economy.equip_skin("cardinal"));
        assert_eq!(economy.active_skin().proto_color, 0x8b0000);
        assert_eq!(store.save_count(), 2);
    }

    #[test]
    fn test_save_failure_is_swallowed() {
        let (mut economy, store) = economy_with(r#"{"bankCoins":10}"#);
        store.set_fail_saves(true);
        assert_eq!(economy.credit(2), SaveOutcome::Failed);
        assert_eq!(economy.bank_coins(), 12);
        store.set_fail_saves(false);
        assert_eq!(economy.credit(1), SaveOutcome::Saved);
        assert_eq!(
            EconomyRecord::from_json(&store.data().unwrap()).unwrap().bank_coins,
            13
        );
    }

    #[test]
    fn test_record_json_keys() {
        let json = EconomyRecord::default().to_json().unwrap();
        assert!(json.contains("\"bankCoins\":0"));
        assert!(json.contains("\"ownedSkins\":[\"classic\"]"));
        assert!(json.contains("\"activeSkinId\":\"classic\""));
    }

    #[test]
    fn test_skin_colors_per_mode() {
        let neon = skin("neon").unwrap();
        assert_eq!(neon.color(VisualMode::Prototype), 0x30e3b3);
        assert_eq!(neon.color(VisualMode::Full), 0x66ffcc);
    }
}
